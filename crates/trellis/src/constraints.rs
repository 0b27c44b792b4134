//! Cross-reference decorator.
//!
//! [`Constrained`] lets a node position itself relative to another
//! rectangle: before delegating, it transforms the inner node's *source*
//! with one or more schemes evaluated against a reference rectangle.
//!
//! In commit and measure passes the reference is read through its accessor.
//! In the collect pass, and in [`Layout::measure_recorded`], a reference that
//! names a [`NodeId`] is read from the snapshot instead, so it resolves to the
//! rectangle computed earlier in the same pass; a missing entry is a
//! [`LayoutError::UnresolvedReference`].
//!
//! [`LayoutError::UnresolvedReference`]: crate::LayoutError::UnresolvedReference

use log::trace;

use trellis_core::{geometry::Rect, identifier::NodeId};

use crate::{
    binding::{ConstantRect, External, RectAccessor},
    error::Result,
    node::{Layout, LayoutExt},
    scheme::Scheme,
    snapshot::Snapshot,
};

/// The rectangle a constraint is evaluated against.
pub struct Reference<V> {
    id: Option<NodeId>,
    accessor: Box<dyn RectAccessor<V>>,
}

impl<V> Reference<V> {
    /// Another node's rectangle.
    ///
    /// `accessor` reads the element directly in commit and measure passes; the
    /// snapshot entry for `id` is used while collecting.
    pub fn node(id: impl Into<NodeId>, accessor: impl RectAccessor<V> + 'static) -> Self {
        Self {
            id: Some(id.into()),
            accessor: Box::new(accessor),
        }
    }

    /// A fixed rectangle.
    pub fn constant(rect: Rect) -> Self {
        Self {
            id: None,
            accessor: Box::new(ConstantRect(rect)),
        }
    }

    /// A rectangle computed from the view by a closure.
    pub fn external<F>(read: F) -> Self
    where
        F: Fn(&V) -> Rect + 'static,
    {
        Self {
            id: None,
            accessor: Box::new(External::new(read)),
        }
    }

    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn read(&self, view: &V) -> Rect {
        self.accessor.rect(view)
    }

    fn read_recorded(&self, snapshot: &Snapshot, view: &V) -> Result<Rect> {
        match self.id {
            Some(id) => snapshot.resolve(id),
            None => Ok(self.read(view)),
        }
    }
}

/// Decorates a node with ordered `(reference, scheme)` constraints.
///
/// Constraints run in declaration order; calling
/// [`Constrained::constrained`] on an already constrained node appends.
pub struct Constrained<V, L> {
    inner: L,
    constraints: Vec<(Reference<V>, Scheme)>,
}

impl<V, L> Constrained<V, L> {
    pub fn new(inner: L, reference: Reference<V>, scheme: Scheme) -> Self {
        Self {
            inner,
            constraints: vec![(reference, scheme)],
        }
    }

    /// Appends another constraint, evaluated after the existing ones.
    pub fn constrained(mut self, reference: Reference<V>, scheme: Scheme) -> Self {
        self.constraints.push((reference, scheme));
        self
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    fn constrain(&self, view: &V, source: Rect) -> Rect {
        let mut rect = source;
        for (reference, scheme) in &self.constraints {
            scheme.apply(&mut rect, reference.read(view));
        }
        rect
    }

    fn constrain_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        let mut rect = source;
        for (reference, scheme) in &self.constraints {
            let target = reference.read_recorded(snapshot, view)?;
            trace!(reference:? = reference.id, target:?; "Resolved constraint reference");
            scheme.apply(&mut rect, target);
        }
        Ok(rect)
    }
}

impl<V, L: Layout<V>> Layout<V> for Constrained<V, L> {
    fn id(&self) -> Option<NodeId> {
        self.inner.id()
    }

    fn is_fixed_width(&self) -> bool {
        self.inner.is_fixed_width()
    }

    fn is_fixed_height(&self) -> bool {
        self.inner.is_fixed_height()
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        self.inner.measure(view, self.constrain(view, source))
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        let source = self.constrain_recorded(snapshot, view, source)?;
        self.inner.measure_recorded(snapshot, view, source)
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        self.inner.commit(view, rect)
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        let source = self.constrain(view, source);
        self.inner.layout(view, source)
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        self.inner.record(snapshot, view, rect)
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        let source = self.constrain_recorded(snapshot, view, source)?;
        self.inner.collect(snapshot, view, source)
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        self.inner.apply(snapshot, view)
    }
}

impl<V, L> LayoutExt for Constrained<V, L> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anchor::{Anchor, Edge},
        binding::Accessor,
        error::LayoutError,
        placement::Placement,
        scheme::Dimension,
    };

    #[derive(Default)]
    struct Form {
        label: Rect,
        field: Rect,
    }

    fn label() -> Placement<Accessor<impl Fn(&Form) -> Rect, impl Fn(&mut Form, Rect)>> {
        Placement::new(Accessor::new(
            |form: &Form| form.label,
            |form: &mut Form, rect| form.label = rect,
        ))
            .with_id(0usize)
            .with_scheme(
                Scheme::new()
                    .width(Dimension::Constant(100.0))
                    .height(Dimension::Constant(20.0))
                    .left(10.0)
                    .top(10.0),
            )
    }

    fn field() -> Placement<Accessor<impl Fn(&Form) -> Rect, impl Fn(&mut Form, Rect)>> {
        Placement::new(Accessor::new(
            |form: &Form| form.field,
            |form: &mut Form, rect| form.field = rect,
        ))
            .with_id(1usize)
    }

    fn below_label() -> Scheme {
        Scheme::new()
            .align(Edge::MinY, Anchor::Max)
            .height(Dimension::Constant(30.0))
    }

    fn label_reference() -> Reference<Form> {
        Reference::node(0usize, External::new(|form: &Form| form.label))
    }

    #[test]
    fn test_commit_reads_reference_through_accessor() {
        let mut form = Form::default();
        let source = Rect::new(0.0, 0.0, 300.0, 200.0);

        label().layout(&mut form, source).unwrap();
        field()
            .constrained(label_reference(), below_label())
            .layout(&mut form, source)
            .unwrap();

        assert_eq!(form.field, Rect::new(0.0, 30.0, 300.0, 30.0));
    }

    #[test]
    fn test_collect_reads_reference_from_snapshot() {
        let form = Form::default();
        let source = Rect::new(0.0, 0.0, 300.0, 200.0);
        let mut snapshot = Snapshot::new();

        label().collect(&mut snapshot, &form, source).unwrap();
        field()
            .constrained(label_reference(), below_label())
            .collect(&mut snapshot, &form, source)
            .unwrap();

        // The accessor would still read the default rect
        assert_eq!(form.label, Rect::default());
        assert_eq!(snapshot.get(NodeId::new(1)), Some(Rect::new(0.0, 30.0, 300.0, 30.0)));
    }

    #[test]
    fn test_collect_without_referenced_entry_fails() {
        let form = Form::default();
        let mut snapshot = Snapshot::new();

        let err = field()
            .constrained(label_reference(), below_label())
            .collect(&mut snapshot, &form, Rect::new(0.0, 0.0, 300.0, 200.0))
            .unwrap_err();
        assert_eq!(err, LayoutError::UnresolvedReference(NodeId::new(0)));
    }

    #[test]
    fn test_constraints_run_in_declaration_order() {
        let form = Form::default();
        let node = field()
            .constrained(
                Reference::constant(Rect::new(0.0, 0.0, 50.0, 50.0)),
                Scheme::new().width(Dimension::Scaled(1.0)),
            )
            .constrained(
                Reference::constant(Rect::new(0.0, 0.0, 80.0, 80.0)),
                Scheme::new().width(Dimension::Current(10.0)),
            );

        let rect = node.measure(&form, Rect::new(0.0, 0.0, 300.0, 200.0)).unwrap();
        assert_eq!(rect.width(), 40.0);
        assert_eq!(Layout::<Form>::id(&node), Some(NodeId::new(1)));
    }

    #[test]
    fn test_external_reference() {
        let mut form = Form {
            label: Rect::new(0.0, 0.0, 40.0, 40.0),
            ..Form::default()
        };
        let node = field().constrained(
            Reference::external(|form: &Form| form.label),
            Scheme::new()
                .width(Dimension::Scaled(0.5))
                .height(Dimension::Scaled(0.5))
                .center(),
        );

        node.layout(&mut form, Rect::new(0.0, 0.0, 300.0, 200.0)).unwrap();
        assert_eq!(form.field, Rect::new(10.0, 10.0, 20.0, 20.0));
    }
}
