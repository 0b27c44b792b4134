//! Example: Laying out a profile card
//!
//! This example builds a small card with an avatar, a name label sized to
//! its text, a row of action buttons and a ring of badges, then evaluates it
//! in both commit and snapshot mode. Run with `RUST_LOG=trace` to see every
//! pass.

use std::rc::Rc;

use log::info;

use trellis::{
    FittingPlacement, FittingSizeCache, Group, LayoutExt, Placement, Reduce, Reference,
    Stack,
    anchor::{Anchor, Edge},
    binding::{ElementTable, Slot},
    config::LayoutConfig,
    distribution::Radial,
    engine,
    geometry::{Rect, Size},
    identifier::NodeId,
    scheme::{Alignment, Dimension, Scheme},
};

const CONFIG: &str = r#"
[stack]
axis = "horizontal"
spacing = 8.0
justify = "center"

[radial]
start_angle_degrees = 45.0
radius_scale = 0.5
"#;

const AVATAR: usize = 0;
const NAME: usize = 1;
const BUTTONS: usize = 2;
const BADGES: usize = 5;
const BADGE_COUNT: usize = 4;

/// The host's element table: one frame and one label per element.
struct Card {
    frames: Vec<Rect>,
    labels: Vec<&'static str>,
}

impl Card {
    fn new() -> Self {
        let labels = vec![
            "avatar", "Ada Lovelace", "Follow", "Message", "Share", "a", "b", "c", "d",
        ];
        Self {
            frames: vec![Rect::default(); labels.len()],
            labels,
        }
    }
}

impl ElementTable for Card {
    type Key = usize;

    fn frame(&self, key: usize) -> Rect {
        self.frames[key]
    }

    fn set_frame(&mut self, key: usize, rect: Rect) {
        self.frames[key] = rect;
    }

    fn fitting_size(&self, key: usize, available: Size) -> Size {
        // Monospaced text at 8 points per character
        let width = (self.labels[key].len() as f32 * 8.0).min(available.width());
        Size::new(width, 16.0)
    }
}

fn build(config: &LayoutConfig, cache: &Rc<FittingSizeCache>) -> Group<Card> {
    let avatar = Placement::new(Slot(AVATAR)).with_id(AVATAR).with_scheme(
        Scheme::new()
            .width(Dimension::Constant(64.0))
            .height(Dimension::Constant(64.0))
            .center_x()
            .top(16.0),
    );

    let badges = Reduce::new(
        0..BADGE_COUNT,
        Radial::from_config(config.radial()),
        |index, _| {
            Placement::new(Slot(BADGES + index))
                .with_id(BADGES + index)
                .with_scheme(
                    Scheme::new()
                        .width(Dimension::Constant(12.0))
                        .height(Dimension::Constant(12.0)),
                )
        },
    )
    .constrained(
        Reference::node(AVATAR, Slot(AVATAR)),
        Scheme::equal(),
    );

    let name = FittingPlacement::cached(Slot(NAME), Rc::clone(cache), NAME)
        .with_scheme(Scheme::new().center_x().top(0.0))
        .constrained(
            Reference::node(AVATAR, Slot(AVATAR)),
            Scheme::new().then(Alignment::new(Edge::MinY, Anchor::Max).offset(8.0)),
        );

    let mut buttons: Stack<Card> = Stack::from_config(config.stack()).with_id(NodeId::new(100));
    for offset in 0..3 {
        let key = BUTTONS + offset;
        buttons.push(
            FittingPlacement::cached(Slot(key), Rc::clone(cache), key)
                .with_scheme(Scheme::new().height(Dimension::Constant(24.0)).top(0.0))
                .boxed(),
        );
    }
    let buttons = buttons.constrained(
        Reference::node(NAME, Slot(NAME)),
        Scheme::new()
            .height(Dimension::Constant(24.0))
            .then(Alignment::new(Edge::MinY, Anchor::Max).offset(16.0)),
    );

    Group::new()
        .child(avatar)
        .child(badges)
        .child(name)
        .child(buttons)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: LayoutConfig = toml::from_str(CONFIG)?;
    config.validate()?;
    info!(config:?; "Loaded layout configuration");

    let cache = Rc::new(FittingSizeCache::new());
    let tree = build(&config, &cache);
    let bounds = Rect::new(0.0, 0.0, 320.0, 240.0);

    let mut card = Card::new();
    engine::evaluate(&tree, &mut card, bounds)?;
    for (label, frame) in card.labels.iter().zip(&card.frames) {
        println!("{label:>14}: {frame:?}");
    }

    let mut replayed = Card::new();
    let snapshot = engine::snapshot_then_apply(&tree, &mut replayed, bounds)?;
    info!(records = snapshot.len(), union:? = engine::union_rect(&snapshot); "Snapshot applied");
    assert_eq!(card.frames, replayed.frames);

    let size = engine::size_that_fits(&tree, &card, Size::new(320.0, 1000.0), Default::default())?;
    println!("\nFitting size: {size:?}");
    println!("Cached fitting sizes: {}", cache.len());

    Ok(())
}
