//! Configuration types for layout evaluation.
//!
//! This module provides configuration structures that tune the distribution
//! strategies. All types implement [`serde::Deserialize`] so hosts can load
//! them from TOML or any other format, and every field has a default.
//!
//! # Overview
//!
//! - [`LayoutConfig`] - Top-level configuration combining the sections below.
//! - [`StackConfig`] - Axis, spacing and justification of linear stacks.
//! - [`RadialConfig`] - Start angle and radius of radial arrangements.
//!
//! # Example
//!
//! ```
//! # use trellis::config::LayoutConfig;
//! let config = LayoutConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.radial().radius_scale(), 0.5);
//! ```

use serde::Deserialize;

use trellis_core::anchor::Axis;

use crate::{
    distribution::Justify,
    error::{LayoutError, Result},
};

/// Top-level layout configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    /// Linear stack section.
    #[serde(default)]
    stack: StackConfig,

    /// Radial arrangement section.
    #[serde(default)]
    radial: RadialConfig,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`] from its sections.
    pub fn new(stack: StackConfig, radial: RadialConfig) -> Self {
        Self { stack, radial }
    }

    /// Returns the stack configuration.
    pub fn stack(&self) -> &StackConfig {
        &self.stack
    }

    /// Returns the radial configuration.
    pub fn radial(&self) -> &RadialConfig {
        &self.radial
    }

    /// Checks every section for values the strategies cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] for a negative stack spacing or a
    /// radius scale that is not strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.stack.spacing < 0.0 {
            return Err(LayoutError::Config(format!(
                "stack spacing must not be negative, got {}",
                self.stack.spacing
            )));
        }
        let radius_scale = self.radial.radius_scale;
        if radius_scale.is_nan() || radius_scale <= 0.0 {
            return Err(LayoutError::Config(format!(
                "radial radius_scale must be positive, got {radius_scale}"
            )));
        }
        Ok(())
    }
}

/// Linear stack configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackConfig {
    /// Main axis of the stack.
    #[serde(default)]
    axis: Axis,

    /// Gap between consecutive items.
    #[serde(default)]
    spacing: f32,

    /// Placement of the run when items leave space over.
    #[serde(default)]
    justify: Justify,
}

impl StackConfig {
    pub fn new(axis: Axis, spacing: f32, justify: Justify) -> Self {
        Self {
            axis,
            spacing,
            justify,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn justify(&self) -> Justify {
        self.justify
    }
}

/// Radial arrangement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RadialConfig {
    /// Angle of the first item in degrees; 0 is straight up, growing clockwise.
    #[serde(default)]
    start_angle_degrees: f32,

    /// Radius as a fraction of the shorter side of the bounds.
    #[serde(default = "default_radius_scale")]
    radius_scale: f32,
}

fn default_radius_scale() -> f32 {
    0.5
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            start_angle_degrees: 0.0,
            radius_scale: default_radius_scale(),
        }
    }
}

impl RadialConfig {
    pub fn new(start_angle_degrees: f32, radius_scale: f32) -> Self {
        Self {
            start_angle_degrees,
            radius_scale,
        }
    }

    pub fn start_angle_degrees(&self) -> f32 {
        self.start_angle_degrees
    }

    pub fn radius_scale(&self) -> f32 {
        self.radius_scale
    }
}
