use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialError {
    #[error("A dial needs at least one option")]
    NoOptions,
    #[error("Cutoff fraction must be within [0, 1), got {0}")]
    CutoffOutOfRange(f64),
    #[error("Dial diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),
    #[error("Indicator size must be non-negative and finite, got {0}")]
    InvalidIndicatorSize(f64),
}

/// Anchor point of a dial inside its container.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum DialAlignment {
    #[strum(to_string = "top-start", serialize = "TopStart", serialize = "tl")]
    TopStart,
    #[strum(to_string = "top-center", serialize = "TopCenter", serialize = "t")]
    TopCenter,
    #[strum(to_string = "top-end", serialize = "TopEnd", serialize = "tr")]
    TopEnd,
    #[strum(to_string = "center-start", serialize = "CenterStart", serialize = "l")]
    CenterStart,
    #[strum(to_string = "center", serialize = "c")]
    Center,
    #[strum(to_string = "center-end", serialize = "CenterEnd", serialize = "r")]
    CenterEnd,
    #[strum(to_string = "bottom-start", serialize = "BottomStart", serialize = "bl")]
    BottomStart,
    #[strum(to_string = "bottom-center", serialize = "BottomCenter", serialize = "b")]
    BottomCenter,
    #[strum(to_string = "bottom-end", serialize = "BottomEnd", serialize = "br")]
    BottomEnd,
}

impl DialAlignment {
    /// Horizontal and vertical bias, each in `[0, 1]`.
    fn bias(&self) -> (f64, f64) {
        match self {
            Self::TopStart => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopEnd => (1.0, 0.0),
            Self::CenterStart => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterEnd => (1.0, 0.5),
            Self::BottomStart => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomEnd => (1.0, 1.0),
        }
    }

    /// Top-left corner of a square of side `size` aligned inside `bounds`.
    pub fn align(&self, size: f64, bounds: Point) -> Point {
        let (bx, by) = self.bias();
        Point::new((bounds.x - size) * bx, (bounds.y - size) * by)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialConfig {
    pub diameter: f64,
    pub indicator_size: f64,
    /// Fraction of the radius, from the center, where nothing is selected.
    pub cutoff_fraction: f64,
    /// Keep the dial on screen between gestures.
    pub persistent: bool,
    pub haptics: bool,
    pub alignment: Option<DialAlignment>,
    /// Duration of the puck's return to center after release. Zero snaps.
    pub return_millis: u64,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            diameter: 240.0,
            indicator_size: 24.0,
            cutoff_fraction: 0.4,
            persistent: false,
            haptics: true,
            alignment: None,
            return_millis: 0,
        }
    }
}

impl DialConfig {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn dead_zone(&self) -> f64 {
        self.radius() * self.cutoff_fraction
    }

    /// Persistent dials sit in the middle of their container, transient ones
    /// are positioned around the touch point.
    pub fn alignment(&self) -> DialAlignment {
        self.alignment.unwrap_or(if self.persistent {
            DialAlignment::Center
        } else {
            DialAlignment::TopStart
        })
    }

    pub fn return_duration(&self) -> Duration {
        Duration::from_millis(self.return_millis)
    }

    pub fn validate(&self) -> Result<(), DialError> {
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return Err(DialError::InvalidDiameter(self.diameter));
        }
        if !(self.indicator_size.is_finite() && self.indicator_size >= 0.0) {
            return Err(DialError::InvalidIndicatorSize(self.indicator_size));
        }
        if !(0.0..1.0).contains(&self.cutoff_fraction) {
            return Err(DialError::CutoffOutOfRange(self.cutoff_fraction));
        }
        Ok(())
    }
}
