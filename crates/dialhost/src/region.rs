use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// The six slices of the demo dial, clockwise from 12 o'clock.
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
pub enum DialRegion {
    #[strum(to_string = "top", serialize = "t", serialize = "up", serialize = "0")]
    Top,
    #[strum(to_string = "top-right", serialize = "TopRight", serialize = "tr", serialize = "1")]
    TopRight,
    #[strum(to_string = "bottom-right", serialize = "BottomRight", serialize = "br", serialize = "2")]
    BottomRight,
    #[strum(to_string = "bottom", serialize = "b", serialize = "down", serialize = "3")]
    Bottom,
    #[strum(to_string = "bottom-left", serialize = "BottomLeft", serialize = "bl", serialize = "4")]
    BottomLeft,
    #[strum(to_string = "top-left", serialize = "TopLeft", serialize = "tl", serialize = "5")]
    TopLeft,
}

impl DialRegion {
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}
