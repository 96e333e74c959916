pub mod animation;
pub mod config;
pub mod control;
pub mod geometry;
pub mod ipc;
pub mod macros;
pub mod pulse;

pub use config::{DialAlignment, DialConfig, DialError};
pub use control::{DialControl, DialLayout, Phase};
pub use geometry::{Degrees, Point};
pub use pulse::{HapticFeedback, SelectionPulse};
