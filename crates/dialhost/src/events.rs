use crate::region::DialRegion;
use dialkit::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Down(Point),
    Drag(Point),
    Release,
    Enable(DialRegion),
    Disable(DialRegion),
    ConfigReload,
}
