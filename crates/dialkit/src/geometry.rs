use derive_more::{Add, Deref, Display, From, Into, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Add, Sub, Mul)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin.
    pub fn distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of the point in degrees, in `(-180, 180]`, with y pointing down.
    pub fn angle(&self) -> Degrees {
        Degrees(self.y.atan2(self.x).to_degrees())
    }

    /// Rescales the point onto the circle of `radius` when it lies outside it,
    /// preserving direction.
    pub fn clamp_to(self, radius: f64) -> Self {
        let distance = self.distance();
        if distance.is_infinite() && self.x.is_finite() && self.y.is_finite() {
            // length overflows; shrink to a unit-scale vector first
            let scale = self.x.abs().max(self.y.abs());
            return Point::new(self.x / scale, self.y / scale).clamp_to(radius);
        }
        if distance > radius {
            self * (radius / distance)
        } else {
            self
        }
    }

    pub fn from_polar(radius: f64, angle: Degrees) -> Self {
        let radians = angle.to_radians();
        Self::new(radius * radians.cos(), radius * radians.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, Deref, From, Into, Add, Sub)]
pub struct Degrees(f64);

crate::impl_newtype!(Degrees, f64);

/// Angular width of one sector.
pub fn sweep(count: usize) -> Degrees {
    Degrees(360.0 / count as f64)
}

/// Where sector `index` begins. Sector 0 is centered on 12 o'clock, so it starts
/// half a sweep before -90°.
pub fn sector_start_angle(index: usize, count: usize) -> Degrees {
    let sweep = *sweep(count);
    Degrees(sweep * index as f64 - 90.0 - sweep / 2.0)
}

/// Centerline of sector `index`, used to place the option's anchor.
pub fn placement_angle(index: usize, count: usize) -> Degrees {
    sector_start_angle(index, count) + Degrees(*sweep(count) / 2.0)
}

/// Radius at which option anchors sit: midway between the dead zone and the rim.
pub fn anchor_radius(radius: f64, cutoff_fraction: f64) -> f64 {
    radius * (cutoff_fraction + (1.0 - cutoff_fraction) / 2.0)
}

/// Index of the sector whose half-open interval contains the offset's angle.
///
/// Angles past the last sector's start wrap around the ±180° seam and match
/// nothing in index order, so they fall back to the last sector.
pub fn sector_of(offset: Point, count: usize) -> usize {
    let angle = offset.angle();
    let sweep = sweep(count);

    (0..count)
        .find(|&index| {
            let start = sector_start_angle(index, count);
            angle >= start && angle < start + sweep
        })
        .unwrap_or(count.saturating_sub(1))
}
