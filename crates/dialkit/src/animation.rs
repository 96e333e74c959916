use crate::geometry::Point;
use std::time::Duration;

/// Eases the indicator from where it was released back to the dial center.
///
/// Stepped by the owner with elapsed frame time; nothing runs on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnToOrigin {
    from: Point,
    elapsed: Duration,
    duration: Duration,
}

impl ReturnToOrigin {
    pub fn new(from: Point, duration: Duration) -> Self {
        Self {
            from,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> Point {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> Point {
        if self.is_finished() {
            return Point::ORIGIN;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from * (1.0 - ease_out_cubic(t))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_origin_after_duration() {
        let mut anim = ReturnToOrigin::new(Point::new(0.0, -100.0), Duration::from_millis(200));
        assert_eq!(anim.value(), Point::new(0.0, -100.0));

        let halfway = anim.advance(Duration::from_millis(100));
        // ease-out covers most of the way in the first half
        assert!(halfway.y > -20.0 && halfway.y < 0.0);
        assert!(!anim.is_finished());

        assert_eq!(anim.advance(Duration::from_millis(500)), Point::ORIGIN);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_zero_duration_is_already_finished() {
        let anim = ReturnToOrigin::new(Point::new(10.0, 10.0), Duration::ZERO);
        assert!(anim.is_finished());
        assert_eq!(anim.value(), Point::ORIGIN);
    }

    #[test]
    fn test_path_keeps_direction() {
        let mut anim = ReturnToOrigin::new(Point::new(30.0, 40.0), Duration::from_millis(100));
        let p = anim.advance(Duration::from_millis(30));
        assert!((p.y / p.x - 40.0 / 30.0).abs() < 1e-9);
    }
}
