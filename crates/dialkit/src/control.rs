use crate::animation::ReturnToOrigin;
use crate::config::{DialConfig, DialError};
use crate::geometry::{self, Degrees, Point};
use std::fmt;
use std::time::Duration;

pub type OnSelected<T> = Box<dyn FnMut(&T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
}

/// Options and the enabled subset, always replaced together.
#[derive(Debug, Clone, PartialEq)]
struct OptionSet<T> {
    all: Vec<T>,
    enabled: Vec<T>,
}

impl<T> OptionSet<T> {
    fn new(all: Vec<T>, enabled: Vec<T>) -> Result<Self, DialError> {
        if all.is_empty() {
            return Err(DialError::NoOptions);
        }
        Ok(Self { all, enabled })
    }
}

/// Where the renderer should put the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialLayout {
    /// Top-left corner of the dial's bounding square.
    pub origin: Point,
    pub center: Point,
    pub radius: f64,
}

/// Gesture state of a radial dial over options of type `T`.
///
/// The indicator offset is the only stored selection state; the selected
/// option is derived from it on every read.
pub struct DialControl<T> {
    config: DialConfig,
    options: OptionSet<T>,
    phase: Phase,
    container_offset: Point,
    indicator_offset: Point,
    returning: Option<ReturnToOrigin>,
    on_selected: OnSelected<T>,
}

impl<T: PartialEq> DialControl<T> {
    /// Builds a dial with every option enabled.
    pub fn new(
        options: Vec<T>,
        config: DialConfig,
        on_selected: impl FnMut(&T) + 'static,
    ) -> Result<Self, DialError>
    where
        T: Clone,
    {
        let enabled = options.clone();
        Self::with_enabled(options, enabled, config, on_selected)
    }

    pub fn with_enabled(
        options: Vec<T>,
        enabled: Vec<T>,
        config: DialConfig,
        on_selected: impl FnMut(&T) + 'static,
    ) -> Result<Self, DialError> {
        config.validate()?;
        let options = OptionSet::new(options, enabled)?;

        Ok(Self {
            config,
            options,
            phase: Phase::Idle,
            container_offset: Point::ORIGIN,
            indicator_offset: Point::ORIGIN,
            returning: None,
            on_selected: Box::new(on_selected),
        })
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn visible(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Whether the dial should be drawn at all, counting persistent dials.
    pub fn is_shown(&self) -> bool {
        self.visible() || self.config.persistent
    }

    pub fn container_offset(&self) -> Point {
        self.container_offset
    }

    pub fn indicator_offset(&self) -> Point {
        self.indicator_offset
    }

    pub fn is_animating(&self) -> bool {
        self.returning.is_some()
    }

    pub fn options(&self) -> &[T] {
        &self.options.all
    }

    pub fn enabled_options(&self) -> &[T] {
        &self.options.enabled
    }

    pub fn is_option_enabled(&self, option: &T) -> bool {
        self.options.enabled.contains(option)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let offset = self.indicator_offset;
        if offset.distance() < self.config.dead_zone() {
            return None;
        }
        let index = geometry::sector_of(offset, self.options.all.len());
        self.is_option_enabled(&self.options.all[index])
            .then_some(index)
    }

    pub fn selected_option(&self) -> Option<&T> {
        self.selected_index().map(|i| &self.options.all[i])
    }

    pub fn sweep(&self) -> Degrees {
        geometry::sweep(self.options.all.len())
    }

    pub fn sector_start_angle(&self, index: usize) -> Degrees {
        geometry::sector_start_angle(index, self.options.all.len())
    }

    /// Offset of option `index`'s anchor from the dial center.
    pub fn option_anchor(&self, index: usize) -> Point {
        let angle = geometry::placement_angle(index, self.options.all.len());
        let radius = geometry::anchor_radius(self.config.radius(), self.config.cutoff_fraction);
        Point::from_polar(radius, angle)
    }

    /// Places the dial inside a container of size `bounds`. Transient dials
    /// appear centered horizontally above the touch point.
    pub fn layout(&self, bounds: Point) -> DialLayout {
        let size = self.config.diameter;
        let radius = self.config.radius();
        let aligned = self.config.alignment().align(size, bounds);
        let origin = if self.config.persistent {
            aligned
        } else {
            aligned + self.container_offset - Point::new(size / 2.0, size)
        };
        DialLayout {
            origin,
            center: origin + Point::new(radius, radius),
            radius,
        }
    }

    pub fn on_down(&mut self, position: Point) {
        if self.returning.take().is_some() {
            log::debug!("Gesture started during return animation, settling indicator");
            self.indicator_offset = Point::ORIGIN;
        }
        self.phase = Phase::Dragging;
        self.container_offset = position;
        log::trace!("Dial down at ({}, {})", position.x, position.y);
    }

    pub fn on_drag(&mut self, delta: Point) {
        if self.phase != Phase::Dragging {
            log::debug!("Ignoring drag outside of a gesture");
            return;
        }
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            log::debug!("Ignoring non-finite drag ({}, {})", delta.x, delta.y);
            return;
        }
        self.indicator_offset = (self.indicator_offset + delta).clamp_to(self.config.radius());
    }

    pub fn on_release(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }

        if let Some(index) = self.selected_index() {
            (self.on_selected)(&self.options.all[index]);
        }
        self.phase = Phase::Idle;

        let duration = self.config.return_duration();
        if duration.is_zero() {
            self.indicator_offset = Point::ORIGIN;
        } else {
            self.returning = Some(ReturnToOrigin::new(self.indicator_offset, duration));
        }
    }

    /// Advances the return animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(anim) = self.returning.as_mut() {
            self.indicator_offset = anim.advance(dt);
            if anim.is_finished() {
                self.returning = None;
            }
        }
    }

    /// Replaces the options and their enabled subset in one step. The gesture
    /// carries on; the selection re-derives from the current offset.
    pub fn update_options(&mut self, options: Vec<T>, enabled: Vec<T>) -> Result<(), DialError> {
        self.options = OptionSet::new(options, enabled)?;
        Ok(())
    }

    /// Swaps the configuration, pulling the indicator back inside the new
    /// radius if it shrank.
    pub fn replace_config(&mut self, config: DialConfig) -> Result<(), DialError> {
        config.validate()?;
        self.indicator_offset = self.indicator_offset.clamp_to(config.radius());
        self.config = config;
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for DialControl<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialControl")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("phase", &self.phase)
            .field("container_offset", &self.container_offset)
            .field("indicator_offset", &self.indicator_offset)
            .field("returning", &self.returning)
            .finish_non_exhaustive()
    }
}
