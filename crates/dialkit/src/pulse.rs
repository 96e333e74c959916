/// Sink for the short tactile pulse fired when the selection lands on a new option.
pub trait HapticFeedback {
    fn perform(&mut self);
}

/// Watches successive selection values and reports when a pulse is due.
///
/// The first observed value is the baseline and never pulses. After that, a
/// pulse is due whenever the value changes to a different option; moving into
/// the dead zone or onto a disabled sector (`None`) is silent.
#[derive(Debug, Clone)]
pub struct SelectionPulse<T> {
    previous: Option<Option<T>>,
}

impl<T> Default for SelectionPulse<T> {
    fn default() -> Self {
        Self { previous: None }
    }
}

impl<T: PartialEq + Clone> SelectionPulse<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, current: Option<&T>) -> bool {
        let fire = match &self.previous {
            Some(previous) => current.is_some() && previous.as_ref() != current,
            None => false,
        };
        self.previous = Some(current.cloned());
        fire
    }

    /// Observes `current` and performs a pulse on `haptics` when one is due.
    pub fn feed(&mut self, current: Option<&T>, haptics: &mut dyn HapticFeedback) -> bool {
        let fire = self.observe(current);
        if fire {
            haptics.perform();
        }
        fire
    }
}
