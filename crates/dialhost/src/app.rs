use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::region::DialRegion;
use crate::sys::launch::{self, ExecCommand};
use async_channel::Receiver;
use dialkit::{DialConfig, DialControl, DialError, HapticFeedback, Phase, SelectionPulse};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const FRAME: Duration = Duration::from_millis(16);

pub struct LogHaptics;

impl HapticFeedback for LogHaptics {
    fn perform(&mut self) {
        log::debug!("Haptic pulse");
    }
}

pub struct AppModel {
    pub control: DialControl<DialRegion>,
    pulse: SelectionPulse<DialRegion>,
    haptics: Box<dyn HapticFeedback>,
    commands: HashMap<DialRegion, ExecCommand>,
    /// Filled by the release callback, drained right after `on_release`.
    selected: Rc<RefCell<Vec<DialRegion>>>,
    last_selection: Option<DialRegion>,
    selection_count: u64,
    /// Reloaded dial settings waiting for the current gesture to end.
    pending_dial: Option<DialConfig>,
}

impl AppModel {
    pub fn new(config: &Config, haptics: Box<dyn HapticFeedback>) -> Result<Self, DialError> {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (regions, enabled) = config.regions();
        let control = DialControl::with_enabled(regions, enabled, config.dial.clone(), {
            let selected = selected.clone();
            move |region: &DialRegion| selected.borrow_mut().push(*region)
        })?;

        Ok(Self {
            control,
            pulse: SelectionPulse::new(),
            haptics,
            commands: config.commands(),
            selected,
            last_selection: None,
            selection_count: 0,
            pending_dial: None,
        })
    }

    pub fn last_selection(&self) -> Option<DialRegion> {
        self.last_selection
    }

    pub fn selection_count(&self) -> u64 {
        self.selection_count
    }

    pub fn pending_dial(&self) -> Option<&DialConfig> {
        self.pending_dial.as_ref()
    }

    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Down(position) => self.control.on_down(position),
            AppEvent::Drag(delta) => self.control.on_drag(delta),
            AppEvent::Release => self.release(),
            AppEvent::Enable(region) => self.set_enabled(region, true),
            AppEvent::Disable(region) => self.set_enabled(region, false),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => match self.apply_config(&new_config) {
                    Ok(()) => log::info!("Configuration reloaded"),
                    Err(e) => log::error!("Rejected reloaded config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.observe_selection();
    }

    fn release(&mut self) {
        self.control.on_release();

        let picked: Vec<DialRegion> = self.selected.borrow_mut().drain(..).collect();
        for region in picked {
            self.last_selection = Some(region);
            self.selection_count += 1;
            self.launch(region);
        }

        if let Some(dial) = self.pending_dial.take()
            && let Err(e) = self.control.replace_config(dial)
        {
            log::error!("Failed to apply deferred dial config: {}", e);
        }
    }

    /// Advances the indicator's return animation by one frame.
    pub fn frame(&mut self) {
        self.control.tick(FRAME);
        self.observe_selection();
    }

    fn observe_selection(&mut self) {
        let current = self.control.selected_option();
        if self.control.config().haptics {
            self.pulse.feed(current, self.haptics.as_mut());
        } else {
            self.pulse.observe(current);
        }
    }

    fn set_enabled(&mut self, region: DialRegion, enabled: bool) {
        let options = self.control.options().to_vec();
        if !options.contains(&region) {
            log::warn!("Region '{}' is not on the dial", region);
            return;
        }

        let mut enabled_options: Vec<DialRegion> = self
            .control
            .enabled_options()
            .iter()
            .copied()
            .filter(|r| *r != region)
            .collect();
        if enabled {
            enabled_options.push(region);
        }

        if let Err(e) = self.control.update_options(options, enabled_options) {
            log::error!("Failed to update options: {}", e);
        }
    }

    /// Applies a reloaded config. Options and commands switch immediately;
    /// the dial settings wait until the dial is idle. Nothing changes if the
    /// config is invalid.
    pub fn apply_config(&mut self, config: &Config) -> Result<(), DialError> {
        config.dial.validate()?;
        let (regions, enabled) = config.regions();
        self.control.update_options(regions, enabled)?;
        self.commands = config.commands();

        if self.control.phase() == Phase::Dragging {
            log::debug!("Deferring dial config until the gesture ends");
            self.pending_dial = Some(config.dial.clone());
        } else {
            self.pending_dial = None;
            self.control.replace_config(config.dial.clone())?;
        }
        Ok(())
    }

    fn launch(&self, region: DialRegion) {
        log::info!("Selected '{}'", region);
        if let Some(exec) = self.commands.get(&region)
            && let Err(e) = launch::spawn(exec)
        {
            log::error!("Failed to run '{}' for '{}': {}", exec, region, e);
        }
    }

    pub async fn run(mut self, rx: Receiver<AppEvent>) {
        let mut frames = tokio::time::interval(FRAME);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Ok(event) => self.update(event),
                    Err(_) => break,
                },
                _ = frames.tick(), if self.control.is_animating() => self.frame(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionConfig;
    use dialkit::Point;
    use std::cell::Cell;

    struct CountingHaptics(Rc<Cell<usize>>);

    impl HapticFeedback for CountingHaptics {
        fn perform(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn model(config: &Config) -> (AppModel, Rc<Cell<usize>>) {
        let pulses = Rc::new(Cell::new(0));
        let model = AppModel::new(config, Box::new(CountingHaptics(pulses.clone()))).unwrap();
        (model, pulses)
    }

    #[test]
    fn test_gesture_selects_and_pulses() {
        let (mut app, pulses) = model(&Config::default());

        app.update(AppEvent::Down(Point::new(200.0, 200.0)));
        app.update(AppEvent::Drag(Point::new(0.0, -30.0)));
        assert_eq!(pulses.get(), 0);
        app.update(AppEvent::Drag(Point::new(0.0, -70.0)));
        assert_eq!(pulses.get(), 1);
        // sweep into the neighbouring sector
        app.update(AppEvent::Drag(Point::new(100.0, 60.0)));
        assert_eq!(app.control.selected_option(), Some(&DialRegion::TopRight));
        assert_eq!(pulses.get(), 2);

        app.update(AppEvent::Release);
        assert_eq!(app.last_selection(), Some(DialRegion::TopRight));
        assert_eq!(app.selection_count(), 1);
        assert!(!app.control.visible());
        // leaving the sector is silent
        assert_eq!(pulses.get(), 2);

        app.update(AppEvent::Release);
        assert_eq!(app.selection_count(), 1);
    }

    #[test]
    fn test_selection_survives_full_input_queue() {
        let (tx, rx) = async_channel::bounded(32);
        while tx.try_send(AppEvent::Drag(Point::new(1.0, 0.0))).is_ok() {}
        assert!(tx.is_full());

        let (mut app, _) = model(&Config::default());
        app.update(AppEvent::Down(Point::ORIGIN));
        app.update(AppEvent::Drag(Point::new(0.0, -100.0)));
        app.update(AppEvent::Release);
        assert_eq!(app.last_selection(), Some(DialRegion::Top));
        assert_eq!(app.selection_count(), 1);

        // the backlog is still delivered afterwards
        while let Ok(event) = rx.try_recv() {
            app.update(event);
        }
        assert_eq!(app.selection_count(), 1);
    }

    #[test]
    fn test_dead_zone_release_selects_nothing() {
        let (mut app, _) = model(&Config::default());
        app.update(AppEvent::Down(Point::ORIGIN));
        app.update(AppEvent::Drag(Point::new(0.0, -30.0)));
        app.update(AppEvent::Release);
        assert_eq!(app.last_selection(), None);
        assert_eq!(app.selection_count(), 0);
    }

    #[test]
    fn test_disable_and_enable_region() {
        let (mut app, pulses) = model(&Config::default());

        app.update(AppEvent::Disable(DialRegion::Top));
        assert!(!app.control.is_option_enabled(&DialRegion::Top));
        app.update(AppEvent::Down(Point::ORIGIN));
        app.update(AppEvent::Drag(Point::new(0.0, -100.0)));
        app.update(AppEvent::Release);
        assert_eq!(app.selection_count(), 0);
        assert_eq!(pulses.get(), 0);

        app.update(AppEvent::Enable(DialRegion::Top));
        app.update(AppEvent::Down(Point::ORIGIN));
        app.update(AppEvent::Drag(Point::new(0.0, -100.0)));
        app.update(AppEvent::Release);
        assert_eq!(app.last_selection(), Some(DialRegion::Top));
        assert_eq!(app.control.options().len(), 6);
    }

    #[test]
    fn test_haptics_can_be_turned_off() {
        let config = Config {
            dial: DialConfig {
                haptics: false,
                ..DialConfig::default()
            },
            ..Config::default()
        };
        let (mut app, pulses) = model(&config);
        app.update(AppEvent::Down(Point::ORIGIN));
        app.update(AppEvent::Drag(Point::new(0.0, -100.0)));
        app.update(AppEvent::Release);
        assert_eq!(pulses.get(), 0);
    }

    #[test]
    fn test_reload_mid_gesture_defers_dial_settings() {
        let (mut app, _) = model(&Config::default());
        app.update(AppEvent::Down(Point::ORIGIN));
        app.update(AppEvent::Drag(Point::new(0.0, 100.0)));
        assert_eq!(app.control.selected_option(), Some(&DialRegion::Bottom));

        let two = Config {
            dial: DialConfig {
                cutoff_fraction: 0.9,
                ..DialConfig::default()
            },
            options: vec![
                OptionConfig::new(DialRegion::Top),
                OptionConfig::new(DialRegion::Bottom),
            ],
        };
        app.apply_config(&two).unwrap();
        // options switch now, dial settings wait for the release
        assert!(app.control.visible());
        assert_eq!(app.control.options().len(), 2);
        assert_eq!(app.control.config().cutoff_fraction, 0.4);
        assert_eq!(app.control.selected_option(), Some(&DialRegion::Bottom));
        assert!(app.pending_dial().is_some());

        app.update(AppEvent::Release);
        assert_eq!(app.last_selection(), Some(DialRegion::Bottom));
        assert_eq!(app.control.config().cutoff_fraction, 0.9);
        assert!(app.pending_dial().is_none());
    }

    #[test]
    fn test_reload_while_idle_applies_immediately() {
        let (mut app, _) = model(&Config::default());
        let config = Config {
            dial: DialConfig {
                diameter: 300.0,
                ..DialConfig::default()
            },
            ..Config::default()
        };
        app.apply_config(&config).unwrap();
        assert_eq!(app.control.config().diameter, 300.0);
        assert!(app.pending_dial().is_none());
    }

    #[test]
    fn test_invalid_reload_changes_nothing() {
        let (mut app, _) = model(&Config::default());

        let empty = Config {
            dial: DialConfig::default(),
            options: Vec::new(),
        };
        assert_eq!(app.apply_config(&empty), Err(DialError::NoOptions));

        let bad_cutoff = Config {
            dial: DialConfig {
                cutoff_fraction: 2.0,
                ..DialConfig::default()
            },
            ..Config::default()
        };
        assert!(app.apply_config(&bad_cutoff).is_err());
        assert_eq!(app.control.options().len(), 6);
        assert_eq!(app.control.config().cutoff_fraction, 0.4);
    }

    #[test]
    fn test_frames_return_indicator() {
        let config = Config {
            dial: DialConfig {
                return_millis: 48,
                ..DialConfig::default()
            },
            ..Config::default()
        };
        let (mut app, _) = model(&config);
        app.update(AppEvent::Down(Point::ORIGIN));
        app.update(AppEvent::Drag(Point::new(0.0, -100.0)));
        app.update(AppEvent::Release);
        assert!(app.control.is_animating());

        for _ in 0..3 {
            app.frame();
        }
        assert!(!app.control.is_animating());
        assert_eq!(app.control.indicator_offset(), Point::ORIGIN);
    }
}
