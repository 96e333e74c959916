use crate::events::AppEvent;
use crate::region::DialRegion;
use crate::sys::launch::ExecCommand;
use async_channel::Sender;
use dialkit::DialConfig;
use directories::ProjectDirs;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionConfig {
    pub region: DialRegion,
    #[serde(default)]
    pub exec: Option<ExecCommand>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl OptionConfig {
    pub fn new(region: DialRegion) -> Self {
        Self {
            region,
            exec: None,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dial: DialConfig,
    #[serde(default = "all_regions")]
    pub options: Vec<OptionConfig>,
}

fn all_regions() -> Vec<OptionConfig> {
    DialRegion::all().into_iter().map(OptionConfig::new).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dial: DialConfig::default(),
            options: all_regions(),
        }
    }
}

impl Config {
    /// Regions in dial order and the enabled subset. Repeated regions keep
    /// their first entry.
    pub fn regions(&self) -> (Vec<DialRegion>, Vec<DialRegion>) {
        let mut regions: Vec<DialRegion> = Vec::new();
        let mut enabled = Vec::new();

        for option in &self.options {
            if regions.contains(&option.region) {
                log::warn!("Region '{}' listed more than once, ignoring", option.region);
                continue;
            }
            regions.push(option.region);
            if option.enabled {
                enabled.push(option.region);
            }
        }
        (regions, enabled)
    }

    pub fn commands(&self) -> HashMap<DialRegion, ExecCommand> {
        let mut commands = HashMap::new();
        for option in &self.options {
            if let Some(exec) = &option.exec {
                commands.entry(option.region).or_insert_with(|| exec.clone());
            }
        }
        commands
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "dialkit", "dialhost").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("DIAL").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        let mut changed = match res {
            Ok(event) => is_config_change(&event, &config_path),
            Err(e) => {
                log::error!("Watch error: {}", e);
                false
            }
        };
        // an editor save arrives as several events; reload once per burst
        while let Ok(res) = bridge_rx.try_recv() {
            changed |= res.is_ok_and(|event| is_config_change(&event, &config_path));
        }

        if changed && tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}

/// Whether a watcher event touched the config file's content.
fn is_config_change(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.dial, DialConfig::default());
        let (regions, enabled) = config.regions();
        assert_eq!(regions, DialRegion::all());
        assert_eq!(enabled, DialRegion::all());
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let config = parse_config("").unwrap();
        assert_eq!(config.options.len(), 6);
        assert!(config.dial.validate().is_ok());
    }

    #[test]
    fn test_disabled_and_duplicate_options() {
        let config = parse_config(
            r#"
            [dial]
            cutoff_fraction = 0.25

            [[options]]
            region = "up"
            exec = "echo top"

            [[options]]
            region = "Bottom"
            enabled = false

            [[options]]
            region = "top"
            exec = "echo again"
            "#,
        )
        .unwrap();

        assert_eq!(config.dial.cutoff_fraction, 0.25);
        let (regions, enabled) = config.regions();
        assert_eq!(regions, vec![DialRegion::Top, DialRegion::Bottom]);
        assert_eq!(enabled, vec![DialRegion::Top]);

        let commands = config.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[&DialRegion::Top].as_str(), "echo top");
    }

    #[test]
    fn test_option_deserialization() {
        let option: OptionConfig =
            serde_json::from_str(r#"{ "region": "tl", "exec": "firefox" }"#).unwrap();
        assert_eq!(option.region, DialRegion::TopLeft);
        assert!(option.enabled);
        assert_eq!(option.exec, Some(ExecCommand::new("firefox")));
    }

    #[test]
    fn test_watcher_reacts_only_to_the_config_file() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let dir = PathBuf::from("/home/user/.config/dialhost");
        let config_path = dir.join("config.toml");

        let modified = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(config_path.clone());
        assert!(is_config_change(&modified, &config_path));
        let created = Event::new(EventKind::Create(CreateKind::File)).add_path(config_path.clone());
        assert!(is_config_change(&created, &config_path));

        let sibling = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(dir.join("config.toml~"));
        assert!(!is_config_change(&sibling, &config_path));
        let read = Event::new(EventKind::Access(AccessKind::Any)).add_path(config_path.clone());
        assert!(!is_config_change(&read, &config_path));
    }
}
