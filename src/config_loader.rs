use config::{Config, File};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::sync::RwLock;

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Sample rate assumed for synthesized PCM payloads. The rate is caller
    /// configuration, never derived from the byte stream itself.
    pub sample_rate: u32,
    pub enable_playback: bool,
    pub playback_volume: f32, // 0.0 - 1.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_rate: 24000,
            enable_playback: true,
            playback_volume: 1.0,
        }
    }
}

lazy_static! {
    pub static ref SETTINGS: RwLock<Settings> =
        RwLock::new(Settings::new().expect("Failed to load settings"));
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let builder = Config::builder()
            .set_default("sample_rate", 24000)?
            .set_default("enable_playback", true)?
            .set_default("playback_volume", 1.0)?
            // Merge with local config file (if exists)
            .add_source(File::with_name("Vozwav").required(false))
            .add_source(
                File::with_name(&format!(
                    "{}/.config/vozwav/Vozwav",
                    std::env::var("HOME").unwrap_or_default()
                ))
                .required(false),
            )
            // Merge with environment variables (e.g. VOZWAV_SAMPLE_RATE)
            .add_source(config::Environment::with_prefix("VOZWAV"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.sample_rate == 0 {
            return Err(config::ConfigError::Message(
                "sample_rate must be greater than 0".to_string(),
            ));
        }
        if self.playback_volume < 0.0 || self.playback_volume > 1.0 {
            return Err(config::ConfigError::Message(format!(
                "Invalid playback_volume: {}. Must be between 0.0 and 1.0",
                self.playback_volume
            )));
        }
        Ok(())
    }
}
