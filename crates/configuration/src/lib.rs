//! # Meridian Configuration
//!
//! Loads the strongly-typed application settings: preset portfolios,
//! benchmark proxies, horizon definitions, and market-data tuning. The
//! compiled-in defaults are a complete configuration on their own; a
//! `config.toml` next to the binary overrides them field by field.

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    BacktestSettings, Benchmark, Holding, Horizon, MarketDataSettings, Preset, Settings,
};

/// Loads the application configuration, layering `config.toml` (if present)
/// over the compiled-in defaults.
///
/// This function is the primary entry point for this crate. A missing file
/// is not an error; a malformed one, or one whose default preset points at
/// a preset that does not exist, is.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // Seed the builder with the defaults so a partial file is enough.
        .add_source(config::Config::try_from(&Settings::default())?)
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if !settings
        .presets
        .contains_key(&settings.backtest.default_preset)
    {
        return Err(ConfigError::ValidationError(format!(
            "default preset '{}' is not defined",
            settings.backtest.default_preset
        )));
    }
    for (code, preset) in &settings.presets {
        if preset.holdings.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "preset '{code}' has no holdings"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_pass_validation() {
        let settings = Settings::default();
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn default_preset_exists_and_resolves() {
        let settings = Settings::default();
        let preset = settings.preset_or_default("semi").unwrap();
        assert_eq!(preset.label, "Semiconductors");
        assert_eq!(preset.holdings[0].symbol, "smh.us");
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        let settings = Settings::default();
        let preset = settings.preset_or_default("does-not-exist").unwrap();
        assert_eq!(preset.label, "Semiconductors");
    }

    #[test]
    fn missing_default_preset_fails_validation() {
        let mut settings = Settings::default();
        settings.backtest.default_preset = "ghost".to_string();
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn horizons_cover_five_ten_fifteen_years() {
        let settings = Settings::default();
        let days: Vec<usize> = settings.backtest.horizons.iter().map(|h| h.days).collect();
        assert_eq!(days, vec![1260, 2520, 3780]);
    }
}
