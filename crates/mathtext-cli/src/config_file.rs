use std::{fs, io, path::Path};

use mathtext::MathTextConfig;
use mathtext::renderer::color::RGB;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    #[serde(flatten)]
    pub mathtext: MathTextConfig,
    /// Background fill of SVG output.
    pub background: Option<RGB>,
}

#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "TOML parsing error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Read a TOML configuration file. Missing keys keep their default values.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    log::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

#[inline]
fn parse_config(s: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use mathtext::renderer::params::FontEncoding;

    use super::*;

    #[test]
    fn full_config() {
        let toml_content = r##"
font-size = 14.0
font-color = "#ff0000"
initial-math-mode = true
encoding = "symbol-font"
background = "#ffffff"

[params]
frac-gap-factor = 0.5

[fonts.sans]
text = "Helvetica"
math = "Helvetica Oblique"
        "##;
        let config = parse_config(toml_content).unwrap();
        let mathtext = &config.mathtext;
        assert_eq!(mathtext.font_size, 14.0);
        assert_eq!(mathtext.font_color, RGB::new(255, 0, 0));
        assert!(mathtext.initial_math_mode);
        assert_eq!(mathtext.encoding, FontEncoding::SymbolFont);
        assert_eq!(mathtext.params.frac_gap_factor, 0.5);
        assert_eq!(mathtext.fonts.sans.text, "Helvetica");
        assert_eq!(config.background, Some(RGB::WHITE));
    }

    #[test]
    fn invalid_config() {
        let result = parse_config("invalid_toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn partial_config() {
        let config = parse_config("font-size = 12.0").unwrap();
        let defaults = MathTextConfig::default();
        assert_eq!(config.mathtext.font_size, 12.0);
        assert_eq!(config.mathtext.params, defaults.params);
        assert_eq!(config.mathtext.fonts, defaults.fonts);
        assert!(config.background.is_none());
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let result = parse_config(r#"font-color = "not a color""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
