use crate::app::profile::{default_profiles, Profile};
use crate::configuration::constants::common::{ENV_PREFIX, ENV_SEPARATOR, SETTINGS_FILE_STEM};
use config::{Config, ConfigError, Environment, File};
use derivative::*;
use serde_derive::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub policy: Policy,
    #[derivative(Default(value = "default_profiles()"))]
    pub profiles: Vec<Profile>,
    /// FIGlet `.flf` font for the header title, e.g. ANSI Shadow.
    pub title_font: Option<PathBuf>,
}

/// How the external execution engine is launched.
#[derive(Debug, Clone, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct EngineSettings {
    #[derivative(Default(value = "\"node\".to_owned()"))]
    pub command: String,
    #[derivative(Default(value = "vec![\"scripts/cypress-bridge.js\".to_owned()]"))]
    pub args: Vec<String>,
    #[derivative(Default(value = "\"electron\".to_owned()"))]
    pub browser: String,
    #[derivative(Default(value = "true"))]
    pub headless: bool,
    #[derivative(Default(value = "\"cypress/e2e/**/*\".to_owned()"))]
    pub spec_pattern: String,
}

/// Scoring constants. The defaults are the product thresholds the report has
/// always used; deployments may tune them.
#[derive(Debug, Clone, PartialEq, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Policy {
    /// Stability points lost per failed test.
    #[derivative(Default(value = "15"))]
    pub stability_penalty: u64,
    /// Risk is high when more tests than this fail.
    #[derivative(Default(value = "2"))]
    pub high_risk_failures: u64,
    /// Risk is high when the quality score drops below this.
    #[derivative(Default(value = "70"))]
    pub high_risk_quality: u64,
    /// Display-only gate, never affects the verdict.
    #[derivative(Default(value = "85"))]
    pub quality_gate: u64,
    #[derivative(Default(value = "5000.0"))]
    pub slow_test_ms: f64,
}

impl Settings {
    /// Loads settings from `file` (or an optional `runner-cogu.*` in the
    /// working directory) and applies `COGU_*` environment overrides.
    pub fn load(file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        match file {
            Some(path) => config.merge(File::from(path))?,
            None => config.merge(File::with_name(SETTINGS_FILE_STEM).required(false))?,
        };
        config.merge(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))?;

        config.try_into()
    }
}

impl EngineSettings {
    /// Full argument list handed to the engine command.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("--browser".to_owned());
        args.push(self.browser.clone());
        args.push("--spec".to_owned());
        args.push(self.spec_pattern.clone());
        if !self.headless {
            args.push("--headed".to_owned());
        }
        args
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_policy_matches_product_thresholds() {
        let policy = Policy::default();

        assert_eq!(policy.stability_penalty, 15);
        assert_eq!(policy.high_risk_failures, 2);
        assert_eq!(policy.high_risk_quality, 70);
        assert_eq!(policy.quality_gate, 85);
        assert_eq!(policy.slow_test_ms, 5000.0);
    }

    #[test]
    fn test_default_settings_carry_builtin_profiles() {
        let settings = Settings::default();

        assert_eq!(settings.profiles.len(), 4);
        assert_eq!(settings.profiles[0].name, "Champignon");
        assert_eq!(settings.engine.command, "node");
        assert!(settings.engine.headless);
        assert_eq!(settings.title_font, None);
    }

    #[test]
    fn test_load_partial_toml_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r##"
title_font = "fonts/ANSI Shadow.flf"

[policy]
stability_penalty = 20
quality_gate = 90

[engine]
browser = "chrome"
headless = false

[[profiles]]
name = "Enoki"
role = "QA Lead"
access = "Admin"
theme_primary = "#FFFFFF"
theme_secondary = "#000000"
"##
        )
        .unwrap();

        let settings = Settings::load(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(settings.policy.stability_penalty, 20);
        assert_eq!(settings.policy.quality_gate, 90);
        assert_eq!(settings.policy.high_risk_quality, 70);
        assert_eq!(settings.engine.browser, "chrome");
        assert_eq!(settings.engine.command, "node");
        assert_eq!(settings.profiles.len(), 1);
        assert_eq!(settings.profiles[0].name, "Enoki");
        assert_eq!(
            settings.title_font,
            Some(PathBuf::from("fonts/ANSI Shadow.flf"))
        );
    }

    #[test]
    fn test_engine_command_args() {
        let mut engine = EngineSettings::default();
        assert_eq!(
            engine.command_args(),
            vec![
                "scripts/cypress-bridge.js",
                "--browser",
                "electron",
                "--spec",
                "cypress/e2e/**/*"
            ]
        );

        engine.headless = false;
        assert_eq!(engine.command_args().last().map(String::as_str), Some("--headed"));
    }
}
