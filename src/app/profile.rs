use crate::app::error::Error;
use crate::reporter::color::Rgb;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use serde_derive::Deserialize;

/// Operator running the tool. Only used for theming and the profile section
/// of the report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub access: String,
    #[serde(with = "crate::configuration::deserialize::hex_color")]
    pub theme_primary: Rgb,
    #[serde(with = "crate::configuration::deserialize::hex_color")]
    pub theme_secondary: Rgb,
}

impl Profile {
    fn builtin(name: &str, role: &str, access: &str, primary: Rgb, secondary: Rgb) -> Self {
        Self {
            name: name.to_owned(),
            role: role.to_owned(),
            access: access.to_owned(),
            theme_primary: primary,
            theme_secondary: secondary,
        }
    }
}

pub fn default_profiles() -> Vec<Profile> {
    vec![
        Profile::builtin(
            "Champignon",
            "Quality Analyst (QA)",
            "Maintainer",
            Rgb::new(0xD9, 0x46, 0xEF),
            Rgb::new(0x8B, 0x5C, 0xF6),
        ),
        Profile::builtin(
            "Shiitake",
            "Automation Engineer",
            "Maintainer",
            Rgb::new(0x3B, 0x82, 0xF6),
            Rgb::new(0x1E, 0x40, 0xAF),
        ),
        Profile::builtin(
            "Shimeji",
            "Test Manager",
            "Admin",
            Rgb::new(0x80, 0x0E, 0x0E),
            Rgb::new(0xFF, 0x00, 0x00),
        ),
        Profile::builtin(
            "Reishi",
            "QA Security",
            "Admin",
            Rgb::new(0x10, 0xB9, 0x81),
            Rgb::new(0x04, 0x78, 0x57),
        ),
    ]
}

/// How the operator profile gets chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Named(&'a str),
    Prompt,
    First,
}

pub fn select(profiles: &[Profile], selection: Selection<'_>) -> Result<Profile, Error> {
    let fallback;
    let profiles = if profiles.is_empty() {
        warn!("No profiles configured, using built-in profiles");
        fallback = default_profiles();
        &fallback[..]
    } else {
        profiles
    };
    let profile = match selection {
        Selection::Named(name) => profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Configuration(format!("Unknown profile '{}'", name)))?,
        Selection::First => &profiles[0],
        Selection::Prompt => {
            let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
            let index = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Identify yourself to start the session")
                .items(&names)
                .default(0)
                .interact()
                .map_err(|e| Error::Configuration(format!("Profile prompt failed: {}", e)))?;
            &profiles[index]
        }
    };
    info!("Loaded profile '{}' ({})", profile.name, profile.access);
    Ok(profile.clone())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_select_named_profile_ignores_case() {
        let profile = select(&default_profiles(), Selection::Named("reishi")).unwrap();
        assert_eq!(profile.name, "Reishi");
        assert_eq!(profile.theme_primary, Rgb::new(0x10, 0xB9, 0x81));
    }

    #[test]
    fn test_select_unknown_profile_fails() {
        let result = select(&default_profiles(), Selection::Named("Portobello"));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_select_first_profile() {
        let profile = select(&default_profiles(), Selection::First).unwrap();
        assert_eq!(profile.name, "Champignon");
    }

    #[test]
    fn test_empty_profile_list_falls_back_to_builtin() {
        let profile = select(&[], Selection::First).unwrap();
        assert_eq!(profile.name, "Champignon");
    }
}
