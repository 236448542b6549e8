//! FIGlet title and the verdict art.

use crate::reporter::color::Rgb;
use figlet_rs::FIGfont;
use std::path::Path;

/// Per-line colors of the title, top to bottom. Lines past the end reuse the
/// last color.
pub const TITLE_GRADIENT: [Rgb; 8] = [
    Rgb::new(0xFF, 0x00, 0x80),
    Rgb::new(0xFF, 0x00, 0xCC),
    Rgb::new(0xCC, 0x00, 0xFF),
    Rgb::new(0x80, 0x00, 0x80),
    Rgb::new(0x4B, 0x00, 0x82),
    Rgb::new(0x00, 0x00, 0xFF),
    Rgb::new(0x00, 0x00, 0xCC),
    Rgb::new(0x00, 0x00, 0x80),
];

pub fn gradient_color(line: usize) -> Rgb {
    TITLE_GRADIENT[line.min(TITLE_GRADIENT.len() - 1)]
}

/// Renders `text` with the FIGlet font at `font`, or with the bundled
/// standard font when none is configured or it cannot be loaded.
pub fn title(text: &str, font: Option<&Path>) -> Vec<String> {
    let figfont = match font.map(load_font) {
        Some(Ok(figfont)) => Ok(figfont),
        Some(Err(e)) => {
            warn!("{}, using the standard font", e);
            FIGfont::standard()
        }
        None => FIGfont::standard(),
    };
    let figure = match figfont {
        Ok(figfont) => figfont.convert(text).map(|figure| figure.to_string()),
        Err(e) => {
            warn!("Cannot load the standard FIGlet font: {}", e);
            None
        }
    };
    match figure {
        Some(art) => art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect(),
        None => vec![text.to_owned()],
    }
}

fn load_font(path: &Path) -> Result<FIGfont, String> {
    let location = path
        .to_str()
        .ok_or_else(|| format!("Font path {} is not valid UTF-8", path.display()))?;
    FIGfont::from_file(location)
        .map_err(|e| format!("Cannot load FIGlet font {}: {}", path.display(), e))
}

pub const MUSHROOM_SUCCESS: &str = include_str!("art/mushroom-success.txt");

pub const MUSHROOM_FAILURE: &str = include_str!("art/mushroom-failure.txt");

/// Centers `text` in `width` columns, extra padding goes to the left.
pub fn pad_center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.chars().count());
    let left = (padding + 1) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(padding - left))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_title_uses_standard_font() {
        let lines = title("RUNNER-COGU", None);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| !line.trim().is_empty()));
        assert!(!lines.iter().any(|line| line.contains("RUNNER-COGU")));
    }

    #[test]
    fn test_title_missing_font_falls_back_to_standard() {
        let missing = Path::new("/nonexistent/ANSI Shadow.flf");
        assert_eq!(title("COGU", Some(missing)), title("COGU", None));
    }

    #[test]
    fn test_verdict_art_has_no_blank_edges() {
        for art in &[MUSHROOM_SUCCESS, MUSHROOM_FAILURE] {
            let lines: Vec<&str> = art.lines().collect();
            assert!(lines.len() > 30);
            assert!(lines.iter().all(|line| !line.trim().is_empty()));
        }
    }

    #[test]
    fn test_pad_center_puts_extra_space_left() {
        assert_eq!(pad_center("ab", 5), "  ab ");
        assert_eq!(pad_center("abc", 2), "abc");
    }

    #[test]
    fn test_gradient_saturates() {
        assert_eq!(gradient_color(0), Rgb::new(0xFF, 0x00, 0x80));
        assert_eq!(gradient_color(42), Rgb::new(0x00, 0x00, 0x80));
    }
}
