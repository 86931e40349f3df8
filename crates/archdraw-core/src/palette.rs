//! Named color categories.
//!
//! A [`Palette`] maps semantic category names (`"user"`, `"worker"`, `"edge"`,
//! ...) to colors. Scene composers look colors up by category instead of
//! embedding literals, which keeps the visual contract in one place and lets
//! configuration override individual entries.

use indexmap::IndexMap;
use log::debug;

use crate::{color::Color, error::PaletteError};

/// Colors of the architecture diagram, in declaration order.
///
/// The first nine entries are the fill and edge categories; the rest are
/// text and accent colors used by individual labels.
pub const ARCHITECTURE_COLORS: &[(&str, &str)] = &[
    ("user", "#E3F2FD"),
    ("cf_bg", "#FAFAFA"),
    ("routing", "#E1F5FE"),
    ("static", "#F1F8E9"),
    ("worker", "#FFF3E0"),
    ("do", "#F3E5F5"),
    ("db", "#E0F2F1"),
    ("build", "#ECEFF1"),
    ("edge", "#455A64"),
    ("text", "#000000"),
    ("subtext", "#5D4037"),
    ("user_text", "#37474F"),
    ("caption", "#78909C"),
    ("platform_border", "#B0BEC5"),
    ("build_arrow", "#CFD8DC"),
    ("build_label", "#546E7A"),
    ("static_text", "#33691E"),
    ("worker_text", "#E65100"),
    ("worker_logic", "#FFE0B2"),
    ("worker_module", "#FFCCBC"),
    ("do_text", "#4A148C"),
    ("db_text", "#00695C"),
];

/// An ordered mapping from category name to [`Color`].
///
/// # Examples
///
/// ```
/// # use archdraw_core::palette::Palette;
/// let palette = Palette::architecture();
/// assert_eq!(palette.get("worker").unwrap().to_string(), "#fff3e0");
///
/// let palette = palette.with_override("worker", "orange").unwrap();
/// assert_eq!(palette.get("worker").unwrap().to_string(), "#ffa500");
///
/// assert!(palette.get("nope").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: IndexMap<String, Color>,
}

impl Palette {
    /// Creates an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// The palette of the architecture diagram
    pub fn architecture() -> Self {
        Self::from_entries(ARCHITECTURE_COLORS.iter().copied())
            .expect("architecture palette colors are valid CSS colors")
    }

    /// Builds a palette from `(category, css color)` pairs.
    ///
    /// Later entries replace earlier ones with the same category while
    /// keeping the original position.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, PaletteError> {
        let mut palette = Self::new();
        for (category, css) in entries {
            palette.insert(category, css)?;
        }
        Ok(palette)
    }

    /// Parses `css` and stores it under `category`.
    pub fn insert(&mut self, category: &str, css: &str) -> Result<(), PaletteError> {
        let color = Color::new(css).map_err(|reason| PaletteError::InvalidColor {
            category: category.to_string(),
            reason,
        })?;
        self.colors.insert(category.to_string(), color);
        Ok(())
    }

    /// Returns a copy of the palette with `category` set to `css`.
    pub fn with_override(mut self, category: &str, css: &str) -> Result<Self, PaletteError> {
        debug!(category = category, color = css; "Overriding palette color");
        self.insert(category, css)?;
        Ok(self)
    }

    /// Looks up the color of `category`.
    pub fn get(&self, category: &str) -> Result<Color, PaletteError> {
        self.colors
            .get(category)
            .copied()
            .ok_or_else(|| PaletteError::UnknownCategory(category.to_string()))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over `(category, color)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(name, color)| (name.as_str(), *color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_palette_has_all_categories() {
        let palette = Palette::architecture();
        assert_eq!(palette.len(), ARCHITECTURE_COLORS.len());
        for (category, _) in ARCHITECTURE_COLORS {
            assert!(palette.contains(category), "missing {category}");
        }
    }

    #[test]
    fn test_architecture_palette_values() {
        let palette = Palette::architecture();
        assert_eq!(palette.get("user").unwrap().to_string(), "#e3f2fd");
        assert_eq!(palette.get("edge").unwrap().to_string(), "#455a64");
        assert_eq!(palette.get("db_text").unwrap().to_string(), "#00695c");
    }

    #[test]
    fn test_palette_preserves_order() {
        let palette = Palette::architecture();
        let names: Vec<&str> = palette.iter().map(|(name, _)| name).take(3).collect();
        assert_eq!(names, ["user", "cf_bg", "routing"]);
    }

    #[test]
    fn test_palette_override_keeps_position() {
        let palette = Palette::architecture()
            .with_override("user", "#ff0000")
            .unwrap();
        let (first, color) = palette.iter().next().unwrap();
        assert_eq!(first, "user");
        assert_eq!(color.to_string(), "#ff0000");
        assert_eq!(palette.len(), ARCHITECTURE_COLORS.len());
    }

    #[test]
    fn test_palette_unknown_category() {
        let palette = Palette::new();
        assert!(palette.is_empty());
        assert_eq!(
            palette.get("user"),
            Err(PaletteError::UnknownCategory("user".to_string()))
        );
    }

    #[test]
    fn test_palette_invalid_color() {
        let err = Palette::from_entries([("user", "definitely-not-a-color")]).unwrap_err();
        match err {
            PaletteError::InvalidColor { category, reason } => {
                assert_eq!(category, "user");
                assert!(reason.contains("definitely-not-a-color"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
