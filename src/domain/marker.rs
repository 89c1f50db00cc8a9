//! Marker themes: named color swatches assigned to budgets and pots.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarkerTheme {
    pub name: String,
    pub color_code: String,
    #[serde(default)]
    pub used_in_budgets: bool,
    #[serde(default)]
    pub used_in_pots: bool,
}

impl MarkerTheme {
    pub fn new(name: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_code: color_code.into(),
            used_in_budgets: false,
            used_in_pots: false,
        }
    }

    pub fn matches(&self, color: &str) -> bool {
        colors_match(&self.color_code, color)
    }
}

impl NamedEntity for MarkerTheme {
    fn name(&self) -> &str {
        &self.name
    }
}

const DEFAULT_PALETTE: [(&str, &str); 14] = [
    ("Green", "#277C78"),
    ("Yellow", "#F2CDAC"),
    ("Cyan", "#82C9D7"),
    ("Navy", "#626070"),
    ("Red", "#C94736"),
    ("Purple", "#826CB0"),
    ("Turquoise", "#597C7C"),
    ("Brown", "#93674F"),
    ("Magenta", "#934F6F"),
    ("Blue", "#3F82B2"),
    ("Navy Grey", "#97A0AC"),
    ("Army Green", "#7F9161"),
    ("Gold", "#CAB361"),
    ("Orange", "#BE6C49"),
];

static DEFAULT_MARKER_THEMES: Lazy<Vec<MarkerTheme>> = Lazy::new(|| {
    DEFAULT_PALETTE
        .iter()
        .map(|(name, color)| MarkerTheme::new(*name, *color))
        .collect()
});

/// Built-in palette used when a data document carries no marker themes.
pub fn default_marker_themes() -> Vec<MarkerTheme> {
    DEFAULT_MARKER_THEMES.clone()
}

/// Finds a marker theme by color code (case-insensitive) or by name.
pub fn find_marker<'a>(markers: &'a [MarkerTheme], key: &str) -> Option<&'a MarkerTheme> {
    markers
        .iter()
        .find(|marker| marker.matches(key))
        .or_else(|| markers.iter().find(|marker| names_match(&marker.name, key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_color_or_name() {
        let markers = default_marker_themes();
        assert_eq!(find_marker(&markers, "#277c78").unwrap().name, "Green");
        assert_eq!(
            find_marker(&markers, "navy grey").unwrap().color_code,
            "#97A0AC"
        );
        assert!(find_marker(&markers, "#000000").is_none());
    }
}
