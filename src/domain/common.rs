use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Entities that carry a marker color for visual identification.
pub trait Themed {
    fn theme(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Compares two marker color codes, ignoring ASCII case and surrounding whitespace.
pub fn colors_match(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}

/// Compares two entity names the way uniqueness checks expect: trimmed, case-insensitive.
pub fn names_match(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// First entity whose name matches `name` under [`names_match`].
pub fn find_named<'a, T: NamedEntity>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| names_match(item.name(), name))
}

/// Theme colors claimed by more than one entity, reported once per extra claim.
pub fn duplicate_themes<T: Themed>(items: &[T]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates = Vec::new();
    for item in items {
        let theme = item.theme();
        if seen.iter().any(|color| colors_match(color, theme)) {
            duplicates.push(theme);
        } else {
            seen.push(theme);
        }
    }
    duplicates
}
