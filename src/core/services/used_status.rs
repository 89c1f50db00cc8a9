//! Recomputes the derived "used" flags on categories and marker themes.

use crate::domain::{colors_match, Budget, Category, FinanceData, MarkerTheme, Pot};

/// Marks categories and marker themes claimed by `budgets`.
///
/// Categories match on exact name, marker themes on case-insensitive color
/// code. Order and length of both lists are preserved and `used_in_pots` is
/// carried through untouched.
pub fn reconcile(
    budgets: &[Budget],
    categories: &[Category],
    markers: &[MarkerTheme],
) -> (Vec<Category>, Vec<MarkerTheme>) {
    let categories = categories
        .iter()
        .map(|category| Category {
            used_in_budgets: budgets
                .iter()
                .any(|budget| budget.category == category.name),
            ..category.clone()
        })
        .collect();
    let markers = markers
        .iter()
        .map(|marker| MarkerTheme {
            used_in_budgets: budgets
                .iter()
                .any(|budget| colors_match(&budget.theme, &marker.color_code)),
            ..marker.clone()
        })
        .collect();
    (categories, markers)
}

/// Marks marker themes claimed by `pots`, leaving `used_in_budgets` untouched.
pub fn reconcile_pots(pots: &[Pot], markers: &[MarkerTheme]) -> Vec<MarkerTheme> {
    markers
        .iter()
        .map(|marker| MarkerTheme {
            used_in_pots: pots
                .iter()
                .any(|pot| colors_match(&pot.theme, &marker.color_code)),
            ..marker.clone()
        })
        .collect()
}

/// Runs both passes over a snapshot and returns the reconciled copy.
pub fn reconcile_snapshot(data: &FinanceData) -> FinanceData {
    let (categories, markers) = reconcile(&data.budgets, &data.categories, &data.marker_themes);
    let marker_themes = reconcile_pots(&data.pots, &markers);
    tracing::debug!(
        budgets = data.budgets.len(),
        pots = data.pots.len(),
        "used status reconciled"
    );
    FinanceData {
        categories,
        marker_themes,
        ..data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| Category::new(idx as u32, *name))
            .collect()
    }

    #[test]
    fn scenario_marks_only_budgeted_categories() {
        let budgets = vec![Budget::new("Groceries", 200.0, "#277C78")];
        let (categories, _) = reconcile(&budgets, &categories(&["Groceries", "Dining"]), &[]);

        assert!(categories[0].used_in_budgets);
        assert!(!categories[1].used_in_budgets);
    }

    #[test]
    fn color_match_is_case_insensitive() {
        let budgets = vec![Budget::new("Bills", 750.0, "#ABCDEF")];
        let markers = vec![
            MarkerTheme::new("Custom", "#abcdef"),
            MarkerTheme::new("Green", "#277C78"),
        ];
        let (_, markers) = reconcile(&budgets, &[], &markers);

        assert!(markers[0].used_in_budgets);
        assert!(!markers[1].used_in_budgets);
    }

    #[test]
    fn category_match_is_exact() {
        let budgets = vec![Budget::new("groceries", 50.0, "#277C78")];
        let (categories, _) = reconcile(&budgets, &categories(&["Groceries"]), &[]);
        assert!(!categories[0].used_in_budgets);
    }

    #[test]
    fn stale_flags_are_cleared() {
        let mut stale = categories(&["Bills"]);
        stale[0].used_in_budgets = true;
        let mut marker = MarkerTheme::new("Green", "#277C78");
        marker.used_in_budgets = true;
        marker.used_in_pots = true;

        let (categories, markers) = reconcile(&[], &stale, &[marker]);
        assert!(!categories[0].used_in_budgets);
        assert!(!markers[0].used_in_budgets);
        assert!(markers[0].used_in_pots, "pot flag belongs to the pot pass");
    }

    #[test]
    fn reconcile_is_idempotent_and_order_preserving() {
        let budgets = vec![
            Budget::new("Entertainment", 50.0, "#277C78"),
            Budget::new("Bills", 750.0, "#82c9d7"),
        ];
        let cats = categories(&["Bills", "Dining Out", "Entertainment"]);
        let markers = crate::domain::marker::default_marker_themes();

        let (first_cats, first_markers) = reconcile(&budgets, &cats, &markers);
        let (second_cats, second_markers) = reconcile(&budgets, &first_cats, &first_markers);

        assert_eq!(first_cats, second_cats);
        assert_eq!(first_markers, second_markers);
        assert_eq!(first_cats.len(), cats.len());
        assert_eq!(first_markers.len(), markers.len());
        let names: Vec<_> = first_cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Bills", "Dining Out", "Entertainment"]);
        assert_eq!(first_markers.iter().filter(|m| m.used_in_budgets).count(), 2);
    }

    #[test]
    fn pot_pass_sets_only_pot_flag() {
        let pots = vec![Pot::new("Savings", 2000.0, "#277c78")];
        let mut marker = MarkerTheme::new("Green", "#277C78");
        marker.used_in_budgets = true;

        let markers = reconcile_pots(&pots, &[marker, MarkerTheme::new("Red", "#C94736")]);
        assert!(markers[0].used_in_pots);
        assert!(markers[0].used_in_budgets);
        assert!(!markers[1].used_in_pots);
    }

    #[test]
    fn snapshot_pass_combines_both() {
        let mut data = FinanceData::default();
        data.budgets.push(Budget::new("Bills", 750.0, "#277C78"));
        data.pots.push(Pot::new("Holiday", 1000.0, "#277C78"));

        let reconciled = reconcile_snapshot(&data);
        let green = reconciled.marker("#277C78").unwrap();
        assert!(green.used_in_budgets && green.used_in_pots);
        assert!(reconciled.category_named("Bills").unwrap().used_in_budgets);
        assert_eq!(reconciled.budgets, data.budgets);
    }
}
