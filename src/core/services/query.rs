//! Sorting and pagination shared by the transaction and bill listings.

use std::{cmp::Ordering, fmt, str::FromStr};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
    AToZ,
    ZToA,
    Highest,
    Lowest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::Latest,
        SortOrder::Oldest,
        SortOrder::AToZ,
        SortOrder::ZToA,
        SortOrder::Highest,
        SortOrder::Lowest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Latest => "latest",
            SortOrder::Oldest => "oldest",
            SortOrder::AToZ => "a-z",
            SortOrder::ZToA => "z-a",
            SortOrder::Highest => "highest",
            SortOrder::Lowest => "lowest",
        }
    }

    /// Orders two items given accessors for their date-like key, name and amount.
    pub(crate) fn compare<K: Ord>(
        self,
        (left_key, left_name, left_amount): (K, &str, f64),
        (right_key, right_name, right_amount): (K, &str, f64),
    ) -> Ordering {
        match self {
            SortOrder::Latest => right_key.cmp(&left_key),
            SortOrder::Oldest => left_key.cmp(&right_key),
            SortOrder::AToZ => compare_names(left_name, right_name),
            SortOrder::ZToA => compare_names(right_name, left_name),
            SortOrder::Highest => right_amount.total_cmp(&left_amount),
            SortOrder::Lowest => left_amount.total_cmp(&right_amount),
        }
    }
}

fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        SortOrder::ALL
            .into_iter()
            .find(|order| order.label() == normalized)
            .or(match normalized.as_str() {
                "atoz" | "a-to-z" => Some(SortOrder::AToZ),
                "ztoa" | "z-to-a" => Some(SortOrder::ZToA),
                _ => None,
            })
            .ok_or_else(|| {
                format!(
                    "unknown sort order `{}` (use latest, oldest, a-z, z-a, highest, lowest)",
                    value
                )
            })
    }
}

/// One page of a filtered listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices `items` into pages of `size` and returns page `page`, clamped into range.
pub fn paginate<T>(items: Vec<T>, page: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(size).max(1);
    let page = page.clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * size)
        .take(size)
        .collect();
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
pub fn matches_search(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_aliases() {
        assert_eq!("A to Z".parse::<SortOrder>(), Ok(SortOrder::AToZ));
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!("a-z".parse::<SortOrder>(), Ok(SortOrder::AToZ));
        assert_eq!("AtoZ".parse::<SortOrder>(), Ok(SortOrder::AToZ));
        assert_eq!("Highest".parse::<SortOrder>(), Ok(SortOrder::Highest));
    }

    #[test]
    fn pagination_clamps_page() {
        let page = paginate((1..=23).collect::<Vec<_>>(), 9, 10);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![21, 22, 23]);

        let first = paginate((1..=23).collect::<Vec<_>>(), 0, 10);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 10);
    }

    #[test]
    fn empty_listing_has_one_page() {
        let page = paginate(Vec::<u8>::new(), 1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        assert!(matches_search("Savory Bites Bistro", "bites"));
        assert!(matches_search("Anything", "  "));
        assert!(!matches_search("Anything", "zzz"));
    }
}
