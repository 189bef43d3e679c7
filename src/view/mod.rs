pub mod filters;

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::{Catalog, Pokemon};

use filters::ViewFilters;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    NameAsc,
    NameDesc,
    LevelAsc,
    LevelDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::LevelAsc,
        SortOrder::LevelDesc,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('_', "-").as_str() {
            "name-asc" | "nom-asc" => Some(Self::NameAsc),
            "name-desc" | "nom-desc" => Some(Self::NameDesc),
            "level-asc" | "niveau-asc" => Some(Self::LevelAsc),
            "level-desc" | "niveau-desc" => Some(Self::LevelDesc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::LevelAsc => "level-asc",
            Self::LevelDesc => "level-desc",
        }
    }

    pub fn compare(&self, a: &Pokemon, b: &Pokemon) -> Ordering {
        match self {
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::LevelAsc => compare_levels(a.level, b.level),
            Self::LevelDesc => compare_levels(b.level, a.level),
        }
    }
}

/// Current value of the three controls, read fresh for every pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub type_filter: String,
    pub sort: String,
}

impl ViewQuery {
    pub fn new(search: &str, type_filter: &str, sort: &str) -> Self {
        Self {
            search: search.to_string(),
            type_filter: type_filter.to_string(),
            sort: sort.to_string(),
        }
    }

    /// `None` when the sort value is blank or unknown; the view keeps
    /// catalog order in that case.
    pub fn sort_order(&self) -> Option<SortOrder> {
        SortOrder::parse(&self.sort)
    }

    /// The raw sort value when it is non-blank but matches no known order.
    pub fn unrecognized_sort(&self) -> Option<&str> {
        let raw = self.sort.trim();
        if raw.is_empty() || self.sort_order().is_some() {
            return None;
        }
        Some(raw)
    }
}

pub fn compute_view<'a>(catalog: &'a Catalog, query: &ViewQuery) -> Vec<&'a Pokemon> {
    let filters = ViewFilters::from_query(query);
    let mut view: Vec<&Pokemon> = catalog
        .entries()
        .iter()
        .filter(|p| filters.matches_name(p))
        .filter(|p| filters.matches_type(p))
        .collect();

    if let Some(order) = query.sort_order() {
        // sort_by is stable, ties keep catalog order
        view.sort_by(|a, b| order.compare(a, b));
    }
    view
}

/// Accent- and case-insensitive primary key, so `Évoli` sorts with the E's.
pub fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn compare_levels(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
