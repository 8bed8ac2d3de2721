use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Seed categories, in order. The first one is the fallback for blank input.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Werk", "Persoonlijk", "Vrije tijd"];

/// Colours assigned to the seed categories when none is stored
pub const DEFAULT_COLORS: [(&str, &str); 3] = [
    ("Werk", "blue"),
    ("Vrije tijd", "green"),
    ("Persoonlijk", "magenta"),
];

/// Swatches offered when creating a category
pub const PALETTE: [&str; 8] = [
    "blue", "green", "magenta", "red", "yellow", "cyan", "lightblue", "gray",
];

/// Name used when a task has no usable category
pub fn default_category() -> &'static str {
    DEFAULT_CATEGORIES[0]
}

/// Seed category list as owned strings
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Trim a user-supplied category name, falling back to the default for blanks
pub fn resolve_category(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        default_category().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Display ordering: case-insensitive first, exact as tie-breaker
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Which categories are currently shown
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CategoryFilter {
    /// The "show all" sentinel
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Build a filter from user input; blank means show all
    pub fn from_input(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::All
        } else {
            Self::Category(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Category name if the filter targets one
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Category(name) => Some(name),
        }
    }

    /// Whether this filter points at `name`
    pub fn targets(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    /// Tab / header label
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All categories",
            Self::Category(name) => name,
        }
    }
}
