//! Search categories a request can be classified into.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of vehicle-related search a request represents.
///
/// The variant order mirrors the precedence of the built-in rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum SearchCategory {
    Rim,
    Wheel,
    Advice,
    Oil,
    SnowChain,
    Tyre,
}

impl SearchCategory {
    /// All categories in rule-table order.
    pub const ALL: [SearchCategory; 6] = [
        SearchCategory::Rim,
        SearchCategory::Wheel,
        SearchCategory::Advice,
        SearchCategory::Oil,
        SearchCategory::SnowChain,
        SearchCategory::Tyre,
    ];

    /// The name written to the `searchType` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::Rim => "RIM",
            SearchCategory::Wheel => "WHEEL",
            SearchCategory::Advice => "ADVICE",
            SearchCategory::Oil => "OIL",
            SearchCategory::SnowChain => "SNOWCHAIN",
            SearchCategory::Tyre => "TYRE",
        }
    }

    /// Whether matches in this category go through the rim rejection check.
    pub fn requires_vehicle(&self) -> bool {
        matches!(self, SearchCategory::Rim)
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
