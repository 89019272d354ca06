//! The ordered category rule table.

use crate::category::SearchCategory;
use crate::error::Result;
use crate::matcher::PatternRule;

const RIM_PATTERNS: &[&str] = &[
    r"^/automarken-felgen\.html/?$",
    r"^/felgen/(?P<carBrand>.*)/(?P<carBrand2>.*)-(?P<carModel>.*)-felgen\.html",
    r"^/felgen/(?!.*-zoll)(?P<carBrand>.*)-felgen\.html",
    r"^/rims/rim-selector\?(?=(?:.*type=(?P<rimType>[^&]*))?).*$",
];

const WHEEL_PATTERNS: &[&str] = &[
    r"^/raeder/(?P<carBrand>.*)/(?P<carBrand2>.*)-komplettraeder\.html",
    r"^/raeder/(?!.*-zoll)(?P<carBrand>.*)-komplettraeder\.html",
    r"^/cw/rim-selector\?(?=(?:.*type=(?P<rimType>[^&]*))?)(?=(?:.*season=(?P<rimSeason>[^&]*))?).*$",
];

const ADVICE_PATTERNS: &[&str] = &[
    r"^/Advice/(?P<carBrand>.*)/(?P<carBrand2>.*)-(?P<carModel>.*)-Reifen\.html",
    r"^/Advice/(?!.*-zoll)(?P<carBrand>.*)-Reifen\.html",
    r"^/autoreifen/saison/(sommerreifen|ganzjahresreifen|nordic|spikes|winterreifen|bespikte_reifen|bespikte reifen|nordic compound)/(?P<carModel>.*)/(?P<carModel2>.*)",
    r"^/autoreifen/saison/(sommerreifen|ganzjahresreifen|nordic|spikes|winterreifen|bespikte_reifen|bespikte reifen|nordic compound)/(?P<carModel>.*)",
];

const OIL_PATTERNS: &[&str] = &[
    r"^/oel/pkw/(?P<carBrand>.*)",
    r"^/oel/pkw/?$",
    r"^/oils/search\?(?=(?:.*vehicleId=(?P<vehicleId>[^&]*))?).*$",
];

const SNOWCHAIN_PATTERNS: &[&str] = &[concat!(
    r"^/search-snow-chain\?",
    r"(?=(?:.*vehicleTypes=(?P<vehicleType>[^&]*))?)",
    r"(?=(?:.*vehicleManufacturer=(?P<carBrand>[^&]*))?)",
    r"(?=(?:.*vehicleEngineType=(?P<carEngine>[^&]*))?)",
    r"(?=(?:.*vehicleModel=(?P<carModel>[^&]*))?)",
    r"(?=(?:.*vehicleId=(?P<vehicleId>[^&]*))?)",
    r"(?=(?:.*vehicleSpecification=(?P<vehicleSpec>[^&]*))?)",
    r".*searchByCar=true.*$",
)];

const TYRE_PATTERNS: &[&str] = &[concat!(
    r"^/search\?",
    r"(?=(?:.*vehicleTypes=(?P<vehicleType>[^&]*))?)",
    r"(?=(?:.*vehicleManufacturer=(?P<carBrand>[^&]*))?)",
    r"(?=(?:.*vehicleEngineType=(?P<carEngine>[^&]*))?)",
    r"(?=(?:.*vehicleModel=(?P<carModel>[^&]*))?)",
    r"(?=(?:.*vehicleId=(?P<vehicleId>[^&]*))?)",
    r"(?=(?:.*vehicleSpecification=(?P<vehicleSpec>[^&]*))?)",
    r".*searchByCar=true.*$",
)];

/// Patterns of the built-in table, in precedence order.
pub const STANDARD_TABLE: [(SearchCategory, &[&str]); 6] = [
    (SearchCategory::Rim, RIM_PATTERNS),
    (SearchCategory::Wheel, WHEEL_PATTERNS),
    (SearchCategory::Advice, ADVICE_PATTERNS),
    (SearchCategory::Oil, OIL_PATTERNS),
    (SearchCategory::SnowChain, SNOWCHAIN_PATTERNS),
    (SearchCategory::Tyre, TYRE_PATTERNS),
];

/// An ordered mapping from category to its ordered list of rules.
///
/// Iteration order is classification precedence: earlier categories win over
/// later ones and, inside a category, earlier rules win over later ones.
#[derive(Debug, Clone, Default)]
pub struct CategoryRuleSet {
    entries: Vec<(SearchCategory, Vec<PatternRule>)>,
}

impl CategoryRuleSet {
    /// Build the built-in vehicle search table.
    pub fn standard() -> Result<Self> {
        STANDARD_TABLE
            .iter()
            .try_fold(Self::builder(), |builder, (category, patterns)| {
                builder.category(*category, patterns)
            })
            .map(RuleSetBuilder::build)
    }

    /// Start an empty rule set.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Iterate categories with their rules in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (SearchCategory, &[PatternRule])> {
        self.entries
            .iter()
            .map(|(category, rules)| (*category, rules.as_slice()))
    }

    /// Rules registered for a category.
    pub fn rules(&self, category: SearchCategory) -> Option<&[PatternRule]> {
        self.iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rules)| rules)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set has no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder assembling a [`CategoryRuleSet`] in insertion order.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    entries: Vec<(SearchCategory, Vec<PatternRule>)>,
}

impl RuleSetBuilder {
    /// Append rules for a category.
    ///
    /// Adding to a category that is already present extends its rule list
    /// without changing the category's position.
    pub fn category(mut self, category: SearchCategory, patterns: &[&str]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|p| PatternRule::new(p))
            .collect::<Result<Vec<_>>>()?;

        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => existing.extend(rules),
            None => self.entries.push((category, rules)),
        }
        Ok(self)
    }

    /// Finish the rule set.
    pub fn build(self) -> CategoryRuleSet {
        CategoryRuleSet {
            entries: self.entries,
        }
    }
}
