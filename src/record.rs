//! Report rows and the extraction of fields from classified lines.

use crate::category::SearchCategory;
use crate::classifier::{Classification, Classifier};
use crate::entry::LogRecord;
use crate::matcher::FieldMatch;
use crate::parser::Parser;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Column names of the report, in order.
pub const COLUMNS: [&str; 12] = [
    "date",
    "status",
    "uri",
    "searchType",
    "carBrand",
    "carModel",
    "carEngine",
    "vehicleType",
    "vehicleId",
    "vehicleSpec",
    "rimType",
    "rimSeason",
];

/// Category-derived fields of a classified URI.
///
/// Present values are lower-cased; groups the winning rule doesn't declare,
/// or that didn't participate in the match, are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtractedFields {
    pub car_brand: Option<String>,
    pub car_brand2: Option<String>,
    pub car_model: Option<String>,
    pub car_model2: Option<String>,
    pub car_engine: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_id: Option<String>,
    pub vehicle_spec: Option<String>,
    pub rim_type: Option<String>,
    pub rim_season: Option<String>,
}

impl ExtractedFields {
    /// Project a rule match onto the fixed field set.
    pub fn from_match(fields: &FieldMatch<'_>) -> Self {
        let get = |name: &str| fields.field(name).map(str::to_lowercase);

        Self {
            car_brand: get("carBrand"),
            car_brand2: get("carBrand2"),
            car_model: get("carModel"),
            car_model2: get("carModel2"),
            car_engine: get("carEngine"),
            vehicle_type: get("vehicleType"),
            vehicle_id: get("vehicleId"),
            vehicle_spec: get("vehicleSpec"),
            rim_type: get("rimType"),
            rim_season: get("rimSeason"),
        }
    }

    /// Look a field up by its capture group name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "carBrand" => &self.car_brand,
            "carBrand2" => &self.car_brand2,
            "carModel" => &self.car_model,
            "carModel2" => &self.car_model2,
            "carEngine" => &self.car_engine,
            "vehicleType" => &self.vehicle_type,
            "vehicleId" => &self.vehicle_id,
            "vehicleSpec" => &self.vehicle_spec,
            "rimType" => &self.rim_type,
            "rimSeason" => &self.rim_season,
            _ => return None,
        };
        value.as_deref()
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CsvRow {
    pub date: String,
    pub status: u16,
    pub uri: String,
    pub search_type: SearchCategory,
    pub fields: ExtractedFields,
}

impl CsvRow {
    /// Combine a parsed line with its classification result.
    pub fn new(record: LogRecord, search_type: SearchCategory, fields: ExtractedFields) -> Self {
        Self {
            date: record.date,
            status: record.status,
            uri: record.uri,
            search_type,
            fields,
        }
    }

    /// The twelve column values in [`COLUMNS`] order, blanks for absent fields.
    pub fn values(&self) -> [String; 12] {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        let f = &self.fields;

        [
            self.date.clone(),
            format!("{:03}", self.status),
            self.uri.clone(),
            self.search_type.to_string(),
            field(&f.car_brand),
            field(&f.car_model),
            field(&f.car_engine),
            field(&f.vehicle_type),
            field(&f.vehicle_id),
            field(&f.vehicle_spec),
            field(&f.rim_type),
            field(&f.rim_season),
        ]
    }
}

/// Turns retained access-log lines into report rows.
///
/// Each line is parsed and classified again, so the same line always yields
/// the same row.
#[derive(Debug, Clone, Copy)]
pub struct RecordExtractor<'a> {
    parser: &'a Parser,
    classifier: &'a Classifier,
}

impl<'a> RecordExtractor<'a> {
    /// Create an extractor sharing a parser and classifier.
    pub fn new(parser: &'a Parser, classifier: &'a Classifier) -> Self {
        Self { parser, classifier }
    }

    /// Build the row for a line, or `None` when the line yields no row.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carlog::{Classifier, Parser, RecordExtractor, SearchCategory};
    ///
    /// let parser = Parser::new()?;
    /// let classifier = Classifier::standard()?;
    /// let extractor = RecordExtractor::new(&parser, &classifier);
    ///
    /// let line = r#"1.2.3.4 - - [10/Oct/2023:13:55:36] "GET /felgen/BMW-felgen.html HTTP/1.1" 200 1"#;
    /// let row = extractor.extract(line).unwrap();
    /// assert_eq!(row.search_type, SearchCategory::Rim);
    /// assert_eq!(row.fields.car_brand.as_deref(), Some("bmw"));
    /// # Ok::<(), carlog::Error>(())
    /// ```
    pub fn extract(&self, line: &str) -> Option<CsvRow> {
        let record = self.parser.parse_line(line).ok()?;

        let (category, fields) = match self.classifier.classify(&record.uri) {
            Classification::Matched {
                category, fields, ..
            } => (category, ExtractedFields::from_match(&fields)),
            Classification::Rejected { .. } | Classification::NoMatch => return None,
        };

        Some(CsvRow::new(record, category, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::PatternRule;

    #[test]
    fn test_from_match_lowercases() {
        let rule = PatternRule::new(
            r"^/cw/rim-selector\?(?=(?:.*type=(?P<rimType>[^&]*))?)(?=(?:.*season=(?P<rimSeason>[^&]*))?).*$",
        )
        .unwrap();
        let m = rule.try_match("/cw/rim-selector?type=ALU&season=Winter").unwrap();
        let fields = ExtractedFields::from_match(&m);

        assert_eq!(fields.rim_type.as_deref(), Some("alu"));
        assert_eq!(fields.rim_season.as_deref(), Some("winter"));
        assert_eq!(fields.car_brand, None);
        assert_eq!(fields.get("rimType"), Some("alu"));
        assert_eq!(fields.get("unknown"), None);
    }

    #[test]
    fn test_values_order() {
        let record = LogRecord::new("d", "GET", "/u", 404);
        let fields = ExtractedFields {
            car_brand: Some("b".into()),
            car_brand2: Some("ignored".into()),
            rim_season: Some("s".into()),
            ..Default::default()
        };
        let row = CsvRow::new(record, SearchCategory::Wheel, fields);

        assert_eq!(
            row.values(),
            ["d", "404", "/u", "WHEEL", "b", "", "", "", "", "", "", "s"]
        );
    }

    #[test]
    fn test_status_keeps_three_digits() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();
        let extractor = RecordExtractor::new(&parser, &classifier);

        let row = extractor
            .extract(r#"1.2.3.4 - - [d] "GET /oel/pkw/bmw HTTP/1.1" 000 0"#)
            .unwrap();
        assert_eq!(row.values()[1], "000");

        let row = extractor
            .extract(r#"1.2.3.4 - - [d] "GET /oel/pkw/bmw HTTP/1.1" 042 0"#)
            .unwrap();
        assert_eq!(row.values()[1], "042");
    }

    #[test]
    fn test_extract_skips_rejected_and_unknown() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();
        let extractor = RecordExtractor::new(&parser, &classifier);

        let rejected = r#"1.2.3.4 - - [d] "GET /felgen/bmw/bmw--felgen.html HTTP/1.1" 200 1"#;
        assert_eq!(extractor.extract(rejected), None);

        let unknown = r#"1.2.3.4 - - [d] "GET /kontakt.html HTTP/1.1" 200 1"#;
        assert_eq!(extractor.extract(unknown), None);

        assert_eq!(extractor.extract("garbage"), None);
    }

    #[test]
    fn test_extract_keeps_uri_case() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();
        let extractor = RecordExtractor::new(&parser, &classifier);

        let line = r#"1.2.3.4 - - [d] "GET /Advice/VW/VW-Golf-Reifen.html HTTP/1.1" 200 1"#;
        let row = extractor.extract(line).unwrap();

        assert_eq!(row.uri, "/Advice/VW/VW-Golf-Reifen.html");
        assert_eq!(row.search_type, SearchCategory::Advice);
        assert_eq!(row.fields.car_brand.as_deref(), Some("vw"));
        assert_eq!(row.fields.car_model.as_deref(), Some("golf"));
    }
}
