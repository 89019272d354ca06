//! # carlog - vehicle search classification for access logs
//!
//! A Rust library for finding vehicle-related searches in web server access
//! logs and reporting them as CSV.
//!
//! This library provides functionality to:
//! - Parse access-log lines into date, method, URI and status
//! - Classify request URIs into search categories with an ordered rule table
//! - Extract car brand, model, vehicle id, rim type and similar fields
//! - Filter log directories into a combined store and render a CSV report
//!
//! ## Quick Start
//!
//! ```rust
//! use carlog::{report, Classifier, Parser, RecordExtractor};
//!
//! let parser = Parser::new()?;
//! let classifier = Classifier::standard()?;
//! let extractor = RecordExtractor::new(&parser, &classifier);
//!
//! let line = r#"127.0.0.1 - - [10/Oct/2023:13:55:36] "GET /oel/pkw/bmw HTTP/1.1" 200 1024"#;
//! assert!(parser.filter_line(line, &classifier));
//!
//! let row = extractor.extract(line).unwrap();
//! assert_eq!(
//!     report::render_row(&row),
//!     "\"10/Oct/2023:13:55:36\",\"200\",\"/oel/pkw/bmw\",\"OIL\",\"bmw\",\"\",\"\",\"\",\"\",\"\",\"\",\"\"\n"
//! );
//! # Ok::<(), carlog::Error>(())
//! ```
//!
//! ## Classification
//!
//! Categories are tried in the order RIM, WHEEL, ADVICE, OIL, SNOWCHAIN, TYRE
//! and rules in the order they are listed. The first rule that matches decides.
//! A rim rule declaring `carBrand` or `carModel` rejects the line when either
//! of them comes back unmatched or empty; a rejected line is dropped, it does
//! not fall through to later categories.
//!
//! ## Features
//!
//! - **Optional Serde Support**: Serialize/deserialize categories, records
//!   and rows when the `serde` feature is enabled

pub mod category;
pub mod classifier;
pub mod config;
pub mod entry;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod report;
pub mod rules;

// Re-export main types for convenience
pub use category::SearchCategory;
pub use classifier::{Classification, Classifier};
pub use config::Config;
pub use entry::LogRecord;
pub use error::{Error, Result};
pub use matcher::{FieldMatch, PatternRule};
pub use parser::Parser;
pub use pipeline::{FilterStats, ReportStats};
pub use reader::LineReader;
pub use record::{CsvRow, ExtractedFields, RecordExtractor};
pub use rules::CategoryRuleSet;
