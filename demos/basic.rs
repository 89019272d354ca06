//! Basic usage example for the carlog library.
//!
//! This example classifies a handful of access-log lines and prints the CSV
//! report they would produce, without touching the file system.

use carlog::{pipeline, report, Classification, Classifier, Parser, RecordExtractor};
use std::io::Cursor;

const LOG: &str = r#"127.0.0.1 - - [10/Oct/2023:13:55:36 +0200] "GET /oel/pkw/bmw HTTP/1.1" 200 1024
127.0.0.1 - - [10/Oct/2023:13:55:40 +0200] "GET /felgen/audi/audi-a4-felgen.html HTTP/1.1" 200 2048
127.0.0.1 - - [10/Oct/2023:13:56:02 +0200] "GET /felgen/audi/audi--felgen.html HTTP/1.1" 200 2048
127.0.0.1 - - [10/Oct/2023:13:56:10 +0200] "GET /cw/rim-selector?type=Alu&season=Winter HTTP/1.1" 200 512
127.0.0.1 - - [10/Oct/2023:13:57:00 +0200] "POST /search?vehicleManufacturer=VW&vehicleModel=Golf&searchByCar=true HTTP/1.1" 200 99
127.0.0.1 - - [10/Oct/2023:13:58:00 +0200] "GET /impressum.html HTTP/1.1" 200 10"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== carlog Basic Usage Example ===\n");

    let parser = Parser::new()?;
    let classifier = Classifier::standard()?;

    // Example 1: Classify each line on its own
    classification_example(&parser, &classifier)?;

    // Example 2: Filter and report in memory
    report_example(&parser, &classifier)?;

    Ok(())
}

/// Example 1: How each request URI is classified
fn classification_example(
    parser: &Parser,
    classifier: &Classifier,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Classification");
    println!("-----------------");

    for line in LOG.lines() {
        let record = parser.parse_line(line)?;
        match classifier.classify(&record.uri) {
            Classification::Matched {
                category, fields, ..
            } => println!(
                "  {:<10} {} (brand: {})",
                category.to_string(),
                record.uri,
                fields.field("carBrand").unwrap_or("-")
            ),
            Classification::Rejected { category, .. } => {
                println!("  {:<10} {} (rejected)", category.to_string(), record.uri)
            }
            Classification::NoMatch => println!("  {:<10} {}", "-", record.uri),
        }
    }
    println!();

    Ok(())
}

/// Example 2: The two phases over in-memory buffers
fn report_example(
    parser: &Parser,
    classifier: &Classifier,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Report");
    println!("---------");

    let mut combined = Vec::new();
    let filtered = pipeline::filter_lines(parser, classifier, Cursor::new(LOG), &mut combined)?;
    println!(
        "  kept {} of {} lines\n",
        filtered.lines_kept, filtered.lines_read
    );

    let extractor = RecordExtractor::new(parser, classifier);
    let mut csv = report::header().into_bytes();
    pipeline::report_lines(&extractor, Cursor::new(combined), &mut csv)?;

    print!("{}", String::from_utf8(csv)?);

    Ok(())
}
