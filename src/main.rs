use anyhow::{Context, Result};
use carlog::{pipeline, Classification, Classifier, Config, ExtractedFields, Parser, RecordExtractor};
use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "carlog")]
#[command(author, version, about = "Report vehicle searches found in web server access logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Filter the log directory into the combined file")]
    Parse {
        #[arg(help = "Directory containing the access logs")]
        logs_dir: PathBuf,

        #[arg(
            short,
            long,
            env = "CARLOG_OUT_DIR",
            help = "Output directory (default: <LOGS_DIR>/out)"
        )]
        out_dir: Option<PathBuf>,
    },

    #[command(about = "Create the CSV report from the combined file")]
    CreateCsv {
        #[arg(help = "Directory containing the access logs")]
        logs_dir: PathBuf,

        #[arg(
            short,
            long,
            env = "CARLOG_OUT_DIR",
            help = "Output directory (default: <LOGS_DIR>/out)"
        )]
        out_dir: Option<PathBuf>,
    },

    #[command(about = "Show how request URIs are classified")]
    Classify {
        #[arg(required = true, help = "Request URIs, e.g. /oel/pkw/bmw")]
        uris: Vec<String>,
    },
}

fn config(logs_dir: PathBuf, out_dir: Option<PathBuf>) -> Config {
    let config = Config::new(logs_dir);
    match out_dir {
        Some(dir) => config.with_out_dir(dir),
        None => config,
    }
}

fn print_classification(uri: &str, classifier: &Classifier) {
    match classifier.classify(uri) {
        Classification::Matched {
            category,
            rule,
            fields,
        } => {
            println!("{}\t{}\t{}", uri, category, rule.as_str());
            let fields = ExtractedFields::from_match(&fields);
            for name in carlog::matcher::FIELD_NAMES {
                if let Some(value) = fields.get(name) {
                    println!("\t{}={}", name, value);
                }
            }
        }
        Classification::Rejected { category, rule } => {
            println!("{}\t{} (rejected)\t{}", uri, category, rule.as_str());
        }
        Classification::NoMatch => println!("{}\t-", uri),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let parser = Parser::new().context("Failed to compile the access log pattern")?;
    let classifier = Classifier::standard().context("Failed to compile the search rules")?;

    match cli.command {
        Commands::Parse { logs_dir, out_dir } => {
            let config = config(logs_dir, out_dir);
            pipeline::parse_logs(&config, &parser, &classifier)
                .context("Failed to parse log files")?;
        }
        Commands::CreateCsv { logs_dir, out_dir } => {
            let config = config(logs_dir, out_dir);
            let extractor = RecordExtractor::new(&parser, &classifier);
            pipeline::create_report(&config, &extractor).context("Failed to create CSV report")?;
        }
        Commands::Classify { uris } => {
            for uri in &uris {
                print_classification(uri, &classifier);
            }
        }
    }

    Ok(())
}
