use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use make_model_index::core::matcher::{TitleResolver, DEFAULT_THRESHOLD};
use make_model_index::core::serializer::{load_index, to_json_pretty};
use make_model_index::utils::{logger, validation::validate_range};

#[derive(Parser)]
#[command(name = "resolve-listing")]
#[command(about = "Recognise make, model and year in listing titles using a generated index")]
struct Args {
    /// JSON index produced by make-model-index
    #[arg(short, long, default_value = make_model_index::config::DEFAULT_OUTPUT_PATH)]
    index: String,

    /// Minimum similarity for fuzzy make/model matches
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Only print titles where both make and year were found
    #[arg(long)]
    complete_only: bool,

    #[arg(short, long)]
    verbose: bool,

    /// Listing titles, e.g. "2018 Honda Civic EX"
    #[arg(required = true)]
    titles: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    validate_range("threshold", args.threshold, 0.0, 1.0)?;

    let data = tokio::fs::read(&args.index)
        .await
        .with_context(|| format!("reading index {}", args.index))?;
    let index = load_index(&data).with_context(|| format!("parsing index {}", args.index))?;
    tracing::debug!("Loaded {} make(s) from {}", index.len(), args.index);

    let resolver =
        TitleResolver::new(&index, chrono::Local::now().year()).with_threshold(args.threshold);

    let matches: Vec<_> = args
        .titles
        .iter()
        .map(|title| resolver.resolve(title))
        .filter(|m| !args.complete_only || m.is_complete())
        .collect();

    let json = to_json_pretty(&matches)?;
    println!("{}", String::from_utf8_lossy(&json));

    Ok(())
}
