use clap::Parser;
use make_model_index::core::parser::scan_lines;
use make_model_index::core::{ConfigProvider, Pipeline};
use make_model_index::domain::model::ParseMode;
use make_model_index::utils::{logger, validation::Validate};
use make_model_index::{EtlEngine, IndexPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-index")]
#[command(about = "Build the make-model index from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "index-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Parse the input and report problems without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 載入 TOML 配置 (logger 需要 log_format 設定)
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.severity().exit_code());
        }
    };

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = IndexPipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let code = perform_dry_run(&pipeline).await;
        std::process::exit(code);
    }

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
    println!("Processing makes and models...");

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Make-model index written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Index build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Index: {}", config.index.name);
    if let Some(description) = &config.index.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {}", config.input_path());
    println!("  Output: {} ({:?})", config.output_path(), config.output_format());
    println!("  Parse Mode: {:?}", config.parse_mode());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

/// Reads and scans the whole input in collect mode; returns the exit code.
async fn perform_dry_run(pipeline: &IndexPipeline<LocalStorage, TomlConfig>) -> i32 {
    let lines = match pipeline.extract().await {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            return e.severity().exit_code();
        }
    };

    let report = scan_lines(&lines, ParseMode::Collect);
    let models: usize = report.index.values().map(Vec::len).sum();

    println!("🔍 Dry Run Analysis:");
    println!("  Lines read: {}", lines.len());
    println!("  Records: {}", report.records);
    println!("  Empty lines skipped: {}", report.skipped_empty);
    println!("  Makes: {}, Models: {}", report.index.len(), models);

    if report.is_clean() {
        println!("✅ Input is clean; a real run would write the index.");
        return 0;
    }

    println!("  Malformed lines: {}", report.diagnostics.len());
    for diagnostic in &report.diagnostics {
        println!(
            "    line {}: {:?} ({})",
            diagnostic.line_number, diagnostic.content, diagnostic.reason
        );
    }
    1
}
