use clap::Parser;
use race_cards::core::ConfigProvider;
use race_cards::utils::error::ErrorSeverity;
use race_cards::utils::{logger, validation::Validate};
use race_cards::{CardEngine, CardPipeline, CardRenderer, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-cards")]
#[command(about = "Render race result cards using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cards.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - load and render without writing the page
    #[arg(long)]
    dry_run: bool,
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("   Site: {}", config.subject_name());
    if let Some(title) = &config.site.title {
        tracing::info!("   Title: {}", title);
    }
    tracing::info!("   Input: {} (header prefix {:?})", config.input_path(), config.header_prefix());
    tracing::info!("   Template: {}", config.template_path());
    tracing::info!("   Output: {} (base dir {})", config.output_path(), config.base_dir());
    if let Some(records_json) = config.records_json_path() {
        tracing::info!("   Records dump: {}", records_json);
    }
    if args.verbose {
        tracing::debug!("   Card style: {:?}", config.card_style());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌，設定檔的 log_level = "debug" 等同 --verbose
    let verbose = args.verbose || config.log_level() == Some("debug");
    logger::init_cli_logger(verbose);
    tracing::info!("🚀 Starting TOML-based race-cards");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.base_dir().to_string());
    let renderer = CardRenderer::new(config.card_style());
    let pipeline = CardPipeline::new(storage, config).with_renderer(renderer);
    let engine = CardEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcome = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the page will not be written");
        engine.dry_run().await.map(|cards| {
            println!("🔍 Dry run: {} cards rendered, nothing written", cards.card_count);
        })
    } else {
        engine.run().await.map(|output_path| {
            tracing::info!("✅ Page generated successfully!");
            println!("✅ Wrote {}", output_path);
        })
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
