use clap::Parser;
use race_cards::utils::error::ErrorSeverity;
use race_cards::utils::{logger, validation::Validate};
use race_cards::{CardEngine, CardPipeline, CliConfig, LocalStorage, SiteError};

fn exit_code(e: &SiteError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting race-cards");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    let dry_run = config.dry_run;

    let storage = LocalStorage::new(config.base_dir.clone());
    let pipeline = CardPipeline::new(storage, config);
    let engine = CardEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcome = if dry_run {
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

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
