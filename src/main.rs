use clap::Parser;
use flyff_api::utils::{logger, validation::Validate};
use flyff_api::{dump_all, CliConfig, FlyffClient, FlyffError, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting flyff-dump");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let settings = match args.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let resource_names: Vec<&str> = settings.resources.iter().map(|r| r.path()).collect();
    tracing::info!(
        "📋 {} resource(s) from {} -> {}",
        resource_names.len(),
        settings.base_url,
        settings.output_path
    );

    if args.dry_run {
        println!("Would dump: {}", resource_names.join(", "));
        println!("Output directory: {}", settings.output_path);
        return Ok(());
    }

    let client = match FlyffClient::from_config(&settings) {
        Ok(client) => client,
        Err(e) => {
            report_failure(&e);
            std::process::exit(e.exit_code());
        }
    };
    let storage = LocalStorage::new(&settings.output_path);

    match dump_all(&client, &storage, &settings.resources, settings.sort_by).await {
        Ok(manifest) => {
            let total: usize = manifest.resources.iter().map(|r| r.entries).sum();
            tracing::info!("✅ Dump completed: {} entries", total);
            println!("✅ Dumped {} entries (data version {})", total, manifest.version);
            println!("📁 Output saved to: {}", settings.output_path);
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(e.exit_code());
        }
    }
}

fn report_failure(e: &FlyffError) {
    tracing::error!(
        "❌ Dump failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}
