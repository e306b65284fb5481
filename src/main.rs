use clap::Parser;
use singleheader::utils::{logger, validation::Validate};
use singleheader::{
    AmalgamateError, AmalgamationEngine, CliArgs, LocalStorage, ModuleStatus, RunSummary,
    SingleHeaderPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting singleheader");

    let config = match args.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(config.root_dir().to_path_buf());
    let pipeline = SingleHeaderPipeline::new(storage, config);
    let engine = AmalgamationEngine::new(pipeline);

    let summary = match engine.run().await {
        Ok(summary) => summary,
        Err(e) => fail(&e),
    };

    if let Some(report_path) = &args.report {
        let json = summary.to_json()?;
        std::fs::write(report_path, json)?;
        tracing::info!("📁 Run summary saved to: {}", report_path.display());
    }

    print_summary(&summary);

    if let Err(e) = summary.into_result() {
        fail(&e);
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    if summary.is_empty() {
        println!("No interface files found; nothing generated.");
        return;
    }

    for outcome in &summary.outcomes {
        match &outcome.status {
            ModuleStatus::Written { path, bytes } => {
                println!("✅ {:<20} -> {} ({} bytes)", outcome.name, path.display(), bytes)
            }
            ModuleStatus::Planned { path, bytes } => {
                println!("📋 {:<20} -> {} ({} bytes, dry run)", outcome.name, path.display(), bytes)
            }
            ModuleStatus::UpToDate { path } => {
                println!("✅ {:<20} {} is up to date", outcome.name, path.display())
            }
            ModuleStatus::Failed { message, .. } => println!("❌ {:<20} {}", outcome.name, message),
            ModuleStatus::Skipped => println!("⏭️ {:<20} skipped", outcome.name),
        }
        for warning in &outcome.warnings {
            println!("   ⚠️ {}", warning);
        }
    }

    println!(
        "{} module(s), {} written, {} warning(s)",
        summary.outcomes.len(),
        summary.written_count(),
        summary.warning_count()
    );
}

fn fail(e: &AmalgamateError) -> ! {
    tracing::error!(
        "❌ singleheader failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}
