mod cli;

use clipforge::config;
use clipforge::job::Job;
use clipforge::pipeline::{PipelineCoordinator, TranscodeExecutor, VariantStatus};
use clipforge::sinks::{HttpArchive, HttpCourier, HttpLedger};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "clipforge=trace,clipforge_av=trace".to_string()
        } else {
            "clipforge=info,clipforge_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Run {
            input,
            job_id,
            dry_run,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_input(&input, job_id, cli.config.as_deref(), dry_run))
        }
        Commands::Specs => list_specs(cli.config.as_deref()),
        Commands::CheckTools => check_tools(),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("clipforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn run_input(
    input: &Path,
    job_id: Option<String>,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let registry = config.registry()?;
    let timeout = Duration::from_secs(config.pipeline.timeout_secs);
    let executor = TranscodeExecutor::from_config(&config.tools, timeout)?;

    if dry_run {
        println!("[DRY RUN] Would process {:?}", input);
        for spec in registry.specs() {
            let output = std::path::PathBuf::from(format!("{}_<job>.mp4", spec.output_name));
            println!(
                "  {}. {} -> {:?}",
                spec.id,
                spec.label,
                executor.build_args(input, spec, &output)
            );
        }
        println!(
            "[DRY RUN] Each rendition would go to {} target channel(s)",
            config.distribution.channels.len()
        );
        return Ok(());
    }

    if config.courier.url.is_empty() {
        anyhow::bail!("courier.url must be configured to run a job");
    }
    if config.archive.url.is_empty() {
        anyhow::bail!("archive.url must be configured to run a job");
    }
    if config.ledger.url.is_empty() {
        anyhow::bail!("ledger.url must be configured to run a job");
    }

    let job = match job_id {
        Some(id) => Job::with_id(id, input.to_path_buf()),
        None => Job::new(input.to_path_buf()),
    };

    let coordinator = PipelineCoordinator::new(
        registry,
        executor,
        config.pipeline.clone(),
        config.distribution.clone(),
        Arc::new(HttpCourier::new(&config.courier)),
        Arc::new(HttpArchive::new(&config.archive)),
        Arc::new(HttpLedger::new(&config.ledger)),
    );

    let report = coordinator.run_job(job).await?;

    println!("\nJob {} completed", report.job_id);
    println!(
        "  renditions produced: {}/{}",
        report.succeeded(),
        report.results.len()
    );
    for result in &report.results {
        match result.status {
            VariantStatus::Succeeded => {
                let link = report
                    .distributions
                    .iter()
                    .find(|d| d.variant_id == result.variant_id)
                    .and_then(|d| d.archive_link.as_deref())
                    .unwrap_or("-");
                println!("  {}. {} [ok] {}", result.variant_id, result.label, link);
            }
            VariantStatus::Failed => {
                println!("  {}. {} [failed]", result.variant_id, result.label);
            }
            VariantStatus::Invalid => {
                println!("  {}. {} [invalid output]", result.variant_id, result.label);
            }
        }
    }

    Ok(())
}

fn list_specs(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = config.registry()?;

    println!("Variant catalog ({} specs):", registry.len());
    for spec in registry.specs() {
        let rate = spec
            .frame_rate
            .map(|r| format!("{r} fps"))
            .unwrap_or_else(|| "source fps".to_string());
        println!(
            "  {}. {} ({}, {}x, {} crf {})",
            spec.id, spec.label, rate, spec.speed_factor, spec.encoder.codec, spec.encoder.crf
        );
    }

    Ok(())
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = clipforge_av::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable all features.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Work dir: {:?}", config.pipeline.work_dir);
            println!("  Concurrency: {}", config.pipeline.concurrency);
            println!("  Variants: {}", config.registry()?.len());
            println!("  Target channels: {}", config.distribution.channels.len());
            println!(
                "  Courier configured: {}",
                !config.courier.url.is_empty()
            );
            println!(
                "  Archive configured: {}",
                !config.archive.url.is_empty()
            );
            println!("  Ledger configured: {}", !config.ledger.url.is_empty());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Work dir: {:?}", config.pipeline.work_dir);
            println!("  Variants: {}", config.registry()?.len());
        }
    }

    Ok(())
}
