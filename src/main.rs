use clap::Parser;
use marketbrief::application::pipeline::{NewsReport, RunOptions, RunReport};
use marketbrief::cli::commands::{Cli, Commands};
use marketbrief::config::AppConfig;
use marketbrief::domain::error::DomainError;
use marketbrief::domain::ports::publisher::PublishOutcome;
use marketbrief::domain::values::publish_target::TargetKind;
use marketbrief::MarketBrief;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marketbrief=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    // No-op when there is no .env file.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(&config, cli.command, cli.json).await {
        eprintln!("Error: {e}");
        if let DomainError::Publish(p) = &e {
            if let Some(hint) = p.hint() {
                eprintln!("Hint: {hint}");
            }
        }
        std::process::exit(1);
    }
}

async fn run_command(config: &AppConfig, cmd: Commands, json: bool) -> Result<(), DomainError> {
    match cmd {
        Commands::Run {
            target,
            dry_run,
            no_quotes,
            no_headlines,
        } => {
            let target = parse_target(target.as_deref(), config.default_target)?;
            let brief = MarketBrief::new(config, target)?;
            let options = RunOptions {
                include_quotes: !no_quotes,
                include_headlines: !no_headlines,
                dry_run,
            };
            let today = chrono::Local::now().date_naive();
            let report = brief.run_digest(today, &options).await?;
            if json {
                print_json(&report)?;
            } else {
                print_digest(&report);
            }
        }
        Commands::News {
            target,
            limit,
            dry_run,
        } => {
            let target = parse_target(Some(target.as_str()), config.default_target)?;
            let brief = MarketBrief::new(config, target)?;
            let report = brief.run_news(limit, dry_run).await?;
            if json {
                print_json(&report)?;
            } else {
                print_news(&report);
            }
        }
        Commands::Collect {
            no_quotes,
            no_headlines,
        } => {
            let brief = MarketBrief::new(config, config.default_target)?;
            let options = RunOptions {
                include_quotes: !no_quotes,
                include_headlines: !no_headlines,
                dry_run: true,
            };
            let collected = brief.collect(&options).await;
            if json {
                print_json(&collected.value)?;
            } else {
                print!("{}", collected.value.render());
            }
        }
    }
    Ok(())
}

fn parse_target(raw: Option<&str>, default: TargetKind) -> Result<TargetKind, DomainError> {
    match raw {
        Some(raw) => raw.parse().map_err(DomainError::Config),
        None => Ok(default),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), DomainError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| DomainError::Config(format!("cannot serialize report: {e}")))?;
    println!("{text}");
    Ok(())
}

fn describe(outcome: Option<&PublishOutcome>) -> String {
    match outcome {
        None => "not published (dry run)".to_string(),
        Some(PublishOutcome::Published { location: Some(url) }) => {
            format!("published successfully: {url}")
        }
        Some(PublishOutcome::Published { location: None }) => "published successfully".to_string(),
        Some(PublishOutcome::Skipped { reason }) => format!("skipped: {reason}"),
    }
}

fn print_digest(report: &RunReport) {
    println!("{}", report.document);
    println!("【要約結果】");
    println!("{}", report.summary);
    println!();
    println!("{}: {}", report.title, describe(report.publish.as_ref()));
}

fn print_news(report: &NewsReport) {
    if report.entries.is_empty() {
        println!("No feed entries to publish.");
    }
    for entry in &report.entries {
        println!("## {}", entry.title);
        println!("{}", entry.summary);
        if !entry.link.is_empty() {
            println!("Link: {}", entry.link);
        }
        println!("-> {}", describe(entry.publish.as_ref()));
        println!();
    }
}
