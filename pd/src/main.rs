//! Plandaemon - deterministic self-care plan composer
//!
//! CLI entry point for building, previewing, and validating plan drafts.

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use contentlib::Catalog;
use plandaemon::cli::{Cli, Command, OutputFormat, PlanArgs};
use plandaemon::config::Config;
use plandaemon::domain::{Draft, PlanParameters};
use plandaemon::gate::{GateOutcome, ParameterGate, ParameterUpdate};
use plandaemon::preview::confirmation_card;
use plandaemon::session::SessionManager;
use plandaemon::validate;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Some(Command::Build { plan, format }) => cmd_build(&config, &plan, format).await,
        Some(Command::Preview { plan }) => cmd_preview(&config, &plan).await,
        Some(Command::Validate { draft, plan }) => cmd_validate(&config, &draft, &plan),
        Some(Command::Catalog { active, format }) => cmd_catalog(&config, active, format),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}

/// Run the CLI parameters through the gate and session actor to a draft
async fn build_via_session(config: &Config, plan: &PlanArgs) -> Result<(Draft, PlanParameters)> {
    let catalog =
        Catalog::load(&config.catalog.path).context("Failed to load the content catalog")?;
    info!(items = catalog.len(), "catalog ready");

    let manager = SessionManager::spawn(Arc::new(catalog), config.session.channel_capacity);

    let update = ParameterUpdate {
        duration: Some(plan.duration),
        focus: Some(plan.focus),
        load: Some(plan.load),
        preferred_time_slots: (!plan.time_slots.is_empty()).then(|| plan.time_slots.clone()),
    };

    let outcome = manager.apply_update(&plan.user, update).await?;
    let parameters = match outcome {
        GateOutcome::Rejected { correction, .. } => {
            eprintln!("{} {}", "rejected:".red().bold(), correction);
            std::process::exit(2);
        }
        GateOutcome::Accepted {
            parameters,
            ready_for_confirmation,
            correction,
        } => {
            if let Some(correction) = correction {
                eprintln!("{} {}", "note:".yellow().bold(), correction);
            }
            if !ready_for_confirmation {
                eprintln!(
                    "{} parameters incomplete; missing: {}",
                    "rejected:".red().bold(),
                    parameters.missing().join(", ")
                );
                std::process::exit(2);
            }
            parameters
        }
    };

    let draft = manager.build_draft(&plan.user).await?;
    manager.shutdown().await;
    Ok((draft, parameters))
}

/// Build a draft and print it
async fn cmd_build(config: &Config, plan: &PlanArgs, format: OutputFormat) -> Result<()> {
    let (draft, _) = build_via_session(config, plan).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        OutputFormat::Text => {
            println!("{}", "Draft built".green().bold());
            println!("  Days:  {}", draft.total_days);
            println!("  Steps: {}", draft.total_steps);
            println!("  Valid: {}", draft.is_valid);
            println!();
            for day in 1..=draft.total_days {
                for step in draft.steps_for_day(day) {
                    println!(
                        "  Day {:>2} {:<8} {:<8} {} ({})",
                        day,
                        step.time_slot.to_string(),
                        step.slot_type.to_string(),
                        step.exercise_name,
                        step.category
                    );
                }
            }
        }
    }

    Ok(())
}

/// Build a draft and print its confirmation card
async fn cmd_preview(config: &Config, plan: &PlanArgs) -> Result<()> {
    let (draft, parameters) = build_via_session(config, plan).await?;
    println!("{}", confirmation_card(&draft, &parameters));
    Ok(())
}

/// Validate an exported draft JSON file against plan parameters
fn cmd_validate(config: &Config, draft_path: &std::path::Path, plan: &PlanArgs) -> Result<()> {
    let catalog =
        Catalog::load(&config.catalog.path).context("Failed to load the content catalog")?;

    let content = std::fs::read_to_string(draft_path)
        .context(format!("Failed to read draft from {}", draft_path.display()))?;
    let draft: Draft = serde_json::from_str(&content).context("Failed to parse draft JSON")?;

    // reconstruct validated parameters through the gate
    let update = ParameterUpdate {
        duration: Some(plan.duration),
        focus: Some(plan.focus),
        load: Some(plan.load),
        preferred_time_slots: (!plan.time_slots.is_empty()).then(|| plan.time_slots.clone()),
    };
    let parameters = match ParameterGate::apply(&PlanParameters::default(), &update) {
        GateOutcome::Accepted {
            parameters,
            ready_for_confirmation,
            ..
        } => {
            if !ready_for_confirmation {
                eprintln!(
                    "{} parameters incomplete; a {} plan needs its preferred time slots",
                    "rejected:".red().bold(),
                    plan.load
                );
                std::process::exit(2);
            }
            parameters
        }
        GateOutcome::Rejected { correction, .. } => {
            eprintln!("{} {}", "rejected:".red().bold(), correction);
            std::process::exit(2);
        }
    };

    match validate::validate(
        &draft,
        &parameters,
        &catalog,
        config.validation.category_tolerance,
    ) {
        Ok(summary) => {
            println!(
                "{} {} days, {} steps",
                "valid:".green().bold(),
                summary.total_days,
                summary.total_steps
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "invalid:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// List the content catalog
fn cmd_catalog(config: &Config, active_only: bool, format: OutputFormat) -> Result<()> {
    let catalog =
        Catalog::load(&config.catalog.path).context("Failed to load the content catalog")?;

    let items: Vec<_> = catalog
        .items()
        .iter()
        .filter(|item| !active_only || item.is_active)
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Text => {
            println!("Catalog ({} items)", items.len());
            for item in items {
                let status = if item.is_active {
                    "active".green()
                } else {
                    "inactive".red()
                };
                println!(
                    "  {:<24} {:<12} {:<8} d{} cd{} w{:.1} [{}]",
                    item.id,
                    item.category.to_string(),
                    item.priority_tier.to_string(),
                    item.difficulty,
                    item.cooldown_days,
                    item.base_weight,
                    status
                );
            }
        }
    }

    Ok(())
}
