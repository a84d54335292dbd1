//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Duration, Focus, Load, TimeSlot};

/// Plandaemon - deterministic self-care plan composer
#[derive(Parser)]
#[command(
    name = "plandaemon",
    about = "Deterministic self-care plan composition from a fixed exercise catalog",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Plan parameters shared by the composing subcommands
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Plan duration (SHORT, STANDARD, LONG)
    #[arg(value_name = "DURATION")]
    pub duration: Duration,

    /// Plan focus (somatic, cognitive, boundaries, rest, mixed)
    #[arg(value_name = "FOCUS")]
    pub focus: Focus,

    /// Daily load (LITE, MID, INTENSIVE)
    #[arg(value_name = "LOAD")]
    pub load: Load,

    /// Preferred time slots, comma separated (MORNING,DAY,EVENING);
    /// ignored for INTENSIVE, which always uses all three
    #[arg(short, long, value_delimiter = ',')]
    pub time_slots: Vec<TimeSlot>,

    /// User id the draft is seeded for
    #[arg(short, long, default_value = "local")]
    pub user: String,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Build a draft plan from parameters
    Build {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Build a draft and print its confirmation card
    Preview {
        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Validate a previously exported draft JSON file
    Validate {
        /// Path to the draft JSON file
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,

        #[command(flatten)]
        plan: PlanArgs,
    },

    /// List the content catalog
    Catalog {
        /// Only show active items
        #[arg(short, long)]
        active: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for subcommands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_command_parses() {
        let cli = Cli::parse_from([
            "pd",
            "build",
            "STANDARD",
            "somatic",
            "MID",
            "--time-slots",
            "MORNING,DAY",
            "--user",
            "user-1",
        ]);

        match cli.command {
            Some(Command::Build { plan, format }) => {
                assert_eq!(plan.duration, Duration::Standard);
                assert_eq!(plan.focus, Focus::Somatic);
                assert_eq!(plan.load, Load::Mid);
                assert_eq!(plan.time_slots, vec![TimeSlot::Morning, TimeSlot::Day]);
                assert_eq!(plan.user, "user-1");
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_unknown_load_is_rejected() {
        let result = Cli::try_parse_from(["pd", "build", "STANDARD", "somatic", "EXTREME"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_command_parses() {
        let cli = Cli::parse_from(["pd", "catalog", "--active", "--format", "json"]);
        match cli.command {
            Some(Command::Catalog { active, format }) => {
                assert!(active);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected catalog command"),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
