use flavor_scout::chatter::load_comments;
use flavor_scout::core::agent::{analyze, interpret};
use flavor_scout::core::cortex::Cortex;
use flavor_scout::core::parser::ParseError;
use flavor_scout::core::state::{init_workspace, InitOutcome, ScoutConfig};
use flavor_scout::core::{Comment, SchemaVariant};
use flavor_scout::render::{print_report, RenderedReport};
use flavor_scout::trend::{print_wall, tally_keywords};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

const PREVIEW_CHARS: usize = 96;

#[derive(Parser)]
#[command(name = "flavor-scout")]
#[command(about = "AI-powered flavor discovery from social chatter")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: .flavor-scout/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV with a comment column
    #[arg(long, global = true, env = "FLAVOR_SCOUT_DATA")]
    data: Option<PathBuf>,

    /// Reply schema to ask the model for
    #[arg(long, global = true, value_enum, env = "FLAVOR_SCOUT_SCHEMA")]
    schema: Option<SchemaVariant>,

    /// More log output (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config to --config (or .flavor-scout/config.toml)
    Init,
    /// Show loaded chatter and the Trend Wall
    Trends,
    /// Trend Wall plus model triage of the chatter
    Analyze,
    /// Decode and render a saved model reply
    Render {
        /// File holding the raw reply
        reply: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "⚠️".red(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config_path = args.config.clone().unwrap_or_else(ScoutConfig::default_path);
    let mut config = ScoutConfig::load(&config_path);
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(schema) = args.schema {
        config.schema = schema;
    }

    match args.command {
        Command::Init => {
            let root = std::env::current_dir()?;
            match init_workspace(&root, &config_path)? {
                InitOutcome::Created => println!("{}", "🧬 Flavor Scout workspace created.".green().bold()),
                InitOutcome::AlreadyPresent => println!("{}", "✅ Flavor Scout is already set up here.".green()),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { reply } => {
            let raw = fs::read_to_string(&reply)
                .with_context(|| format!("Failed to read reply {}", reply.display()))?;
            Ok(show_outcome(&raw, interpret(&raw)))
        }
        Command::Trends => {
            banner();
            load_and_show(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze => {
            banner();
            let comments = load_and_show(&config)?;
            let cortex = Cortex::from_env(&config)?;

            println!("\n{}", "🤖 AI is analyzing social chatter...".magenta());
            let run = analyze(&cortex, &comments, config.schema).await?;
            Ok(show_outcome(&run.raw_output, run.outcome))
        }
    }
}

fn banner() {
    println!("{}", "🍽️  Flavor Scout Engine".bold());
    println!("{}", "   AI-Powered Flavor Discovery for HealthKart".dimmed());
}

fn load_and_show(config: &ScoutConfig) -> Result<Vec<Comment>> {
    let comments = load_comments(&config.data_path, &config.comment_column)?;

    println!("\n{} Loaded {} social comments", "💬".cyan(), comments.len().to_string().bold());
    for (i, comment) in comments.iter().enumerate() {
        println!("   {:>3}  {}", i + 1, preview(comment.text()));
    }

    println!();
    print_wall(&tally_keywords(&comments, config.keywords.as_slice()));
    Ok(comments)
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}

fn show_outcome(raw_output: &str, outcome: Result<RenderedReport, ParseError>) -> ExitCode {
    println!("\n{}", "🧾 Raw AI Output (Debug)".dimmed().bold());
    for line in raw_output.lines() {
        println!("   {}", line.dimmed());
    }

    match outcome {
        Ok(rendered) => {
            print_report(&rendered);
            ExitCode::SUCCESS
        }
        Err(ParseError::Json(e)) => {
            eprintln!("{}", "⚠️ AI output could not be parsed as JSON.".red().bold());
            tracing::debug!("json error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{} {}", "⚠️".red(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_data_and_schema_read_env() {
        let cmd = Args::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(|e| e.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("data").as_deref(), Some("FLAVOR_SCOUT_DATA"));
        assert_eq!(env_of("schema").as_deref(), Some("FLAVOR_SCOUT_SCHEMA"));
    }

    #[test]
    fn test_init_accepts_config_flag() {
        let args = Args::try_parse_from(["flavor-scout", "init", "--config", "conf/scout.toml"]).unwrap();
        assert!(matches!(args.command, Command::Init));
        assert_eq!(args.config, Some(PathBuf::from("conf/scout.toml")));
    }
}
