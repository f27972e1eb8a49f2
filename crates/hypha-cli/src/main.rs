//! `hypha`, a command-line front end for a HyphaGraph server.
//!
//! # Usage
//!
//! ```text
//! hypha login --email curator@example.org
//! hypha --token $TOKEN sources --kind study --year 2015..2024 --search aspirin
//! hypha terms add <ENTITY_ID> "acetylsalicylic acid" --language en
//! ```

mod commands;
mod settings;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hypha", version, about = "Browse and curate a HyphaGraph knowledge base")]
struct Cli {
  /// Path to a TOML config file (base_url, token, language).
  #[arg(short, long, value_name = "FILE", default_value = "hypha.toml")]
  config: PathBuf,

  /// API root, e.g. http://localhost:8000/api.
  #[arg(long)]
  url: Option<String>,

  /// Bearer token from `hypha login`.
  #[arg(long)]
  token: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Log in and print a bearer token.
  Login {
    #[arg(long)]
    email:    String,
    /// Read from stdin when omitted.
    #[arg(long)]
    password: Option<String>,
  },
  /// Show the account the token belongs to.
  Whoami,
  /// List sources, filtered client-side.
  Sources(SourceArgs),
  /// Show one source and the claims attributed to it.
  Source {
    id: Uuid,
  },
  /// List entities, filtered client-side.
  Entities(EntityArgs),
  /// Show one entity with its aliases and computed inferences.
  Entity {
    id: Uuid,
  },
  /// Manage the aliases of an entity.
  #[command(subcommand)]
  Terms(TermCommand),
}

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
  /// Keep only these kinds (repeatable), e.g. `study`, `review`.
  #[arg(long)]
  pub kind:   Vec<String>,
  /// Publication years, `FROM..TO` inclusive.
  #[arg(long, value_parser = parse_range)]
  pub year:   Option<(f64, f64)>,
  /// Trust level bounds, `MIN..MAX` within 0..1.
  #[arg(long, value_parser = parse_range)]
  pub trust:  Option<(f64, f64)>,
  /// Case-insensitive text over title, authors and origin.
  #[arg(long)]
  pub search: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct EntityArgs {
  /// Keep only these UI categories, by slug or id (repeatable).
  #[arg(long)]
  pub category: Vec<String>,
  #[arg(long)]
  pub search:   Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TermCommand {
  List {
    entity: Uuid,
  },
  Add {
    entity:   Uuid,
    term:     String,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    order:    Option<i32>,
  },
  Rm {
    entity: Uuid,
    term:   Uuid,
  },
  /// Replace every term; each TERM may carry a language as `term@lang`.
  Replace {
    entity: Uuid,
    #[arg(required = true)]
    terms:  Vec<String>,
  },
}

/// Parse `LO..HI` into inclusive bounds.
fn parse_range(s: &str) -> Result<(f64, f64), String> {
  let (lo, hi) = s
    .split_once("..")
    .ok_or_else(|| format!("expected FROM..TO, got {s:?}"))?;
  let lo: f64 = lo.trim().parse().map_err(|e| format!("bad lower bound: {e}"))?;
  let hi: f64 = hi.trim().parse().map_err(|e| format!("bad upper bound: {e}"))?;
  if lo > hi {
    return Err(format!("lower bound {lo} exceeds upper bound {hi}"));
  }
  Ok((lo, hi))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?.with_overrides(cli.url, cli.token);
  tracing::debug!(base_url = %settings.base_url, "settings loaded");

  commands::run(cli.command, &settings).await
}
