//! `fitit` — browse the exercise catalog and manage saved favorites from the
//! terminal.
//!
//! # Usage
//!
//! ```text
//! fitit search goblet squat
//! fitit --email ana@example.com --password secret saved list
//! fitit --config ~/.config/fitit/fitit.toml home
//! ```

mod commands;
mod render;
mod session;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "fitit", version, about = "Browse exercises and keep your favorites")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "fitit.toml")]
  config: PathBuf,

  /// Account email, for commands that need a session.
  #[arg(long, env = "FITIT_EMAIL", global = true)]
  email: Option<String>,

  /// Account password.
  #[arg(long, env = "FITIT_PASSWORD", hide_env_values = true, global = true)]
  password: Option<String>,

  /// Print JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create an account.
  Signup {
    username: String,
    email:    String,
    password: String,
  },
  /// Show the signed-in profile, or update it when any field is given.
  Profile(ProfileArgs),
  /// Saved exercises.
  Saved {
    #[command(subcommand)]
    action: SavedCommand,
  },
  /// Free-text search over the catalog.
  Search {
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
    #[arg(long, default_value_t = fitit_client::DEFAULT_SEARCH_LIMIT)]
    limit: usize,
  },
  /// Exercises for one muscle group.
  Muscle {
    muscle: String,
    #[arg(long, default_value_t = fitit_core::browse::DEFAULT_PER_SECTION)]
    limit:  usize,
  },
  /// Full detail for one exercise (and whether you saved it, when signed in).
  Details { exercise_id: String },
  /// The home page: your saved exercises and the muscle-group shelves.
  Home,
  /// Account administration.
  Admin {
    #[command(subcommand)]
    action: AdminCommand,
  },
}

#[derive(Args, Debug, Default)]
struct ProfileArgs {
  #[arg(long)]
  name:   Option<String>,
  #[arg(long)]
  age:    Option<String>,
  /// Height in cm.
  #[arg(long)]
  height: Option<String>,
  /// Weight in kg.
  #[arg(long)]
  weight: Option<String>,
  #[arg(long)]
  gender: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SavedCommand {
  /// List saved exercises with their catalog detail.
  List,
  /// Save an exercise.
  Add { exercise_id: String },
  /// Remove a saved exercise.
  Remove { exercise_id: String },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
  /// Manage user accounts.
  Users {
    #[command(subcommand)]
    action: UsersCommand,
  },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
  List,
  Create {
    username: String,
    email:    String,
    password: String,
    #[arg(long, default_value = "user")]
    role:     String,
  },
  Update {
    id:       String,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email:    Option<String>,
    #[arg(long)]
    role:     Option<String>,
    #[arg(long)]
    password: Option<String>,
  },
  Delete { id: String },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  // Flags override the config file and environment.
  if cli.email.is_some() {
    settings.session.email = cli.email.clone();
  }
  if cli.password.is_some() {
    settings.session.password = cli.password.clone();
  }

  let app = commands::App::new(settings, cli.json)?;
  commands::run(&app, cli.command).await
}
