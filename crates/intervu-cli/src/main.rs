use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "intervu")]
#[command(about = "Intervu - simulated AI interview practice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a demo account
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
        /// Location to continue to after signing in
        #[arg(long)]
        continue_to: Option<String>,
    },
    /// Create an account and sign in
    Register {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Sign out and discard the stored session
    Logout,
    /// Show the active session
    Whoami,
    /// Run a practice interview
    Practice {
        /// Target role
        #[arg(long, default_value = "Frontend Developer")]
        role: String,
        /// Experience level
        #[arg(long, default_value = "Mid-Level")]
        level: String,
        /// Focus topics (up to 5)
        #[arg(long)]
        topic: Vec<String>,
        /// Seconds allotted per question
        #[arg(long)]
        budget: Option<u32>,
    },
    /// Show the report for a completed interview
    Results {
        /// Interview identifier, e.g. int-1
        interview_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login {
            email,
            password,
            continue_to,
        } => commands::auth::login(&email, &password, continue_to.as_deref()).await?,
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&name, &email, &password).await?,
        Commands::Logout => commands::auth::logout().await?,
        Commands::Whoami => commands::auth::whoami().await?,
        Commands::Practice {
            role,
            level,
            topic,
            budget,
        } => commands::practice::run(&role, &level, topic, budget).await?,
        Commands::Results { interview_id } => commands::results::show(&interview_id).await?,
    }

    Ok(())
}
