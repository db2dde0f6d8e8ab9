use admindash::cli::{self, Cli, Commands};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admindash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(host, port).await,
        Commands::HashPassword { password } => cli::commands::hash_password(password).await,
        Commands::Login { email, password } => cli::commands::login(&email, password).await,
        Commands::Register {
            fullname,
            email,
            password,
        } => cli::commands::register(&fullname, &email, password).await,
        Commands::Me => cli::commands::me().await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Equipment { action } => cli::commands::equipment(action).await,
        Commands::Users { action } => cli::commands::users(action).await,
    }
}
