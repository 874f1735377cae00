/// Gradebook: students, class projects and grades
///
/// Main entry point. `serve` (the default) starts the web routes, `shell`
/// opens the interactive command prompt. Both share the same storage layer.

use clap::{Parser, Subcommand};
use gradebook::{
    config::Config,
    server::{init_tracing, open_store, start_server},
    shell,
    store::{database, GradebookStore},
    Dispatcher,
};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "gradebook", about = "Track students, projects and grades", version)]
struct Cli {
    /// Override GRADEBOOK_DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve,
    /// Open the interactive command shell.
    Shell {
        /// Use a throwaway in-memory database.
        #[arg(long)]
        in_memory: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => start_server(config).await?,
        Command::Shell { in_memory } => {
            let store = if in_memory {
                let pool = database::connect_in_memory().await?;
                GradebookStore::new(pool, config.database.statement_timeout())
            } else {
                open_store(&config).await?
            };

            let mut dispatcher = Dispatcher::new(store.clone());
            let result = shell::run(
                &mut dispatcher,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await;

            // Release the connection whether or not the session ended cleanly
            store.pool().close().await;
            result?;
        }
    }

    Ok(())
}
