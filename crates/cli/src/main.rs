//! `videostore`: log in and rent movies from the terminal.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use videostore_cli::command::{Command, USAGE};
use videostore_cli::render::{Format, Renderer};
use videostore_core::types::DbId;
use videostore_db::{DbConfig, VideoStore};

#[derive(Parser, Debug)]
#[command(
    name = "videostore",
    version,
    about = "Search the movie catalog and manage your rentals"
)]
struct Cli {
    /// Customer login
    login: String,

    /// Customer password
    password: String,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "videostore_cli=info,videostore_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = DbConfig::from_env().context("Invalid database configuration")?;

    let store = VideoStore::connect(&config)
        .await
        .context("Failed to connect to database")?;

    let result = session(&store, &cli).await;
    store.close().await;
    result
}

/// Authenticate, then serve commands until `q` or end of input.
async fn session(store: &VideoStore, cli: &Cli) -> Result<()> {
    let Some(customer_id) = store.login(&cli.login, &cli.password).await? else {
        bail!("Login failed for {}", cli.login);
    };

    let format = if cli.json { Format::Json } else { Format::Text };
    let renderer = Renderer::new(format);

    println!("{}", renderer.personal_data(&store.personal_data(customer_id).await?)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!(input = %line, error = %err, "Unparsable command");
                println!("{err}\n{USAGE}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        let output = execute(store, &renderer, customer_id, command).await?;
        println!("{output}");
    }

    tracing::info!(customer_id, "Session finished");
    Ok(())
}

async fn execute(
    store: &VideoStore,
    renderer: &Renderer,
    customer_id: DbId,
    command: Command,
) -> Result<String> {
    let output = match command {
        Command::PersonalData => renderer.personal_data(&store.personal_data(customer_id).await?)?,
        Command::ListPlans => renderer.plans(&store.list_plans().await?)?,
        Command::ChoosePlan(plan_id) => {
            renderer.outcome(&store.choose_plan(customer_id, plan_id).await?)?
        }
        Command::Search(title) => renderer.listings(&store.search(customer_id, &title).await?)?,
        Command::FastSearch(title) => {
            renderer.listings(&store.fast_search(customer_id, &title).await?)?
        }
        Command::Rent(movie_id) => renderer.outcome(&store.rent(customer_id, movie_id).await?)?,
        Command::Return(movie_id) => {
            renderer.outcome(&store.return_movie(customer_id, movie_id).await?)?
        }
        Command::Quit => String::new(),
    };
    Ok(output)
}
