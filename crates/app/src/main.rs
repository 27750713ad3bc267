//! Cart Application CLI

use std::{path::PathBuf, process};

use cart_app::{
    config::DatastoreConfig,
    context::AppContext,
    domain::carts::{codec::decode_carts, models::Carts},
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cart-app", about = "Cart CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    datastore: DatastoreConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load carts from a JSON file into the datastore
    Seed(SeedArgs),
}

#[derive(Debug, Args)]
struct SeedArgs {
    /// JSON file holding a list of carts
    #[arg(long)]
    file: PathBuf,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Seed(args) => seed(&cli.datastore, args).await,
    }
}

async fn seed(datastore: &DatastoreConfig, args: SeedArgs) -> Result<(), String> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let carts: Carts = decode_carts(&bytes)
        .map_err(|error| format!("failed to decode {}: {error}", args.file.display()))?;

    let ctx = AppContext::from_config(datastore)
        .await
        .map_err(|error| format!("failed to initialise datastore: {error}"))?;

    for cart in carts {
        let user = cart.user_id;
        let count = cart.items.len();

        ctx.carts
            .store_items(user.clone(), cart.items)
            .await
            .map_err(|error| format!("failed to store cart for {user}: {error}"))?;

        println!("seeded {user}: {count} items");
    }

    Ok(())
}
