use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use bills::{
    BillTypeFilter, PageRequest,
    favourites::{FavouriteStore, FileStorage},
    resolver::DEFAULT_MAX_IN_FLIGHT,
};
use clap::{Parser, Subcommand};
use client::{models::DEFAULT_PROXY_URL, proxy::ProxySource};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the bills proxy, including the `/api` prefix.
    #[arg(long, env = "BILLS_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    proxy_url: String,

    /// Directory holding the favourites file.
    #[arg(long, env = "BILLS_STORE_DIR")]
    store_dir: Option<PathBuf>,

    #[arg(long, env = "BILLS_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One page of all bills, optionally filtered by bill type.
    List {
        #[arg(long, default_value_t = 0)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        page_size: usize,

        #[arg(long, default_value = "all")]
        bill_type: String,
    },

    /// One page of favourited bills.
    Favourites {
        #[arg(long, default_value_t = 0)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        page_size: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
        concurrency: usize,
    },

    /// Add or remove a bill (`<billNo>/<billYear>`) from favourites.
    Toggle { key: String },

    /// Titles and sponsor of a single bill.
    Show { key: String },
}

fn store_dir(args: &Args) -> Result<PathBuf> {
    match &args.store_dir {
        Some(dir) => Ok(dir.clone()),
        None => dirs::data_local_dir()
            .map(|dir| dir.join("oireachtas-bills"))
            .context("No local data directory, pass --store-dir"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = Arc::new(ProxySource::new(&args.proxy_url, Duration::from_millis(args.timeout_ms))?);
    let mut store = FavouriteStore::load(FileStorage::new(store_dir(&args)?));

    let output = match args.command {
        Command::List {
            page,
            page_size,
            bill_type,
        } => {
            let request = PageRequest::new(page, page_size)?;
            let filter = BillTypeFilter::from_param(Some(&bill_type));

            client::list(source.as_ref(), &store, request, &filter).await?
        }
        Command::Favourites {
            page,
            page_size,
            concurrency,
        } => {
            let request = PageRequest::new(page, page_size)?;

            client::favourites(source, &store, request, concurrency).await
        }
        Command::Toggle { key } => client::toggle(&mut store, &key)?,
        Command::Show { key } => client::show(source.as_ref(), &key).await?,
    };

    println!("{output}");

    Ok(())
}
