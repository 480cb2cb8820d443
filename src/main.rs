use anyhow::Context;
use clap::{Parser, Subcommand};
use deeppockets::config::Config;
use deeppockets::import::{DataStoreSource, FileSource, InventorySource};
use deeppockets::inventory::Candidate;
use deeppockets::{Identity, InventoryFilter, InventoryService, LocationFilter, QualityFilter, render};
use std::path::PathBuf;
use std::sync::Arc;

// cargo run -- --file inventory.json list --location REAGENT_BANK --quality Rare --search ore

#[derive(Debug, Parser)]
#[command(name = "deeppockets", version, about = "Account-wide inventory overview")]
struct Args {
    /// TOML config file (if omitted, use env/.env)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Inventory snapshot JSON, overrides the configured path
    #[arg(long, conflicts_with = "datastore")]
    file: Option<PathBuf>,

    /// DataStore_Containers export to read instead of a snapshot
    #[arg(long)]
    datastore: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Grouped items, most valuable first
    List {
        /// Case-insensitive part of the item name
        #[arg(long, default_value = "")]
        search: String,

        /// "All" or a tier (Common, Uncommon, Rare, Epic)
        #[arg(long, default_value = "All")]
        quality: String,

        /// "ALL" or a location tag (eg: BAG, BANK, REAGENT_BANK)
        #[arg(long, default_value = "ALL")]
        location: String,

        /// Maximum number of rows (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Print the view as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Items that only alts are carrying
    Stash {
        /// Main character (defaults to the configured one)
        #[arg(long)]
        main: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Cheapest stacks, candidates for deletion
    Incinerate {
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long)]
        json: bool,
    },
    /// Every stack of an item, by catalog id or exact name
    Find {
        item: String,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    init_tracing(&cfg.log_filter);

    let (path, source): (PathBuf, Arc<dyn InventorySource>) = match &args.datastore {
        Some(path) => (path.clone(), Arc::new(DataStoreSource::new(path))),
        None => {
            let path = args.file.clone().unwrap_or_else(|| cfg.snapshot_path.clone());
            (path.clone(), Arc::new(FileSource::new(path)))
        }
    };
    let service = InventoryService::new(source);
    service
        .reload()
        .with_context(|| format!("loading inventory {}", path.display()))?;

    match args.command {
        Command::List {
            search,
            quality,
            location,
            limit,
            json,
        } => {
            let filter = InventoryFilter::new(LocationFilter::parse(&location), quality.parse::<QualityFilter>()?, search);
            let mut view = service.query(&filter)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            let matched = view.groups.len();
            view.groups.truncate(limit.unwrap_or(cfg.list_limit));
            print!(
                "{}",
                render::table(
                    &["Qty", "Item", "Quality", "Stacks", "Locations", "Value"],
                    &render::group_rows(&view.groups),
                )
            );
            println!("\n{} of {} items, total value {}", view.groups.len(), matched, view.total_display);
        }
        Command::Stash { main, json } => {
            let main = main
                .or(cfg.main_character)
                .context("no main character given (use --main or DEEPPOCKETS_MAIN)")?;
            let entries = service.remote_stash(&main)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("Nothing is stashed away from {main}.");
                return Ok(());
            }
            print!(
                "{}",
                render::table(&["Qty", "Item", "Character", "Location"], &render::stash_rows(&entries))
            );
        }
        Command::Incinerate { limit, json } => {
            let stacks = service.incinerator_candidates(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stacks)?);
                return Ok(());
            }
            print!(
                "{}",
                render::table(&["Qty", "Item", "Character", "Location", "Value"], &render::stack_rows(&stacks))
            );
        }
        Command::Find { item, json } => {
            let identity = match item.parse::<u64>() {
                Ok(id) => Identity::resolve(Some(id), &item),
                Err(_) => Identity::ByName(item.clone()),
            };
            let stacks = service.find_item(&identity)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stacks)?);
                return Ok(());
            }
            if stacks.is_empty() {
                println!("No stacks of {item} found.");
                return Ok(());
            }
            let rows: Vec<Candidate> = stacks.iter().map(Candidate::from).collect();
            print!(
                "{}",
                render::table(&["Qty", "Item", "Character", "Location", "Value"], &render::stack_rows(&rows))
            );
        }
    }

    Ok(())
}

fn init_tracing(filter: &str) {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let _ = color_eyre::install();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();
}
