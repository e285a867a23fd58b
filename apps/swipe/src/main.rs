use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use catalog::{load_catalog, JsonFileCatalog};
use clap::{Parser, Subcommand};
use swipe_core::{CollectionStore, Product, Session};
use tracing_subscriber::EnvFilter;

mod config;
mod replay;

use config::load_settings;
use replay::{parse_script, Replayer};

#[derive(Parser, Debug)]
#[command(about = "Swipe-to-decide product deck driven from recorded pointer scripts")]
struct Cli {
    /// Settings file; defaults to ./swipe.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Product catalog (JSON). Overrides the settings file.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long)]
    provisional_threshold: Option<f64>,
    #[arg(long)]
    commit_threshold: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog in queue order.
    Inspect,
    /// Replay a pointer script and print session events as JSON lines.
    Replay {
        script: PathBuf,
        /// Skip the reveal delay between a commit and the next card.
        #[arg(long)]
        no_delay: bool,
        /// Abort on the first gesture protocol violation.
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(path) = cli.catalog {
        settings.catalog_path = path;
    }
    if let Some(v) = cli.provisional_threshold {
        settings.provisional_threshold = v;
    }
    if let Some(v) = cli.commit_threshold {
        settings.commit_threshold = v;
    }

    let products = load_catalog(&JsonFileCatalog::new(&settings.catalog_path)).await?;

    match cli.command {
        Command::Inspect => {
            for (position, product) in products.iter().enumerate() {
                println!("{position:>3}  {}", describe_product(product));
            }
        }
        Command::Replay {
            script,
            no_delay,
            strict,
        } => {
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script '{}'", script.display()))?;
            let script = parse_script(&raw)?;

            let thresholds = settings.thresholds()?;
            let presentation = settings.presentation();
            let reveal_delay = if no_delay {
                Duration::ZERO
            } else {
                presentation.reveal_delay
            };
            let mut session = Session::new_with_dependencies(
                products,
                CollectionStore::new(),
                thresholds,
                presentation,
            );

            let stdout = io::stdout();
            let mut replayer = Replayer::new(stdout.lock(), reveal_delay).strict(strict);
            let summary = replayer.run(&mut session, &script).await?;
            let mut out = replayer.into_inner();
            serde_json::to_writer_pretty(&mut out, &summary)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn describe_product(product: &Product) -> String {
    let mut line = format!(
        "#{} {} / {}  ₹{}",
        product.id, product.brand, product.name, product.price
    );
    if product.has_discount() {
        line.push_str(&format!(
            "  (was ₹{}, {}% off)",
            product.original_price, product.discount_percentage
        ));
    }
    line
}
