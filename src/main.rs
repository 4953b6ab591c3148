use anyhow::{Context, Result};
use clap::Parser;
use langinfluence::{Config, Crawler, LineReporter, WikipediaResolver};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "langinfluence")]
#[command(about = "Crawl the programming language influence graph starting from one language")]
struct Args {
    /// Config file (defaults to $LANGINFLUENCE_CONFIG, then ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the root language name
    #[arg(short, long)]
    root: Option<String>,

    /// Override the root page locator, e.g. /wiki/C_(programming_language)
    #[arg(short, long)]
    locator: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path.clone())?,
        None => Config::load()?,
    };
    if let Some(root) = args.root {
        config.crawl.root_name = root;
    }
    if let Some(locator) = args.locator {
        config.crawl.root_locator = locator;
    }
    config.validate()?;

    // Logs go to stderr; visit lines own stdout
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", &config.crawl.log_level)
    ).init();

    log::info!("Starting langinfluence v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Source: {}", config.source.base_url);

    let resolver = WikipediaResolver::new(&config.source)
        .context("Failed to set up page resolver")?;
    let mut crawler = Crawler::new(resolver, LineReporter::stdout());

    let summary = crawler
        .crawl(&config.crawl.root_name, &config.crawl.root_locator)
        .await;

    if summary.failed > 0 {
        log::warn!("{} of {} pages could not be resolved", summary.failed, summary.visited);
    }

    Ok(())
}
