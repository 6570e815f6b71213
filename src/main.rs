mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ad_ranker::analytics::{series_growth, DEFAULT_TREND_THRESHOLD};
use ad_ranker::config::RankingConfig;
use ad_ranker::marketplace::MarketplaceClient;
use ad_ranker::ranking::{reshuffle_stats, ReshuffleStats};
use ad_ranker::{rank_listing, reshuffle_listings, smart_reshuffle_listings, AdRecord, UserBehavior};

#[derive(Parser)]
#[command(name = "ad-ranker", about = "Marketplace ad ranking and reshuffle engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Rank(RankArgs),
    Growth(GrowthArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct RankArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    fetch: bool,
    #[arg(long)]
    subcategory: Option<String>,
    #[arg(long)]
    organized: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    no_recency: bool,
    #[arg(long)]
    no_popularity: bool,
    #[arg(long)]
    no_shuffle: bool,
    #[arg(long)]
    behavior: Option<PathBuf>,
    #[arg(long)]
    stats: bool,
    #[arg(long)]
    pretty: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct GrowthArgs {
    #[arg(long, value_delimiter = ',', required = true)]
    values: Vec<f64>,
    #[arg(long, default_value_t = DEFAULT_TREND_THRESHOLD)]
    threshold: f64,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long)]
    config: Option<PathBuf>,
}

enum RankInput {
    Flat(Vec<AdRecord>),
    Organized(BTreeMap<String, Vec<AdRecord>>),
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Rank(RankArgs::default()));

    match command {
        Command::Rank(args) => run_rank(args).await,
        Command::Growth(args) => run_growth(args),
        Command::Serve(args) => server::serve(args).await,
    }
}

async fn run_rank(args: RankArgs) -> Result<(), String> {
    let (mut config, _) = RankingConfig::load(args.config.clone())?;
    if let Some(seed) = args.seed {
        config.options.random_seed = Some(seed);
    }
    if args.no_recency {
        config.options.consider_recency = false;
    }
    if args.no_popularity {
        config.options.consider_popularity = false;
    }
    if args.no_shuffle {
        config.options.shuffle_within_tier = false;
    }

    let behavior = match args.behavior.as_ref() {
        Some(path) => Some(read_behavior(path)?),
        None => None,
    };

    match read_input(&args, &config).await? {
        RankInput::Flat(ads) => {
            let ranked = rank_listing(&ads, &config);
            print_json(&ranked, args.pretty)?;
        }
        RankInput::Organized(listings) => {
            let reshuffled = match behavior.as_ref() {
                Some(behavior) => smart_reshuffle_listings(&listings, behavior, &config),
                None => reshuffle_listings(&listings, &config),
            };
            print_json(&reshuffled, args.pretty)?;
            if args.stats {
                print_stats(&reshuffle_stats(&listings, &reshuffled));
            }
        }
    }

    Ok(())
}

fn run_growth(args: GrowthArgs) -> Result<(), String> {
    if args.values.len() < 2 {
        return Err("need at least two values to compute growth".to_string());
    }
    for summary in series_growth(&args.values, args.threshold) {
        println!(
            "{} -> {}: {:+.1}% ({})",
            summary.previous,
            summary.current,
            summary.growth_rate,
            summary.trend.label()
        );
    }
    Ok(())
}

async fn read_input(args: &RankArgs, config: &RankingConfig) -> Result<RankInput, String> {
    if args.fetch {
        let client = MarketplaceClient::from_config(config)?;
        if args.organized {
            return Ok(RankInput::Organized(client.fetch_listings().await?));
        }
        return Ok(RankInput::Flat(
            client.fetch_ads(args.subcategory.as_deref()).await?,
        ));
    }

    let raw = match args.input.as_ref() {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err))?,
        None => read_stdin()?,
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|err| format!("invalid input JSON: {}", err))?;

    match value {
        serde_json::Value::Array(_) => {
            let ads =
                serde_json::from_value(value).map_err(|err| format!("invalid ad list: {}", err))?;
            Ok(RankInput::Flat(ads))
        }
        serde_json::Value::Object(_) => {
            let listings = serde_json::from_value(value)
                .map_err(|err| format!("invalid subcategory map: {}", err))?;
            Ok(RankInput::Organized(listings))
        }
        _ => Err("input must be a JSON array of ads or a subcategory map".to_string()),
    }
}

fn read_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing input: pass --input, --fetch, or pipe JSON on stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn read_behavior(path: &Path) -> Result<UserBehavior, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read behavior file: {}", err))?;
    serde_json::from_str(&contents).map_err(|err| format!("invalid behavior JSON: {}", err))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), String> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn print_stats(stats: &ReshuffleStats) {
    eprintln!(
        "Reshuffled {} of {} subcategories",
        stats.shuffled_subcategories, stats.total_subcategories
    );
    eprintln!(
        "Tier distribution: premium {} | standard {} | basic {} | free {}",
        stats.tier_distribution.premium,
        stats.tier_distribution.standard,
        stats.tier_distribution.basic,
        stats.tier_distribution.free
    );
    for change in &stats.changes {
        eprintln!(
            "  {}: [{}] -> [{}]",
            change.subcategory_id,
            change.original_order.join(", "),
            change.new_order.join(", ")
        );
    }
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
