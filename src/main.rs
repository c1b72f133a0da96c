use std::{
    io::{self, IsTerminal},
    process,
};

use clap::Parser as _;
use fuelcli::{
    cache::{CacheError, PriceCache},
    cli::{Args, Command as CliCommand},
    commands::{BotState, Command, CommandContext, CommandExecuteError},
    config::{
        ConfigError, ConfigManager, DEFAULT_CACHE_TTL_MINUTES,
        DEFAULT_RADIUS_KM,
    },
    feeds::{fixture::FixtureFeed, geoportal::GeoportalFeed},
    query::Query,
    ranking::{self, TOP_N},
    ui::Printer,
    FeedError, PriceFeed, Station,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use thiserror::Error;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(err) = match args.command {
        Some(CliCommand::Init) => init_config(&args),
        _ => run_bot(args).await,
    } {
        let printer = Printer::new(false);
        if let Err(err) = printer.print_error_message(&err.to_string()) {
            eprintln!("Error printing message: {err}");
        }
        process::exit(1);
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error("Input/output error.")]
    Io(#[from] io::Error),
    #[error("{0}.")]
    Readline(#[from] ReadlineError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Feed(#[from] FeedError),
    #[error("{0}")]
    Cache(#[from] CacheError),
}

fn init_config(args: &Args) -> Result<(), AppError> {
    let manager = ConfigManager::new(args.config.clone())?;
    manager.init_default_config()?;
    println!("Configuration initialized at: {:?}", manager.config_path);
    Ok(())
}

async fn run_bot(args: Args) -> Result<(), AppError> {
    let manager = ConfigManager::new(args.config.clone())?;
    let config = manager.load()?;

    let fuel = match args.fuel {
        Some(fuel) => fuel.into(),
        None => config.default_fuel()?,
    };
    let radius_km = args
        .radius
        .or(config.radius_km)
        .unwrap_or(DEFAULT_RADIUS_KM);
    let mut state = BotState::new(fuel, radius_km);

    let ttl_minutes: i64 = config
        .cache_ttl_minutes
        .unwrap_or(DEFAULT_CACHE_TTL_MINUTES)
        .try_into()
        .unwrap_or(i64::MAX);
    let cache = PriceCache::new(chrono::Duration::minutes(ttl_minutes));

    let feed: Box<dyn PriceFeed> = if args.offline {
        Box::new(FixtureFeed::new())
    } else {
        Box::new(GeoportalFeed::new(config.feed_url.clone())?)
    };

    if args.refresh {
        cache.invalidate()?;
    }

    let printer = Printer::new(!args.no_color);

    if let Some(query) = args.query {
        let input = if query == "-" {
            io::read_to_string(io::stdin())?
        } else {
            query
        };
        answer_query(input.trim(), &state, feed.as_ref(), &cache, &printer)
            .await?;
        return Ok(());
    }

    run_conversation(&mut state, feed.as_ref(), &cache, &printer).await
}

async fn run_conversation(
    state: &mut BotState,
    feed: &dyn PriceFeed,
    cache: &PriceCache,
    printer: &Printer,
) -> Result<(), AppError> {
    let mut rl = DefaultEditor::new()?;

    printer.print_app_message(
        "Hi! Which city or town do you want fuel prices for? \
         You can also send coordinates as `lat lon`. /help lists commands.",
    )?;

    let input_prompt = printer.input_prompt();

    loop {
        let line = match rl.readline(&input_prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                break Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if !io::stdin().is_terminal() {
            answer_query(line.trim(), state, feed, cache, printer).await?;
            break Ok(());
        }

        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with('/') {
            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = match Command::from_parts(&parts) {
                Ok(command) => command,
                Err(err) => {
                    printer.print_error_message(&format!(
                        "{err} Use /help for a list of commands."
                    ))?;
                    continue;
                }
            };

            let mut context =
                CommandContext::new(&parts, state, feed, cache, printer);
            match command.execute(&mut context) {
                Ok(()) => {}
                Err(CommandExecuteError::Quit) => break Ok(()),
                Err(CommandExecuteError::Print(err)) => return Err(err.into()),
                Err(err) => printer.print_error_message(&err.to_string())?,
            }
        } else {
            answer_query(line.trim(), state, feed, cache, printer).await?;
        }
    }
}

/// Replies to one query. Feed failures become a reply, not an exit, the way
/// a bot keeps the conversation going.
async fn answer_query(
    input: &str,
    state: &BotState,
    feed: &dyn PriceFeed,
    cache: &PriceCache,
    printer: &Printer,
) -> Result<(), AppError> {
    if input.is_empty() {
        printer.print_error_message(
            "Tell me a city or a `lat lon` coordinate pair.",
        )?;
        return Ok(());
    }

    let query = Query::parse(input, state.radius_km);

    let stations = match load_stations(feed, cache).await {
        Ok(stations) => stations,
        Err(err) => {
            printer.print_error_message(&format!(
                "Could not fetch prices: {err}"
            ))?;
            return Ok(());
        }
    };

    let ranking = ranking::top_cheapest(&stations, &query, state.fuel);

    if ranking.is_empty() {
        printer.print_error_message(&format!(
            "No results for '{input}'. Try another locality."
        ))?;
        return Ok(());
    }

    let heading = match query {
        Query::Locality(ref name) => format!(
            "Top {TOP_N} for {} in {name}:",
            state.fuel.label()
        ),
        Query::Near { radius_km, .. } => format!(
            "Top {TOP_N} for {} within {radius_km} km:",
            state.fuel.label()
        ),
    };

    printer.print_ranking(&heading, &ranking, state.fuel)?;

    Ok(())
}

/// Serves the cached snapshot while it is fresh, otherwise refetches. A
/// failed cache write only costs the next query a refetch.
async fn load_stations(
    feed: &dyn PriceFeed,
    cache: &PriceCache,
) -> Result<Vec<Station>, FeedError> {
    if let Some(stations) = cache.load_fresh() {
        return Ok(stations);
    }

    let stations = feed.fetch().await?;

    if let Err(err) = cache.store(&stations) {
        warn!(error = %err, "failed to store price snapshot");
    }

    Ok(stations)
}
