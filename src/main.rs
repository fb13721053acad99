use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use weather_search::client::state::Phase;
use weather_search::client::states::all_states;
use weather_search::client::{Event, ForecastBackend, HttpBackend, Orchestrator};
use weather_search::display::{self, text};
use weather_search::{WeatherSearchConfig, logging, web};

/// Weather lookup and favorites
#[derive(Debug, Parser)]
#[command(name = "weather-search", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "WEATHER_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Look up a forecast through a running server
    Lookup(LookupArgs),
    /// Manage favorites on a running server
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Suggest US cities for a partial name
    Suggest {
        input: String,
    },
    /// List the accepted state abbreviations and names
    States,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to listen on, e.g. 0.0.0.0:5000
    #[arg(long)]
    bind: Option<String>,

    /// Serve a prebuilt frontend from this directory
    #[arg(long)]
    static_dir: Option<String>,

    /// Favorites database directory
    #[arg(long)]
    store_path: Option<String>,

    /// Keep favorites in memory only
    #[arg(long)]
    in_memory: bool,
}

#[derive(Debug, Args)]
struct LookupArgs {
    #[arg(long, required_unless_present = "autodetect")]
    street: Option<String>,

    #[arg(long, required_unless_present = "autodetect")]
    city: Option<String>,

    /// Two-letter abbreviation or full name
    #[arg(long, required_unless_present = "autodetect")]
    state: Option<String>,

    /// Locate by public IP instead of an address
    #[arg(long, conflicts_with_all = ["street", "city", "state"])]
    autodetect: bool,

    /// Show the detail panel for this day (1-based)
    #[arg(long)]
    day: Option<usize>,

    /// Toggle the favorite flag of the result
    #[arg(long)]
    toggle_favorite: bool,

    /// Backend URL override
    #[arg(long)]
    backend: Option<String>,
}

#[derive(Debug, Subcommand)]
enum FavoritesCommand {
    List,
    Add {
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
    },
    Remove {
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = WeatherSearchConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    logging::init(&config.logging);

    match cli.command {
        Command::Serve(args) => serve(config, args).await,
        Command::Lookup(args) => lookup(config, args).await,
        Command::Favorites(command) => favorites(&config, command).await,
        Command::Suggest { input } => suggest(&config, &input).await,
        Command::States => {
            for (abbreviation, name) in all_states() {
                println!("{abbreviation}  {name}");
            }
            Ok(())
        }
    }
}

async fn serve(mut config: WeatherSearchConfig, args: ServeArgs) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if args.static_dir.is_some() {
        config.server.static_dir = args.static_dir;
    }
    if let Some(path) = args.store_path {
        config.store.path = path;
    }
    config.store.in_memory |= args.in_memory;
    config.validate()?;

    tracing::info!("Starting weather-search {}", weather_search::VERSION);
    web::run(config).await
}

async fn lookup(mut config: WeatherSearchConfig, args: LookupArgs) -> Result<()> {
    if let Some(backend) = args.backend {
        config.client.backend_url = backend;
    }
    let tz: chrono_tz::Tz = config
        .weather
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown timezone '{}'", config.weather.timezone))?;

    let mut orchestrator = Orchestrator::from_config(&config)?;

    if args.autodetect {
        let state = orchestrator.dispatch(Event::ToggleAutodetect).await;
        if let Some(message) = &state.error_message {
            bail!("{message}");
        }
    } else {
        orchestrator
            .dispatch(Event::EditStreet(args.street.unwrap_or_default()))
            .await;
        orchestrator
            .dispatch(Event::EditCity(args.city.unwrap_or_default()))
            .await;
        orchestrator
            .dispatch(Event::EditState(args.state.unwrap_or_default()))
            .await;
    }

    let state = orchestrator.dispatch(Event::Submit).await;
    if let Some(message) = &state.error_message {
        bail!("{message}");
    }
    let errors = state.errors;
    if let Some(message) = errors.street.or(errors.city).or(errors.state) {
        bail!("{message}");
    }

    if args.toggle_favorite {
        orchestrator.dispatch(Event::ToggleFavorite).await;
    }
    if let Some(day) = args.day {
        orchestrator
            .dispatch(Event::SelectDay(day.saturating_sub(1)))
            .await;
    }

    let state = orchestrator.state();
    let Some(results) = &state.results else {
        bail!("No forecast available");
    };

    match state.phase {
        Phase::ShowingDetail { day } => {
            let intervals = results.daily.daily_intervals()?;
            let interval = intervals.get(day).context("Day out of range")?;
            let detail = display::day_detail(
                interval,
                &results.daily.city,
                &results.daily.state,
                results.daily.coordinates(),
                tz,
            );
            print!("{}", text::render_detail(&detail));
        }
        _ => print!("{}", text::render_results(results, tz)?),
    }
    Ok(())
}

async fn favorites(config: &WeatherSearchConfig, command: FavoritesCommand) -> Result<()> {
    let backend = HttpBackend::new(&config.client)?;
    match command {
        FavoritesCommand::List => {
            let favorites = backend.list_favorites().await?;
            print!("{}", text::render_favorites(&favorites));
        }
        FavoritesCommand::Add { city, state } => {
            let entry = backend.add_favorite(&city, &state).await?;
            println!("Added {}, {} ({})", entry.city, entry.state, entry.id);
        }
        FavoritesCommand::Remove { city, state } => {
            backend.remove_favorite(&city, &state).await?;
            println!("Removed {city}, {state}");
        }
    }
    Ok(())
}

async fn suggest(config: &WeatherSearchConfig, input: &str) -> Result<()> {
    let orchestrator = Orchestrator::from_config(config)?;
    for suggestion in orchestrator.suggest_cities(input).await {
        println!("{}", suggestion.city);
    }
    Ok(())
}
