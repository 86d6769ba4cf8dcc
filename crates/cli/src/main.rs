use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{FilmCatalog, FilmRecord};
use pipeline::{FilmQuery, parse_quick_filters};
use server::{AppState, StateConfig};
use streaming::{ClientConfig, DEFAULT_ENDPOINT, JustWatchClient, StreamingOffer, StreamingResolver};
use tracing::info;

/// Film Finder - browse a film table and find where to stream it
#[derive(Parser)]
#[command(name = "film-finder")]
#[command(about = "Filterable film browser with Australian streaming lookups", long_about = None)]
struct Cli {
    /// Path to the cleaned film CSV (or .tsv)
    #[arg(long, global = true, env = "FILM_FINDER_DATA", default_value = "/data/processed/clean.csv")]
    data_file: PathBuf,

    /// GraphQL endpoint of the streaming catalog
    #[arg(long, global = true, env = "FILM_FINDER_CATALOG_URL", default_value = DEFAULT_ENDPOINT)]
    catalog_url: String,

    /// Per-request timeout for catalog lookups, in seconds
    #[arg(long, global = true, env = "FILM_FINDER_TIMEOUT_SECS", default_value = "5")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Address to listen on
        #[arg(long, env = "FILM_FINDER_BIND", default_value = server::DEFAULT_BIND)]
        bind: SocketAddr,
    },

    /// Filter the film table
    Search {
        #[arg(long)]
        year_min: Option<i32>,
        #[arg(long)]
        year_max: Option<i32>,

        /// Substring of the comma-joined genre list, e.g. "Crime"
        #[arg(long)]
        genre: Option<String>,

        /// Case-insensitive substring of the title
        #[arg(long)]
        search: Option<String>,

        /// Exact director name
        #[arg(long)]
        director: Option<String>,

        /// Comma-separated quick filters: top_rated, popular, short, recent
        #[arg(long)]
        quick: Option<String>,

        #[arg(long)]
        rating_min: Option<f32>,
        #[arg(long)]
        rating_max: Option<f32>,
        #[arg(long)]
        runtime_min: Option<u32>,
        #[arg(long)]
        runtime_max: Option<u32>,

        /// Maximum rows to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List genres, most common first
    Genres,

    /// Show a director's films, oldest first
    Director {
        name: String,
    },

    /// Look up Australian subscription streaming services for a title
    Streaming {
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::Serve { bind } => {
            let state = AppState::load(&StateConfig {
                data_file: cli.data_file,
                catalog_url: cli.catalog_url,
                timeout,
            })
            .await?;
            server::run(bind, state).await?;
        }
        Commands::Search {
            year_min,
            year_max,
            genre,
            search,
            director,
            quick,
            rating_min,
            rating_max,
            runtime_min,
            runtime_max,
            limit,
        } => {
            let catalog = load_catalog(&cli.data_file)?;

            let mut query = FilmQuery::new()
                .with_year_ends(year_min, year_max, catalog.year_bounds())
                .with_rating_ends(rating_min, rating_max)
                .with_runtime_ends(runtime_min, runtime_max)
                .with_limit(limit);
            if let Some(quick) = quick {
                query.quick_filters = parse_quick_filters(&quick)?;
            }
            query.genre = genre;
            query.search_text = search;
            query.director = director;

            let start = Instant::now();
            let films = query.run(catalog.films());
            info!("Query matched {} films in {:.2?}", films.len(), start.elapsed());

            print_films(&films);
        }
        Commands::Genres => {
            let catalog = load_catalog(&cli.data_file)?;
            println!("{}", "Genres:".bold().blue());
            for genre in catalog.genre_tokens() {
                println!("  {} {}", "•".green(), genre);
            }
        }
        Commands::Director { name } => {
            let catalog = load_catalog(&cli.data_file)?;
            let films = catalog.films_by_director(&name);
            if films.is_empty() {
                println!("No films directed by {:?} in the catalog.", name);
            } else {
                println!("{}", format!("Films directed by {}:", name).bold().blue());
                print_films(&films);
            }
        }
        Commands::Streaming { title } => {
            let client = JustWatchClient::new(ClientConfig {
                endpoint: cli.catalog_url,
                timeout,
            })?;
            let resolver = StreamingResolver::new(Arc::new(client));
            let offers = resolver.resolve(&title).await?;
            print_streaming(&title, &offers);
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<FilmCatalog> {
    let start = Instant::now();
    let catalog = FilmCatalog::load(path)
        .with_context(|| format!("Failed to load films from {}", path.display()))?;
    println!(
        "{} Loaded {} films in {:.2?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(catalog)
}

/// Print a film table; standout films are highlighted
fn print_films(films: &[&FilmRecord]) {
    println!(
        "{:<40} {:>4} {:>6} {:>10} {:>7}  {:<28} {}",
        "Title", "Year", "Rating", "Votes", "Runtime", "Genres", "Director"
    );
    for film in films {
        let runtime = film
            .runtime_minutes
            .map(|m| format!("{}m", m))
            .unwrap_or_else(|| "-".to_string());
        let row = format!(
            "{:<40} {:>4} {:>6.1} {:>10} {:>7}  {:<28} {}",
            truncate(&film.title, 40),
            film.year,
            film.imdb_rating,
            film.num_votes,
            runtime,
            truncate(&film.genre_field(), 28),
            film.director
        );
        if film.is_standout() {
            println!("{}", row.yellow().bold());
        } else {
            println!("{}", row);
        }
    }
    println!("{} films", films.len());
}

fn print_streaming(title: &str, offers: &[StreamingOffer]) {
    if offers.is_empty() {
        println!(
            "No subscription-streaming offers found in AU for \"{}\".",
            title
        );
        return;
    }
    let names: Vec<&str> = offers.iter().map(|o| o.service_name.as_str()).collect();
    println!("Available in Australia on: {}", names.join(", ").green());
    for offer in offers {
        println!("  {} {}", "•".cyan(), offer.offer_url);
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
