use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, Favorite, GenreNames, Item, ItemId};
use server::RecommendationService;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strategies::{CastStrategy, ContentStrategy, GenreRecommendations, GenreStrategy, Recommendation};
use tokio::sync::Semaphore;
use tracing::info;

/// cinematch - Content-based movie recommendations
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Movie recommendations from synopsis, genre and cast similarity", long_about = None)]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(short, long, default_value = "movies_dataset.json")]
    catalog: PathBuf,

    /// Optional genre id -> name JSON file (defaults to the built-in Spanish names)
    #[arg(short, long)]
    genres: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Items similar to the favorites' synopsis, genres and cast
    Recommend {
        /// Favorite item ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        favorites: Vec<ItemId>,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Minimum similarity (exclusive)
        #[arg(long, default_value = "0.4")]
        threshold: f64,
    },

    /// Items sharing cast members with the favorites
    ByCast {
        /// Favorite item ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        favorites: Vec<ItemId>,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Popular items grouped under the favorites' top genres
    ByGenre {
        /// Favorite item ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        favorites: Vec<ItemId>,

        /// Items per genre
        #[arg(long, default_value = "16")]
        limit: usize,

        /// Minimum popularity (exclusive)
        #[arg(long, default_value = "60")]
        popularity_floor: f64,
    },

    /// How well one item matches the favorites
    Compatibility {
        /// Item to score
        #[arg(long)]
        target: ItemId,

        /// Favorite item ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        favorites: Vec<ItemId>,
    },

    /// Popular English-language items
    Highlighted {
        /// Number of items to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Releases after today
    Upcoming,

    /// Search for items by title
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.catalog).context("Failed to load movie catalog")?,
    );
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    let genre_names = match &cli.genres {
        Some(path) => GenreNames::load_from_file(path).context("Failed to load genre names")?,
        None => GenreNames::default(),
    };
    let service = RecommendationService::new(catalog, Arc::new(genre_names));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            favorites,
            limit,
            threshold,
        } => handle_recommend(service, favorites, limit, threshold).await?,
        Commands::ByCast { favorites, limit } => handle_by_cast(service, favorites, limit).await?,
        Commands::ByGenre {
            favorites,
            limit,
            popularity_floor,
        } => handle_by_genre(service, favorites, limit, popularity_floor).await?,
        Commands::Compatibility { target, favorites } => {
            handle_compatibility(service, target, favorites).await?
        }
        Commands::Highlighted { limit } => handle_highlighted(&service, limit),
        Commands::Upcoming => handle_upcoming(&service),
        Commands::Search { title } => handle_search(&service, &title),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, requests, concurrent).await?,
    }

    Ok(())
}

fn to_favorites(ids: Vec<ItemId>) -> Vec<Favorite> {
    ids.into_iter().map(Favorite::new).collect()
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: RecommendationService,
    favorites: Vec<ItemId>,
    limit: usize,
    threshold: f64,
) -> Result<()> {
    let service = service.with_content_strategy(
        ContentStrategy::new()
            .with_top_n(limit)
            .with_threshold(threshold),
    );
    let recommendations = service.recommend(to_favorites(favorites)).await?;
    print_recommendations("Similar movies:", &recommendations);
    Ok(())
}

/// Handle the 'by-cast' command
async fn handle_by_cast(service: RecommendationService, favorites: Vec<ItemId>, limit: usize) -> Result<()> {
    let service = service.with_cast_strategy(CastStrategy::new().with_top_n(limit));
    let recommendations = service.recommend_by_cast(to_favorites(favorites)).await?;

    println!("{}", "Movies with the same actors:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        let shared = rec
            .shared_cast
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|member| member.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}. {} [{}] - {} shared: {}",
            (i + 1).to_string().green(),
            rec.title,
            rec.id,
            rec.score,
            shared
        );
    }
    Ok(())
}

/// Handle the 'by-genre' command
async fn handle_by_genre(
    service: RecommendationService,
    favorites: Vec<ItemId>,
    limit: usize,
    popularity_floor: f64,
) -> Result<()> {
    let service = service.with_genre_strategy(
        GenreStrategy::new()
            .with_top_n(limit)
            .with_popularity_floor(popularity_floor),
    );
    let groups = service.recommend_by_genre(to_favorites(favorites)).await?;
    print_genre_groups(&groups);
    Ok(())
}

/// Handle the 'compatibility' command
async fn handle_compatibility(
    service: RecommendationService,
    target: ItemId,
    favorites: Vec<ItemId>,
) -> Result<()> {
    let title = service.catalog().find(target).map(|item| item.title.clone());
    let score = service.compatibility(target, to_favorites(favorites)).await?;
    println!("{}", "Compatibility:".bold().blue());
    println!("{}", compatibility_line(target, title.as_deref(), score));
    Ok(())
}

/// One-line compatibility report; an unknown target still shows its score
fn compatibility_line(target: ItemId, title: Option<&str>, score: f64) -> String {
    match title {
        Some(title) => format!("{} [{}]: {:.3}", title, target, score),
        None => format!("[{}]: {:.3} (movie not found in catalog)", target, score),
    }
}

/// Handle the 'highlighted' command
fn handle_highlighted(service: &RecommendationService, limit: usize) {
    let items = service.highlighted();
    print_items("Highlighted movies:", items.iter().take(limit));
}

/// Handle the 'upcoming' command
fn handle_upcoming(service: &RecommendationService) {
    let today = chrono::Local::now().date_naive();
    let items = service.upcoming(today);
    print_items(&format!("Upcoming after {}:", today), items.iter());
}

/// Handle the 'search' command
fn handle_search(service: &RecommendationService, title: &str) {
    let matches = service.catalog().search_title(title);
    print_items(&format!("Search results for '{}':", title), matches.into_iter().take(20));
}

/// Handle the 'benchmark' command
async fn handle_benchmark(service: RecommendationService, requests: usize, concurrent: usize) -> Result<()> {
    let catalog_len = service.catalog().len();
    if catalog_len == 0 {
        bail!("Cannot benchmark an empty catalog");
    }
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    // Each request picks 1-3 random favorites from the catalog
    let requests_favorites: Vec<Vec<Favorite>> = (0..requests)
        .map(|_| {
            let count = rand::random::<u32>() as usize % 3 + 1;
            (0..count)
                .filter_map(|_| {
                    let position = rand::random::<u32>() as usize % catalog_len;
                    service.catalog().get(position).map(|item| Favorite::new(item.id))
                })
                .collect()
        })
        .collect();

    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for favorites in requests_favorites {
        let service = service.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            service.recommend_all(favorites).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();
    info!("Benchmark finished {} requests", timings.len());

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print a ranked recommendation list
fn print_recommendations(header: &str, recommendations: &[Recommendation]) {
    println!("{}", header.bold().blue());
    if recommendations.is_empty() {
        println!("  (nothing to recommend)");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {:.3} - Rating: {:.1}",
            (i + 1).to_string().green(),
            rec.title,
            rec.id,
            rec.score,
            rec.vote_average
        );
    }
}

fn print_genre_groups(groups: &GenreRecommendations) {
    if groups.is_empty() {
        println!("{}", "No genres found among the favorites".yellow());
    }
    for group in groups.groups() {
        println!("{}", format!("{} ({})", group.name, group.genre_id).bold().blue());
        for (i, rec) in group.items.iter().enumerate() {
            println!(
                "  {}. {} [{}] - Rating: {:.1} - Popularity: {:.1}",
                (i + 1).to_string().green(),
                rec.title,
                rec.id,
                rec.vote_average,
                rec.popularity.unwrap_or_default()
            );
        }
    }
}

fn print_items<'a>(header: &str, items: impl Iterator<Item = &'a Item>) {
    println!("{}", header.bold().blue());
    for item in items {
        let date = item
            .release_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "????".to_string());
        println!(
            "{} {} ({}) [{}] - Popularity: {:.1} - Rating: {:.1}",
            "•".cyan(),
            item.title,
            date,
            item.id,
            item.popularity,
            item.vote_average
        );
    }
}
