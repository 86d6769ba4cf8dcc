use data_loader::FilmCatalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/data/processed/clean.csv".to_string());

    println!("Loading film dataset from {}...\n", path);

    let start = Instant::now();
    let catalog = FilmCatalog::load(Path::new(&path)).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Films: {}", catalog.len());
    println!("Genres: {}", catalog.genre_tokens().join(", "));
    if let Some((min, max)) = catalog.year_bounds() {
        println!("Years: {} - {}", min, max);
    }
    println!(
        "\nPerformance: {:.0} films/second",
        catalog.len() as f64 / elapsed.as_secs_f64()
    );
}
