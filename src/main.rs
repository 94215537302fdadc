use clap::{Parser, Subcommand};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;

use pickwise::collection::storage::{
    collection_path, get_collections_dir, list_collections, load_collection, save_collection,
};
use pickwise::collection::Collection;
use pickwise::item::types::parse_price;
use pickwise::item::{create_item, delete_item, update_item, ItemDraft, ItemPatch, Tag};
use pickwise::preview::{cached_fetch, PreviewCache, PreviewClient, PreviewData};
use pickwise::rating::{
    rating_breakdown, recalculate_all_ratings, validate_weights, RatingWeights,
};
use pickwise::saver::{DebouncedSaver, FileSink};

const EXIT_SUCCESS: i32 = 0;
const EXIT_STORAGE: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_USAGE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new, empty comparison collection
    New {
        /// Collection name, e.g. "laptops"
        name: String,
    },
    /// List all collections
    Collections,
    /// List items of a collection sorted by rating (default if no subcommand)
    List,
    /// Add one or more items by product URL
    Add {
        /// Product URLs to add
        #[arg(required = true)]
        urls: Vec<String>,
        /// Price applied to every added item
        #[arg(long, value_parser = parse_price)]
        price: Option<f64>,
        /// Currency code recorded with the price
        #[arg(long)]
        currency: Option<String>,
        /// Title override (only sensible with a single URL)
        #[arg(long)]
        title: Option<String>,
        /// Skip the preview-metadata fetch
        #[arg(long)]
        no_preview: bool,
    },
    /// Edit an item by id or 1-based index
    Edit {
        /// Item id or index as shown by `list`
        item: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_price)]
        price: Option<f64>,
        #[arg(long)]
        currency: Option<String>,
        /// Add a pro, "text" or "text:impact" with impact 1-10 (repeatable)
        #[arg(long = "pro")]
        pros: Vec<String>,
        /// Add a con, "text" or "text:impact" with impact 1-10 (repeatable)
        #[arg(long = "con")]
        cons: Vec<String>,
        /// Drop all existing pros before adding new ones
        #[arg(long)]
        clear_pros: bool,
        /// Drop all existing cons before adding new ones
        #[arg(long)]
        clear_cons: bool,
    },
    /// Remove an item by id or 1-based index
    Remove {
        /// Item id or index as shown by `list`
        item: String,
        /// Recompute the remaining ratings (they keep stale cross-item
        /// statistics otherwise)
        #[arg(long)]
        rerate: bool,
    },
    /// Show or change the collection's rating weights
    Weights {
        /// Price weight in percentage points
        #[arg(long)]
        price: Option<f64>,
        /// Pros/cons weight in percentage points
        #[arg(long)]
        pros_cons: Option<f64>,
    },
    /// Open an item's product page in the browser
    Open {
        /// Index number of the item to open (1-based, as shown in list)
        index: usize,
    },
    /// Print the collection's items as a pasteable blob
    Export,
    /// Import items from a pasteable blob ("-" reads stdin)
    Import { data: String },
}

#[derive(Parser, Debug)]
#[command(name = "pickwise")]
#[command(about = "Pros/cons comparison CLI with weighted ratings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pickwise/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Collection id to operate on (defaults to the most recently updated)
    #[arg(short = 'C', long, global = true)]
    collection: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Pick the collection to operate on: an explicit id, or the most recently
/// updated one.
fn resolve_collection(id: Option<&str>) -> anyhow::Result<(PathBuf, Collection)> {
    if let Some(id) = id {
        let path = collection_path(id);
        let collection = load_collection(&path)?;
        return Ok((path, collection));
    }

    let summaries = list_collections(&get_collections_dir())?;
    let Some(latest) = summaries.first() else {
        anyhow::bail!("No collections yet. Create one with: pickwise new <name>");
    };
    let collection = load_collection(&latest.path)?;
    Ok((latest.path.clone(), collection))
}

fn print_warnings(weights: &RatingWeights) {
    for warning in validate_weights(weights) {
        eprintln!("Warning: {}", warning);
    }
}

fn print_items(collection: &Collection, verbose: bool) {
    let use_colors = pickwise::output::should_use_colors();
    if verbose && !collection.items.is_empty() {
        for item in &collection.items {
            let breakdown = rating_breakdown(item, &collection.items, &collection.weights);
            println!(
                "{}",
                pickwise::output::format_item_detail(item, &breakdown, use_colors)
            );
            println!();
        }
    } else {
        println!(
            "{}",
            pickwise::output::format_rated_table(&collection.items, use_colors)
        );
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List);

    let config_path = cli.config.map(PathBuf::from);
    let config = match pickwise::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match command {
        Commands::New { name } => {
            let mut collection = Collection::new(&name);
            collection.set_weights(config.default_weights());
            print_warnings(&collection.weights);

            let path = collection_path(&collection.id);
            if let Err(e) = save_collection(&path, &collection) {
                eprintln!("Failed to create collection: {}", e);
                std::process::exit(EXIT_STORAGE);
            }
            println!("Created collection '{}' ({})", collection.name, collection.id);
            if cli.verbose {
                eprintln!("Stored at {}", path.display());
            }
        }

        Commands::Collections => {
            let summaries = match list_collections(&get_collections_dir()) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to list collections: {}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            if summaries.is_empty() {
                println!("No collections yet. Create one with: pickwise new <name>");
            }
            for summary in summaries {
                println!(
                    "{}  {} ({} items)",
                    summary.id, summary.name, summary.item_count
                );
            }
        }

        Commands::List => {
            let (_, collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            if cli.verbose {
                eprintln!(
                    "Collection '{}': {} items, weights {}/{}",
                    collection.name,
                    collection.items.len(),
                    collection.weights.price_rating_weight,
                    collection.weights.pros_cons_rating_weight
                );
            }
            print_items(&collection, cli.verbose);
        }

        Commands::Add {
            urls,
            price,
            currency,
            title,
            no_preview,
        } => {
            let (path, mut collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };

            if title.is_some() && urls.len() > 1 {
                eprintln!("--title only makes sense with a single URL");
                std::process::exit(EXIT_USAGE);
            }

            // Fetch previews in parallel; a dead preview service degrades to
            // placeholder records instead of failing the add.
            let mut previews: Vec<(String, PreviewData)> = Vec::new();
            match (&config.preview_url, no_preview) {
                (Some(base_url), false) => {
                    let client = match PreviewClient::new(base_url) {
                        Ok(c) => c,
                        Err(e) => {
                            eprintln!("Failed to create preview client: {}", e);
                            std::process::exit(EXIT_NETWORK);
                        }
                    };
                    let cache = PreviewCache::new(pickwise::preview::cache::get_cache_path());

                    let mut futures = FuturesUnordered::new();
                    for url in &urls {
                        let client = &client;
                        let cache = &cache;
                        futures.push(async move {
                            let data = match cached_fetch(client, cache, url).await {
                                Ok(data) => data,
                                Err(e) => {
                                    eprintln!("Preview fetch failed for {}: {}", url, e);
                                    PreviewData::placeholder(url)
                                }
                            };
                            (url.clone(), data)
                        });
                    }
                    while let Some(fetched) = futures.next().await {
                        previews.push(fetched);
                    }
                }
                _ => {
                    if cli.verbose && !no_preview {
                        eprintln!("No preview_url configured; skipping preview fetch");
                    }
                    for url in &urls {
                        previews.push((url.clone(), PreviewData::placeholder(url)));
                    }
                }
            }

            // Preserve the order the URLs were given in
            previews.sort_by_key(|(url, _)| urls.iter().position(|u| u == url));

            let saver = DebouncedSaver::spawn(
                config.autosave_delay(),
                Arc::new(FileSink::new(path.clone())),
            );

            for (url, preview) in previews {
                let draft = ItemDraft {
                    url,
                    title: title.clone().unwrap_or(preview.title),
                    description: preview.description,
                    images: if preview.image.is_empty() {
                        vec![]
                    } else {
                        vec![preview.image]
                    },
                    price: price.unwrap_or(0.0),
                    currency: currency.clone().unwrap_or_default(),
                    ..ItemDraft::default()
                };
                let created = create_item(draft, &collection.items, &collection.weights);
                if cli.verbose {
                    eprintln!("Added {} ({})", created.item.display_title(), created.item.id);
                }
                collection.set_items(created.items);
                saver.schedule_save(collection.clone());
            }

            // Flush the coalesced write before reporting
            saver.shutdown().await;

            print_items(&collection, false);
        }

        Commands::Edit {
            item,
            title,
            url,
            description,
            price,
            currency,
            pros,
            cons,
            clear_pros,
            clear_cons,
        } => {
            let (path, mut collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            let Some(id) = collection.resolve_item_id(&item) else {
                eprintln!("No item matching '{}'", item);
                std::process::exit(EXIT_USAGE);
            };

            let current = collection
                .items
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .expect("resolved id is present");

            let parse_tags = |specs: &[String]| -> Result<Vec<Tag>, String> {
                specs
                    .iter()
                    .map(|spec| Tag::parse_spec(spec).map_err(|e| e.to_string()))
                    .collect()
            };

            let new_pros = match parse_tags(&pros) {
                Ok(tags) => tags,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_USAGE);
                }
            };
            let new_cons = match parse_tags(&cons) {
                Ok(tags) => tags,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_USAGE);
                }
            };

            let merged_pros = if clear_pros || !new_pros.is_empty() {
                let mut merged = if clear_pros { vec![] } else { current.pros.clone() };
                merged.extend(new_pros);
                Some(merged)
            } else {
                None
            };
            let merged_cons = if clear_cons || !new_cons.is_empty() {
                let mut merged = if clear_cons { vec![] } else { current.cons.clone() };
                merged.extend(new_cons);
                Some(merged)
            } else {
                None
            };

            let patch = ItemPatch {
                url,
                title,
                description,
                images: None,
                price,
                currency,
                pros: merged_pros,
                cons: merged_cons,
            };
            let items = update_item(&id, patch, &collection.items, &collection.weights);
            collection.set_items(items);

            if let Err(e) = save_collection(&path, &collection) {
                eprintln!("Failed to save collection: {}", e);
                std::process::exit(EXIT_STORAGE);
            }

            let use_colors = pickwise::output::should_use_colors();
            let edited = collection.items.iter().find(|i| i.id == id).unwrap();
            let breakdown = rating_breakdown(edited, &collection.items, &collection.weights);
            println!(
                "{}",
                pickwise::output::format_item_detail(edited, &breakdown, use_colors)
            );
        }

        Commands::Remove { item, rerate } => {
            let (path, mut collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            let Some(id) = collection.resolve_item_id(&item) else {
                eprintln!("No item matching '{}'", item);
                std::process::exit(EXIT_USAGE);
            };

            let mut items = delete_item(&id, &collection.items);
            if rerate {
                items = recalculate_all_ratings(&items, &collection.weights);
            }
            collection.set_items(items);

            if let Err(e) = save_collection(&path, &collection) {
                eprintln!("Failed to save collection: {}", e);
                std::process::exit(EXIT_STORAGE);
            }
            println!("Removed {}", id);
            if !rerate && cli.verbose {
                eprintln!("Remaining ratings kept as-is; rerun with --rerate to refresh them");
            }
        }

        Commands::Weights { price, pros_cons } => {
            let (path, mut collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };

            if price.is_none() && pros_cons.is_none() {
                println!(
                    "price_rating_weight: {}",
                    collection.weights.price_rating_weight
                );
                println!(
                    "pros_cons_rating_weight: {}",
                    collection.weights.pros_cons_rating_weight
                );
                std::process::exit(EXIT_SUCCESS);
            }

            let weights = RatingWeights {
                price_rating_weight: price.unwrap_or(collection.weights.price_rating_weight),
                pros_cons_rating_weight: pros_cons
                    .unwrap_or(collection.weights.pros_cons_rating_weight),
            };
            print_warnings(&weights);

            collection.set_weights(weights);
            let items = recalculate_all_ratings(&collection.items, &collection.weights);
            collection.set_items(items);

            if let Err(e) = save_collection(&path, &collection) {
                eprintln!("Failed to save collection: {}", e);
                std::process::exit(EXIT_STORAGE);
            }
            print_items(&collection, false);
        }

        Commands::Open { index } => {
            let (_, collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            let Some(item) = collection.item_at(index) else {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    collection.items.len()
                );
                std::process::exit(EXIT_USAGE);
            };
            if item.url.is_empty() {
                eprintln!("Item {} has no URL", index);
                std::process::exit(EXIT_USAGE);
            }
            if let Err(e) = pickwise::browser::open_url(&item.url) {
                eprintln!("Failed to open browser: {}", e);
                std::process::exit(EXIT_NETWORK);
            }
            println!("Opening {} in browser: {}", item.display_title(), item.url);
        }

        Commands::Export => {
            let (_, collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            match pickwise::transfer::export_items(&collection.items) {
                Ok(blob) => println!("{}", blob),
                Err(e) => {
                    eprintln!("Export failed: {}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            }
        }

        Commands::Import { data } => {
            let (path, mut collection) = match resolve_collection(cli.collection.as_deref()) {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };

            let blob = if data == "-" {
                let mut buffer = String::new();
                use std::io::Read;
                if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                    eprintln!("Failed to read stdin: {}", e);
                    std::process::exit(EXIT_USAGE);
                }
                buffer
            } else {
                data
            };

            let merged = match pickwise::transfer::import_items(&blob, &collection.items) {
                Ok(items) => items,
                Err(e) => {
                    eprintln!("Import failed: {}", e);
                    std::process::exit(EXIT_USAGE);
                }
            };
            let imported_count = merged.len() - collection.items.len();

            // Imported ratings may be stale or absent; rate the merged list
            let items = recalculate_all_ratings(&merged, &collection.weights);
            collection.set_items(items);

            if let Err(e) = save_collection(&path, &collection) {
                eprintln!("Failed to save collection: {}", e);
                std::process::exit(EXIT_STORAGE);
            }
            println!("Imported {} items", imported_count);
            print_items(&collection, false);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
