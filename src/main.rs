use dash_runner::core::store::{JsonFileStore, MemoryStore};
use dash_runner::game::{self, GameAction, GameConfig, Screen};
use dash_runner::EngineBuilder;
use log::{info, warn};

const APP_NAME: &str = "dash-runner";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1).map(String::as_str) {
        None => GameConfig::default(),
        Some("--version") | Some("-v") => {
            println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
            std::process::exit(0);
        }
        Some("--help") | Some("-h") => {
            print_help();
            std::process::exit(0);
        }
        Some("--config") => {
            let Some(path) = args.get(2) else {
                eprintln!("--config needs a file path");
                std::process::exit(1);
            };
            match GameConfig::from_json_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        Some(other) => {
            eprintln!("Unknown argument: {}", other);
            eprintln!("Run '{} --help' for usage.", APP_NAME);
            std::process::exit(1);
        }
    };

    info!("Starting Dash Runner...");

    let viewport = &config.viewport;
    info!(
        "Viewport {}x{} at {} TPS, background {}",
        viewport.width, viewport.height, viewport.tps, viewport.background
    );
    let engine = EngineBuilder::<Screen, GameAction>::new()
        .with_tps(viewport.tps)
        .with_window("Dash Runner", viewport.width, viewport.height)
        .build();

    engine
        .init(|systems, context| {
            game::register(systems, &config);
            match JsonFileStore::open_default(APP_NAME) {
                Ok(store) => {
                    info!("High score file: {}", store.path().display());
                    context.set_store(store);
                }
                Err(e) => {
                    warn!("{}; high score will not be saved", e);
                    context.set_store(MemoryStore::new());
                }
            }
        })
        .run();
}

fn print_help() {
    println!("Dash Runner - jump the birds and plants, beat your high score");
    println!();
    println!("Usage: {} [--config <file.json>]", APP_NAME);
    println!();
    println!("Options:");
    println!("  --config <path>  Load tunables from a JSON file");
    println!("  -h, --help       Show this help");
    println!("  -v, --version    Show version");
    println!();
    println!("Controls:");
    println!("  Space / Enter    Start");
    println!("  Space / Up / W   Jump");
    println!("  Esc              Quit");
}
