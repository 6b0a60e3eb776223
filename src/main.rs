/// zone-replay entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use zone_editor::config::EditorConfig;
    use zone_editor::replay::{ReplayOptions, replay};

    let options = ReplayOptions::parse();

    let config = match &options.config {
        Some(path) => match EditorConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => EditorConfig::load_from_default_path().unwrap_or_default(),
    };

    // RUST_LOG still takes precedence over the configured level
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match replay(&options, &config) {
        Ok(summary) => println!(
            "Replayed {} events: {} commits, {} zones written to {:?}",
            summary.events,
            summary.commits,
            summary.zones,
            options.output_path()
        ),
        Err(e) => {
            eprintln!("zone-replay: {}", e);
            std::process::exit(1);
        }
    }
}

// The replay tool needs a file system
#[cfg(target_arch = "wasm32")]
fn main() {}
