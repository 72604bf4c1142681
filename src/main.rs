use std::path::PathBuf;

use log::{LevelFilter, error, info};
use simple_logger::SimpleLogger;

use lifegif::config::{Params, parse_iterations};
use lifegif::error::Result;
use lifegif::render;

/// Bundled picture used when the source is `default`.
const DEFAULT_IMAGE: &str = "Doge.png";

fn main() {
    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Info).init() {
        eprintln!("failed to initialise logging: {}", e);
    }
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let source = args.get(1).map(String::as_str).unwrap_or("default");
    let mut params = Params::default();
    if let Some(n) = args.get(2) {
        params.iterations = parse_iterations(n)?;
    }
    let out_path: PathBuf = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("game_of_life.gif"));
    let frames_dir: Option<PathBuf> = args.get(4).map(PathBuf::from);

    println!("Welcome to Conway's game of life!");
    println!("{}", lifegif::RULES_TEXT);

    let initial = match source {
        "random" => params.random_state(),
        "default" | "" => params.image_state(DEFAULT_IMAGE),
        path => params.image_state(path),
    };

    info!(
        "Simulating {} cycles from {} source, rule {}",
        params.iterations,
        initial.label(),
        params.rule
    );

    let (anim, timings) = lifegif::generate(&initial, &params)?;

    info!("Timings:");
    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    if let Some(dir) = frames_dir {
        let paths = render::save_frames(&dir, initial.label(), &anim.frames)?;
        info!("Saved {} frames to {}", paths.len(), dir.display());
    }

    std::fs::write(&out_path, &anim.gif)?;
    info!("Saved {} ({}x{})", out_path.display(), anim.w, anim.h);

    Ok(())
}
