mod renderer;

use std::path::PathBuf;

use agenda_grid_core::{GridConfig, layout_grid, parse_tracks, svg};
use anyhow::{Context, Result, bail};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (path, svg_out) = match args.as_slice() {
        [_, path] => (PathBuf::from(path), None),
        [_, path, flag, out] if flag == "--svg" => (PathBuf::from(path), Some(PathBuf::from(out))),
        _ => {
            eprintln!("Usage: agenda-grid <tracks.json> [--svg <out.svg>]");
            std::process::exit(1);
        }
    };

    let data = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let tracks =
        parse_tracks(&data).with_context(|| format!("parsing tracks from {}", path.display()))?;
    let config = GridConfig::default();
    if let Err(e) = config.validate() {
        bail!("invalid grid configuration: {e}");
    }

    let layout = layout_grid(&tracks, &config);
    info!(
        "loaded {} tracks, {} sessions from {}",
        layout.tracks.len(),
        layout.session_count(),
        path.display()
    );

    if let Some(out) = svg_out {
        std::fs::write(&out, svg::render_svg(&layout, true))
            .with_context(|| format!("writing {}", out.display()))?;
        info!("wrote {}", out.display());
        return Ok(());
    }

    renderer::render_tui(&layout)
}
