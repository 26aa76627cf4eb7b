use clap::Parser;
use log::{info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};
use snekgrid::game::Game;
use snekgrid::settings::Rgb;
use snekgrid::terminal::{self, TerminalInput, TerminalRenderer};
use snekgrid::{
    Boundary, FileScoreStore, GameSession, GridConfig, Rules, Settings, SpriteCatalog,
};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Grid snake in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cells per side. Overrides the settings file.
    #[arg(short = 'g', long, value_name = "CELLS")]
    grid_size: Option<u32>,
    /// Settings file (JSON).
    #[arg(long, value_name = "FILE", default_value = "snekgrid_settings.json")]
    settings: PathBuf,
    /// Colour preset: classic, neon, retro, dark or sunset.
    #[arg(short, long)]
    theme: Option<String>,
    /// Snake colour as #rrggbb. Applied after the theme.
    #[arg(long, value_name = "COLOR")]
    snake_color: Option<Rgb>,
    /// End the game at the edges instead of wrapping around.
    #[arg(long)]
    solid_walls: bool,
    /// End the game when the head runs into the body.
    #[arg(long)]
    self_collision: bool,
    /// Directory of food images. Names containing `_2.` are long food.
    #[arg(long, value_name = "DIR")]
    sprites: Option<PathBuf>,
    #[arg(long, value_name = "FILE", default_value = FileScoreStore::DEFAULT_FILE)]
    high_score_file: PathBuf,
    #[arg(long, value_name = "FILE", default_value = "snekgrid.log")]
    log_file: PathBuf,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
    /// Write the resulting settings back to the settings file.
    #[arg(long)]
    save_settings: bool,
}

fn load_catalog(dir: Option<&Path>) -> SpriteCatalog {
    let Some(dir) = dir else {
        return SpriteCatalog::default_foods();
    };
    match SpriteCatalog::from_dir(dir) {
        Ok(catalog) if !catalog.entries().is_empty() => catalog,
        Ok(_) => {
            warn!("No food sprites in {}, using plain food", dir.display());
            SpriteCatalog::default_foods()
        }
        Err(e) => {
            warn!("Cannot read sprites from {}: {}", dir.display(), e);
            SpriteCatalog::default_foods()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(level, Config::default(), File::create(&cli.log_file)?)?;
    info!("Starting snekgrid");

    let mut settings = Settings::load_or_default(&cli.settings);
    if let Some(name) = &cli.theme {
        settings.apply_theme(name)?;
    }
    if let Some(color) = cli.snake_color {
        settings.snake_color = color;
    }
    if let Some(size) = cli.grid_size {
        settings.set_grid_size(size)?;
    }
    if cli.save_settings {
        settings.save(&cli.settings)?;
        info!("Saved settings to {}", cli.settings.display());
    }

    let grid = GridConfig::with_size(settings.grid_size)?;
    let rules = Rules {
        boundary: if cli.solid_walls {
            Boundary::Solid
        } else {
            Boundary::Wrap
        },
        self_collision: cli.self_collision,
    };
    let catalog = load_catalog(cli.sprites.as_deref());
    let session = GameSession::new(
        grid,
        rules,
        Box::new(catalog),
        Box::new(FileScoreStore::new(&cli.high_score_file)),
        Box::new(StdRng::from_entropy()),
    );

    terminal::check_terminal_size(&grid);
    let mut game = Game::new(session, settings, TerminalRenderer::stdout(), TerminalInput);
    game.run()?;

    println!(
        "\nFinal score: {}    High score: {}",
        game.session().score(),
        game.session().high_score()
    );
    Ok(())
}
