use anyhow::{Context, bail};
use cardroom_common::Viewport;
use cardroom_interact::{ClickOutcome, Stage, StageConfig, TickOutcome};
use cardroom_render::{DebugTextRenderer, Renderer};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardroom-cli", about = "Headless card room tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default stage configuration as YAML
    Defaults,
    /// Load and validate a stage configuration
    Validate {
        /// YAML file to check
        config: PathBuf,
    },
    /// Click a card, run frames headlessly and print the scene
    Simulate {
        /// Stage configuration (YAML); defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Name of the card to click
        #[arg(long, default_value = "card")]
        card: String,
        /// Frames to run after the first click
        #[arg(short, long, default_value = "200")]
        frames: u32,
        /// Click the card again and run until it is home
        #[arg(long)]
        put_back: bool,
        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value = "720")]
        height: u32,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StageConfig> {
    match path {
        Some(path) => StageConfig::load(path)
            .with_context(|| format!("invalid config {}", path.display())),
        None => Ok(StageConfig::default()),
    }
}

fn describe(outcome: ClickOutcome, stage: &Stage) -> String {
    let name = |id| {
        stage
            .scene()
            .get(id)
            .map(|o| o.name().to_string())
            .unwrap_or_else(|| "?".into())
    };
    match outcome {
        ClickOutcome::Missed => "missed".into(),
        ClickOutcome::Selected(id) => format!("selected {}", name(id)),
        ClickOutcome::Raised(id) => format!("raised {}", name(id)),
        ClickOutcome::Lowered(id) => format!("lowered {}", name(id)),
        ClickOutcome::SentHome { selected, clicked } => {
            format!("sent {} home (clicked {})", name(selected), name(clicked))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::debug!("cardroom-cli starting");

    match cli.command {
        Commands::Info => {
            println!("cardroom-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", cardroom_render::crate_info());
            let config = StageConfig::default();
            println!(
                "defaults: {} cards, standoff {}, damping {}",
                config.room.cards.len(),
                config.animation.standoff,
                config.animation.position_damping
            );
        }
        Commands::Defaults => {
            print!("{}", serde_yaml::to_string(&StageConfig::default())?);
        }
        Commands::Validate { config } => {
            let loaded = load_config(Some(&config))?;
            println!(
                "{}: OK ({} cards, camera at {:?})",
                config.display(),
                loaded.room.cards.len(),
                loaded.camera.position
            );
        }
        Commands::Simulate {
            config,
            card,
            frames,
            put_back,
            width,
            height,
        } => {
            let config = load_config(config.as_deref())?;
            let viewport = Viewport::new(width, height);
            let mut stage = Stage::new(&config, viewport)?;
            let renderer = DebugTextRenderer::new(viewport);

            let Some(id) = stage.scene().find_by_name(&card) else {
                bail!("no card named {card:?}");
            };
            let Some(outcome) = stage.click_object(id) else {
                bail!("card {card:?} is not in view");
            };
            println!("click: {}", describe(outcome, &stage));

            let mut last = TickOutcome::Idle;
            for _ in 0..frames {
                last = stage.frame();
            }
            tracing::info!(card = %card, frames, outcome = ?last, "simulation finished");
            println!("after {frames} frames: {last:?}");
            println!("{}", renderer.render(stage.scene(), &stage.render_view()));

            if put_back {
                let Some(outcome) = stage.click_object(id) else {
                    bail!("card {card:?} left the view");
                };
                println!("click: {}", describe(outcome, &stage));
                let settled = stage.settle(10_000);
                if !stage.selection().is_idle() {
                    bail!("card {card:?} did not return within {settled} frames");
                }
                tracing::info!(card = %card, frames = settled, "card returned home");
                println!("home after {settled} frames");
                println!("{}", renderer.render(stage.scene(), &stage.render_view()));
            }
        }
    }

    Ok(())
}
