use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use nes_rl_env::{Action, EnvConfig, GameId, NesEnv, run_random_baseline};

// =============================================================================
// Commands
// =============================================================================

fn games() -> Result<()> {
    for game in GameId::ALL {
        println!("{:<28} {}", game.rom_name(), game.title());
    }
    Ok(())
}

fn info(args: &InfoArgs, config: EnvConfig) -> Result<()> {
    let env = NesEnv::new(&args.rom, config)?;
    let profile = env.profile();

    println!("Title:          {}", env.game().title());
    println!("Screen:         {}x{}", env.screen_width(), env.screen_height());
    println!("Warm-up frames: {}", profile.warmup_frames());
    println!("Legal actions:  {}", env.num_legal_actions());
    for action in profile.legal.iter() {
        println!("  {:>2}  {action}", action.code());
    }
    Ok(())
}

fn baseline(args: &BaselineArgs, config: EnvConfig) -> Result<()> {
    eprintln!("Running random agent baseline...");

    let mut env = NesEnv::new(&args.rom, config)?;
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let stats = run_random_baseline(&mut env, args.episodes, args.max_steps, &mut rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        eprintln!(
            "\nBaseline {}: episodes={}, mean={:.1}, max={}, mean_frames={:.1}",
            stats.game, stats.episodes, stats.mean_reward, stats.max_reward, stats.mean_frames
        );
    }
    Ok(())
}

fn screenshot(args: &ScreenshotArgs, config: EnvConfig) -> Result<()> {
    let mut env = NesEnv::new(&args.rom, config)?;
    env.reset_game()?;
    for _ in 0..args.frames {
        env.act_action(Action::Noop)?;
    }

    let bgr = env.screen_rgb();
    write_ppm(&args.out, env.screen_width(), env.screen_height(), &bgr)?;
    eprintln!(
        "Wrote {} after {} frames ({} total)",
        args.out.display(),
        env.episode_frame_number(),
        env.frame_number()
    );
    Ok(())
}

/// Binary PPM; swaps the environment's blue-green-red pixels to RGB.
fn write_ppm(path: &Path, width: usize, height: usize, bgr: &[u8]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write!(out, "P6\n{width} {height}\n255\n")?;
    for px in bgr.chunks_exact(3) {
        out.write_all(&[px[2], px[1], px[0]])?;
    }
    out.flush()?;
    Ok(())
}

// =============================================================================
// CLI
// =============================================================================

#[derive(Parser)]
#[command(name = "nes-rl-env", about = "NES titles as reinforcement-learning environments")]
struct Cli {
    /// JSON file with environment settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = false)]
    real_time: bool,
    #[arg(long, global = true, default_value_t = false)]
    audio: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported ROM file names
    Games,
    /// Show what the environment knows about a ROM
    Info(InfoArgs),
    /// Run random agent baseline
    Baseline(BaselineArgs),
    /// Reset, idle for a while and save the screen as PPM
    Screenshot(ScreenshotArgs),
}

#[derive(Parser)]
struct InfoArgs {
    #[arg(long)]
    rom: PathBuf,
}

#[derive(Parser)]
struct BaselineArgs {
    #[arg(long)]
    rom: PathBuf,
    #[arg(long, default_value = "10")]
    episodes: usize,
    #[arg(long, default_value = "10000")]
    max_steps: u64,
    #[arg(long)]
    seed: Option<u64>,
    /// Print the summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser)]
struct ScreenshotArgs {
    #[arg(long)]
    rom: PathBuf,
    #[arg(long, default_value = "120")]
    frames: u32,
    #[arg(long, default_value = "screen.ppm")]
    out: PathBuf,
}

impl Cli {
    fn env_config(&self) -> Result<EnvConfig> {
        let mut config = match &self.config {
            Some(path) => EnvConfig::from_json_file(path)?,
            None => EnvConfig::default(),
        };
        config.real_time |= self.real_time;
        if self.audio {
            config.mute_audio = false;
        }
        Ok(config)
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    let cli = Cli::parse();
    let config = cli.env_config()?;

    match &cli.command {
        Commands::Games => games(),
        Commands::Info(args) => info(args, config),
        Commands::Baseline(args) => baseline(args, config),
        Commands::Screenshot(args) => screenshot(args, config),
    }
}
