//! Terminal preview for myrtio-frame-composer effects
//!
//! Plays built-in frames or sprite images on a simulated strip. Ctrl-C or
//! Enter stops playback after the current frame, as does `--duration`.

mod cli;
mod frames;
mod terminal;

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use myrtio_frame_composer::sprite::sprite_script;
use myrtio_frame_composer::{
    DEFAULT_GAMMA, EffectConfig, EffectPlayer, FrameScheduler, FrameScript, StopSignal,
};

use crate::cli::Args;
use crate::frames::{LED_COUNT, Thunder};
use crate::terminal::TerminalDriver;

static STOP: StopSignal = StopSignal::new();

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
    debug!("Command-line args: {:?}", args);

    if args.list {
        for name in frames::names() {
            println!("{name}");
        }
        return Ok(());
    }
    let Some(source) = args.frames.as_deref() else {
        bail!("--frames is required");
    };

    let gamma = if args.no_gamma {
        None
    } else {
        Some(args.gamma.unwrap_or(DEFAULT_GAMMA))
    };
    let script = load_frames(source, gamma)?;
    let config = EffectConfig {
        fps: args.fps,
        brightness: args.brightness,
        mirrored: args.mirrored,
        overlay: args
            .overlay
            .as_deref()
            .map(|source| load_frames(source, gamma))
            .transpose()?,
        underlay: args
            .underlay
            .as_deref()
            .map(|source| load_frames(source, gamma))
            .transpose()?,
        seed: args.seed,
    };

    let mut player = EffectPlayer::new(script, &config).context("Invalid effect")?;
    if args.thunder {
        player = player.with_hook(Thunder::new().context("Invalid thunder frames")?);
    }

    ctrlc::set_handler(|| STOP.raise()).context("Failed to install Ctrl-C handler")?;
    spawn_stop_watchers(args.duration);

    info!("Playing {source} at {} fps", config.fps);
    let mut scheduler: FrameScheduler<'_, _, LED_COUNT, 1> =
        FrameScheduler::new(player, TerminalDriver::new());
    scheduler.run(&STOP);
    scheduler.output().finish();
    info!("Played {} frames", scheduler.frames());

    Ok(())
}

/// Resolve a built-in frames name, or load a sprite image
fn load_frames(source: &str, gamma: Option<f32>) -> Result<FrameScript<LED_COUNT>> {
    if let Some(script) = frames::by_name(source) {
        return script.with_context(|| format!("Built-in frames '{source}' are invalid"));
    }

    let path = Path::new(source);
    if !path.is_file() {
        bail!(
            "'{source}' is neither a file nor one of: {}",
            frames::names().collect::<Vec<_>>().join(", ")
        );
    }
    let image = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let script = sprite_script(&image, gamma)
        .with_context(|| format!("Failed to decode sprite {}", path.display()))?;
    debug!("Loaded sprite {} ({} frames)", path.display(), script.len());
    Ok(script)
}

/// Raise the stop signal on Enter, or once `duration` seconds have passed
fn spawn_stop_watchers(duration: Option<u64>) {
    if std::io::stdin().is_terminal() {
        std::thread::spawn(|| {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
            STOP.raise();
        });
    }

    if let Some(seconds) = duration {
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(seconds));
            STOP.raise();
        });
    }
}
