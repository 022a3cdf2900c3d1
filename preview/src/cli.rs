use std::path::PathBuf;

use clap::Parser;

/// Play LED strip effects in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Built-in frames name, or the path to a sprite image
    #[arg(
        short = 'f',
        long = "frames",
        value_name = "NAME|FILE",
        required_unless_present = "list"
    )]
    pub frames: Option<String>,

    /// Frames per second
    #[arg(long = "fps", default_value_t = 5)]
    pub fps: u32,

    /// LED brightness (0.0-1.0)
    #[arg(short = 'b', long = "brightness", default_value_t = 0.2)]
    pub brightness: f32,

    /// Mirror all frames
    #[arg(short = 'm', long = "mirrored")]
    pub mirrored: bool,

    /// Put other frames over the frames
    #[arg(long = "overlay", value_name = "NAME|FILE")]
    pub overlay: Option<String>,

    /// Put other frames under the frames
    #[arg(long = "underlay", value_name = "NAME|FILE")]
    pub underlay: Option<String>,

    /// Gamma applied to sprite images
    #[arg(long = "gamma", value_name = "GAMMA")]
    pub gamma: Option<f32>,

    /// Disable gamma correction of sprite images
    #[arg(long = "no-gamma", conflicts_with = "gamma")]
    pub no_gamma: bool,

    /// Seed for random delays, for reproducible playback
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Flash lightning at random over the frames
    #[arg(long = "thunder")]
    pub thunder: bool,

    /// Stop after this many seconds
    #[arg(long = "duration", value_name = "SECONDS")]
    pub duration: Option<u64>,

    /// List built-in frames and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
