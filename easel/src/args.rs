use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Easel text-to-image client
#[derive(Debug, Parser)]
#[command(name = "easel", about = "Generate, save and share images from text prompts")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "easel.toml", env = "EASEL_CONFIG")]
    pub config: PathBuf,

    /// Log filter used when the configuration sets none
    #[arg(long, default_value = "warn", env = "EASEL_LOG")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an image from a prompt
    Generate(GenerateArgs),

    /// List style presets and sizes
    Styles,

    /// List saved images, newest first
    Gallery,

    /// Save identity pool and endpoint settings
    Configure(ConfigureArgs),

    /// Exchange the identity pool for fresh credentials
    RefreshCredentials,

    /// Remove saved settings and cached credentials
    ClearSettings,
}

#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// What to draw
    pub prompt: String,

    /// Style preset identifier
    #[arg(long, default_value = "photographic")]
    pub style: String,

    /// Guidance scale (1-20)
    #[arg(long, default_value_t = 6.5)]
    pub cfg_scale: f64,

    /// Diffusion steps (10-50)
    #[arg(long, default_value_t = 30)]
    pub steps: u32,

    /// Output size as WIDTHxHEIGHT
    #[arg(long, default_value = "1024x1024")]
    pub size: String,

    /// Seed; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the image to the album
    #[arg(long)]
    pub save: bool,

    /// Share the image
    #[arg(long)]
    pub share: bool,

    /// Print the full record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct ConfigureArgs {
    /// Default region
    #[arg(long)]
    pub region: Option<String>,

    /// Identity pool id
    #[arg(long)]
    pub identity_pool_id: Option<String>,

    /// Base URL of the image generation endpoint
    #[arg(long, requires = "generate_image_path")]
    pub endpoint: Option<String>,

    /// Resource path of the generate-image call
    #[arg(long, requires = "endpoint")]
    pub generate_image_path: Option<String>,

    /// Send requests unsigned
    #[arg(long, requires = "endpoint")]
    pub unsigned: bool,
}
