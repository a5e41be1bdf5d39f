// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "freelook")]
#[command(about = "First-person camera demo", long_about = None)]
pub struct Cli {
    /// Window width in physical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in physical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Mouse sensitivity override (degrees per pixel of mouse travel)
    #[arg(long)]
    pub sensitivity: Option<f32>,

    /// Path to a JSON settings file
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}
