use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use terra::Theme;
use terra::core::config::{self, CliOverrides, TerraConfig};

#[derive(Parser)]
#[command(name = "terra", about = "Browse the countries of the world from the terminal")]
struct Args {
    /// Local JSON file loaded before the API responds
    #[arg(long = "data")]
    data: Option<String>,

    /// Countries API endpoint
    #[arg(long)]
    api_url: Option<String>,

    /// Color theme (overrides the saved preference)
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to terra.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("terra.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            TerraConfig::default()
        }
    };
    let cli = CliOverrides {
        data_file: args.data,
        api_url: args.api_url,
        theme: args.theme,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Terra starting up (data: {}, api: {})",
        resolved.data_file.display(),
        resolved.api_url
    );

    terra::tui::run(resolved)
}
