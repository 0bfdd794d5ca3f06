// Packages
use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weather_page::{
    PageView, Renderer, WeatherService, load_config,
    server::{self, AppState},
};

/// OpenWeather lookup for one city, rendered as an embeddable HTML page.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to YAML config. Search order if not given:
    /// $WEATHER_PAGE_CONFIG, ./config/weather-page.yaml, ./config.yaml,
    /// ~/.config/weather-page/config.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one city and write the result.
    Show {
        /// City name, optionally "City, Country".
        city: String,

        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Write here. If omitted, output goes to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Serve the host page with the city form.
    Serve {
        /// Listen address; overrides server.bind from the config.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Display document only
    Html,
    /// Display bundle as pretty JSON
    Json,
    /// Host page with the document embedded
    Page,
}

/* ============================ Main ============================ */

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "weather_page=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let cfg = load_config(args.config)?;

    let service = WeatherService::new(&cfg.openweather)?;
    let renderer = Renderer::new(&cfg.openweather.icon_base_url)?;

    match args.command {
        Command::Show { city, format, out } => {
            let city = city.trim();
            if city.is_empty() {
                bail!("City name is empty");
            }

            let output = match service.lookup(city).await {
                Ok(bundle) => match format {
                    Format::Html => renderer.render_document(&bundle)?,
                    Format::Json => serde_json::to_string_pretty(&bundle)?,
                    Format::Page => renderer.render_page(&PageView::Display { city, bundle: &bundle })?,
                },
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    return Ok(ExitCode::FAILURE);
                }
            };

            if let Some(path) = out {
                std::fs::write(&path, output)
                    .with_context(|| format!("writing {}", path.display()))?;
            } else {
                println!("{output}");
            }
        }
        Command::Serve { bind } => {
            let bind = bind.unwrap_or(cfg.server.bind);
            let state = Arc::new(AppState { service, renderer });
            server::run(&bind, state).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
