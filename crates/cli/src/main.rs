use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crownwatch_core::GatewayConfig;
use crownwatch_geo::GeoClient;
use crownwatch_service::{CrownService, ImageService, ObservationService};
use crownwatch_store::DocStore;

mod commands;

#[derive(Parser)]
#[command(name = "crownwatch")]
#[command(about = "Backend gateway for satellite imagery and tree-crown phenology observations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway.
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Print metadata of the archive image for a date.
    Image { date: String },
    /// Print the styled crown features for a date.
    Crowns { date: String },
    /// Print the plant-record global IDs for a date.
    GlobalIds { date: String },
}

/// Fully initialized service layer, built once per process.
pub(crate) struct Services {
    pub images: ImageService,
    pub crowns: CrownService,
    pub observations: Arc<ObservationService>,
}

/// Single startup initialization: load credentials, authenticate the
/// geospatial client, and wire the services. Replaces the old pattern of
/// re-authenticating and re-resolving collections on every request.
pub(crate) async fn init_services(config: &GatewayConfig) -> Result<Services> {
    let mut geo = GeoClient::new(
        &config.geo_service_url,
        &config.geo_project_id,
        &config.geo_service_account,
        &config.geo_service_account_json,
    )?;
    geo.authenticate().await;
    let geo = Arc::new(geo);

    let store = Arc::new(DocStore::new(&config.docstore_url, &config.docstore_credentials)?);
    let observations = Arc::new(ObservationService::new(store));

    Ok(Services {
        images: ImageService::new(Arc::clone(&geo), config.image_collection.clone()),
        crowns: CrownService::new(
            geo,
            Arc::clone(&observations),
            config.crowns.clone(),
            config.labels.clone(),
        ),
        observations,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = GatewayConfig::from_env()?;

    match cli.command {
        Commands::Serve { port, host } => {
            commands::serve::run(&config, port, host).await?;
        },
        Commands::Image { date } => {
            let services = init_services(&config).await?;
            let info = services.images.image_info(&date).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        },
        Commands::Crowns { date } => {
            let services = init_services(&config).await?;
            let styled = services.crowns.styled_crowns(&date).await?;
            println!("{}", serde_json::to_string_pretty(&styled)?);
        },
        Commands::GlobalIds { date } => {
            let services = init_services(&config).await?;
            let ids = services.observations.global_ids_by_date(&date).await?;
            println!("{}", serde_json::to_string_pretty(&ids)?);
        },
    }

    Ok(())
}
