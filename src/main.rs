use clap::Parser;
use dotenvy::dotenv;
use menu_desk::{
    cli::{self, Cli, Command},
    client::{DishBackend, http::HttpDishClient},
    config::{self, AppConfig, BackendKind},
    core::board::MenuBoard,
    errors::Result,
    store::LocalDishStore,
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn build_backend(app_config: &AppConfig) -> Result<Arc<dyn DishBackend>> {
    match app_config.backend {
        BackendKind::Http => {
            let base_url = app_config.api_base_url()?;
            // Read directly before use, never kept in AppConfig
            let token = env::var("MENU_API_TOKEN").ok();
            if token.is_none() {
                info!("MENU_API_TOKEN not set, sending requests without a bearer token");
            }
            Ok(Arc::new(HttpDishClient::new(base_url, token)?))
        }
        BackendKind::Local => {
            let store = LocalDishStore::connect(&app_config.store.database_url).await?;
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let args = Cli::parse();

    // Catalog listings need neither settings nor a backend
    if let Command::Catalog { kind } = args.command {
        println!("{}", cli::commands::general::catalog(kind));
        return Ok(());
    }

    // 3. Load settings, then apply environment and flag overrides
    let mut app_config = match &args.config {
        Some(path) => {
            let mut app_config = config::load_config(path)?;
            app_config.apply_env()?;
            app_config
        }
        None => config::load_default_config()?,
    };
    if let Some(outlet_id) = args.outlet {
        app_config.outlet.id = Some(outlet_id);
    }
    let outlet_id = app_config
        .outlet_id()
        .inspect_err(|e| error!("{}", e))?;

    // 4. Connect the backend and load the menu
    let backend = build_backend(&app_config)
        .await
        .inspect_err(|e| error!("Failed to set up the {} backend: {}", app_config.backend, e))?;
    let board = MenuBoard::load(backend, outlet_id, app_config.menu.lifecycle)
        .await
        .inspect(|_| info!("Menu for outlet {} loaded", outlet_id))
        .inspect_err(|e| error!("Failed to load the menu: {}", e))?;

    // 5. Run the command
    let reply = cli::run(args.command, &board).await?;
    println!("{reply}");
    Ok(())
}
