use axum::serve;
use pokedex_api::api::routes::create_router;
use pokedex_api::config::AppConfig;
use pokedex_api::seed;
use pokedex_api::store::JsonFileStore;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new().filter_level(LevelFilter::Info).init();

    println!("Pokedex API: file-backed record server");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    let storage_path = config.storage_path();
    println!("Collection file: {}", storage_path.display());
    let store = Arc::new(JsonFileStore::new(storage_path));

    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        seed::load_seed_data(&*store).await?;
        println!("Seed data loaded successfully");
    }

    run_server(create_router().with_state(store), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Pokedex API server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
