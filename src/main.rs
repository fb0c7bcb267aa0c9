use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use chrono::Utc;
use customer_loyalty::config::{Config, LogFormat};
use customer_loyalty::db::{schema, seed};
use customer_loyalty::middleware::RequestId;
use customer_loyalty::modules;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!("Starting customer loyalty service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Storage: {}", config.database.describe());
    tracing::info!(
        window_days = config.loyalty.window_days,
        threshold = %config.loyalty.threshold,
        "Loyalty report settings"
    );

    let database = config.database.connect().await?;
    schema::ensure_schema(&database).await?;

    if config.app.seed_demo_data {
        let outcome = seed::seed_demo_data(&database, Utc::now().naive_utc()).await?;
        tracing::info!("Seed outcome: {:?}", outcome);
    }

    let db_data = web::Data::new(database);
    let loyalty_data = web::Data::new(config.loyalty.clone());

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .app_data(db_data.clone())
            .app_data(loyalty_data.clone())
            .configure(modules::configure)
            .default_service(web::route().to(modules::not_found))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("customer_loyalty={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
