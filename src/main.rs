use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use siftchat::config::AppConfig;
use siftchat::db;
use siftchat::llm::{DeploymentProvider, LlmProvider};
use siftchat::search::{SearchClient, SearchProvider};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "siftchat", version, about = "Search-augmented chat completion server", long_about = None)]
struct Cli {
    /// Override the config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "healthy"}))
}

async fn composer() -> impl Responder {
    let html = include_str!("../static/composer.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!("Starting Siftchat server...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let db_pool = match db::get_connection(&config.database) {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let search: Arc<dyn SearchProvider> = Arc::new(SearchClient::new(&config.search));
    let llm: Arc<dyn LlmProvider> = Arc::new(DeploymentProvider::new(&config.llm));

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(search.clone()))
            .app_data(web::Data::new(llm.clone()))
            .route("/", web::get().to(composer))
            .route("/health", web::get().to(health))
            .configure(siftchat::api::routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
