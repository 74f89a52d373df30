mod db;
mod errors;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;

use actix_web::{web, App, HttpServer};
use std::env;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🔌 Connexion à la base de données...");
    let db = db::establish_connection()
        .await
        .expect("Failed to connect to database");
    tracing::info!("✅ Base de données connectée !");

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    tracing::info!("🚀 Démarrage du serveur sur http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db.clone()))
            .configure(routes::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
