//! Lesson Lab Backend - Main Entry Point
//!
//! Starts the web API server for the classroom lab.

use lab_server::{api::run_server, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("[SERVER] Exercises directory: {}", config.exercises_dir.display());

    run_server(config).await
}
