use crate::catalog::Catalog;
use crate::session::SessionManager;
use std::time::Duration;

mod api;
mod catalog;
mod error;
mod game;
mod session;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let Ok(Ok(port)) = std::env::var("PORT").map(|s| s.parse::<u16>()) else {
        log::error!("port is unspecified or is invalid");
        return;
    };

    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "timesup_db".to_string());
    let db = match sled::open(&db_path) {
        Ok(db) => db,
        Err(err) => {
            log::error!("Could not open database at {}: {}", db_path, err);
            return;
        }
    };

    let catalog = match Catalog::load() {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("Could not load the card catalog: {:#}", err);
            return;
        }
    };

    let manager = match SessionManager::new(db, catalog) {
        Ok(manager) => manager,
        Err(err) => {
            log::error!("Could not restore game sessions: {:#}", err);
            return;
        }
    };
    let manager: &'static SessionManager = Box::leak(Box::new(manager));

    tokio::spawn(async {
        let mut interval = tokio::time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            manager.purge_games();
        }
    });

    let listener = api::listen(port).await;
    let router = api::make_router(manager);
    if let Err(err) = axum::serve(listener, router).await {
        log::error!("Server exited with an error: {}", err);
    }
}
