use std::sync::Arc;

use pokesite::config::{self, AppState, Config};
use pokesite::db::Store;
use pokesite::error::StartupError;
use pokesite::logger;
use pokesite::server;

fn main() {
    if let Err(e) = run() {
        logger::log_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), StartupError> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;

    logger::init(&cfg).map_err(StartupError::Logger)?;
    cfg.check_site()?;

    let store = Store::open(&cfg.database.path).map_err(|source| StartupError::Database {
        path: cfg.database.path.clone(),
        source,
    })?;

    // One serving thread; SQLite work goes to the blocking pool
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    let local = tokio::task::LocalSet::new();
    runtime.block_on(local.run_until(async_main(cfg, store)))
}

async fn async_main(cfg: Config, store: Store) -> Result<(), StartupError> {
    if cfg.database.initialize {
        let rows = store.initialize().await.map_err(StartupError::Schema)?;
        logger::log_database_initialized(rows);
    }

    let addr = cfg.get_socket_addr();
    let listener =
        server::create_listener(addr).map_err(|source| StartupError::Bind { addr, source })?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(cfg, store));
    server::run(listener, state, server::shutdown_signal()).await;
    Ok(())
}
