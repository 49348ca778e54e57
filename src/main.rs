use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use spa_server::config::{AppState, Config};
use spa_server::logger;
use spa_server::server::{self, signal::SignalHandler};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    // Runtime thread count follows the workers config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind failure (port already in use) is fatal before serving anything
    let listener = server::create_listener(addr)?;

    // Misconfiguration is surfaced early but not fatal; request handling
    // stays authoritative
    cfg.spa.warn_if_missing();

    let state = Arc::new(AppState::new(&cfg));
    let signals = Arc::new(SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &cfg);

    let active_connections = Arc::new(AtomicUsize::new(0));
    server::start_server_loop(
        listener,
        state,
        active_connections,
        Arc::clone(&signals.shutdown),
    )
    .await
}
