use digital_club_notifier::environment::Environment;
use digital_club_notifier::shutdown::Shutdown;
use digital_club_notifier_worker::routes::Routes;
use digital_club_notifier_worker::state::AppState;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::log::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use wg::WaitGroup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let rust_log = Environment::string("RUST_LOG", "INFO,lettre=WARN,reqwest=WARN");
    env::set_var("RUST_LOG", rust_log);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(Box::new(tracing_subscriber::fmt::layer().with_writer(non_blocking)))
        .init();

    info!("Starting...");

    let wait_group = WaitGroup::new();

    let app_state = AppState::from_env()?;

    tokio::spawn(init_http_server(app_state, wait_group.add(1)));

    wait_group.wait();

    info!("Stopped!");

    Ok(())
}

async fn init_http_server(
    app_state: AppState,
    wait_group: WaitGroup,
) {
    info!("Starting http server...");
    let routes = Routes::routes(&app_state);

    let port = Environment::u16("WORKER_PORT", 9095);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    match TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Running http server on port {port}...");
            if let Err(error) = axum::serve(listener, routes).with_graceful_shutdown(Shutdown::signal("Stopping http server...")).await {
                error!("Http server failed: {error}");
            }
        },
        Err(error) => error!("Failed to bind port {port}: {error}"),
    }

    wait_group.done();

    info!("Http server stopped!");
}
