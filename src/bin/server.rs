use std::{fs::OpenOptions, net::SocketAddr, process::exit, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use reqwest::Url;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use household_ledger::{AppState, GatewayConfig, build_router, graceful_shutdown, logging_middleware};

/// The web server for the 朱羅 household ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database backing the local store.
    #[arg(long, env = "LEDGER_STORE_PATH")]
    store_path: String,

    /// URL of the spreadsheet endpoint. Leave unset or empty to keep
    /// transactions in the local store.
    #[arg(long, env = "LEDGER_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// The port to serve the app from.
    #[arg(short, long, env = "LEDGER_PORT", default_value_t = 3000)]
    port: u16,

    /// The canonical timezone used for today's date, e.g. "Asia/Taipei".
    #[arg(long, env = "LEDGER_TIMEZONE", default_value = "Asia/Taipei")]
    timezone: String,

    /// How long a request to the endpoint may take, in seconds.
    #[arg(long, default_value_t = 15)]
    request_timeout_secs: u64,

    /// File path for the debug log.
    #[arg(long, default_value = "debug.log")]
    log_path: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let endpoint_url = match args.endpoint_url.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(url) => match Url::parse(url) {
            Ok(url) => Some(url),
            Err(error) => {
                eprintln!("Invalid endpoint URL {url:?}: {error}");
                exit(1);
            }
        },
    };

    let gateway_config = GatewayConfig {
        endpoint_url,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    };

    let conn = Connection::open(&args.store_path).unwrap_or_else(|error| {
        eprintln!("Could not open the store at {}: {error}", args.store_path);
        exit(1);
    });

    let state = AppState::new(conn, &args.timezone, gateway_config).unwrap_or_else(|error| {
        eprintln!("Could not initialize the store: {error}");
        exit(1);
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state).layer(middleware::from_fn(logging_middleware)),
    );

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        exit(1);
    }
}

fn setup_logging(log_path: &str) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("household_ledger=debug,server=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_log.with_filter(filter::LevelFilter::INFO))
        .with(debug_log.with_filter(filter::LevelFilter::DEBUG))
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
