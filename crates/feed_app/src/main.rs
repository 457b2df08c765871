mod app;
mod effects;
mod logging;
mod render;

use feed_logging::feed_error;

fn main() {
    // The console renderer owns stdout, so diagnostics go to a file.
    logging::initialize(logging::LogDestination::File);

    let base_url = std::env::var("KNOWLEDGE_FEED_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    if let Err(err) = app::run(base_url) {
        feed_error!("Client startup failed: {}", err);
        eprintln!("knowledge-feed: {err}");
        std::process::exit(1);
    }
}
