use std::rc::Rc;
use std::sync::OnceLock;

use api::{CommandChannel, HandlerChannel, HttpChannel};
use dioxus::prelude::*;
use store::config::BackendConfig;
use store::RustyfinConfig;
use tracing_subscriber::EnvFilter;
use views::Login;

mod config;
mod views;

static CONFIG: OnceLock<RustyfinConfig> = OnceLock::new();

fn main() {
    let (config, warnings) = config::load();
    init_tracing(&config.log.filter);
    for warning in warnings {
        tracing::warn!("{warning}; using defaults");
    }

    tracing::info!("Commands go to {}", config.backend.base_url);
    let _ = CONFIG.set(config);

    dioxus::launch(App);
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Must run before dioxus::launch, whose default logger skips setup once a
    // global subscriber exists
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// HTTP when a backend is configured, otherwise a non-recording channel with no
/// handlers, which rejects everything.
fn make_channel(backend: &BackendConfig) -> Rc<dyn CommandChannel> {
    if backend.base_url.trim().is_empty() {
        tracing::warn!("No backend configured, commands will be rejected");
        Rc::new(HandlerChannel::new())
    } else {
        Rc::new(HttpChannel::from_config(backend))
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let config = CONFIG.get_or_init(RustyfinConfig::default);
        Rc::new(ui::Panel::new(make_channel(&config.backend)))
    });

    rsx! {
        document::Title { "Rustyfin" }
        Login {}
    }
}
