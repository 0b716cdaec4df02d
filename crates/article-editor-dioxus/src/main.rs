use article_editor_config::Config;
use dioxus::prelude::*;
use std::env;
use std::process;

mod ui;

use ui::App;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("article-editor starting up!");
    log::info!("Config path: {}", Config::config_path().display());

    let mut config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // An optional first argument overrides the configured backend
    if let Some(backend_url) = env::args().nth(1) {
        log::info!("Using backend URL from CLI argument: {backend_url}");
        config.backend_url = backend_url;
    }

    log::info!("Backend: {}", config.backend_url);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .with_context(config)
        .launch(app_root);
}

fn app_root() -> Element {
    let config = use_context::<Config>();

    rsx! {
        App { config }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("Article editor")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
