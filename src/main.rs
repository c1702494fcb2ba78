use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{project_dirs, AppConfig};

mod app;
mod config;
mod domain {
    pub mod entities {
        pub mod table;
        pub mod user;
    }
    pub mod pipeline {
        pub mod filter;
        pub mod paginate;
        pub mod sort;
    }
}
mod infra {
    pub mod source {
        pub mod csv;
        pub mod generated;
    }
}
mod platform {
    pub mod debounce;
}
mod ui {
    pub mod hooks {
        pub mod debounce;
    }
    pub mod state {
        pub mod app_state;
    }
}
mod usecase {
    pub mod ports {
        pub mod source;
    }
    pub mod services {
        pub mod query_service;
        pub mod table_pipeline;
    }
}


fn main() -> Result<()> {
    let config_path = AppConfig::default_path()?;
    let config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    init_tracing(&config);
    tracing::info!(path = %config_path.display(), ?config, "resolved configuration");

    let webview_data_dir = default_webview_data_dir()?;

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Users"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(App);
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs().ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}
