use std::sync::Arc;

use dioxus::prelude::{use_hook, use_signal, Signal};

use crate::config::AppConfig;
use crate::domain::entities::user::User;
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::table_pipeline::TablePipeline;

pub struct AppState {
    pub pipeline: Signal<TablePipeline>,
    pub search_input: Signal<String>,
    pub source_label: Signal<String>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let (users, source_label, status) = use_hook(|| initial_load(config));
        let page_size = config.page_size;

        Self {
            pipeline: use_signal(move || TablePipeline::new(users, page_size)),
            search_input: use_signal(String::new),
            source_label: use_signal(move || source_label),
            status: use_signal(move || status),
        }
    }
}

fn initial_load(config: &AppConfig) -> (Arc<[User]>, String, String) {
    let service = QueryService::new(config.user_source());
    let label = service.source_label();
    match service.load_users() {
        Ok(users) => {
            let status = format!("Loaded {} users", users.len());
            (users, label, status)
        }
        Err(err) => {
            tracing::warn!(error = %err, source = %label, "failed to load users");
            (Vec::new().into(), label, format!("Failed to load users: {err}"))
        }
    }
}
