use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;

use crate::config::AppConfig;
use crate::domain::entities::table::{RoleFilter, SortColumn, SortSpec};
use crate::domain::entities::user::User;
use crate::infra::source::csv::CsvUserSource;
use crate::ui::hooks::debounce::use_debounced;
use crate::ui::state::app_state::AppState;
use crate::usecase::services::query_service::QueryService;

pub fn root_container_style() -> &'static str {
    "display: flex; flex-direction: column; height: 100vh; box-sizing: border-box; padding: 16px; gap: 12px; font-family: sans-serif;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 8px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; background: #f7f7f7; padding: 8px 12px; text-align: left; font-size: 12px; text-transform: uppercase; color: #666; cursor: pointer; user-select: none; border-bottom: 1px solid #ddd;"
}

pub fn table_cell_style() -> &'static str {
    "padding: 8px 12px; border-bottom: 1px solid #eee; white-space: nowrap;"
}

/// Header text with the direction marker on the active column.
pub fn header_label(column: SortColumn, sort: SortSpec) -> String {
    if sort.column == column {
        format!("{} {}", column.label(), sort.direction.marker())
    } else {
        column.label().to_string()
    }
}

pub fn page_label(current_page: usize, total_pages: usize) -> String {
    format!("Page {current_page} of {total_pages}")
}

pub fn cell_text(user: &User, column: SortColumn) -> String {
    match column {
        SortColumn::Id => user.id.to_string(),
        SortColumn::Name => user.name.clone(),
        SortColumn::Email => user.email.clone(),
        SortColumn::Role => user.role.to_string(),
        SortColumn::Status => user.status.to_string(),
        SortColumn::JoinDate => user.join_date.format("%Y-%m-%d").to_string(),
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();

    let AppState {
        mut pipeline,
        mut search_input,
        mut source_label,
        mut status,
    } = AppState::new(&config);

    let debounced_search = use_debounced(search_input, config.debounce());
    use_effect(move || {
        let term = debounced_search();
        pipeline.write().apply_debounced_search(term);
    });

    let (
        rows,
        search_text,
        sort,
        role_filter,
        current_page,
        total_pages,
        filtered_count,
        has_previous,
        has_next,
    ) = {
        let snapshot = pipeline.read();
        let view = snapshot.view();
        let rows: Vec<User> = view.rows.iter().map(|user| (*user).clone()).collect();
        (
            rows,
            view.search_input.to_string(),
            view.sort,
            view.role_filter,
            view.current_page,
            view.total_pages,
            view.filtered_count,
            view.has_previous,
            view.has_next,
        )
    };

    rsx! {
        div { style: "{root_container_style()}",
            div {
                style: "display: flex; gap: 12px; align-items: center;",
                input {
                    style: "flex: 1; padding: 8px 12px; border: 1px solid #ccc; border-radius: 8px;",
                    r#type: "text",
                    placeholder: "Search by name or email",
                    value: "{search_text}",
                    oninput: move |event| {
                        let text = event.value();
                        pipeline.write().set_search_input(text.clone());
                        search_input.set(text);
                    },
                }
                button {
                    onclick: move |_| {
                        let Some(path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .pick_file()
                        else {
                            return;
                        };
                        let service = QueryService::new(Arc::new(CsvUserSource::new(path)));
                        match service.load_users() {
                            Ok(users) => {
                                let count = users.len();
                                pipeline.write().replace_users(users);
                                source_label.set(service.source_label());
                                status.set(format!("Loaded {count} users"));
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "csv load failed");
                                status.set(format!("Failed to load users: {err}"));
                            }
                        }
                    },
                    "Open CSV"
                }
            }

            RoleFilterBar {
                selected: role_filter,
                on_select: move |next: RoleFilter| pipeline.write().set_role_filter(next),
            }

            div { style: "{table_container_style()}",
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        tr {
                            for column in SortColumn::ALL {
                                th {
                                    key: "{column.label()}",
                                    style: "{table_header_cell_style()}",
                                    onclick: move |_| pipeline.write().toggle_sort(column),
                                    "{header_label(column, sort)}"
                                }
                            }
                        }
                    }
                    tbody {
                        for user in rows.iter() {
                            tr { key: "{user.id}",
                                for column in SortColumn::ALL {
                                    td { style: "{table_cell_style()}", "{cell_text(user, column)}" }
                                }
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; align-items: center; justify-content: space-between;",
                button {
                    disabled: !has_previous,
                    onclick: move |_| {
                        pipeline.write().previous_page();
                    },
                    "Previous"
                }
                span { "{page_label(current_page, total_pages)} ({filtered_count} users)" }
                button {
                    disabled: !has_next,
                    onclick: move |_| {
                        pipeline.write().next_page();
                    },
                    "Next"
                }
            }

            div { style: "color: #666; font-size: 12px;", "{source_label()}: {status()}" }
        }
    }
}

#[component]
fn RoleFilterBar(selected: RoleFilter, on_select: EventHandler<RoleFilter>) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 16px; padding: 12px; background: #f7f7f7; border-radius: 8px;",
            for option in RoleFilter::options() {
                label {
                    key: "{option}",
                    style: "display: flex; align-items: center; gap: 6px; cursor: pointer;",
                    input {
                        r#type: "radio",
                        name: "role-filter",
                        checked: selected == option,
                        onchange: move |_| on_select.call(option),
                    }
                    span { "{option.label()}" }
                }
            }
        }
    }
}
