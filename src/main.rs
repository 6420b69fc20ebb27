//! Loan Desk Frontend Entry Point

use std::sync::Arc;

use leptos::prelude::*;
use loan_desk_ui::api::{ApiClient, BrowserSession};
use loan_desk_ui::app::App;
use loan_desk_ui::config::AppConfig;
use loan_desk_ui::logging;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_window();
    logging::init(config.log_level());

    let session = Arc::new(BrowserSession::new(config.login_route.clone()));
    match ApiClient::new(config.api_base(), session) {
        Ok(api) => {
            log::info!(target: "APP", "starting against {}", config.api_base());
            mount_to_body(move || view! { <App api=api config=config /> });
        }
        Err(err) => {
            log::error!(target: "APP", "cannot start: {}", err);
            mount_to_body(move || view! { <p class="startup-error">{format!("Configuration error: {}", err)}</p> });
        }
    }
}
