pub mod catalog;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod models;
pub mod services;
pub mod state;

#[cfg(feature = "desktop")]
pub fn run() {
    use crate::config::PortfolioConfig;
    use crate::contact::StatusListener;
    use crate::models::FormStatus;
    use crate::state::AppState;
    use std::sync::Arc;
    use tauri::{Emitter, Manager};

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Configuration lives at ~/.portfolio/config.toml
            let config_path = PortfolioConfig::default_path()?;
            let config = match PortfolioConfig::load(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Failed to load config from {:?}: {}", config_path, e);
                    return Err(Box::new(e));
                }
            };

            let app_handle = app.handle().clone();
            let listener: StatusListener = Arc::new(move |status: &FormStatus| {
                if let Err(e) = app_handle.emit(commands::contact::EVENT_CONTACT_STATUS, status) {
                    log::warn!("Failed to emit contact status: {}", e);
                }
            });

            let state = AppState::from_config(&config, Some(listener))?;
            app.manage(state);
            log::info!("Portfolio state initialized");
            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                if let Some(state) = window.try_state::<AppState>() {
                    state.teardown();
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            // Projects
            commands::projects::load_projects,
            commands::projects::get_catalog,
            commands::projects::get_featured_projects,
            // Gallery
            commands::gallery::open_gallery,
            commands::gallery::close_gallery,
            commands::gallery::get_gallery,
            commands::gallery::gallery_next,
            commands::gallery::gallery_previous,
            commands::gallery::gallery_select,
            commands::gallery::gallery_key,
            // Contact
            commands::contact::get_contact_form,
            commands::contact::update_contact_field,
            commands::contact::submit_contact,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
