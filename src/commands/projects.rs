use crate::models::{CatalogState, ProjectRecord};
use crate::state::AppState;
use tauri::State;

/// Called by the projects section when it mounts. Starts a fresh view, so a
/// fetch still running for an earlier mount is discarded.
#[tauri::command]
pub async fn load_projects(state: State<'_, AppState>) -> Result<CatalogState, String> {
    Ok(state.load_catalog().await)
}

#[tauri::command]
pub fn get_catalog(state: State<AppState>) -> CatalogState {
    state.current_catalog().snapshot()
}

#[tauri::command]
pub fn get_featured_projects(state: State<AppState>) -> Vec<ProjectRecord> {
    state.current_catalog().featured()
}
