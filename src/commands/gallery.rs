use crate::error::{to_cmd_err, CmdResult, PortfolioError};
use crate::gallery::GalleryKey;
use crate::models::GalleryView;
use crate::state::AppState;
use tauri::State;

#[tauri::command]
pub fn open_gallery(state: State<AppState>, project_id: String) -> CmdResult<GalleryView> {
    let project = state
        .current_catalog()
        .find(&project_id)
        .ok_or_else(|| {
            to_cmd_err(PortfolioError::validation(format!(
                "Unknown project: {}",
                project_id
            )))
        })?;

    state
        .gallery
        .lock()
        .open(&project, &state.gallery_table)
        .map_err(to_cmd_err)
}

#[tauri::command]
pub fn close_gallery(state: State<AppState>) {
    state.gallery.lock().close();
}

#[tauri::command]
pub fn get_gallery(state: State<AppState>) -> Option<GalleryView> {
    state.gallery.lock().view()
}

#[tauri::command]
pub fn gallery_next(state: State<AppState>) -> Option<GalleryView> {
    state.gallery.lock().next()
}

#[tauri::command]
pub fn gallery_previous(state: State<AppState>) -> Option<GalleryView> {
    state.gallery.lock().previous()
}

#[tauri::command]
pub fn gallery_select(state: State<AppState>, index: usize) -> CmdResult<GalleryView> {
    state.gallery.lock().select(index).map_err(to_cmd_err)
}

/// Forward a `KeyboardEvent.key` from the modal. Unbound keys leave the
/// gallery as it is. Returns `null` once the gallery is closed.
#[tauri::command]
pub fn gallery_key(state: State<AppState>, key: String) -> Option<GalleryView> {
    let mut gallery = state.gallery.lock();
    match GalleryKey::from_key_name(&key) {
        Some(k) => gallery.handle_key(k),
        None => gallery.view(),
    }
}
