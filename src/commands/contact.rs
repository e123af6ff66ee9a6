use crate::models::{ContactField, ContactFormView, FormStatus};
use crate::state::AppState;
use tauri::State;

pub const EVENT_CONTACT_STATUS: &str = "contact-status-changed";

#[tauri::command]
pub fn get_contact_form(state: State<AppState>) -> ContactFormView {
    state.contact.view()
}

#[tauri::command]
pub fn update_contact_field(
    state: State<AppState>,
    field: ContactField,
    value: String,
) -> ContactFormView {
    state.contact.set_field(field, value)
}

/// Resolves once the message is sent or rejected. The later reset to idle
/// arrives as a `contact-status-changed` event.
#[tauri::command]
pub async fn submit_contact(state: State<'_, AppState>) -> Result<FormStatus, String> {
    Ok(state.contact.submit().await)
}
