use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Projects ──────────────────────────────────────────────────────────────

/// One row of the remote `projects` table. Owned by the store; never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub year: i32,
    pub image_url: String,
    pub demo_url: Option<String>,
    pub source_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Catalog ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogState {
    /// Server order (featured first, then newest year) or the fallback list.
    pub projects: Vec<ProjectRecord>,
    pub loading: bool,
    /// Informational notice shown when sample data replaced the remote rows.
    pub error: Option<String>,
}

impl CatalogState {
    /// State of a freshly mounted view, before the fetch settles.
    pub fn pending() -> Self {
        CatalogState {
            projects: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

// ─── Gallery ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryView {
    pub project_id: String,
    pub title: String,
    pub images: Vec<String>,
    pub index: usize,
    pub current: String,
    /// Previous/next buttons and thumbnails only make sense with several images.
    pub show_controls: bool,
    /// e.g. "2 of 6"
    pub counter: String,
}

// ─── Contact Form ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactField::Name => write!(f, "name"),
            ContactField::Email => write!(f, "email"),
            ContactField::Message => write!(f, "message"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormStatus {
    #[serde(rename = "type")]
    pub kind: StatusKind,
    pub message: String,
    /// Set when the error comes from validating a specific field.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<ContactField>,
}

impl FormStatus {
    pub fn idle() -> Self {
        FormStatus {
            kind: StatusKind::Idle,
            message: String::new(),
            field: None,
        }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        FormStatus {
            kind: StatusKind::Loading,
            message: message.into(),
            field: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        FormStatus {
            kind: StatusKind::Success,
            message: message.into(),
            field: None,
        }
    }

    pub fn error(message: impl Into<String>, field: Option<ContactField>) -> Self {
        FormStatus {
            kind: StatusKind::Error,
            message: message.into(),
            field,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StatusKind::Success | StatusKind::Error)
    }
}

impl Default for FormStatus {
    fn default() -> Self {
        FormStatus::idle()
    }
}

/// Snapshot of the form as handed to a sender. Fields are already trimmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Snapshot of the whole form for the webview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactFormView {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: FormStatus,
}
