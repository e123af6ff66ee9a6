//! Project catalog: one fetch per view, fallback records on any failure.

use crate::error::PortfolioError;
use crate::models::{CatalogState, ProjectRecord};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

pub const NOTICE_STORE_UNAVAILABLE: &str = "Using sample data - project store not available";
pub const NOTICE_CONNECTION_FAILED: &str = "Using sample data - project store connection failed";

/// Anything that can answer the catalog query.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, PortfolioError>;
}

fn utc(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Compiled-in records shown whenever the store cannot be read. Never empty.
pub fn fallback_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: "1".to_string(),
            title: "Smart Expense Tracker".to_string(),
            summary: "A comprehensive expense tracking application built with Python. \
                      Features intelligent categorization, expense analysis, and budget \
                      management with an intuitive user interface."
                .to_string(),
            tags: ["Python", "HTML", "CSS", "Data Analysis", "UI/UX"]
                .into_iter()
                .map(String::from)
                .collect(),
            year: 2024,
            image_url: "/projects/expense-tracker-dashboard.png".to_string(),
            demo_url: None,
            source_url: Some("https://github.com/AnilChettri/expense-tracker".to_string()),
            featured: true,
            created_at: utc(2024, 7, 1),
            updated_at: utc(2024, 8, 31),
        },
        ProjectRecord {
            id: "2".to_string(),
            title: "AquaGuard Water Management".to_string(),
            summary: "A water quality monitoring and management system that helps track \
                      water usage, quality metrics, and provides alerts for maintenance \
                      and optimization."
                .to_string(),
            tags: ["Python", "Data Monitoring", "IoT", "Analytics"]
                .into_iter()
                .map(String::from)
                .collect(),
            year: 2024,
            image_url: "/projects/aquaguard-main.png".to_string(),
            demo_url: None,
            source_url: Some("https://github.com/AnilChettri/aquaguard-system".to_string()),
            featured: true,
            created_at: utc(2024, 5, 15),
            updated_at: utc(2024, 6, 30),
        },
    ]
}

/// Turn the outcome of the catalog query into the settled view state.
///
/// An empty success is adopted as-is. Every failure is absorbed: the fallback
/// records are used and `error` carries a notice for the user.
pub fn resolve(result: Result<Vec<ProjectRecord>, PortfolioError>) -> CatalogState {
    match result {
        Ok(projects) => {
            log::info!("Loaded {} projects from store", projects.len());
            CatalogState {
                projects,
                loading: false,
                error: None,
            }
        }
        Err(e) => {
            log::warn!("Failed to fetch projects, using fallback data: {}", e);
            let notice = match e {
                PortfolioError::Remote { .. } => NOTICE_STORE_UNAVAILABLE,
                _ => NOTICE_CONNECTION_FAILED,
            };
            CatalogState {
                projects: fallback_projects(),
                loading: false,
                error: Some(notice.to_string()),
            }
        }
    }
}

/// Query `source` once and settle.
pub async fn load_projects(source: &dyn ProjectSource) -> CatalogState {
    resolve(source.fetch_projects().await)
}

/// Featured records in catalog order.
pub fn featured(projects: &[ProjectRecord]) -> Vec<ProjectRecord> {
    projects.iter().filter(|p| p.featured).cloned().collect()
}

/// What a `mount` call did with its fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Mounted {
    /// The query settled and the view now holds the result.
    Applied(CatalogState),
    /// The view was torn down while the query ran; the result was not applied.
    Discarded(CatalogState),
    /// This view had already issued its query.
    AlreadyFetched,
}

impl Mounted {
    /// The settled state, if this call applied one.
    pub fn applied(self) -> Option<CatalogState> {
        match self {
            Mounted::Applied(state) => Some(state),
            _ => None,
        }
    }
}

/// Catalog state owned by one mounted view.
///
/// The first `mount` runs the query; later calls are no-ops. After
/// `teardown` a response still in flight is dropped rather than applied.
pub struct CatalogView {
    state: Mutex<CatalogState>,
    fetch_started: AtomicBool,
    torn_down: AtomicBool,
}

impl CatalogView {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CatalogState::pending()),
            fetch_started: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    pub async fn mount(&self, source: &dyn ProjectSource) -> Mounted {
        if self.fetch_started.swap(true, Ordering::SeqCst) {
            log::debug!("Catalog already fetched for this view");
            return Mounted::AlreadyFetched;
        }

        let settled = load_projects(source).await;

        if self.torn_down.load(Ordering::SeqCst) {
            log::debug!("Catalog view torn down before fetch settled; dropping result");
            return Mounted::Discarded(settled);
        }

        let mut state = self.state.lock();
        *state = settled.clone();
        Mounted::Applied(settled)
    }

    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.lock().clone()
    }

    pub fn featured(&self) -> Vec<ProjectRecord> {
        featured(&self.state.lock().projects)
    }

    pub fn find(&self, project_id: &str) -> Option<ProjectRecord> {
        self.state
            .lock()
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}
