use crate::config::GalleryConfig;
use crate::error::PortfolioError;
use crate::models::{GalleryView, ProjectRecord};
use std::collections::HashMap;

pub const DEFAULT_PROJECT_IMAGE: &str = "/projects/default-project.png";

// ─── Image table ───────────────────────────────────────────────────────────

/// Project id -> ordered screenshot list, with a default for unlisted ids.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryTable {
    entries: HashMap<String, Vec<String>>,
    default_images: Vec<String>,
}

impl GalleryTable {
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "1".to_string(),
            [
                "/projects/expense-tracker-dashboard.png",
                "/projects/expense-tracker-add.png",
                "/projects/expense-tracker-analytics.png",
                "/projects/expense-tracker-categories.png",
                "/projects/expense-tracker-reports.png",
                "/projects/expense-tracker-settings.png",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        );
        entries.insert(
            "2".to_string(),
            vec![
                "/projects/aquaguard-main.png".to_string(),
                "/projects/aquaguard-details.png".to_string(),
            ],
        );
        Self {
            entries,
            default_images: vec![DEFAULT_PROJECT_IMAGE.to_string()],
        }
    }

    /// Built-in entries overlaid with the configured ones.
    pub fn from_config(config: &GalleryConfig) -> Self {
        let mut table = Self::builtin();
        for (id, images) in &config.projects {
            if !images.is_empty() {
                table.entries.insert(id.clone(), images.clone());
            }
        }
        if !config.default_images.is_empty() {
            table.default_images = config.default_images.clone();
        }
        table
    }

    pub fn images_for(&self, project_id: &str) -> &[String] {
        self.entries
            .get(project_id)
            .unwrap_or(&self.default_images)
    }
}

impl Default for GalleryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ─── Navigator ─────────────────────────────────────────────────────────────

/// Cyclic cursor over a fixed, non-empty image list.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryNavigator {
    images: Vec<String>,
    index: usize,
}

impl GalleryNavigator {
    pub fn new(images: Vec<String>) -> Result<Self, PortfolioError> {
        if images.is_empty() {
            return Err(PortfolioError::validation("gallery needs at least one image"));
        }
        Ok(Self { images, index: 0 })
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.images.len();
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        self.index = (self.index + len - 1) % len;
    }

    pub fn select(&mut self, index: usize) -> Result<(), PortfolioError> {
        if index >= self.images.len() {
            return Err(PortfolioError::validation(format!(
                "image index {} out of range (0..{})",
                index,
                self.images.len()
            )));
        }
        self.index = index;
        Ok(())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current(&self) -> &str {
        &self.images[self.index]
    }

    pub fn show_controls(&self) -> bool {
        self.images.len() > 1
    }
}

// ─── Modal ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    ArrowRight,
    ArrowLeft,
    Escape,
}

impl GalleryKey {
    /// Map a DOM `KeyboardEvent.key` value. Unbound keys give `None`.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(GalleryKey::ArrowRight),
            "ArrowLeft" => Some(GalleryKey::ArrowLeft),
            "Escape" => Some(GalleryKey::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OpenGallery {
    project_id: String,
    title: String,
    navigator: GalleryNavigator,
}

/// The gallery modal. Holds a navigator only while open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    open: Option<OpenGallery>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `project`'s images and start at the first one, discarding any
    /// previously open gallery.
    pub fn open(&mut self, project: &ProjectRecord, table: &GalleryTable) -> Result<GalleryView, PortfolioError> {
        let navigator = GalleryNavigator::new(table.images_for(&project.id).to_vec())?;
        log::debug!(
            "Opening gallery for project {} ({} images)",
            project.id,
            navigator.len()
        );
        self.open = Some(OpenGallery {
            project_id: project.id.clone(),
            title: project.title.clone(),
            navigator,
        });
        self.view().ok_or_else(|| PortfolioError::internal("gallery failed to open"))
    }

    pub fn close(&mut self) {
        if let Some(g) = self.open.take() {
            log::debug!("Closed gallery for project {}", g.project_id);
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn next(&mut self) -> Option<GalleryView> {
        self.open.as_mut()?.navigator.next();
        self.view()
    }

    pub fn previous(&mut self) -> Option<GalleryView> {
        self.open.as_mut()?.navigator.previous();
        self.view()
    }

    pub fn select(&mut self, index: usize) -> Result<GalleryView, PortfolioError> {
        let g = self
            .open
            .as_mut()
            .ok_or_else(|| PortfolioError::validation("gallery is not open"))?;
        g.navigator.select(index)?;
        self.view().ok_or_else(|| PortfolioError::internal("gallery closed during select"))
    }

    /// Apply a key press. Ignored while closed. Returns the view after the
    /// key, or `None` when the gallery is (now) closed.
    pub fn handle_key(&mut self, key: GalleryKey) -> Option<GalleryView> {
        if !self.is_open() {
            return None;
        }
        match key {
            GalleryKey::ArrowRight => self.next(),
            GalleryKey::ArrowLeft => self.previous(),
            GalleryKey::Escape => {
                self.close();
                None
            }
        }
    }

    pub fn view(&self) -> Option<GalleryView> {
        let g = self.open.as_ref()?;
        let nav = &g.navigator;
        Some(GalleryView {
            project_id: g.project_id.clone(),
            title: g.title.clone(),
            images: nav.images().to_vec(),
            index: nav.index(),
            current: nav.current().to_string(),
            show_controls: nav.show_controls(),
            counter: format!("{} of {}", nav.index() + 1, nav.len()),
        })
    }
}
