use crate::catalog::{CatalogView, Mounted, ProjectSource};
use crate::config::{Delivery, PortfolioConfig};
use crate::contact::{ContactController, ContactSender, SimulatedSender, StatusListener, StoreMessageSender};
use crate::error::PortfolioError;
use crate::gallery::{Gallery, GalleryTable};
use crate::models::CatalogState;
use crate::services::store::{RestStore, UnconfiguredStore};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct AppState {
    pub source: Arc<dyn ProjectSource>,
    pub catalog: Mutex<Arc<CatalogView>>,
    pub gallery: Mutex<Gallery>,
    pub gallery_table: GalleryTable,
    pub contact: ContactController,
}

impl AppState {
    /// Wire the components from configuration. Missing store credentials are
    /// not an error: the catalog then always serves its fallback records.
    pub fn from_config(
        config: &PortfolioConfig,
        listener: Option<StatusListener>,
    ) -> Result<Self, PortfolioError> {
        config.validate()?;

        let store = if config.store.is_configured() {
            Some(Arc::new(RestStore::new(&config.store)?))
        } else {
            log::warn!("Project store not configured; catalog will show sample data");
            None
        };

        let source: Arc<dyn ProjectSource> = match &store {
            Some(store) => store.clone(),
            None => Arc::new(UnconfiguredStore),
        };

        let sender: Arc<dyn ContactSender> = match (config.contact.delivery, &store) {
            (Delivery::Store, Some(store)) => Arc::new(StoreMessageSender::new(store.clone())),
            (Delivery::Store, None) => {
                return Err(PortfolioError::config(
                    "store delivery selected but the store is not configured",
                ))
            }
            (Delivery::Simulated, _) => Arc::new(SimulatedSender::new(
                config.contact.simulated_delay(),
                config.contact.recipient_name.clone(),
            )),
        };

        Ok(Self::new(
            source,
            sender,
            GalleryTable::from_config(&config.gallery),
            config.contact.status_reset(),
            listener,
        ))
    }

    pub fn new(
        source: Arc<dyn ProjectSource>,
        sender: Arc<dyn ContactSender>,
        gallery_table: GalleryTable,
        status_reset: std::time::Duration,
        listener: Option<StatusListener>,
    ) -> Self {
        Self {
            source,
            catalog: Mutex::new(Arc::new(CatalogView::new())),
            gallery: Mutex::new(Gallery::new()),
            gallery_table,
            contact: ContactController::with_listener(sender, status_reset, listener),
        }
    }

    /// Replace the catalog view with a fresh one, tearing down the previous
    /// view so its in-flight fetch cannot land.
    pub fn remount_catalog(&self) -> Arc<CatalogView> {
        let fresh = Arc::new(CatalogView::new());
        let previous = std::mem::replace(&mut *self.catalog.lock(), fresh.clone());
        previous.teardown();
        fresh
    }

    /// Mount a fresh catalog view and return its settled state. A load that
    /// is overtaken by a newer one still answers with its own settled result;
    /// only the newer view keeps it.
    pub async fn load_catalog(&self) -> CatalogState {
        let view = self.remount_catalog();
        match view.mount(self.source.as_ref()).await {
            Mounted::Applied(state) | Mounted::Discarded(state) => state,
            Mounted::AlreadyFetched => view.snapshot(),
        }
    }

    pub fn current_catalog(&self) -> Arc<CatalogView> {
        self.catalog.lock().clone()
    }

    /// The window is going away: drop pending work and close the gallery.
    pub fn teardown(&self) {
        self.current_catalog().teardown();
        self.gallery.lock().close();
        self.contact.teardown();
        log::info!("Portfolio view torn down");
    }
}
