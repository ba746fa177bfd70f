//! App Core for Linkstash.
//!
//! Central struct wiring the database, settings, auth, and the per-user
//! link store. The store is constructed when a user signs in (with a
//! freshly loaded link list) and dropped on sign-out, so link state always
//! has an explicit owner and lifecycle.

use std::sync::Arc;

use crate::database::connection::Database;
use crate::managers::link_manager::LinkManager;
use crate::services::auth_service::{AuthService, AuthServiceTrait};
use crate::services::link_store::LinkStore;
use crate::services::metadata_extractor::{MetadataExtractor, MetadataSource};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::AuthError;
use crate::types::user::User;

/// Central application struct holding the shared services and the
/// signed-in user's link store.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub auth: AuthService,
    pub extractor: MetadataExtractor,
    store: Option<LinkStore<LinkManager>>,
}

impl App {
    /// Creates a new App, initializing the database and services.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_settings_path(db_path, None)
    }

    /// Like [`App::new`] but with an explicit settings file path, so tests
    /// never touch the real config directory.
    pub fn with_settings_path(
        db_path: &str,
        settings_path: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);
        let auth = AuthService::new(db.clone());

        let mut settings_engine = SettingsEngine::new(settings_path);
        let _ = settings_engine.load();

        let source = MetadataSource::from_settings(&settings_engine.get_settings().metadata);
        let extractor = MetadataExtractor::with_source(source);

        Ok(Self {
            db,
            settings_engine,
            auth,
            extractor,
            store: None,
        })
    }

    /// Signs a user in and builds their link store, pre-loaded.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.auth.sign_in(email, password)?;
        self.open_store(&user.id);
        Ok(user)
    }

    /// Registers a user; on success they are signed in with an empty store.
    pub fn sign_up(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.auth.sign_up(email, password)?;
        self.open_store(&user.id);
        Ok(user)
    }

    /// Signs out and tears the link store down.
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.store = None;
        self.auth.sign_out()
    }

    fn open_store(&mut self, owner_id: &str) {
        let repo = LinkManager::new(self.db.clone());
        let mut store = LinkStore::new(repo, self.extractor.clone(), owner_id);
        store.set_view_mode(self.settings_engine.get_settings().general.default_view);
        store.load();
        self.store = Some(store);
    }

    /// The signed-in user's store, if any.
    pub fn store(&self) -> Option<&LinkStore<LinkManager>> {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> Option<&mut LinkStore<LinkManager>> {
        self.store.as_mut()
    }
}
