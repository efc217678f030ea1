use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::client::{AuthOps, BookingOps, NotificationOps, RoomOps};
use crate::config::Config;
use crate::http::ApiClient;
use crate::poller::BadgePoller;
use crate::session::SessionContext;
use crate::storage::{FileStore, KeyValueStore};
use crate::Result;

/// Entry point: config, session and backend access for one data directory.
pub struct Roomflow {
    data_dir: PathBuf,
    config: Config,
    api: ApiClient,
}

impl Roomflow {
    /// Open the data directory: read `config.toml` (plus env overrides) and
    /// restore the session from `session.json`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = Config::load_with_env(&Config::path_in(&data_dir))?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::in_dir(&data_dir));
        Self::with_store(data_dir, config, store)
    }

    pub fn with_store(
        data_dir: impl Into<PathBuf>,
        config: Config,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let session = SessionContext::load(store)?;
        let api = ApiClient::new(&config.api, session)?;
        tracing::debug!("Using API at {}", api.base_url());
        Ok(Self {
            data_dir: data_dir.into(),
            config,
            api,
        })
    }

    pub fn auth(&self) -> AuthOps {
        AuthOps::new(self.api.clone())
    }

    pub fn bookings(&self) -> BookingOps {
        BookingOps::new(self.api.clone())
    }

    pub fn rooms(&self) -> RoomOps {
        RoomOps::new(self.api.clone())
    }

    pub fn notifications(&self) -> NotificationOps {
        NotificationOps::new(self.api.clone())
    }

    /// Badge poller over this client's notifications, at the configured interval.
    pub fn badge_poller(&self) -> BadgePoller<NotificationOps> {
        BadgePoller::new(self.notifications(), self.config.badge.poll_interval())
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
