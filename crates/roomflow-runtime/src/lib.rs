pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod poller;
pub mod session;
pub mod storage;

pub use client::{AuthOps, BookingOps, NotificationOps, RoomOps, Roomflow};
pub use config::{ApiConfig, BadgeConfig, Config, resolve_data_dir};
pub use error::{Error, Result};
pub use http::ApiClient;
pub use poller::{BadgeHandle, BadgePoller, BadgeStream, BadgeUpdate, UnreadCountSource};
pub use session::SessionContext;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
