//! Career engine: REST client, session persistence and request execution.
mod api;
mod engine;
mod error;
mod files;
mod session;
mod store;

pub use api::{ApiSettings, CareerApi, ReqwestApi, DEFAULT_BASE_URL};
pub use engine::{EngineCommand, EngineEvent, EngineHandle};
pub use error::{ApiError, ApiErrorKind};
pub use files::{inspect_resume, mime_for_file_name};
pub use session::{SessionStore, TOKEN_KEY, USER_KEY};
pub use store::{
    ensure_store_dir, AtomicFileWriter, FileStore, KeyValueStore, MemoryStore, StoreError,
};
