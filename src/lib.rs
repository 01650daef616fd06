pub mod calendar;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use engine::SchedulingEngine;
pub use error::{ScheduleError, StoreError};
pub use models::{ReviewRecord, Score};
pub use store::{MemoryStore, ReviewStore, SqliteStore};
