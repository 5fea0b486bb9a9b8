//! Where the analyzer's input comes from.
//!
//! Routes only see [`EntryStore`]; the Postgres adapter is used in
//! production and [`MemoryStore`] in tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgEntryStore;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{EntryRecord, ManualOverride};

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every logged entry for the user, in no particular order beyond
    /// oldest write first.
    async fn fetch_entries(&self, user_id: Uuid) -> Result<Vec<EntryRecord>, StoreError>;

    async fn fetch_override(&self, user_id: Uuid) -> Result<Option<ManualOverride>, StoreError>;

    async fn save_override(&self, user_id: Uuid, manual: ManualOverride) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn EntryStore>;
