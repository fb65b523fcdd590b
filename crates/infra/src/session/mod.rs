//! Per-client dashboard sessions.
//!
//! Each session owns an independent inventory and chat transcript. Nothing is
//! shared between sessions and nothing outlives the process.

pub mod store;

use chrono::{DateTime, Utc};

use stockdesk_assistant::{Reply, Transcript};
use stockdesk_core::SessionId;
use stockdesk_inventory::{InventoryStore, LoadReport};

use crate::csv_codec::{self, CsvError};

pub use store::{InMemorySessionStore, SessionError, SessionHandle, SessionStore};

/// State owned by one dashboard session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    store: InventoryStore,
    transcript: Transcript,
    csv_loaded: bool,
}

impl Session {
    pub fn new(id: SessionId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            store: InventoryStore::new(),
            transcript: Transcript::new(),
            csv_loaded: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut InventoryStore {
        &mut self.store
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether a CSV upload has been applied to this session.
    pub fn csv_loaded(&self) -> bool {
        self.csv_loaded
    }

    /// Replace the inventory with the contents of an uploaded CSV.
    ///
    /// The store is left untouched when parsing fails.
    pub fn import_csv(&mut self, bytes: &[u8]) -> Result<LoadReport, CsvError> {
        let rows = csv_codec::read_rows(bytes)?;
        let report = self.store.load(rows);
        self.csv_loaded = true;
        tracing::info!(
            session_id = %self.id,
            rows_loaded = report.rows_loaded,
            duplicates_dropped = report.duplicates_dropped,
            "inventory CSV imported"
        );
        Ok(report)
    }

    pub fn export_csv(&self) -> Result<String, CsvError> {
        csv_codec::to_csv_string(self.store.query())
    }

    /// One chat turn against this session's inventory.
    pub fn chat(&mut self, text: &str, at: DateTime<Utc>) -> Reply {
        self.transcript.ask(&mut self.store, text, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
item_id,item_name,category,quantity_in_stock,reorder_level,price_per_unit,supplier
1,Widget,Electronics,5,2,3.5,Acme
";

    #[test]
    fn import_then_chat_mutates_own_store() {
        let mut session = Session::new(SessionId::new(), Utc::now());
        assert!(!session.csv_loaded());

        session.import_csv(CSV.as_bytes()).unwrap();
        assert!(session.csv_loaded());

        let reply = session.chat("remove 2 widget", Utc::now());
        assert_eq!(reply.text, "Removed 2 Widget(s). New stock: 3");
        assert_eq!(session.store().query()[0].quantity_in_stock, 3);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn failed_import_keeps_previous_inventory() {
        let mut session = Session::new(SessionId::new(), Utc::now());
        session.import_csv(CSV.as_bytes()).unwrap();

        let err = session.import_csv(b"item_name\nWidget\n").unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn("category")));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn export_reflects_mutations() {
        let mut session = Session::new(SessionId::new(), Utc::now());
        session.import_csv(CSV.as_bytes()).unwrap();
        session.store_mut().update_quantity("Widget", 11).unwrap();

        let out = session.export_csv().unwrap();
        assert!(out.contains("1,Widget,Electronics,11,2,3.5,Acme"));
    }
}
