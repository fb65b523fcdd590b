//! Inventory domain module.
//!
//! The in-memory item table owned by one session, plus the read-only
//! dashboard views derived from it. Pure logic: no IO, no HTTP, no storage.

pub mod dashboard;
pub mod item;
pub mod store;

pub use dashboard::{
    Alert, CategoryCount, CategoryTotal, ExecutiveSummary, Snapshot, category_counts,
    executive_summary, snapshot,
};
pub use item::{Category, ImportRow, Item, NewItem};
pub use store::{Depletion, InventoryStore, LoadReport};
