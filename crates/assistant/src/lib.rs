//! `stockdesk-assistant`
//!
//! **Responsibility:** the inventory chat assistant.
//!
//! Free text is classified into one of a fixed set of intents by an ordered,
//! first-match-wins rule list, then answered against the session's
//! [`InventoryStore`](stockdesk_inventory::InventoryStore). Only the remove
//! intent mutates the store. Unresolvable requests degrade to a text reply,
//! never an error.

pub mod intent;
pub mod interpreter;
pub mod reply;
pub mod transcript;

pub use intent::{Intent, classify};
pub use interpreter::respond;
pub use reply::{Column, ItemTable, Reply};
pub use transcript::{ChatMessage, Role, Transcript};
