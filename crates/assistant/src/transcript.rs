use chrono::{DateTime, Utc};
use serde::Serialize;

use stockdesk_inventory::InventoryStore;

use crate::interpreter::respond;
use crate::reply::{ItemTable, Reply};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Tables are snapshots taken when the reply was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<ItemTable>,
    pub at: DateTime<Utc>,
}

/// Ordered chat history of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one chat turn: record the user message, answer it, record the answer.
    pub fn ask(&mut self, store: &mut InventoryStore, text: &str, at: DateTime<Utc>) -> Reply {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: text.to_string(),
            table: None,
            at,
        });

        let reply = respond(store, text);
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: reply.text.clone(),
            table: reply.table.clone(),
            at,
        });
        reply
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stockdesk_inventory::{Category, NewItem};

    #[test]
    fn ask_records_user_then_assistant() {
        let mut store = InventoryStore::new();
        store.add(NewItem {
            name: "Widget".to_string(),
            category: Category::new("Electronics"),
            quantity_in_stock: 1,
            reorder_level: 4,
            price_per_unit: Decimal::ONE,
            supplier: "Acme".to_string(),
        });
        let mut transcript = Transcript::new();
        let now = Utc::now();

        let reply = transcript.ask(&mut store, "show low stock", now);

        assert_eq!(transcript.len(), 2);
        let [user, assistant] = transcript.messages() else {
            panic!("expected two messages");
        };
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "show low stock");
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.content, reply.text);
        assert_eq!(assistant.table, reply.table);
    }

    #[test]
    fn table_snapshot_survives_later_mutation() {
        let mut store = InventoryStore::new();
        store.add(NewItem {
            name: "Widget".to_string(),
            category: Category::new("Electronics"),
            quantity_in_stock: 5,
            reorder_level: 1,
            price_per_unit: Decimal::ONE,
            supplier: "Acme".to_string(),
        });
        let mut transcript = Transcript::new();

        transcript.ask(&mut store, "show all items", Utc::now());
        transcript.ask(&mut store, "remove 5 widget", Utc::now());

        assert!(store.is_empty());
        let listed = transcript.messages()[1].table.as_ref().unwrap();
        assert_eq!(listed.items()[0].quantity_in_stock, 5);

        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(json[0]["role"], "user");
        assert_eq!(json[3]["content"], "Removed Widget completely from inventory.");
        assert!(json[3].get("table").is_none());
    }
}
