use stockdesk_inventory::{Category, Depletion, InventoryStore, Item};

use crate::intent::{Intent, classify};
use crate::reply::{ItemTable, Reply};

pub const ALL_CLEAR: &str = "All items are sufficiently stocked ✅";
pub const LOW_STOCK_HEADING: &str = "⚠ Low Stock Items:";
pub const INVENTORY_HEADING: &str = "Current Inventory:";
pub const REMOVE_UNRESOLVED: &str =
    "Could not identify item to remove. Make sure to include the exact item name.";
pub const HELP: &str = "Try commands like:\n\
- list items under electronics\n\
- show low stock\n\
- remove 2 wireless mouse\n\
- show all items";

/// Answer one chat message against the session store.
///
/// Only the remove intent mutates `store`.
pub fn respond(store: &mut InventoryStore, text: &str) -> Reply {
    let intent = classify(text, store);
    tracing::debug!(?intent, "chat intent classified");
    execute(store, intent)
}

fn execute(store: &mut InventoryStore, intent: Intent) -> Reply {
    match intent {
        Intent::LowStock => low_stock(store),
        Intent::Category(category) => in_category(store, &category),
        Intent::ListAll => {
            Reply::with_table(INVENTORY_HEADING, ItemTable::full(store.query().to_vec()))
        }
        Intent::Remove { quantity, item: Some(name) } => remove(store, &name, quantity),
        Intent::Remove { item: None, .. } => Reply::text(REMOVE_UNRESOLVED),
        Intent::Help => Reply::text(HELP),
    }
}

fn low_stock(store: &InventoryStore) -> Reply {
    let rows: Vec<Item> = store.low_stock().into_iter().cloned().collect();
    if rows.is_empty() {
        return Reply::text(ALL_CLEAR);
    }
    Reply::with_table(LOW_STOCK_HEADING, ItemTable::low_stock(rows))
}

fn in_category(store: &InventoryStore, category: &Category) -> Reply {
    let rows: Vec<Item> = store.in_category(category).into_iter().cloned().collect();
    Reply::with_table(format!("Items in **{category}**:"), ItemTable::category(rows))
}

fn remove(store: &mut InventoryStore, name: &str, quantity: u32) -> Reply {
    match store.deplete(name, quantity) {
        Ok(Depletion::Reduced { remaining }) => {
            tracing::info!(name, quantity, remaining, "stock removed via chat");
            Reply::text(format!("Removed {quantity} {name}(s). New stock: {remaining}"))
        }
        Ok(Depletion::Removed { rows }) => {
            tracing::info!(name, quantity, rows, "item depleted via chat");
            Reply::text(format!("Removed {name} completely from inventory."))
        }
        Err(e) => {
            tracing::warn!(name, error = %e, "chat removal target vanished");
            Reply::text(REMOVE_UNRESOLVED)
        }
    }
}
