use serde::Deserialize;

use stockdesk_inventory::{Category, NewItem};

// -------------------------
// Request DTOs
// -------------------------

/// Add-item form. Field names follow the CSV columns.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub item_name: String,
    pub category: String,
    pub quantity_in_stock: u32,
    pub reorder_level: u32,
    pub price_per_unit: rust_decimal::Decimal,
    #[serde(default)]
    pub supplier: String,
}

impl From<AddItemRequest> for NewItem {
    fn from(body: AddItemRequest) -> Self {
        NewItem {
            name: body.item_name,
            category: Category::new(body.category),
            quantity_in_stock: body.quantity_in_stock,
            reorder_level: body.reorder_level,
            price_per_unit: body.price_per_unit,
            supplier: body.supplier,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub item_name: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub item_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}
