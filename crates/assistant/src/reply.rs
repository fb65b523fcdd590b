use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value as JsonValue;

use stockdesk_inventory::Item;

/// A column of the inventory table, named after its CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ItemId,
    ItemName,
    Category,
    QuantityInStock,
    ReorderLevel,
    PricePerUnit,
    Supplier,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::ItemId,
        Column::ItemName,
        Column::Category,
        Column::QuantityInStock,
        Column::ReorderLevel,
        Column::PricePerUnit,
        Column::Supplier,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::ItemId => "item_id",
            Column::ItemName => "item_name",
            Column::Category => "category",
            Column::QuantityInStock => "quantity_in_stock",
            Column::ReorderLevel => "reorder_level",
            Column::PricePerUnit => "price_per_unit",
            Column::Supplier => "supplier",
        }
    }

    pub fn cell(self, item: &Item) -> JsonValue {
        match self {
            Column::ItemId => JsonValue::from(item.id.get()),
            Column::ItemName => JsonValue::from(item.name.as_str()),
            Column::Category => JsonValue::from(item.category.as_str()),
            Column::QuantityInStock => JsonValue::from(item.quantity_in_stock),
            Column::ReorderLevel => JsonValue::from(item.reorder_level),
            Column::PricePerUnit => {
                serde_json::to_value(item.price_per_unit).unwrap_or(JsonValue::Null)
            }
            Column::Supplier => JsonValue::from(item.supplier.as_str()),
        }
    }
}

/// Tabular attachment of a reply: a column projection over a snapshot of rows.
///
/// Serializes as `{ "columns": [...], "rows": [[...], ...] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTable {
    columns: Vec<Column>,
    items: Vec<Item>,
}

impl ItemTable {
    pub fn new(columns: impl Into<Vec<Column>>, items: Vec<Item>) -> Self {
        Self {
            columns: columns.into(),
            items,
        }
    }

    /// Every column.
    pub fn full(items: Vec<Item>) -> Self {
        Self::new(Column::ALL, items)
    }

    pub fn low_stock(items: Vec<Item>) -> Self {
        Self::new(
            [
                Column::ItemName,
                Column::Category,
                Column::QuantityInStock,
                Column::ReorderLevel,
            ],
            items,
        )
    }

    pub fn category(items: Vec<Item>) -> Self {
        Self::new(
            [Column::ItemName, Column::QuantityInStock, Column::ReorderLevel],
            items,
        )
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn rows(&self) -> Vec<Vec<JsonValue>> {
        self.items
            .iter()
            .map(|item| self.columns.iter().map(|c| c.cell(item)).collect())
            .collect()
    }
}

impl Serialize for ItemTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header()).collect();
        let mut state = serializer.serialize_struct("ItemTable", 2)?;
        state.serialize_field("columns", &headers)?;
        state.serialize_field("rows", &self.rows())?;
        state.end()
    }
}

/// Assistant answer: text plus an optional table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<ItemTable>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            table: None,
        }
    }

    pub fn with_table(text: impl Into<String>, table: ItemTable) -> Self {
        Self {
            text: text.into(),
            table: Some(table),
        }
    }
}
