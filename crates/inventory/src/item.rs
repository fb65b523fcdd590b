use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdesk_core::{DomainError, DomainResult, ItemId};

/// Item category.
///
/// Enum-like but open: imported tables may carry any category string, while
/// the add form only offers [`Category::FORM_CHOICES`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Categories selectable when adding a single item.
    pub const FORM_CHOICES: [&'static str; 3] = ["Electronics", "Office Supplies", "Furniture"];

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_form_choice(&self) -> bool {
        Self::FORM_CHOICES.contains(&self.0.as_str())
    }

    /// Case-insensitive containment of this category inside already-lowercased text.
    ///
    /// A blank category never matches.
    pub fn appears_in(&self, lowered: &str) -> bool {
        !self.0.trim().is_empty() && lowered.contains(&self.0.to_lowercase())
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One inventory row.
///
/// Field names on the wire match the CSV header columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "item_id")]
    pub id: ItemId,
    #[serde(rename = "item_name")]
    pub name: String,
    pub category: Category,
    pub quantity_in_stock: u32,
    pub reorder_level: u32,
    pub price_per_unit: Decimal,
    pub supplier: String,
}

impl Item {
    /// Stock sits strictly below the reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity_in_stock < self.reorder_level
    }

    /// Units missing to reach the reorder level (0 when not low).
    pub fn shortfall(&self) -> u32 {
        self.reorder_level.saturating_sub(self.quantity_in_stock)
    }

    /// Case-insensitive containment of this item's name inside already-lowercased text.
    ///
    /// Plain substring matching: "Mouse" matches "remove 2 wireless mouse".
    /// A blank name never matches.
    pub fn name_appears_in(&self, lowered: &str) -> bool {
        !self.name.trim().is_empty() && lowered.contains(&self.name.to_lowercase())
    }
}

/// Add-form payload: every field of [`Item`] except the id, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(rename = "item_name")]
    pub name: String,
    pub category: Category,
    pub quantity_in_stock: u32,
    pub reorder_level: u32,
    pub price_per_unit: Decimal,
    pub supplier: String,
}

impl NewItem {
    /// Form-level constraints: a listed category and a non-negative price.
    ///
    /// The store itself never calls this; bulk imports are accepted as-is.
    pub fn validate_form(&self) -> DomainResult<()> {
        if !self.category.is_form_choice() {
            return Err(DomainError::validation(format!(
                "category must be one of: {}",
                Category::FORM_CHOICES.join(", ")
            )));
        }
        if self.price_per_unit < Decimal::ZERO {
            return Err(DomainError::validation("price_per_unit cannot be negative"));
        }
        Ok(())
    }

    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            quantity_in_stock: self.quantity_in_stock,
            reorder_level: self.reorder_level,
            price_per_unit: self.price_per_unit,
            supplier: self.supplier,
        }
    }
}

/// One row of a bulk import. The id is optional; missing ids are assigned on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub id: Option<ItemId>,
    pub item: NewItem,
}

impl From<Item> for ImportRow {
    fn from(item: Item) -> Self {
        Self {
            id: Some(item.id),
            item: NewItem {
                name: item.name,
                category: item.category,
                quantity_in_stock: item.quantity_in_stock,
                reorder_level: item.reorder_level,
                price_per_unit: item.price_per_unit,
                supplier: item.supplier,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(category: &str, price: Decimal) -> NewItem {
        NewItem {
            name: "Wireless Mouse".to_string(),
            category: Category::new(category),
            quantity_in_stock: 4,
            reorder_level: 10,
            price_per_unit: price,
            supplier: "Acme".to_string(),
        }
    }

    #[test]
    fn low_stock_is_strictly_below_reorder_level() {
        let mut item = new_item("Electronics", Decimal::new(1999, 2)).with_id(ItemId::new(1));
        assert!(item.is_low_stock());
        assert_eq!(item.shortfall(), 6);

        item.quantity_in_stock = 10;
        assert!(!item.is_low_stock());
        assert_eq!(item.shortfall(), 0);

        item.quantity_in_stock = 25;
        assert_eq!(item.shortfall(), 0);
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let item = new_item("Electronics", Decimal::ONE).with_id(ItemId::new(1));
        assert!(item.name_appears_in("remove 2 wireless mouse please"));
        assert!(!item.name_appears_in("remove 2 mouse"));
    }

    #[test]
    fn blank_name_and_category_match_nothing() {
        let mut item = new_item("", Decimal::ONE).with_id(ItemId::new(1));
        item.name = "  ".to_string();
        assert!(!item.name_appears_in("remove 2 anything"));
        assert!(!item.category.appears_in("list electronics"));
    }

    #[test]
    fn form_validation_rejects_unlisted_category() {
        let err = new_item("Groceries", Decimal::ONE).validate_form().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn form_validation_rejects_negative_price() {
        let err = new_item("Furniture", Decimal::new(-1, 2)).validate_form().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(new_item("Furniture", Decimal::ZERO).validate_form().is_ok());
    }

    #[test]
    fn item_serializes_with_csv_column_names() {
        let item = new_item("Office Supplies", Decimal::new(250, 2)).with_id(ItemId::new(3));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["item_id"], 3);
        assert_eq!(json["item_name"], "Wireless Mouse");
        assert_eq!(json["category"], "Office Supplies");
        assert_eq!(json["price_per_unit"], 2.5);
    }
}
