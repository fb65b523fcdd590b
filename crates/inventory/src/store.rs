use std::collections::HashSet;

use serde::Serialize;

use stockdesk_core::{DomainError, DomainResult, ItemId};

use crate::item::{Category, ImportRow, Item, NewItem};

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub duplicates_dropped: usize,
    /// Rows that arrived without an id, or with an id already taken, and got a fresh one.
    pub ids_assigned: usize,
}

/// Result of a chat-driven stock depletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Depletion {
    /// Every row with the name now holds `remaining` units.
    Reduced { remaining: u32 },
    /// Stock hit zero or below, so every row with the name was deleted.
    Removed { rows: usize },
}

/// In-memory inventory table for one session.
///
/// Rows keep insertion order. Item ids are unique; every mutation is applied
/// immediately and visible to the next read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    items: Vec<Item>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table with `rows`, dropping repeated (name, category) pairs.
    ///
    /// The first occurrence of a pair wins. Rows without an id, or whose id is
    /// already held by an earlier kept row, get `max + 1` ids in input order.
    pub fn load(&mut self, rows: impl IntoIterator<Item = ImportRow>) -> LoadReport {
        let mut report = LoadReport::default();
        let mut keys: HashSet<(String, Category)> = HashSet::new();
        let mut kept: Vec<ImportRow> = Vec::new();

        for row in rows {
            report.rows_read += 1;
            let key = (row.item.name.clone(), row.item.category.clone());
            if keys.insert(key) {
                kept.push(row);
            } else {
                report.duplicates_dropped += 1;
            }
        }

        // Claim explicit ids first so reassigned rows never steal one.
        let mut taken: HashSet<ItemId> = HashSet::new();
        let mut ids: Vec<Option<ItemId>> = Vec::with_capacity(kept.len());
        for row in &kept {
            match row.id {
                Some(id) if taken.insert(id) => ids.push(Some(id)),
                _ => ids.push(None),
            }
        }

        let mut next = taken.iter().max().map(|id| id.next()).unwrap_or(ItemId::FIRST);
        self.items = kept
            .into_iter()
            .zip(ids)
            .map(|(row, id)| {
                let id = id.unwrap_or_else(|| {
                    report.ids_assigned += 1;
                    let assigned = next;
                    next = next.next();
                    assigned
                });
                row.item.with_id(id)
            })
            .collect();

        report.rows_loaded = self.items.len();
        tracing::debug!(
            rows_read = report.rows_read,
            rows_loaded = report.rows_loaded,
            duplicates_dropped = report.duplicates_dropped,
            "inventory loaded"
        );
        report
    }

    /// Append a single item with the next id.
    pub fn add(&mut self, item: NewItem) -> Item {
        let item = item.with_id(self.next_id());
        tracing::debug!(item_id = %item.id, name = %item.name, "item added");
        self.items.push(item.clone());
        item
    }

    /// Id the next added row receives: current max + 1, or 1 when empty.
    pub fn next_id(&self) -> ItemId {
        self.items
            .iter()
            .map(|i| i.id)
            .max()
            .map(ItemId::next)
            .unwrap_or(ItemId::FIRST)
    }

    /// Set the quantity of every row named `name`. Returns how many rows changed.
    pub fn update_quantity(&mut self, name: &str, quantity: u32) -> DomainResult<usize> {
        let mut updated = 0;
        for item in self.items.iter_mut().filter(|i| i.name == name) {
            item.quantity_in_stock = quantity;
            updated += 1;
        }
        if updated == 0 {
            return Err(DomainError::not_found(format!("item '{name}'")));
        }
        tracing::debug!(name, quantity, rows = updated, "quantity updated");
        Ok(updated)
    }

    /// Delete every row named `name`. Returns how many rows were removed.
    pub fn remove(&mut self, name: &str) -> DomainResult<usize> {
        let before = self.items.len();
        self.items.retain(|i| i.name != name);
        let removed = before - self.items.len();
        if removed == 0 {
            return Err(DomainError::not_found(format!("item '{name}'")));
        }
        tracing::debug!(name, rows = removed, "item removed");
        Ok(removed)
    }

    /// Take `quantity` units of `name` out of stock.
    ///
    /// The new level is computed from the first row with that name and written
    /// to every row with that name. A result of zero or less deletes them all.
    pub fn deplete(&mut self, name: &str, quantity: u32) -> DomainResult<Depletion> {
        let current = self
            .items
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.quantity_in_stock)
            .ok_or_else(|| DomainError::not_found(format!("item '{name}'")))?;

        let remaining = i64::from(current) - i64::from(quantity);
        if remaining > 0 {
            // remaining < current <= u32::MAX
            let remaining = remaining as u32;
            self.update_quantity(name, remaining)?;
            Ok(Depletion::Reduced { remaining })
        } else {
            let rows = self.remove(name)?;
            Ok(Depletion::Removed { rows })
        }
    }

    /// The live table, read-only.
    pub fn query(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows with stock strictly below their reorder level.
    pub fn low_stock(&self) -> Vec<&Item> {
        self.items.iter().filter(|i| i.is_low_stock()).collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|i| &i.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn in_category(&self, category: &Category) -> Vec<&Item> {
        self.items.iter().filter(|i| &i.category == category).collect()
    }

    /// Distinct item names in order of first appearance.
    pub fn names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|i| i.name.as_str())
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// First row (table order) whose name occurs anywhere in `text`, ignoring case.
    pub fn find_by_name_in(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.items
            .iter()
            .find(|i| i.name_appears_in(&lowered))
            .map(|i| i.name.as_str())
    }
}
