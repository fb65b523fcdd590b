//! Read-only dashboard views derived from an [`InventoryStore`].
//!
//! Every view needs at least one row; an empty store yields
//! [`DomainError::EmptyInventory`] so callers stop rendering.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use stockdesk_core::{DomainError, DomainResult, ItemId};

use crate::item::{Category, Item};
use crate::store::InventoryStore;

/// Per-item stockout warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub item_id: ItemId,
    pub item_name: String,
    pub shortfall: u32,
    pub message: String,
}

/// Executive snapshot: headline KPIs plus the rows behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub stockout_risk_items: usize,
    /// Value of the units missing to bring every low-stock row back to its reorder level.
    pub revenue_at_risk: Decimal,
    pub at_risk: Vec<Item>,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub quantity_in_stock: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutiveSummary {
    pub high_risk_count: usize,
    /// Category holding the most units.
    pub highest_demand_category: Category,
    /// Category holding the fewest units.
    pub overstock_category: Category,
    pub totals: Vec<CategoryTotal>,
}

fn ensure_not_empty(store: &InventoryStore) -> DomainResult<()> {
    if store.is_empty() {
        return Err(DomainError::EmptyInventory);
    }
    Ok(())
}

pub fn snapshot(store: &InventoryStore) -> DomainResult<Snapshot> {
    ensure_not_empty(store)?;

    let at_risk: Vec<Item> = store.low_stock().into_iter().cloned().collect();
    let revenue_at_risk = at_risk
        .iter()
        .map(|i| Decimal::from(i.shortfall()) * i.price_per_unit)
        .sum();
    let alerts = at_risk
        .iter()
        .map(|i| Alert {
            item_id: i.id,
            item_name: i.name.clone(),
            shortfall: i.shortfall(),
            message: format!("⚠️ {} will stock out in {} days", i.name, i.shortfall()),
        })
        .collect();

    Ok(Snapshot {
        stockout_risk_items: at_risk.len(),
        revenue_at_risk,
        at_risk,
        alerts,
    })
}

/// Row count per category, sorted by category name (bar chart data).
pub fn category_counts(store: &InventoryStore) -> DomainResult<Vec<CategoryCount>> {
    ensure_not_empty(store)?;

    let mut counts: BTreeMap<&Category, usize> = BTreeMap::new();
    for item in store.query() {
        *counts.entry(&item.category).or_default() += 1;
    }
    Ok(counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.clone(),
            count,
        })
        .collect())
}

pub fn executive_summary(store: &InventoryStore) -> DomainResult<ExecutiveSummary> {
    ensure_not_empty(store)?;

    let mut sums: BTreeMap<&Category, u64> = BTreeMap::new();
    for item in store.query() {
        *sums.entry(&item.category).or_default() += u64::from(item.quantity_in_stock);
    }

    // Strict comparisons keep the alphabetically first category on ties.
    let mut highest: Option<(&Category, u64)> = None;
    let mut lowest: Option<(&Category, u64)> = None;
    for (&category, &total) in &sums {
        if highest.is_none_or(|(_, best)| total > best) {
            highest = Some((category, total));
        }
        if lowest.is_none_or(|(_, best)| total < best) {
            lowest = Some((category, total));
        }
    }
    let (Some((highest, _)), Some((lowest, _))) = (highest, lowest) else {
        return Err(DomainError::EmptyInventory);
    };

    Ok(ExecutiveSummary {
        high_risk_count: store.low_stock().len(),
        highest_demand_category: highest.clone(),
        overstock_category: lowest.clone(),
        totals: sums
            .into_iter()
            .map(|(category, quantity_in_stock)| CategoryTotal {
                category: category.clone(),
                quantity_in_stock,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;

    fn store_with(rows: &[(&str, &str, u32, u32, i64)]) -> InventoryStore {
        let mut store = InventoryStore::new();
        for &(name, category, qty, reorder, cents) in rows {
            store.add(NewItem {
                name: name.to_string(),
                category: Category::new(category),
                quantity_in_stock: qty,
                reorder_level: reorder,
                price_per_unit: Decimal::new(cents, 2),
                supplier: "Acme".to_string(),
            });
        }
        store
    }

    #[test]
    fn views_reject_empty_store() {
        let store = InventoryStore::new();
        assert_eq!(snapshot(&store).unwrap_err(), DomainError::EmptyInventory);
        assert_eq!(category_counts(&store).unwrap_err(), DomainError::EmptyInventory);
        assert_eq!(executive_summary(&store).unwrap_err(), DomainError::EmptyInventory);
    }

    #[test]
    fn snapshot_counts_risk_and_builds_alerts() {
        let store = store_with(&[
            ("Chair", "Furniture", 2, 5, 4000),
            ("Pen", "Office Supplies", 100, 10, 150),
            ("Cable", "Electronics", 0, 4, 1000),
        ]);

        let snap = snapshot(&store).unwrap();
        assert_eq!(snap.stockout_risk_items, 2);
        // 3 * 40.00 + 4 * 10.00
        assert_eq!(snap.revenue_at_risk, Decimal::new(16000, 2));
        assert_eq!(snap.alerts[0].message, "⚠️ Chair will stock out in 3 days");
        assert_eq!(snap.alerts[1].shortfall, 4);
    }

    #[test]
    fn category_counts_are_sorted_by_name() {
        let store = store_with(&[
            ("Pen", "Office Supplies", 1, 1, 100),
            ("Chair", "Furniture", 1, 1, 100),
            ("Desk", "Furniture", 1, 1, 100),
        ]);

        let counts = category_counts(&store).unwrap();
        assert_eq!(
            counts,
            vec![
                CategoryCount { category: Category::new("Furniture"), count: 2 },
                CategoryCount { category: Category::new("Office Supplies"), count: 1 },
            ]
        );
    }

    #[test]
    fn executive_summary_picks_extremes_with_alphabetical_ties() {
        let store = store_with(&[
            ("Pen", "Office Supplies", 30, 1, 100),
            ("Chair", "Furniture", 10, 20, 100),
            ("Cable", "Electronics", 10, 1, 100),
        ]);

        let summary = executive_summary(&store).unwrap();
        assert_eq!(summary.high_risk_count, 1);
        assert_eq!(summary.highest_demand_category, Category::new("Office Supplies"));
        assert_eq!(summary.overstock_category, Category::new("Electronics"));
        assert_eq!(summary.totals.len(), 3);
    }
}
