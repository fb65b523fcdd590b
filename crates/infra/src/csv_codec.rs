//! CSV import/export of the inventory table.
//!
//! Import requires a header row with at least `item_name` and `category`;
//! the other columns default when absent. Header names are trimmed, field
//! values are kept verbatim. Export always writes the full
//! header, even for an empty table, with no index column.

use std::io::{Read, Write};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use stockdesk_core::ItemId;
use stockdesk_inventory::{Category, ImportRow, Item, NewItem};

/// Export column order.
pub const HEADERS: [&str; 7] = [
    "item_id",
    "item_name",
    "category",
    "quantity_in_stock",
    "reorder_level",
    "price_per_unit",
    "supplier",
];

/// Columns forming the dedup key; an upload without them is rejected.
const REQUIRED: [&str; 2] = ["item_name", "category"];

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("malformed CSV (line {line}): {message}")]
    Malformed { line: u64, message: String },

    #[error("failed to write CSV: {0}")]
    Write(String),
}

impl CsvError {
    fn malformed(err: &csv::Error) -> Self {
        Self::Malformed {
            line: err.position().map(|p| p.line()).unwrap_or(0),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    item_id: Option<u64>,
    item_name: String,
    category: String,
    #[serde(default)]
    quantity_in_stock: u32,
    #[serde(default)]
    reorder_level: u32,
    #[serde(default)]
    price_per_unit: Decimal,
    #[serde(default)]
    supplier: String,
}

impl From<CsvRow> for ImportRow {
    fn from(row: CsvRow) -> Self {
        ImportRow {
            id: row.item_id.map(ItemId::from),
            item: NewItem {
                name: row.item_name,
                category: Category::new(row.category),
                quantity_in_stock: row.quantity_in_stock,
                reorder_level: row.reorder_level,
                price_per_unit: row.price_per_unit,
                supplier: row.supplier,
            },
        }
    }
}

/// Parse every row of an inventory CSV. Fails on the first bad row.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<ImportRow>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.headers().map_err(|e| CsvError::malformed(&e))?.clone();
    for column in REQUIRED {
        if !headers.iter().any(|h| h == column) {
            return Err(CsvError::MissingColumn(column));
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<CsvRow>() {
        let row = record.map_err(|e| CsvError::malformed(&e))?;
        rows.push(ImportRow::from(row));
    }
    tracing::debug!(rows = rows.len(), "inventory CSV parsed");
    Ok(rows)
}

/// Write `items` as CSV (header first) to `output`.
pub fn write_items<W: Write>(items: &[Item], output: W) -> Result<(), CsvError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer
        .write_record(HEADERS)
        .map_err(|e| CsvError::Write(e.to_string()))?;
    for item in items {
        writer
            .serialize(item)
            .map_err(|e| CsvError::Write(e.to_string()))?;
    }
    writer.flush().map_err(|e| CsvError::Write(e.to_string()))?;
    Ok(())
}

/// Render `items` as an in-memory CSV document.
pub fn to_csv_string(items: &[Item]) -> Result<String, CsvError> {
    let mut buf = Vec::new();
    write_items(items, &mut buf)?;
    String::from_utf8(buf).map_err(|e| CsvError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_inventory::InventoryStore;

    const SAMPLE: &str = "\
item_id,item_name,category,quantity_in_stock,reorder_level,price_per_unit,supplier
1,Wireless Mouse,Electronics,15,20,24.99,Logi Corp
2,Office Chair,Furniture,8,5,149.5,SitWell
3,Stapler,Office Supplies,40,10,7.25,PaperPro
4,Wireless Mouse,Electronics,99,20,24.99,Other Supplier
";

    fn load(csv: &str) -> InventoryStore {
        let mut store = InventoryStore::new();
        store.load(read_rows(csv.as_bytes()).unwrap());
        store
    }

    #[test]
    fn reads_rows_and_dedups_on_load() {
        let store = load(SAMPLE);

        assert_eq!(store.len(), 3);
        let mouse = &store.query()[0];
        assert_eq!(mouse.id, ItemId::new(1));
        assert_eq!(mouse.quantity_in_stock, 15);
        assert_eq!(mouse.price_per_unit, Decimal::new(2499, 2));
        assert_eq!(mouse.supplier, "Logi Corp");
    }

    #[test]
    fn optional_columns_default() {
        let rows = read_rows("item_name,category\nLamp,Furniture\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].item.quantity_in_stock, 0);
        assert_eq!(rows[0].item.price_per_unit, Decimal::ZERO);
        assert_eq!(rows[0].item.supplier, "");
    }

    #[test]
    fn empty_item_id_is_treated_as_missing() {
        let rows = read_rows("item_id,item_name,category\n,Lamp,Furniture\n".as_bytes()).unwrap();
        assert_eq!(rows[0].id, None);
    }

    #[test]
    fn missing_dedup_column_is_rejected() {
        let err = read_rows("item_id,item_name\n1,Lamp\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn("category")));
    }

    #[test]
    fn bad_number_reports_line() {
        let csv = "item_name,category,quantity_in_stock\nLamp,Furniture,lots\n";
        let err = read_rows(csv.as_bytes()).unwrap_err();
        match err {
            CsvError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn export_writes_header_for_empty_table() {
        let out = to_csv_string(&[]).unwrap();
        assert_eq!(
            out,
            "item_id,item_name,category,quantity_in_stock,reorder_level,price_per_unit,supplier\n"
        );
    }

    #[test]
    fn export_then_import_round_trips() {
        let store = load(SAMPLE);
        let exported = to_csv_string(store.query()).unwrap();

        let reloaded = load(&exported);
        assert_eq!(store, reloaded);
        assert!(exported.starts_with("item_id,item_name,category,"));
        assert!(exported.contains("3,Stapler,Office Supplies,40,10,7.25,PaperPro"));
    }

    #[test]
    fn export_quotes_fields_with_commas() {
        let mut store = InventoryStore::new();
        store.add(NewItem {
            name: "Desk, Standing".to_string(),
            category: Category::new("Furniture"),
            quantity_in_stock: 1,
            reorder_level: 1,
            price_per_unit: Decimal::new(30000, 2),
            supplier: "Uplift".to_string(),
        });

        let exported = to_csv_string(store.query()).unwrap();
        assert!(exported.contains("\"Desk, Standing\""));
        assert_eq!(load(&exported), store);
    }

    #[test]
    fn padded_values_survive_round_trip() {
        let mut store = InventoryStore::new();
        store.add(NewItem {
            name: " Desk Lamp ".to_string(),
            category: Category::new("Furniture"),
            quantity_in_stock: 4,
            reorder_level: 2,
            price_per_unit: Decimal::new(1999, 2),
            supplier: "Brightco ".to_string(),
        });

        let reloaded = load(&to_csv_string(store.query()).unwrap());
        assert_eq!(reloaded, store);
        assert_eq!(reloaded.query()[0].name, " Desk Lamp ");
    }

    #[test]
    fn padded_names_are_distinct_keys() {
        let store = load("item_name,category\nDesk,Furniture\n Desk,Furniture\n");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn padded_headers_are_accepted() {
        let rows = read_rows(" item_name , category \nLamp,Furniture\n".as_bytes()).unwrap();
        assert_eq!(rows[0].item.name, "Lamp");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_item() -> impl Strategy<Value = NewItem> {
            (
                any::<String>(),
                any::<String>(),
                any::<u32>(),
                any::<u32>(),
                0i64..10_000_000,
                any::<String>(),
            )
                .prop_map(|(name, category, qty, reorder, cents, supplier)| NewItem {
                    name,
                    category: Category::new(category),
                    quantity_in_stock: qty,
                    reorder_level: reorder,
                    price_per_unit: Decimal::new(cents, 2),
                    supplier,
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: export then import yields an identical table, whatever the text fields hold.
            #[test]
            fn export_then_import_is_identity(items in proptest::collection::vec(arb_item(), 0..20)) {
                let mut store = InventoryStore::new();
                store.load(items.into_iter().map(|item| ImportRow { id: None, item }));

                let exported = to_csv_string(store.query()).unwrap();
                let mut reloaded = InventoryStore::new();
                reloaded.load(read_rows(exported.as_bytes()).unwrap());

                prop_assert_eq!(&reloaded, &store);
            }
        }
    }
}
