//! Intent classification.
//!
//! Rules are evaluated in a fixed priority order and the first match wins:
//!
//! 1. low stock ("low stock", "stockout")
//! 2. category filter (any known category named in the text)
//! 3. list everything ("all items", "inventory")
//! 4. remove ("remove")
//! 5. help (fallback)
//!
//! The order matters: "remove 2 chairs from furniture" is a category query.

use std::sync::LazyLock;

use regex::Regex;

use stockdesk_inventory::{Category, InventoryStore};

/// Classified purpose of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    LowStock,
    Category(Category),
    ListAll,
    /// `item` is the first table name found in the text, if any.
    Remove { quantity: u32, item: Option<String> },
    Help,
}

/// Lowercased message plus the store it is being asked about.
struct Query<'a> {
    lowered: String,
    store: &'a InventoryStore,
}

type Rule = (&'static str, fn(&Query<'_>) -> Option<Intent>);

const RULES: [Rule; 4] = [
    ("low_stock", low_stock),
    ("category", category),
    ("list_all", list_all),
    ("remove", remove),
];

static QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("quantity pattern is valid"));
static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

/// Classify `text` against the current contents of `store`.
pub fn classify(text: &str, store: &InventoryStore) -> Intent {
    let query = Query {
        lowered: text.to_lowercase(),
        store,
    };

    RULES
        .iter()
        .find_map(|(name, rule)| {
            let intent = rule(&query)?;
            tracing::trace!(rule = *name, "chat rule matched");
            Some(intent)
        })
        .unwrap_or(Intent::Help)
}

fn low_stock(q: &Query<'_>) -> Option<Intent> {
    (q.lowered.contains("low stock") || q.lowered.contains("stockout")).then_some(Intent::LowStock)
}

fn category(q: &Query<'_>) -> Option<Intent> {
    q.store
        .categories()
        .into_iter()
        .find(|c| c.appears_in(&q.lowered))
        .map(|c| Intent::Category(c.clone()))
}

fn list_all(q: &Query<'_>) -> Option<Intent> {
    (q.lowered.contains("all items") || q.lowered.contains("inventory")).then_some(Intent::ListAll)
}

fn remove(q: &Query<'_>) -> Option<Intent> {
    if !q.lowered.contains("remove") {
        return None;
    }
    Some(Intent::Remove {
        quantity: first_number(&q.lowered).unwrap_or(1),
        item: q.store.find_by_name_in(&q.lowered).map(str::to_string),
    })
}

/// First run of decimal digits in `text`, in any script ("٢" reads as 2).
///
/// Only a value past `u32::MAX` saturates.
fn first_number(text: &str) -> Option<u32> {
    let digits = QUANTITY.find(text)?.as_str();
    let value = digits
        .chars()
        .map(digit_value)
        .try_fold(0u32, |acc, d| acc.checked_mul(10)?.checked_add(d))
        .unwrap_or(u32::MAX);
    Some(value)
}

/// Numeric value of one decimal digit (Unicode `Nd`).
///
/// `Nd` characters come in contiguous 0..=9 runs, so the value is the
/// position within the run of consecutive digits ending at `c`, modulo 10.
fn digit_value(c: char) -> u32 {
    if let Some(d) = c.to_digit(10) {
        return d;
    }
    let preceding = (1..=u32::from(c))
        .map_while(|back| char::from_u32(u32::from(c) - back))
        .take_while(|&p| is_decimal_digit(p))
        .count();
    (preceding % 10) as u32
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT.is_match(c.encode_utf8(&mut buf))
}
