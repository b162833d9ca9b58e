//! The editable rows of an invoice.
//!
//! A [`LineItemStore`] always holds at least one row, and every row's
//! `line_amount` is derived from its quantity, rate and discount. The amount
//! is recomputed whenever one of those three changes and is never set
//! directly.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::numeric::{coerce_float, coerce_int};

/// Row identifier, unique within one store for its whole lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_rate: f64,
    #[serde(default)]
    pub discount_percent: f64,
    /// Derived; ignored on load and recomputed.
    #[serde(default)]
    pub line_amount: f64,
}

impl LineItem {
    /// A blank row: quantity 1, everything else zero or empty.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: 1.0,
            unit_rate: 0.0,
            discount_percent: 0.0,
            line_amount: 0.0,
        }
    }

    fn recompute(&mut self) {
        let gross = self.quantity * self.unit_rate;
        self.line_amount = gross - gross * self.discount_percent / 100.0;
    }
}

/// Editable column of a row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ItemField {
    Description,
    Quantity,
    UnitRate,
    DiscountPercent,
}

impl ItemField {
    pub const ALL: [ItemField; 4] = [
        ItemField::Description,
        ItemField::Quantity,
        ItemField::UnitRate,
        ItemField::DiscountPercent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ItemField::Description => "Description",
            ItemField::Quantity => "Qty",
            ItemField::UnitRate => "Rate",
            ItemField::DiscountPercent => "Discount %",
        }
    }

    fn affects_amount(&self) -> bool {
        !matches!(self, ItemField::Description)
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value headed for a row field.
///
/// Text bound for a numeric field goes through the lenient parsers in
/// [`crate::numeric`]; quantities are read as integers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
        }
    }

    fn into_number(self, field: ItemField) -> f64 {
        match self {
            FieldValue::Number(n) => n,
            FieldValue::Text(s) if field == ItemField::Quantity => coerce_int(&s),
            FieldValue::Text(s) => coerce_float(&s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Ordered rows of the invoice being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<LineItem>", from = "Vec<LineItem>")]
pub struct LineItemStore {
    items: Vec<LineItem>,
    last_id: u64,
}

impl LineItemStore {
    /// A store holding one blank row with id `1`.
    pub fn new() -> Self {
        Self {
            items: vec![LineItem::new(ItemId(1))],
            last_id: 1,
        }
    }

    /// Rebuilds a store from loaded rows.
    ///
    /// Amounts are recomputed, repeated ids are replaced with fresh ones,
    /// and an empty list yields the default single-row store.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        if items.is_empty() {
            return Self::new();
        }

        let mut store = Self {
            items: Vec::with_capacity(items.len()),
            last_id: items.iter().map(|i| i.id.0).max().unwrap_or(0),
        };
        let mut seen = HashSet::new();
        for mut item in items {
            if !seen.insert(item.id) {
                item.id = store.next_id();
                seen.insert(item.id);
            }
            item.recompute();
            store.items.push(item);
        }
        store
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a store built through this API.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a blank row and returns its id.
    pub fn add(&mut self) -> ItemId {
        let id = self.next_id();
        self.items.push(LineItem::new(id));
        tracing::debug!(item_id = %id, rows = self.items.len(), "line item added");
        id
    }

    /// Removes the row with `id`. The last remaining row is never removed.
    ///
    /// Returns whether a row was removed.
    pub fn remove(&mut self, id: ItemId) -> bool {
        if self.items.len() <= 1 {
            tracing::debug!(item_id = %id, "refusing to remove the only line item");
            return false;
        }
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = self.items.len() < before;
        if removed {
            tracing::debug!(item_id = %id, rows = self.items.len(), "line item removed");
        }
        removed
    }

    /// Sets `field` on the row with `id`, recomputing its amount when a
    /// numeric field changes. Returns whether a row matched.
    pub fn update(&mut self, id: ItemId, field: ItemField, value: impl Into<FieldValue>) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        let value = value.into();
        match field {
            ItemField::Description => item.description = value.into_text(),
            ItemField::Quantity => item.quantity = value.into_number(field),
            ItemField::UnitRate => item.unit_rate = value.into_number(field),
            ItemField::DiscountPercent => item.discount_percent = value.into_number(field),
        }
        if field.affects_amount() {
            item.recompute();
        }
        true
    }

    // Ids come from the wall clock but must stay strictly increasing so two
    // rows added within the same millisecond never share one.
    fn next_id(&mut self) -> ItemId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        ItemId(id)
    }
}

impl Default for LineItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<LineItem>> for LineItemStore {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<LineItemStore> for Vec<LineItem> {
    fn from(store: LineItemStore) -> Self {
        store.items
    }
}
