//! Invoice-level adjustments and the totals derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::line_items::LineItem;
use crate::numeric::coerce_float;

/// The three invoice-wide inputs applied after the line items are summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub global_discount_percent: f64,
    pub tax_percent: f64,
    pub shipping_flat: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdjustmentField {
    GlobalDiscountPercent,
    TaxPercent,
    ShippingFlat,
}

impl AdjustmentField {
    pub fn label(&self) -> &'static str {
        match self {
            AdjustmentField::GlobalDiscountPercent => "Discount %",
            AdjustmentField::TaxPercent => "Tax %",
            AdjustmentField::ShippingFlat => "Shipping",
        }
    }
}

impl fmt::Display for AdjustmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Adjustments {
    pub fn get(&self, field: AdjustmentField) -> f64 {
        match field {
            AdjustmentField::GlobalDiscountPercent => self.global_discount_percent,
            AdjustmentField::TaxPercent => self.tax_percent,
            AdjustmentField::ShippingFlat => self.shipping_flat,
        }
    }

    /// Sets `field` from user text. Unreadable input sets it to `0`.
    pub fn set_raw(&mut self, field: AdjustmentField, input: &str) {
        let value = coerce_float(input);
        match field {
            AdjustmentField::GlobalDiscountPercent => self.global_discount_percent = value,
            AdjustmentField::TaxPercent => self.tax_percent = value,
            AdjustmentField::ShippingFlat => self.shipping_flat = value,
        }
    }
}

/// Totals block of an invoice. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub shipping: f64,
    pub grand_total: f64,
}

impl InvoiceTotals {
    /// Sums the rows and applies discount, then tax on the discounted
    /// amount, then shipping. No input is validated or clamped.
    pub fn compute(items: &[LineItem], adjustments: &Adjustments) -> Self {
        let subtotal: f64 = items.iter().map(|i| i.line_amount).sum();
        let discount_amount = subtotal * adjustments.global_discount_percent / 100.0;
        let tax_amount = (subtotal - discount_amount) * adjustments.tax_percent / 100.0;
        let grand_total = subtotal - discount_amount + tax_amount + adjustments.shipping_flat;

        Self {
            subtotal,
            discount_amount,
            tax_amount,
            shipping: adjustments.shipping_flat,
            grand_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_items::{ItemField, LineItemStore};
    use proptest::prelude::*;

    fn store_with(rows: &[(f64, f64, f64)]) -> LineItemStore {
        let mut store = LineItemStore::new();
        for (n, (qty, rate, discount)) in rows.iter().enumerate() {
            let id = if n == 0 { store.items()[0].id } else { store.add() };
            store.update(id, ItemField::Quantity, *qty);
            store.update(id, ItemField::UnitRate, *rate);
            store.update(id, ItemField::DiscountPercent, *discount);
        }
        store
    }

    #[test]
    fn single_row_with_tax_and_shipping() {
        let store = store_with(&[(2.0, 50.0, 10.0)]);
        let adjustments = Adjustments {
            global_discount_percent: 0.0,
            tax_percent: 10.0,
            shipping_flat: 5.0,
        };
        let totals = InvoiceTotals::compute(store.items(), &adjustments);

        assert_eq!(totals.subtotal, 90.0);
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.tax_amount, 9.0);
        assert_eq!(totals.shipping, 5.0);
        assert_eq!(totals.grand_total, 104.0);
    }

    #[test]
    fn two_rows_sum_to_subtotal() {
        let store = store_with(&[(1.0, 100.0, 0.0), (3.0, 20.0, 50.0)]);
        let amounts: Vec<f64> = store.items().iter().map(|i| i.line_amount).collect();
        assert_eq!(amounts, vec![100.0, 30.0]);

        let totals = InvoiceTotals::compute(store.items(), &Adjustments::default());
        assert_eq!(totals.subtotal, 130.0);
        assert_eq!(totals.grand_total, 130.0);
    }

    #[test]
    fn tax_applies_after_global_discount() {
        let store = store_with(&[(1.0, 200.0, 0.0)]);
        let adjustments = Adjustments {
            global_discount_percent: 25.0,
            tax_percent: 10.0,
            shipping_flat: 0.0,
        };
        let totals = InvoiceTotals::compute(store.items(), &adjustments);
        assert_eq!(totals.discount_amount, 50.0);
        assert_eq!(totals.tax_amount, 15.0);
        assert_eq!(totals.grand_total, 165.0);
    }

    #[test]
    fn nonsense_inputs_still_compute() {
        let store = store_with(&[(1.0, 10.0, 0.0)]);
        let adjustments = Adjustments {
            global_discount_percent: 150.0,
            tax_percent: -10.0,
            shipping_flat: -3.0,
        };
        let totals = InvoiceTotals::compute(store.items(), &adjustments);
        assert_eq!(totals.discount_amount, 15.0);
        assert_eq!(totals.tax_amount, 0.5);
        assert_eq!(totals.grand_total, -7.5);
    }

    #[test]
    fn set_raw_coerces_garbage_to_zero() {
        let mut adjustments = Adjustments {
            global_discount_percent: 5.0,
            tax_percent: 8.0,
            shipping_flat: 12.0,
        };
        adjustments.set_raw(AdjustmentField::GlobalDiscountPercent, "none");
        adjustments.set_raw(AdjustmentField::TaxPercent, "");
        adjustments.set_raw(AdjustmentField::ShippingFlat, "free");
        assert_eq!(adjustments, Adjustments::default());

        adjustments.set_raw(AdjustmentField::TaxPercent, "8.875");
        assert_eq!(adjustments.get(AdjustmentField::TaxPercent), 8.875);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn subtotal_ignores_row_order(
            rows in prop::collection::vec((0u32..100, 0.0f64..1_000.0, 0.0f64..100.0), 1..10),
        ) {
            let rows: Vec<(f64, f64, f64)> =
                rows.into_iter().map(|(q, r, d)| (f64::from(q), r, d)).collect();
            let mut reversed = rows.clone();
            reversed.reverse();

            let none = Adjustments::default();
            let forward = InvoiceTotals::compute(store_with(&rows).items(), &none);
            let backward = InvoiceTotals::compute(store_with(&reversed).items(), &none);
            let tolerance = 1e-9 * forward.subtotal.abs().max(1.0);
            prop_assert!((forward.subtotal - backward.subtotal).abs() < tolerance);
        }

        #[test]
        fn grand_total_formula_holds(
            rows in prop::collection::vec((0u32..100, 0.0f64..1_000.0, 0.0f64..100.0), 1..6),
            discount in 0.0f64..100.0,
            tax in 0.0f64..30.0,
            shipping in 0.0f64..500.0,
        ) {
            let rows: Vec<(f64, f64, f64)> =
                rows.into_iter().map(|(q, r, d)| (f64::from(q), r, d)).collect();
            let store = store_with(&rows);
            let adjustments = Adjustments {
                global_discount_percent: discount,
                tax_percent: tax,
                shipping_flat: shipping,
            };
            let t = InvoiceTotals::compute(store.items(), &adjustments);
            let sub: f64 = store.items().iter().map(|i| i.line_amount).sum();
            let d = sub * discount / 100.0;
            let expected = sub - d + (sub - d) * tax / 100.0 + shipping;
            prop_assert_eq!(t.subtotal, sub);
            prop_assert_eq!(t.grand_total, expected);
        }
    }
}
