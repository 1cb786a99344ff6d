//! Line-item model and weight-deduction arithmetic.

use serde::{Deserialize, Serialize};

use super::catalog::Item;

/// Units deducted per bunch under the default policy.
pub const DEFAULT_PER_BUNCH_DEDUCTION: f64 = 1.5;

/// Weight-deduction rule applied when a line item is computed.
///
/// Two rules exist in the field: a fixed deduction per bunch (the
/// long-standing 1.5 units per bunch) and a per-unit rate applied to the
/// gross quantity. Both are carried here so the choice stays a
/// configuration decision; the per-unit rate takes over when it is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionPolicy {
    /// Units deducted per bunch.
    pub per_bunch: f64,
    /// Optional per-unit rate; overrides the per-bunch rule when set.
    pub per_unit: Option<f64>,
}

impl Default for DeductionPolicy {
    fn default() -> Self {
        Self {
            per_bunch: DEFAULT_PER_BUNCH_DEDUCTION,
            per_unit: None,
        }
    }
}

impl DeductionPolicy {
    /// Deduction for a gross quantity and bunch count under this policy.
    pub fn deduction(&self, quantity: f64, bunches: u32) -> f64 {
        match self.per_unit {
            Some(rate) => quantity * rate,
            None => f64::from(bunches) * self.per_bunch,
        }
    }
}

/// Operator input for one line item, as keyed into the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemInput {
    pub item_id: Option<i64>,
    pub quantity: f64,
    pub rate: f64,
    pub bunches: u32,
}

impl Default for LineItemInput {
    fn default() -> Self {
        Self {
            item_id: None,
            quantity: 0.0,
            rate: 0.0,
            bunches: 0,
        }
    }
}

impl LineItemInput {
    /// Blank input prefilled from a catalog item, the way the form behaves
    /// when the operator picks an item.
    pub fn for_item(item: &Item) -> Self {
        Self {
            item_id: Some(item.id),
            rate: item.rate,
            ..Self::default()
        }
    }
}

/// Line item on an in-progress document.
///
/// The derived fields (`weight_deduction`, `effective_quantity`, `amount`)
/// are computed once at entry time and travel with the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_id: i64,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub rate: f64,
    #[serde(rename = "numberOfBunches", default)]
    pub bunches: u32,
    pub weight_deduction: f64,
    pub effective_quantity: f64,
    pub amount: f64,
}

impl LineItem {
    /// Compute a row from validated inputs.
    ///
    /// The effective quantity may go negative when the deduction exceeds
    /// the gross quantity; the value is kept as-is and flagged in the log
    /// so data-entry mistakes stay visible instead of being clamped away.
    pub fn compute(
        item: &Item,
        quantity: f64,
        rate: f64,
        bunches: u32,
        policy: &DeductionPolicy,
    ) -> Self {
        let weight_deduction = policy.deduction(quantity, bunches);
        let effective_quantity = quantity - weight_deduction;
        if effective_quantity < 0.0 {
            tracing::warn!(
                item_id = item.id,
                quantity,
                weight_deduction,
                "effective quantity is negative after weight deduction"
            );
        }
        let amount = effective_quantity * rate;

        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit: item.unit.clone(),
            quantity,
            rate,
            bunches,
            weight_deduction,
            effective_quantity,
            amount,
        }
    }
}
