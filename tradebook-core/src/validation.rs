//! Field-level checks shared by the entry editors and session.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::models::{Catalog, DocumentKind, Item, LineItem, LineItemInput, Payment, PaymentInput};

/// Sum of line amounts on a document.
pub fn total_amount(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

/// Sum of payments recorded on a document.
pub fn total_paid(payments: &[Payment]) -> f64 {
    payments.iter().map(|payment| payment.amount).sum()
}

/// Balance a new payment may take, adding back the row being edited so
/// replacing a payment with a smaller or equal one always passes.
pub fn remaining_balance(total_amount: f64, total_paid: f64, editing_amount: Option<f64>) -> f64 {
    total_amount - total_paid + editing_amount.unwrap_or(0.0)
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Validate line-item input against the catalog.
///
/// Collects every failing field so a form can show all of them at once.
/// The negated comparisons reject NaN along with out-of-range values.
pub fn check_line_item<'a>(
    input: &LineItemInput,
    catalog: &'a Catalog,
) -> Result<&'a Item, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let item = match input.item_id {
        None => {
            errors.add("item", field_error("required", "select an item"));
            None
        }
        Some(id) => match catalog.item(id) {
            None => {
                errors.add("item", field_error("unknown", "item is not in the catalog"));
                None
            }
            Some(item) => Some(item),
        },
    };

    if !(input.quantity > 0.0) {
        errors.add(
            "quantity",
            field_error("positive", "quantity must be greater than zero"),
        );
    }
    if !(input.rate >= 0.0) {
        errors.add("rate", field_error("non_negative", "rate cannot be negative"));
    }

    match item {
        Some(item) if errors.is_empty() => Ok(item),
        _ => Err(errors),
    }
}

/// Validate payment input against the balance still open on the document.
pub fn check_payment(input: &PaymentInput, remaining: f64) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !(input.amount > 0.0) {
        errors.add(
            "amount",
            field_error("positive", "amount must be greater than zero"),
        );
    } else if input.amount > remaining {
        errors.add(
            "amount",
            field_error(
                "exceeds_balance",
                format!("amount exceeds the remaining balance of {remaining:.2}"),
            ),
        );
    }

    if input.method.requires_reference() && input.reference.trim().is_empty() {
        errors.add(
            "reference",
            field_error("required", "reference is required for this payment method"),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate that the chosen counterparty exists on the right side of the
/// book for this document kind.
pub fn check_party(
    kind: DocumentKind,
    party_id: i64,
    catalog: &Catalog,
) -> Result<(), ValidationErrors> {
    if catalog.party_name(kind, party_id).is_none() {
        let mut errors = ValidationErrors::new();
        errors.add(
            kind.party_field(),
            field_error(
                "unknown",
                format!("{} is not in the directory", kind.party_field()),
            ),
        );
        return Err(errors);
    }
    Ok(())
}

/// Validate that a document is complete enough to submit, returning the
/// counterparty id on success.
///
/// The payments-versus-total check exists because removing an item after
/// recording payments can leave the document overpaid.
pub fn check_submission(
    kind: DocumentKind,
    party_id: Option<i64>,
    items: &[LineItem],
    payments: &[Payment],
) -> Result<i64, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if party_id.is_none() {
        errors.add(
            kind.party_field(),
            field_error("required", format!("select a {}", kind.party_field())),
        );
    }
    if items.is_empty() {
        errors.add("items", field_error("empty", "add at least one item"));
    }

    let total = total_amount(items);
    let paid = total_paid(payments);
    if paid > total {
        errors.add(
            "payments",
            field_error(
                "exceeds_total",
                format!("payments of {paid:.2} exceed the document total of {total:.2}"),
            ),
        );
    }

    match party_id {
        Some(id) if errors.is_empty() => Ok(id),
        _ => Err(errors),
    }
}
