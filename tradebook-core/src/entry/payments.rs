//! Payment editor: partial payments capped by the document balance.

use validator::ValidationErrors;

use super::EditState;
use crate::models::{Payment, PaymentInput};
use crate::validation;

/// Builds the payment list of an in-progress document.
///
/// The already-paid figure is always derived from the rows it holds, so
/// the remaining-balance cap cannot drift from the list it guards.
#[derive(Debug, Default)]
pub struct PaymentEditor {
    payments: Vec<Payment>,
    state: EditState,
}

impl PaymentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.state.editing_index()
    }

    /// Sum of all recorded payments.
    pub fn total(&self) -> f64 {
        validation::total_paid(&self.payments)
    }

    /// Validate against the balance still open on the document and commit.
    ///
    /// When a row is under edit its own amount is added back to the cap
    /// first, so an edit never counts against itself.
    pub fn add_or_update(
        &mut self,
        input: &PaymentInput,
        document_total: f64,
    ) -> Result<&Payment, ValidationErrors> {
        let editing_amount = self
            .state
            .editing_index()
            .map(|index| self.payments[index].amount);
        let remaining = validation::remaining_balance(document_total, self.total(), editing_amount);
        validation::check_payment(input, remaining)?;

        let payment = Payment::from_input(input);
        let index = match self.state.editing_index() {
            Some(index) => {
                self.payments[index] = payment;
                index
            }
            None => {
                self.payments.push(payment);
                self.payments.len() - 1
            }
        };
        self.state = EditState::Idle;

        Ok(&self.payments[index])
    }

    /// Start editing a row, handing back its values for the form fields.
    pub fn edit(&mut self, index: usize) -> Option<PaymentInput> {
        let row = self.payments.get(index)?;
        let input = PaymentInput {
            amount: row.amount,
            method: row.method,
            reference: row.reference.clone().unwrap_or_default(),
        };
        self.state = EditState::Editing(index);
        Some(input)
    }

    pub fn cancel_edit(&mut self) {
        self.state = EditState::Idle;
    }

    /// Remove a row. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.payments.len() {
            return;
        }
        self.payments.remove(index);
        self.state.after_remove(index);
    }

    /// Replace the whole list when repopulating from a stored document.
    pub(crate) fn load(&mut self, payments: Vec<Payment>) {
        self.payments = payments;
        self.state = EditState::Idle;
    }
}
