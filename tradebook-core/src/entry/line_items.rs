//! Line-item editor: an ordered row list with add/edit/remove semantics.

use validator::ValidationErrors;

use super::EditState;
use crate::models::{Catalog, DeductionPolicy, LineItem, LineItemInput};
use crate::validation;

/// Builds the line-item list of an in-progress document.
///
/// Insertion order is display order. At most one row is being edited at a
/// time; committing, cancelling, or removing that row returns the editor
/// to idle.
#[derive(Debug, Default)]
pub struct LineItemEditor {
    items: Vec<LineItem>,
    state: EditState,
    policy: DeductionPolicy,
}

impl LineItemEditor {
    pub fn new(policy: DeductionPolicy) -> Self {
        Self {
            items: Vec::new(),
            state: EditState::Idle,
            policy,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.state.editing_index()
    }

    /// Sum of all row amounts.
    pub fn total(&self) -> f64 {
        validation::total_amount(&self.items)
    }

    /// Validate and commit the input, replacing the row under edit or
    /// appending a new one. A successful commit returns the editor to idle.
    pub fn add_or_update(
        &mut self,
        input: &LineItemInput,
        catalog: &Catalog,
    ) -> Result<&LineItem, ValidationErrors> {
        let item = validation::check_line_item(input, catalog)?;
        let row = LineItem::compute(item, input.quantity, input.rate, input.bunches, &self.policy);

        let index = match self.state.editing_index() {
            Some(index) => {
                self.items[index] = row;
                index
            }
            None => {
                self.items.push(row);
                self.items.len() - 1
            }
        };
        self.state = EditState::Idle;

        Ok(&self.items[index])
    }

    /// Start editing a row, handing back its values for the form fields.
    pub fn edit(&mut self, index: usize) -> Option<LineItemInput> {
        let row = self.items.get(index)?;
        let input = LineItemInput {
            item_id: Some(row.item_id),
            quantity: row.quantity,
            rate: row.rate,
            bunches: row.bunches,
        };
        self.state = EditState::Editing(index);
        Some(input)
    }

    pub fn cancel_edit(&mut self) {
        self.state = EditState::Idle;
    }

    /// Remove a row. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.items.remove(index);
        self.state.after_remove(index);
    }

    /// Replace the whole list, used when repopulating from a stored
    /// document. Rows loaded this way were validated on their way in.
    pub(crate) fn load(&mut self, items: Vec<LineItem>) {
        self.items = items;
        self.state = EditState::Idle;
    }
}
