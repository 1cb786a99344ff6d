//! One in-progress purchase or sale document, from first fetch to submit.

use chrono::{NaiveDate, Utc};
use validator::ValidationErrors;

use super::{LineItemEditor, PaymentEditor};
use crate::error::EntryError;
use crate::models::{
    Catalog, DeductionPolicy, Document, DocumentKind, DocumentPayload, LineItem, LineItemInput,
    Payment, PaymentInput,
};
use crate::sources::{BalanceLoader, BalanceSource, DocumentStore, ReferenceDataSource};
use crate::validation;

/// Form session for one document.
///
/// Owns the catalog snapshot, both editors, and the party-balance loader.
/// All state is scoped to the session; nothing is shared across sessions.
#[derive(Debug)]
pub struct EntrySession {
    kind: DocumentKind,
    catalog: Catalog,
    party_id: Option<i64>,
    date: NaiveDate,
    items: LineItemEditor,
    payments: PaymentEditor,
    balance_loader: BalanceLoader,
    party_balance: Option<f64>,
    document_id: Option<i64>,
}

impl EntrySession {
    /// Start a fresh session, fetching reference data once up front.
    pub async fn begin<R>(
        kind: DocumentKind,
        policy: DeductionPolicy,
        reference: &R,
    ) -> Result<Self, EntryError>
    where
        R: ReferenceDataSource + ?Sized,
    {
        let catalog = reference.catalog().await?;
        tracing::info!(
            kind = %kind,
            items = catalog.items.len(),
            "starting document entry session"
        );

        Ok(Self {
            kind,
            catalog,
            party_id: None,
            date: Utc::now().date_naive(),
            items: LineItemEditor::new(policy),
            payments: PaymentEditor::new(),
            balance_loader: BalanceLoader::new(),
            party_balance: None,
            document_id: None,
        })
    }

    /// Open an existing document for editing. Both editors are repopulated
    /// from the stored rows, and a later submit updates in place.
    pub async fn begin_edit<R, D>(
        kind: DocumentKind,
        id: i64,
        policy: DeductionPolicy,
        reference: &R,
        store: &D,
    ) -> Result<Self, EntryError>
    where
        R: ReferenceDataSource + ?Sized,
        D: DocumentStore + ?Sized,
    {
        let mut session = Self::begin(kind, policy, reference).await?;
        let document = store.fetch(kind, id).await?;

        session.party_id = document.party_id(kind);
        session.date = document.date;
        session.items.load(document.items);
        session.payments.load(document.payments);
        session.document_id = Some(document.id);

        Ok(session)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn party_id(&self) -> Option<i64> {
        self.party_id
    }

    pub fn party_name(&self) -> Option<&str> {
        self.party_id
            .and_then(|id| self.catalog.party_name(self.kind, id))
    }

    /// Latest balance snapshot for the selected party, if one has loaded.
    pub fn party_balance(&self) -> Option<f64> {
        self.party_balance
    }

    /// Id of the stored document, present once created or when editing.
    pub fn document_id(&self) -> Option<i64> {
        self.document_id
    }

    /// Choose the counterparty. Changing party invalidates the balance
    /// snapshot until the next refresh.
    pub fn select_party(&mut self, party_id: i64) -> Result<(), ValidationErrors> {
        validation::check_party(self.kind, party_id, &self.catalog)?;
        if self.party_id != Some(party_id) {
            self.party_balance = None;
        }
        self.party_id = Some(party_id);
        Ok(())
    }

    /// Fetch the selected party's balance. Superseded responses leave the
    /// snapshot untouched and return `Ok(None)`.
    pub async fn refresh_party_balance<S>(&mut self, source: &S) -> Result<Option<f64>, EntryError>
    where
        S: BalanceSource + ?Sized,
    {
        let party_id = match self.party_id {
            Some(id) => id,
            None => return Ok(None),
        };

        let snapshot = self
            .balance_loader
            .load(source, self.kind, party_id)
            .await?;
        if let Some(snapshot) = snapshot {
            self.party_balance = Some(snapshot.balance);
        }

        Ok(snapshot.map(|snapshot| snapshot.balance))
    }

    pub fn items(&self) -> &LineItemEditor {
        &self.items
    }

    pub fn payments(&self) -> &PaymentEditor {
        &self.payments
    }

    /// Blank line-item input prefilled from the catalog, the way the form
    /// behaves when an item is picked from the dropdown.
    pub fn prefill_item(&self, item_id: i64) -> Option<LineItemInput> {
        self.catalog.item(item_id).map(LineItemInput::for_item)
    }

    pub fn add_or_update_item(
        &mut self,
        input: &LineItemInput,
    ) -> Result<&LineItem, ValidationErrors> {
        self.items.add_or_update(input, &self.catalog)
    }

    pub fn edit_item(&mut self, index: usize) -> Option<LineItemInput> {
        self.items.edit(index)
    }

    pub fn cancel_item_edit(&mut self) {
        self.items.cancel_edit();
    }

    pub fn remove_item(&mut self, index: usize) {
        self.items.remove(index);
    }

    pub fn add_or_update_payment(
        &mut self,
        input: &PaymentInput,
    ) -> Result<&Payment, ValidationErrors> {
        let document_total = self.items.total();
        self.payments.add_or_update(input, document_total)
    }

    pub fn edit_payment(&mut self, index: usize) -> Option<PaymentInput> {
        self.payments.edit(index)
    }

    pub fn cancel_payment_edit(&mut self) {
        self.payments.cancel_edit();
    }

    pub fn remove_payment(&mut self, index: usize) {
        self.payments.remove(index);
    }

    pub fn total_amount(&self) -> f64 {
        self.items.total()
    }

    pub fn total_paid(&self) -> f64 {
        self.payments.total()
    }

    pub fn balance_due(&self) -> f64 {
        self.total_amount() - self.total_paid()
    }

    /// Run pre-submit validation and assemble the wire payload.
    pub fn payload(&self) -> Result<DocumentPayload, ValidationErrors> {
        let party_id = validation::check_submission(
            self.kind,
            self.party_id,
            self.items.items(),
            self.payments.payments(),
        )?;

        Ok(DocumentPayload::new(
            self.kind,
            party_id,
            self.date,
            self.items.items().to_vec(),
            self.payments.payments().to_vec(),
        ))
    }

    /// Submit the document, creating it or updating in place.
    ///
    /// There is no idempotency key; a resubmit after a transport failure
    /// can create a duplicate document.
    pub async fn submit<D>(&mut self, store: &D) -> Result<Document, EntryError>
    where
        D: DocumentStore + ?Sized,
    {
        let payload = self.payload()?;

        let document = match self.document_id {
            Some(id) => store.update(self.kind, id, &payload).await?,
            None => store.create(self.kind, &payload).await?,
        };

        tracing::info!(
            kind = %self.kind,
            id = document.id,
            total = document.total_amount(),
            paid = document.total_paid(),
            "document submitted"
        );
        self.document_id = Some(document.id);

        Ok(document)
    }
}
