//! The whole state of an invoice being edited.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::line_items::LineItemStore;
use crate::model::Client;
use crate::store::RecordStore;
use crate::totals::{Adjustments, InvoiceTotals};

/// Everything the form holds: rows, adjustments and the two address blocks.
///
/// Totals are not part of the draft; call [`InvoiceDraft::totals`] whenever
/// they are needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceDraft {
    pub from: String,
    pub bill_to: String,
    pub adjustments: Adjustments,
    pub items: LineItemStore,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh draft with `from` filled from the owner's profile.
    ///
    /// A profile that can't be read leaves `from` empty; the form still opens.
    pub fn prefilled(store: &impl RecordStore, owner: &str) -> Self {
        let from = match store.profile(owner) {
            Ok(profile) => profile.map(|p| p.business_block()).unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, owner, "failed to load profile");
                String::new()
            }
        };
        Self {
            from,
            ..Self::default()
        }
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::compute(self.items.items(), &self.adjustments)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Draft {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// The owner's saved clients for the "Bill To" picker, or none if they
/// can't be read.
pub fn saved_clients(store: &impl RecordStore, owner: &str) -> Vec<Client> {
    store.clients(owner).unwrap_or_else(|e| {
        tracing::error!(error = %e, owner, "failed to fetch clients");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_items::ItemField;
    use crate::model::{ClientInput, Profile};
    use crate::store::TomlStore;

    const SAMPLE: &str = r#"
from = "Acme Studio\n12 Main St"
bill_to = "Jane Doe"

[adjustments]
tax_percent = 10.0
shipping_flat = 5.0

[[items]]
id = 1
description = "Design work"
quantity = 2.0
unit_rate = 50.0
discount_percent = 10.0

[[items]]
id = 1700000000000
description = "Hosting"
quantity = 1.0
unit_rate = 0.0
line_amount = 1234.0
"#;

    #[test]
    fn loads_toml_and_derives_totals() {
        let draft = InvoiceDraft::from_toml_str(SAMPLE).unwrap();
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.adjustments.global_discount_percent, 0.0);

        let totals = draft.totals();
        assert_eq!(totals.subtotal, 90.0);
        assert_eq!(totals.tax_amount, 9.0);
        assert_eq!(totals.grand_total, 104.0);
    }

    #[test]
    fn empty_draft_has_one_row() {
        let draft = InvoiceDraft::from_toml_str("").unwrap();
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.totals().grand_total, 0.0);
    }

    #[test]
    fn totals_follow_edits() {
        let mut draft = InvoiceDraft::new();
        let id = draft.items.items()[0].id;
        draft.items.update(id, ItemField::UnitRate, "100");
        assert_eq!(draft.totals().subtotal, 100.0);

        draft.items.update(id, ItemField::Quantity, "3");
        assert_eq!(draft.totals().subtotal, 300.0);
    }

    #[test]
    fn toml_survives_a_save_and_reload() {
        let mut draft = InvoiceDraft::from_toml_str(SAMPLE).unwrap();
        draft.items.add();
        let text = draft.to_toml_string().unwrap();
        let reloaded = InvoiceDraft::from_toml_str(&text).unwrap();
        assert_eq!(reloaded.items.items(), draft.items.items());
        assert_eq!(reloaded.totals(), draft.totals());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(InvoiceDraft::from_toml_str("items = 3").is_err());
    }

    #[test]
    fn prefill_uses_profile_and_clients() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlStore::new(dir.path());
        let profile = Profile {
            business_name: Some("Acme Studio".into()),
            city: Some("Springfield".into()),
            ..Profile::default()
        };
        store.save_profile("ana", &profile).unwrap();
        store
            .insert_client(
                "ana",
                ClientInput {
                    client_name: "Jane Doe".into(),
                    ..ClientInput::default()
                },
            )
            .unwrap();

        let draft = InvoiceDraft::prefilled(&store, "ana");
        assert_eq!(draft.from, "Acme Studio\nSpringfield");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(saved_clients(&store, "ana").len(), 1);
    }

    #[test]
    fn corrupt_records_still_open_a_blank_form() {
        let dir = tempfile::tempdir().unwrap();
        let owner_dir = dir.path().join("data").join("ana");
        fs::create_dir_all(&owner_dir).unwrap();
        fs::write(owner_dir.join("profile.toml"), "name = [").unwrap();
        fs::write(owner_dir.join("clients.toml"), "clients = {").unwrap();
        let store = TomlStore::new(dir.path());

        let draft = InvoiceDraft::prefilled(&store, "ana");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.from, "");
        assert_eq!(draft.bill_to, "");
        assert!(saved_clients(&store, "ana").is_empty());
    }
}
