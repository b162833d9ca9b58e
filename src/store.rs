//! Profile, client and payment records.
//!
//! Records are scoped by an owner id. [`TomlStore`] keeps one directory of
//! TOML files per owner under the data root:
//!
//! ```text
//! <root>/data/<owner>/profile.toml
//! <root>/data/<owner>/clients.toml
//! <root>/data/<owner>/payment.toml
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use slug::slugify;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::{Client, ClientId, ClientInput, PaymentDetails, Profile};

pub type StoreResult<T> = Result<T, StoreError>;

/// Lookup/insert/update/delete over the owner's records.
pub trait RecordStore {
    fn profile(&self, owner: &str) -> StoreResult<Option<Profile>>;
    fn save_profile(&self, owner: &str, profile: &Profile) -> StoreResult<()>;

    /// Newest first.
    fn clients(&self, owner: &str) -> StoreResult<Vec<Client>>;
    fn insert_client(&self, owner: &str, input: ClientInput) -> StoreResult<Client>;
    fn update_client(&self, owner: &str, id: &ClientId, input: ClientInput) -> StoreResult<Client>;
    fn delete_client(&self, owner: &str, id: &ClientId) -> StoreResult<()>;

    fn payment_details(&self, owner: &str) -> StoreResult<Option<PaymentDetails>>;
    fn save_payment_details(&self, owner: &str, details: &PaymentDetails) -> StoreResult<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ClientFile {
    #[serde(default)]
    clients: Vec<Client>,
}

#[derive(Debug, Clone)]
pub struct TomlStore {
    root: PathBuf,
}

impl TomlStore {
    /// `data_root` is the user's data directory; records go under `data/`.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            root: data_root.into().join("data"),
        }
    }

    fn owner_dir(&self, owner: &str) -> PathBuf {
        let dir = slugify(owner);
        self.root.join(if dir.is_empty() { "default".to_string() } else { dir })
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> StoreResult<Option<T>> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write<T: Serialize>(&self, path: &Path, value: &T) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let toml_str = toml::to_string_pretty(value)?;
        fs::write(path, toml_str).map_err(io_err)
    }

    fn read_clients(&self, owner: &str) -> StoreResult<(PathBuf, ClientFile)> {
        let path = self.owner_dir(owner).join("clients.toml");
        let file = self.read(&path)?.unwrap_or_default();
        Ok((path, file))
    }
}

impl RecordStore for TomlStore {
    fn profile(&self, owner: &str) -> StoreResult<Option<Profile>> {
        self.read(&self.owner_dir(owner).join("profile.toml"))
    }

    fn save_profile(&self, owner: &str, profile: &Profile) -> StoreResult<()> {
        self.write(&self.owner_dir(owner).join("profile.toml"), profile)?;
        tracing::debug!(owner, "profile saved");
        Ok(())
    }

    fn clients(&self, owner: &str) -> StoreResult<Vec<Client>> {
        let (_, file) = self.read_clients(owner)?;
        let mut clients = file.clients;
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clients)
    }

    fn insert_client(&self, owner: &str, input: ClientInput) -> StoreResult<Client> {
        let (path, mut file) = self.read_clients(owner)?;
        let id = unique_client_id(&input.client_name, &file.clients);
        let client = Client::from_input(id, input, Utc::now());
        file.clients.push(client.clone());
        self.write(&path, &file)?;
        tracing::debug!(owner, client_id = %client.id, "client inserted");
        Ok(client)
    }

    fn update_client(&self, owner: &str, id: &ClientId, input: ClientInput) -> StoreResult<Client> {
        let (path, mut file) = self.read_clients(owner)?;
        let client = file
            .clients
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::ClientNotFound(id.to_string()))?;
        client.apply(input);
        let updated = client.clone();
        self.write(&path, &file)?;
        tracing::debug!(owner, client_id = %id, "client updated");
        Ok(updated)
    }

    fn delete_client(&self, owner: &str, id: &ClientId) -> StoreResult<()> {
        let (path, mut file) = self.read_clients(owner)?;
        let before = file.clients.len();
        file.clients.retain(|c| &c.id != id);
        if file.clients.len() == before {
            return Err(StoreError::ClientNotFound(id.to_string()));
        }
        self.write(&path, &file)?;
        tracing::debug!(owner, client_id = %id, "client deleted");
        Ok(())
    }

    fn payment_details(&self, owner: &str) -> StoreResult<Option<PaymentDetails>> {
        self.read(&self.owner_dir(owner).join("payment.toml"))
    }

    fn save_payment_details(&self, owner: &str, details: &PaymentDetails) -> StoreResult<()> {
        self.write(&self.owner_dir(owner).join("payment.toml"), details)?;
        tracing::debug!(owner, "payment details saved");
        Ok(())
    }
}

// Slug of the client name, with "-2", "-3", ... appended until it is free.
fn unique_client_id(name: &str, existing: &[Client]) -> ClientId {
    let base = match slugify(name) {
        s if s.is_empty() => "client".to_string(),
        s => s,
    };
    let taken = |candidate: &str| existing.iter().any(|c| c.id.as_str() == candidate);

    if !taken(&base) {
        return ClientId::new(base);
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .map(ClientId::new)
        .unwrap_or_else(|| ClientId::new(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const OWNER: &str = "owner-1";

    fn store() -> (TempDir, TomlStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlStore::new(dir.path());
        (dir, store)
    }

    fn input(name: &str) -> ClientInput {
        ClientInput {
            client_name: name.to_string(),
            ..ClientInput::default()
        }
    }

    #[test]
    fn missing_files_read_as_no_records() {
        let (_dir, store) = store();
        assert_eq!(store.profile(OWNER).unwrap(), None);
        assert_eq!(store.payment_details(OWNER).unwrap(), None);
        assert!(store.clients(OWNER).unwrap().is_empty());
    }

    #[test]
    fn profile_is_saved_per_owner() {
        let (_dir, store) = store();
        let profile = Profile {
            business_name: Some("Ruiz Design".into()),
            city: Some("Springfield".into()),
            ..Profile::default()
        };
        store.save_profile(OWNER, &profile).unwrap();

        assert_eq!(store.profile(OWNER).unwrap(), Some(profile));
        assert_eq!(store.profile("someone-else").unwrap(), None);
    }

    #[test]
    fn payment_details_are_upserted() {
        let (_dir, store) = store();
        let mut details = PaymentDetails {
            cash_accepted: Some(true),
            upi_id: Some("ana@upi".into()),
            ..PaymentDetails::default()
        };
        store.save_payment_details(OWNER, &details).unwrap();
        details.bank_name = Some("First Bank".into());
        store.save_payment_details(OWNER, &details).unwrap();

        assert_eq!(store.payment_details(OWNER).unwrap(), Some(details));
    }

    #[test]
    fn inserted_clients_get_unique_slug_ids() {
        let (_dir, store) = store();
        let a = store.insert_client(OWNER, input("Jane Doe")).unwrap();
        let b = store.insert_client(OWNER, input("Jane Doe")).unwrap();
        let c = store.insert_client(OWNER, input("!!!")).unwrap();

        assert_eq!(a.id.as_str(), "jane-doe");
        assert_eq!(b.id.as_str(), "jane-doe-2");
        assert_eq!(c.id.as_str(), "client");
        assert_eq!(store.clients(OWNER).unwrap().len(), 3);
    }

    #[test]
    fn clients_are_listed_newest_first() {
        let (_dir, store) = store();
        store.insert_client(OWNER, input("First")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.insert_client(OWNER, input("Second")).unwrap();

        let names: Vec<_> = store
            .clients(OWNER)
            .unwrap()
            .into_iter()
            .map(|c| c.client_name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn update_and_delete_clients() {
        let (_dir, store) = store();
        let client = store.insert_client(OWNER, input("Jane Doe")).unwrap();

        let mut edit = client.to_input();
        edit.email = Some("jane@example.com".into());
        let updated = store.update_client(OWNER, &client.id, edit).unwrap();
        assert_eq!(updated.id, client.id);
        assert_eq!(updated.created_at, client.created_at);
        assert_eq!(updated.email.as_deref(), Some("jane@example.com"));

        store.delete_client(OWNER, &client.id).unwrap();
        assert!(store.clients(OWNER).unwrap().is_empty());
    }

    #[test]
    fn unknown_client_ids_are_reported() {
        let (_dir, store) = store();
        let ghost = ClientId::new("ghost");
        assert!(matches!(
            store.update_client(OWNER, &ghost, input("x")),
            Err(StoreError::ClientNotFound(_))
        ));
        assert!(matches!(
            store.delete_client(OWNER, &ghost),
            Err(StoreError::ClientNotFound(_))
        ));
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let (dir, store) = store();
        let owner_dir = dir.path().join("data").join(OWNER);
        fs::create_dir_all(&owner_dir).unwrap();
        fs::write(owner_dir.join("profile.toml"), "name = [").unwrap();
        assert!(matches!(store.profile(OWNER), Err(StoreError::Decode { .. })));
    }
}
