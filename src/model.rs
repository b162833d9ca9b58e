use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The invoicing business, as kept in the owner's profile.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub building_no: Option<String>,
    pub street_name: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Profile {
    /// Multi-line "From" block for a new invoice.
    pub fn business_block(&self) -> String {
        let street = join_present(&[&self.building_no, &self.street_name], " ");
        let street = (!street.is_empty()).then_some(street);
        join_present(
            &[
                &self.business_name,
                &self.name,
                &street,
                &self.locality,
                &self.city,
                &self.state,
                &self.zip_code,
                &self.country,
                &self.phone,
            ],
            "\n",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable part of a client record; what the add/edit forms collect.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ClientInput {
    pub client_name: String,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub client_name: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn from_input(id: ClientId, input: ClientInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            client_name: input.client_name,
            business_name: input.business_name,
            address: input.address,
            email: input.email,
            phone: input.phone,
            created_at,
        }
    }

    pub fn apply(&mut self, input: ClientInput) {
        self.client_name = input.client_name;
        self.business_name = input.business_name;
        self.address = input.address;
        self.email = input.email;
        self.phone = input.phone;
    }

    pub fn to_input(&self) -> ClientInput {
        ClientInput {
            client_name: self.client_name.clone(),
            business_name: self.business_name.clone(),
            address: self.address.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// "Name (Business)", or just the name.
    pub fn label(&self) -> String {
        match self.business_name.as_deref().filter(|b| !b.is_empty()) {
            Some(business) => format!("{} ({})", self.client_name, business),
            None => self.client_name.clone(),
        }
    }

    /// Multi-line "Bill To" block for a new invoice.
    pub fn bill_to_block(&self) -> String {
        let name = Some(self.client_name.clone());
        join_present(
            &[&name, &self.business_name, &self.address, &self.email, &self.phone],
            "\n",
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PaymentDetails {
    pub cash_accepted: Option<bool>,
    pub paypal_email: Option<String>,
    pub upi_id: Option<String>,
    pub payment_link: Option<String>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<String>,
    pub ifsc_swift_code: Option<String>,
}

fn join_present(parts: &[&Option<String>], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
