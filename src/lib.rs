//! Invoice generator.
//!
//! Line items are edited in a [`LineItemStore`], totals are derived on
//! demand by [`InvoiceTotals::compute`], and an [`InvoiceDraft`] is rendered
//! to a standalone HTML file by [`InvoiceRenderer`]. Business profile,
//! clients and payment details live in a [`RecordStore`].

pub mod config;
pub mod draft;
pub mod error;
pub mod line_items;
pub mod model;
pub mod numeric;
pub mod render;
pub mod store;
pub mod telemetry;
pub mod totals;

pub use draft::InvoiceDraft;
pub use error::{ConfigError, Error, RenderError, Result, StoreError};
pub use line_items::{FieldValue, ItemField, ItemId, LineItem, LineItemStore};
pub use model::{Client, ClientId, ClientInput, PaymentDetails, Profile};
pub use render::{InvoiceRenderer, RenderedInvoice, MIME_TYPE};
pub use store::{RecordStore, TomlStore};
pub use totals::{AdjustmentField, Adjustments, InvoiceTotals};
