//! Turns a draft into a standalone HTML invoice.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

use crate::draft::InvoiceDraft;
use crate::error::RenderError;
use crate::line_items::LineItem;
use crate::totals::InvoiceTotals;

pub const MIME_TYPE: &str = "text/html";

const TEMPLATE_NAME: &str = "invoice.html";

// Embedded so a fresh install can always render.
const DEFAULT_TEMPLATE: &str = include_str!("../templates/invoice.html");

const FROM_PLACEHOLDER: &str = "Your Business Details";
const BILL_TO_PLACEHOLDER: &str = "Client Details";

#[derive(Serialize)]
struct RowContext {
    description: String,
    quantity: String,
    rate: String,
    discount: String,
    amount: String,
}

#[derive(Serialize)]
struct TotalsContext {
    subtotal: String,
    discount: String,
    tax: String,
    shipping: String,
    total: String,
}

#[derive(Serialize)]
struct InvoiceContext {
    invoice_number: String,
    from_lines: Vec<String>,
    bill_to_lines: Vec<String>,
    rows: Vec<RowContext>,
    totals: TotalsContext,
}

/// A rendered invoice, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInvoice {
    pub invoice_number: String,
    pub file_name: String,
    pub html: String,
}

impl RenderedInvoice {
    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// Writes the document into `dir` and returns its path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(dir).map_err(|source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.html).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), invoice = %self.invoice_number, "invoice saved");
        Ok(path)
    }
}

pub struct InvoiceRenderer {
    tera: Tera,
}

impl InvoiceRenderer {
    /// Renderer using the built-in template.
    pub fn embedded() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Renderer using `dir/invoice.html`, which is created from the built-in
    /// template the first time.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let template_path = dir.join(TEMPLATE_NAME);
        if !template_path.exists() {
            tracing::info!(path = %template_path.display(), "initializing default template");
            fs::create_dir_all(dir).map_err(|source| RenderError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            fs::write(&template_path, DEFAULT_TEMPLATE).map_err(|source| RenderError::Io {
                path: template_path.clone(),
                source,
            })?;
        }
        let tera = Tera::new(&dir.join("*.html").to_string_lossy())?;
        Ok(Self { tera })
    }

    /// Renders `draft` as of `issued_at`, which also names the invoice.
    pub fn render(
        &self,
        draft: &InvoiceDraft,
        issued_at: DateTime<Utc>,
    ) -> Result<RenderedInvoice, RenderError> {
        let stamp = issued_at.timestamp_millis();
        let invoice_number = format!("INV-{stamp}");
        let file_name = format!("invoice-{stamp}.html");

        let data = InvoiceContext {
            invoice_number: invoice_number.clone(),
            from_lines: block_lines(&draft.from, FROM_PLACEHOLDER),
            bill_to_lines: block_lines(&draft.bill_to, BILL_TO_PLACEHOLDER),
            rows: draft.items.items().iter().map(row_context).collect(),
            totals: totals_context(&draft.totals()),
        };
        let context = Context::from_serialize(&data)?;
        let html = self.tera.render(TEMPLATE_NAME, &context)?;

        Ok(RenderedInvoice {
            invoice_number,
            file_name,
            html,
        })
    }
}

/// Currency amounts always carry exactly two decimals.
pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn row_context(item: &LineItem) -> RowContext {
    let description = if item.description.is_empty() {
        "Item".to_string()
    } else {
        item.description.clone()
    };
    RowContext {
        description,
        quantity: item.quantity.to_string(),
        rate: money(item.unit_rate),
        discount: item.discount_percent.to_string(),
        amount: money(item.line_amount),
    }
}

fn totals_context(totals: &InvoiceTotals) -> TotalsContext {
    TotalsContext {
        subtotal: money(totals.subtotal),
        discount: money(totals.discount_amount),
        tax: money(totals.tax_amount),
        shipping: money(totals.shipping),
        total: money(totals.grand_total),
    }
}

fn block_lines(block: &str, placeholder: &str) -> Vec<String> {
    if block.trim().is_empty() {
        return vec![placeholder.to_string()];
    }
    block.lines().map(|l| l.trim_end().to_string()).collect()
}
