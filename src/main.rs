use anyhow::Context as _;
use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use invoice_generator::config::{self, AppSettings};
use invoice_generator::draft::saved_clients;
use invoice_generator::render::money;
use invoice_generator::store::StoreResult;
use invoice_generator::{
    AdjustmentField, Client, ClientInput, InvoiceDraft, InvoiceRenderer, InvoiceTotals, ItemField,
    ItemId, LineItemStore, PaymentDetails, Profile, RecordStore, TomlStore, telemetry,
};

// ==========================================
// CLI
// ==========================================

#[derive(Parser)]
#[command(name = "invoice-generator", version, about = "Create invoices from the terminal")]
struct Cli {
    /// Write logs as JSON lines (stderr)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new invoice
    New,
    /// Render an invoice from a draft file without prompting
    Render {
        /// Draft file (TOML)
        draft: PathBuf,
        /// Output directory (defaults to the configured output folder)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the totals of a draft file
    Totals {
        /// Draft file (TOML)
        draft: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved clients
    Clients,
    /// Add a new client
    AddClient,
    /// Edit a saved client
    EditClient,
    /// Delete a saved client
    RemoveClient,
    /// Edit your business profile
    Profile,
    /// Edit your payment details
    Payment,
    /// Configure data directory and owner
    Config,
    /// Open output folder
    Open,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.log_json);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_cancelled(&e) => {
            println!("Cancelled");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Render { draft, out } => render_draft(&draft, out),
        Commands::Totals { draft, json } => show_totals(&draft, json),
        Commands::Config => setup_config_wizard().map(|_| ()),
        Commands::New => with_store(new_invoice),
        Commands::Clients => with_store(list_clients),
        Commands::AddClient => with_store(|s, st| add_client(s, st).map(|_| ())),
        Commands::EditClient => with_store(edit_client),
        Commands::RemoveClient => with_store(remove_client),
        Commands::Profile => with_store(edit_profile),
        Commands::Payment => with_store(edit_payment),
        Commands::Open => settings_or_wizard().and_then(|s| open_output(&s)),
    }
}

fn with_store(
    command: impl FnOnce(&AppSettings, &TomlStore) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let settings = settings_or_wizard()?;
    let store = TomlStore::new(settings.root());
    command(&settings, &store)
}

fn is_cancelled(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

/// What the invoice session does after one of its steps fails.
#[derive(Debug, PartialEq, Eq)]
enum Recovery {
    /// Ctrl-C: leave the session.
    Exit,
    /// Esc on a prompt: drop that step, keep the draft.
    BackToMenu,
    /// Anything else: tell the user, keep the draft.
    Report,
}

fn recovery_for(e: &anyhow::Error) -> Recovery {
    match e.downcast_ref::<InquireError>() {
        Some(InquireError::OperationInterrupted) => Recovery::Exit,
        Some(InquireError::OperationCanceled) => Recovery::BackToMenu,
        _ => Recovery::Report,
    }
}

// ==========================================
// 1. Invoice Session
// ==========================================

#[derive(Debug, Clone, Copy)]
enum Action {
    AddItem,
    EditItem,
    RemoveItem,
    SetAdjustment(AdjustmentField),
    EditFrom,
    EditBillTo,
    Create,
    Cancel,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddItem => write!(f, "➕ Add item"),
            Action::EditItem => write!(f, "✏️  Edit item"),
            Action::RemoveItem => write!(f, "🗑  Remove item"),
            Action::SetAdjustment(field) => write!(f, "🔧 Set {field}"),
            Action::EditFrom => write!(f, "🏢 Edit From"),
            Action::EditBillTo => write!(f, "👤 Edit Bill To"),
            Action::Create => write!(f, "✅ Create invoice"),
            Action::Cancel => write!(f, "❌ Cancel"),
        }
    }
}

const ACTIONS: [Action; 10] = [
    Action::AddItem,
    Action::EditItem,
    Action::RemoveItem,
    Action::SetAdjustment(AdjustmentField::GlobalDiscountPercent),
    Action::SetAdjustment(AdjustmentField::TaxPercent),
    Action::SetAdjustment(AdjustmentField::ShippingFlat),
    Action::EditFrom,
    Action::EditBillTo,
    Action::Create,
    Action::Cancel,
];

/// A row as shown in a picker.
struct RowChoice {
    position: usize,
    id: ItemId,
    description: String,
    amount: f64,
}

impl fmt::Display for RowChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = if self.description.is_empty() {
            "(no description)"
        } else {
            self.description.as_str()
        };
        write!(f, "{}. {} | ${}", self.position, description, money(self.amount))
    }
}

fn new_invoice(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<()> {
    let mut draft = InvoiceDraft::prefilled(store, &settings.owner);
    let clients = saved_clients(store, &settings.owner);
    if !clients.is_empty() {
        match choose_bill_to(&clients) {
            Ok(bill_to) => draft.bill_to = bill_to,
            Err(e) if recovery_for(&e) == Recovery::Exit => return Err(e),
            Err(_) => {}
        }
    }

    println!("\n--- New Invoice ---");
    println!("💡 Tip: Use '\\n' for new lines in the From / Bill To blocks.");

    loop {
        print_draft(&draft);
        let action = match Select::new("What next?", ACTIONS.to_vec())
            .with_page_size(ACTIONS.len())
            .prompt()
        {
            Ok(action) => action,
            Err(InquireError::OperationCanceled) => Action::Cancel,
            Err(e) => return Err(e.into()),
        };

        match session_step(settings, &mut draft, &clients, action) {
            Ok(Step::Continue) => {}
            Ok(Step::Done) => return Ok(()),
            Err(e) => match recovery_for(&e) {
                Recovery::Exit => return Err(e),
                Recovery::BackToMenu => println!("↩️  Back to menu."),
                Recovery::Report => {
                    let message = format!("{e:#}");
                    tracing::error!(error = %message, "invoice step failed");
                    println!("❌ {message}");
                }
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Done,
}

/// Runs one menu action against the draft. An error leaves the draft as it
/// was at the point of failure.
fn session_step(
    settings: &AppSettings,
    draft: &mut InvoiceDraft,
    clients: &[Client],
    action: Action,
) -> anyhow::Result<Step> {
    match action {
        Action::AddItem => {
            let id = draft.items.add();
            for field in ItemField::ALL {
                prompt_item_field(&mut draft.items, id, field)?;
            }
        }
        Action::EditItem => {
            let id = pick_row(&draft.items, "Select item to edit:")?;
            let field = Select::new("Field:", ItemField::ALL.to_vec()).prompt()?;
            prompt_item_field(&mut draft.items, id, field)?;
        }
        Action::RemoveItem => {
            if draft.items.len() == 1 {
                println!("⚠️  An invoice needs at least one item.");
                return Ok(Step::Continue);
            }
            let id = pick_row(&draft.items, "Select item to remove:")?;
            draft.items.remove(id);
        }
        Action::SetAdjustment(field) => {
            let current = draft.adjustments.get(field).to_string();
            let input = Text::new(&format!("{field}:")).with_default(&current).prompt()?;
            draft.adjustments.set_raw(field, &input);
        }
        Action::EditFrom => {
            draft.from = prompt_block("From (your business details):", &draft.from)?;
        }
        Action::EditBillTo => {
            draft.bill_to = if clients.is_empty() {
                prompt_block("Bill To (client details):", &draft.bill_to)?
            } else {
                choose_bill_to(clients)?
            };
        }
        Action::Create => {
            let path = create_invoice(settings, draft)?;
            open_and_reveal(&path);
            return Ok(Step::Done);
        }
        Action::Cancel => {
            if Confirm::new("Discard this invoice?").with_default(false).prompt()? {
                println!("Invoice discarded.");
                return Ok(Step::Done);
            }
        }
    }
    Ok(Step::Continue)
}

fn choose_bill_to(clients: &[Client]) -> anyhow::Result<String> {
    const MANUAL: &str = "✏️  Enter details manually";
    let mut options = vec![MANUAL.to_string()];
    options.extend(clients.iter().map(Client::label));

    let choice = Select::new("Bill To (type to filter):", options).raw_prompt()?;
    if choice.index == 0 {
        return prompt_block("Bill To (client details):", "");
    }
    Ok(clients[choice.index - 1].bill_to_block())
}

fn pick_row(items: &LineItemStore, prompt: &str) -> anyhow::Result<ItemId> {
    let rows: Vec<RowChoice> = items
        .items()
        .iter()
        .enumerate()
        .map(|(n, item)| RowChoice {
            position: n + 1,
            id: item.id,
            description: item.description.clone(),
            amount: item.line_amount,
        })
        .collect();
    Ok(Select::new(prompt, rows).prompt()?.id)
}

fn prompt_item_field(
    items: &mut LineItemStore,
    id: ItemId,
    field: ItemField,
) -> anyhow::Result<()> {
    let Some(item) = items.get(id) else {
        return Ok(());
    };
    let current = match field {
        ItemField::Description => item.description.clone(),
        ItemField::Quantity => item.quantity.to_string(),
        ItemField::UnitRate => item.unit_rate.to_string(),
        ItemField::DiscountPercent => item.discount_percent.to_string(),
    };
    let input = Text::new(&format!("{field}:")).with_default(&current).prompt()?;
    items.update(id, field, input);
    Ok(())
}

fn prompt_block(prompt: &str, current: &str) -> anyhow::Result<String> {
    let escaped = current.replace('\n', "\\n");
    let input = Text::new(prompt).with_default(&escaped).prompt()?;
    Ok(input.replace("\\n", "\n").trim().to_string())
}

/// The user's template if it loads, the built-in one otherwise.
fn renderer_for(template_dir: Option<&Path>) -> anyhow::Result<InvoiceRenderer> {
    let Some(dir) = template_dir else {
        return Ok(InvoiceRenderer::embedded()?);
    };
    match InvoiceRenderer::from_dir(dir) {
        Ok(r) => Ok(r),
        Err(e) => {
            tracing::warn!(error = %e, "custom template unusable, falling back to built-in");
            println!("⚠️  Template in {} is unusable, using the built-in one.", dir.display());
            Ok(InvoiceRenderer::embedded()?)
        }
    }
}

fn create_invoice(settings: &AppSettings, draft: &InvoiceDraft) -> anyhow::Result<PathBuf> {
    let renderer = renderer_for(Some(&settings.template_dir()))?;
    let rendered = renderer.render(draft, Utc::now())?;
    let path = rendered
        .save(&settings.output_dir())
        .context("failed to save invoice")?;
    println!("✅ Invoice {} saved: {}", rendered.invoice_number, path.display());
    Ok(path)
}

// ==========================================
// 2. Draft Files
// ==========================================

fn render_draft(draft_path: &Path, out: Option<PathBuf>) -> anyhow::Result<()> {
    let draft = InvoiceDraft::load(draft_path)?;
    let settings = config::load_settings().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable settings");
        None
    });

    let template_dir = settings.as_ref().map(AppSettings::template_dir);
    let renderer = renderer_for(template_dir.as_deref())?;
    let out_dir = out
        .or_else(|| settings.as_ref().map(AppSettings::output_dir))
        .unwrap_or_else(|| PathBuf::from("."));

    let rendered = renderer.render(&draft, Utc::now())?;
    let path = rendered.save(&out_dir)?;
    println!("{}", path.display());
    Ok(())
}

fn show_totals(draft_path: &Path, json: bool) -> anyhow::Result<()> {
    let draft = InvoiceDraft::load(draft_path)?;
    let totals = draft.totals();
    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    } else {
        println!("{}", items_table(&draft.items));
        println!("{}", totals_table(&totals));
    }
    Ok(())
}

// ==========================================
// 3. Tables
// ==========================================

fn print_draft(draft: &InvoiceDraft) {
    println!("\n{}", items_table(&draft.items));
    println!("{}", totals_table(&draft.totals()));
}

fn items_table(items: &LineItemStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Description"),
        Cell::new("Qty"),
        Cell::new("Rate"),
        Cell::new("Discount"),
        Cell::new("Amount"),
    ]);
    for (n, item) in items.items().iter().enumerate() {
        table.add_row(vec![
            Cell::new(n + 1),
            Cell::new(&item.description),
            Cell::new(item.quantity).set_alignment(CellAlignment::Right),
            Cell::new(format!("${}", money(item.unit_rate))).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}%", item.discount_percent)).set_alignment(CellAlignment::Right),
            Cell::new(format!("${}", money(item.line_amount))).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn totals_table(totals: &InvoiceTotals) -> Table {
    let mut table = Table::new();
    let line = |label: &str, value: String| {
        vec![Cell::new(label), Cell::new(value).set_alignment(CellAlignment::Right)]
    };
    table.add_row(line("Subtotal", format!("${}", money(totals.subtotal))));
    table.add_row(line("Discount", format!("-${}", money(totals.discount_amount))));
    table.add_row(line("Tax", format!("${}", money(totals.tax_amount))));
    table.add_row(line("Shipping", format!("${}", money(totals.shipping))));

    let total_cell = Cell::new(format!("${}", money(totals.grand_total)))
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right);
    let total_cell = if totals.grand_total < 0.0 {
        total_cell.fg(Color::Rgb { r: 185, g: 28, b: 28 })
    } else {
        total_cell.fg(Color::Rgb { r: 4, g: 120, b: 87 })
    };
    table.add_row(vec![Cell::new("Total").add_attribute(Attribute::Bold), total_cell]);
    table
}

// ==========================================
// 4. Clients
// ==========================================

/// Logs a failed save and hands it back with a user-facing message.
fn report_save<T>(result: StoreResult<T>, what: &str) -> anyhow::Result<T> {
    result.map_err(|e| {
        tracing::error!(error = %e, "{what} failed");
        anyhow::Error::new(e).context(format!("Error {what}"))
    })
}

fn fetch_clients(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<Vec<Client>> {
    store
        .clients(&settings.owner)
        .inspect_err(|e| tracing::error!(error = %e, "failed to fetch clients"))
        .context("Error fetching clients")
}

fn list_clients(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<()> {
    let clients = fetch_clients(settings, store)?;
    if clients.is_empty() {
        println!("(No clients yet. Add one with `add-client`.)");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Id"),
        Cell::new("Name"),
        Cell::new("Business"),
        Cell::new("Email"),
        Cell::new("Phone"),
        Cell::new("Added"),
    ]);
    for c in &clients {
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.client_name),
            Cell::new(c.business_name.as_deref().unwrap_or("")),
            Cell::new(c.email.as_deref().unwrap_or("")),
            Cell::new(c.phone.as_deref().unwrap_or("")),
            Cell::new(c.created_at.format("%m/%d/%Y")),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn add_client(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<Client> {
    println!("\n--- Creating New Client ---");
    let input = client_form(&ClientInput::default())?;
    let client = report_save(store.insert_client(&settings.owner, input), "adding client")?;
    println!("✅ Client added: {} ({})", client.client_name, client.id);
    Ok(client)
}

fn edit_client(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<()> {
    let Some(client) = pick_client(settings, store, "Select client to edit:")? else {
        return Ok(());
    };
    let input = client_form(&client.to_input())?;
    report_save(store.update_client(&settings.owner, &client.id, input), "updating client")?;
    println!("✅ Client updated.");
    Ok(())
}

fn remove_client(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<()> {
    let Some(client) = pick_client(settings, store, "Select client to delete:")? else {
        return Ok(());
    };
    let sure = Confirm::new(&format!("Are you sure you want to delete {}?", client.label()))
        .with_default(false)
        .prompt()?;
    if sure {
        report_save(store.delete_client(&settings.owner, &client.id), "deleting client")?;
        println!("✅ Client deleted.");
    }
    Ok(())
}

fn pick_client(
    settings: &AppSettings,
    store: &TomlStore,
    prompt: &str,
) -> anyhow::Result<Option<Client>> {
    let mut clients = fetch_clients(settings, store)?;
    if clients.is_empty() {
        println!("❌ No clients found.");
        return Ok(None);
    }
    let labels: Vec<String> = clients.iter().map(Client::label).collect();
    let choice = Select::new(prompt, labels).raw_prompt()?;
    Ok(Some(clients.swap_remove(choice.index)))
}

fn client_form(current: &ClientInput) -> anyhow::Result<ClientInput> {
    let mut name = Text::new("Client Name:").with_default(&current.client_name).prompt()?;
    while name.trim().is_empty() {
        println!("⚠️  Client name is required.");
        name = Text::new("Client Name:").prompt()?;
    }
    Ok(ClientInput {
        client_name: name.trim().to_string(),
        business_name: optional_text(
            "Business Name (Optional):",
            current.business_name.as_deref(),
        )?,
        address: optional_text("Address (Optional):", current.address.as_deref())?,
        email: optional_text("Email (Optional):", current.email.as_deref())?,
        phone: optional_text("Phone (Optional):", current.phone.as_deref())?,
    })
}

// ==========================================
// 5. Profile & Payment Details
// ==========================================

fn edit_profile(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<()> {
    let current = store.profile(&settings.owner).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to fetch profile");
        None
    });
    let p = current.unwrap_or_default();

    println!("\n--- Business Profile ---");
    let mut profile = Profile {
        name: optional_text("Your Name:", p.name.as_deref())?,
        business_name: optional_text("Business Name:", p.business_name.as_deref())?,
        phone: optional_text("Phone:", p.phone.as_deref())?,
        building_no: optional_text("Building No.:", p.building_no.as_deref())?,
        street_name: optional_text("Street:", p.street_name.as_deref())?,
        locality: optional_text("Locality:", p.locality.as_deref())?,
        zip_code: optional_text("Zip Code (Leave empty to skip lookup):", p.zip_code.as_deref())?,
        ..Profile::default()
    };

    let (mut def_city, mut def_state) = (p.city.clone(), p.state.clone());
    if let Some(zip) = &profile.zip_code {
        if let Some(info) = zipcodes::matching(zip, None).ok().and_then(|r| r.into_iter().next()) {
            println!("🚀 Found: {}, {}", info.city, info.state);
            def_city = Some(info.city.to_string());
            def_state = Some(info.state.to_string());
        }
    }
    profile.city = optional_text("City:", def_city.as_deref())?;
    profile.state = optional_text("State:", def_state.as_deref())?;
    profile.country = optional_text("Country:", p.country.as_deref())?;

    report_save(store.save_profile(&settings.owner, &profile), "updating profile")?;
    println!("✅ Profile saved.");
    Ok(())
}

fn edit_payment(settings: &AppSettings, store: &TomlStore) -> anyhow::Result<()> {
    let current = store.payment_details(&settings.owner).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to fetch payment details");
        None
    });
    let d = current.unwrap_or_default();

    println!("\n--- Payment Details ---");
    let details = PaymentDetails {
        cash_accepted: Some(
            Confirm::new("Accept cash?")
                .with_default(d.cash_accepted.unwrap_or(false))
                .prompt()?,
        ),
        paypal_email: optional_text("PayPal Email:", d.paypal_email.as_deref())?,
        upi_id: optional_text("UPI Id:", d.upi_id.as_deref())?,
        payment_link: optional_text("Payment Link:", d.payment_link.as_deref())?,
        bank_name: optional_text("Bank Name:", d.bank_name.as_deref())?,
        account_holder_name: optional_text(
            "Account Holder Name:",
            d.account_holder_name.as_deref(),
        )?,
        account_number: optional_text("Account Number:", d.account_number.as_deref())?,
        account_type: optional_text("Account Type:", d.account_type.as_deref())?,
        ifsc_swift_code: optional_text("IFSC / SWIFT Code:", d.ifsc_swift_code.as_deref())?,
    };

    report_save(store.save_payment_details(&settings.owner, &details), "updating payment details")?;
    println!("✅ Payment details saved.");
    Ok(())
}

fn optional_text(prompt: &str, current: Option<&str>) -> anyhow::Result<Option<String>> {
    let input = Text::new(prompt).with_default(current.unwrap_or("")).prompt()?;
    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

// ==========================================
// 6. Config & Utilities
// ==========================================

fn settings_or_wizard() -> anyhow::Result<AppSettings> {
    match config::load_settings() {
        Ok(Some(settings)) => Ok(settings),
        Ok(None) => setup_config_wizard(),
        Err(e) => {
            tracing::warn!(error = %e, "settings unreadable, running setup again");
            setup_config_wizard()
        }
    }
}

fn setup_config_wizard() -> anyhow::Result<AppSettings> {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = config::load_settings().ok().flatten().unwrap_or_default();

    println!("📂 Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Root Data Directory")
        .pick_folder();

    let data_root = match picked_path {
        Some(path) => path.to_string_lossy().to_string(),
        None => {
            println!("❌ No folder selected. Falling back to manual input.");
            Text::new("Enter Root Data Directory:")
                .with_default(&current.data_root)
                .prompt()?
        }
    };
    let owner = Text::new("Owner id (scopes your profile and clients):")
        .with_default(&current.owner)
        .prompt()?;

    let settings = AppSettings {
        data_root,
        owner: owner.trim().to_string(),
    };
    let path = config::save_settings(&settings)?;
    println!("✅ Settings saved to {}", path.display());
    Ok(settings)
}

fn open_output(settings: &AppSettings) -> anyhow::Result<()> {
    let target = settings.output_dir();
    std::fs::create_dir_all(&target)
        .with_context(|| format!("failed to create {}", target.display()))?;
    println!("🚀 Opening: {}", target.display());
    open_path(&target);
    Ok(())
}

fn open_path(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(path).spawn().ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path).spawn().ok();
}

// Helper: reveal the file in Finder/Explorer, then open it
fn open_and_reveal(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg("-R").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer")
        .arg(format!("/select,{}", path.to_string_lossy()))
        .spawn()
        .ok();

    open_path(path);
}
