//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use edilhub_entity::notification::Notification;
use edilhub_service::notification::describe;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
pub struct NotificationRow {
    /// Notification ID
    #[tabled(rename = "ID")]
    pub id: String,
    /// Event type label
    #[tabled(rename = "Tipo")]
    pub tipo: String,
    /// Referenced document
    #[tabled(rename = "Entità")]
    pub entita: String,
    /// Title
    #[tabled(rename = "Titolo")]
    pub titolo: String,
    /// Priority label
    #[tabled(rename = "Priorità")]
    pub priorita: String,
    /// Lifecycle state
    #[tabled(rename = "Stato")]
    pub stato: String,
    /// Creation time
    #[tabled(rename = "Creata")]
    pub created_at: String,
    /// Row version
    #[tabled(rename = "Ver")]
    pub version: i64,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        let display = describe(n);
        Self {
            id: n.id.to_string(),
            tipo: display.kind_label.to_string(),
            entita: format!("{} {}", display.entity_label, n.entita_id),
            titolo: n.titolo.clone(),
            priorita: display.priority_label.to_string(),
            stato: n.stato.to_string(),
            created_at: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
            version: n.version,
        }
    }
}

/// Print notifications in the selected format
pub fn print_notifications(items: &[Notification], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<NotificationRow> = items.iter().map(NotificationRow::from).collect();
            print_list(&rows, format);
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
