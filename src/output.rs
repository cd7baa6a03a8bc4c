//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled};

use murmur_core::error::AppError;
use murmur_entity::post::PostView;
use murmur_entity::user::AuthorSummary;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Post display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct PostRow {
    /// Post ID
    pub id: String,
    /// Title
    pub title: String,
    /// Author username
    pub author: String,
    /// Created at
    pub created: String,
    /// Viewer owns the post
    pub mine: String,
}

impl From<&PostView> for PostRow {
    fn from(post: &PostView) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.username.clone(),
            created: post.created_date.format("%Y-%m-%d %H:%M").to_string(),
            mine: if post.is_owner { "yes" } else { "" }.to_string(),
        }
    }
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    /// Username
    pub username: String,
    /// Avatar URL
    pub avatar: String,
}

impl From<AuthorSummary> for UserRow {
    fn from(user: AuthorSummary) -> Self {
        Self {
            username: user.username,
            avatar: user.avatar,
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print posts as rows
pub fn print_posts(posts: &[PostView], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<PostRow> = posts.iter().map(PostRow::from).collect();
            print_list(&rows, format);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(posts).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a single item in the selected format.
///
/// Table mode prints one `key: value` line per top-level field; nested
/// objects are flattened with dotted keys.
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => match serde_json::to_value(item) {
            Ok(value) => print_fields("", &value),
            Err(e) => print_error(&format!("Cannot display item: {e}")),
        },
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

fn print_fields(prefix: &str, value: &Value) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                print_fields(&key, field);
            }
        }
        Value::String(text) => print_kv(prefix, text),
        other => print_kv(prefix, &other.to_string()),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print every user-facing message an error carries
pub fn print_app_error(err: &AppError) {
    for message in err.messages() {
        print_error(&message);
    }
    if err.is_retryable() {
        eprintln!("  The data store is unavailable; try again shortly.");
    }
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
