//! Pretty output formatting.

use serde_json::Value;

use itemsync_core::item::Item;

/// Format an attribute value for display.
///
/// Strings are shown without quotes, everything else as compact JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format an item for display.
pub fn format_item(item: &Item) -> String {
    let mut output = format!("{}\n  ID: {}", item.title, item.id);
    for (name, value) in &item.fields {
        output.push_str(&format!("\n  {}: {}", name, format_value(value)));
    }
    output
}

/// Format an optional item for display.
pub fn format_maybe_item(item: Option<&Item>) -> String {
    match item {
        Some(item) => format_item(item),
        None => "Item not found.".to_string(),
    }
}

/// Format items for display.
pub fn format_items(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }
    let mut output = format!("ITEMS ({})\n", items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format_item(item)));
        output.push('\n');
    }
    output
}
