//! Key attribute names and physical table/index naming.
//!
//! Pure functions and data. All names used when talking to the store come from
//! here so the resolver and every backend agree on them.

use crate::item::Item;

// ============================================================================
// Attribute names
// ============================================================================

/// Partition key of the table.
pub const PRIMARY_KEY_ATTRIBUTE: &str = "id";

/// Partition key of the secondary index.
pub const SECONDARY_KEY_ATTRIBUTE: &str = "title";

/// Fields `addItem` requires in its input.
pub const CREATION_FIELDS: &[&str] = &[SECONDARY_KEY_ATTRIBUTE];

/// Stack name used when none is configured.
pub const DEFAULT_STACK_NAME: &str = "ItemsyncStack";

const TABLE_SUFFIX: &str = "-table";
const INDEX_SUFFIX: &str = "-gsi";

// ============================================================================
// Naming
// ============================================================================

/// Derives the resource prefix from a stack name.
///
/// Pattern: lowercase the name and remove the first `stack` occurrence, so
/// `ItemsyncStack` becomes `itemsync`.
pub fn stack_prefix(stack_name: &str) -> String {
    stack_name.to_lowercase().replacen("stack", "", 1)
}

/// Key values extracted from an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKeys<'a> {
    pub primary: &'a str,
    pub secondary: &'a str,
}

/// Physical names of the item table and its secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub table_name: String,
    pub index_name: String,
}

impl KeySchema {
    /// Derives table and index names from a stack name.
    ///
    /// Pattern: `<prefix>-table` and `<prefix>-gsi`.
    pub fn from_stack_name(stack_name: &str) -> Self {
        let prefix = stack_prefix(stack_name);
        Self {
            table_name: format!("{prefix}{TABLE_SUFFIX}"),
            index_name: format!("{prefix}{INDEX_SUFFIX}"),
        }
    }

    /// Overrides the table name.
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Overrides the secondary index name.
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Partition key attribute of the table.
    pub fn partition_key(&self) -> &'static str {
        PRIMARY_KEY_ATTRIBUTE
    }

    /// Partition key attribute of the secondary index.
    pub fn index_partition_key(&self) -> &'static str {
        SECONDARY_KEY_ATTRIBUTE
    }

    /// Extracts the primary and secondary key values of an item.
    ///
    /// The secondary value is read from `title` as-is.
    pub fn keys_of<'a>(&self, item: &'a Item) -> ItemKeys<'a> {
        ItemKeys {
            primary: &item.id,
            secondary: &item.title,
        }
    }
}

impl Default for KeySchema {
    fn default() -> Self {
        Self::from_stack_name(DEFAULT_STACK_NAME)
    }
}
