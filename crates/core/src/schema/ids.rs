use uuid::Uuid;

/// Source of primary key values for items created without one.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh, non-empty identifier.
    fn generate(&self) -> String;
}

/// Generates random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
