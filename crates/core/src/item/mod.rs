mod types;

pub use types::{Item, ItemInput};
