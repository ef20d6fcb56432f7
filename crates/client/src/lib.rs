//! itemsync_client - CLI client for the itemsync API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::ItemsyncClient;
pub use error::{ClientError, Result};
