//! Health check operations.

use super::ItemsyncClient;
use crate::error::{ClientError, Result};

impl ItemsyncClient {
    /// Check that the server is accepting connections.
    pub async fn livez(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: "Liveness check failed".to_string(),
            })
        }
    }
}
