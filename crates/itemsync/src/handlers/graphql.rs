//! Resolver invocation endpoints.
//!
//! Both routes take an AppSync-style invocation body:
//!
//! ```json
//! {"typeName": "Query", "fieldName": "getItemByTitle", "arguments": {"title": "Dune"}}
//! ```

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use itemsync_core::operation::{Invocation, OperationResult};

use crate::handlers::AppError;
use crate::state::AppState;

/// Successful invocation response.
#[derive(Debug, Serialize)]
pub struct GraphqlResponse {
    pub data: OperationResult,
}

/// POST /graphql - Resolve an invocation and issue its storage call.
#[axum::debug_handler]
pub async fn graphql(
    State(state): State<AppState>,
    Json(invocation): Json<Invocation>,
) -> Result<Json<GraphqlResponse>, AppError> {
    let type_name = invocation.type_name;
    let field_name = invocation.field_name.as_str();

    let resolution = match state.resolver.plan(&invocation) {
        Ok(resolution) => resolution,
        Err(error) => {
            tracing::warn!(%type_name, field_name, %error, "Invocation rejected");
            return Err(error.into());
        }
    };

    tracing::debug!(
        %type_name,
        field_name,
        request = %resolution.request.render(&state.schema),
        "Issuing storage request"
    );

    match state.resolver.run(resolution).await {
        Ok(data) => {
            tracing::info!(%type_name, field_name, items = data.len(), "Invocation resolved");
            Ok(Json(GraphqlResponse { data }))
        }
        Err(error) => {
            tracing::error!(%type_name, field_name, %error, "Invocation failed");
            Err(error.into())
        }
    }
}

/// POST /explain - Resolve an invocation without touching the store.
///
/// Returns the storage request document the invocation maps to. For `addItem`
/// without an `id`, the generated id is shown but nothing is written.
#[axum::debug_handler]
pub async fn explain(
    State(state): State<AppState>,
    Json(invocation): Json<Invocation>,
) -> Result<Json<Value>, AppError> {
    let resolution = state.resolver.plan(&invocation)?;
    Ok(Json(resolution.request.render(&state.schema)))
}
