//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `itemsync_core::storage`.
//! Timeouts, dispatch failures, throttling and server errors are reported as
//! `Unavailable`; everything else the request itself caused is `RequestFailed`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use itemsync_core::storage::StorageError;

/// Map the transport side of an SDK error, delegating service errors.
fn map_sdk_error<E, R>(
    err: SdkError<E, R>,
    operation: &str,
    map_service_error: impl FnOnce(E) -> StorageError,
) -> StorageError
where
    E: Debug,
    R: Debug,
{
    match err {
        SdkError::TimeoutError(_) => StorageError::Unavailable(format!("{operation} timed out")),
        SdkError::DispatchFailure(failure) => {
            StorageError::Unavailable(format!("{operation} dispatch failed: {:?}", failure))
        }
        SdkError::ServiceError(context) => map_service_error(context.into_err()),
        other => StorageError::RequestFailed(format!("{operation} failed: {:?}", other)),
    }
}

fn throttled() -> StorageError {
    StorageError::Unavailable("Throughput exceeded, please retry".to_string())
}

fn request_limit() -> StorageError {
    StorageError::Unavailable("Request limit exceeded, please retry".to_string())
}

fn internal() -> StorageError {
    StorageError::Unavailable("DynamoDB internal server error".to_string())
}

fn table_not_found() -> StorageError {
    StorageError::RequestFailed("Table or index not found".to_string())
}

/// Map a PutItem service error to StorageError.
///
/// A failed condition means the id is already stored.
pub fn map_put_item_service_error(err: PutItemError, id: &str) -> StorageError {
    match err {
        PutItemError::ConditionalCheckFailedException(_) => StorageError::AlreadyExists {
            id: id.to_string(),
        },
        PutItemError::ResourceNotFoundException(_) => table_not_found(),
        PutItemError::ProvisionedThroughputExceededException(_) => throttled(),
        PutItemError::RequestLimitExceeded(_) => request_limit(),
        PutItemError::TransactionConflictException(_) => {
            StorageError::Unavailable("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => internal(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StorageError::RequestFailed("Item collection size limit exceeded".to_string())
        }
        err => StorageError::RequestFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a GetItem service error to StorageError.
pub fn map_get_item_service_error(err: GetItemError) -> StorageError {
    match err {
        GetItemError::ResourceNotFoundException(_) => table_not_found(),
        GetItemError::ProvisionedThroughputExceededException(_) => throttled(),
        GetItemError::RequestLimitExceeded(_) => request_limit(),
        GetItemError::InternalServerError(_) => internal(),
        err => StorageError::RequestFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query service error to StorageError.
pub fn map_query_service_error(err: QueryError) -> StorageError {
    match err {
        QueryError::ResourceNotFoundException(_) => table_not_found(),
        QueryError::ProvisionedThroughputExceededException(_) => throttled(),
        QueryError::RequestLimitExceeded(_) => request_limit(),
        QueryError::InternalServerError(_) => internal(),
        err => StorageError::RequestFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a Scan service error to StorageError.
pub fn map_scan_service_error(err: ScanError) -> StorageError {
    match err {
        ScanError::ResourceNotFoundException(_) => table_not_found(),
        ScanError::ProvisionedThroughputExceededException(_) => throttled(),
        ScanError::RequestLimitExceeded(_) => request_limit(),
        ScanError::InternalServerError(_) => internal(),
        err => StorageError::RequestFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StorageError.
pub fn map_put_item_error<R: Debug>(err: SdkError<PutItemError, R>, id: &str) -> StorageError {
    map_sdk_error(err, "PutItem", |e| map_put_item_service_error(e, id))
}

/// Map a GetItem SDK error to StorageError.
pub fn map_get_item_error<R: Debug>(err: SdkError<GetItemError, R>) -> StorageError {
    map_sdk_error(err, "GetItem", map_get_item_service_error)
}

/// Map a Query SDK error to StorageError.
pub fn map_query_error<R: Debug>(err: SdkError<QueryError, R>) -> StorageError {
    map_sdk_error(err, "Query", map_query_service_error)
}

/// Map a Scan SDK error to StorageError.
pub fn map_scan_error<R: Debug>(err: SdkError<ScanError, R>) -> StorageError {
    map_sdk_error(err, "Scan", map_scan_service_error)
}
