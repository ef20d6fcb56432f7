//! Operation resolution.
//!
//! An invocation names a (type, field) pair and carries an argument bag. The
//! resolver looks the pair up in [`OPERATIONS`], validates the arguments,
//! builds one [`StorageRequest`], issues it, and shapes the response.

mod arguments;
mod descriptor;
mod error;
mod request;
mod resolver;
mod shaper;

pub use descriptor::{
    lookup, AccessPath, ArgumentKind, ArgumentSpec, Operation, OperationDescriptor, ResultShape,
    TypeName, OPERATIONS,
};
pub use error::{ResolverError, Result};
pub use request::StorageRequest;
pub use resolver::{issue, resolve, Invocation, Resolution, Resolver};
pub use shaper::{shape, OperationResult, StorageResponse};
