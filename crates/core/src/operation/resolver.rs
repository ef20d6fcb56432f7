//! Operation resolver.
//!
//! Resolution is split in two steps:
//!
//! - [`resolve`] looks the invocation up in the static operation table,
//!   validates its arguments, assigns a primary key when `addItem` needs one,
//!   and builds the [`StorageRequest`]. No I/O happens here.
//! - [`issue`] sends that request to an [`ItemStore`] as exactly one call.
//!
//! [`Resolver`] ties both steps to a store and shapes the response.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::item::{Item, ItemInput};
use crate::schema::{IdGenerator, UuidGenerator};
use crate::storage::{CollisionPolicy, ItemStore};

use super::arguments::{item_input, required_string, validate_arguments};
use super::descriptor::{lookup, Operation, OperationDescriptor, ResultShape, TypeName};
use super::error::{ResolverError, Result};
use super::request::StorageRequest;
use super::shaper::{shape, OperationResult, StorageResponse};

/// A caller's request to run one operation field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub type_name: TypeName,
    pub field_name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl Invocation {
    /// Creates an invocation of a `Query` field.
    pub fn query(field_name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            type_name: TypeName::Query,
            field_name: field_name.into(),
            arguments,
        }
    }

    /// Creates an invocation of a `Mutation` field.
    pub fn mutation(field_name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            type_name: TypeName::Mutation,
            field_name: field_name.into(),
            arguments,
        }
    }

    /// Creates an invocation of a known operation.
    pub fn of(operation: Operation, arguments: Map<String, Value>) -> Self {
        let descriptor = operation.descriptor();
        Self {
            type_name: descriptor.type_name,
            field_name: descriptor.field_name.to_string(),
            arguments,
        }
    }
}

/// A resolved invocation: the matched descriptor and the request to issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub descriptor: &'static OperationDescriptor,
    pub request: StorageRequest,
}

/// Resolves an invocation into a storage request.
///
/// Fails with `UnknownOperation` or `InvalidArgument` before anything is sent
/// to storage. For `addItem`, a caller-supplied `id` is used as-is; otherwise
/// one is taken from `ids`.
pub fn resolve(
    invocation: &Invocation,
    ids: &dyn IdGenerator,
    policy: CollisionPolicy,
) -> Result<Resolution> {
    let descriptor = lookup(invocation.type_name, &invocation.field_name).ok_or_else(|| {
        ResolverError::UnknownOperation {
            type_name: invocation.type_name,
            field_name: invocation.field_name.clone(),
        }
    })?;

    let arguments = &invocation.arguments;
    validate_arguments(descriptor, arguments)?;

    let request = match descriptor.operation {
        Operation::ListItems => StorageRequest::Scan,
        Operation::GetItemByTitle => StorageRequest::QueryBySecondary {
            value: required_string(arguments, "title")?,
        },
        Operation::GetItem => StorageRequest::GetByPrimary {
            id: required_string(arguments, "id")?,
        },
        Operation::AddItem => {
            let mut input = item_input(arguments, "input")?;
            let id = input.id.take().unwrap_or_else(|| ids.generate());
            StorageRequest::Put {
                item: Item::from_input(id, input),
                policy,
            }
        }
    };

    Ok(Resolution {
        descriptor,
        request,
    })
}

/// Sends a request to the store as a single call.
///
/// Store errors are returned unchanged; nothing is retried.
pub async fn issue(store: &dyn ItemStore, request: StorageRequest) -> Result<StorageResponse> {
    let response = match request {
        StorageRequest::Scan => StorageResponse::Items(store.scan_all().await?),
        StorageRequest::GetByPrimary { id } => {
            StorageResponse::Item(store.get_by_primary(&id).await?)
        }
        StorageRequest::QueryBySecondary { value } => {
            StorageResponse::Items(store.query_by_secondary(&value).await?)
        }
        StorageRequest::Put { item, policy } => {
            store.put(&item, policy).await?;
            StorageResponse::Written(item)
        }
    };

    Ok(response)
}

/// Runs operations against an item store.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// invocations.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn ItemStore>,
    ids: Arc<dyn IdGenerator>,
    policy: CollisionPolicy,
}

impl Resolver {
    /// Creates a resolver with UUID ids and the default collision policy.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
            policy: CollisionPolicy::default(),
        }
    }

    /// Replaces the id generator.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Sets the collision policy for `addItem`.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Collision policy applied by `addItem`.
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Resolves an invocation without touching the store.
    pub fn plan(&self, invocation: &Invocation) -> Result<Resolution> {
        resolve(invocation, self.ids.as_ref(), self.policy)
    }

    /// Issues a resolved request and shapes the response.
    pub async fn run(&self, resolution: Resolution) -> Result<OperationResult> {
        let response = issue(self.store.as_ref(), resolution.request).await?;
        shape(resolution.descriptor.result_shape, response)
    }

    /// Resolves, issues, and shapes an invocation.
    pub async fn execute(&self, invocation: &Invocation) -> Result<OperationResult> {
        let resolution = self.plan(invocation)?;
        self.run(resolution).await
    }

    /// `listItems`: every stored item.
    pub async fn list_items(&self) -> Result<Vec<Item>> {
        let result = self
            .execute(&Invocation::of(Operation::ListItems, Map::new()))
            .await?;
        result.into_items().ok_or_else(|| unexpected(ResultShape::List))
    }

    /// `getItemByTitle`: every item whose title equals `title`.
    pub async fn get_item_by_title(&self, title: &str) -> Result<Vec<Item>> {
        let result = self
            .execute(&Invocation::of(
                Operation::GetItemByTitle,
                arguments(json!({ "title": title })),
            ))
            .await?;
        result.into_items().ok_or_else(|| unexpected(ResultShape::List))
    }

    /// `getItem`: the item with primary key `id`, if any.
    pub async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        let result = self
            .execute(&Invocation::of(
                Operation::GetItem,
                arguments(json!({ "id": id })),
            ))
            .await?;
        result
            .into_maybe_item()
            .ok_or_else(|| unexpected(ResultShape::OptionalItem))
    }

    /// `addItem`: writes a new item and returns it with its `id`.
    pub async fn add_item(&self, input: ItemInput) -> Result<Item> {
        let mut arguments = Map::new();
        arguments.insert("input".to_string(), Value::Object(input.to_argument()));
        let result = self
            .execute(&Invocation::of(Operation::AddItem, arguments))
            .await?;
        result.into_item().ok_or_else(|| unexpected(ResultShape::Item))
    }
}

fn arguments(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn unexpected(expected: ResultShape) -> ResolverError {
    ResolverError::ShapeMismatch {
        expected,
        actual: "another result shape",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedIds;

    impl IdGenerator for FixedIds {
        fn generate(&self) -> String {
            "generated-1".to_string()
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        arguments(value)
    }

    fn plan(invocation: &Invocation) -> Result<Resolution> {
        resolve(invocation, &FixedIds, CollisionPolicy::Reject)
    }

    #[test]
    fn test_resolve_list_items_to_scan() {
        let resolution = plan(&Invocation::query("listItems", Map::new())).unwrap();

        assert_eq!(resolution.descriptor.operation, Operation::ListItems);
        assert_eq!(resolution.request, StorageRequest::Scan);
    }

    #[test]
    fn test_resolve_get_item_by_title_to_index_query() {
        let invocation = Invocation::query("getItemByTitle", args(json!({"title": "Dune"})));

        let resolution = plan(&invocation).unwrap();

        assert_eq!(
            resolution.request,
            StorageRequest::QueryBySecondary {
                value: "Dune".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_get_item_by_title_requires_non_empty_title() {
        let invocation = Invocation::query("getItemByTitle", args(json!({"title": ""})));

        assert!(matches!(
            plan(&invocation),
            Err(ResolverError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_get_item_to_primary_read() {
        let invocation = Invocation::query("getItem", args(json!({"id": "book-1"})));

        let resolution = plan(&invocation).unwrap();

        assert_eq!(
            resolution.request,
            StorageRequest::GetByPrimary {
                id: "book-1".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_add_item_generates_id() {
        let invocation = Invocation::mutation(
            "addItem",
            args(json!({"input": {"title": "Dune", "year": 1965}})),
        );

        let resolution = plan(&invocation).unwrap();

        assert_eq!(
            resolution.request,
            StorageRequest::Put {
                item: Item::new("generated-1", "Dune").with_field("year", 1965),
                policy: CollisionPolicy::Reject,
            }
        );
    }

    #[test]
    fn test_resolve_add_item_keeps_supplied_id() {
        let invocation = Invocation::mutation(
            "addItem",
            args(json!({"input": {"id": "book-1", "title": "Dune"}})),
        );

        let resolution = resolve(&invocation, &FixedIds, CollisionPolicy::Overwrite).unwrap();

        assert_eq!(
            resolution.request,
            StorageRequest::Put {
                item: Item::new("book-1", "Dune"),
                policy: CollisionPolicy::Overwrite,
            }
        );
    }

    #[test]
    fn test_resolve_unknown_operation() {
        let invocation = Invocation::mutation("deleteItem", args(json!({"id": "1"})));

        assert_eq!(
            plan(&invocation),
            Err(ResolverError::UnknownOperation {
                type_name: TypeName::Mutation,
                field_name: "deleteItem".to_string(),
            })
        );
    }

    #[test]
    fn test_invocation_deserializes_from_resolver_event() {
        let invocation: Invocation = serde_json::from_value(json!({
            "typeName": "Query",
            "fieldName": "getItemByTitle",
            "arguments": {"title": "Dune"},
        }))
        .unwrap();

        assert_eq!(
            invocation,
            Invocation::query("getItemByTitle", args(json!({"title": "Dune"})))
        );
    }

    #[test]
    fn test_invocation_arguments_default_to_empty() {
        let invocation: Invocation =
            serde_json::from_value(json!({"typeName": "Query", "fieldName": "listItems"}))
                .unwrap();

        assert!(invocation.arguments.is_empty());
    }

    /// Store that fails every call and counts how many it received.
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn fail(&self) -> crate::storage::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    #[async_trait::async_trait]
    impl ItemStore for CountingStore {
        async fn put(&self, _item: &Item, _policy: CollisionPolicy) -> crate::storage::Result<()> {
            self.fail()
        }

        async fn get_by_primary(&self, _id: &str) -> crate::storage::Result<Option<Item>> {
            self.fail().map(|_| None)
        }

        async fn query_by_secondary(&self, _value: &str) -> crate::storage::Result<Vec<Item>> {
            self.fail().map(|_| Vec::new())
        }

        async fn scan_all(&self) -> crate::storage::Result<Vec<Item>> {
            self.fail().map(|_| Vec::new())
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_surfaced_unchanged() {
        let store = Arc::new(CountingStore::default());
        let resolver = Resolver::new(store.clone());

        let result = resolver.list_items().await;

        assert_eq!(
            result,
            Err(ResolverError::Storage(StorageError::Unavailable(
                "connection refused".to_string()
            )))
        );
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_argument_never_reaches_storage() {
        let store = Arc::new(CountingStore::default());
        let resolver = Resolver::new(store.clone());

        let result = resolver.add_item(ItemInput::new("Dune").with_id("")).await;

        assert!(matches!(result, Err(ResolverError::InvalidArgument(_))));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_collision_policy_defaults_to_reject() {
        let resolver = Resolver::new(Arc::new(CountingStore::default()));

        assert_eq!(resolver.collision_policy(), CollisionPolicy::Reject);
        assert_eq!(
            resolver
                .with_collision_policy(CollisionPolicy::Overwrite)
                .collision_policy(),
            CollisionPolicy::Overwrite
        );
    }
}
