//! End-to-end resolver behavior against an in-test store.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use itemsync_core::item::{Item, ItemInput};
use itemsync_core::operation::{Invocation, OperationResult, ResolverError, Resolver};
use itemsync_core::schema::IdGenerator;
use itemsync_core::storage::{CollisionPolicy, ItemStore, Result, StorageError};

/// Insertion-ordered store that counts the calls it receives.
#[derive(Default)]
struct TestStore {
    items: Mutex<Vec<Item>>,
    calls: AtomicUsize,
}

impl TestStore {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemStore for TestStore {
    async fn put(&self, item: &Item, policy: CollisionPolicy) -> Result<()> {
        self.record();
        let mut items = self.items.lock().unwrap();
        match items.iter().position(|stored| stored.id == item.id) {
            Some(_) if policy == CollisionPolicy::Reject => Err(StorageError::AlreadyExists {
                id: item.id.clone(),
            }),
            Some(index) => {
                items[index] = item.clone();
                Ok(())
            }
            None => {
                items.push(item.clone());
                Ok(())
            }
        }
    }

    async fn get_by_primary(&self, id: &str) -> Result<Option<Item>> {
        self.record();
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn query_by_secondary(&self, value: &str) -> Result<Vec<Item>> {
        self.record();
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|item| item.title == value)
            .cloned()
            .collect())
    }

    async fn scan_all(&self) -> Result<Vec<Item>> {
        self.record();
        Ok(self.items.lock().unwrap().clone())
    }
}

/// Deterministic ids: `item-1`, `item-2`, ...
#[derive(Default)]
struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("item-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn resolver() -> (Resolver, Arc<TestStore>) {
    let store = Arc::new(TestStore::default());
    (Resolver::new(store.clone()), store)
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn ids(items: &[Item]) -> HashSet<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

#[tokio::test]
async fn test_dune_scenario() {
    let (resolver, _) = resolver();

    let added = resolver.add_item(ItemInput::new("Dune")).await.unwrap();
    assert!(!added.id.is_empty());
    assert_eq!(added.title, "Dune");
    assert!(added.fields.is_empty());

    let by_title = resolver.get_item_by_title("Dune").await.unwrap();
    assert_eq!(by_title, vec![added.clone()]);

    let all = resolver.list_items().await.unwrap();
    assert_eq!(all, vec![added]);
}

#[tokio::test]
async fn test_generated_ids_are_unique_and_non_empty() {
    let (resolver, _) = resolver();

    let mut seen = HashSet::new();
    for i in 0..50 {
        let item = resolver
            .add_item(ItemInput::new(format!("Book {i}")))
            .await
            .unwrap();
        assert!(!item.id.is_empty());
        assert!(seen.insert(item.id), "duplicate id generated");
    }
}

#[tokio::test]
async fn test_added_item_is_found_by_title() {
    let (resolver, _) = resolver();
    resolver
        .add_item(ItemInput::new("Neuromancer"))
        .await
        .unwrap();
    let added = resolver
        .add_item(ItemInput::new("Dune").with_field("author", "Frank Herbert"))
        .await
        .unwrap();

    let found = resolver.get_item_by_title("Dune").await.unwrap();

    assert!(found.contains(&added));
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_list_on_empty_collection_is_empty() {
    let (resolver, _) = resolver();
    assert!(resolver.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_title_with_no_matches_is_empty() {
    let (resolver, _) = resolver();
    resolver.add_item(ItemInput::new("Dune")).await.unwrap();

    let found = resolver.get_item_by_title("Hyperion").await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_duplicate_titles_return_every_match() {
    let (resolver, _) = resolver();
    let first = resolver.add_item(ItemInput::new("Dune")).await.unwrap();
    let second = resolver
        .add_item(ItemInput::new("Dune").with_field("edition", 2))
        .await
        .unwrap();
    resolver.add_item(ItemInput::new("Emma")).await.unwrap();

    let found = resolver.get_item_by_title("Dune").await.unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(ids(&found), ids(&[first, second]));
}

#[tokio::test]
async fn test_empty_supplied_id_is_invalid() {
    let (resolver, store) = resolver();

    let result = resolver
        .add_item(ItemInput::new("Dune").with_id(""))
        .await;

    assert!(matches!(result, Err(ResolverError::InvalidArgument(_))));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_round_trip_adds_only_the_id() {
    let (resolver, _) = resolver();
    let input = json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "pages": 412,
        "rating": 4.5,
        "tags": ["sf", "classic"],
        "series": {"name": "Dune Chronicles", "book": 1},
        "lent": null,
        "read": true,
    });

    let result = resolver
        .execute(&Invocation::mutation(
            "addItem",
            args(json!({"input": input.clone()})),
        ))
        .await
        .unwrap();
    let returned = serde_json::to_value(&result).unwrap();

    let mut expected = input.as_object().cloned().unwrap();
    let id = returned["id"].as_str().unwrap().to_string();
    expected.insert("id".to_string(), Value::String(id));
    assert_eq!(returned, Value::Object(expected));
}

#[tokio::test]
async fn test_key_fields_cannot_be_replaced_through_fields() {
    let (resolver, store) = resolver();
    let mut input = ItemInput::new("Dune").with_field("pages", 412);
    input.fields.insert("title".to_string(), json!("Emma"));
    input.fields.insert("id".to_string(), json!(""));

    let item = resolver.add_item(input).await.unwrap();

    assert_eq!(item.title, "Dune");
    assert!(!item.id.is_empty());
    assert_eq!(item.fields, args(json!({"pages": 412})));
    assert_eq!(store.calls(), 1);
    assert_eq!(resolver.get_item_by_title("Emma").await.unwrap(), vec![]);
}

#[tokio::test]
async fn test_key_named_fields_set_the_keys() {
    let (resolver, _) = resolver();

    let item = resolver
        .add_item(
            ItemInput::new("Dune")
                .with_field("title", "Emma")
                .with_field("id", "austen-1"),
        )
        .await
        .unwrap();

    assert_eq!(item, Item::new("austen-1", "Emma"));
    assert_eq!(resolver.get_item("austen-1").await.unwrap(), Some(item));
}

#[tokio::test]
async fn test_supplied_id_is_used_as_is() {
    let (resolver, _) = resolver();

    let item = resolver
        .add_item(ItemInput::new("Dune").with_id("isbn-0441013597"))
        .await
        .unwrap();

    assert_eq!(item.id, "isbn-0441013597");
    assert_eq!(
        resolver.get_item("isbn-0441013597").await.unwrap(),
        Some(item)
    );
}

#[tokio::test]
async fn test_collision_rejected_by_default() {
    let (resolver, _) = resolver();
    resolver
        .add_item(ItemInput::new("Dune").with_id("book-1"))
        .await
        .unwrap();

    let result = resolver
        .add_item(ItemInput::new("Emma").with_id("book-1"))
        .await;

    assert_eq!(
        result,
        Err(ResolverError::Storage(StorageError::AlreadyExists {
            id: "book-1".to_string()
        }))
    );
    assert_eq!(
        resolver.get_item("book-1").await.unwrap().unwrap().title,
        "Dune"
    );
}

#[tokio::test]
async fn test_collision_overwrites_when_configured() {
    let store = Arc::new(TestStore::default());
    let resolver = Resolver::new(store).with_collision_policy(CollisionPolicy::Overwrite);
    resolver
        .add_item(ItemInput::new("Dune").with_id("book-1"))
        .await
        .unwrap();

    let replaced = resolver
        .add_item(ItemInput::new("Emma").with_id("book-1"))
        .await
        .unwrap();

    assert_eq!(resolver.list_items().await.unwrap(), vec![replaced]);
}

#[tokio::test]
async fn test_get_item_absent_is_none() {
    let (resolver, _) = resolver();

    let result = resolver
        .execute(&Invocation::query("getItem", args(json!({"id": "missing"}))))
        .await
        .unwrap();

    assert_eq!(result, OperationResult::MaybeItem(None));
}

#[tokio::test]
async fn test_each_invocation_issues_exactly_one_storage_call() {
    let (resolver, store) = resolver();

    resolver.add_item(ItemInput::new("Dune")).await.unwrap();
    assert_eq!(store.calls(), 1);
    resolver.get_item_by_title("Dune").await.unwrap();
    assert_eq!(store.calls(), 2);
    resolver.list_items().await.unwrap();
    assert_eq!(store.calls(), 3);
    resolver.get_item("anything").await.unwrap();
    assert_eq!(store.calls(), 4);
}

#[tokio::test]
async fn test_unknown_operation_issues_no_storage_call() {
    let (resolver, store) = resolver();

    let result = resolver
        .execute(&Invocation::mutation("deleteItem", args(json!({"id": "1"}))))
        .await;

    assert!(matches!(
        result,
        Err(ResolverError::UnknownOperation { .. })
    ));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_injected_id_generator_is_used() {
    let store = Arc::new(TestStore::default());
    let resolver =
        Resolver::new(store).with_id_generator(Arc::new(SequentialIds::default()));

    let first = resolver.add_item(ItemInput::new("Dune")).await.unwrap();
    let second = resolver.add_item(ItemInput::new("Emma")).await.unwrap();

    assert_eq!(first.id, "item-1");
    assert_eq!(second.id, "item-2");
}

#[tokio::test]
async fn test_concurrent_adds_are_independent() {
    let store = Arc::new(TestStore::default());
    let resolver = Resolver::new(store);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.add_item(ItemInput::new(format!("Book {i}"))).await })
        })
        .collect();

    let mut created = HashMap::new();
    for handle in handles {
        let item = handle.await.unwrap().unwrap();
        created.insert(item.id.clone(), item);
    }

    assert_eq!(created.len(), 16);
    assert_eq!(resolver.list_items().await.unwrap().len(), 16);
}
