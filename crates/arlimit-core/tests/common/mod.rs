use arlimit_core::{InMemoryDocumentStore, LimitDocument, LimitReconciler, LimitSet, StaticRegistry};

/// Build a LimitSet from literal pairs
#[allow(dead_code)]
pub fn limits(entries: &[(&str, Option<u64>)]) -> LimitSet {
    entries
        .iter()
        .map(|(command, limit)| (command.to_string(), *limit))
        .collect()
}

/// Initialize a reconciler over an in-memory document and a static registry
#[allow(dead_code)]
pub fn reconciler_with(
    custom: &[(&str, Option<u64>)],
    global_limit: Option<u64>,
    registry: &[&str],
) -> LimitReconciler<InMemoryDocumentStore, StaticRegistry> {
    let store = InMemoryDocumentStore::with_document(LimitDocument {
        global_limit,
        custom_limits: limits(custom),
    });
    LimitReconciler::initialize(store, StaticRegistry::new(registry.iter().copied()))
}
