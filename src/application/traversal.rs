use crate::application::options::{TraverseOptions, ValueTypeFilter};
use crate::domain::container::{ContainerId, ContainerRef};
use crate::domain::value::{Node, Value};
use crate::domain::value_type::ValueType;
use std::collections::HashSet;
use std::convert::Infallible;
use tracing::{debug, debug_span, trace};

/// Visits every terminal reachable from `value`, with every tag and without keys.
///
/// See [`try_traverse`] for the visiting rules.
pub fn traverse<F>(value: &Value, callback: F)
where
    F: FnMut(&Value, ValueType),
{
    traverse_with(value, callback, &TraverseOptions::default());
}

/// Visits every terminal reachable from `value` that passes `options`.
pub fn traverse_with<F>(value: &Value, mut callback: F, options: &TraverseOptions)
where
    F: FnMut(&Value, ValueType),
{
    let result = try_traverse(
        value,
        |value, tag| {
            callback(value, tag);
            Ok::<(), Infallible>(())
        },
        options,
    );
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Depth-first walk over `value`, calling `callback` once per accepted terminal.
///
/// - `Null` and `Undefined` are skipped.
/// - Arrays are walked in index order, sets and maps in insertion order, records in
///   entry order. With `include_keys`, a map or record key is walked right before its
///   value; record keys reach the callback as `Value::String`.
/// - Each container instance is entered at most once per call. Later references to
///   it, including back-references from its own descendants, are skipped.
/// - The tag filter only decides which terminals reach the callback. Containers are
///   always descended into.
///
/// The first error returned by `callback` stops the walk and is returned as-is.
///
/// # Panics
///
/// Containers stay borrowed while they are walked, so a callback that mutably
/// borrows one of them (e.g. `Array::push` on an ancestor) panics. Very deep
/// structures can overflow the stack.
pub fn try_traverse<F, E>(value: &Value, callback: F, options: &TraverseOptions) -> Result<(), E>
where
    F: FnMut(&Value, ValueType) -> Result<(), E>,
{
    let filter = options.active_filter();
    let span = debug_span!(
        "traverse",
        include_keys = options.include_keys,
        filtered = filter.is_some()
    );
    let _enter = span.enter();

    let mut traversal = Traversal {
        callback,
        filter,
        include_keys: options.include_keys,
        visited: HashSet::new(),
        emitted: 0,
    };
    let result = traversal.visit(value);
    match &result {
        Ok(()) => debug!(
            containers = traversal.visited.len(),
            terminals = traversal.emitted,
            "traversal finished"
        ),
        Err(_) => debug!(
            containers = traversal.visited.len(),
            terminals = traversal.emitted,
            "traversal aborted by callback"
        ),
    }
    result
}

/// Collects the accepted terminals in visiting order.
pub fn collect_terminals(value: &Value, options: &TraverseOptions) -> Vec<(Value, ValueType)> {
    let mut terminals = Vec::new();
    traverse_with(value, |value, tag| terminals.push((value.clone(), tag)), options);
    terminals
}

struct Traversal<'o, F> {
    callback: F,
    filter: Option<&'o ValueTypeFilter>,
    include_keys: bool,
    visited: HashSet<ContainerId>,
    emitted: usize,
}

impl<F, E> Traversal<'_, F>
where
    F: FnMut(&Value, ValueType) -> Result<(), E>,
{
    fn visit(&mut self, node: &Value) -> Result<(), E> {
        match node.classify() {
            Node::Absent => Ok(()),
            Node::Terminal(tag) => self.emit(node, tag),
            Node::Container(container) => {
                if !self.visited.insert(container.id()) {
                    trace!(id = ?container.id(), "container already visited, skipping");
                    return Ok(());
                }
                self.descend(container)
            }
        }
    }

    fn emit(&mut self, node: &Value, tag: ValueType) -> Result<(), E> {
        if let Some(filter) = self.filter
            && !filter.accepts(tag)
        {
            trace!(%tag, "terminal filtered out");
            return Ok(());
        }
        self.emitted += 1;
        (self.callback)(node, tag)
    }

    fn descend(&mut self, container: ContainerRef<'_>) -> Result<(), E> {
        match container {
            ContainerRef::Sequence(array) => {
                for item in array.items().iter() {
                    self.visit(item)?;
                }
            }
            ContainerRef::AssociativeMap(map) => {
                for (key, value) in map.entries().iter() {
                    if self.include_keys {
                        self.visit(key)?;
                    }
                    self.visit(value)?;
                }
            }
            ContainerRef::UniqueSet(set) => {
                for value in set.values().iter() {
                    self.visit(value)?;
                }
            }
            ContainerRef::Record(record) => {
                for (key, value) in record.entries().iter() {
                    if self.include_keys {
                        self.visit(&Value::String(key.clone()))?;
                    }
                    self.visit(value)?;
                }
            }
        }
        Ok(())
    }
}
