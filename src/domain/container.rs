//! Shared container handles.
//!
//! Every container is an `Rc<RefCell<..>>` so the same instance can sit at several
//! positions of a structure, or refer back to one of its ancestors. Cloning a handle
//! never copies the contents.

use super::value::{Value, ValueKey};
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identity token of a container instance.
///
/// Derived from the address of the shared allocation, so two handles to the same
/// container always produce the same id, and two distinct live containers never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(usize);

impl ContainerId {
    fn of<T>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc) as *const () as usize)
    }
}

/// An ordered sequence.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn id(&self) -> ContainerId {
        ContainerId::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().map(Into::into).collect())))
    }
}

/// An insertion-ordered associative map with arbitrary keys.
///
/// Keys are compared with [`Value::same_value_zero`].
#[derive(Clone, Default)]
pub struct Map(Rc<RefCell<IndexMap<ValueKey, (Value, Value)>>>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `key`. An existing key keeps its position and its original
    /// key value.
    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.borrow_mut().entry(key.key()) {
            Entry::Occupied(mut slot) => slot.get_mut().1 = value,
            Entry::Vacant(slot) => {
                slot.insert((key, value));
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0.borrow().get(&key.key()).map(|(_, v)| v.clone())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn entries(&self) -> MapEntries<'_> {
        MapEntries(self.0.borrow())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn id(&self) -> ContainerId {
        ContainerId::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Map::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

/// Borrowed view of a [`Map`]'s entries, in insertion order.
pub struct MapEntries<'a>(Ref<'a, IndexMap<ValueKey, (Value, Value)>>);

impl MapEntries<'_> {
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.values().map(|(key, value)| (key, value))
    }

    pub fn get_index(&self, index: usize) -> Option<(&Value, &Value)> {
        self.0.get_index(index).map(|(_, (key, value))| (key, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An insertion-ordered collection of unique values.
#[derive(Clone, Default)]
pub struct Set(Rc<RefCell<IndexMap<ValueKey, Value>>>);

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` unless an equal member is already present.
    pub fn add(&self, value: impl Into<Value>) {
        let value = value.into();
        self.0.borrow_mut().entry(value.key()).or_insert(value);
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.borrow().contains_key(&value.key())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn values(&self) -> SetValues<'_> {
        SetValues(self.0.borrow())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn id(&self) -> ContainerId {
        ContainerId::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<V: Into<Value>> FromIterator<V> for Set {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let set = Set::new();
        for value in iter {
            set.add(value);
        }
        set
    }
}

/// Borrowed view of a [`Set`]'s members, in insertion order.
pub struct SetValues<'a>(Ref<'a, IndexMap<ValueKey, Value>>);

impl SetValues<'_> {
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A string-keyed property bag.
///
/// Holds own entries only, enumerated in insertion order.
#[derive(Clone, Default)]
pub struct Record(Rc<RefCell<IndexMap<Rc<str>, Value>>>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `key`. An existing key keeps its position.
    pub fn insert(&self, key: impl Into<Rc<str>>, value: impl Into<Value>) {
        self.0.borrow_mut().insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Removes the entry for `key`, keeping the order of the others.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn entries(&self) -> Ref<'_, IndexMap<Rc<str>, Value>> {
        self.0.borrow()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn id(&self) -> ContainerId {
        ContainerId::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K: Into<Rc<str>>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self(Rc::new(RefCell::new(entries)))
    }
}

// Contents are left out of `Debug` output since a container may contain itself.
macro_rules! impl_container_debug {
    ($($handle:ident),*) => {
        $(
            impl fmt::Debug for $handle {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($handle))
                        .field("id", &self.id())
                        .field("len", &self.len())
                        .finish()
                }
            }
        )*
    };
}

impl_container_debug!(Array, Map, Set, Record);

/// A borrowed container, by kind.
#[derive(Debug, Clone, Copy)]
pub enum ContainerRef<'a> {
    Sequence(&'a Array),
    AssociativeMap(&'a Map),
    UniqueSet(&'a Set),
    Record(&'a Record),
}

impl ContainerRef<'_> {
    pub fn id(&self) -> ContainerId {
        match self {
            ContainerRef::Sequence(array) => array.id(),
            ContainerRef::AssociativeMap(map) => map.id(),
            ContainerRef::UniqueSet(set) => set.id(),
            ContainerRef::Record(record) => record.id(),
        }
    }
}
