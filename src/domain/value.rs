use super::container::{Array, ContainerId, ContainerRef, Map, Record, Set};
use super::value_type::ValueType;
use std::fmt;
use std::rc::Rc;

/// A dynamic value of unknown shape.
///
/// Scalars are terminals and carry one of the six [`ValueType`] tags. `Array`, `Map`,
/// `Set` and `Record` are shared container handles, so a structure may reference the
/// same container more than once, or contain itself.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    BigInt(i128),
    String(Rc<str>),
    Symbol(Symbol),
    Function(Function),
    Array(Array),
    Map(Map),
    Set(Set),
    Record(Record),
}

/// Result of classifying a single node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// `Null` or `Undefined`.
    Absent,
    Terminal(ValueType),
    Container(ContainerRef<'a>),
}

impl Value {
    pub fn array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    pub fn record<K: Into<Rc<str>>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Record(entries.into_iter().collect())
    }

    pub fn map<K: Into<Value>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    pub fn set<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Value::Set(values.into_iter().collect())
    }

    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    pub fn function<F>(name: impl Into<Rc<str>>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Function(Function::new(name, f))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Splits values into absence, terminals and containers.
    pub fn classify(&self) -> Node<'_> {
        match self {
            Value::Undefined | Value::Null => Node::Absent,
            Value::Boolean(_) => Node::Terminal(ValueType::Boolean),
            Value::Number(_) => Node::Terminal(ValueType::Number),
            Value::BigInt(_) => Node::Terminal(ValueType::BigInt),
            Value::String(_) => Node::Terminal(ValueType::String),
            Value::Symbol(_) => Node::Terminal(ValueType::Symbol),
            Value::Function(_) => Node::Terminal(ValueType::Function),
            Value::Array(array) => Node::Container(ContainerRef::Sequence(array)),
            Value::Map(map) => Node::Container(ContainerRef::AssociativeMap(map)),
            Value::Set(set) => Node::Container(ContainerRef::UniqueSet(set)),
            Value::Record(record) => Node::Container(ContainerRef::Record(record)),
        }
    }

    /// Tag of a terminal value, `None` for absence and containers.
    pub fn value_type(&self) -> Option<ValueType> {
        match self.classify() {
            Node::Terminal(tag) => Some(tag),
            Node::Absent | Node::Container(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Equality used for set members and map keys: like `==`, except `NaN` equals
    /// itself.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self == other,
        }
    }

    /// Hashable projection that agrees with [`Value::same_value_zero`].
    pub(crate) fn key(&self) -> ValueKey {
        match self {
            Value::Undefined => ValueKey::Undefined,
            Value::Null => ValueKey::Null,
            Value::Boolean(b) => ValueKey::Boolean(*b),
            Value::Number(n) => ValueKey::Number(number_bits(*n)),
            Value::BigInt(n) => ValueKey::BigInt(*n),
            Value::String(s) => ValueKey::String(s.clone()),
            Value::Symbol(symbol) => ValueKey::Symbol(Rc::as_ptr(&symbol.0) as usize),
            Value::Function(function) => {
                ValueKey::Function(Rc::as_ptr(&function.call) as *const () as usize)
            }
            Value::Array(array) => ValueKey::Container(array.id()),
            Value::Map(map) => ValueKey::Container(map.id()),
            Value::Set(set) => ValueKey::Container(set.id()),
            Value::Record(record) => ValueKey::Container(record.id()),
        }
    }
}

/// Index key for set members and map keys. Scalars hash by value, everything else by
/// the address of its shared allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Undefined,
    Null,
    Boolean(bool),
    Number(u64),
    BigInt(i128),
    String(Rc<str>),
    Symbol(usize),
    Function(usize),
    Container(ContainerId),
}

// Every NaN shares one pattern and -0.0 folds into 0.0.
fn number_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

/// Strict equality: scalars compare by value, everything else by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Set(a), Value::Set(b)) => a.ptr_eq(b),
            (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Set> for Value {
    fn from(set: Set) -> Self {
        Value::Set(set)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

/// An opaque unique token. Every call to [`Symbol::new`] creates a distinct symbol,
/// even for equal descriptions.
#[derive(Clone)]
pub struct Symbol(Rc<Option<String>>);

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self(Rc::new(Some(description.into())))
    }

    pub fn anonymous() -> Self {
        Self(Rc::new(None))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

/// A callable value. Functions are terminals and are never decomposed.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    call: Rc<dyn Fn(&[Value]) -> Value>,
}

impl Function {
    pub fn new<F>(name: impl Into<Rc<str>>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: name.into(),
            call: Rc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.call)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name)
    }
}
