#![allow(dead_code)]

use deep_traverse::{Array, Map, Record, Set, TraverseOptions, Value, ValueType, collect_terminals};
use rand::Rng;

pub type Calls = Vec<(Value, ValueType)>;

pub fn run(value: &Value) -> Calls {
    collect_terminals(value, &TraverseOptions::default())
}

pub fn run_with_keys(value: &Value) -> Calls {
    collect_terminals(value, &TraverseOptions::new().include_keys(true))
}

pub fn num(n: i32) -> (Value, ValueType) {
    (Value::from(n), ValueType::Number)
}

pub fn text(s: &str) -> (Value, ValueType) {
    (Value::from(s), ValueType::String)
}

pub fn boolean(b: bool) -> (Value, ValueType) {
    (Value::from(b), ValueType::Boolean)
}

/// `{ obj1: {a: 1}, obj2: {b: 2}, obj3: {c: 3, d: {e: 4, f: {g: 5}}},
///    arr1: [6, 7, 8], arr2: ["e", "f", "g"], arr3: [true, false, true] }`
pub struct MixedObject {
    pub root: Record,
    pub obj1: Record,
}

impl MixedObject {
    pub fn new() -> Self {
        let obj1 = Record::from_iter([("a", 1)]);
        let obj2 = Record::from_iter([("b", 2)]);
        let f = Record::from_iter([("g", 5)]);
        let d = Record::from_iter([("e", Value::from(4)), ("f", Value::from(f))]);
        let obj3 = Record::from_iter([("c", Value::from(3)), ("d", Value::from(d))]);

        let root = Record::from_iter([
            ("obj1", Value::from(obj1.clone())),
            ("obj2", Value::from(obj2)),
            ("obj3", Value::from(obj3)),
            ("arr1", Value::array([6, 7, 8])),
            ("arr2", Value::array(["e", "f", "g"])),
            ("arr3", Value::array([true, false, true])),
        ]);
        Self { root, obj1 }
    }

    pub fn value(&self) -> Value {
        Value::from(self.root.clone())
    }
}

impl Drop for MixedObject {
    fn drop(&mut self) {
        // Releases any back-reference a test added.
        self.obj1.clear();
    }
}

/// A randomly shaped tree rooted at a container, with no shared containers, plus the
/// number of terminals and keys it holds.
pub struct GeneratedTree {
    pub value: Value,
    pub terminals: usize,
    pub keys: usize,
}

pub fn generate_tree<R: Rng>(rng: &mut R, max_depth: usize) -> GeneratedTree {
    let mut tree = GeneratedTree {
        value: Value::Undefined,
        terminals: 0,
        keys: 0,
    };
    let mut counter = 0;
    tree.value = generate_container(rng, max_depth, &mut counter, &mut tree);
    tree
}

fn generate_node<R: Rng>(
    rng: &mut R,
    depth: usize,
    counter: &mut u32,
    tree: &mut GeneratedTree,
) -> Value {
    if depth == 0 || rng.gen_bool(0.3) {
        return generate_leaf(rng, counter, tree);
    }
    generate_container(rng, depth, counter, tree)
}

fn generate_container<R: Rng>(
    rng: &mut R,
    depth: usize,
    counter: &mut u32,
    tree: &mut GeneratedTree,
) -> Value {
    let depth = depth.max(1);
    let children = rng.gen_range(0..5);
    match rng.gen_range(0..4) {
        0 => {
            let array = Array::new();
            for _ in 0..children {
                array.push(generate_node(rng, depth - 1, counter, tree));
            }
            array.into()
        }
        1 => {
            let map = Map::new();
            for _ in 0..children {
                *counter += 1;
                tree.keys += 1;
                let key = format!("key-{counter}");
                map.set(key, generate_node(rng, depth - 1, counter, tree));
            }
            map.into()
        }
        2 => {
            let set = Set::new();
            for _ in 0..children {
                set.add(generate_node(rng, depth - 1, counter, tree));
            }
            set.into()
        }
        _ => {
            let record = Record::new();
            for _ in 0..children {
                *counter += 1;
                tree.keys += 1;
                let key = format!("field-{counter}");
                record.insert(key, generate_node(rng, depth - 1, counter, tree));
            }
            record.into()
        }
    }
}

// Every leaf is distinct so sets never collapse two of them.
fn generate_leaf<R: Rng>(rng: &mut R, counter: &mut u32, tree: &mut GeneratedTree) -> Value {
    *counter += 1;
    let n = *counter;
    match rng.gen_range(0..6) {
        0 => {
            tree.terminals += 1;
            Value::from(n)
        }
        1 => {
            tree.terminals += 1;
            Value::from(format!("leaf-{n}"))
        }
        2 => {
            tree.terminals += 1;
            Value::from(i128::from(n) * 1_000_000_000_000)
        }
        3 => {
            tree.terminals += 1;
            Value::symbol(format!("sym-{n}"))
        }
        4 => {
            tree.terminals += 1;
            Value::function(format!("fn-{n}"), |_| Value::Undefined)
        }
        _ => Value::Null,
    }
}
