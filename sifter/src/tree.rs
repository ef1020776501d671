//! The nested key/value tree produced by sifting.
//!
//! Keys are kept in sorted order so that output is stable. Leaves hold the
//! serialized form of the original field value; inner nodes are created on
//! demand when a leaf is written below them, so a container whose children
//! were all dropped does not appear at all.

use std::collections::{btree_map, BTreeMap};

use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::{Map, Value};

/// A node of an [`OutputTree`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Leaf(Value),
    Tree(OutputTree),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&OutputTree> {
        match self {
            Self::Leaf(_) => None,
            Self::Tree(tree) => Some(tree),
        }
    }

    /// Converts the node into a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Self::Leaf(value) => value,
            Self::Tree(tree) => tree.into_value(),
        }
    }
}

/// Mapping from alias keys to leaves or nested trees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputTree {
    entries: BTreeMap<String, Node>,
}

/// Reason a write into the tree was refused.
#[derive(Debug)]
pub(crate) struct OccupiedByLeaf {
    /// Number of path segments up to and including the occupied one.
    pub(crate) depth: usize,
}

impl OutputTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Looks up a node by its alias path.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for key in parents {
            tree = tree.get(key.as_ref())?.as_tree()?;
        }
        tree.get(last.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Node> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Lists every leaf with its full alias path, in key order.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &Value)> {
        let mut leaves = Vec::new();
        let mut stack = vec![(Vec::new(), self)];
        while let Some((prefix, tree)) = stack.pop() {
            for (key, node) in tree.iter().rev() {
                let mut path = prefix.clone();
                path.push(key.as_str());
                match node {
                    Node::Leaf(value) => leaves.push((path, value)),
                    Node::Tree(child) => stack.push((path, child)),
                }
            }
        }
        leaves.sort_by(|(left, _), (right, _)| left.cmp(right));
        leaves
    }

    /// Writes a leaf below `parents`, creating intermediate trees.
    ///
    /// Whatever sits under `key` is replaced, a leaf or a whole subtree; an
    /// existing leaf on the way down is an error.
    pub(crate) fn insert_leaf(
        &mut self,
        parents: &[&str],
        key: &str,
        value: Value,
    ) -> Result<(), OccupiedByLeaf> {
        let mut tree = self;
        for (depth, parent) in parents.iter().enumerate() {
            let node = tree
                .entries
                .entry((*parent).to_string())
                .or_insert_with(|| Node::Tree(OutputTree::new()));
            tree = match node {
                Node::Tree(child) => child,
                Node::Leaf(_) => return Err(OccupiedByLeaf { depth: depth + 1 }),
            };
        }
        tree.entries.insert(key.to_string(), Node::Leaf(value));
        Ok(())
    }

    /// Converts the tree into a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(
            self.entries
                .into_iter()
                .map(|(key, node)| (key, node.into_value()))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl<'a> IntoIterator for &'a OutputTree {
    type Item = (&'a String, &'a Node);
    type IntoIter = btree_map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<OutputTree> for Value {
    fn from(tree: OutputTree) -> Self {
        tree.into_value()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Tree(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for OutputTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}
