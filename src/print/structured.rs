//! Structured rendering of composites.
//!
//! Composites serialize as two-space indented JSON through `serde_json`'s
//! pretty formatter. Every nested value is offered to simple rendering
//! first; a leaf is emitted as the JSON string of its rendered text, and
//! only arrays and objects recurse, down to [`MAX_DEPTH`] levels.

use std::cell::RefCell;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::category::{classify, Classified, Composite};
use crate::print::render_leaf;
use crate::value::Value;

/// Emitted in place of a composite that contains itself.
pub const CIRCULAR: &str = "[Circular]";

/// Emitted in place of a composite nested deeper than [`MAX_DEPTH`].
pub const DEPTH_LIMIT: &str = "[Depth limit]";

/// Composites nested at most this deep are rendered; deeper ones print
/// [`DEPTH_LIMIT`].
pub const MAX_DEPTH: usize = 128;

const INDENT: &[u8] = b"  ";

pub(crate) fn print_structured(value: &Value, quote_strings: bool) -> String {
    let ancestors = RefCell::new(Vec::new());
    let node = Node {
        value,
        quote_strings,
        depth: 0,
        ancestors: &ancestors,
    };

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    match node.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
        Err(err) => format!("[Unprintable: {}]", err),
    }
}

/// One value on the current serialization path.
struct Node<'v, 'p> {
    value: &'v Value,
    quote_strings: bool,
    /// Number of composites enclosing this node.
    depth: usize,
    /// Addresses of the composites currently being serialized.
    ancestors: &'p RefCell<Vec<usize>>,
}

impl<'p> Node<'_, 'p> {
    fn child<'w>(&self, value: &'w Value) -> Node<'w, 'p> {
        Node {
            value,
            quote_strings: self.quote_strings,
            depth: self.depth + 1,
            ancestors: self.ancestors,
        }
    }

    /// Marks a composite as entered, or returns `None` if it is already an
    /// ancestor of the current node.
    fn enter(&self, addr: usize) -> Option<Visit<'p>> {
        if self.ancestors.borrow().contains(&addr) {
            return None;
        }
        self.ancestors.borrow_mut().push(addr);
        Some(Visit {
            ancestors: self.ancestors,
        })
    }
}

struct Visit<'p> {
    ancestors: &'p RefCell<Vec<usize>>,
}

impl Drop for Visit<'_> {
    fn drop(&mut self) {
        self.ancestors.borrow_mut().pop();
    }
}

impl Serialize for Node<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match classify(self.value) {
            Classified::Leaf(leaf) => {
                serializer.serialize_str(&render_leaf(leaf, self.quote_strings))
            }
            Classified::Composite(_) if self.depth >= MAX_DEPTH => {
                serializer.serialize_str(DEPTH_LIMIT)
            }
            Classified::Composite(Composite::Array(array)) => {
                let Some(_visit) = self.enter(array.addr()) else {
                    return serializer.serialize_str(CIRCULAR);
                };
                let items = array.read();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Classified::Composite(Composite::Object(object)) => {
                let Some(_visit) = self.enter(object.addr()) else {
                    return serializer.serialize_str(CIRCULAR);
                };
                let entries = object.read();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    map.serialize_entry(key, &self.child(value))?;
                }
                map.end()
            }
        }
    }
}
