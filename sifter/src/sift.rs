//! Traversal of a record instance along its plan.
//!
//! Fields are visited breadth-first from a FIFO queue: the children of a
//! container are appended behind every field already waiting, so all fields
//! at one nesting depth are written before any deeper one. Visiting order has
//! no effect on the resulting tree.

use std::{collections::VecDeque, rc::Rc};

use crate::{
    plan::{FieldPlan, TypePlan},
    record::{is_empty_value, FieldRef, Record},
    tree::OutputTree,
    Level, SiftError,
};

/// Maximum number of field entries a single sift may visit.
pub const MAX_FIELD_ENTRIES: usize = 4096;

struct Entry<'a> {
    record: &'a dyn Record,
    path: Rc<[&'static str]>,
    field: &'a FieldPlan,
}

/// Sifts `record` along `plan`, keeping only fields whose level does not
/// exceed `max_level`.
///
/// A container's own level gates its whole subtree: when it is above
/// `max_level`, none of its children are looked at, whatever their levels.
pub fn sift(
    record: &dyn Record,
    plan: &TypePlan,
    max_level: Level,
) -> Result<OutputTree, SiftError> {
    let root: Rc<[&'static str]> = Rc::from(Vec::new());
    let mut queue: VecDeque<Entry<'_>> = plan
        .fields
        .iter()
        .map(|field| Entry {
            record,
            path: Rc::clone(&root),
            field,
        })
        .collect();

    let mut out = OutputTree::new();
    let mut visited = 0_usize;
    while let Some(Entry {
        record,
        path,
        field,
    }) = queue.pop_front()
    {
        visited += 1;
        if visited > MAX_FIELD_ENTRIES {
            return Err(SiftError::LimitExceeded {
                limit: MAX_FIELD_ENTRIES,
            });
        }

        let Some(value) = record.field(field.index) else {
            continue;
        };

        match (value, field.nested.as_deref()) {
            (FieldRef::Leaf(leaf), None) => {
                let Some(alias) = field.alias else {
                    continue;
                };
                let encode = |source| SiftError::Encode {
                    field: field.name,
                    source,
                };
                if field.level > max_level {
                    continue;
                }
                let value = leaf.to_json().map_err(encode)?;
                if field.omit_on_empty && is_empty_value(&value) {
                    continue;
                }
                write_leaf(&mut out, &path, alias, value)?;
            }
            (FieldRef::Record(nested_record), Some(nested_plan)) => {
                if field.level > max_level {
                    continue;
                }
                let child_path = match field.alias {
                    Some(alias) => path.iter().copied().chain([alias]).collect(),
                    None => path,
                };
                queue.extend(nested_plan.fields.iter().map(|child| Entry {
                    record: nested_record,
                    path: Rc::clone(&child_path),
                    field: child,
                }));
            }
            _ => {
                return Err(SiftError::DescriptorMismatch {
                    record: record.descriptor().name,
                    field: field.name,
                });
            }
        }
    }

    Ok(out)
}

fn write_leaf(
    out: &mut OutputTree,
    path: &[&'static str],
    alias: &str,
    value: serde_json::Value,
) -> Result<(), SiftError> {
    out.insert_leaf(path, alias, value)
        .map_err(|occupied| SiftError::KeyConflict {
            path: path[..occupied.depth].join("."),
        })
}
