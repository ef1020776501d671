//! Compilation of record descriptors into access plans.
//!
//! A [`TypePlan`] is computed once per record type and then shared. It keeps
//! only the fields that can ever appear in output, each with its parsed
//! alias, omit rule and level, and owns the plans of nested records.

use std::{any::TypeId, fmt};

use crate::{
    record::RecordDescriptor,
    tag::parse_field_directive,
    Level, SiftError,
};

/// Compiled metadata for one retained field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPlan {
    /// Position of the field in its record's descriptor.
    pub index: usize,
    /// Declared field name.
    pub name: &'static str,
    /// Declared with `embed` rather than `nested`.
    pub embedded: bool,
    /// Plan of the nested record, for nested and embedded fields.
    pub nested: Option<Box<TypePlan>>,
    /// Output key. `None` means the field's children flatten into the parent.
    pub alias: Option<&'static str>,
    /// Drop the field when its serialized value is empty.
    pub omit_on_empty: bool,
    /// Level at or above which the field, and its subtree, is kept.
    pub level: Level,
}

impl FieldPlan {
    /// Returns `true` for a container whose children merge into the parent.
    pub fn flattens(&self) -> bool {
        self.nested.is_some() && self.alias.is_none()
    }
}

/// Compiled metadata for one record type: its retained fields in
/// declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypePlan {
    /// Record type name, used in diagnostics.
    pub name: &'static str,
    /// Retained fields; ignored ones are absent.
    pub fields: Vec<FieldPlan>,
}

impl TypePlan {
    /// Number of field entries a full traversal of this plan visits.
    pub fn entry_count(&self) -> usize {
        self.fields
            .iter()
            .map(|field| 1 + field.nested.as_ref().map_or(0, |nested| nested.entry_count()))
            .sum()
    }
}

/// Compiles the plan for a record type.
///
/// Fails if any field carries a malformed tag, or if the type nests itself.
pub fn compile(descriptor: &'static RecordDescriptor) -> Result<TypePlan, SiftError> {
    let mut in_progress = Vec::new();
    compile_inner(descriptor, &mut in_progress)
}

fn compile_inner(
    descriptor: &'static RecordDescriptor,
    in_progress: &mut Vec<(TypeId, &'static str)>,
) -> Result<TypePlan, SiftError> {
    let id = descriptor.id();
    if in_progress.iter().any(|(seen, _)| *seen == id) {
        let path = in_progress
            .iter()
            .map(|(_, name)| *name)
            .chain(std::iter::once(descriptor.name))
            .collect::<Vec<_>>()
            .join(" -> ");
        return Err(SiftError::CyclicType {
            record: descriptor.name,
            path,
        });
    }
    in_progress.push((id, descriptor.name));

    let mut fields = Vec::with_capacity(descriptor.fields.len());
    for (index, field) in descriptor.fields.iter().enumerate() {
        let embedded = field.kind.is_embedded();
        let directive = parse_field_directive(
            field.name,
            field.serialization_tag,
            field.confidentiality_tag,
            embedded,
        )
        .map_err(|source| SiftError::TagParse {
            record: descriptor.name,
            field: field.name,
            source,
        })?;
        if directive.ignore {
            continue;
        }

        let nested = match field.kind.nested() {
            Some(nested) => Some(Box::new(compile_inner(nested(), in_progress)?)),
            None => None,
        };

        fields.push(FieldPlan {
            index,
            name: field.name,
            embedded,
            nested,
            alias: directive.alias,
            omit_on_empty: directive.omit_on_empty,
            level: directive.level,
        });
    }

    in_progress.pop();
    Ok(TypePlan {
        name: descriptor.name,
        fields,
    })
}

impl fmt::Display for FieldPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index[{}], field[{}], alias[{}], omit_on_empty[{}], level[{}], embedded[{}]",
            self.index,
            self.name,
            self.alias.unwrap_or_default(),
            self.omit_on_empty,
            self.level,
            self.embedded,
        )?;
        if let Some(nested) = &self.nested {
            write!(f, ", nested[{nested}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.name)?;
        for (position, field) in self.fields.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}")?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::*;
    use crate::{
        record::{FieldDescriptor, FieldKind},
        tag::TagError,
    };

    const fn field(
        name: &'static str,
        serialization_tag: &'static str,
        confidentiality_tag: &'static str,
        kind: FieldKind,
    ) -> FieldDescriptor {
        FieldDescriptor {
            name,
            serialization_tag,
            confidentiality_tag,
            kind,
        }
    }

    struct Meta;
    struct Device;
    struct Broken;
    struct Loop;

    fn meta() -> &'static RecordDescriptor {
        static DESCRIPTOR: RecordDescriptor = RecordDescriptor {
            name: "Meta",
            type_id: TypeId::of::<Meta>,
            fields: &[
                field("country", "", "level1", FieldKind::Leaf),
                field("city", "city,omitempty", "level1", FieldKind::Leaf),
            ],
        };
        &DESCRIPTOR
    }

    fn device() -> &'static RecordDescriptor {
        static DESCRIPTOR: RecordDescriptor = RecordDescriptor {
            name: "Device",
            type_id: TypeId::of::<Device>,
            fields: &[
                field("_internal", "", "level9", FieldKind::Leaf),
                field("domain", "", "", FieldKind::Leaf),
                field("skipped", "-", "", FieldKind::Leaf),
                field("base", "", "", FieldKind::Embedded(meta)),
                field("meta", "meta", "level2", FieldKind::Nested(meta)),
            ],
        };
        &DESCRIPTOR
    }

    fn broken() -> &'static RecordDescriptor {
        static DESCRIPTOR: RecordDescriptor = RecordDescriptor {
            name: "Broken",
            type_id: TypeId::of::<Broken>,
            fields: &[
                field("fine", "", "", FieldKind::Leaf),
                field("level", "", "level1,level2", FieldKind::Leaf),
            ],
        };
        &DESCRIPTOR
    }

    fn looping() -> &'static RecordDescriptor {
        static DESCRIPTOR: RecordDescriptor = RecordDescriptor {
            name: "Loop",
            type_id: TypeId::of::<Loop>,
            fields: &[field("next", "", "", FieldKind::Nested(looping))],
        };
        &DESCRIPTOR
    }

    #[test]
    fn ignored_fields_are_dropped_and_order_is_kept() {
        let plan = compile(device()).unwrap();
        let names: Vec<_> = plan.fields.iter().map(|field| field.name).collect();
        assert_eq!(names, ["domain", "base", "meta"]);
        let indices: Vec<_> = plan.fields.iter().map(|field| field.index).collect();
        assert_eq!(indices, [1, 3, 4]);
    }

    #[test]
    fn embedded_field_without_alias_flattens() {
        let plan = compile(device()).unwrap();
        let base = &plan.fields[1];
        assert!(base.embedded);
        assert!(base.flattens());
        assert_eq!(base.alias, None);

        let meta = &plan.fields[2];
        assert!(!meta.embedded);
        assert!(!meta.flattens());
        assert_eq!(meta.alias, Some("meta"));
        assert_eq!(meta.level, Level::LEVEL2);
    }

    #[test]
    fn nested_plans_are_compiled() {
        let plan = compile(device()).unwrap();
        let nested = plan.fields[2].nested.as_ref().unwrap();
        assert_eq!(nested.name, "Meta");
        assert_eq!(nested.fields.len(), 2);
        assert!(nested.fields[1].omit_on_empty);
        assert_eq!(plan.entry_count(), 7);
    }

    #[test]
    fn tag_errors_abort_compilation() {
        let err = compile(broken()).unwrap_err();
        match err {
            SiftError::TagParse {
                record,
                field,
                source,
            } => {
                assert_eq!(record, "Broken");
                assert_eq!(field, "level");
                assert_eq!(
                    source,
                    TagError::UnsupportedConfidentialityTag("level1,level2".to_string())
                );
            }
            other => panic!("expected TagParse, got {other:?}"),
        }
    }

    #[test]
    fn self_nesting_is_rejected() {
        let err = compile(looping()).unwrap_err();
        assert!(matches!(
            err,
            SiftError::CyclicType { record: "Loop", ref path } if path == "Loop -> Loop"
        ));
    }

    #[test]
    fn same_type_twice_is_not_a_cycle() {
        // `base` and `meta` both use `Meta`; siblings are not ancestors.
        assert!(compile(device()).is_ok());
    }

    #[test]
    fn display_lists_fields() {
        let plan = compile(meta()).unwrap();
        assert_eq!(
            plan.to_string(),
            "Meta { index[0], field[country], alias[country], omit_on_empty[false], \
             level[level1], embedded[false]; index[1], field[city], alias[city], \
             omit_on_empty[true], level[level1], embedded[false] }"
        );
    }
}
