//! Records: types whose fields can be sifted.
//!
//! A record describes itself twice:
//!
//! - statically, through a [`RecordDescriptor`] listing every field with its
//!   raw tags and nesting kind, and
//! - per value, through [`Record::field`], which hands out each field either
//!   as a leaf value or as a nested record.
//!
//! `#[derive(Sift)]` writes both. The plan compiler only ever reads the
//! descriptor; the traversal executor only ever reads values.
//!
//! ## Field kinds
//!
//! | Attribute | Kind | Output |
//! |-----------|------|--------|
//! | None | `Leaf` | Serialized value under its alias |
//! | `#[sift(nested)]` | `Nested` | Children under the field's alias |
//! | `#[sift(embed)]` | `Embedded` | Children merged into the parent, unless aliased |

use std::{any::TypeId, fmt, rc::Rc, sync::Arc};

use serde::Serialize;
use serde_json::Value;

use crate::SiftError;

// =============================================================================
// Descriptors - what a record type looks like
// =============================================================================

/// Static description of a record type.
#[derive(Debug)]
pub struct RecordDescriptor {
    /// Type name, used in diagnostics.
    pub name: &'static str,
    /// Identity of the described type.
    pub type_id: fn() -> TypeId,
    /// Fields in declaration order.
    pub fields: &'static [FieldDescriptor],
}

/// Static description of one field.
#[derive(Debug)]
pub struct FieldDescriptor {
    /// Declared field name; the position for tuple fields.
    pub name: &'static str,
    /// Raw serialization tag, empty when absent.
    pub serialization_tag: &'static str,
    /// Raw confidentiality tag, empty when absent.
    pub confidentiality_tag: &'static str,
    /// Whether the field is a plain value or a walked record.
    pub kind: FieldKind,
}

/// How a field's value relates to its record.
///
/// Nested descriptors are referenced through functions so that a type can
/// mention itself; the plan compiler rejects such cycles.
#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    /// A plain value.
    Leaf,
    /// A named nested record.
    Nested(fn() -> &'static RecordDescriptor),
    /// An embedded record whose fields flatten into the parent by default.
    Embedded(fn() -> &'static RecordDescriptor),
}

impl FieldKind {
    /// Returns the nested record's descriptor function, if any.
    pub fn nested(self) -> Option<fn() -> &'static RecordDescriptor> {
        match self {
            Self::Leaf => None,
            Self::Nested(descriptor) | Self::Embedded(descriptor) => Some(descriptor),
        }
    }

    /// Returns `true` for fields declared with `embed`.
    pub fn is_embedded(self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}

impl RecordDescriptor {
    /// Returns the identity of the described type.
    pub fn id(&self) -> TypeId {
        (self.type_id)()
    }
}

// =============================================================================
// Record - per-value access
// =============================================================================

/// A value whose fields can be sifted.
///
/// Implemented by `#[derive(Sift)]`. Hand-written implementations must keep
/// [`Record::field`] consistent with the descriptor: index `i` refers to
/// `descriptor().fields[i]`, and a field is a [`FieldRef::Record`] exactly
/// when its kind is nested or embedded.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a sifter `Record`",
    label = "this type cannot be walked by the sifter",
    note = "use `#[derive(Sift)]` on the type definition",
    note = "leave the field without `#[sift(nested)]` or `#[sift(embed)]` if it is a plain value"
)]
pub trait Record {
    /// Returns the static descriptor of this value's type.
    fn descriptor(&self) -> &'static RecordDescriptor;

    /// Returns the field at `index`, or `None` if it cannot be read.
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;
}

/// A [`Record`] with a statically known descriptor.
pub trait RecordType: Record + Sized {
    /// Returns the descriptor shared by every value of the type.
    fn record_descriptor() -> &'static RecordDescriptor;
}

/// A borrowed field value.
pub enum FieldRef<'a> {
    /// A value written to the output as is.
    Leaf(&'a dyn LeafValue),
    /// A nested or embedded record, walked field by field.
    Record(&'a dyn Record),
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(_) => f.write_str("Leaf"),
            Self::Record(record) => write!(f, "Record({})", record.descriptor().name),
        }
    }
}

impl<T> Record for Box<T>
where
    T: Record + ?Sized,
{
    fn descriptor(&self) -> &'static RecordDescriptor {
        (**self).descriptor()
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        (**self).field(index)
    }
}

impl<T> RecordType for Box<T>
where
    T: RecordType,
{
    fn record_descriptor() -> &'static RecordDescriptor {
        T::record_descriptor()
    }
}

// =============================================================================
// LeafValue - values written to the output tree
// =============================================================================

/// A field value that can be written to the output tree.
///
/// Blanket-implemented for every `Serialize` type.
pub trait LeafValue {
    /// Converts the value into the output tree's value model.
    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

impl<T> LeafValue for T
where
    T: Serialize + ?Sized,
{
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Returns `true` for the empty form of a serialized value: `null`, `false`,
/// zero, and empty strings, sequences and maps.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(value) => !value,
        Value::Number(number) => {
            number.as_u64() == Some(0)
                || number.as_i64() == Some(0)
                || number.as_f64().is_some_and(|value| value == 0.0)
        }
        Value::String(value) => value.is_empty(),
        Value::Array(values) => values.is_empty(),
        Value::Object(values) => values.is_empty(),
    }
}

// =============================================================================
// Siftable - accepted top-level arguments
// =============================================================================

/// A record, or something that transparently refers to one.
pub trait Siftable {
    /// Resolves the record to sift.
    fn as_record(&self) -> Result<&dyn Record, SiftError>;
}

impl Siftable for dyn Record + '_ {
    fn as_record(&self) -> Result<&dyn Record, SiftError> {
        Ok(self)
    }
}

macro_rules! impl_siftable_deref {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T> Siftable for $ty
            where
                T: Siftable + ?Sized,
            {
                fn as_record(&self) -> Result<&dyn Record, SiftError> {
                    (**self).as_record()
                }
            }
        )*
    };
}

impl_siftable_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T> Siftable for Option<T>
where
    T: Siftable,
{
    fn as_record(&self) -> Result<&dyn Record, SiftError> {
        match self {
            Some(value) => value.as_record(),
            None => Err(SiftError::Type {
                found: format!("an empty `{}`", std::any::type_name::<Self>()),
            }),
        }
    }
}
