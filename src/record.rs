//! Record descriptors.
//!
//! A [`Record`] exposes its fields, in declaration order, as a list of [`Field`]s. The list
//! is built on demand as a view over one instance; it is normally generated with
//! `#[derive(Record)]` rather than written by hand.

use sea_orm::Value;

/// A record type whose fields can be walked at runtime.
///
/// Records never contain cycles, so walking nested records always terminates.
pub trait Record: Sync {
    /// Field descriptors for this instance, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// One field of a record: its column name and what it holds.
pub struct Field<'a> {
    pub name: &'static str,
    pub kind: FieldKind<'a>,
}

pub enum FieldKind<'a> {
    /// A bindable value stored in a single column.
    Scalar(Value),
    /// An embedded record whose own fields map to columns of the same table.
    Nested(&'a dyn Record),
}

impl<'a> Field<'a> {
    pub fn scalar(name: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar(value.into()),
        }
    }

    pub fn nested(name: &'static str, record: &'a dyn Record) -> Self {
        Self {
            name,
            kind: FieldKind::Nested(record),
        }
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(self.kind, FieldKind::Nested(_))
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            FieldKind::Scalar(value) => f
                .debug_struct("Field")
                .field("name", &self.name)
                .field("value", value)
                .finish(),
            FieldKind::Nested(record) => f
                .debug_struct("Field")
                .field("name", &self.name)
                .field("nested", &record.fields())
                .finish(),
        }
    }
}
