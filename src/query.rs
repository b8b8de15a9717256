//! Query-by-example: turn a record instance into equality predicates.
//!
//! Every scalar field of the example takes part in the filter, zero values included. A
//! zero value cannot be told apart from a field the caller left out, so there is no sparse
//! mode. Nested records are flattened using their own column names without any prefix, so
//! two nested records that share a column name both contribute a predicate for it.

use crate::record::{FieldKind, Record};
use sea_orm::{
    Condition,
    sea_query::{Alias, Expr, SimpleExpr},
    Value,
};

/// A single `column = value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub value: Value,
}

impl Predicate {
    #[must_use]
    pub fn into_expr(self) -> SimpleExpr {
        Expr::col(Alias::new(self.column)).eq(self.value)
    }
}

/// Walks `example` in declaration order and returns one predicate per scalar field.
#[must_use]
pub fn build_predicates(example: &dyn Record) -> Vec<Predicate> {
    let mut predicates = Vec::new();
    collect(example, &mut predicates);
    predicates
}

fn collect(record: &dyn Record, out: &mut Vec<Predicate>) {
    for field in record.fields() {
        match field.kind {
            FieldKind::Nested(inner) => collect(inner, out),
            FieldKind::Scalar(value) => out.push(Predicate {
                column: field.name,
                value,
            }),
        }
    }
}

/// Combines predicates into a conjunction.
#[must_use]
pub fn into_condition(predicates: Vec<Predicate>) -> Condition {
    predicates
        .into_iter()
        .fold(Condition::all(), |condition, predicate| {
            condition.add(predicate.into_expr())
        })
}

/// Shorthand for [`build_predicates`] followed by [`into_condition`].
#[must_use]
pub fn example_condition(example: &dyn Record) -> Condition {
    into_condition(build_predicates(example))
}
