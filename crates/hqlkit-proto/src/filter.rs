//! Filter expression tree.
//!
//! Leaves are [`FilterPredicate`]s (a path, an operator and literal values);
//! inner nodes combine them with AND, OR and NOT. The tree is built by the
//! request layer and consumed read-only by the query builders.

use crate::path::Path;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Filter operators understood by the query builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal to a single value.
    Eq,
    /// Not equal to a single value.
    Ne,
    /// Member of a list of values.
    In,
    /// Not a member of a list of values.
    NotIn,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Matches a LIKE pattern supplied verbatim.
    Like,
    /// Starts with the value.
    Prefix,
    /// Starts with the value, ignoring case.
    PrefixCaseInsensitive,
    /// Ends with the value.
    Postfix,
    /// Contains the value.
    Infix,
    /// Is null.
    IsNull,
    /// Is not null.
    NotNull,
    /// Always true.
    True,
    /// Always false.
    False,
}

/// How many literals an operator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No literal; nothing is bound.
    Nullary,
    /// The first literal is bound.
    Single,
    /// The whole literal list is bound to one placeholder.
    List,
}

impl Operator {
    /// Literal arity of the operator.
    pub fn arity(&self) -> Arity {
        match self {
            Operator::In | Operator::NotIn => Arity::List,
            Operator::IsNull | Operator::NotNull | Operator::True | Operator::False => {
                Arity::Nullary
            }
            _ => Arity::Single,
        }
    }
}

/// A leaf predicate: `path operator values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// Path from the root entity to the filtered field.
    pub path: Path,
    /// Comparison operator.
    pub operator: Operator,
    /// Literal values, in request order.
    pub values: Vec<Value>,
}

impl FilterPredicate {
    /// Create a predicate.
    pub fn new<V: Into<Value>>(
        path: Path,
        operator: Operator,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            path,
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a predicate that takes no literal.
    pub fn nullary(path: Path, operator: Operator) -> Self {
        Self {
            path,
            operator,
            values: Vec::new(),
        }
    }

    /// Dotted field path of the predicate.
    pub fn field_path(&self) -> String {
        self.path.field_path()
    }

    /// Field names joined with underscores; the stem of placeholder names.
    pub fn parameter_stem(&self) -> String {
        self.path.field_names().collect::<Vec<_>>().join("_")
    }
}

/// A filter expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpression {
    /// Leaf predicate.
    Predicate(FilterPredicate),
    /// Both sides must hold.
    And(Box<FilterExpression>, Box<FilterExpression>),
    /// Either side must hold.
    Or(Box<FilterExpression>, Box<FilterExpression>),
    /// The inner expression must not hold.
    Not(Box<FilterExpression>),
}

impl FilterExpression {
    /// Combine two expressions with AND.
    pub fn and(left: impl Into<FilterExpression>, right: impl Into<FilterExpression>) -> Self {
        FilterExpression::And(Box::new(left.into()), Box::new(right.into()))
    }

    /// Combine two expressions with OR.
    pub fn or(left: impl Into<FilterExpression>, right: impl Into<FilterExpression>) -> Self {
        FilterExpression::Or(Box::new(left.into()), Box::new(right.into()))
    }

    /// Negate an expression.
    pub fn not(inner: impl Into<FilterExpression>) -> Self {
        FilterExpression::Not(Box::new(inner.into()))
    }

    /// Fold expressions into a left-nested AND chain. `None` when empty.
    pub fn all(exprs: impl IntoIterator<Item = FilterExpression>) -> Option<Self> {
        exprs.into_iter().reduce(FilterExpression::and)
    }

    /// Fold expressions into a left-nested OR chain. `None` when empty.
    pub fn any(exprs: impl IntoIterator<Item = FilterExpression>) -> Option<Self> {
        exprs.into_iter().reduce(FilterExpression::or)
    }

    /// Leaf predicates in left-to-right order.
    pub fn predicates(&self) -> Vec<&FilterPredicate> {
        let mut out = Vec::new();
        self.collect_predicates(&mut out);
        out
    }

    fn collect_predicates<'a>(&'a self, out: &mut Vec<&'a FilterPredicate>) {
        match self {
            FilterExpression::Predicate(p) => out.push(p),
            FilterExpression::And(l, r) | FilterExpression::Or(l, r) => {
                l.collect_predicates(out);
                r.collect_predicates(out);
            }
            FilterExpression::Not(inner) => inner.collect_predicates(out),
        }
    }
}

impl From<FilterPredicate> for FilterExpression {
    fn from(predicate: FilterPredicate) -> Self {
        FilterExpression::Predicate(predicate)
    }
}
