//! Filter expression compilation.
//!
//! `And(a, b)` renders as `(a AND b)`, `Or(a, b)` as `(a OR b)` and `Not(a)` as
//! `NOT (a)`. Literals are never inlined: each predicate binds its values to a
//! fresh placeholder.

use super::builder::QueryContext;
use crate::error::{Error, Result};
use hqlkit_proto::{Arity, FilterExpression, FilterPredicate, Operator};

const ALWAYS_TRUE: &str = "(1 = 1)";
const ALWAYS_FALSE: &str = "(1 = 0)";

pub(crate) fn compile_filter(ctx: &mut QueryContext<'_>, expr: &FilterExpression) -> Result<String> {
    match expr {
        FilterExpression::Predicate(predicate) => compile_predicate(ctx, predicate),
        FilterExpression::And(left, right) => {
            let left = compile_filter(ctx, left)?;
            let right = compile_filter(ctx, right)?;
            Ok(format!("({left} AND {right})"))
        }
        FilterExpression::Or(left, right) => {
            let left = compile_filter(ctx, left)?;
            let right = compile_filter(ctx, right)?;
            Ok(format!("({left} OR {right})"))
        }
        FilterExpression::Not(inner) => Ok(format!("NOT ({})", compile_filter(ctx, inner)?)),
    }
}

fn compile_predicate(ctx: &mut QueryContext<'_>, predicate: &FilterPredicate) -> Result<String> {
    let reference = ctx.resolve(&predicate.path)?.reference;
    let operator = predicate.operator;

    match operator.arity() {
        Arity::Nullary => Ok(render_nullary(operator, &reference)),
        Arity::List => {
            if predicate.values.is_empty() {
                let constant = match operator {
                    Operator::NotIn => ALWAYS_TRUE,
                    _ => ALWAYS_FALSE,
                };
                return Ok(constant.to_string());
            }
            let placeholder = ctx.bind(&predicate.parameter_stem(), predicate.values.clone());
            Ok(render(operator, &reference, &placeholder))
        }
        Arity::Single => {
            let value = predicate.values.first().cloned().ok_or_else(|| {
                Error::MalformedPath(format!(
                    "{operator:?} on '{}' needs a value",
                    predicate.path
                ))
            })?;
            let placeholder = ctx.bind(&predicate.parameter_stem(), vec![value]);
            Ok(render(operator, &reference, &placeholder))
        }
    }
}

fn render_nullary(operator: Operator, reference: &str) -> String {
    match operator {
        Operator::IsNull => format!("{reference} IS NULL"),
        Operator::NotNull => format!("{reference} IS NOT NULL"),
        Operator::False => ALWAYS_FALSE.to_string(),
        _ => ALWAYS_TRUE.to_string(),
    }
}

fn render(operator: Operator, reference: &str, placeholder: &str) -> String {
    match operator {
        Operator::Eq => format!("{reference} = :{placeholder}"),
        Operator::Ne => format!("{reference} <> :{placeholder}"),
        Operator::In => format!("{reference} IN (:{placeholder})"),
        Operator::NotIn => format!("{reference} NOT IN (:{placeholder})"),
        Operator::Lt => format!("{reference} < :{placeholder}"),
        Operator::Le => format!("{reference} <= :{placeholder}"),
        Operator::Gt => format!("{reference} > :{placeholder}"),
        Operator::Ge => format!("{reference} >= :{placeholder}"),
        Operator::Like => format!("{reference} LIKE :{placeholder}"),
        Operator::Prefix => format!("{reference} LIKE CONCAT(:{placeholder}, '%')"),
        Operator::PrefixCaseInsensitive => {
            format!("lower({reference}) LIKE CONCAT(lower(:{placeholder}), '%')")
        }
        Operator::Postfix => format!("{reference} LIKE CONCAT('%', :{placeholder})"),
        Operator::Infix => format!("{reference} LIKE CONCAT('%', :{placeholder}, '%')"),
        Operator::IsNull | Operator::NotNull | Operator::True | Operator::False => {
            render_nullary(operator, reference)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, EntityDef, FieldDef, RelationDef, ScalarType};
    use crate::config::BuilderConfig;
    use hqlkit_proto::{Path, PathElement, Value};

    fn catalog() -> Catalog {
        let catalog = Catalog::new();
        catalog.bind_entity(
            EntityDef::new("example.Book", "id")
                .with_attribute(FieldDef::new("title", ScalarType::String))
                .with_attribute(FieldDef::new("pages", ScalarType::Int32))
                .with_relationship(RelationDef::many_to_one("publisher", "example.Publisher")),
        );
        catalog.bind_entity(
            EntityDef::new("example.Publisher", "id")
                .with_attribute(FieldDef::new("name", ScalarType::String)),
        );
        catalog
    }

    fn title() -> Path {
        Path::attribute("example.Book", "String", "title")
    }

    fn publisher_name() -> Path {
        Path::new(vec![
            PathElement::new("example.Book", "example.Publisher", "publisher"),
            PathElement::new("example.Publisher", "String", "name"),
        ])
    }

    /// Compile and replace the single placeholder with `:p`.
    fn compile_one(predicate: FilterPredicate) -> String {
        let catalog = catalog();
        let mut ctx = QueryContext::new(&catalog, "example.Book", &BuilderConfig::default()).unwrap();
        let text = compile_filter(&mut ctx, &predicate.into()).unwrap();
        let artifact = ctx.finish(text);
        let out = match artifact.parameter_names().next() {
            Some(name) => artifact.text().replace(name, "p"),
            None => artifact.text().to_string(),
        };
        out
    }

    #[test]
    fn test_operator_rendering() {
        let cases = [
            (Operator::Eq, "example_Book.title = :p"),
            (Operator::Ne, "example_Book.title <> :p"),
            (Operator::In, "example_Book.title IN (:p)"),
            (Operator::NotIn, "example_Book.title NOT IN (:p)"),
            (Operator::Lt, "example_Book.title < :p"),
            (Operator::Le, "example_Book.title <= :p"),
            (Operator::Gt, "example_Book.title > :p"),
            (Operator::Ge, "example_Book.title >= :p"),
            (Operator::Like, "example_Book.title LIKE :p"),
            (Operator::Prefix, "example_Book.title LIKE CONCAT(:p, '%')"),
            (
                Operator::PrefixCaseInsensitive,
                "lower(example_Book.title) LIKE CONCAT(lower(:p), '%')",
            ),
            (Operator::Postfix, "example_Book.title LIKE CONCAT('%', :p)"),
            (Operator::Infix, "example_Book.title LIKE CONCAT('%', :p, '%')"),
        ];
        for (operator, expected) in cases {
            assert_eq!(
                compile_one(FilterPredicate::new(title(), operator, ["abc"])),
                expected,
                "{operator:?}"
            );
        }
    }

    #[test]
    fn test_nullary_operators() {
        assert_eq!(
            compile_one(FilterPredicate::nullary(title(), Operator::IsNull)),
            "example_Book.title IS NULL"
        );
        assert_eq!(
            compile_one(FilterPredicate::nullary(title(), Operator::NotNull)),
            "example_Book.title IS NOT NULL"
        );
        assert_eq!(compile_one(FilterPredicate::nullary(title(), Operator::True)), "(1 = 1)");
        assert_eq!(compile_one(FilterPredicate::nullary(title(), Operator::False)), "(1 = 0)");
    }

    #[test]
    fn test_empty_lists() {
        let empty: [&str; 0] = [];
        assert_eq!(compile_one(FilterPredicate::new(title(), Operator::In, empty)), "(1 = 0)");
        assert_eq!(compile_one(FilterPredicate::new(title(), Operator::NotIn, empty)), "(1 = 1)");
    }

    #[test]
    fn test_boolean_structure() {
        let catalog = catalog();
        let mut ctx = QueryContext::new(&catalog, "example.Book", &BuilderConfig::default()).unwrap();
        let expr = FilterExpression::not(FilterExpression::and(
            FilterPredicate::new(title(), Operator::Eq, ["A"]),
            FilterExpression::or(
                FilterPredicate::new(publisher_name(), Operator::Eq, ["P"]),
                FilterPredicate::nullary(title(), Operator::IsNull),
            ),
        ));
        let text = compile_filter(&mut ctx, &expr).unwrap();
        let artifact = ctx.finish(text);

        let names: Vec<_> = artifact.parameter_names().map(str::to_string).collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("title_"));
        assert!(names[1].starts_with("publisher_name_"));
        assert_eq!(
            artifact.text(),
            format!(
                "NOT ((example_Book.title = :{} AND (example_Book_publisher.name = :{} OR example_Book.title IS NULL)))",
                names[0], names[1]
            )
        );
    }

    #[test]
    fn test_single_value_binding() {
        let catalog = catalog();
        let mut ctx = QueryContext::new(&catalog, "example.Book", &BuilderConfig::default()).unwrap();
        let predicate = FilterPredicate::new(
            Path::attribute("example.Book", "Int32", "pages"),
            Operator::Ge,
            [100i32, 200],
        );
        let text = compile_filter(&mut ctx, &predicate.into()).unwrap();
        let artifact = ctx.finish(text);
        assert_eq!(artifact.bindings().len(), 1);
        assert_eq!(artifact.bindings()[0].values, vec![Value::Int32(100)]);
    }

    #[test]
    fn test_single_value_missing() {
        let catalog = catalog();
        let mut ctx = QueryContext::new(&catalog, "example.Book", &BuilderConfig::default()).unwrap();
        let predicate = FilterPredicate::nullary(title(), Operator::Eq);
        assert!(matches!(
            compile_filter(&mut ctx, &predicate.into()),
            Err(Error::MalformedPath(_))
        ));
    }
}
