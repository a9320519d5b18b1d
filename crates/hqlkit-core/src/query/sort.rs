//! `ORDER BY` compilation.

use super::builder::QueryContext;
use crate::error::{Error, Result};
use hqlkit_proto::Sorting;

/// Render `ORDER BY <ref> ASC|DESC, ...`, or nothing when unsorted.
///
/// Sort keys go through the same join registry as filter paths, so a key that
/// shares a prefix with a predicate reuses its join.
pub(crate) fn compile_sorting(ctx: &mut QueryContext<'_>, sorting: &Sorting) -> Result<String> {
    if sorting.is_unsorted() {
        return Ok(String::new());
    }

    let mut keys = Vec::with_capacity(sorting.rules().len());
    for rule in sorting.rules() {
        let resolved = ctx.resolve_dotted(&rule.path)?;
        if !resolved.terminal_is_attribute {
            return Err(Error::MalformedPath(format!(
                "cannot sort on relationship '{}'",
                rule.path
            )));
        }
        keys.push(format!("{} {}", resolved.reference, rule.order.keyword()));
    }
    Ok(format!("ORDER BY {}", keys.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, EntityDef, FieldDef, RelationDef, ScalarType};
    use crate::config::BuilderConfig;

    fn catalog() -> Catalog {
        let catalog = Catalog::new();
        catalog.bind_entity(
            EntityDef::new("example.Book", "id")
                .with_attribute(FieldDef::new("title", ScalarType::String))
                .with_relationship(RelationDef::many_to_one("publisher", "example.Publisher")),
        );
        catalog.bind_entity(
            EntityDef::new("example.Publisher", "id")
                .with_attribute(FieldDef::new("name", ScalarType::String)),
        );
        catalog
    }

    #[test]
    fn test_order_by() {
        let catalog = catalog();
        let mut ctx = QueryContext::new(&catalog, "example.Book", &BuilderConfig::default()).unwrap();
        let sorting = Sorting::parse("-title,publisher.name").unwrap();

        assert_eq!(
            compile_sorting(&mut ctx, &sorting).unwrap(),
            "ORDER BY example_Book.title DESC, example_Book_publisher.name ASC"
        );
        assert_eq!(
            ctx.joins(),
            "  LEFT JOIN example_Book.publisher example_Book_publisher "
        );
    }

    #[test]
    fn test_unsorted() {
        let catalog = catalog();
        let mut ctx = QueryContext::new(&catalog, "example.Book", &BuilderConfig::default()).unwrap();
        assert_eq!(compile_sorting(&mut ctx, &Sorting::unsorted()).unwrap(), "");
        assert_eq!(ctx.joins(), "");
    }

    #[test]
    fn test_sort_errors() {
        let catalog = catalog();
        let mut ctx = QueryContext::new(&catalog, "example.Book", &BuilderConfig::default()).unwrap();
        assert!(matches!(
            compile_sorting(&mut ctx, &Sorting::unsorted().asc("publisher")),
            Err(Error::MalformedPath(_))
        ));
        assert!(matches!(
            compile_sorting(&mut ctx, &Sorting::unsorted().asc("isbn")),
            Err(Error::UnknownField { .. })
        ));
    }
}
