//! Free-text search predicate building
//!
//! Walks an entity's schema graph and composes a null-safe, OR-combined
//! substring predicate over every field marked searchable, descending into
//! single and collection navigations. Cyclic navigation graphs terminate
//! because a schema already on the current traversal path contributes
//! nothing further.

use crate::filter::Filter;
use crate::metadata::{FieldKind, Model, ModelSchema};

/// Builds search predicates from entity metadata
pub struct SearchFilter;

impl SearchFilter {
    /// Build the search predicate for `T`.
    ///
    /// A blank or whitespace term means no search was intended and yields
    /// `None` (callers apply no filter). A non-blank term over a type with
    /// no searchable surface anywhere in its reachable graph yields
    /// [`Filter::MatchNone`], so an explicit entity search returns an empty
    /// result set instead of an unfiltered scan.
    pub fn build<T: Model>(term: &str) -> Option<Filter> {
        if term.trim().is_empty() {
            return None;
        }
        let mut visited = Vec::new();
        Some(Self::for_schema(T::schema(), term, &mut visited).unwrap_or(Filter::MatchNone))
    }

    /// Predicate for one schema level, `None` when nothing at this level or
    /// below is searchable.
    ///
    /// `visited` holds the schemas on the current traversal path; it grows
    /// on descent and shrinks on return, so a type may appear on sibling
    /// branches but never twice on one path.
    fn for_schema(
        schema: &'static ModelSchema,
        term: &str,
        visited: &mut Vec<&'static ModelSchema>,
    ) -> Option<Filter> {
        if visited.iter().any(|seen| std::ptr::eq(*seen, schema)) {
            return None;
        }
        visited.push(schema);

        let mut combined = None;
        for field in schema.fields.iter().filter(|field| field.searchable) {
            let node = match field.kind {
                FieldKind::Text => Some(Filter::contains(field.name, term)),
                FieldKind::Nav(target) => {
                    Self::for_schema(target(), term, visited).map(|inner| Filter::Nav {
                        field: field.name,
                        inner: Box::new(inner),
                    })
                }
                FieldKind::Collection(target) => {
                    Self::for_schema(target(), term, visited).map(|inner| Filter::AnyOf {
                        field: field.name,
                        inner: Box::new(inner),
                    })
                }
                _ => None,
            };
            combined = Filter::or_opt(combined, node);
        }

        visited.pop();
        combined
    }
}
