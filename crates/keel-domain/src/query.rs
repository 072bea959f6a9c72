//! Query specifications
//!
//! A [`QuerySpec`] describes filter, eager-load, ordering, paging, and
//! execution-option intent in one composable value. The calling code builds
//! it; the persistence adapter reads it without retaining it. Application
//! order inside an adapter is fixed: predicate, execution options, include
//! paths, ordering keys, then the paging window.

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::include::{IncludeSet, PathExpr};
use crate::metadata::Model;
use crate::search::SearchFilter;
use bitflags::bitflags;
use std::marker::PhantomData;

bitflags! {
    /// Query execution options
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct QueryOptions: u8 {
        /// Do not track returned entities in the unit of work
        const NO_TRACKING = 1 << 0;
        /// No tracking, but resolve duplicate rows to one instance
        const NO_TRACKING_WITH_IDENTITY = 1 << 1;
        /// Include rows hidden by global filters such as soft deletion
        const IGNORE_GLOBAL_FILTERS = 1 << 2;
        /// Ask a relational adapter to split a multi-include query
        const SPLIT_QUERY = 1 << 3;
    }
}

/// One ordering key: field plus direction. The first key is the primary
/// sort; later keys break ties in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    /// Field name on the entity schema
    pub field: &'static str,
    /// Sort ascending when true, descending otherwise
    pub ascending: bool,
}

/// Composable descriptor of filter, eager-load, ordering, paging, and
/// execution-option intent over entity type `T`
#[derive(Debug, Clone)]
pub struct QuerySpec<T> {
    predicate: Option<Filter>,
    includes: IncludeSet,
    order: Vec<OrderKey>,
    page_number: Option<usize>,
    page_size: usize,
    options: QueryOptions,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Default for QuerySpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QuerySpec<T> {
    /// Empty specification: no filter, no ordering, default page size
    pub fn new() -> Self {
        Self {
            predicate: None,
            includes: IncludeSet::new(),
            order: Vec::new(),
            page_number: None,
            page_size: DEFAULT_PAGE_SIZE,
            options: QueryOptions::empty(),
            _entity: PhantomData,
        }
    }

    /// Set the filter predicate
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.predicate = Some(filter);
        self
    }

    /// Add an eager-load path from a resolved expression
    pub fn with_include(mut self, expr: &PathExpr) -> Self {
        self.includes.add_expr(expr);
        self
    }

    /// Add a raw eager-load path
    pub fn with_include_path<S: Into<String>>(mut self, path: S) -> Self {
        self.includes.add(path);
        self
    }

    /// Append an ascending ordering key
    pub fn order_by(mut self, field: &'static str) -> Self {
        self.order.push(OrderKey {
            field,
            ascending: true,
        });
        self
    }

    /// Append a descending ordering key
    pub fn order_by_desc(mut self, field: &'static str) -> Self {
        self.order.push(OrderKey {
            field,
            ascending: false,
        });
        self
    }

    /// Select the one-based page a paged fetch should return
    pub fn page(mut self, page_number: usize) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Override the page window size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Union execution options into the specification
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options |= options;
        self
    }

    /// Check the specification for invalid configuration.
    ///
    /// Adapters call this on every apply so misuse fails fast instead of
    /// being silently resolved.
    pub fn validate(&self) -> Result<()> {
        if self
            .options
            .contains(QueryOptions::NO_TRACKING | QueryOptions::NO_TRACKING_WITH_IDENTITY)
        {
            return Err(Error::configuration(
                "NO_TRACKING and NO_TRACKING_WITH_IDENTITY cannot both be set",
            ));
        }
        if self.page_size == 0 {
            return Err(Error::configuration("page size must be positive"));
        }
        if self.page_number == Some(0) {
            return Err(Error::configuration("page numbers are one-based"));
        }
        Ok(())
    }

    /// Filter predicate, when set
    pub fn predicate(&self) -> Option<&Filter> {
        self.predicate.as_ref()
    }

    /// Eager-load paths
    pub fn includes(&self) -> &IncludeSet {
        &self.includes
    }

    /// Ordering keys in declaration order
    pub fn order(&self) -> &[OrderKey] {
        &self.order
    }

    /// Selected page number, when set
    pub fn page_number(&self) -> Option<usize> {
        self.page_number
    }

    /// Page window size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Execution options
    pub fn options(&self) -> QueryOptions {
        self.options
    }
}

impl<T: Model> QuerySpec<T> {
    /// Set the predicate from a free-text search term.
    ///
    /// A blank term leaves the specification unfiltered; a non-blank term
    /// over a type with no searchable surface filters everything out.
    pub fn with_search(mut self, term: &str) -> Self {
        self.predicate = SearchFilter::build::<T>(term);
        self
    }
}
