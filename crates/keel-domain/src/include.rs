//! Include-path resolution
//!
//! Converts a typed property-access expression into the dot-joined path a
//! persistence adapter uses to request eager loading of related data, and
//! collects resolved paths into a deduplicated, dependency-ordered set.

/// Shape of a property-access expression over an entity graph.
///
/// Built with the fluent constructors: a nested chain is
/// `PathExpr::root().member("Parent").member("Name")`, a projection over a
/// collection is `.select(|item| item.member("Tag"))` where the closure
/// receives the collection element as a fresh root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathExpr {
    /// The root parameter of the expression
    Root,
    /// Member access on a receiver expression
    Member {
        /// Expression the member is read from
        recv: Box<PathExpr>,
        /// Member name
        name: &'static str,
    },
    /// Projection over a collection-valued receiver; the projection body is
    /// rooted at the collection element
    Select {
        /// Collection-valued receiver
        recv: Box<PathExpr>,
        /// Path taken from each element
        projection: Box<PathExpr>,
    },
    /// Type-conversion wrapper around an inner expression
    Convert(Box<PathExpr>),
    /// Any shape the resolver does not recognize
    Opaque,
}

impl PathExpr {
    /// The root parameter
    pub fn root() -> Self {
        Self::Root
    }

    /// Access a member of the current expression
    pub fn member(self, name: &'static str) -> Self {
        Self::Member {
            recv: Box::new(self),
            name,
        }
    }

    /// Project each element of the current (collection-valued) expression
    pub fn select(self, projection: impl FnOnce(PathExpr) -> PathExpr) -> Self {
        Self::Select {
            recv: Box::new(self),
            projection: Box::new(projection(PathExpr::Root)),
        }
    }

    /// Wrap the current expression in a type conversion
    pub fn convert(self) -> Self {
        Self::Convert(Box::new(self))
    }

    /// Resolve to a dot-joined include path.
    ///
    /// Unrecognized shapes resolve to an empty string, which callers treat
    /// as "no include needed".
    pub fn resolve(&self) -> String {
        match self {
            Self::Root | Self::Opaque => String::new(),
            Self::Member { recv, name } => {
                if recv.is_root() {
                    (*name).to_string()
                } else {
                    let base = recv.resolve();
                    if base.is_empty() {
                        String::new()
                    } else {
                        format!("{base}.{name}")
                    }
                }
            }
            Self::Select { recv, projection } => {
                let base = recv.resolve();
                let elem = projection.resolve();
                if base.is_empty() || elem.is_empty() {
                    String::new()
                } else {
                    format!("{base}.{elem}")
                }
            }
            Self::Convert(inner) => inner.resolve(),
        }
    }

    /// Whether this expression is the root parameter, ignoring conversions
    fn is_root(&self) -> bool {
        match self {
            Self::Root => true,
            Self::Convert(inner) => inner.is_root(),
            _ => false,
        }
    }
}

/// Ordered set of include paths attached to a query specification.
///
/// `resolved` deduplicates by exact equality, drops paths that are a strict
/// dotted prefix of another retained path (the longer path implies the
/// shorter one), and yields shortest paths first so adapters apply them in
/// dependency order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet {
    paths: Vec<String>,
}

impl IncludeSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw include path; empty paths are ignored
    pub fn add<S: Into<String>>(&mut self, path: S) {
        let path = path.into();
        if !path.is_empty() {
            self.paths.push(path);
        }
    }

    /// Resolve an expression and add the resulting path
    pub fn add_expr(&mut self, expr: &PathExpr) {
        self.add(expr.resolve());
    }

    /// Whether no paths were added
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The deduplicated, prefix-elided path list, shortest first
    pub fn resolved(&self) -> Vec<String> {
        let mut unique: Vec<&str> = Vec::new();
        for path in &self.paths {
            if !unique.contains(&path.as_str()) {
                unique.push(path);
            }
        }

        let mut kept: Vec<String> = unique
            .iter()
            .filter(|path| {
                !unique
                    .iter()
                    .any(|other| other.starts_with(&format!("{path}.")))
            })
            .map(|path| (*path).to_string())
            .collect();

        kept.sort_by_key(String::len);
        kept
    }
}
