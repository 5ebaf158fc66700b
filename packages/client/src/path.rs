//! Validated paths addressing documents and collections.
//!
//! A database is addressed as alternating collection/document components:
//! `users` is a collection, `users/abc` a document, `users/abc/orders` a
//! nested collection, and so on. `Path` is the raw validated form;
//! `DocumentPath` and `CollectionPath` add the depth-parity guarantee.

use std::fmt;

/// Errors related to path parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path component is not a valid identifier.
    InvalidComponent {
        component: String,
        position: usize,
        message: String,
    },
    /// The path as a whole does not address what the caller asked for.
    WrongDepth { path: String, message: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidComponent {
                component,
                position,
                message,
            } => write!(
                f,
                "invalid path component '{}' at position {}: {}",
                component, position, message
            ),
            PathError::WrongDepth { path, message } => {
                write!(f, "path '{}' {}", path, message)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A validated path: a sequence of identifier components.
///
/// Components must be Unicode identifiers (per UAX#31) or pure-numeric
/// strings. Parsing normalizes repeated and trailing slashes.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    components: Vec<String>,
}

impl Path {
    /// Parse a path string, validating every component.
    ///
    /// ```rust
    /// use docbind_client::Path;
    ///
    /// let p = Path::parse("users/abc/orders").unwrap();
    /// assert_eq!(p.len(), 3);
    /// assert_eq!(Path::parse("users//abc/").unwrap(), Path::parse("users/abc").unwrap());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let components: Vec<String> = s
            .split('/')
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        for (i, component) in components.iter().enumerate() {
            validate_component(component, i)?;
        }
        Ok(Path { components })
    }

    /// Build a path from components, validating each.
    pub fn try_from_components(
        components: impl IntoIterator<Item = String>,
    ) -> Result<Self, PathError> {
        let components: Vec<String> = components.into_iter().collect();
        for (i, component) in components.iter().enumerate() {
            validate_component(component, i)?;
        }
        Ok(Path { components })
    }

    /// The empty (root) path.
    pub fn root() -> Self {
        Path {
            components: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    /// The last component, if any.
    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// Append a single pre-validated component.
    fn push(&self, component: &str) -> Path {
        let mut components = self.components.clone();
        components.push(component.to_string());
        Path { components }
    }

    /// The path with its last component removed, or `None` at the root.
    pub fn parent(&self) -> Option<Path> {
        if self.components.is_empty() {
            return None;
        }
        Some(Path {
            components: self.components[..self.components.len() - 1].to_vec(),
        })
    }
}

/// Validate a single path component.
fn validate_component(component: &str, position: usize) -> Result<(), PathError> {
    if component.is_empty() {
        return Err(PathError::InvalidComponent {
            component: component.to_string(),
            position,
            message: "empty component".to_string(),
        });
    }

    // Pure numeric components are allowed (generated ids may be numeric).
    if component.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }

    let mut chars = component.chars();
    let first = chars.next().unwrap();
    let valid_start = unicode_ident::is_xid_start(first)
        || (first == '_'
            && chars
                .clone()
                .next()
                .is_some_and(unicode_ident::is_xid_continue));
    if !valid_start {
        return Err(PathError::InvalidComponent {
            component: component.to_string(),
            position,
            message: "must start with a letter or underscore followed by letter/digit".to_string(),
        });
    }
    for c in chars {
        if !unicode_ident::is_xid_continue(c) {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: format!("invalid character '{}' in identifier", c),
            });
        }
    }
    Ok(())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                write!(f, "/")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Path {
    type Output = str;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

/// A path addressing a single document.
///
/// Always an even number of components: alternating collection names and
/// document ids, ending on an id.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentPath(Path);

impl DocumentPath {
    /// Parse a document path.
    ///
    /// Fails if any component is invalid or the component count is odd
    /// (which would address a collection) or zero.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        Path::parse(s)?.try_into()
    }

    /// The document id (last component).
    pub fn id(&self) -> &str {
        // Non-empty by construction.
        self.0.last().unwrap()
    }

    /// The collection this document belongs to.
    pub fn parent(&self) -> CollectionPath {
        CollectionPath(self.0.parent().unwrap())
    }

    /// A subcollection under this document.
    pub fn collection(&self, name: &str) -> Result<CollectionPath, PathError> {
        validate_component(name, self.0.len())?;
        Ok(CollectionPath(self.0.push(name)))
    }

    /// The underlying raw path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<Path> for DocumentPath {
    type Error = PathError;

    fn try_from(path: Path) -> Result<Self, PathError> {
        if path.is_empty() || path.len() % 2 != 0 {
            return Err(PathError::WrongDepth {
                path: path.to_string(),
                message: "does not address a document (needs an even, non-zero depth)"
                    .to_string(),
            });
        }
        Ok(DocumentPath(path))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A path addressing a collection of documents.
///
/// Always an odd number of components, ending on a collection name.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollectionPath(Path);

impl CollectionPath {
    /// Parse a collection path.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        Path::parse(s)?.try_into()
    }

    /// The collection name (last component).
    pub fn name(&self) -> &str {
        self.0.last().unwrap()
    }

    /// The document with the given id inside this collection.
    pub fn doc(&self, id: &str) -> Result<DocumentPath, PathError> {
        validate_component(id, self.0.len())?;
        Ok(DocumentPath(self.0.push(id)))
    }

    /// The parent document, or `None` for a top-level collection.
    pub fn parent(&self) -> Option<DocumentPath> {
        let parent = self.0.parent()?;
        if parent.is_empty() {
            None
        } else {
            Some(DocumentPath(parent))
        }
    }

    /// The underlying raw path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Whether `doc` is a direct member of this collection.
    pub fn contains(&self, doc: &DocumentPath) -> bool {
        doc.parent() == *self
    }
}

impl TryFrom<Path> for CollectionPath {
    type Error = PathError;

    fn try_from(path: Path) -> Result<Self, PathError> {
        if path.len() % 2 != 1 {
            return Err(PathError::WrongDepth {
                path: path.to_string(),
                message: "does not address a collection (needs an odd depth)".to_string(),
            });
        }
        Ok(CollectionPath(path))
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Macro for document-path literals.
///
/// ```rust
/// use docbind_client::doc_path;
///
/// let p = doc_path!("users/abc");
/// assert_eq!(p.id(), "abc");
/// ```
#[macro_export]
macro_rules! doc_path {
    ($s:expr) => {
        $crate::DocumentPath::parse($s).expect("invalid document path literal")
    };
}

/// Macro for collection-path literals.
#[macro_export]
macro_rules! coll_path {
    ($s:expr) => {
        $crate::CollectionPath::parse($s).expect("invalid collection path literal")
    };
}
