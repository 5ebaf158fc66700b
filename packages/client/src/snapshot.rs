//! Snapshots: what a fetch or a listen event delivers.

use crate::{CollectionPath, DocumentPath, Value};

/// The state of one document at the moment a backend observed it.
///
/// A snapshot exists even when the document does not: `data` is `None` for
/// a missing document, so absence can flow through the same callback
/// channel as presence.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSnapshot {
    path: DocumentPath,
    data: Option<Value>,
}

impl DocumentSnapshot {
    /// A snapshot of an existing document with the given fields.
    pub fn existing(path: DocumentPath, fields: Value) -> Self {
        Self {
            path,
            data: Some(fields),
        }
    }

    /// A snapshot recording that the document does not exist.
    pub fn missing(path: DocumentPath) -> Self {
        Self { path, data: None }
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// The document id (last path component).
    pub fn id(&self) -> &str {
        self.path.id()
    }

    /// Whether the document existed when the snapshot was taken.
    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    /// The document's fields, or `None` for a missing document.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Consume the snapshot, yielding its fields.
    pub fn into_data(self) -> Option<Value> {
        self.data
    }
}

/// The state of a collection at the moment a backend observed it.
///
/// Carries only existing documents; a missing document is simply not a
/// member.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionSnapshot {
    path: CollectionPath,
    documents: Vec<DocumentSnapshot>,
}

impl CollectionSnapshot {
    /// Build a collection snapshot from existing-document snapshots.
    ///
    /// # Panics
    ///
    /// Debug-asserts that every member exists and belongs to `path`;
    /// backends construct snapshots and own that invariant.
    pub fn new(path: CollectionPath, documents: Vec<DocumentSnapshot>) -> Self {
        debug_assert!(documents.iter().all(|d| d.exists()));
        debug_assert!(documents.iter().all(|d| path.contains(d.path())));
        Self { path, documents }
    }

    pub fn path(&self) -> &CollectionPath {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The member documents.
    pub fn documents(&self) -> &[DocumentSnapshot] {
        &self.documents
    }

    /// Consume the snapshot, yielding its documents.
    pub fn into_documents(self) -> Vec<DocumentSnapshot> {
        self.documents
    }
}

impl<'a> IntoIterator for &'a CollectionSnapshot {
    type Item = &'a DocumentSnapshot;
    type IntoIter = std::slice::Iter<'a, DocumentSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{coll_path, doc_path};

    #[test]
    fn existing_and_missing() {
        let snap = DocumentSnapshot::existing(doc_path!("users/a"), Value::map());
        assert!(snap.exists());
        assert_eq!(snap.id(), "a");
        assert_eq!(snap.data(), Some(&Value::map()));

        let snap = DocumentSnapshot::missing(doc_path!("users/b"));
        assert!(!snap.exists());
        assert_eq!(snap.data(), None);
        assert_eq!(snap.into_data(), None);
    }

    #[test]
    fn collection_members() {
        let coll = coll_path!("users");
        let snap = CollectionSnapshot::new(
            coll.clone(),
            vec![
                DocumentSnapshot::existing(doc_path!("users/a"), Value::map()),
                DocumentSnapshot::existing(doc_path!("users/b"), Value::map()),
            ],
        );
        assert_eq!(snap.len(), 2);
        assert!(!snap.is_empty());
        assert_eq!(snap.path(), &coll);
        let ids: Vec<&str> = snap.into_iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn empty_collection() {
        let snap = CollectionSnapshot::new(coll_path!("users"), Vec::new());
        assert!(snap.is_empty());
        assert_eq!(snap.into_documents(), Vec::new());
    }
}
