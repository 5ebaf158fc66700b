//! Typed decoding of snapshots.
//!
//! These traits are automatically implemented for the snapshot types; they
//! are where untyped document fields become domain values.

use serde::de::DeserializeOwned;

use docbind_client::{CollectionSnapshot, DocumentPath, DocumentSnapshot};

use crate::convert::from_value;
use crate::Error;

/// A decoded document: its path plus the typed value.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<T> {
    pub path: DocumentPath,
    pub value: T,
}

/// Typed decoding for [`DocumentSnapshot`].
pub trait TypedDocumentSnapshot {
    /// Decode the document's fields into `T`.
    ///
    /// A missing document is [`Error::Missing`]; malformed fields are
    /// [`Error::Decode`] carrying the document path.
    fn decode<T: DeserializeOwned>(&self) -> Result<T, Error>;

    /// Decode, treating absence as `None` instead of an error.
    fn decode_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, Error>;
}

impl TypedDocumentSnapshot for DocumentSnapshot {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match self.data() {
            Some(fields) => {
                from_value(fields.clone()).map_err(|e| e.located_at(self.path()))
            }
            None => Err(Error::Missing {
                path: self.path().clone(),
            }),
        }
    }

    fn decode_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, Error> {
        match self.data() {
            Some(fields) => from_value(fields.clone())
                .map(Some)
                .map_err(|e| e.located_at(self.path())),
            None => Ok(None),
        }
    }
}

/// Typed decoding for [`CollectionSnapshot`].
pub trait TypedCollectionSnapshot {
    /// Decode every member document; the first failure aborts.
    fn decode_all<T: DeserializeOwned>(&self) -> Result<Vec<Document<T>>, Error>;

    /// Decode every member document, keeping per-document outcomes.
    ///
    /// Useful when a collection holds a few malformed documents and the
    /// caller wants the rest anyway.
    fn decode_each<T: DeserializeOwned>(&self) -> Vec<Result<Document<T>, Error>>;
}

impl TypedCollectionSnapshot for CollectionSnapshot {
    fn decode_all<T: DeserializeOwned>(&self) -> Result<Vec<Document<T>>, Error> {
        self.documents().iter().map(decode_member).collect()
    }

    fn decode_each<T: DeserializeOwned>(&self) -> Vec<Result<Document<T>, Error>> {
        self.documents().iter().map(decode_member).collect()
    }
}

fn decode_member<T: DeserializeOwned>(snap: &DocumentSnapshot) -> Result<Document<T>, Error> {
    snap.decode().map(|value| Document {
        path: snap.path().clone(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbind_client::{coll_path, doc_path, Value};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        name: String,
        age: u32,
    }

    fn user_fields(name: &str, age: i64) -> Value {
        [
            ("name".to_string(), Value::from(name)),
            ("age".to_string(), Value::from(age)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn decode_existing() {
        let snap = DocumentSnapshot::existing(doc_path!("users/a"), user_fields("Alice", 30));
        let user: User = snap.decode().unwrap();
        assert_eq!(
            user,
            User {
                name: "Alice".to_string(),
                age: 30
            }
        );
    }

    #[test]
    fn decode_missing_is_error_but_opt_is_none() {
        let snap = DocumentSnapshot::missing(doc_path!("users/a"));
        assert!(matches!(snap.decode::<User>(), Err(Error::Missing { .. })));
        assert_eq!(snap.decode_opt::<User>().unwrap(), None);
    }

    #[test]
    fn decode_failure_carries_document_path() {
        let snap = DocumentSnapshot::existing(
            doc_path!("users/broken"),
            [("name".to_string(), Value::from(1i64))].into_iter().collect(),
        );
        let err = snap.decode::<User>().unwrap_err();
        match err {
            Error::Decode { path, .. } => assert_eq!(path.to_string(), "users/broken"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn decode_all_aborts_on_first_failure() {
        let snap = CollectionSnapshot::new(
            coll_path!("users"),
            vec![
                DocumentSnapshot::existing(doc_path!("users/a"), user_fields("Alice", 30)),
                DocumentSnapshot::existing(doc_path!("users/bad"), Value::map()),
                DocumentSnapshot::existing(doc_path!("users/b"), user_fields("Bob", 40)),
            ],
        );
        assert!(snap.decode_all::<User>().is_err());
    }

    #[test]
    fn decode_each_keeps_the_good_ones() {
        let snap = CollectionSnapshot::new(
            coll_path!("users"),
            vec![
                DocumentSnapshot::existing(doc_path!("users/a"), user_fields("Alice", 30)),
                DocumentSnapshot::existing(doc_path!("users/bad"), Value::map()),
                DocumentSnapshot::existing(doc_path!("users/b"), user_fields("Bob", 40)),
            ],
        );
        let results = snap.decode_each::<User>();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        let doc = results[2].as_ref().unwrap();
        assert_eq!(doc.path, doc_path!("users/b"));
        assert_eq!(doc.value.name, "Bob");
    }

    #[test]
    fn decode_all_of_empty_collection() {
        let snap = CollectionSnapshot::new(coll_path!("users"), Vec::new());
        assert_eq!(snap.decode_all::<User>().unwrap(), Vec::new());
    }
}
