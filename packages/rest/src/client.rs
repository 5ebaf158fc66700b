//! The REST-backed client.

use std::sync::Arc;
use std::thread;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use reqwest::Url;

use docbind_client::{
    AddCallback, ClientError, CollectionCallback, CollectionObserver, CollectionPath,
    CollectionSnapshot, DocumentCallback, DocumentFetch, DocumentListen, DocumentObserver,
    DocumentPath, DocumentSnapshot, DocumentWrite, ListenerRegistration, Value, WriteCallback,
};
use docbind_typed::{json_to_value, value_to_json};

use crate::Error;

/// A document-database client over a REST-style HTTP backend.
///
/// Every operation runs the HTTP exchange on its own background thread and
/// fires the boundary callback when the exchange completes; nothing blocks
/// the calling thread.
///
/// The plain request/response mapping has no change feed, so the listen
/// primitives report [`ClientError::Unsupported`].
pub struct RestClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    base_url: Url,
}

impl RestClient {
    /// Connect to the server at `base_url` with a default HTTP client.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(headers).build()?;
        Self::with_client(base_url, client)
    }

    /// Connect with a caller-configured `reqwest` client (custom timeouts,
    /// auth headers, proxies).
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("'{}' cannot serve as a base URL", base_url),
            });
        }
        Ok(Self {
            inner: Arc::new(Inner { client, base_url }),
        })
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&Inner) + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        thread::spawn(move || job(&inner));
    }
}

impl Inner {
    fn build_url(&self, path: &docbind_client::Path) -> Result<Url, ClientError> {
        let joined = path.iter().collect::<Vec<_>>().join("/");
        self.base_url.join(&joined).map_err(|e| {
            ClientError::Transport(Box::new(Error::InvalidUrl {
                message: e.to_string(),
            }))
        })
    }

    fn get_document(&self, path: &DocumentPath) -> Result<DocumentSnapshot, ClientError> {
        let url = self.build_url(path.as_path())?;
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(DocumentSnapshot::missing(path.clone()));
        }
        let response = check_status(response)?;

        let fields = read_fields(response)?;
        Ok(DocumentSnapshot::existing(path.clone(), fields))
    }

    fn get_collection(&self, path: &CollectionPath) -> Result<CollectionSnapshot, ClientError> {
        let url = self.build_url(path.as_path())?;
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            // An absent collection is an empty one.
            return Ok(CollectionSnapshot::new(path.clone(), Vec::new()));
        }
        let response = check_status(response)?;
        let status = response.status().as_u16();

        let json: serde_json::Value = response
            .json()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        let serde_json::Value::Object(members) = json else {
            return Err(ClientError::Backend {
                code: status,
                message: "collection response body is not a JSON object".to_string(),
            });
        };

        let mut documents = Vec::with_capacity(members.len());
        for (id, fields) in members {
            let doc_path = path.doc(&id).map_err(|e| ClientError::Backend {
                code: status,
                message: format!("invalid document id '{}': {}", id, e),
            })?;
            let fields = json_to_value(fields);
            if !fields.is_map() {
                return Err(ClientError::Backend {
                    code: status,
                    message: format!("document '{}' body is not a JSON object", id),
                });
            }
            documents.push(DocumentSnapshot::existing(doc_path, fields));
        }
        Ok(CollectionSnapshot::new(path.clone(), documents))
    }

    fn put_document(&self, path: &DocumentPath, fields: Value) -> Result<(), ClientError> {
        let url = self.build_url(path.as_path())?;
        log::debug!("PUT {}", url);
        let response = self
            .client
            .put(url)
            .json(&value_to_json(fields))
            .send()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        check_status(response)?;
        Ok(())
    }

    fn post_document(
        &self,
        collection: &CollectionPath,
        fields: Value,
    ) -> Result<DocumentPath, ClientError> {
        let url = self.build_url(collection.as_path())?;
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(&value_to_json(fields))
            .send()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        let response = check_status(response)?;
        let status = response.status().as_u16();

        let json: serde_json::Value = response
            .json()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        let id = json
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ClientError::Backend {
                code: status,
                message: "create response carries no 'id' field".to_string(),
            })?;
        collection.doc(id).map_err(|e| ClientError::Backend {
            code: status,
            message: format!("invalid generated id '{}': {}", id, e),
        })
    }

    fn delete_document(&self, path: &DocumentPath) -> Result<(), ClientError> {
        let url = self.build_url(path.as_path())?;
        log::debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        // Deleting a missing document succeeds.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check_status(response)?;
        Ok(())
    }
}

/// Map a non-success status onto a `ClientError`.
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthenticated,
        StatusCode::FORBIDDEN => ClientError::PermissionDenied,
        _ => {
            let message = response.text().unwrap_or_default();
            ClientError::Backend {
                code: status.as_u16(),
                message,
            }
        }
    })
}

/// Read a document body as a field map.
fn read_fields(response: reqwest::blocking::Response) -> Result<Value, ClientError> {
    let status = response.status().as_u16();
    let json: serde_json::Value = response
        .json()
        .map_err(|e| ClientError::Transport(Box::new(e)))?;
    let fields = json_to_value(json);
    if fields.is_map() {
        Ok(fields)
    } else {
        Err(ClientError::Backend {
            code: status,
            message: "document response body is not a JSON object".to_string(),
        })
    }
}

impl DocumentFetch for RestClient {
    fn fetch_document(&self, path: &DocumentPath, on_complete: DocumentCallback) {
        let path = path.clone();
        self.spawn(move |inner| match inner.get_document(&path) {
            Ok(snap) => on_complete(Some(snap), None),
            Err(e) => on_complete(None, Some(e)),
        });
    }

    fn fetch_collection(&self, path: &CollectionPath, on_complete: CollectionCallback) {
        let path = path.clone();
        self.spawn(move |inner| match inner.get_collection(&path) {
            Ok(snap) => on_complete(Some(snap), None),
            Err(e) => on_complete(None, Some(e)),
        });
    }
}

impl DocumentListen for RestClient {
    fn listen_document(
        &self,
        _path: &DocumentPath,
        mut observer: DocumentObserver,
    ) -> ListenerRegistration {
        observer(None, Some(ClientError::Unsupported));
        ListenerRegistration::inert()
    }

    fn listen_collection(
        &self,
        _path: &CollectionPath,
        mut observer: CollectionObserver,
    ) -> ListenerRegistration {
        observer(None, Some(ClientError::Unsupported));
        ListenerRegistration::inert()
    }
}

impl DocumentWrite for RestClient {
    fn set_document(&self, path: &DocumentPath, fields: Value, on_complete: WriteCallback) {
        let path = path.clone();
        self.spawn(move |inner| on_complete(inner.put_document(&path, fields).err()));
    }

    fn add_document(&self, collection: &CollectionPath, fields: Value, on_complete: AddCallback) {
        let collection = collection.clone();
        self.spawn(move |inner| on_complete(inner.post_document(&collection, fields)));
    }

    fn delete_document(&self, path: &DocumentPath, on_complete: WriteCallback) {
        let path = path.clone();
        self.spawn(move |inner| on_complete(inner.delete_document(&path).err()));
    }
}
