use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::{Client, ClientError, HeaderOptions, MediaType};

/// A named query stored on the server.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredQuery {
    pub name: String,
    /// Database the query runs against; `*` means any.
    pub database: String,
    pub query: String,
    /// Visible to all users rather than only the creator.
    #[serde(default)]
    pub shared: bool,
    /// Run with reasoning enabled.
    #[serde(default)]
    pub reasoning: bool,
}

#[derive(Debug, Default, Deserialize)]
struct StoredQueriesResponse {
    queries: Vec<StoredQuery>,
}

impl Client {
    /// Lists all stored queries visible to the authenticated user.
    pub async fn list_stored_queries(&self) -> Result<Vec<StoredQuery>, ClientError> {
        let response: StoredQueriesResponse = self
            .request_json(
                Method::GET,
                "admin/queries/stored",
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.queries)
    }

    /// Returns one stored query by name, or `None` when it does not
    /// exist (the server answers 404).
    pub async fn stored_query(&self, name: &str) -> Result<Option<StoredQuery>, ClientError> {
        let result: Result<StoredQueriesResponse, ClientError> = self
            .request_json(
                Method::GET,
                &format!("admin/queries/stored/{name}"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await;
        match result {
            Ok(response) => Ok(response.queries.into_iter().next()),
            Err(ClientError::Api(api)) if api.status == reqwest::StatusCode::NOT_FOUND => Ok(None),
            Err(other) => Err(other),
        }
    }

    /// Stores a new named query.
    pub async fn add_stored_query(&self, query: &StoredQuery) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            "admin/queries/stored",
            HeaderOptions::json(),
            Some(query),
        )
        .await
    }

    /// Replaces a stored query, creating it when absent.
    pub async fn update_stored_query(&self, query: &StoredQuery) -> Result<(), ClientError> {
        self.request_empty(
            Method::PUT,
            "admin/queries/stored",
            HeaderOptions::json(),
            Some(query),
        )
        .await
    }

    /// Deletes a stored query by name.
    pub async fn delete_stored_query(&self, name: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::DELETE,
            &format!("admin/queries/stored/{name}"),
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::StoredQuery;

    #[test]
    fn missing_flags_default_to_false() {
        let raw = r#"{"name":"q","database":"*","query":"SELECT * { ?s ?p ?o }"}"#;
        let query: StoredQuery = serde_json::from_str(raw).expect("deserializes");
        assert!(!query.shared);
        assert!(!query.reasoning);
    }
}
