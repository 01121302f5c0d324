use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{Client, ClientError, HeaderOptions, MediaType, add_options};

/// Per-query execution options, encoded as query parameters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct QueryOptions {
    /// Enable reasoning for this query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<bool>,
    /// Server-side query timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Result limit applied on top of the query's own LIMIT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Result offset applied on top of the query's own OFFSET.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Base URI used to resolve relative IRIs in the query.
    #[serde(rename = "baseURI", skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
}

/// SPARQL results JSON for a SELECT query.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SelectResults {
    pub head: SelectHead,
    pub results: SelectBindings,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SelectHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SelectBindings {
    #[serde(default)]
    pub bindings: Vec<HashMap<String, Term>>,
}

/// One bound RDF term in a SELECT result row.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Term {
    /// Term kind: `uri`, `literal` or `bnode`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
}

impl Client {
    /// Executes a SPARQL query and returns the raw response body in the
    /// requested result format.
    ///
    /// Use [`Client::select`] or [`Client::ask`] for typed results; this
    /// method is the general form for CONSTRUCT/DESCRIBE and the CSV/TSV
    /// result formats.
    pub async fn query(
        &self,
        db: &str,
        query: &str,
        accept: MediaType,
        options: Option<&QueryOptions>,
    ) -> Result<Vec<u8>, ClientError> {
        let path = add_options(&format!("{db}/query"), options)?;
        let headers = HeaderOptions {
            content_type: Some(MediaType::SparqlQuery),
            accept: Some(accept),
        };
        let request = self.new_raw_request(Method::POST, &path, headers, query.to_owned())?;
        let response = self.execute(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Executes a SELECT query and decodes the SPARQL results JSON.
    pub async fn select(
        &self,
        db: &str,
        query: &str,
        options: Option<&QueryOptions>,
    ) -> Result<SelectResults, ClientError> {
        let body = self
            .query(db, query, MediaType::SparqlResultsJson, options)
            .await?;
        if body.is_empty() {
            Ok(SelectResults::default())
        } else {
            Ok(serde_json::from_slice(&body)?)
        }
    }

    /// Executes an ASK query and returns the boolean answer.
    ///
    /// The server answers in the `text/boolean` format, a bare `true` or
    /// `false`.
    pub async fn ask(
        &self,
        db: &str,
        query: &str,
        options: Option<&QueryOptions>,
    ) -> Result<bool, ClientError> {
        let body = self
            .query(db, query, MediaType::Boolean, options)
            .await?;
        let text = String::from_utf8_lossy(&body);
        match text.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ClientError::UnexpectedBody(text.into_owned())),
        }
    }

    /// Executes a SPARQL UPDATE. Success carries no body.
    pub async fn update(
        &self,
        db: &str,
        update: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(), ClientError> {
        let path = add_options(&format!("{db}/update"), options)?;
        let headers = HeaderOptions {
            content_type: Some(MediaType::SparqlUpdate),
            accept: None,
        };
        let request = self.new_raw_request(Method::POST, &path, headers, update.to_owned())?;
        self.execute(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryOptions, SelectResults};
    use crate::add_options;

    #[test]
    fn query_options_encode_only_set_fields() {
        let opts = QueryOptions {
            reasoning: Some(true),
            limit: Some(10),
            ..QueryOptions::default()
        };
        let path = add_options("db/query", Some(&opts)).expect("encodes");
        assert_eq!(path, "db/query?reasoning=true&limit=10");
    }

    #[test]
    fn query_options_rename_base_uri() {
        let opts = QueryOptions {
            base_uri: Some("http://example.com/".to_owned()),
            ..QueryOptions::default()
        };
        let path = add_options("db/query", Some(&opts)).expect("encodes");
        assert!(path.contains("baseURI=http"));
    }

    #[test]
    fn select_results_decode_bindings() {
        let raw = br#"{
            "head": {"vars": ["s"]},
            "results": {"bindings": [
                {"s": {"type": "uri", "value": "http://example.com/a"}}
            ]}
        }"#;
        let results: SelectResults = serde_json::from_slice(raw).expect("valid results JSON");
        assert_eq!(results.head.vars, ["s"]);
        assert_eq!(results.results.bindings.len(), 1);
        assert_eq!(results.results.bindings[0]["s"].kind, "uri");
    }
}
