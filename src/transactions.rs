use reqwest::Method;
use serde::Serialize;

use crate::client::NO_BODY;
use crate::{Client, ClientError, HeaderOptions, MediaType, add_options};

/// Options for adding or removing data within a transaction.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TransactionDataOptions {
    /// Named graph the data is written to or removed from.
    #[serde(rename = "graph-uri", skip_serializing_if = "Option::is_none")]
    pub graph_uri: Option<String>,
}

impl Client {
    /// Begins a transaction and returns its id.
    pub async fn begin_transaction(&self, db: &str) -> Result<String, ClientError> {
        let body = self
            .request_text(
                Method::POST,
                &format!("{db}/transaction/begin"),
                HeaderOptions::accept(MediaType::PlainText),
                NO_BODY,
            )
            .await?;
        Ok(body.trim().to_owned())
    }

    /// Commits a transaction.
    pub async fn commit_transaction(&self, db: &str, tx: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            &format!("{db}/transaction/commit/{tx}"),
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }

    /// Rolls a transaction back, discarding its changes.
    pub async fn rollback_transaction(&self, db: &str, tx: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            &format!("{db}/transaction/rollback/{tx}"),
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }

    /// Adds RDF data to a database within a transaction.
    ///
    /// `format` is the serialization of `data` (Turtle, TriG, ...).
    pub async fn add_data(
        &self,
        db: &str,
        tx: &str,
        data: String,
        format: MediaType,
        options: Option<&TransactionDataOptions>,
    ) -> Result<(), ClientError> {
        self.transaction_data(db, tx, "add", data, format, options).await
    }

    /// Removes RDF data from a database within a transaction.
    pub async fn remove_data(
        &self,
        db: &str,
        tx: &str,
        data: String,
        format: MediaType,
        options: Option<&TransactionDataOptions>,
    ) -> Result<(), ClientError> {
        self.transaction_data(db, tx, "remove", data, format, options)
            .await
    }

    /// Clears all data in the database within a transaction.
    pub async fn clear_data(&self, db: &str, tx: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            &format!("{db}/{tx}/clear"),
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }

    async fn transaction_data(
        &self,
        db: &str,
        tx: &str,
        action: &str,
        data: String,
        format: MediaType,
        options: Option<&TransactionDataOptions>,
    ) -> Result<(), ClientError> {
        let path = add_options(&format!("{db}/{tx}/{action}"), options)?;
        let headers = HeaderOptions {
            content_type: Some(format),
            accept: None,
        };
        let request = self.new_raw_request(Method::POST, &path, headers, data)?;
        self.execute(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionDataOptions;
    use crate::add_options;

    #[test]
    fn graph_uri_encodes_as_kebab_parameter() {
        let opts = TransactionDataOptions {
            graph_uri: Some("urn:g1".to_owned()),
        };
        let path = add_options("db/tx-1/add", Some(&opts)).expect("encodes");
        assert_eq!(path, "db/tx-1/add?graph-uri=urn%3Ag1");
    }
}
