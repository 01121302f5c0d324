use std::collections::HashMap;
use std::fmt;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::NO_BODY;
use crate::error::found;
use crate::{Client, ClientError, HeaderOptions, MediaType, add_options};

/// A data file shipped to the server as part of database creation.
#[derive(Clone, Debug)]
pub struct DatabaseFile {
    /// File name reported to the server.
    pub name: String,
    /// Raw file contents.
    pub content: Vec<u8>,
    /// Named graph to load the file into, when not the default graph.
    pub context: Option<String>,
}

/// RDF serialization selector for [`Client::export_database`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Turtle,
    Trig,
    NTriples,
    NQuads,
    JsonLd,
    RdfXml,
}

impl ExportFormat {
    /// Returns the `format` query-parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::Trig => "trig",
            Self::NTriples => "ntriples",
            Self::NQuads => "nquads",
            Self::JsonLd => "jsonld",
            Self::RdfXml => "rdfxml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`Client::export_database`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportOptions {
    /// Write the export to a file on the server instead of streaming it
    /// back.
    #[serde(rename = "server-side", skip_serializing_if = "Option::is_none")]
    pub server_side: Option<bool>,
    /// Restrict the export to one named graph.
    #[serde(rename = "graph-uri", skip_serializing_if = "Option::is_none")]
    pub graph_uri: Option<String>,
    /// Compression applied to server-side exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
}

/// One namespace binding of a database.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasesResponse {
    databases: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NamespacesResponse {
    namespaces: Vec<Namespace>,
}

#[derive(Debug, Serialize)]
struct CreateDatabaseRoot<'a> {
    dbname: &'a str,
    options: &'a HashMap<String, Value>,
    files: Vec<CreateDatabaseFile<'a>>,
}

#[derive(Debug, Serialize)]
struct CreateDatabaseFile<'a> {
    filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
}

impl Client {
    /// Lists the names of all databases on the server.
    pub async fn list_databases(&self) -> Result<Vec<String>, ClientError> {
        let response: DatabasesResponse = self
            .request_json(
                Method::GET,
                "admin/databases",
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.databases)
    }

    /// Returns whether a database exists. A 404 from the server is the
    /// negative answer, not an error.
    pub async fn database_exists(&self, db: &str) -> Result<bool, ClientError> {
        let result = self
            .request_empty(
                Method::GET,
                &format!("admin/databases/{db}/options"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await;
        found(result)
    }

    /// Creates a database, optionally bulk-loading the given data files.
    ///
    /// Sent as a multipart form: a `root` part carrying the JSON
    /// descriptor (name, options, file manifest) plus one part per file.
    pub async fn create_database(
        &self,
        name: &str,
        options: &HashMap<String, Value>,
        files: &[DatabaseFile],
    ) -> Result<(), ClientError> {
        let root = CreateDatabaseRoot {
            dbname: name,
            options,
            files: files
                .iter()
                .map(|file| CreateDatabaseFile {
                    filename: &file.name,
                    context: file.context.as_deref(),
                })
                .collect(),
        };
        let mut form = Form::new().text("root", serde_json::to_string(&root)?);
        for file in files {
            form = form.part(
                file.name.clone(),
                Part::bytes(file.content.clone()).file_name(file.name.clone()),
            );
        }

        let request = self.new_multipart_request(Method::POST, "admin/databases", form)?;
        self.execute(request).await?;
        Ok(())
    }

    /// Drops a database and all of its data.
    pub async fn drop_database(&self, db: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::DELETE,
            &format!("admin/databases/{db}"),
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }

    /// Brings a database online.
    pub async fn online_database(&self, db: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::PUT,
            &format!("admin/databases/{db}/online"),
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }

    /// Takes a database offline.
    pub async fn offline_database(&self, db: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::PUT,
            &format!("admin/databases/{db}/offline"),
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }

    /// Optimizes a database's indexes.
    pub async fn optimize_database(&self, db: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::PUT,
            &format!("admin/databases/{db}/optimize"),
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }

    /// Returns the number of triples in a database.
    ///
    /// With `exact` false the server may answer from statistics.
    pub async fn database_size(&self, db: &str, exact: bool) -> Result<u64, ClientError> {
        let body = self
            .request_text(
                Method::GET,
                &format!("{db}/size?exact={exact}"),
                HeaderOptions::accept(MediaType::PlainText),
                NO_BODY,
            )
            .await?;
        body.trim()
            .parse()
            .map_err(|_| ClientError::UnexpectedBody(body))
    }

    /// Returns all configuration options set on a database.
    pub async fn database_options(
        &self,
        db: &str,
    ) -> Result<HashMap<String, Value>, ClientError> {
        self.request_json(
            Method::GET,
            &format!("admin/databases/{db}/options"),
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }

    /// Sets configuration options on a database. The database must be
    /// offline for most options to take effect.
    pub async fn set_database_options(
        &self,
        db: &str,
        options: &HashMap<String, Value>,
    ) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            &format!("admin/databases/{db}/options"),
            HeaderOptions::json(),
            Some(options),
        )
        .await
    }

    /// Lists the namespace prefix bindings of a database.
    pub async fn namespaces(&self, db: &str) -> Result<Vec<Namespace>, ClientError> {
        let response: NamespacesResponse = self
            .request_json(
                Method::GET,
                &format!("{db}/namespaces"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.namespaces)
    }

    /// Exports a database in the given RDF serialization.
    ///
    /// The format selector is a query parameter, so export options are
    /// merged onto the existing query string.
    pub async fn export_database(
        &self,
        db: &str,
        format: ExportFormat,
        options: Option<&ExportOptions>,
    ) -> Result<Vec<u8>, ClientError> {
        let path = add_options(&format!("{db}/export?format={format}"), options)?;
        self.request_bytes(Method::GET, &path, HeaderOptions::default(), NO_BODY)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{ExportFormat, ExportOptions};
    use crate::add_options;

    #[test]
    fn export_format_query_values() {
        assert_eq!(ExportFormat::Trig.to_string(), "trig");
        assert_eq!(ExportFormat::NQuads.as_str(), "nquads");
    }

    #[test]
    fn export_path_merges_format_and_options() {
        let opts = ExportOptions {
            server_side: Some(true),
            ..ExportOptions::default()
        };
        let path = add_options("db/export?format=trig", Some(&opts)).expect("encodes");
        assert_eq!(path, "db/export?format=trig&server-side=true");
    }
}
