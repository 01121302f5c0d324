use std::collections::HashMap;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::client::NO_BODY;
use crate::error::found;
use crate::{Client, ClientError, HeaderOptions, MediaType, add_options};

/// Options for [`Client::server_status`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ServerStatusOptions {
    /// Include per-database metrics in the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databases: Option<bool>,
}

impl Client {
    /// Returns whether the server answers its health check.
    ///
    /// Any 2xx means healthy; 404 and connection-level failures from a
    /// not-yet-listening server are reported as errors, so only a served
    /// 404 maps to `false`.
    pub async fn healthy(&self) -> Result<bool, ClientError> {
        let result = self
            .request_empty(
                Method::GET,
                "admin/healthcheck",
                HeaderOptions::accept(MediaType::PlainText),
                NO_BODY,
            )
            .await;
        found(result)
    }

    /// Returns the server status report as a key/value map.
    pub async fn server_status(
        &self,
        options: Option<&ServerStatusOptions>,
    ) -> Result<HashMap<String, Value>, ClientError> {
        let path = add_options("admin/status", options)?;
        self.request_json(
            Method::GET,
            &path,
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }

    /// Asks the server to shut down.
    pub async fn shutdown_server(&self) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            "admin/shutdown",
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::ServerStatusOptions;
    use crate::add_options;

    #[test]
    fn status_options_encode_databases_flag() {
        let opts = ServerStatusOptions {
            databases: Some(true),
        };
        let path = add_options("admin/status", Some(&opts)).expect("encodes");
        assert_eq!(path, "admin/status?databases=true");
    }
}
