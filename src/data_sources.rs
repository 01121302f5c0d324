use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::NO_BODY;
use crate::{Client, ClientError, HeaderOptions, MediaType, add_options};

/// Options for [`Client::delete_data_source`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct DeleteDataSourceOptions {
    /// Delete the data source even while virtual graphs still use it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct DataSourcesResponse {
    data_sources: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DataSourceOptionsResponse {
    options: HashMap<String, Value>,
}

#[derive(Debug, Serialize)]
struct DataSourceBody<'a> {
    name: &'a str,
    options: &'a HashMap<String, Value>,
}

impl Client {
    /// Lists the names of all registered data sources.
    pub async fn list_data_sources(&self) -> Result<Vec<String>, ClientError> {
        let response: DataSourcesResponse = self
            .request_json(
                Method::GET,
                "admin/data_sources",
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.data_sources)
    }

    /// Returns the configuration options of a data source.
    pub async fn data_source_options(
        &self,
        name: &str,
    ) -> Result<HashMap<String, Value>, ClientError> {
        let response: DataSourceOptionsResponse = self
            .request_json(
                Method::GET,
                &format!("admin/data_sources/{name}/options"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.options)
    }

    /// Registers a new data source.
    pub async fn add_data_source(
        &self,
        name: &str,
        options: &HashMap<String, Value>,
    ) -> Result<(), ClientError> {
        let body = DataSourceBody { name, options };
        self.request_empty(
            Method::POST,
            "admin/data_sources",
            HeaderOptions::json(),
            Some(&body),
        )
        .await
    }

    /// Updates an existing data source's options.
    pub async fn update_data_source(
        &self,
        name: &str,
        options: &HashMap<String, Value>,
    ) -> Result<(), ClientError> {
        let body = DataSourceBody { name, options };
        self.request_empty(
            Method::PUT,
            &format!("admin/data_sources/{name}"),
            HeaderOptions::json(),
            Some(&body),
        )
        .await
    }

    /// Deletes a data source.
    pub async fn delete_data_source(
        &self,
        name: &str,
        options: Option<&DeleteDataSourceOptions>,
    ) -> Result<(), ClientError> {
        let path = add_options(&format!("admin/data_sources/{name}"), options)?;
        self.request_empty(
            Method::DELETE,
            &path,
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }

    /// Brings a data source online after a connection loss.
    pub async fn online_data_source(&self, name: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            &format!("admin/data_sources/{name}/online"),
            HeaderOptions::default(),
            NO_BODY,
        )
        .await
    }
}
