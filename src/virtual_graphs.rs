use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::NO_BODY;
use crate::{Client, ClientError, HeaderOptions, MediaType};

/// A virtual graph definition: a mapping from an external data source
/// into RDF.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VirtualGraph {
    pub name: String,
    /// Mapping text (SMS or R2RML, selected via `options`).
    pub mappings: String,
    #[serde(default)]
    pub options: HashMap<String, Value>,
    /// Registered data source backing the graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    /// Database the graph is associated with, when not global.
    #[serde(rename = "db", skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VirtualGraphsResponse {
    virtual_graphs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VirtualGraphOptionsResponse {
    options: HashMap<String, Value>,
}

impl Client {
    /// Lists the names of all virtual graphs.
    pub async fn list_virtual_graphs(&self) -> Result<Vec<String>, ClientError> {
        let response: VirtualGraphsResponse = self
            .request_json(
                Method::GET,
                "admin/virtual_graphs",
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.virtual_graphs)
    }

    /// Registers a new virtual graph.
    pub async fn add_virtual_graph(&self, graph: &VirtualGraph) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            "admin/virtual_graphs",
            HeaderOptions::json(),
            Some(graph),
        )
        .await
    }

    /// Replaces an existing virtual graph definition.
    pub async fn update_virtual_graph(&self, graph: &VirtualGraph) -> Result<(), ClientError> {
        self.request_empty(
            Method::PUT,
            &format!("admin/virtual_graphs/{}", graph.name),
            HeaderOptions::json(),
            Some(graph),
        )
        .await
    }

    /// Removes a virtual graph.
    pub async fn remove_virtual_graph(&self, name: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::DELETE,
            &format!("admin/virtual_graphs/{name}"),
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }

    /// Returns the mapping text of a virtual graph.
    pub async fn virtual_graph_mappings(&self, name: &str) -> Result<String, ClientError> {
        self.request_text(
            Method::GET,
            &format!("admin/virtual_graphs/{name}/mappings"),
            HeaderOptions::accept(MediaType::PlainText),
            NO_BODY,
        )
        .await
    }

    /// Returns the configuration options of a virtual graph.
    pub async fn virtual_graph_options(
        &self,
        name: &str,
    ) -> Result<HashMap<String, Value>, ClientError> {
        let response: VirtualGraphOptionsResponse = self
            .request_json(
                Method::GET,
                &format!("admin/virtual_graphs/{name}/options"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.options)
    }
}

#[cfg(test)]
mod tests {
    use super::VirtualGraph;

    #[test]
    fn unset_optional_fields_are_omitted_from_the_body() {
        let graph = VirtualGraph {
            name: "vg1".to_owned(),
            mappings: String::new(),
            ..VirtualGraph::default()
        };
        let raw = serde_json::to_string(&graph).expect("serializes");
        assert!(!raw.contains("data_source"));
        assert!(!raw.contains("\"db\""));
    }

    #[test]
    fn database_field_maps_to_db_on_the_wire() {
        let graph = VirtualGraph {
            name: "vg1".to_owned(),
            database: Some("music".to_owned()),
            ..VirtualGraph::default()
        };
        let raw = serde_json::to_string(&graph).expect("serializes");
        assert!(raw.contains(r#""db":"music""#));
    }
}
