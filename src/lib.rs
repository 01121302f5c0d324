//! Rust client library for the Graphstore graph database HTTP API.
//!
//! Public API layers:
//! - [`Client`]: async client with typed methods per API resource group
//!   (databases, SPARQL, transactions, security, data sources, virtual
//!   graphs, stored queries, server admin).
//! - [`BlockingClient`]: synchronous generic transport counterpart.
//! - [`ClientError`]: unified error type used by both clients; non-2xx
//!   responses are classified into [`ApiError`] values.
//!
//! Every call is a single HTTP round trip; retries, timeouts and
//! cancellation are the caller's to configure.

mod auth;
mod blocking_client;
mod client;
mod data_sources;
mod databases;
mod error;
mod media_type;
mod security;
mod server;
mod sparql;
mod stored_queries;
mod transactions;
mod virtual_graphs;

/// Credentials attached to every request.
pub use auth::Credentials;
/// Synchronous generic transport client.
pub use blocking_client::BlockingClient;
/// Async client and request-building surface.
pub use client::{Client, HeaderOptions, add_options};
pub use data_sources::DeleteDataSourceOptions;
pub use databases::{DatabaseFile, ExportFormat, ExportOptions, Namespace};
/// Error types and the 404-as-negative-result helper.
pub use error::{ApiError, ClientError, found};
pub use media_type::MediaType;
pub use security::{DeleteRoleOptions, Permission};
pub use server::ServerStatusOptions;
pub use sparql::{QueryOptions, SelectBindings, SelectHead, SelectResults, Term};
pub use stored_queries::StoredQuery;
pub use transactions::TransactionDataOptions;
pub use virtual_graphs::VirtualGraph;
