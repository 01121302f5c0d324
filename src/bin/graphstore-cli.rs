use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use graphstore_client::{Client, MediaType, QueryOptions, ServerStatusOptions};
use reqwest::Method;
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(
    name = "graphstore-cli",
    version,
    about = "Small async CLI for the Graphstore HTTP API"
)]
struct Cli {
    /// Base URL of the server.
    #[arg(long, env = "GRAPHSTORE_BASE_URL", default_value = "http://localhost:5820")]
    base_url: String,

    /// Username for basic authentication.
    #[arg(long, env = "GRAPHSTORE_USERNAME", requires = "password")]
    username: Option<String>,

    /// Password for basic authentication.
    #[arg(long, env = "GRAPHSTORE_PASSWORD", requires = "username")]
    password: Option<String>,

    /// Bearer token; takes precedence over basic auth.
    #[arg(long, env = "GRAPHSTORE_TOKEN")]
    token: Option<String>,

    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List databases on the server.
    Databases,
    /// Run a SPARQL SELECT query against a database.
    Query(QueryArgs),
    /// Show the server status report.
    Status {
        /// Include per-database metrics.
        #[arg(long)]
        databases: bool,
    },
    /// Send a raw HTTP request using method + path.
    Request(RequestArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// Database to query.
    database: String,

    /// SPARQL query text.
    query: String,

    /// Enable reasoning for this query.
    #[arg(long)]
    reasoning: bool,
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE, ...).
    method: String,

    /// Request path (for example: admin/databases).
    path: String,

    #[command(flatten)]
    body: BodyInput,
}

#[derive(Debug, Args)]
struct BodyInput {
    /// JSON request body literal.
    #[arg(long, conflicts_with = "body_file")]
    body_json: Option<String>,

    /// Path to a file containing a JSON request body.
    #[arg(long, value_name = "PATH", conflicts_with = "body_json")]
    body_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut client = Client::new(&cli.base_url)
        .with_context(|| format!("failed to create client with base URL '{}'", cli.base_url))?;

    if let Some(token) = &cli.token {
        client = client.with_bearer_token(token.clone());
    } else if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        client = client.with_basic_auth(username.clone(), password.clone());
    }

    let output = match &cli.command {
        Command::Databases => {
            let databases = client
                .list_databases()
                .await
                .context("failed to list databases")?;
            serde_json::to_value(databases).context("failed to render database list")?
        }
        Command::Query(args) => run_query(&client, args)
            .await
            .with_context(|| format!("query against '{}' failed", args.database))?,
        Command::Status { databases } => {
            let options = ServerStatusOptions {
                databases: databases.then_some(true),
            };
            let status = client
                .server_status(Some(&options))
                .await
                .context("failed to fetch server status")?;
            serde_json::to_value(status).context("failed to render server status")?
        }
        Command::Request(args) => send_request(&client, args)
            .await
            .with_context(|| format!("request failed: {} {}", args.method, args.path))?,
    };

    print_json(&output, cli.compact).context("failed to print JSON output")?;
    Ok(())
}

/// Runs a SELECT query and returns the SPARQL results JSON.
async fn run_query(client: &Client, args: &QueryArgs) -> Result<Value> {
    let options = QueryOptions {
        reasoning: args.reasoning.then_some(true),
        ..QueryOptions::default()
    };
    let body = client
        .query(
            &args.database,
            &args.query,
            MediaType::SparqlResultsJson,
            Some(&options),
        )
        .await?;
    serde_json::from_slice(&body).context("server returned non-JSON query results")
}

/// Sends a raw HTTP request, bypassing the typed methods.
async fn send_request(client: &Client, args: &RequestArgs) -> Result<Value> {
    // Validate method eagerly so CLI errors are explicit before any network call.
    let method = Method::from_str(&args.method)
        .with_context(|| format!("invalid HTTP method '{}'", args.method))?;
    let body = parse_body(&args.body).context("failed to parse request body input")?;

    let value = client
        .request_value(method, &args.path, body)
        .await
        .with_context(|| format!("HTTP request failed for path '{}'", args.path))?;
    Ok(value)
}

/// Parses an optional JSON body from inline text or a file path.
///
/// Exactly one of `--body-json` or `--body-file` may be set.
fn parse_body(body: &BodyInput) -> Result<Option<Value>> {
    match (&body.body_json, &body.body_file) {
        (Some(raw), None) => serde_json::from_str(raw)
            .context("failed to parse JSON from --body-json")
            .map(Some),
        (None, Some(path)) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read --body-file '{}'", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| {
                    format!("failed to parse JSON in --body-file '{}'", path.display())
                })
                .map(Some)
        }
        (None, None) => Ok(None),
        (Some(_), Some(_)) => bail!("use only one of --body-json or --body-file"),
    }
}

/// Prints a JSON value either compact or pretty-formatted.
fn print_json(value: &Value, compact: bool) -> Result<()> {
    if compact {
        println!(
            "{}",
            serde_json::to_string(value).context("failed to render JSON")?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("failed to render JSON")?
        );
    }
    Ok(())
}
