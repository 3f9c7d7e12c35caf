//! SheetMap API Server binary
//!
//! HTTP REST API for SheetMap.
//! Provides columns, export, import endpoints.

use clap::Parser;
use std::path::PathBuf;
use royalbit_sheetmap::api::{run_api_server, server::DEFAULT_MAX_UPLOAD_BYTES, ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "sheetmap-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "SheetMap API Server - HTTP REST API for record <-> spreadsheet mapping")]
#[command(long_about = r#"
SheetMap API Server - HTTP REST API

Provides RESTful endpoints for SheetMap operations:
  - POST /api/v1/columns  - Resolve the export columns of a schema
  - POST /api/v1/export   - Export records to .xlsx (download)
  - POST /api/v1/import   - Import an uploaded .xls/.xlsx into records

Additional endpoints:
  - GET  /health          - Health check
  - GET  /version         - Server version info
  - GET  /                - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Import schemas are read from --schema-dir only
  - Tracing and structured logging (RUST_LOG)

Example usage:
  sheetmap-server                           # Start on localhost:8080
  sheetmap-server --host 0.0.0.0 --port 3000
  sheetmap-server --schema-dir /etc/sheetmap/schemas

  curl -X POST "http://localhost:8080/api/v1/import?schema_path=people.yaml&file_name=people.xlsx" \
    --data-binary @people.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SHEETMAP_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SHEETMAP_PORT")]
    port: u16,

    /// Largest accepted upload, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "SHEETMAP_MAX_UPLOAD_BYTES")]
    max_upload_bytes: usize,

    /// Directory holding the schema files import may name
    #[arg(long, default_value = ".", env = "SHEETMAP_SCHEMA_DIR")]
    schema_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_bytes,
        schema_dir: args.schema_dir,
    };

    run_api_server(config).await
}
