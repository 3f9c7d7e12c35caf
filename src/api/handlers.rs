//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::cli::{export_records, import_rows};
use crate::config::SheetConfig;
use crate::error::SheetMapError;
use crate::mapping::{resolve, ColumnLayout, FieldSpec};
use crate::workbook::read_workbook;

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
            error_kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.error_kind = Some(kind.into());
        self
    }
}

/// Library error rendered as an `ApiResponse` envelope.
///
/// Bad data is `422`, server-side I/O is `500`, anything else is `400`.
#[derive(Debug)]
pub struct ApiError(pub SheetMapError);

impl From<SheetMapError> for ApiError {
    fn from(err: SheetMapError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SheetMapError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            e if e.is_data_error() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(kind = self.0.kind(), status = status.as_u16(), "request failed: {}", self.0);
        let body = ApiResponse::<()>::err(self.0.to_string()).with_kind(self.0.kind());
        (status, Json(body)).into_response()
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "SheetMap API Server".to_string(),
        version: state.version.clone(),
        description: "Declarative record <-> spreadsheet mapping over HTTP".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/columns",
                "POST",
                "Resolve the export columns of a schema",
            ),
            EndpointInfo::new("/api/v1/export", "POST", "Export records to an .xlsx download"),
            EndpointInfo::new(
                "/api/v1/import",
                "POST",
                "Import an uploaded .xls/.xlsx into records",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "columns".to_string(),
            "export".to_string(),
            "import".to_string(),
        ],
    }))
}

/// Columns request
#[derive(Deserialize)]
pub struct ColumnsRequest {
    pub schema: SheetConfig,
}

/// Columns response
#[derive(Serialize, Default)]
pub struct ColumnsResponse {
    pub sheet_name: String,
    pub columns: Vec<FieldSpec>,
}

/// POST /api/v1/columns - Resolve export columns
pub async fn columns(
    Json(req): Json<ColumnsRequest>,
) -> Result<Json<ApiResponse<ColumnsResponse>>, ApiError> {
    req.schema.validate()?;
    let schema = req.schema.schema()?;

    Ok(Json(ApiResponse::ok(ColumnsResponse {
        sheet_name: req.schema.sheet_name,
        columns: resolve(&schema),
    })))
}

/// Export request
#[derive(Deserialize)]
pub struct ExportRequest {
    pub schema: SheetConfig,
    pub records: Value,
}

/// POST /api/v1/export - Export records as an .xlsx attachment
pub async fn export(Json(req): Json<ExportRequest>) -> Result<Response, ApiError> {
    req.schema.validate()?;
    let artifact = export_records(&req.schema, &req.records)?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type().to_string()),
        (header::CONTENT_DISPOSITION, artifact.content_disposition()),
    ];
    Ok((StatusCode::OK, headers, artifact.bytes).into_response())
}

/// Import query parameters
#[derive(Deserialize)]
pub struct ImportQuery {
    /// Schema file, relative to the server's schema directory
    pub schema_path: String,
    /// Original upload name; its extension picks the container format
    pub file_name: Option<String>,
    #[serde(default)]
    pub layout: ColumnLayout,
}

/// Import response
#[derive(Serialize, Default)]
pub struct ImportResponse {
    pub schema_path: String,
    pub count: usize,
    pub records: Value,
}

/// POST /api/v1/import - Import an uploaded spreadsheet
pub async fn import(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> Result<Json<ApiResponse<ImportResponse>>, ApiError> {
    let schema_file = schema_file_in(&state.schema_dir, &query.schema_path)?;
    let config = SheetConfig::load(&schema_file)?;
    let rows = read_workbook(&body, query.file_name.as_deref())?;
    let records = import_rows(&config, &rows, query.layout)?;
    let count = records.as_array().map(Vec::len).unwrap_or(0);

    Ok(Json(ApiResponse::ok(ImportResponse {
        schema_path: query.schema_path,
        count,
        records,
    })))
}

/// Join a client-supplied schema path onto `schema_dir`. Only plain relative
/// names are accepted: no root, no drive prefix, no `..`.
fn schema_file_in(schema_dir: &Path, schema_path: &str) -> Result<PathBuf, SheetMapError> {
    let relative = Path::new(schema_path);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if schema_path.is_empty() || !plain {
        warn!(schema_path, "rejected schema path outside the schema directory");
        return Err(SheetMapError::Config(format!(
            "schema_path '{}' must be a relative path inside the schema directory",
            schema_path
        )));
    }
    Ok(schema_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ApiResponse Tests ====================

    #[test]
    fn test_api_response_ok_creates_success_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());

        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        // UUID format (8-4-4-4-12)
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err_with_kind() {
        let response: ApiResponse<String> = ApiResponse::err("bad cell").with_kind("format");

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("bad cell"));
        assert_eq!(response.error_kind.as_deref(), Some("format"));
    }

    #[test]
    fn test_api_response_serializes_without_none_fields() {
        let response: ApiResponse<String> = ApiResponse::ok("data".to_string());
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"error\""));
        assert!(!json.contains("\"error_kind\""));
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"data\""));
    }

    #[test]
    fn test_api_response_request_id_is_unique() {
        let response1: ApiResponse<String> = ApiResponse::ok("a".to_string());
        let response2: ApiResponse<String> = ApiResponse::ok("b".to_string());
        assert_ne!(response1.request_id, response2.request_id);
    }

    // ==================== ApiError Tests ====================

    #[test]
    fn test_api_error_status_for_data_errors() {
        let err = ApiError(SheetMapError::Format {
            row: 2,
            field: "age".to_string(),
            value: "abc".to_string(),
            expected: crate::types::ScalarKind::Int32,
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = ApiError(SheetMapError::UnsupportedType {
            field: "address".to_string(),
            type_name: "Address".to_string(),
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_api_error_status_for_other_errors() {
        let err = ApiError(SheetMapError::Config("missing".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError(SheetMapError::UnsupportedContainerFormat("csv".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError(SheetMapError::Io(std::io::Error::other("disk")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ==================== Request Deserialization Tests ====================

    #[test]
    fn test_columns_request_deserialize() {
        let json = r#"{"schema": {"fields": [{"name": "age", "type": "int32", "title": "Age"}]}}"#;
        let req: ColumnsRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.schema.sheet_name, "Sheet1");
        assert_eq!(req.schema.fields[0].name, "age");
    }

    #[test]
    fn test_export_request_deserialize() {
        let json = r#"{"schema": {"fields": []}, "records": [{"a": 1}]}"#;
        let req: ExportRequest = serde_json::from_str(json).unwrap();

        assert!(req.records.is_array());
    }

    #[test]
    fn test_import_response_default() {
        let response = ImportResponse::default();
        assert_eq!(response.count, 0);
        assert!(response.records.is_null());
    }

    // ==================== Schema Path Tests ====================

    #[test]
    fn test_schema_file_in_joins_relative_names() {
        let dir = Path::new("/srv/schemas");
        assert_eq!(
            schema_file_in(dir, "people.yaml").unwrap(),
            dir.join("people.yaml")
        );
        assert_eq!(
            schema_file_in(dir, "hr/people.yaml").unwrap(),
            dir.join("hr/people.yaml")
        );
    }

    #[test]
    fn test_schema_file_in_rejects_escapes() {
        let dir = Path::new("/srv/schemas");
        for path in ["", "../secret.yaml", "hr/../../secret.yaml", "/etc/passwd"] {
            let err = schema_file_in(dir, path).unwrap_err();
            assert_eq!(err.kind(), "config", "path {:?}", path);
        }
    }
}
