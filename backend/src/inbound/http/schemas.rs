//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and register under the domain
//! type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed entity id or unknown format override.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Unknown entity type, topic, or statistics key.
    #[schema(rename = "not_found")]
    NotFound,
    /// zKillboard could not be reached or answered badly.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "invalid key: memberCount")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ShieldBody`].
///
/// shields.io endpoint badge document.
#[derive(ToSchema)]
#[schema(as = crate::domain::ShieldBody)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ShieldBodySchema {
    /// Always `1`.
    #[schema(rename = "schemaVersion", example = 1)]
    schema_version: u8,
    /// Left-hand badge text.
    #[schema(example = "Members")]
    label: String,
    /// Formatted right-hand badge text.
    #[schema(example = "18.1k")]
    message: String,
    /// Badge cache lifetime hint in seconds.
    #[schema(rename = "cacheSeconds", example = 1800)]
    cache_seconds: u32,
    /// shields.io color name or hex code.
    #[schema(example = "informational")]
    color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            "invalid_request",
            "not_found",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
    }

    #[test]
    fn shield_body_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ShieldBodySchema>();
        assert_eq!(ShieldBodySchema::name(), "crate.domain.ShieldBody");
        assert!(schema_json.contains("schemaVersion"));
        assert!(schema_json.contains("cacheSeconds"));
    }
}
