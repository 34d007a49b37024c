//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "lps-backend";

/// Page size used when a list request does not specify one
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a list request may ask for
pub const MAX_PAGE_SIZE: i64 = 100;
