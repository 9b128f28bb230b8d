//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the logging macros
//! and the tests that assert on captured events.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Plan identifiers
pub const FIELD_SECTION: &str = "section";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_RESOURCE_NAME: &str = "resource_name";

// Collection sizes
pub const FIELD_RECORD_COUNT: &str = "record_count";
pub const FIELD_DIFF_COUNT: &str = "diff_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
