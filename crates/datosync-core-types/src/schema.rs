//! Canonical schema constants for structured logging and events
//!
//! Event names are shared by the `log_op_*` macros and the test capture layer.

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Source sides of a diff
pub const SIDE_SRC: &str = "src";
pub const SIDE_DEST: &str = "dest";
