//! Tracing utilities for query and session observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the calling crate's `tracing` feature is disabled,
//! avoiding `#[cfg]` boilerplate at every call site. Calling crates must
//! forward their `tracing` feature to `querycraft-core/tracing`.

/// Emit a debug-level event with the SQL text and parameter count.
///
/// ```ignore
/// querycraft_trace_query!(&sql_str, params.len());
/// ```
#[macro_export]
macro_rules! querycraft_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        $crate::__private::tracing::debug!(
            sql = %$sql,
            params = $param_count,
            "querycraft.query"
        );
    };
}

/// Emit a debug-level event for session lifecycle (persist, clear, lazy load).
///
/// ```ignore
/// querycraft_trace_session!("persist", "member", id);
/// ```
#[macro_export]
macro_rules! querycraft_trace_session {
    ($event:literal, $entity:expr) => {
        #[cfg(feature = "tracing")]
        $crate::__private::tracing::debug!(
            event = $event,
            entity = $entity,
            "querycraft.session"
        );
    };
    ($event:literal, $entity:expr, $id:expr) => {
        #[cfg(feature = "tracing")]
        $crate::__private::tracing::debug!(
            event = $event,
            entity = $entity,
            id = $id,
            "querycraft.session"
        );
    };
}
