//! Structured logging macros.
//!
//! Every component logs with the same field names so log pipelines can
//! filter on them:
//! - `component`: emitting component (router, consent, operators, registry, asset)
//! - `entry_id` / `uuid`: registry entry identity
//! - `module`: facet address
//! - Additional context fields

/// Log an event with a component tag.
///
/// ```rust,ignore
/// log_event!(info, "operators", "Operator added", operator = %operator);
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a registry-entry event with standard identity fields.
#[macro_export]
macro_rules! log_entry_event {
    ($level:ident, $component:expr, $msg:expr, $entry_id:expr, $uuid:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            entry_id = $entry_id,
            uuid = %$uuid,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a module (facet) event with the module address.
#[macro_export]
macro_rules! log_module_event {
    ($level:ident, $component:expr, $msg:expr, $module:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            module = %$module,
            $($($field)*,)?
            $msg
        )
    };
}
