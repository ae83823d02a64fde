use crate::compare::trace::TraceEvent;

/// Format trace events as JSON.
pub fn format_json(events: &[TraceEvent]) -> String {
    serde_json::to_string_pretty(events).unwrap_or_else(|_| "[]".to_string())
}
