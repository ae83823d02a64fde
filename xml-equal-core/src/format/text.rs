use crate::compare::engine::Comparison;
use crate::compare::trace::TraceEvent;

/// Format one trace event as a single line.
pub fn format_event(event: &TraceEvent) -> String {
    match event {
        TraceEvent::Elements { path, left, right } => format!("= {path}: {left} VS {right}"),
        TraceEvent::TagMismatch { path, left, right } => {
            format!("! {path}: tag {left} != {right}")
        }
        TraceEvent::AttributeMismatch { path, left, right } => {
            format!("! {path}: attributes {left:?} != {right:?}")
        }
        TraceEvent::ChildCountMismatch { path, left, right } => {
            format!("! {path}: child count {left} != {right}")
        }
        TraceEvent::NodeKindMismatch { path, left, right } => {
            format!("! {path}: node kind {left} != {right}")
        }
        TraceEvent::Text { path, left, right } => format!("= {path}: text {left:?} VS {right:?}"),
        TraceEvent::TextMismatch { path, left, right } => {
            format!("! {path}: text {left:?} != {right:?}")
        }
    }
}

/// Format trace events as plain text.
pub fn format_text(events: &[TraceEvent]) -> String {
    events
        .iter()
        .map(format_event)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the verdict, followed by the first divergence when one was traced.
pub fn format_verdict(comparison: &Comparison) -> String {
    let verdict = if comparison.equal { "equal" } else { "different" };
    match comparison.first_mismatch() {
        Some(event) => format!("{verdict}\n{}", format_event(event)),
        None => verdict.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_text, format_verdict};
    use crate::compare::{xml_compare, CompareOptions};

    #[test]
    fn text_lines_mark_steps_and_divergences() {
        let opts = CompareOptions::default().with_trace(true);
        let comparison = xml_compare("<a k='1'/>", "<a k='2'/>", &opts).expect("parse");

        let text = format_text(&comparison.trace);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "= a: a VS a");
        assert!(lines[1].starts_with("! a: attributes"));
    }

    #[test]
    fn verdict_includes_first_mismatch() {
        let opts = CompareOptions::default().with_trace(true);
        let different = xml_compare("<a>x</a>", "<b>x</b>", &opts).expect("parse");
        assert_eq!(format_verdict(&different), "different\n! a: tag a != b");

        let same = xml_compare("<a>x</a>", "<a>x</a>", &opts).expect("parse");
        assert_eq!(format_verdict(&same), "equal");
    }
}
