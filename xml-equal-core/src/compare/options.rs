use serde::Deserialize;

/// Configures comparison behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Drop whitespace-only text children and trim text before comparing it.
    pub ignore_whitespace: bool,
    /// Record every comparison step and emit it as `tracing` debug events.
    pub trace: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: true,
            trace: false,
        }
    }
}

impl CompareOptions {
    /// Options that treat every whitespace character as content.
    pub fn strict() -> Self {
        Self {
            ignore_whitespace: false,
            ..Self::default()
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::CompareOptions;

    #[test]
    fn defaults_ignore_whitespace_without_trace() {
        let opts = CompareOptions::default();
        assert!(opts.ignore_whitespace);
        assert!(!opts.trace);
        assert!(!CompareOptions::strict().ignore_whitespace);
    }

    #[test]
    fn deserializes_partial_tables() {
        let opts: CompareOptions = serde_json::from_str(r#"{"trace": true}"#).expect("valid");
        assert!(opts.ignore_whitespace);
        assert!(opts.trace);
    }
}
