use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;
use xml_equal_core::{parse_file, write, write_file, write_pretty};

/// Parse `input` and return it re-serialized.
pub fn normalize(input: &Path, pretty: bool) -> Result<Vec<u8>> {
    let node =
        parse_file(input).with_context(|| format!("failed to parse {}", input.display()))?;
    let bytes = if pretty { write_pretty(&node)? } else { write(&node)? };
    Ok(bytes)
}

/// Parse `input` and write it re-serialized to `output`.
///
/// The input is parsed before anything is written, and `output` may not name
/// the input file.
pub fn normalize_into(input: &Path, output: &Path, pretty: bool) -> Result<()> {
    let node =
        parse_file(input).with_context(|| format!("failed to parse {}", input.display()))?;

    if is_same_file(input, output)? {
        bail!(
            "refusing to overwrite source file {} with normalized output",
            input.display()
        );
    }

    debug!(input = %input.display(), output = %output.display(), pretty, "writing normalized XML");
    write_file(&node, output, pretty)
        .with_context(|| format!("failed to write output XML {}", output.display()))
}

fn is_same_file(input: &Path, output: &Path) -> Result<bool> {
    // An output that does not exist yet cannot be the parsed input.
    if !output.exists() {
        return Ok(false);
    }
    let input = input
        .canonicalize()
        .with_context(|| format!("canonicalize {}", input.display()))?;
    let output = output
        .canonicalize()
        .with_context(|| format!("canonicalize {}", output.display()))?;
    Ok(input == output)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{is_same_file, normalize, normalize_into};

    #[test]
    fn detects_the_same_file_through_another_spelling() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("doc.xml");
        fs::write(&input, "<a/>").expect("write input");

        let spelled = dir.path().join(".").join("doc.xml");
        assert!(is_same_file(&input, &spelled).expect("canonicalize"));
        assert!(!is_same_file(&input, &dir.path().join("out.xml")).expect("missing output"));
    }

    #[test]
    fn malformed_input_leaves_output_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("bad.xml");
        let output = dir.path().join("out.xml");
        fs::write(&input, "<a>").expect("write input");
        fs::write(&output, "previous").expect("write output");

        let err = normalize_into(&input, &output, true).expect_err("malformed input");
        assert!(err.to_string().contains("failed to parse"));
        assert_eq!(fs::read_to_string(&output).expect("read output"), "previous");
    }

    #[test]
    fn compact_output_has_no_added_whitespace() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("doc.xml");
        fs::write(&input, "<r>\n  <a k='1'>v</a>\n</r>").expect("write input");

        let bytes = normalize(&input, false).expect("normalize");
        assert_eq!(
            String::from_utf8(bytes).expect("utf-8"),
            "<r>\n  <a k=\"1\">v</a>\n</r>"
        );
    }
}
