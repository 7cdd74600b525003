//! Asset rendering — load, template, and classify empty output.

use manifold_core::AssetSource;
use serde::Serialize;

use crate::engine::TemplateEngine;
use crate::error::RenderError;

/// Render the named asset against `values`, with the shared header parsed
/// into the same template namespace.
///
/// `header_file` is loaded only when non-empty; the named asset is loaded
/// unconditionally. Either load failure is fatal for this file.
///
/// Output consisting of nothing but comments and blank lines fails with the
/// soft [`RenderError::EmptyAsset`] signal instead of returning
/// whitespace-only bytes; callers skip such files and continue their batch.
///
/// Comment stripping for the emptiness check truncates each line at its
/// first `#` wherever it appears, so a `#` inside a quoted string value also
/// strips the rest of that line. Deliberate: this matches the behavior
/// deployed templates were written against, and only affects the emptiness
/// classification, never the returned bytes.
pub fn render_asset<V: Serialize>(
    name: &str,
    header_file: &str,
    source: &dyn AssetSource,
    values: &V,
) -> Result<Vec<u8>, RenderError> {
    let header = if header_file.is_empty() {
        String::new()
    } else {
        load_utf8(source, header_file)?
    };
    let body = load_utf8(source, name)?;

    let rendered = TemplateEngine::new()
        .compile(name, &body, &header)?
        .render(values)?;

    if is_blank_after_comments(&rendered) {
        return Err(RenderError::EmptyAsset {
            name: name.to_owned(),
        });
    }
    Ok(rendered.into_bytes())
}

fn load_utf8(source: &dyn AssetSource, name: &str) -> Result<String, RenderError> {
    let bytes = source.asset(name)?;
    String::from_utf8(bytes).map_err(|_| RenderError::InvalidUtf8 {
        name: name.to_owned(),
    })
}

/// True when `body` contains nothing once comments and blank lines are gone:
/// truncate every line at its first `#`, drop one trailing newline, trim
/// surrounding whitespace.
fn is_blank_after_comments(body: &str) -> bool {
    let stripped = body
        .split('\n')
        .map(|line| line.split('#').next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");
    let stripped = stripped.strip_suffix('\n').unwrap_or(&stripped);
    stripped.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_comment_only() {
        assert!(is_blank_after_comments("# just a comment\n\n"));
        assert!(is_blank_after_comments("# a\n# b\n"));
        assert!(is_blank_after_comments(""));
        assert!(is_blank_after_comments("\n\n  \n"));
    }

    #[test]
    fn blank_detection_keeps_real_content() {
        assert!(!is_blank_after_comments("kind: ConfigMap\n"));
        assert!(!is_blank_after_comments("# header\nkind: ConfigMap\n"));
    }

    #[test]
    fn mid_line_hash_strips_rest_of_line() {
        // Everything from the first # is dropped, even inside quoted text,
        // so a line whose only non-space text follows a # counts as blank.
        assert!(is_blank_after_comments("  #\"quoted\"\n"));
        // Content before the # survives.
        assert!(!is_blank_after_comments("kind: X # trailing\n"));
    }
}
