//! Manifest-oriented helper filters and functions registered on every
//! template environment, alongside the general-purpose minijinja-contrib set.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use minijinja::{Environment, Error, ErrorKind, Value};
use sha2::{Digest, Sha256};

/// Register the manifest helper set on `env`.
pub(crate) fn register(env: &mut Environment<'static>) {
    env.add_filter("to_yaml", to_yaml);
    env.add_filter("from_yaml", from_yaml);
    env.add_filter("to_json", to_json);
    env.add_filter("b64enc", b64enc);
    env.add_filter("b64dec", b64dec);
    env.add_filter("sha256sum", sha256sum);
    env.add_filter("quote", quote);
    env.add_filter("nindent", nindent);
    env.add_function("now", now);
}

fn invalid(detail: String) -> Error {
    Error::new(ErrorKind::InvalidOperation, detail)
}

/// Serialize a value as a YAML fragment (no trailing newline).
fn to_yaml(value: Value) -> Result<String, Error> {
    let yaml = serde_yaml::to_string(&value)
        .map_err(|e| invalid(format!("cannot serialize value to YAML: {e}")))?;
    Ok(yaml.trim_end_matches('\n').to_owned())
}

/// Parse a YAML string into a template value.
fn from_yaml(source: &str) -> Result<Value, Error> {
    let parsed: serde_json::Value =
        serde_yaml::from_str(source).map_err(|e| invalid(format!("invalid YAML: {e}")))?;
    Ok(Value::from_serialize(&parsed))
}

/// Serialize a value as compact JSON.
fn to_json(value: Value) -> Result<String, Error> {
    serde_json::to_string(&value).map_err(|e| invalid(format!("cannot serialize value to JSON: {e}")))
}

fn b64enc(source: &str) -> String {
    BASE64.encode(source.as_bytes())
}

fn b64dec(source: &str) -> Result<String, Error> {
    let bytes = BASE64
        .decode(source.as_bytes())
        .map_err(|e| invalid(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| invalid(format!("decoded base64 is not UTF-8: {e}")))
}

fn sha256sum(source: &str) -> String {
    hex::encode(Sha256::digest(source.as_bytes()))
}

/// Wrap a string in double quotes, escaping embedded quotes and backslashes.
fn quote(source: &str) -> String {
    format!("\"{}\"", source.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Indent every line by `width` spaces, preceded by a newline — the usual way
/// to splice a block under a YAML key.
fn nindent(source: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    let indented = source
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_owned()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n{indented}")
}

/// Current UTC time, RFC 3339. Using this inside a template trades away
/// deterministic rendering for that template.
fn now() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn b64_roundtrip() {
        let encoded = b64enc("secret-value");
        assert_eq!(b64dec(&encoded).expect("decode"), "secret-value");
    }

    #[test]
    fn b64dec_rejects_garbage() {
        assert!(b64dec("!!not base64!!").is_err());
    }

    #[test]
    fn sha256sum_is_stable_hex() {
        let digest = sha256sum("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn quote_escapes_embedded_quotes() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"back\slash"), r#""back\\slash""#);
    }

    #[test]
    fn nindent_prefixes_newline_and_indents() {
        assert_eq!(nindent("a: 1\nb: 2", 2), "\n  a: 1\n  b: 2");
    }

    #[test]
    fn to_yaml_has_no_trailing_newline() {
        let value = Value::from_serialize(&serde_json::json!({"a": 1}));
        assert_eq!(to_yaml(value).expect("yaml"), "a: 1");
    }

    #[test]
    fn from_yaml_parses_mappings() {
        let value = from_yaml("a: 1\nb: two\n").expect("parse");
        assert_eq!(value.get_attr("b").expect("attr").as_str(), Some("two"));
    }
}
