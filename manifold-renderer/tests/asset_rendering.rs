use std::fs;

use manifold_core::{AssetError, DirAssetSource, MemoryAssetSource};
use manifold_renderer::{is_empty_asset, message_is_empty_asset, render_asset, RenderError};
use serde_json::json;
use tempfile::TempDir;

fn memory_source() -> MemoryAssetSource {
    [
        (
            "header.txt",
            concat!(
                "{% macro labels(app) %}app: {{ app }}\n",
                "managed-by: manifold{% endmacro %}",
            ),
        ),
        (
            "deployment.yaml",
            concat!(
                "apiVersion: apps/v1\n",
                "kind: Deployment\n",
                "metadata:\n",
                "  name: {{ name }}\n",
                "  namespace: {{ namespace }}\n",
                "spec:\n",
                "  replicas: {{ replicas }}\n",
            ),
        ),
        (
            "optional.yaml",
            concat!(
                "{% if enabled %}\n",
                "kind: ConfigMap\n",
                "metadata:\n",
                "  name: optional\n",
                "{% else %}\n",
                "# nothing to install\n",
                "{% endif %}\n",
            ),
        ),
        ("labels.yaml", "{{ labels(app) }}\n"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn renders_values_into_manifest_bytes() {
    let source = memory_source();
    let values = json!({"name": "web", "namespace": "prod", "replicas": 2});
    let bytes = render_asset("deployment.yaml", "", &source, &values).expect("render");
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.contains("name: web"));
    assert!(text.contains("namespace: prod"));
    assert!(text.contains("replicas: 2"));
}

#[test]
fn rendering_same_inputs_is_byte_identical() {
    let source = memory_source();
    let values = json!({"name": "web", "namespace": "prod", "replicas": 2});
    let first = render_asset("deployment.yaml", "", &source, &values).expect("first");
    let second = render_asset("deployment.yaml", "", &source, &values).expect("second");
    assert_eq!(first, second);
}

#[test]
fn missing_value_key_renders_as_empty() {
    let source = memory_source();
    // namespace and replicas are absent from the values object.
    let bytes =
        render_asset("deployment.yaml", "", &source, &json!({"name": "web"})).expect("render");
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.contains("namespace: \n") || text.contains("namespace:\n"));
}

#[test]
fn header_definitions_are_usable_from_files() {
    let source = memory_source();
    let bytes = render_asset("labels.yaml", "header.txt", &source, &json!({"app": "web"}))
        .expect("render");
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.contains("app: web"));
    assert!(text.contains("managed-by: manifold"));
}

#[test]
fn header_is_not_loaded_when_name_is_empty() {
    // header.txt is deliberately absent from this source; an empty header
    // name must not try to load it.
    let source: MemoryAssetSource = [("cm.yaml", "kind: ConfigMap\n")].into_iter().collect();
    render_asset("cm.yaml", "", &source, &json!({})).expect("render without header");
}

#[test]
fn missing_header_is_a_load_failure() {
    let source: MemoryAssetSource = [("cm.yaml", "kind: ConfigMap\n")].into_iter().collect();
    let err = render_asset("cm.yaml", "absent-header.txt", &source, &json!({}))
        .expect_err("missing header must fail");
    assert!(matches!(
        err,
        RenderError::Asset(AssetError::NotFound { ref name }) if name == "absent-header.txt"
    ));
}

#[test]
fn missing_asset_is_a_load_failure() {
    let source = memory_source();
    let err = render_asset("absent.yaml", "", &source, &json!({})).expect_err("must fail");
    assert!(matches!(err, RenderError::Asset(AssetError::NotFound { .. })));
    assert!(!is_empty_asset(&err));
}

#[test]
fn disabled_optional_resource_is_empty_asset() {
    let source = memory_source();
    let err = render_asset("optional.yaml", "", &source, &json!({"enabled": false}))
        .expect_err("comment-only output must be EmptyAsset");
    assert!(is_empty_asset(&err));
    assert!(message_is_empty_asset(&err.to_string()));
    assert!(err.to_string().contains("optional.yaml"));
}

#[test]
fn enabled_optional_resource_renders() {
    let source = memory_source();
    let bytes = render_asset("optional.yaml", "", &source, &json!({"enabled": true}))
        .expect("render");
    assert!(String::from_utf8(bytes).expect("utf8").contains("name: optional"));
}

#[test]
fn comment_only_template_is_empty_for_any_values() {
    let source: MemoryAssetSource =
        [("a.yaml", "# just a comment\n\n")].into_iter().collect();
    for values in [json!({}), json!({"x": 1}), json!({"deep": {"y": true}})] {
        let err = render_asset("a.yaml", "", &source, &values).expect_err("empty");
        assert!(is_empty_asset(&err));
    }
}

#[test]
fn dir_source_renders_from_disk() {
    let root = TempDir::new().expect("root");
    fs::write(
        root.path().join("ns.yaml"),
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: {{ namespace }}\n",
    )
    .expect("write");
    let source = DirAssetSource::new(root.path());
    let bytes =
        render_asset("ns.yaml", "", &source, &json!({"namespace": "edge"})).expect("render");
    assert!(String::from_utf8(bytes).expect("utf8").contains("name: edge"));
}
