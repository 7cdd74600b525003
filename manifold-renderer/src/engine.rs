//! Template engine — minijinja [`Environment`] wiring and compiled templates.
//!
//! One environment is built per compiled asset. Three policies are fixed
//! here and not configurable by callers:
//!
//! - **Missing keys resolve to empty.** Lookups into the values object that
//!   hit an absent key produce an undefined value that renders as nothing,
//!   at any nesting depth ([`UndefinedBehavior::Chainable`]), instead of
//!   failing the render.
//! - **Shared header namespace.** The optional header source is parsed into
//!   the same template as the file body (ahead of it, so its macro and
//!   variable definitions are in scope), letting a batch share one library
//!   of definitions across every file.
//! - **Bundled function library.** The union of the manifest helpers in
//!   [`crate::funcs`] and the general-purpose minijinja-contrib set is
//!   registered on every environment.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::RenderError;
use crate::funcs;

/// Factory for compiled templates with the fixed policy set above.
#[derive(Debug, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compile `file_source`, with `header_source` parsed into the same
    /// namespace, under the template name `name`.
    ///
    /// Parse failures in either source fail the compile.
    pub fn compile(
        &self,
        name: &str,
        file_source: &str,
        header_source: &str,
    ) -> Result<CompiledTemplate, RenderError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        minijinja_contrib::add_to_environment(&mut env);
        funcs::register(&mut env);

        let source = if header_source.is_empty() {
            file_source.to_owned()
        } else {
            format!("{header_source}\n{file_source}")
        };
        env.add_template_owned(name.to_owned(), source)
            .map_err(|source| RenderError::Template {
                name: name.to_owned(),
                source,
            })?;

        Ok(CompiledTemplate {
            env,
            name: name.to_owned(),
        })
    }
}

/// A parsed template bound to its environment, ready to execute.
#[derive(Debug)]
pub struct CompiledTemplate {
    env: Environment<'static>,
    name: String,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the template against `values`.
    ///
    /// Execution failures (undefined function, runtime template error) are
    /// surfaced as [`RenderError::Template`], never swallowed.
    pub fn render<V: Serialize>(&self, values: &V) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|source| RenderError::Template {
                name: self.name.clone(),
                source,
            })?;
        template
            .render(minijinja::Value::from_serialize(values))
            .map_err(|source| RenderError::Template {
                name: self.name.clone(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_one(file: &str, header: &str, values: serde_json::Value) -> Result<String, RenderError> {
        TemplateEngine::new()
            .compile("test.yaml", file, header)?
            .render(&values)
    }

    #[test]
    fn substitutes_known_values() {
        let out = render_one(
            "name: {{ name }}\nreplicas: {{ replicas }}",
            "",
            json!({"name": "web", "replicas": 3}),
        )
        .expect("render");
        assert_eq!(out, "name: web\nreplicas: 3");
    }

    #[test]
    fn missing_key_renders_empty_not_error() {
        let out = render_one("value: '{{ absent }}'", "", json!({})).expect("render");
        assert_eq!(out, "value: ''");
    }

    #[test]
    fn missing_nested_key_renders_empty() {
        let out = render_one(
            "value: '{{ spec.registry.image }}'",
            "",
            json!({"spec": {}}),
        )
        .expect("render");
        assert_eq!(out, "value: ''");
    }

    #[test]
    fn header_macro_is_callable_from_file() {
        let header = "{% macro fullname(base) %}{{ base }}-controller{% endmacro %}";
        let out = render_one("name: {{ fullname(app) }}", header, json!({"app": "web"}))
            .expect("render");
        assert_eq!(out, "\nname: web-controller");
    }

    #[test]
    fn header_variable_is_visible_from_file() {
        let header = "{% set suffix = \"-system\" %}";
        let out = render_one("ns: {{ ns }}{{ suffix }}", header, json!({"ns": "ops"}))
            .expect("render");
        assert_eq!(out, "\nns: ops-system");
    }

    #[test]
    fn parse_failure_in_file_fails_compile() {
        let err = TemplateEngine::new()
            .compile("bad.yaml", "{% if x %}unclosed", "")
            .expect_err("unterminated block must fail");
        assert!(matches!(err, RenderError::Template { ref name, .. } if name == "bad.yaml"));
    }

    #[test]
    fn parse_failure_in_header_fails_compile() {
        assert!(TemplateEngine::new()
            .compile("ok.yaml", "fine", "{% macro broken(")
            .is_err());
    }

    #[test]
    fn undefined_function_is_a_render_error() {
        let err = render_one("{{ no_such_function() }}", "", json!({}))
            .expect_err("unknown function must fail at render time");
        assert!(matches!(err, RenderError::Template { .. }));
    }

    #[test]
    fn helper_filters_are_registered() {
        let out = render_one(
            "secret: {{ password | b64enc }}\nsum: {{ password | sha256sum }}",
            "",
            json!({"password": "hunter2"}),
        )
        .expect("render");
        assert!(out.contains(&format!("secret: {}", {
            use base64::Engine as _;
            base64::engine::general_purpose::STANDARD.encode("hunter2")
        })));
        assert!(out.contains("sum: "));
    }

    #[test]
    fn rendering_is_deterministic() {
        let values = json!({"name": "web", "labels": {"a": "1", "b": "2"}});
        let file = "name: {{ name }}\nlabels: {{ labels | to_json }}";
        let first = render_one(file, "", values.clone()).expect("first");
        let second = render_one(file, "", values).expect("second");
        assert_eq!(first, second);
    }
}
