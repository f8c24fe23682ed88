use serde_json::{Value, json};
use service_scaffold::answers::AnswerSet;
use service_scaffold::core::ScaffoldError;
use service_scaffold::normalize::{dependencies, normalize_answers};
use service_scaffold::templating::{
    EmbeddedTemplates, LayeredTemplates, RenderOptions, TemplateRenderer, TemplateStore,
};
use service_scaffold::test_utils::sample_answers;
use tempfile::TempDir;

fn sample_config() -> Value {
    let answers = AnswerSet::from_value(sample_answers()).unwrap();
    normalize_answers(&answers, &dependencies::default_registry(), &dependencies::default_baseline())
        .unwrap()
        .config
        .to_json()
}

#[test]
fn test_every_builtin_template_renders() {
    let renderer = TemplateRenderer::new(EmbeddedTemplates);
    let config = sample_config();
    let data = json!({
        "package": {"name": "svc", "dependencies": {}},
        "config": config,
        "license": "text",
        "apps": ["public"],
        "app": "public",
    });

    for name in EmbeddedTemplates.names() {
        let data = if name == "config" { config.clone() } else { data.clone() };
        let result = renderer.render(&name, &data, RenderOptions::plain());
        assert!(result.is_ok(), "template {name} failed: {result:?}");
    }
}

#[test]
fn test_config_template_embeds_directives_verbatim() {
    let renderer = TemplateRenderer::new(EmbeddedTemplates);
    let text = renderer.render("config", &sample_config(), RenderOptions::relaxed()).unwrap();

    assert!(text.starts_with("{\n    bodyParser: {"));
    assert!(text.contains("    listen: {\n        public: {\n            port: 3000,"));
    assert!(text.contains("$join: [\n"));
    assert!(text.contains("'http://127.0.0.1:',"));
    assert!(text.contains("$ref: '#/listen/public/port',"));
    assert!(text.contains("    sequelize: {\n        cache: false,"));
    assert!(text.trim_end().ends_with('}'));
}

#[test]
fn test_package_template_is_plain_json() {
    let renderer = TemplateRenderer::new(EmbeddedTemplates);
    let package = json!({"name": "svc", "files": ["lib"], "private": true});
    let text = renderer.render("package", &json!({"package": package}), RenderOptions::plain()).unwrap();

    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, package);
    assert!(text.contains("\n    \"files\": [\n        \"lib\"\n    ],"));
}

#[test]
fn test_directory_override_takes_precedence() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("router.tera"), "custom router for {{ _app }}\n").unwrap();

    let renderer = TemplateRenderer::new(LayeredTemplates::standard(Some(temp.path().to_path_buf())));
    let text = renderer.render("router", &json!({"app": "api"}), RenderOptions::plain()).unwrap();
    assert_eq!(text, "custom router for api\n");

    let route = renderer.render_empty("route").unwrap();
    assert_eq!(route, EmbeddedTemplates.lookup("route").unwrap());
}

#[test]
fn test_unknown_template_suggests_names() {
    let renderer = TemplateRenderer::new(LayeredTemplates::standard(None));
    match renderer.render("routr", &json!({}), RenderOptions::plain()).unwrap_err() {
        ScaffoldError::TemplateNotFound {
            suggestions,
            ..
        } => {
            assert!(suggestions.contains(&"route".to_string()));
            assert!(suggestions.contains(&"router".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
