use anyhow::Result;
use axum::http::StatusCode;
use folio_core::{
    api::routes::{v1, with_param},
    domain::theme::{InlineRootStyle, PreviewPlan, ThemeName, catalog},
};
use serde_json::Value;

#[path = "support/mod.rs"]
mod support;
use support::build_test_app;

#[tokio::test]
async fn lists_every_builtin_theme_in_order() -> Result<()> {
    let server = build_test_app().server()?;

    let body: Value = server.get(v1::themes::COLLECTION).await.json();
    let themes = body["data"]["themes"].as_array().expect("themes");
    let names: Vec<&str> = themes
        .iter()
        .filter_map(|theme| theme["name"].as_str())
        .collect();
    let expected: Vec<&str> =
        ThemeName::ALL.iter().map(|name| name.as_str()).collect();
    assert_eq!(names, expected);

    for theme in themes {
        assert!(!theme["label"].as_str().unwrap_or_default().is_empty());
        assert!(theme["swatch"]["primary"].is_string());
    }
    Ok(())
}

#[tokio::test]
async fn variables_expose_css_property_names() -> Result<()> {
    let server = build_test_app().server()?;

    let body: Value = server.get(v1::themes::VARIABLES).await.json();
    let variables = body["data"]["variables"].as_array().expect("variables");
    assert_eq!(variables.len(), catalog::catalog().len());

    let background = variables
        .iter()
        .find(|variable| variable["key"] == "background")
        .expect("background variable");
    assert_eq!(background["css_property"], "--background");
    assert_eq!(background["kind"], "color");
    Ok(())
}

#[tokio::test]
async fn preview_plan_repaints_root_style() -> Result<()> {
    let server = build_test_app().server()?;

    let path = with_param(v1::themes::PREVIEW, "name", "sunset-glow");
    let response = server.get(&path).await;
    response.assert_status_ok();
    let body: Value = response.json();
    let plan: PreviewPlan = serde_json::from_value(body["data"].clone())?;
    assert_eq!(plan.theme, ThemeName::SunsetGlow);

    let mut root = InlineRootStyle::new();
    plan.apply(&mut root);
    assert!(root.has_class(&ThemeName::SunsetGlow.marker_class()));
    assert_eq!(root.property_count(), catalog::catalog().len());

    // Going back to default leaves nothing inline.
    let back: Value = server
        .get(&with_param(v1::themes::PREVIEW, "name", "default"))
        .await
        .json();
    let plan: PreviewPlan = serde_json::from_value(back["data"].clone())?;
    plan.apply(&mut root);
    assert_eq!(root.property_count(), 0);
    assert!(root.class_attribute().is_empty());
    Ok(())
}

#[tokio::test]
async fn preview_of_unknown_theme_is_not_found() -> Result<()> {
    let server = build_test_app().server()?;

    let response = server
        .get(&with_param(v1::themes::PREVIEW, "name", "neon"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 404);
    Ok(())
}
