//! HTML templates.
//!
//! Templates are embedded in the binary and registered once. Every
//! page template wraps its content in the `layout` partial, which
//! renders the navigation bar and pending flash messages.

use anyhow::anyhow;
use handlebars::Handlebars;
use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::{ServerError, ServerResult};

const TEMPLATES: &[(&str, &str)] = &[
    ("homepage", include_str!("templates/homepage.hbs")),
    ("map", include_str!("templates/map.hbs")),
    ("search", include_str!("templates/search.hbs")),
    ("country", include_str!("templates/country.hbs")),
    (
        "country_placeholder",
        include_str!("templates/country_placeholder.hbs"),
    ),
    ("login", include_str!("templates/login.hbs")),
    ("register", include_str!("templates/register.hbs")),
    ("admin", include_str!("templates/admin.hbs")),
    ("error", include_str!("templates/error.hbs")),
];

const LAYOUT: &str = include_str!("templates/layout.hbs");

lazy_static! {
    static ref REGISTRY: Result<Handlebars<'static>, String> = build_registry();
}

fn build_registry() -> Result<Handlebars<'static>, String> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(false);

    registry
        .register_partial("layout", LAYOUT)
        .map_err(|e| format!("layout: {}", e))?;

    for (name, source) in TEMPLATES {
        registry
            .register_template_string(name, source)
            .map_err(|e| format!("{}: {}", name, e))?;
    }

    Ok(registry)
}

/// Renders a registered template.
pub fn render<T: Serialize>(name: &str, data: &T) -> ServerResult<String> {
    let registry = REGISTRY
        .as_ref()
        .map_err(|e| ServerError::TemplateError(anyhow!("Bad template {}", e)))?;

    registry
        .render(name, data)
        .map_err(ServerError::template_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_templates_compile() {
        if let Err(e) = &*REGISTRY {
            panic!("{}", e);
        }
    }

    #[test]
    fn test_render_escapes() {
        let page = render(
            "error",
            &json!({
                "code": 400,
                "error": "RequestError",
                "message": "<script>alert(1)</script>",
            }),
        )
        .unwrap();

        assert!(page.contains("400"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert"));
    }

    #[test]
    fn test_layout_flashes() {
        let page = render(
            "homepage",
            &json!({
                "flashes": [
                    { "level": "success", "message": "Logged in successfully." }
                ],
                "current_user": { "username": "alice", "is_admin": false },
            }),
        )
        .unwrap();

        assert!(page.contains("Logged in successfully."));
        assert!(page.contains("flash-success"));
        assert!(page.contains("/logout"));
        assert!(!page.contains("href=\"/admin\""));
    }
}
