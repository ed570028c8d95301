//! Page templates, compiled into the binary and registered once at startup.

use models::profile;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("profile_details.html", include_str!("../templates/profile_details.html")),
    ("photo_details.html", include_str!("../templates/photo_details.html")),
    ("notes_index.html", include_str!("../templates/notes_index.html")),
    ("note_details.html", include_str!("../templates/note_details.html")),
    ("notes_profile.html", include_str!("../templates/notes_profile.html")),
    ("todos.html", include_str!("../templates/todos.html")),
];

pub fn build() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

/// Context every page starts from; the layout shows profile links only when
/// a profile exists.
pub fn page_context(active: Option<&profile::Model>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("active_profile", &active);
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_parse() {
        let tera = build().unwrap();
        assert_eq!(tera.get_template_names().count(), TEMPLATES.len());
    }

    #[test]
    fn home_renders_without_profile() {
        let tera = build().unwrap();
        let html = tera.render("home.html", &page_context(None)).unwrap();
        assert!(html.contains("/profile/create/"));
    }

    #[test]
    fn todos_render_in_order() {
        let tera = build().unwrap();
        let mut ctx = page_context(None);
        ctx.insert(
            "todos",
            &serde_json::json!([
                {"id": 1, "title": "walk", "description": "dog", "is_done": false},
                {"id": 2, "title": "feed", "description": "cat", "is_done": true}
            ]),
        );
        let html = tera.render("todos.html", &ctx).unwrap();
        let walk = html.find("walk").unwrap();
        let feed = html.find("feed").unwrap();
        assert!(walk < feed);
    }
}
