// Server-side HTML templates compiled into the binary
use minijinja::Environment;
use serde::Serialize;
use std::sync::Arc;

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("dashboard_detail.html", include_str!("../../templates/dashboard_detail.html")),
    ("about.html", include_str!("../../templates/about.html")),
    ("admin_add.html", include_str!("../../templates/admin_add.html")),
];

#[derive(Clone)]
pub struct Templates {
    env: Arc<Environment<'static>>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_filter("path_segment", path_segment);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

/// Percent-encode a value for use as a single URL path segment.
fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
