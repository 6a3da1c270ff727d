//! Index-page rendering.

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

/// HTML skeleton of a gallery index page.
const INDEX_TEMPLATE: &str = "<!DOCTYPE html>\n\
<html>\n\
<body>\n\
<h1>Examples built from <a href=\"{{source_url}}\">{{label}}</a></h1>\n\
{{#each links}}<br><a href=\"{{this.href}}\">{{this.name}}</a>\n\
{{/each}}</body>\n\
</html>\n";

/// One anchor on the index page.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleLink {
    /// Anchor text: the example's output directory name.
    pub name: String,
    /// Anchor target: `<output_dir>/index.html`.
    pub href: String,
}

impl ExampleLink {
    /// Builds the link for an example's output directory.
    #[must_use]
    pub fn for_output_dir(output_dir: &str) -> Self {
        Self {
            name: output_dir.to_string(),
            href: format!("{output_dir}/index.html"),
        }
    }
}

/// Renders gallery index pages.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Creates a renderer with strict variable resolution.
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Missing variables are template bugs, fail loudly.
        handlebars.set_strict_mode(true);
        Self { handlebars }
    }

    /// Renders the index page for a deployment.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_index(
        &self,
        source_url: &str,
        label: &str,
        links: &[ExampleLink],
    ) -> Result<String, handlebars::RenderError> {
        let data = json!({
            "source_url": source_url,
            "label": label,
            "links": links,
        });
        self.handlebars.render_template(INDEX_TEMPLATE, &data)
    }
}
