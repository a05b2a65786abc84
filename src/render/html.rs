use crate::error::Result;
use crate::paths::{self, PathMode};
use crate::render::Renderer;
use crate::results::{Plan, TestResult};
use log::debug;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera, Value};

const TEMPLATE_NAME: &str = "template.html";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/template.html.tera");

pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.set_escape_fn(escape_html);
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
        tera.register_filter("basename", basename_filter);
        debug!("Loaded html report template '{}'", TEMPLATE_NAME);

        Ok(Self { tera })
    }
}

/// HTML escaping that leaves `/` alone so paths stay readable in the source
fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}

fn basename_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let path = tera::try_get_value!("basename", "value", String, value);
    Ok(Value::String(paths::basename(&path).to_string()))
}

/// Build the `linkable_path` filter for the given mode
fn linkable_path_filter(
    mode: PathMode,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync {
    move |value: &Value, _: &HashMap<String, Value>| {
        let path = tera::try_get_value!("linkable_path", "value", String, value);
        let linkable = mode.linkable(Path::new(&path));
        Ok(Value::String(linkable.to_string_lossy().into_owned()))
    }
}

impl Renderer for HtmlRenderer {
    fn render(
        &self,
        results: &[TestResult],
        base_dir: &Path,
        plan: &Plan,
        mode: &PathMode,
    ) -> Result<String> {
        // Links depend on the run, so each render gets its own filter set
        let mut tera = self.tera.clone();
        tera.register_filter("linkable_path", linkable_path_filter(mode.clone()));
        debug!("Rendering {} result(s) with path mode {:?}", results.len(), mode);

        let mut context = Context::new();
        context.insert("results", results);
        context.insert("base_dir", base_dir);
        context.insert("plan", plan);

        let html = tera.render(TEMPLATE_NAME, &context)?;
        Ok(html)
    }

    fn file_name(&self) -> &str {
        "index.html"
    }
}
