use crate::error::Result;
use crate::paths::PathMode;
use crate::results::{Plan, TestResult};
use std::path::Path;

#[cfg(feature = "html")]
pub mod html;

/// Hint shown when the html report is requested from a build without it
pub const MISSING_TEMPLATE_ENGINE: &str =
    "Missing template engine 'tera', fixable by building with '--features html'.";

/// Trait for rendering test results in different formats
pub trait Renderer {
    /// Render the results and return the output as a string
    fn render(
        &self,
        results: &[TestResult],
        base_dir: &Path,
        plan: &Plan,
        mode: &PathMode,
    ) -> Result<String>;

    /// Name of the file the output is stored in
    fn file_name(&self) -> &str;
}

/// Create the html renderer, failing early when the template engine is not built in
pub fn html_renderer() -> Result<Box<dyn Renderer>> {
    #[cfg(feature = "html")]
    {
        Ok(Box::new(html::HtmlRenderer::new()?))
    }

    #[cfg(not(feature = "html"))]
    {
        Err(crate::error::ReportError::MissingDependency(
            MISSING_TEMPLATE_ENGINE.to_string(),
        ))
    }
}
