//! The html report backend.

use crate::browser::{Browser, SystemBrowser};
use crate::error::{ReportError, Result};
use crate::paths::{self, PathMode};
use crate::render::{self, Renderer};
use crate::step::{Color, ReportPlugin, ReportStepOptions, StepHost};
use clap::Args;
use log::debug;

/// Options of the html report
#[derive(Debug, Clone, Default, Args)]
pub struct HtmlReportOptions {
    /// Open results in your preferred web browser.
    #[arg(short = 'o', long)]
    pub open: bool,

    /// Make paths absolute rather than relative to working directory.
    #[arg(long)]
    pub absolute_paths: bool,

    #[command(flatten)]
    pub base: ReportStepOptions,
}

/// Format test results into an html report
///
/// The report is stored as `index.html` in the step working directory and
/// can be opened in the default web browser afterwards.
pub struct HtmlReport {
    options: HtmlReportOptions,
    renderer: Box<dyn Renderer>,
    browser: Box<dyn Browser>,
}

impl HtmlReport {
    /// Fails with [`ReportError::MissingDependency`] when the template engine is not built in
    pub fn new(options: HtmlReportOptions) -> Result<Self> {
        Ok(Self {
            options,
            renderer: render::html_renderer()?,
            browser: Box::new(SystemBrowser),
        })
    }

    pub fn with_browser(mut self, browser: impl Browser + 'static) -> Self {
        self.browser = Box::new(browser);
        self
    }

    pub fn options(&self) -> &HtmlReportOptions {
        &self.options
    }

    fn open_in_browser(&self, url: &str, host: &mut dyn StepHost) -> Result<()> {
        debug!("Opening '{}' in the web browser", url);
        match self.browser.open(url) {
            Ok(true) => {
                host.info(
                    "open",
                    "Successfully opened in the web browser.",
                    Some(Color::Green),
                );
                Ok(())
            }
            Ok(false) => {
                host.fail("Failed to open the web browser.");
                Ok(())
            }
            Err(err) => {
                host.fail(&format!("Failed to open the web browser: {err}"));
                Err(ReportError::Browser(
                    "Unable to open the web browser.".to_string(),
                ))
            }
        }
    }
}

impl ReportPlugin for HtmlReport {
    fn name(&self) -> &str {
        "html"
    }

    fn go(&self, host: &mut dyn StepHost) -> Result<()> {
        let workdir = host
            .workdir()
            .ok_or(ReportError::MissingWorkdir)?
            .to_path_buf();

        // Links in the report are relative to the workdir unless asked otherwise
        let mode = PathMode::new(self.options.absolute_paths, &workdir);
        let html = self
            .renderer
            .render(host.results(), host.base_dir(), host.plan(), &mode)?;

        let filename = self.renderer.file_name();
        // Dry mode requested through the plugin options holds even for a host running for real
        if self.options.base.dry && !host.is_dry() {
            debug!("Dry mode, not writing '{}'", filename);
            return Ok(());
        }
        host.write(filename, &html)?;

        if host.is_dry() {
            return Ok(());
        }

        let target = paths::absolute(&workdir.join(filename));
        host.info("output", &target.display().to_string(), Some(Color::Yellow));

        if !self.options.open {
            return Ok(());
        }

        self.open_in_browser(&format!("file://{}", target.display()), host)
    }

    /// The report is the final deliverable, nothing gets pruned
    fn prune(&self, _host: &mut dyn StepHost) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        report: HtmlReportOptions,
    }

    #[test]
    fn test_html_flags_extend_base_flags() {
        let cli = Cli::try_parse_from(["planreport", "-o", "--absolute-paths", "-n"]).unwrap();

        assert!(cli.report.open);
        assert!(cli.report.absolute_paths);
        assert!(cli.report.base.dry);
    }

    #[test]
    fn test_long_open_flag() {
        let cli = Cli::try_parse_from(["planreport", "--open", "-vv"]).unwrap();

        assert!(cli.report.open);
        assert!(!cli.report.absolute_paths);
        assert_eq!(cli.report.base.verbose, 2);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["planreport"]).unwrap();

        assert!(!cli.report.open);
        assert!(!cli.report.absolute_paths);
        assert!(!cli.report.base.dry);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let err = Cli::try_parse_from(["planreport", "-q", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
