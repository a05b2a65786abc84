//! Seams between a report plugin and the step executing it.

use crate::error::{ReportError, Result};
use crate::results::{Plan, TestResult};
use clap::{ArgAction, Args};
use colored::Colorize;
use log::{debug, error, info, LevelFilter};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Console color of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
}

impl Color {
    pub fn paint(&self, text: &str) -> String {
        match self {
            Color::Green => text.green().to_string(),
            Color::Yellow => text.yellow().to_string(),
            Color::Red => text.red().to_string(),
        }
    }
}

/// Services a report step offers to its plugin
pub trait StepHost {
    /// Finished results in execution order
    fn results(&self) -> &[TestResult];

    /// Working directory of the execute step, result logs are relative to it
    fn base_dir(&self) -> &Path;

    fn plan(&self) -> &Plan;

    /// Working directory of the report step
    fn workdir(&self) -> Option<&Path>;

    fn is_dry(&self) -> bool;

    /// Store `data` as file `name` in the step working directory
    fn write(&mut self, name: &str, data: &str) -> Result<()>;

    fn info(&mut self, key: &str, value: &str, color: Option<Color>);

    /// Record a step failure without aborting the step
    fn fail(&mut self, message: &str);
}

/// A report backend
pub trait ReportPlugin {
    /// Name the backend is selected by
    fn name(&self) -> &str;

    /// Produce the report
    fn go(&self, host: &mut dyn StepHost) -> Result<()>;

    /// Remove whatever the plugin generated in the step working directory
    fn prune(&self, host: &mut dyn StepHost) -> Result<()> {
        let Some(workdir) = host.workdir() else {
            return Ok(());
        };
        if host.is_dry() || !workdir.exists() {
            return Ok(());
        }

        debug!("Pruning '{}'", workdir.display());
        std::fs::remove_dir_all(workdir).map_err(|err| ReportError::io(workdir, err))
    }
}

/// Options shared by every report backend
#[derive(Debug, Clone, Default, Args)]
pub struct ReportStepOptions {
    /// Run in dry mode. No changes, please.
    #[arg(short = 'n', long)]
    pub dry: bool,

    /// Show more details, use multiple times to raise verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Be quiet, show only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ReportStepOptions {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Step host backed by a directory on disk
#[derive(Debug)]
pub struct WorkdirHost {
    workdir: PathBuf,
    base_dir: PathBuf,
    plan: Plan,
    results: Vec<TestResult>,
    dry: bool,
    color: bool,
    failures: Vec<String>,
}

impl WorkdirHost {
    pub fn new(workdir: PathBuf, base_dir: PathBuf, plan: Plan, results: Vec<TestResult>) -> Self {
        Self {
            workdir,
            base_dir,
            plan,
            results,
            dry: false,
            color: std::io::stderr().is_terminal(),
            failures: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: &ReportStepOptions) -> Self {
        self.dry = options.dry;
        self
    }

    /// Failures recorded so far
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn paint(&self, text: &str, color: Option<Color>) -> String {
        match color {
            Some(color) if self.color => color.paint(text),
            _ => text.to_string(),
        }
    }
}

impl StepHost for WorkdirHost {
    fn results(&self) -> &[TestResult] {
        &self.results
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn plan(&self) -> &Plan {
        &self.plan
    }

    fn workdir(&self) -> Option<&Path> {
        Some(&self.workdir)
    }

    fn is_dry(&self) -> bool {
        self.dry
    }

    fn write(&mut self, name: &str, data: &str) -> Result<()> {
        let path = self.workdir.join(name);
        if self.dry {
            debug!("Dry mode, not writing '{}'", path.display());
            return Ok(());
        }

        std::fs::create_dir_all(&self.workdir).map_err(|err| ReportError::io(&self.workdir, err))?;
        std::fs::write(&path, data).map_err(|err| ReportError::io(&path, err))?;
        debug!("Written {} bytes to '{}'", data.len(), path.display());
        Ok(())
    }

    // Quiet mode lowers the log level, which hides info reports
    fn info(&mut self, key: &str, value: &str, color: Option<Color>) {
        info!("{}: {}", key, self.paint(value, color));
    }

    fn fail(&mut self, message: &str) {
        error!("{}", self.paint(message, Some(Color::Red)));
        self.failures.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResultOutcome;
    use log::{Level, Log, Metadata, Record};
    use std::sync::{Mutex, Once};

    /// Logger keeping every record for inspection
    struct CapturingLogger {
        records: Mutex<Vec<(Level, String)>>,
    }

    impl Log for CapturingLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        records: Mutex::new(Vec::new()),
    };
    static INIT: Once = Once::new();

    fn captured_logs() -> &'static CapturingLogger {
        INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
        &LOGGER
    }

    struct Noop;

    impl ReportPlugin for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn go(&self, _host: &mut dyn StepHost) -> Result<()> {
            Ok(())
        }
    }

    fn host(workdir: &Path) -> WorkdirHost {
        WorkdirHost::new(
            workdir.to_path_buf(),
            PathBuf::from("/run/plan/execute"),
            Plan::new("/plan"),
            vec![TestResult::new("/test", ResultOutcome::Pass)],
        )
    }

    #[test]
    fn test_write_creates_workdir() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = dir.path().join("report").join("html");
        let mut host = host(&workdir);

        host.write("index.html", "<html></html>").unwrap();

        assert_eq!(
            std::fs::read_to_string(workdir.join("index.html")).unwrap(),
            "<html></html>"
        );
    }

    #[test]
    fn test_write_in_dry_mode() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = dir.path().join("html");
        let options = ReportStepOptions {
            dry: true,
            ..Default::default()
        };
        let mut host = host(&workdir).with_options(&options);

        host.write("index.html", "<html></html>").unwrap();

        assert!(!workdir.exists());
    }

    #[test]
    fn test_default_prune_removes_workdir() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = dir.path().join("html");
        let mut host = host(&workdir);
        host.write("index.html", "<html></html>").unwrap();

        Noop.prune(&mut host).unwrap();

        assert!(!workdir.exists());
    }

    #[test]
    fn test_failures_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());

        host.fail("Something broke.");

        assert_eq!(host.failures(), ["Something broke.".to_string()]);
    }

    #[test]
    fn test_reports_go_to_the_log() {
        let logger = captured_logs();
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());
        host.color = false;

        host.info("output", "/tmp/report-sink/index.html", Some(Color::Yellow));
        host.fail("Failed to open the report-sink browser.");

        let records = logger.records.lock().unwrap();
        assert!(records
            .iter()
            .any(|(level, text)| *level == Level::Info
                && text == "output: /tmp/report-sink/index.html"));
        assert!(records
            .iter()
            .any(|(level, text)| *level == Level::Error
                && text == "Failed to open the report-sink browser."));
    }

    #[test]
    fn test_log_level() {
        let mut options = ReportStepOptions::default();
        assert_eq!(options.log_level(), LevelFilter::Info);

        options.verbose = 2;
        assert_eq!(options.log_level(), LevelFilter::Trace);

        options.verbose = 0;
        options.quiet = true;
        assert_eq!(options.log_level(), LevelFilter::Warn);
    }
}
