use clap::Parser;
use log::{debug, error};
use planreport::report::{HtmlReport, HtmlReportOptions};
use planreport::results::{self, Plan};
use planreport::step::{ReportPlugin, WorkdirHost};
use std::path::PathBuf;
use std::process::ExitCode;

/// Render test plan results into a static HTML report
#[derive(Parser, Debug)]
#[command(name = "planreport", version, about)]
struct Cli {
    /// Working directory of the report step, the report is written there
    #[arg(long, value_name = "DIR")]
    workdir: PathBuf,

    /// Results file written by the execute step (JSON array)
    #[arg(long, value_name = "FILE")]
    results: PathBuf,

    /// Working directory of the execute step [default: directory of the results file]
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Name of the plan the results belong to
    #[arg(long, default_value = "/default/plan")]
    plan: String,

    /// Short description of the plan
    #[arg(long)]
    summary: Option<String>,

    /// Run the plugin cleanup once the report is done
    #[arg(long)]
    prune: bool,

    #[command(flatten)]
    report: HtmlReportOptions,
}

fn run(cli: Cli) -> planreport::Result<bool> {
    let plugin = HtmlReport::new(cli.report)?;

    let results = results::load_results(&cli.results)?;
    debug!(
        "Loaded {} result(s) from '{}'",
        results.len(),
        cli.results.display()
    );

    let base_dir = cli.base_dir.unwrap_or_else(|| {
        cli.results
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(|parent| parent.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let plan = Plan {
        name: cli.plan,
        summary: cli.summary,
    };

    let mut host = WorkdirHost::new(cli.workdir, base_dir, plan, results)
        .with_options(&plugin.options().base);

    plugin.go(&mut host)?;
    if cli.prune {
        plugin.prune(&mut host)?;
    }

    Ok(host.failures().is_empty())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.report.base.log_level())
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
