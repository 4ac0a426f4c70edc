use bts_core::ports::{MarketData as _, ReportSink as _};
use bts_solver::{
    BatteryModel, OptimizeError, Solver as _, Status,
    clarabel::ClarabelSolver,
    export::{export_lp, export_mps},
    optimize,
};
use btsolve::{
    AppConfig, Cli, Commands, ExportFormat,
    impls::{JsonInput, JsonReport},
};
use std::io::Write as _;
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    // Library code reports through `tracing`; route those events to stderr,
    // filtered by RUST_LOG, so stdout stays free for the output document.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    let AppConfig { solver, model } = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Solve { io } => {
            let problem = JsonInput::from_reader(io.read()?)?.problem()?;
            let solver = ClarabelSolver::new(solver);

            let mut report = JsonReport::default();
            match optimize(&problem, &model, &solver) {
                Ok(outcome) => {
                    report.write_status(&outcome.status.to_string())?;
                    report.write_decisions(&outcome.decisions)?;
                    report.write_profits(&outcome.profits)?;
                    report.finish(io.write()?)?;
                }
                Err(OptimizeError::NotOptimal(status)) => {
                    // the status is part of the output even without a schedule
                    report.write_status(&status.to_string())?;
                    report.finish(io.write()?)?;
                    event!(Level::ERROR, %status, "no optimal schedule");
                    return Err(CliError::NotOptimal(status).into());
                }
                Err(error) => {
                    // the solve finished, so its status is still reported
                    if let Some(status) = error.status() {
                        report.write_status(&status.to_string())?;
                        report.finish(io.write()?)?;
                    }
                    return Err(error.into());
                }
            }
        }
        Commands::Export { io, format } => {
            let format = ExportFormat::resolve(format, &io).ok_or(CliError::ExportExtension)?;
            let problem = JsonInput::from_reader(io.read()?)?.problem()?;
            let model = BatteryModel::build(&problem, &model)?;

            let mut output = io.write()?;
            match format {
                ExportFormat::Mps => export_mps(model.program(), &mut output)?,
                ExportFormat::Lp => export_lp(model.program(), &mut output)?,
            }
            output.flush()?;
        }
    }

    Ok(())
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Unsupported export format")]
    ExportExtension,
    #[error("no optimal schedule, solver status: {0}")]
    NotOptimal(Status),
}
