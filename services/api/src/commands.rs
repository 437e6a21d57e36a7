use clap::Args;
use permit_engine::config::AppConfig;
use permit_engine::error::AppError;
use permit_engine::telemetry;
use permit_engine::workflows::intake::{IntakeProject, ProjectIntake};
use permit_engine::workflows::permits::{Determination, PermitEngine, RawProjectDetails};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file containing the raw project details
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Pretty-print the determination
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Spreadsheet export with one project per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

fn configured_engine() -> Result<PermitEngine, AppError> {
    let config = AppConfig::load()?;
    prepare(&config)
}

/// Installs stderr logging so evaluator warnings reach the operator, then
/// builds the engine with the configured thresholds.
pub(crate) fn prepare(config: &AppConfig) -> Result<PermitEngine, AppError> {
    telemetry::init(&config.telemetry)?;
    Ok(PermitEngine::with_thresholds(config.thresholds))
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let raw = std::fs::read_to_string(&args.input)?;
    let determination = evaluate_json(&engine, &raw)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&determination)?
    } else {
        serde_json::to_string(&determination)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let projects = ProjectIntake::from_path(&args.csv)?;
    print!("{}", render_batch(&engine, &projects));
    Ok(())
}

pub(crate) fn evaluate_json(engine: &PermitEngine, raw: &str) -> Result<Determination, AppError> {
    let details: RawProjectDetails = serde_json::from_str(raw)?;
    Ok(engine.evaluate(&details)?)
}

/// One line per project listing its permits, followed by indented warnings.
/// A project that cannot be evaluated gets an error line; the rest still run.
pub(crate) fn render_batch(engine: &PermitEngine, projects: &[IntakeProject]) -> String {
    let mut output = String::new();
    for project in projects {
        let determination = match engine.evaluate(&project.details) {
            Ok(determination) => determination,
            Err(err) => {
                warn!(project = %project.project_id.0, error = %err, "project skipped");
                let _ = writeln!(output, "{}: error: {}", project.project_id.0, err);
                continue;
            }
        };

        let permits: Vec<&str> = determination
            .summary
            .all_permits
            .iter()
            .map(|permit| permit.id())
            .collect();

        let _ = writeln!(output, "{}: {}", project.project_id.0, permits.join(", "));
        for warning in &determination.diagnostics {
            let _ = writeln!(output, "  warning: {}", warning.summary());
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use permit_engine::config::{AppEnvironment, ServerConfig, TelemetryConfig};
    use permit_engine::workflows::permits::{PermitKind, PermitThresholds};

    #[test]
    fn evaluate_json_accepts_camel_case_details() {
        let engine = PermitEngine::standard();
        let determination = evaluate_json(
            &engine,
            r#"{"workflowTrack":"waterfront","estimatedCost":"$25,000.00","inWater":true,"improvementTypes":["mooring_pile"]}"#,
        )
        .expect("determination");

        assert_eq!(
            determination.summary.all_permits,
            vec![
                PermitKind::CwaLicense,
                PermitKind::ShorelineSubstantial,
                PermitKind::Hpa,
                PermitKind::Section10,
            ]
        );
    }

    #[test]
    fn evaluate_json_surfaces_configuration_errors() {
        let engine = PermitEngine::standard();
        let error = evaluate_json(&engine, r#"{"estimatedCost":"$100"}"#).expect_err("no track");
        assert!(matches!(error, AppError::Determination(_)));
    }

    #[test]
    fn batch_output_lists_permits_and_warnings() {
        let csv = "Project ID,Track,Improvements,Estimated Cost,On Sewer\n\
lakeside,waterfront,dock,\"$5,000\",\n\
garage,adu,garage_conversion;dock,,yes\n";
        let projects = ProjectIntake::from_reader(csv.as_bytes()).expect("intake");

        let output = render_batch(&PermitEngine::standard(), &projects);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "lakeside: cwa_license, shoreline_exemption");
        assert_eq!(lines[1], "garage: adu_building_permit");
        assert!(lines[2].starts_with("  warning: "));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn batch_reports_failing_rows_and_keeps_going() {
        let csv = "Project ID,Track,Estimated Cost,On Sewer\n\
ok-1,waterfront,\"$5,000\",\n\
bad,geothermal,,\n\
ok-2,adu,,yes\n";
        let projects = ProjectIntake::from_reader(csv.as_bytes()).expect("intake");

        let output = render_batch(&PermitEngine::standard(), &projects);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "ok-1: cwa_license, shoreline_exemption",
                "bad: error: unrecognized workflow track 'geothermal' (expected waterfront, solar, or adu)",
                "ok-2: adu_building_permit",
            ]
        );
    }

    #[test]
    fn prepare_installs_logging_and_applies_thresholds() {
        let config = AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
            thresholds: PermitThresholds {
                shoreline_exemption_max_cents: 1_000_000,
                ..PermitThresholds::default()
            },
        };

        let engine = prepare(&config).expect("first initialization succeeds");
        let determination = evaluate_json(
            &engine,
            r#"{"workflowTrack":"waterfront","estimatedCostCents":900000}"#,
        )
        .expect("determination");
        assert!(determination
            .summary
            .contains(PermitKind::ShorelineExemption));

        // The global subscriber is already in place, so a second install is refused.
        assert!(matches!(prepare(&config), Err(AppError::Telemetry(_))));
    }
}
