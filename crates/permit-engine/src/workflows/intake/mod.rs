//! Batch intake of project rows exported from the permitting spreadsheet.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::permits::{ProjectId, RawProjectDetails};
use parser::ProjectRow;

#[derive(Debug)]
pub enum ProjectIntakeError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidValue {
        project_id: String,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for ProjectIntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectIntakeError::Io(err) => write!(f, "failed to read project export: {}", err),
            ProjectIntakeError::Csv(err) => write!(f, "invalid project CSV data: {}", err),
            ProjectIntakeError::InvalidValue {
                project_id,
                column,
                value,
            } => write!(
                f,
                "project {}: '{}' is not a valid value for {}",
                project_id, value, column
            ),
        }
    }
}

impl std::error::Error for ProjectIntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectIntakeError::Io(err) => Some(err),
            ProjectIntakeError::Csv(err) => Some(err),
            ProjectIntakeError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProjectIntakeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProjectIntakeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One exported project, ready for the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeProject {
    pub project_id: ProjectId,
    pub details: RawProjectDetails,
}

pub struct ProjectIntake;

impl ProjectIntake {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<IntakeProject>, ProjectIntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<IntakeProject>, ProjectIntakeError> {
        parser::parse_rows(reader)?
            .into_iter()
            .map(project_from_row)
            .collect()
    }
}

fn project_from_row(row: ProjectRow) -> Result<IntakeProject, ProjectIntakeError> {
    let flag = |column: &'static str, cell: &Option<String>| -> Result<Option<bool>, ProjectIntakeError> {
        cell.as_deref()
            .map(|value| {
                parser::parse_flag(value).ok_or_else(|| ProjectIntakeError::InvalidValue {
                    project_id: row.project_id.clone(),
                    column,
                    value: value.to_string(),
                })
            })
            .transpose()
    };

    let details = RawProjectDetails {
        workflow_track: row.track.clone(),
        category: row.category.clone(),
        improvement_types: row
            .improvements
            .as_deref()
            .map(parser::split_improvements)
            .unwrap_or_default(),
        estimated_cost: row.estimated_cost.clone(),
        estimated_cost_cents: None,
        in_water: flag("In Water", &row.in_water)?,
        below_high_water_line: flag("Below High Water Line", &row.below_high_water_line)?,
        within_shoreline_jurisdiction: flag("Shoreline Jurisdiction", &row.shoreline_jurisdiction)?,
        near_shoreline: flag("Near Shoreline", &row.near_shoreline)?,
        on_sewer: flag("On Sewer", &row.on_sewer)?,
        has_existing_adu: flag("Existing ADU", &row.existing_adu)?,
        elevation_feet: row
            .elevation
            .as_deref()
            .map(|value| {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ProjectIntakeError::InvalidValue {
                        project_id: row.project_id.clone(),
                        column: "Elevation",
                        value: value.to_string(),
                    })
            })
            .transpose()?,
    };

    Ok(IntakeProject {
        project_id: ProjectId(row.project_id),
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Project ID,Track,Category,Improvements,Estimated Cost,In Water,Below High Water Line,Shoreline Jurisdiction,Near Shoreline,On Sewer,Existing ADU,Elevation\n";

    #[test]
    fn rows_become_raw_project_details() {
        let csv = format!(
            "{HEADER}lake-1,waterfront,new_construction,dock; mooring_pile,\"$25,000.00\",yes,no,,,,,543.2\n"
        );

        let projects = ProjectIntake::from_reader(Cursor::new(csv)).expect("intake succeeds");

        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.project_id, ProjectId("lake-1".to_string()));
        assert_eq!(project.details.workflow_track.as_deref(), Some("waterfront"));
        assert_eq!(
            project.details.improvement_types,
            vec!["dock".to_string(), "mooring_pile".to_string()]
        );
        assert_eq!(project.details.estimated_cost.as_deref(), Some("$25,000.00"));
        assert_eq!(project.details.in_water, Some(true));
        assert_eq!(project.details.below_high_water_line, Some(false));
        assert_eq!(project.details.within_shoreline_jurisdiction, None);
        assert_eq!(project.details.elevation_feet, Some(543.2));
    }

    #[test]
    fn blank_cells_stay_unset() {
        let csv = format!("{HEADER}adu-1,adu,,,,,,,,,,\n");

        let project = ProjectIntake::from_reader(Cursor::new(csv))
            .expect("intake succeeds")
            .pop()
            .expect("row present");

        assert_eq!(project.details.category, None);
        assert!(project.details.improvement_types.is_empty());
        assert_eq!(project.details.on_sewer, None);
        assert_eq!(project.details.elevation_feet, None);
    }

    #[test]
    fn invalid_flag_names_row_and_column() {
        let csv = format!("{HEADER}adu-2,adu,,,,,,,,maybe,,\n");

        match ProjectIntake::from_reader(Cursor::new(csv)) {
            Err(ProjectIntakeError::InvalidValue {
                project_id,
                column,
                value,
            }) => {
                assert_eq!(project_id, "adu-2");
                assert_eq!(column, "On Sewer");
                assert_eq!(value, "maybe");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        match ProjectIntake::from_path("./does-not-exist.csv") {
            Err(ProjectIntakeError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
