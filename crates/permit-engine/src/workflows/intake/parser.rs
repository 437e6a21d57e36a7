use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRow {
    #[serde(rename = "Project ID")]
    pub(crate) project_id: String,
    #[serde(rename = "Track", default, deserialize_with = "empty_string_as_none")]
    pub(crate) track: Option<String>,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    pub(crate) category: Option<String>,
    #[serde(
        rename = "Improvements",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) improvements: Option<String>,
    #[serde(
        rename = "Estimated Cost",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) estimated_cost: Option<String>,
    #[serde(rename = "In Water", default, deserialize_with = "empty_string_as_none")]
    pub(crate) in_water: Option<String>,
    #[serde(
        rename = "Below High Water Line",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) below_high_water_line: Option<String>,
    #[serde(
        rename = "Shoreline Jurisdiction",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) shoreline_jurisdiction: Option<String>,
    #[serde(
        rename = "Near Shoreline",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) near_shoreline: Option<String>,
    #[serde(rename = "On Sewer", default, deserialize_with = "empty_string_as_none")]
    pub(crate) on_sewer: Option<String>,
    #[serde(
        rename = "Existing ADU",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) existing_adu: Option<String>,
    #[serde(rename = "Elevation", default, deserialize_with = "empty_string_as_none")]
    pub(crate) elevation: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ProjectRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<ProjectRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Spreadsheet-style yes/no cell.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "x" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn split_improvements(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
