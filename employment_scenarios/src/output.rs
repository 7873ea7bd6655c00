//! Result persistence: per-scenario panel CSVs, the cross-scenario active
//! share summary, and a run-metadata JSON for reproducibility.

use crate::analysis::ScenarioSummary;
use crate::runner::Panel;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Reproducibility metadata saved next to the result tables.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub seed: u64,
    pub periods: usize,
    pub population_size: usize,
    pub scenarios: Vec<String>,
    pub timestamp: String,
}

impl RunMetadata {
    pub fn new(seed: u64, periods: usize, population_size: usize, scenarios: Vec<String>) -> Self {
        RunMetadata {
            seed,
            periods,
            population_size,
            scenarios,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Write one scenario's panel as CSV.
pub fn write_panel_csv<P: AsRef<Path>>(panel: &Panel, path: P) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in &panel.records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the scenario × active-share comparison table as CSV.
pub fn write_summary_csv<P: AsRef<Path>>(
    summaries: &[ScenarioSummary],
    path: P,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for summary in summaries {
        wtr.serialize(summary)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write run metadata as pretty JSON.
pub fn write_metadata_json<P: AsRef<Path>>(
    metadata: &RunMetadata,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the whole result set for a batch run.
///
/// Creates, under `dir`:
/// - `panel_<scenario>.csv` per scenario
/// - `scenario_active_share_summary.csv`
/// - `run.json`
pub fn write_all<P: AsRef<Path>>(
    panels: &BTreeMap<String, Panel>,
    metadata: &RunMetadata,
    dir: P,
) -> Result<(), Box<dyn Error>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut summaries = Vec::with_capacity(panels.len());
    for (name, panel) in panels {
        write_panel_csv(panel, dir.join(format!("panel_{}.csv", file_stem(name))))?;
        summaries.push(ScenarioSummary::from_panel(panel));
    }
    write_summary_csv(&summaries, dir.join("scenario_active_share_summary.csv"))?;
    write_metadata_json(metadata, dir.join("run.json"))?;
    Ok(())
}

/// Scenario names may contain spaces or punctuation; keep file names tame.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{AgeGroup, Disability, EmploymentState, Ethnicity, Sex};
    use crate::runner::PanelRecord;

    #[test]
    fn file_stems_are_filesystem_safe() {
        assert_eq!(file_stem("Inclusive Policy"), "inclusive_policy");
        assert_eq!(file_stem("Baseline"), "baseline");
    }

    #[test]
    fn panel_rows_serialize_with_survey_labels() {
        let record = PanelRecord {
            individual_id: 0,
            period: 1,
            state_before: EmploymentState::FullTime,
            state_after: EmploymentState::HousePerson,
            age_group: AgeGroup::YoungAdults,
            disability: Disability::Unknown,
            sex: Sex::Lgbtq,
            ethnicity: Ethnicity::Mixed,
        };
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.serialize(&record).unwrap();
        let bytes = wtr.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("individual_id,period,state_before,state_after"));
        assert!(text.contains("Full-time"));
        assert!(text.contains("House person"));
        assert!(text.contains("Young adults (18–25)"));
        assert!(text.contains("LGBTQ"));
    }

    #[test]
    fn metadata_serializes_scenario_names() {
        let metadata = RunMetadata::new(42, 1, 100, vec!["Baseline".to_string()]);
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"seed\":42"));
        assert!(json.contains("Baseline"));
    }
}
