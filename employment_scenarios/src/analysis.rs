//! Aggregation of scenario panels: transition matrices, composition shares
//! and active-employment shares by subgroup.

use crate::categories::{Activity, Disability, EmploymentState, NUM_STATES};
use crate::runner::Panel;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Row-normalized before → after cross-tabulation, rows and columns in
/// registry order. Rows with no observations stay all-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    rows: [[f64; NUM_STATES]; NUM_STATES],
}

impl TransitionMatrix {
    pub fn from_panel(panel: &Panel) -> TransitionMatrix {
        let mut counts = [[0usize; NUM_STATES]; NUM_STATES];
        for record in &panel.records {
            counts[record.state_before.index()][record.state_after.index()] += 1;
        }

        let mut rows = [[0.0; NUM_STATES]; NUM_STATES];
        for (from, row) in counts.iter().enumerate() {
            let total: usize = row.iter().sum();
            if total > 0 {
                for (to, &count) in row.iter().enumerate() {
                    rows[from][to] = count as f64 / total as f64;
                }
            }
        }
        TransitionMatrix { rows }
    }

    /// Observed probability of moving `from` → `to`.
    pub fn prob(&self, from: EmploymentState, to: EmploymentState) -> f64 {
        self.rows[from.index()][to.index()]
    }

    /// Row for one origin state, in registry order.
    pub fn row(&self, from: EmploymentState) -> &[f64; NUM_STATES] {
        &self.rows[from.index()]
    }
}

impl fmt::Display for TransitionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:18}", "")?;
        for state in EmploymentState::ALL {
            write!(f, "{:>10.10}", state.label())?;
        }
        writeln!(f)?;
        for from in EmploymentState::ALL {
            write!(f, "{:18.18}", from.label())?;
            for to in EmploymentState::ALL {
                write!(f, "{:>10.2}", self.prob(from, to))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Marginal state frequencies before and after, pooled over all periods.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionShares {
    pub before: [f64; NUM_STATES],
    pub after: [f64; NUM_STATES],
}

impl CompositionShares {
    pub fn from_panel(panel: &Panel) -> CompositionShares {
        let mut before = [0.0; NUM_STATES];
        let mut after = [0.0; NUM_STATES];
        let total = panel.len() as f64;
        for record in &panel.records {
            before[record.state_before.index()] += 1.0;
            after[record.state_after.index()] += 1.0;
        }
        if total > 0.0 {
            for index in 0..NUM_STATES {
                before[index] /= total;
                after[index] /= total;
            }
        }
        CompositionShares { before, after }
    }
}

/// Share of after-states that are Active (Full-time or Part-time), pooled
/// over the whole panel.
pub fn active_share_overall(panel: &Panel) -> f64 {
    if panel.is_empty() {
        return 0.0;
    }
    let active = panel
        .records
        .iter()
        .filter(|r| r.state_after.activity() == Activity::Active)
        .count();
    active as f64 / panel.len() as f64
}

/// Active after-state share split by disability status. Groups absent from
/// the panel are omitted.
pub fn active_share_by_disability(panel: &Panel) -> BTreeMap<Disability, f64> {
    let mut totals: BTreeMap<Disability, (usize, usize)> = BTreeMap::new();
    for record in &panel.records {
        let entry = totals.entry(record.disability).or_insert((0, 0));
        entry.1 += 1;
        if record.state_after.activity() == Activity::Active {
            entry.0 += 1;
        }
    }
    totals
        .into_iter()
        .map(|(group, (active, total))| (group, active as f64 / total as f64))
        .collect()
}

/// One row of the cross-scenario comparison table.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub scenario: String,
    pub active_share_overall: f64,
    pub active_share_disabled: Option<f64>,
    pub active_share_not_disabled: Option<f64>,
    pub active_share_unknown: Option<f64>,
}

impl ScenarioSummary {
    pub fn from_panel(panel: &Panel) -> ScenarioSummary {
        let by_disability = active_share_by_disability(panel);
        ScenarioSummary {
            scenario: panel.scenario.clone(),
            active_share_overall: active_share_overall(panel),
            active_share_disabled: by_disability.get(&Disability::Yes).copied(),
            active_share_not_disabled: by_disability.get(&Disability::No).copied(),
            active_share_unknown: by_disability.get(&Disability::Unknown).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{AgeGroup, Ethnicity, Sex};
    use crate::runner::PanelRecord;
    use approx::assert_relative_eq;

    fn record(
        id: usize,
        before: EmploymentState,
        after: EmploymentState,
        disability: Disability,
    ) -> PanelRecord {
        PanelRecord {
            individual_id: id,
            period: 1,
            state_before: before,
            state_after: after,
            age_group: AgeGroup::Adults,
            disability,
            sex: Sex::Male,
            ethnicity: Ethnicity::White,
        }
    }

    fn small_panel() -> Panel {
        Panel {
            scenario: "Test".to_string(),
            records: vec![
                record(0, EmploymentState::FullTime, EmploymentState::FullTime, Disability::No),
                record(1, EmploymentState::FullTime, EmploymentState::Unemployed, Disability::No),
                record(2, EmploymentState::Unemployed, EmploymentState::PartTime, Disability::Yes),
                record(3, EmploymentState::Unemployed, EmploymentState::Unemployed, Disability::Yes),
            ],
        }
    }

    #[test]
    fn transition_matrix_rows_are_normalized() {
        let matrix = TransitionMatrix::from_panel(&small_panel());
        assert_relative_eq!(
            matrix.prob(EmploymentState::FullTime, EmploymentState::FullTime),
            0.5
        );
        assert_relative_eq!(
            matrix.prob(EmploymentState::FullTime, EmploymentState::Unemployed),
            0.5
        );
        assert_relative_eq!(
            matrix.prob(EmploymentState::Unemployed, EmploymentState::PartTime),
            0.5
        );
        let row_total: f64 = matrix.row(EmploymentState::FullTime).iter().sum();
        assert_relative_eq!(row_total, 1.0);
    }

    #[test]
    fn unobserved_origin_rows_stay_zero() {
        let matrix = TransitionMatrix::from_panel(&small_panel());
        let row_total: f64 = matrix.row(EmploymentState::Retired).iter().sum();
        assert_relative_eq!(row_total, 0.0);
    }

    #[test]
    fn composition_shares_sum_to_one() {
        let shares = CompositionShares::from_panel(&small_panel());
        assert_relative_eq!(shares.before.iter().sum::<f64>(), 1.0);
        assert_relative_eq!(shares.after.iter().sum::<f64>(), 1.0);
        assert_relative_eq!(shares.before[EmploymentState::FullTime.index()], 0.5);
        assert_relative_eq!(shares.after[EmploymentState::Unemployed.index()], 0.5);
    }

    #[test]
    fn active_share_counts_full_and_part_time() {
        let panel = small_panel();
        // After states: Full-time, Unemployed, Part-time, Unemployed.
        assert_relative_eq!(active_share_overall(&panel), 0.5);

        let by_disability = active_share_by_disability(&panel);
        assert_relative_eq!(by_disability[&Disability::No], 0.5);
        assert_relative_eq!(by_disability[&Disability::Yes], 0.5);
        assert!(!by_disability.contains_key(&Disability::Unknown));
    }

    #[test]
    fn summary_row_carries_subgroup_shares() {
        let summary = ScenarioSummary::from_panel(&small_panel());
        assert_eq!(summary.scenario, "Test");
        assert_relative_eq!(summary.active_share_overall, 0.5);
        assert_eq!(summary.active_share_unknown, None);
    }

    #[test]
    fn empty_panel_is_handled() {
        let panel = Panel {
            scenario: "Empty".to_string(),
            records: vec![],
        };
        assert_eq!(active_share_overall(&panel), 0.0);
        assert!(active_share_by_disability(&panel).is_empty());
        let shares = CompositionShares::from_panel(&panel);
        assert_relative_eq!(shares.before.iter().sum::<f64>(), 0.0);
    }
}
