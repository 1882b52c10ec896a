use crate::model::{PlanningInput, SolverOptions, Weights, WorkerId};
use crate::scheduler::{SchedError, ScheduleSolver};
use crate::timetable::{days_in_month, TimetableProjector};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Fichier de planification d'un mois (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub year: i32,
    pub month: u32,
    pub workers: Vec<String>,
    #[serde(default)]
    pub non_working_days: BTreeMap<String, BTreeSet<u32>>,
    #[serde(default)]
    pub no_day_shift: BTreeMap<String, BTreeSet<u32>>,
    /// Crédit de congés par membre
    #[serde(default)]
    pub days_off: BTreeMap<String, i64>,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default = "default_time_limit")]
    pub time_limit_seconds: u64,
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default)]
    pub utc_offset_hours: i32,
}

fn default_time_limit() -> u64 {
    30
}

fn default_start_hour() -> u32 {
    9
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_slice(&data)
            .with_context(|| format!("parsing planning file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers.iter().any(|w| w.trim().is_empty()) {
            bail!("worker ids cannot be empty");
        }
        self.projector()?;
        let input = self.planning_input()?;
        ScheduleSolver::new(&input, self.solver_options())?;
        Ok(())
    }

    pub fn days(&self) -> Result<u32, SchedError> {
        days_in_month(self.year, self.month)
    }

    pub fn planning_input(&self) -> Result<PlanningInput, SchedError> {
        let ids = |m: &BTreeMap<String, BTreeSet<u32>>| -> BTreeMap<WorkerId, BTreeSet<u32>> {
            m.iter()
                .map(|(k, v)| (WorkerId::new(k), v.clone()))
                .collect()
        };
        Ok(PlanningInput {
            workers: self.workers.iter().map(WorkerId::new).collect(),
            days: self.days()?,
            non_working_days: ids(&self.non_working_days),
            no_day_shift: ids(&self.no_day_shift),
            pto_credit: self
                .days_off
                .iter()
                .map(|(k, v)| (WorkerId::new(k), *v))
                .collect(),
        })
    }

    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            weights: self.weights,
            time_limit: Duration::from_secs(self.time_limit_seconds),
        }
    }

    pub fn projector(&self) -> Result<TimetableProjector, SchedError> {
        TimetableProjector::new(self.year, self.month, self.start_hour, self.utc_offset_hours)
    }
}
