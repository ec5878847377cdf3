mod availability;
mod coverage;
mod generate;
mod labels;
mod policy;
mod types;

pub use policy::{DayPosition, RestLedger, RestPolicy};
pub use types::{DailyRequirement, Mode, RoleSlot, SchedError, ScheduleOptions, Staffing};

use crate::calendar::Calendar;
use crate::model::Roster;
use crate::schedule::Schedule;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scheduler : options de génération et besoins en personnel
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    options: ScheduleOptions,
    staffing: Staffing,
}

impl Scheduler {
    pub fn new(options: ScheduleOptions, staffing: Staffing) -> Self {
        Self { options, staffing }
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }
    pub fn staffing(&self) -> &Staffing {
        &self.staffing
    }

    /// Génère le planning avec la source d'aléa fournie.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        calendar: &Calendar,
        roster: &Roster,
        rng: &mut R,
    ) -> Result<Schedule, SchedError> {
        roster.validate()?;
        self.staffing.validate()?;
        let schedule = match self.options.mode {
            Mode::RoleCoverage => generate::role_coverage(self, calendar, roster, rng),
            Mode::Sampling => generate::sampling(self, calendar, roster, rng),
        };
        tracing::info!(
            mode = ?schedule.mode,
            days = schedule.dates.len(),
            rows = schedule.rows.len(),
            "schedule generated"
        );
        Ok(schedule)
    }

    /// Génération reproductible : même graine, même planning.
    pub fn generate_seeded(
        &self,
        calendar: &Calendar,
        roster: &Roster,
        seed: u64,
    ) -> Result<Schedule, SchedError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(calendar, roster, &mut rng)
    }
}
