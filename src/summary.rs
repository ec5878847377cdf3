use crate::schedule::Schedule;
use crate::scheduler::Staffing;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Effectif au travail pour une date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyCount {
    pub date: NaiveDate,
    pub working: usize,
}

/// Journée sous le besoin demandé.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub date: NaiveDate,
    pub working: usize,
    pub required: usize,
}

/// Décompte journalier des cases `Work`. Repos, congés, heures sup. et cases
/// vides ne comptent pas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailySummary {
    pub days: Vec<DailyCount>,
}

impl DailySummary {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let days = schedule
            .dates
            .iter()
            .enumerate()
            .map(|(idx, date)| DailyCount {
                date: *date,
                working: schedule.column(idx).filter(|l| l.is_work()).count(),
            })
            .collect();
        Self { days }
    }

    pub fn count_on(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().find(|d| d.date == date).map(|d| d.working)
    }

    /// Jours dont l'effectif reste sous le besoin.
    pub fn shortfalls(&self, staffing: &Staffing) -> Vec<Shortfall> {
        self.days
            .iter()
            .filter_map(|d| {
                let required = staffing.for_date(d.date).headcount;
                (d.working < required).then_some(Shortfall {
                    date: d.date,
                    working: d.working,
                    required,
                })
            })
            .collect()
    }
}
