use crate::model::{EmployeeId, ShiftLabel, Tier};
use crate::scheduler::Mode;
use crate::summary::DailySummary;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ligne du planning : un employé, une étiquette par date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleRow {
    pub employee: EmployeeId,
    pub tier: Tier,
    pub labels: Vec<ShiftLabel>,
    /// Disponibilité calculée avant la sélection de chaque jour. Vide pour les
    /// employés sans suivi (secondaires) et en mode échantillonnage.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub availability: Vec<bool>,
}

/// Planning complet : lignes dans l'ordre du roster, colonnes dans l'ordre du calendrier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub mode: Mode,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn row(&self, name: &str) -> Option<&ScheduleRow> {
        self.rows.iter().find(|r| r.employee.as_str() == name)
    }

    pub fn date_index(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|d| *d == date)
    }

    pub fn label(&self, name: &str, date: NaiveDate) -> Option<ShiftLabel> {
        let idx = self.date_index(date)?;
        self.row(name).and_then(|r| r.labels.get(idx).copied())
    }

    /// Colonne d'un jour (par indice), dans l'ordre des lignes.
    pub fn column(&self, day: usize) -> impl Iterator<Item = ShiftLabel> + '_ {
        self.rows.iter().filter_map(move |r| r.labels.get(day).copied())
    }

    pub fn summary(&self) -> DailySummary {
        DailySummary::from_schedule(self)
    }
}
