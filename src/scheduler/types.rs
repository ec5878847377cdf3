use super::policy::RestPolicy;
use crate::model::{RoleTag, ShiftLabel};
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Mode de génération
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Quota de repos + plafond de jours consécutifs, couverture des rôles, renforts.
    #[default]
    RoleCoverage,
    /// Tirage aléatoire des repos semaine par semaine, sans sélection journalière.
    Sampling,
}

/// Options de génération
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleOptions {
    pub mode: Mode,
    pub max_streak: u32,
    /// Les heures supplémentaires ne sont possibles qu'au-delà de cet indice de jour.
    pub overtime_after_day: usize,
    pub rest_policy: RestPolicy,
    /// Repos tirés par fenêtre en mode échantillonnage.
    pub rest_days_per_window: usize,
    /// Étiquette d'un jour non travaillé sans autre motif (mode rôles).
    pub idle_label: ShiftLabel,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            mode: Mode::RoleCoverage,
            max_streak: 6,
            overtime_after_day: 21,
            rest_policy: RestPolicy::default(),
            rest_days_per_window: 2,
            idle_label: ShiftLabel::MandatoryRest,
        }
    }
}

/// Nombre minimal de personnes portant un rôle donné.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleSlot {
    pub role: RoleTag,
    #[cfg_attr(feature = "serde", serde(default = "default_slot_min"))]
    pub min: u8,
}

#[cfg(feature = "serde")]
fn default_slot_min() -> u8 {
    1
}

impl RoleSlot {
    pub fn new<S: AsRef<str>>(role: S) -> Self {
        Self {
            role: RoleTag::new(role),
            min: 1,
        }
    }
}

/// Besoin d'une journée : effectif total et rôles à couvrir, par ordre de priorité.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyRequirement {
    pub headcount: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roles: Vec<RoleSlot>,
}

impl DailyRequirement {
    /// Effectif seul, sans rôle à couvrir.
    pub fn headcount(headcount: usize) -> Self {
        Self {
            headcount,
            roles: Vec::new(),
        }
    }

    pub fn with_role<S: AsRef<str>>(mut self, role: S) -> Self {
        self.roles.push(RoleSlot::new(role));
        self
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        if self.roles.iter().any(|slot| slot.role.as_str().is_empty()) {
            return Err(SchedError::InvalidRequirement("role tag cannot be empty"));
        }
        Ok(())
    }
}

impl Default for DailyRequirement {
    fn default() -> Self {
        Self::headcount(5)
            .with_role(RoleTag::SUPERVISOR)
            .with_role(RoleTag::FRONT_DESK)
            .with_role(RoleTag::KITCHEN)
            .with_role(RoleTag::KITCHEN_SUPPORT)
    }
}

/// Besoin par défaut, éventuellement remplacé pour certaines dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Staffing {
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: DailyRequirement,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub overrides: BTreeMap<NaiveDate, DailyRequirement>,
}

impl Staffing {
    pub fn uniform(requirement: DailyRequirement) -> Self {
        Self {
            default: requirement,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, date: NaiveDate, requirement: DailyRequirement) -> Self {
        self.overrides.insert(date, requirement);
        self
    }

    pub fn for_date(&self, date: NaiveDate) -> &DailyRequirement {
        self.overrides.get(&date).unwrap_or(&self.default)
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        self.default.validate()?;
        for req in self.overrides.values() {
            req.validate()?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date range: end must be after start")]
    InvalidRange,
    #[error("duplicate employee name: {0}")]
    DuplicateEmployee(String),
    #[error("invalid requirement: {0}")]
    InvalidRequirement(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
