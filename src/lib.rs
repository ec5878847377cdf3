#![forbid(unsafe_code)]
//! Roulement — génération de plannings d'équipe sans base de données.
//!
//! - Calendrier découpé en semaines de 7 jours.
//! - Quota de repos, plafond de jours consécutifs, heures sup. une seule fois.
//! - Couverture des rôles par priorité, renfort par un vivier secondaire.
//! - Aléa injecté : graine fixe, planning identique.
//! - Import/export CSV (UTF-8 avec BOM) et JSON en dehors du cœur.

pub mod calendar;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
#[cfg(feature = "serde")]
pub mod profile;
pub mod schedule;
pub mod scheduler;
pub mod summary;

pub use calendar::{partition, Calendar, Window};
pub use model::{Employee, EmployeeId, GlyphStyle, RoleTag, Roster, ShiftLabel, Tier};
#[cfg(feature = "serde")]
pub use profile::{export_profile_json, load_profile_from_file, Profile, Rules};
pub use schedule::{Schedule, ScheduleRow};
pub use scheduler::{
    DailyRequirement, Mode, RestPolicy, RoleSlot, SchedError, ScheduleOptions, Scheduler,
    Staffing,
};
pub use summary::{DailyCount, DailySummary, Shortfall};
