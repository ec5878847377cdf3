use crate::model::{GlyphStyle, ShiftLabel};
use crate::scheduler::{Mode, RestPolicy, ScheduleOptions, Scheduler, Staffing};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Profil de planification : besoins, mode et règles, stocké en JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub glyphs: GlyphStyle,
    #[serde(default)]
    pub staffing: Staffing,
    #[serde(default)]
    pub rules: Option<Rules>,
}

/// Surcharges des options par défaut ; un champ absent garde la valeur par défaut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub max_streak: Option<u32>,
    #[serde(default)]
    pub overtime_after_day: Option<usize>,
    #[serde(default)]
    pub rest_policy: Option<RestPolicy>,
    #[serde(default)]
    pub rest_days_per_window: Option<usize>,
    #[serde(default)]
    pub idle_label: Option<ShiftLabel>,
}

impl Rules {
    pub fn apply(&self, base: ScheduleOptions) -> ScheduleOptions {
        ScheduleOptions {
            mode: base.mode,
            max_streak: self.max_streak.unwrap_or(base.max_streak),
            overtime_after_day: self.overtime_after_day.unwrap_or(base.overtime_after_day),
            rest_policy: self.rest_policy.unwrap_or(base.rest_policy),
            rest_days_per_window: self
                .rest_days_per_window
                .unwrap_or(base.rest_days_per_window),
            idle_label: self.idle_label.unwrap_or(base.idle_label),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: "default".into(),
            name: "Restaurant 5 personnes".into(),
            description: Some("Superviseur, accueil, cuisine et plonge couverts chaque jour".into()),
            mode: Mode::RoleCoverage,
            glyphs: GlyphStyle::Rich,
            staffing: Staffing::default(),
            rules: None,
        }
    }
}

impl Profile {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("profile id cannot be empty");
        }
        if self.name.trim().is_empty() {
            bail!("profile name cannot be empty");
        }
        self.staffing.validate()?;
        for req in std::iter::once(&self.staffing.default).chain(self.staffing.overrides.values())
        {
            let mut seen = HashSet::new();
            for slot in &req.roles {
                if !seen.insert(&slot.role) {
                    bail!("role {} listed twice in the same requirement", slot.role);
                }
            }
        }
        let opts = self.options();
        if opts.max_streak == 0 {
            bail!("max_streak must be > 0");
        }
        if opts.rest_days_per_window > crate::calendar::WINDOW_LEN {
            bail!("rest_days_per_window cannot exceed the window length");
        }
        if !matches!(opts.idle_label, ShiftLabel::Rest | ShiftLabel::MandatoryRest) {
            bail!("idle_label must be rest or mandatory_rest");
        }
        Ok(())
    }

    pub fn options(&self) -> ScheduleOptions {
        let base = ScheduleOptions {
            mode: self.mode,
            ..ScheduleOptions::default()
        };
        match &self.rules {
            Some(rules) => rules.apply(base),
            None => base,
        }
    }

    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.options(), self.staffing.clone())
    }
}

pub fn export_profile_json<P: AsRef<Path>>(path: P, profile: &Profile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile)?;
    crate::io::write_atomic(path, json.as_bytes())
}

pub fn load_profile_from_file<P: AsRef<Path>>(path: P) -> Result<Profile> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading profile {}", path.display()))?;
    let profile: Profile = serde_json::from_slice(&data)
        .with_context(|| format!("parsing profile {}", path.display()))?;
    profile.validate()?;
    Ok(profile)
}
