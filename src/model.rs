use crate::scheduler::SchedError;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Identifiant fort d'un employé (son nom, unique dans un roster)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compétence déclarée (superviseur, accueil, cuisine...). L'ensemble des
/// rôles relève de la configuration, pas du code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleTag(String);

impl RoleTag {
    pub const SUPERVISOR: &'static str = "supervisor";
    pub const FRONT_DESK: &'static str = "front-desk";
    pub const KITCHEN: &'static str = "kitchen";
    pub const KITCHEN_SUPPORT: &'static str = "kitchen-support";

    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Niveau dans le roster : les secondaires ne servent qu'au renfort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tier {
    #[default]
    Primary,
    Secondary,
}

/// Employé
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Employee {
    pub id: EmployeeId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: Tier,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeSet::is_empty")
    )]
    pub roles: BTreeSet<RoleTag>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeSet::is_empty")
    )]
    pub vacations: BTreeSet<NaiveDate>,
}

impl Employee {
    /// Employé principal, sans rôle ni congés.
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            id: EmployeeId::new(name),
            tier: Tier::Primary,
            roles: BTreeSet::new(),
            vacations: BTreeSet::new(),
        }
    }

    /// Employé du vivier de renfort.
    pub fn secondary<S: AsRef<str>>(name: S) -> Self {
        Self {
            tier: Tier::Secondary,
            ..Self::new(name)
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles.extend(roles.into_iter().map(RoleTag::new));
        self
    }

    pub fn with_vacations<I: IntoIterator<Item = NaiveDate>>(mut self, days: I) -> Self {
        self.vacations.extend(days);
        self
    }

    pub fn is_primary(&self) -> bool {
        self.tier == Tier::Primary
    }

    pub fn has_role(&self, role: &RoleTag) -> bool {
        self.roles.contains(role)
    }

    pub fn on_vacation(&self, date: NaiveDate) -> bool {
        self.vacations.contains(&date)
    }
}

/// Roster ordonné ; l'ordre fixe l'ordre des lignes du planning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    pub employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Result<Self, SchedError> {
        let roster = Self { employees };
        roster.validate()?;
        Ok(roster)
    }

    /// Les noms doivent être uniques et non vides.
    pub fn validate(&self) -> Result<(), SchedError> {
        let mut seen = HashSet::new();
        for e in &self.employees {
            if e.id.as_str().is_empty() {
                return Err(SchedError::InvalidRequirement("employee name cannot be empty"));
            }
            if !seen.insert(&e.id) {
                return Err(SchedError::DuplicateEmployee(e.id.as_str().to_string()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn find<'a>(&'a self, name: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.id.as_str() == name)
    }

    /// Indices (dans l'ordre du roster) des employés d'un niveau donné.
    pub fn indices_of(&self, tier: Tier) -> Vec<usize> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| e.tier == tier)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Étiquette d'une case du planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShiftLabel {
    Work,
    Rest,
    MandatoryRest,
    Overtime,
    Vacation,
    Blank,
}

impl ShiftLabel {
    /// Seul `Work` compte dans l'effectif journalier ; `Overtime` en est exclu.
    pub fn is_work(self) -> bool {
        self == ShiftLabel::Work
    }
}

/// Rendu textuel des étiquettes.
///
/// `Rich` affiche un glyphe explicite pour le travail, `Plain` laisse la case
/// vide ; les deux désignent la même étiquette `Work`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GlyphStyle {
    Plain,
    #[default]
    Rich,
}

impl GlyphStyle {
    pub fn glyph(self, label: ShiftLabel) -> &'static str {
        match (self, label) {
            (GlyphStyle::Rich, ShiftLabel::Work) => "班",
            (GlyphStyle::Plain, ShiftLabel::Work) => "",
            (_, ShiftLabel::Rest) => "休",
            (_, ShiftLabel::MandatoryRest) => "例休",
            (_, ShiftLabel::Overtime) => "加",
            (_, ShiftLabel::Vacation) => "休",
            (_, ShiftLabel::Blank) => "",
        }
    }
}
