use super::DailyRequirement;
use crate::model::Roster;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Personnes retenues pour une journée (indices dans le roster).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct DaySelection {
    pub(super) primary: BTreeSet<usize>,
    pub(super) secondary: BTreeSet<usize>,
}

impl DaySelection {
    pub(super) fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }
}

/// Sélection gloutonne d'une journée : un tirage par rôle dans l'ordre de
/// priorité, complément aléatoire parmi les disponibles, puis renfort
/// secondaire. Un vivier insuffisant donne une journée en sous-effectif.
pub(super) fn select_day<R: Rng + ?Sized>(
    roster: &Roster,
    available: &[usize],
    secondaries: &[usize],
    requirement: &DailyRequirement,
    rng: &mut R,
) -> DaySelection {
    let mut selection = DaySelection::default();

    for slot in &requirement.roles {
        for _ in 0..slot.min {
            let candidates: Vec<usize> = available
                .iter()
                .copied()
                .filter(|idx| !selection.primary.contains(idx))
                .filter(|&idx| roster.employees[idx].has_role(&slot.role))
                .collect();
            match candidates.choose(rng) {
                Some(&picked) => {
                    selection.primary.insert(picked);
                }
                None => break,
            }
        }
    }

    let remaining = requirement.headcount.saturating_sub(selection.len());
    if remaining > 0 {
        let others: Vec<usize> = available
            .iter()
            .copied()
            .filter(|idx| !selection.primary.contains(idx))
            .collect();
        if others.len() >= remaining {
            selection
                .primary
                .extend(others.choose_multiple(rng, remaining).copied());
        } else {
            selection.primary.extend(others);
        }
    }

    let shortfall = requirement.headcount.saturating_sub(selection.len());
    if shortfall > 0 {
        let take = shortfall.min(secondaries.len());
        selection
            .secondary
            .extend(secondaries.choose_multiple(rng, take).copied());
    }

    selection
}
