use crate::calendar::WINDOW_LEN;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position d'un jour dans le calendrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPosition {
    pub index: usize,
    pub window: usize,
    pub offset: usize,
    pub window_len: usize,
}

impl DayPosition {
    pub fn at(index: usize, total_days: usize) -> Self {
        let window = index / WINDOW_LEN;
        let window_start = window * WINDOW_LEN;
        Self {
            index,
            window,
            offset: index - window_start,
            window_len: WINDOW_LEN.min(total_days.saturating_sub(window_start)),
        }
    }

    /// Jours restants dans la fenêtre, jour courant compris.
    pub fn days_left_in_window(&self) -> usize {
        self.window_len.saturating_sub(self.offset)
    }
}

/// Repos déjà accordés à un employé.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestLedger {
    pub total: u32,
    pub in_window: u32,
}

/// Règle décidant si un jour de repos est dû.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RestPolicy {
    /// `(jour / 7) * per_window > repos cumulés` : le seuil grimpe à chaque
    /// fenêtre écoulée et le compteur n'est jamais remis à zéro.
    Ratchet { per_window: u32 },
    /// `per_window` repos par fenêtre, imposés quand les jours restants de la
    /// fenêtre ne suffisent plus à les placer.
    PerWindow { per_window: u32 },
}

impl Default for RestPolicy {
    fn default() -> Self {
        RestPolicy::Ratchet { per_window: 2 }
    }
}

impl RestPolicy {
    pub fn owes_rest(&self, day: DayPosition, ledger: RestLedger) -> bool {
        match *self {
            RestPolicy::Ratchet { per_window } => {
                (day.window as u32).saturating_mul(per_window) > ledger.total
            }
            RestPolicy::PerWindow { per_window } => {
                let due = per_window.saturating_sub(ledger.in_window) as usize;
                due > 0 && day.days_left_in_window() <= due
            }
        }
    }
}
