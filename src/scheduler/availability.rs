use super::policy::{DayPosition, RestLedger};
use super::ScheduleOptions;
use crate::calendar::Window;
use crate::model::Employee;
use rand::seq::{index, IndexedRandom};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OffReason {
    Vacation,
    RestQuota,
    StreakCap,
}

/// Disponibilité d'un employé principal pour un jour donné.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Availability {
    Off(OffReason),
    /// `overtime` : la série atteint le plafond, seul le droit aux heures
    /// supplémentaires rend le jour disponible.
    Available { overtime: bool },
}

impl Availability {
    pub(super) fn is_available(self) -> bool {
        matches!(self, Availability::Available { .. })
    }
}

/// Suivi d'un employé principal sur tout l'horizon (jamais remis à zéro par fenêtre,
/// sauf le compteur de repos de la fenêtre courante).
#[derive(Debug, Clone, Default)]
pub(super) struct StreakState {
    pub(super) streak: u32,
    pub(super) rest: RestLedger,
    pub(super) overtime_used: bool,
    window: usize,
}

impl StreakState {
    /// Décide la disponibilité du jour, avant sélection. La série n'est remise à
    /// zéro qu'à l'étiquetage, pour que le repos imposé reste visible.
    pub(super) fn resolve(
        &mut self,
        day: DayPosition,
        on_vacation: bool,
        opts: &ScheduleOptions,
    ) -> Availability {
        if day.window != self.window {
            self.window = day.window;
            self.rest.in_window = 0;
        }

        if on_vacation {
            return Availability::Off(OffReason::Vacation);
        }
        if opts.rest_policy.owes_rest(day, self.rest) {
            self.grant_rest();
            return Availability::Off(OffReason::RestQuota);
        }
        if self.streak >= opts.max_streak {
            if !self.overtime_used && day.index > opts.overtime_after_day {
                return Availability::Available { overtime: true };
            }
            self.grant_rest();
            return Availability::Off(OffReason::StreakCap);
        }
        Availability::Available { overtime: false }
    }

    fn grant_rest(&mut self) {
        self.rest.total += 1;
        self.rest.in_window += 1;
    }
}

/// Tirage d'une fenêtre en mode échantillonnage (indices de jour absolus).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct WindowDraw {
    pub(super) rest: Vec<usize>,
    pub(super) overtime: Option<usize>,
}

/// Tire, pour un employé, les repos de chaque fenêtre et son unique jour
/// d'heures supplémentaires. `None` : fenêtre sans repos (trop de congés).
///
/// La fenêtre des heures sup. est choisie parmi celles qui ont un jour ouvert
/// au-delà du seuil ; le jour retenu est le premier repos tiré après le seuil,
/// à défaut un jour ouvert tiré après le seuil.
pub(super) fn draw_windows<R: Rng + ?Sized>(
    employee: &Employee,
    windows: &[Window<'_>],
    opts: &ScheduleOptions,
    rng: &mut R,
) -> Vec<Option<WindowDraw>> {
    let wanted = opts.rest_days_per_window;
    let open: Vec<Vec<usize>> = windows
        .iter()
        .map(|w| {
            w.day_indices()
                .zip(w.dates)
                .filter(|(_, date)| !employee.on_vacation(**date))
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();

    let eligible: Vec<usize> = windows
        .iter()
        .zip(&open)
        .filter(|(_, days)| days.len() >= wanted.max(1))
        .filter(|(_, days)| days.iter().any(|&idx| idx > opts.overtime_after_day))
        .map(|(w, _)| w.index)
        .collect();
    let overtime_window = eligible.choose(rng).copied();

    windows
        .iter()
        .zip(&open)
        .map(|(w, days)| {
            if days.len() < wanted.max(1) {
                return None;
            }

            let rest: Vec<usize> = index::sample(rng, days.len(), wanted)
                .iter()
                .map(|k| days[k])
                .collect();
            let overtime = if overtime_window == Some(w.index) {
                rest.iter()
                    .copied()
                    .find(|&idx| idx > opts.overtime_after_day)
                    .or_else(|| {
                        let late: Vec<usize> = days
                            .iter()
                            .copied()
                            .filter(|&idx| idx > opts.overtime_after_day)
                            .collect();
                        late.choose(rng).copied()
                    })
            } else {
                None
            };
            Some(WindowDraw { rest, overtime })
        })
        .collect()
}
