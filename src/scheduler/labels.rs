use super::availability::{Availability, OffReason, StreakState, WindowDraw};
use super::policy::DayPosition;
use super::ScheduleOptions;
use crate::calendar::WINDOW_LEN;
use crate::model::{Employee, ShiftLabel};
use chrono::NaiveDate;

impl StreakState {
    /// Fixe l'étiquette du jour une fois la sélection connue et met à jour le suivi.
    ///
    /// Non sélectionné : heures sup. (une seule fois, après le seuil), puis repos
    /// imposé par la série, puis congé, puis l'étiquette d'inactivité.
    pub(super) fn settle(
        &mut self,
        day: DayPosition,
        availability: Availability,
        selected: bool,
        opts: &ScheduleOptions,
    ) -> ShiftLabel {
        if selected {
            self.streak += 1;
            // Plafond atteint : ce jour consomme le droit aux heures sup.
            return match availability {
                Availability::Available { overtime: true } => {
                    self.overtime_used = true;
                    ShiftLabel::Overtime
                }
                _ => ShiftLabel::Work,
            };
        }

        let label = if !self.overtime_used && day.index > opts.overtime_after_day {
            self.overtime_used = true;
            ShiftLabel::Overtime
        } else if self.streak >= opts.max_streak {
            ShiftLabel::MandatoryRest
        } else if availability == Availability::Off(OffReason::Vacation) {
            ShiftLabel::Vacation
        } else {
            opts.idle_label
        };
        self.streak = 0;
        label
    }
}

/// Étiquettes d'un employé en mode échantillonnage : congé, puis heures sup.
/// (prioritaires sur le repos tiré le même jour), puis repos, sinon travail.
pub(super) fn label_sampled(
    employee: &Employee,
    dates: &[NaiveDate],
    draws: &[Option<WindowDraw>],
) -> Vec<ShiftLabel> {
    dates
        .iter()
        .enumerate()
        .map(|(idx, date)| {
            if employee.on_vacation(*date) {
                return ShiftLabel::Vacation;
            }
            match draws.get(idx / WINDOW_LEN).and_then(Option::as_ref) {
                Some(draw) if draw.overtime == Some(idx) => ShiftLabel::Overtime,
                Some(draw) if draw.rest.contains(&idx) => ShiftLabel::MandatoryRest,
                _ => ShiftLabel::Work,
            }
        })
        .collect()
}
