use super::availability::{self, StreakState};
use super::policy::DayPosition;
use super::{coverage, labels, Scheduler};
use crate::calendar::{partition, Calendar};
use crate::model::{Roster, ShiftLabel, Tier};
use crate::schedule::{Schedule, ScheduleRow};
use rand::Rng;

fn blank_rows(roster: &Roster, days: usize) -> Vec<ScheduleRow> {
    roster
        .employees
        .iter()
        .map(|e| ScheduleRow {
            employee: e.id.clone(),
            tier: e.tier,
            labels: vec![ShiftLabel::Blank; days],
            availability: Vec::new(),
        })
        .collect()
}

/// Parcours unique jour par jour : disponibilité, sélection puis étiquetage,
/// avec un état de suivi par employé principal.
pub(super) fn role_coverage<R: Rng + ?Sized>(
    scheduler: &Scheduler,
    calendar: &Calendar,
    roster: &Roster,
    rng: &mut R,
) -> Schedule {
    let opts = &scheduler.options;
    let dates = calendar.dates();
    let primaries = roster.indices_of(Tier::Primary);
    let secondaries = roster.indices_of(Tier::Secondary);

    let mut rows = blank_rows(roster, dates.len());
    for &idx in &primaries {
        rows[idx].availability = vec![false; dates.len()];
    }
    let mut states = vec![StreakState::default(); roster.len()];

    for (day, date) in dates.iter().enumerate() {
        let pos = DayPosition::at(day, dates.len());

        let resolved: Vec<_> = primaries
            .iter()
            .map(|&idx| {
                let on_vacation = roster.employees[idx].on_vacation(*date);
                (idx, states[idx].resolve(pos, on_vacation, opts))
            })
            .collect();
        let available: Vec<usize> = resolved
            .iter()
            .filter(|(_, a)| a.is_available())
            .map(|(idx, _)| *idx)
            .collect();

        let requirement = scheduler.staffing.for_date(*date);
        let selection =
            coverage::select_day(roster, &available, &secondaries, requirement, rng);

        for (idx, availability) in resolved {
            let selected = selection.primary.contains(&idx);
            rows[idx].labels[day] = states[idx].settle(pos, availability, selected, opts);
            rows[idx].availability[day] = availability.is_available();
        }
        for &idx in &selection.secondary {
            rows[idx].labels[day] = ShiftLabel::Work;
        }

        if selection.len() < requirement.headcount {
            tracing::debug!(
                %date,
                selected = selection.len(),
                required = requirement.headcount,
                "understaffed day"
            );
        }
    }

    Schedule {
        mode: opts.mode,
        dates,
        rows,
    }
}

/// Tirage des repos fenêtre par fenêtre, employé par employé. Les secondaires
/// restent vides.
pub(super) fn sampling<R: Rng + ?Sized>(
    scheduler: &Scheduler,
    calendar: &Calendar,
    roster: &Roster,
    rng: &mut R,
) -> Schedule {
    let opts = &scheduler.options;
    let dates = calendar.dates();
    let windows = partition(&dates);

    let mut rows = blank_rows(roster, dates.len());
    for (row, employee) in rows.iter_mut().zip(&roster.employees) {
        if !employee.is_primary() {
            continue;
        }
        let draws = availability::draw_windows(employee, &windows, opts, rng);
        row.labels = labels::label_sampled(employee, &dates, &draws);
    }

    Schedule {
        mode: opts.mode,
        dates,
        rows,
    }
}
