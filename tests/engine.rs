#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate};
use roulement::{
    Calendar, DailyRequirement, Employee, GlyphStyle, Mode, RestPolicy, Roster, Schedule,
    ScheduleOptions, Scheduler, ShiftLabel, Staffing, Tier,
};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 9).unwrap() + Duration::days(offset)
}

fn calendar(days: i64) -> Calendar {
    Calendar::new(day(0), day(days - 1)).unwrap()
}

fn scheduler(mode: Mode, requirement: DailyRequirement) -> Scheduler {
    let opts = ScheduleOptions {
        mode,
        ..ScheduleOptions::default()
    };
    Scheduler::new(opts, Staffing::uniform(requirement))
}

fn count(labels: &[ShiftLabel], wanted: ShiftLabel) -> usize {
    labels.iter().filter(|l| **l == wanted).count()
}

fn render(schedule: &Schedule, name: &str) -> String {
    schedule
        .row(name)
        .unwrap()
        .labels
        .iter()
        .map(|l| GlyphStyle::Rich.glyph(*l))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Roster d'un restaurant : 12 titulaires, 7 renforts.
fn restaurant() -> Roster {
    let tags = |name: &str| -> Vec<&'static str> {
        let mut out = Vec::new();
        if ["Mark", "Bo", "Ten", "Sam", "Eason"].contains(&name) {
            out.push("supervisor");
        }
        if ["Mark", "Flora", "Sam", "Eason", "Luna"].contains(&name) {
            out.push("front-desk");
        }
        if ["Bo", "Ten", "Hunter", "Murray"].contains(&name) {
            out.push("kitchen");
        }
        if ["Ssumday", "Qiu", "Bendy", "Yin"].contains(&name) {
            out.push("kitchen-support");
        }
        out
    };
    let primaries = [
        "Mark", "Bo", "Ten", "Sam", "Eason", "Ssumday", "Flora", "Luna", "Qiu", "Bendy", "Kai",
        "Adam",
    ];
    let secondaries = ["Hunter", "Rosi", "Yu", "Yin", "Murray", "Wei", "Ruru"];

    let mut employees: Vec<Employee> = primaries
        .iter()
        .map(|n| Employee::new(n).with_roles(tags(n)))
        .collect();
    employees[1] = employees[1].clone().with_vacations([day(3), day(4), day(24)]);
    employees[6] = employees[6].clone().with_vacations((10..17).map(day));
    employees.extend(
        secondaries
            .iter()
            .map(|n| Employee::secondary(n).with_roles(tags(n))),
    );
    Roster::new(employees).unwrap()
}

#[test]
fn one_week_sampling_gives_two_mandatory_rests() {
    let roster = Roster::new(vec![Employee::new("alice")]).unwrap();
    let s = scheduler(Mode::Sampling, DailyRequirement::headcount(1));

    for seed in 0..20 {
        let schedule = s.generate_seeded(&calendar(7), &roster, seed).unwrap();
        let labels = &schedule.rows[0].labels;
        assert_eq!(count(labels, ShiftLabel::MandatoryRest), 2);
        assert_eq!(count(labels, ShiftLabel::Work), 5);
        assert_eq!(count(labels, ShiftLabel::Overtime), 0);
    }
}

#[test]
fn four_weeks_role_mode_grants_overtime_once_after_day_21() {
    let roster = Roster::new(vec![Employee::new("alice")]).unwrap();
    let s = Scheduler::default();
    let schedule = s.generate_seeded(&calendar(28), &roster, 11).unwrap();

    insta::assert_snapshot!(render(&schedule, "alice"), @"班 班 班 班 班 班 例休 例休 班 班 班 班 班 班 例休 例休 班 班 班 班 班 例休 加 班 班 班 班 班");

    let row = &schedule.rows[0];
    let overtime: Vec<usize> = row
        .labels
        .iter()
        .enumerate()
        .filter(|(_, l)| **l == ShiftLabel::Overtime)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(overtime, vec![22]);
    assert!(!row.availability[6] && !row.availability[7]);
    assert!(row.availability[24]);
}

#[test]
fn capped_streak_is_worked_as_overtime_then_rested() {
    let roster = Roster::new((0..3).map(|i| Employee::new(format!("e{i}"))).collect()).unwrap();
    let opts = ScheduleOptions {
        rest_policy: RestPolicy::Ratchet { per_window: 0 },
        ..ScheduleOptions::default()
    };
    let s = Scheduler::new(opts, Staffing::uniform(DailyRequirement::headcount(3)));
    let schedule = s.generate_seeded(&calendar(29), &roster, 3).unwrap();

    for row in &schedule.rows {
        for rest in [6, 13, 20, 28] {
            assert_eq!(row.labels[rest], ShiftLabel::MandatoryRest);
        }
        assert_eq!(count(&row.labels[21..27], ShiftLabel::Work), 6);
        assert_eq!(row.labels[27], ShiftLabel::Overtime);
        assert!(row.availability[27]);
        assert!(!row.availability[28]);
        assert_eq!(count(&row.labels, ShiftLabel::Overtime), 1);
    }

    let summary = schedule.summary();
    assert_eq!(summary.count_on(day(26)), Some(3));
    assert_eq!(summary.count_on(day(27)), Some(0));
}

#[test]
fn secondary_pool_backfills_an_empty_day() {
    let roster = Roster::new(vec![
        Employee::new("alice").with_vacations([day(0), day(1)]),
        Employee::secondary("p1"),
        Employee::secondary("p2"),
        Employee::secondary("p3"),
    ])
    .unwrap();
    let schedule = Scheduler::default()
        .generate_seeded(&calendar(2), &roster, 5)
        .unwrap();

    for name in ["p1", "p2", "p3"] {
        assert_eq!(schedule.label(name, day(0)), Some(ShiftLabel::Work));
    }
    assert_eq!(schedule.label("alice", day(0)), Some(ShiftLabel::Vacation));
    assert_eq!(schedule.summary().count_on(day(0)), Some(3));

    let shortfalls = schedule.summary().shortfalls(Scheduler::default().staffing());
    assert_eq!(shortfalls.len(), 2);
    assert_eq!(shortfalls[0].required, 5);
}

#[test]
fn the_only_supervisor_always_covers_the_role() {
    let roster = Roster::new(vec![
        Employee::new("a"),
        Employee::new("boss").with_roles(["supervisor"]),
        Employee::new("b"),
    ])
    .unwrap();
    let s = scheduler(
        Mode::RoleCoverage,
        DailyRequirement::headcount(1).with_role("supervisor"),
    );
    let schedule = s.generate_seeded(&calendar(3), &roster, 2).unwrap();

    let boss = &schedule.row("boss").unwrap().labels;
    assert!(boss.iter().all(|l| *l == ShiftLabel::Work));
    for name in ["a", "b"] {
        let labels = &schedule.row(name).unwrap().labels;
        assert!(labels.iter().all(|l| *l == ShiftLabel::MandatoryRest));
    }
}

#[test]
fn role_mode_invariants_hold_over_many_seeds() {
    let roster = restaurant();
    let cal = calendar(35);
    let s = Scheduler::default();

    for seed in 0..25 {
        let schedule = s.generate_seeded(&cal, &roster, seed).unwrap();
        let summary = schedule.summary();

        for (row, employee) in schedule.rows.iter().zip(&roster.employees) {
            if row.tier == Tier::Secondary {
                assert!(row
                    .labels
                    .iter()
                    .all(|l| matches!(l, ShiftLabel::Work | ShiftLabel::Blank)));
                continue;
            }

            assert!(count(&row.labels, ShiftLabel::Overtime) <= 1);
            assert!(row.labels[..22]
                .iter()
                .all(|l| *l != ShiftLabel::Overtime));

            let mut run = 0;
            for label in &row.labels {
                run = if *label == ShiftLabel::Work { run + 1 } else { 0 };
                assert!(run <= 6, "{} works {run} days in a row", row.employee);
            }

            for (idx, date) in schedule.dates.iter().enumerate() {
                if employee.on_vacation(*date) {
                    assert!(matches!(
                        row.labels[idx],
                        ShiftLabel::Vacation | ShiftLabel::Overtime | ShiftLabel::MandatoryRest
                    ));
                    assert!(!row.availability[idx]);
                }
            }
        }

        for (idx, daily) in summary.days.iter().enumerate() {
            let work = schedule.column(idx).filter(|l| *l == ShiftLabel::Work).count();
            assert_eq!(daily.working, work);
        }
    }
}

#[test]
fn fixed_seed_is_reproducible() {
    let roster = restaurant();
    let cal = calendar(28);
    for mode in [Mode::RoleCoverage, Mode::Sampling] {
        let s = scheduler(mode, DailyRequirement::default());
        let a = s.generate_seeded(&cal, &roster, 42).unwrap();
        let b = s.generate_seeded(&cal, &roster, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.summary(), b.summary());
    }
}

#[test]
fn sampling_respects_vacations_and_short_windows() {
    let roster = Roster::new(vec![
        Employee::new("away").with_vacations((0..6).map(day)),
        Employee::secondary("pt"),
    ])
    .unwrap();
    let s = scheduler(Mode::Sampling, DailyRequirement::headcount(1));
    let schedule = s.generate_seeded(&calendar(7), &roster, 8).unwrap();

    let away = &schedule.row("away").unwrap().labels;
    assert_eq!(count(away, ShiftLabel::Vacation), 6);
    assert_eq!(away[6], ShiftLabel::Work);
    assert!(schedule
        .row("pt")
        .unwrap()
        .labels
        .iter()
        .all(|l| *l == ShiftLabel::Blank));
}

#[test]
fn sampling_places_overtime_in_the_last_eligible_window() {
    let roster = Roster::new(vec![Employee::new("alice")]).unwrap();
    let s = scheduler(Mode::Sampling, DailyRequirement::headcount(1));

    for seed in 0..20 {
        let schedule = s.generate_seeded(&calendar(28), &roster, seed).unwrap();
        let labels = &schedule.rows[0].labels;
        for week in labels[..21].chunks(7) {
            assert_eq!(count(week, ShiftLabel::MandatoryRest), 2);
        }
        let last = &labels[21..];
        assert_eq!(count(last, ShiftLabel::Overtime), 1);
        assert_eq!(count(last, ShiftLabel::MandatoryRest), 1);
        assert_ne!(labels[21], ShiftLabel::Overtime);
    }
}

#[test]
fn sampling_overtime_survives_rest_draws_before_the_threshold() {
    let roster = Roster::new(vec![Employee::new("alice")]).unwrap();
    let opts = ScheduleOptions {
        mode: Mode::Sampling,
        overtime_after_day: 24,
        ..ScheduleOptions::default()
    };
    let s = Scheduler::new(opts, Staffing::uniform(DailyRequirement::headcount(1)));

    for seed in 0..20 {
        let schedule = s.generate_seeded(&calendar(28), &roster, seed).unwrap();
        let overtime: Vec<usize> = schedule.rows[0]
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == ShiftLabel::Overtime)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(overtime.len(), 1, "seed {seed}");
        assert!(overtime[0] > 24);
    }
}

#[test]
fn per_window_policy_spreads_two_rests_each_week() {
    let roster = Roster::new(vec![Employee::new("alice")]).unwrap();
    let opts = ScheduleOptions {
        rest_policy: RestPolicy::PerWindow { per_window: 2 },
        ..ScheduleOptions::default()
    };
    let s = Scheduler::new(opts, Staffing::uniform(DailyRequirement::headcount(1)));
    let schedule = s.generate_seeded(&calendar(14), &roster, 0).unwrap();

    insta::assert_snapshot!(render(&schedule, "alice"), @"班 班 班 班 班 例休 例休 班 班 班 班 班 例休 例休");
}

#[test]
fn idle_label_can_be_plain_rest() {
    let roster = Roster::new(vec![Employee::new("a"), Employee::new("b")]).unwrap();
    let opts = ScheduleOptions {
        idle_label: ShiftLabel::Rest,
        ..ScheduleOptions::default()
    };
    let s = Scheduler::new(opts, Staffing::uniform(DailyRequirement::headcount(1)));
    let schedule = s.generate_seeded(&calendar(5), &roster, 4).unwrap();

    for idx in 0..5 {
        let mut column: Vec<ShiftLabel> = schedule.column(idx).collect();
        column.sort_by_key(|l| *l == ShiftLabel::Work);
        assert_eq!(column, vec![ShiftLabel::Rest, ShiftLabel::Work]);
    }
}

#[test]
fn date_overrides_change_the_requirement() {
    let roster = Roster::new((0..4).map(|i| Employee::new(format!("e{i}"))).collect()).unwrap();
    let staffing = Staffing::uniform(DailyRequirement::headcount(1))
        .with_override(day(1), DailyRequirement::headcount(3));
    let s = Scheduler::new(ScheduleOptions::default(), staffing);
    let summary = s.generate_seeded(&calendar(3), &roster, 1).unwrap().summary();

    assert_eq!(summary.count_on(day(0)), Some(1));
    assert_eq!(summary.count_on(day(1)), Some(3));
    assert_eq!(summary.count_on(day(2)), Some(1));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = Roster::new(vec![Employee::new("x"), Employee::secondary("x")]).unwrap_err();
    assert!(err.to_string().contains("duplicate employee"));
}
