#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::{partition, Calendar, SchedError};

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, day).unwrap()
}

#[test]
fn end_must_follow_start() {
    assert!(matches!(
        Calendar::new(d(6, 9), d(6, 9)),
        Err(SchedError::InvalidRange)
    ));
    assert!(matches!(
        Calendar::new(d(6, 9), d(6, 1)),
        Err(SchedError::InvalidRange)
    ));
}

#[test]
fn windows_cover_the_calendar_in_order() {
    // 2025-06-25 .. 2025-07-11, across a month boundary
    let cal = Calendar::new(d(6, 25), d(7, 11)).unwrap();
    let dates = cal.dates();
    assert_eq!(dates.len(), 17);
    assert_eq!(cal.len(), 17);

    let windows = partition(&dates);
    let lens: Vec<usize> = windows.iter().map(|w| w.len()).collect();
    assert_eq!(lens, vec![7, 7, 3]);

    let joined: Vec<NaiveDate> = windows.iter().flat_map(|w| w.dates.iter().copied()).collect();
    assert_eq!(joined, dates);

    assert_eq!(windows[2].index, 2);
    assert_eq!(windows[2].offset, 14);
    assert_eq!(windows[2].day_indices(), 14..17);
    assert_eq!(windows[2].last_day_index(), Some(16));
}

#[test]
fn exact_weeks_have_no_short_tail() {
    let cal = Calendar::new(d(6, 9), d(7, 6)).unwrap();
    let dates = cal.dates();
    let windows = partition(&dates);
    assert_eq!(windows.len(), 4);
    assert!(windows.iter().all(|w| w.len() == 7));
}

#[test]
fn empty_input_gives_no_window() {
    assert!(partition(&[]).is_empty());
}
