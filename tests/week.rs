use chrono::{Datelike, Days, NaiveDate, Weekday};
use vantix_planner::domain::week::{WeekBoundsError, WeekRange, week_of};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_iso_reference_values() {
    let cases = [
        (date(2021, 1, 1), date(2020, 12, 28), 53, 2020),
        (date(2024, 12, 30), date(2024, 12, 30), 1, 2025),
        (date(2024, 3, 16), date(2024, 3, 11), 11, 2024),
        (date(2026, 1, 4), date(2025, 12, 29), 1, 2026),
        (date(2027, 1, 1), date(2026, 12, 28), 53, 2026),
    ];

    for (day, monday, iso_week, iso_year) in cases {
        let info = week_of(day);
        assert_eq!(info.monday, monday, "{day}");
        assert_eq!(info.sunday, monday + Days::new(6), "{day}");
        assert_eq!(info.iso_week, iso_week, "{day}");
        assert_eq!(info.iso_year, iso_year, "{day}");
    }
}

#[test]
fn test_week_of_is_idempotent_on_mondays() {
    let mut day = date(2019, 12, 1);
    while day < date(2021, 2, 1) {
        let info = week_of(day);
        assert_eq!(info.monday.weekday(), Weekday::Mon);
        assert!(info.monday <= day && day <= info.sunday);
        assert_eq!(week_of(info.monday), info);
        day = day + Days::new(1);
    }
}

#[test]
fn test_operating_week_bounds() {
    let week = WeekRange::containing(date(2024, 3, 17));
    assert_eq!(week.week_start, date(2024, 3, 11));
    assert_eq!(week.week_end, date(2024, 3, 16));
    assert!(week.contains(date(2024, 3, 16)));
    assert!(!week.contains(date(2024, 3, 17)));
    assert_eq!(week.days().count(), 6);

    assert_eq!(
        WeekRange::from_bounds(date(2024, 3, 12), date(2024, 3, 17)),
        Err(WeekBoundsError::NotMonday(date(2024, 3, 12)))
    );
    assert!(WeekRange::from_bounds(date(2024, 3, 11), date(2024, 3, 16)).is_ok());
}

#[test]
fn test_offsets_keep_iso_numbers_consistent() {
    let base = WeekRange::containing(date(2020, 12, 2));
    for offset in -60..60 {
        let week = base.offset(offset).unwrap();
        let info = week_of(week.week_start);
        assert_eq!(week.iso_week, info.iso_week);
        assert_eq!(week.week_start.iso_week().week(), info.iso_week);
    }
}
