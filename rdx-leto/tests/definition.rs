use leto::config::{CalendarChoice, LetoConfig};
use leto::definition::load_calendar;
use leto::prelude::*;
use std::path::{Path, PathBuf};

fn calendar_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("calendars")
        .join(name)
}

#[test]
fn egyptian_year_ends_with_epagomenae() {
    let calendar = load_calendar(&calendar_file("egyptian.toml")).unwrap();
    assert_eq!(calendar.check_correctness(), None);

    let last_month = calendar.decompose(359).unwrap();
    assert_eq!(last_month[1].number(), 11);
    assert_eq!(last_month[1].structure().unwrap().name(), "month");

    let epagomenal = calendar.decompose(362).unwrap();
    assert_eq!(epagomenal[1].number(), 12);
    assert_eq!(epagomenal[1].structure().unwrap().name(), "epagomenae");
    assert_eq!(epagomenal[1].start_at_days_after_epoch(), Some(360));
    assert_eq!(epagomenal[0].number(), 2);

    let next_year = calendar.decompose(365).unwrap();
    assert_eq!(next_year[2].number(), 1);
    assert_eq!(next_year[1].absolute_number(), 13);
    assert_eq!(next_year[1].number(), 0);
}

#[test]
fn custom_calendar_from_config() {
    let config = LetoConfig {
        calendar: CalendarChoice::Custom {
            path: calendar_file("cycles.toml"),
        },
        ..LetoConfig::default()
    };
    let calendar = config.calendar().unwrap();
    assert_eq!(calendar.name(), "cycles");
    let names: Vec<&str> = calendar.period_types().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["day", "month", "year", "cycle", "era"]);
}

#[test]
fn missing_file_is_an_error() {
    assert!(load_calendar(&calendar_file("atlantean.toml")).is_err());
}

#[test]
fn synthetic_periods_from_a_loaded_calendar() {
    let calendar = load_calendar(&calendar_file("cycles.toml")).unwrap();
    let year = calendar.period_type_by_name("year").unwrap();
    let month = calendar.period_type_by_name("month").unwrap();
    let day = calendar.period_type_by_name("day").unwrap();
    let periods = vec![
        Period::synthetic(&calendar, day.id(), day.structures()[0], 12).unwrap(),
        Period::synthetic(&calendar, month.id(), month.structures()[0], 7).unwrap(),
        Period::synthetic(&calendar, year.id(), year.structures()[0], 3).unwrap(),
    ];
    assert_eq!(recompose(&periods).unwrap(), 12 + 7 * 30 + 3 * 360);
    assert_eq!(periods[2].to_string(), "year 3");
    assert_eq!(periods[2].start_at_days_after_epoch(), None);
}
