use chrono::{Datelike, NaiveDate};
use daychart_rs::ChartError;
use daychart_rs::core::{
    DateInput, DateValueMap, DisplayRange, GridCoordinate, WeekGrid, WeekStart, date_inputs,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn grid(start: NaiveDate, end: NaiveDate, week_start: WeekStart) -> WeekGrid {
    WeekGrid::new(DisplayRange::new(start, end), week_start).expect("grid")
}

#[test]
fn monday_week_starting_on_monday_fills_one_column() {
    // 2024-01-01 is a Monday.
    let grid = grid(ymd(2024, 1, 1), ymd(2024, 1, 7), WeekStart::Monday);
    let coordinates: Vec<GridCoordinate> = grid.cells().map(|(_, c)| c).collect();

    assert_eq!(grid.start_row(), 0);
    assert_eq!(grid.total_weeks(), 1);
    assert_eq!(
        coordinates,
        (0..7).map(|row| GridCoordinate::new(0, row)).collect::<Vec<_>>()
    );
}

#[test]
fn sunday_start_moves_the_trailing_sunday_to_a_new_column() {
    let grid = grid(ymd(2024, 1, 1), ymd(2024, 1, 7), WeekStart::Sunday);

    assert_eq!(grid.start_row(), 1);
    assert_eq!(grid.total_weeks(), 2);
    assert_eq!(
        grid.coordinate(ymd(2024, 1, 1)),
        Some(GridCoordinate::new(0, 1))
    );
    assert_eq!(
        grid.coordinate(ymd(2024, 1, 6)),
        Some(GridCoordinate::new(0, 6))
    );
    assert_eq!(
        grid.coordinate(ymd(2024, 1, 7)),
        Some(GridCoordinate::new(1, 0))
    );
    assert_eq!(grid.coordinate(ymd(2024, 1, 8)), None);
}

#[test]
fn single_day_range_has_one_cell() {
    let day = ymd(2024, 5, 15); // Wednesday
    let grid = grid(day, day, WeekStart::Sunday);
    let cells: Vec<_> = grid.cells().collect();

    assert_eq!(grid.total_weeks(), 1);
    assert_eq!(cells, vec![(day, GridCoordinate::new(0, 3))]);
}

#[test]
fn inverted_range_is_rejected() {
    let err = WeekGrid::new(
        DisplayRange::new(ymd(2024, 2, 1), ymd(2024, 1, 31)),
        WeekStart::Sunday,
    )
    .expect_err("inverted");
    assert!(matches!(err, ChartError::InvertedDateRange { .. }));
}

#[test]
fn month_starts_report_their_columns() {
    let grid = grid(ymd(2024, 1, 1), ymd(2024, 12, 31), WeekStart::Sunday);
    let starts = grid.month_starts();

    assert_eq!(starts.len(), 12);
    assert_eq!(starts[0].date, ymd(2024, 1, 1));
    assert_eq!(starts[0].week_index, 0);
    // Feb 1 is 31 days after a Monday start on a Sunday-first grid.
    assert_eq!(starts[1].date, ymd(2024, 2, 1));
    assert_eq!(starts[1].week_index, 4);
    assert!(starts.windows(2).all(|pair| pair[0].week_index <= pair[1].week_index));
    assert_eq!(grid.total_weeks(), 53);
}

#[test]
fn month_starts_skip_a_partial_leading_month() {
    let grid = grid(ymd(2024, 1, 15), ymd(2024, 3, 10), WeekStart::Monday);
    let months: Vec<u32> = grid.month_starts().iter().map(|m| m.date.month()).collect();
    assert_eq!(months, vec![2, 3]);
}

#[test]
fn week_start_names_parse_case_insensitively() {
    assert_eq!("monday".parse::<WeekStart>().expect("lower"), WeekStart::Monday);
    assert_eq!(" SUNDAY ".parse::<WeekStart>().expect("upper"), WeekStart::Sunday);
    let err = "Mon".parse::<WeekStart>().expect_err("abbreviation");
    assert!(matches!(err, ChartError::InvalidWeekStart(day) if day == "Mon"));
}

#[test]
fn display_range_prefers_explicit_bounds() {
    let data = DateValueMap::from_observations(
        &date_inputs(&["2024-03-05", "2024-03-20"]),
        &[1.0, 2.0],
    )
    .expect("aggregate");

    let inferred = DisplayRange::resolve(&data, None, None).expect("inferred");
    assert_eq!(inferred, DisplayRange::new(ymd(2024, 3, 5), ymd(2024, 3, 20)));
    assert_eq!(inferred.day_count(), 16);

    let start = DateInput::from("2024-03-01");
    let explicit = DisplayRange::resolve(&data, Some(&start), None).expect("explicit");
    assert_eq!(explicit.start, ymd(2024, 3, 1));
    assert_eq!(explicit.end, ymd(2024, 3, 20));

    let late = DateInput::from("2024-04-01");
    let inverted = DisplayRange::resolve(&data, Some(&late), None).expect("resolves");
    assert!(inverted.is_inverted());
    assert_eq!(inverted.day_count(), 0);
}
