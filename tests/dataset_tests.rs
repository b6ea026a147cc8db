use chrono::{Datelike, NaiveDate};
use daychart_rs::{ChartError, Viewport};
use daychart_rs::api::{CalendarConfig, calendar};
use daychart_rs::data::{SAMPLE_DATASET_ROWS, load_sample_dataset, read_observations_csv};
use daychart_rs::render::RenderFrame;

#[test]
fn bundled_sample_covers_2024() {
    let table = load_sample_dataset().expect("sample");
    assert_eq!(table.len(), SAMPLE_DATASET_ROWS);
    assert!(table.dates.iter().all(|date| date.year() == 2024));
    assert!(table.values.iter().all(|value| value.is_finite() && *value >= 0.0));
    assert!(table.dates.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn bundled_sample_draws_a_full_year() {
    let table = load_sample_dataset().expect("sample");
    let config = CalendarConfig::default()
        .with_date_range(Some("2024-01-01".into()), Some("2024-12-31".into()))
        .with_legend(4);
    let mut frame = RenderFrame::new(Viewport::new(900, 200));
    let plot = calendar(&mut frame, &table.date_inputs(), &table.values, &config).expect("draw");

    assert_eq!(plot.days.len(), 366);
    assert_eq!(plot.total_weeks, 53);
    assert_eq!(plot.month_starts.len(), 12);
}

#[test]
fn csv_reader_trims_fields_and_reports_lines() {
    let input = "dates, values\n2024-03-01, 2\n 2024-03-02 ,3.5\n";
    let table = read_observations_csv(input.as_bytes()).expect("csv");
    assert_eq!(
        table.dates,
        vec![
            NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"),
            NaiveDate::from_ymd_opt(2024, 3, 2).expect("date"),
        ]
    );
    assert_eq!(table.values, vec![2.0, 3.5]);

    let err = read_observations_csv("dates,values\n2024-03-01,1\n03/02/2024,2\n".as_bytes())
        .expect_err("bad date");
    assert!(matches!(err, ChartError::Dataset(message) if message.contains("line 3")));

    let err = read_observations_csv("dates,values\n2024-03-01,lots\n".as_bytes())
        .expect_err("bad value");
    assert!(matches!(err, ChartError::Dataset(_)));
}

#[test]
fn header_only_csv_is_an_empty_table() {
    let table = read_observations_csv("dates,values\n".as_bytes()).expect("csv");
    assert!(table.is_empty());
}
