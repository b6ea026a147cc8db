use chrono::NaiveDate;
use daychart_rs::ChartError;
use daychart_rs::core::{DateValueMap, date_inputs, validate_observation_shape, value_extent};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn duplicate_dates_are_summed() {
    let dates = date_inputs(&["2024-01-02", "2024-01-01", "2024-01-02", "2024-01-02"]);
    let map = DateValueMap::from_observations(&dates, &[1.0, 5.0, 2.5, -0.5]).expect("aggregate");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(ymd(2024, 1, 1)), Some(5.0));
    assert_eq!(map.get(ymd(2024, 1, 2)), Some(3.0));
    assert_eq!(map.get(ymd(2024, 1, 3)), None);
    assert_eq!(map.first_date(), Some(ymd(2024, 1, 1)));
    assert_eq!(map.last_date(), Some(ymd(2024, 1, 2)));
    assert_eq!(map.value_extent(), Some((3.0, 5.0)));
}

#[test]
fn iteration_is_in_date_order() {
    let dates = date_inputs(&["2024-03-01", "2023-12-31", "2024-01-15"]);
    let map = DateValueMap::from_observations(&dates, &[1.0, 2.0, 3.0]).expect("aggregate");
    let order: Vec<NaiveDate> = map.iter().map(|(date, _)| *date).collect();
    assert_eq!(order, vec![ymd(2023, 12, 31), ymd(2024, 1, 15), ymd(2024, 3, 1)]);
}

#[test]
fn length_mismatch_is_reported_before_emptiness() {
    let err = DateValueMap::from_observations(&[], &[1.0]).expect_err("mismatch");
    assert!(matches!(
        err,
        ChartError::LengthMismatch {
            dates: 0,
            values: 1
        }
    ));

    let err = validate_observation_shape(0, 0).expect_err("empty");
    assert!(matches!(err, ChartError::EmptyInput));
    assert!(validate_observation_shape(3, 3).is_ok());
}

#[test]
fn non_finite_values_and_bad_dates_are_rejected() {
    let dates = date_inputs(&["2024-01-01", "2024-01-02"]);
    let err = DateValueMap::from_observations(&dates, &[1.0, f64::NAN]).expect_err("nan");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let dates = date_inputs(&["2024-01-01", "01/02/2024"]);
    let err = DateValueMap::from_observations(&dates, &[1.0, 2.0]).expect_err("bad date");
    assert!(matches!(err, ChartError::InvalidDateFormat(text) if text == "01/02/2024"));
}

#[test]
fn from_pairs_requires_at_least_one_pair() {
    let err = DateValueMap::from_pairs(Vec::<(NaiveDate, f64)>::new()).expect_err("empty");
    assert!(matches!(err, ChartError::EmptyInput));

    let map = DateValueMap::from_pairs([(ymd(2024, 5, 1), 2.0), (ymd(2024, 5, 1), 3.0)])
        .expect("pairs");
    assert_eq!(map.get(ymd(2024, 5, 1)), Some(5.0));
}

#[test]
fn value_extent_finds_both_ends_in_one_pass() {
    assert_eq!(value_extent([3.0, -1.5, 2.0, -1.5]), Some((-1.5, 3.0)));
    assert_eq!(value_extent([4.0]), Some((4.0, 4.0)));
    assert_eq!(value_extent(Vec::<f64>::new()), None);
}
