use chrono::NaiveDate;
use daychart_rs::ChartError;
use daychart_rs::core::DateInput;
use daychart_rs::data::{ContributionDay, contribution_observations, parse_contribution_calendar};

const SAMPLE_BODY: &str = r#"{
  "data": {
    "user": {
      "contributionsCollection": {
        "contributionCalendar": {
          "totalContributions": 9,
          "weeks": [
            { "contributionDays": [
              { "date": "2024-01-06", "contributionCount": 2 }
            ] },
            { "contributionDays": [
              { "date": "2024-01-07", "contributionCount": 0 },
              { "date": "2024-01-08", "contributionCount": 7 }
            ] }
          ]
        }
      }
    }
  }
}"#;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn contribution_days_are_flattened_in_order() {
    let days = parse_contribution_calendar(SAMPLE_BODY).expect("parse");
    assert_eq!(
        days,
        vec![
            ContributionDay {
                date: ymd(2024, 1, 6),
                count: 2
            },
            ContributionDay {
                date: ymd(2024, 1, 7),
                count: 0
            },
            ContributionDay {
                date: ymd(2024, 1, 8),
                count: 7
            },
        ]
    );

    let (dates, values) = contribution_observations(&days);
    assert_eq!(dates[2], DateInput::Date(ymd(2024, 1, 8)));
    assert_eq!(values, vec![2.0, 0.0, 7.0]);
}

#[test]
fn graphql_errors_and_missing_users_are_dataset_errors() {
    let err = parse_contribution_calendar(
        r#"{"data": null, "errors": [{"message": "Could not resolve to a User"}]}"#,
    )
    .expect_err("graphql error");
    assert!(matches!(err, ChartError::Dataset(message) if message.contains("Could not resolve")));

    let err = parse_contribution_calendar(r#"{"data": {"user": null}}"#).expect_err("no user");
    assert!(matches!(err, ChartError::Dataset(_)));

    let err = parse_contribution_calendar("<html>").expect_err("not json");
    assert!(matches!(err, ChartError::Dataset(_)));
}

#[test]
fn malformed_contribution_dates_are_rejected() {
    let body = SAMPLE_BODY.replace("2024-01-07", "2024-1-7");
    let err = parse_contribution_calendar(&body).expect_err("bad date");
    assert!(matches!(err, ChartError::InvalidDateFormat(_)));
}

#[cfg(feature = "github")]
mod client {
    use daychart_rs::ChartError;
    use daychart_rs::data::{GITHUB_GRAPHQL_URL, GithubContributionsClient};

    #[test]
    fn empty_token_is_unauthorized() {
        for token in ["", "   "] {
            let err = GithubContributionsClient::new(token).expect_err("blank token");
            assert!(matches!(
                err,
                ChartError::Unauthorized(message) if message == "invalid github_token"
            ));
        }
    }

    #[test]
    fn instants_are_checked_before_any_request() {
        let client = GithubContributionsClient::new("token")
            .expect("client")
            .with_endpoint("http://127.0.0.1:9/graphql");
        assert_ne!(client.endpoint(), GITHUB_GRAPHQL_URL);

        let err = client
            .fetch("octocat", "2024-01-01", "2024-12-31T23:59:59Z")
            .expect_err("date without time");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
}
