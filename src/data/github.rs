use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::{DateInput, parse_iso_date};
use crate::error::{ChartError, ChartResult};

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

pub const CONTRIBUTIONS_QUERY: &str = r"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
";

/// Contribution total of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionWeek {
    contribution_days: Vec<ContributionDayNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionDayNode {
    date: String,
    contribution_count: u32,
}

/// Extracts per-day counts from a contributions GraphQL response body.
///
/// Days come back in calendar order, flattened across weeks.
pub fn parse_contribution_calendar(body: &str) -> ChartResult<Vec<ContributionDay>> {
    let response: GraphqlResponse = serde_json::from_str(body).map_err(|e| {
        ChartError::Dataset(format!("failed to parse contributions response: {e}"))
    })?;

    if let Some(error) = response.errors.first() {
        return Err(ChartError::Dataset(format!(
            "contributions query failed: {}",
            error.message
        )));
    }

    let user = response
        .data
        .and_then(|data| data.user)
        .ok_or_else(|| ChartError::Dataset("contributions response has no user".to_owned()))?;

    user.contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| {
            Ok(ContributionDay {
                date: parse_iso_date(&day.date)?,
                count: day.contribution_count,
            })
        })
        .collect()
}

/// Splits contribution days into calendar pipeline inputs.
#[must_use]
pub fn contribution_observations(days: &[ContributionDay]) -> (Vec<DateInput>, Vec<f64>) {
    days.iter()
        .map(|day| (DateInput::from(day.date), f64::from(day.count)))
        .unzip()
}

#[cfg(feature = "github")]
pub use client::GithubContributionsClient;

#[cfg(feature = "github")]
mod client {
    use std::time::Duration;

    use chrono::DateTime;
    use serde_json::json;
    use tracing::debug;

    use super::{CONTRIBUTIONS_QUERY, ContributionDay, GITHUB_GRAPHQL_URL};
    use crate::error::{ChartError, ChartResult};

    /// Blocking client for the contributions calendar of a GitHub user.
    #[derive(Debug, Clone)]
    pub struct GithubContributionsClient {
        http: reqwest::blocking::Client,
        token: String,
        endpoint: String,
    }

    impl GithubContributionsClient {
        /// Fails with `Unauthorized` for an empty or blank token.
        pub fn new(token: impl Into<String>) -> ChartResult<Self> {
            let token = token.into();
            if token.trim().is_empty() {
                return Err(ChartError::Unauthorized("invalid github_token".to_owned()));
            }
            let http = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(12))
                .user_agent(concat!("daychart-rs/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Self {
                http,
                token,
                endpoint: GITHUB_GRAPHQL_URL.to_owned(),
            })
        }

        /// Points the client at another GraphQL endpoint (e.g. GitHub Enterprise).
        #[must_use]
        pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
            self.endpoint = endpoint.into();
            self
        }

        #[must_use]
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }

        /// Fetches daily counts between two ISO-8601 instants such as
        /// `2024-01-01T00:00:00Z`.
        pub fn fetch(
            &self,
            username: &str,
            from: &str,
            to: &str,
        ) -> ChartResult<Vec<ContributionDay>> {
            for (name, instant) in [("from", from), ("to", to)] {
                DateTime::parse_from_rfc3339(instant).map_err(|e| {
                    ChartError::InvalidData(format!("`{name}` must be an ISO-8601 instant: {e}"))
                })?;
            }

            let payload = json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": { "login": username, "from": from, "to": to },
            });
            let body = self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.token)
                .json(&payload)
                .send()?
                .error_for_status()?
                .text()?;

            let days = super::parse_contribution_calendar(&body)?;
            debug!(username, days = days.len(), "github contributions fetched");
            Ok(days)
        }
    }
}
