mod github;
mod sample;

#[cfg(feature = "github")]
pub use github::GithubContributionsClient;
pub use github::{
    CONTRIBUTIONS_QUERY, ContributionDay, GITHUB_GRAPHQL_URL, contribution_observations,
    parse_contribution_calendar,
};
pub use sample::{
    ObservationTable, SAMPLE_DATASET_ROWS, load_sample_dataset, read_observations_csv,
};
