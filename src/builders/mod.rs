pub mod team_summary;

pub use team_summary::{TeamSummary, TeamSummaryBuilder};
