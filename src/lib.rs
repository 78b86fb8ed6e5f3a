// Export modules for library usage
pub mod builders;
pub mod config;
pub mod core;
pub mod errors;
pub mod risk;
pub mod skills;
pub mod taxonomy;

// Re-export commonly used types
pub use crate::core::{
    EmergingSkill, EmployeeRecord, FactorKind, RawSkills, RiskAssessment, RiskFactor, RiskLevel,
    RiskSummary, SkillDistributionEntry, SkillGap,
};

pub use crate::config::{
    get_config, load_config, FactorWeights, MarketSalaryTable, PromotionThresholds,
    RiskThresholds, SkillBenchmark, TalentmapConfig, TenureThresholds,
};

pub use crate::errors::{Result, TalentmapError};

pub use crate::risk::{aggregate_score, BatchAssessment, BatchFailure, RiskAnalyzer};

pub use crate::skills::{EmployeeSkillProfile, SkillProfileAnalyzer, TeamSkillAnalysis};

pub use crate::taxonomy::{
    CanonicalSkill, MatchMethod, SkillCategory, SkillTaxonomy, FUZZY_ACCEPT_THRESHOLD,
};

pub use crate::builders::{TeamSummary, TeamSummaryBuilder};
