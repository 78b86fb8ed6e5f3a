use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw skill input as it arrives from upstream loaders: either a list of
/// free-text tokens or a single comma-delimited string.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawSkills {
    List(Vec<String>),
    Text(String),
}

impl Default for RawSkills {
    fn default() -> Self {
        RawSkills::List(Vec::new())
    }
}

impl RawSkills {
    /// Trimmed, non-empty tokens in input order. Case is preserved; callers
    /// that need normalized text lowercase downstream.
    pub fn tokens(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            RawSkills::List(items) => items.iter().map(String::as_str).collect(),
            RawSkills::Text(text) => text.split(',').collect(),
        };
        raw.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

impl From<Vec<String>> for RawSkills {
    fn from(items: Vec<String>) -> Self {
        RawSkills::List(items)
    }
}

impl From<&[&str]> for RawSkills {
    fn from(items: &[&str]) -> Self {
        RawSkills::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Normalized employee record, produced by upstream loaders. The engine
/// never mutates it; every optional field degrades to a documented neutral
/// value during scoring instead of erroring.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    /// 1-5 scale
    pub performance_rating: Option<f64>,
    /// 1-5 scale
    pub engagement_score: Option<f64>,
    /// 1-5 scale
    pub manager_rating: Option<f64>,
    pub last_promotion_date: Option<NaiveDate>,
    pub skills: RawSkills,
}

impl EmployeeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Discrete risk classification of an aggregate score.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

/// Named risk dimensions. The enum ordering fixes the iteration order for
/// factor maps and recommendation rules, keeping output reproducible.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Tenure,
    Performance,
    Salary,
    Engagement,
    Promotion,
    Manager,
    SkillCriticality,
}

impl FactorKind {
    pub const ALL: [FactorKind; 7] = [
        FactorKind::Tenure,
        FactorKind::Performance,
        FactorKind::Salary,
        FactorKind::Engagement,
        FactorKind::Promotion,
        FactorKind::Manager,
        FactorKind::SkillCriticality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::Tenure => "tenure",
            FactorKind::Performance => "performance",
            FactorKind::Salary => "salary",
            FactorKind::Engagement => "engagement",
            FactorKind::Promotion => "promotion",
            FactorKind::Manager => "manager",
            FactorKind::SkillCriticality => "skill_criticality",
        }
    }
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One factor's contribution to an assessment: the raw measurement, the
/// normalized risk in [0,1], and the weight it carried in aggregation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RiskFactor {
    pub value: f64,
    pub risk: f64,
    pub weight: f64,
}

/// Per-employee assessment result. Immutable once returned.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub employee_id: String,
    pub score: f64,
    pub level: RiskLevel,
    pub factors: BTreeMap<FactorKind, RiskFactor>,
    pub recommendations: Vec<String>,
}

/// Team-level risk distribution.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub average_score: f64,
}

/// One entry of the team skill frequency distribution.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SkillDistributionEntry {
    pub skill: String,
    pub count: usize,
    /// share of the team holding the skill, 0-100
    pub percentage: f64,
}

/// Shortfall between a benchmark's required coverage and current coverage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SkillGap {
    pub skill: String,
    /// fraction of the team holding the skill, 0-1
    pub current_percentage: f64,
    pub required_percentage: f64,
    pub gap: f64,
    pub priority: f64,
}

/// Watch-list entry passed through team analysis unmodified.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmergingSkill {
    pub skill: String,
    pub growth: f64,
    pub demand: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_skills_from_comma_string() {
        let skills = RawSkills::Text("python, sql , ,docker".to_string());
        assert_eq!(skills.tokens(), vec!["python", "sql", "docker"]);
    }

    #[test]
    fn test_raw_skills_from_list_preserves_order() {
        let skills = RawSkills::List(vec!["  rust ".into(), String::new(), "go".into()]);
        assert_eq!(skills.tokens(), vec!["rust", "go"]);
    }

    #[test]
    fn test_employee_record_defaults_are_absent() {
        let record = EmployeeRecord::new("E1");
        assert_eq!(record.id, "E1");
        assert!(record.start_date.is_none());
        assert!(record.skills.tokens().is_empty());
    }

    #[test]
    fn test_factor_kind_order_is_declared_order() {
        let mut sorted = FactorKind::ALL;
        sorted.sort();
        assert_eq!(sorted, FactorKind::ALL);
    }
}
