//! Merges per-employee risk assessments and the team skill profile into
//! team-level insights.

use im::Vector;
use serde::Serialize;

use crate::core::{EmployeeRecord, FactorKind, RiskAssessment, RiskLevel, RiskSummary};
use crate::errors::Result;
use crate::risk::{BatchFailure, RiskAnalyzer};
use crate::skills::{SkillProfileAnalyzer, TeamSkillAnalysis};

/// How many of the highest-scoring assessments to surface.
const TOP_RISK_COUNT: usize = 5;

/// Engagement trigger used for the team-wide engagement rule.
const TEAM_ENGAGEMENT_TRIGGER: f64 = 0.5;
/// Share of the team that must trip the engagement trigger.
const TEAM_ENGAGEMENT_SHARE: f64 = 0.3;
/// Salary trigger used for the compensation-structure rule.
const TEAM_SALARY_TRIGGER: f64 = 0.6;

/// Combined team report: risk distribution plus skill profile.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TeamSummary {
    pub total_employees: usize,
    pub assessed: usize,
    pub skipped: usize,
    pub failures: Vec<BatchFailure>,
    pub risk: RiskSummary,
    pub top_risks: Vector<RiskAssessment>,
    pub skills: TeamSkillAnalysis,
    /// present only when overlap reporting was requested
    pub average_overlap: Option<f64>,
    pub recommendations: Vec<String>,
}

/// Builds a [`TeamSummary`] from a roster snapshot. Scoring runs through
/// the risk analyzer's parallel batch path; skill analysis is a single
/// barrier pass over the full roster.
pub struct TeamSummaryBuilder<'a> {
    risk: &'a RiskAnalyzer,
    skills: &'a SkillProfileAnalyzer,
    include_overlap: bool,
}

impl<'a> TeamSummaryBuilder<'a> {
    pub fn new(risk: &'a RiskAnalyzer, skills: &'a SkillProfileAnalyzer) -> Self {
        Self {
            risk,
            skills,
            include_overlap: false,
        }
    }

    /// Opt in to the O(n^2) pairwise overlap figure.
    pub fn include_overlap(mut self, include: bool) -> Self {
        self.include_overlap = include;
        self
    }

    /// Only fails when overlap was requested for a roster above the
    /// configured size guard; everything else degrades per record.
    pub fn build(&self, employees: &[EmployeeRecord]) -> Result<TeamSummary> {
        let batch = self.risk.analyze_batch(employees);
        let skills = self.skills.analyze_team(employees);
        let average_overlap = if self.include_overlap {
            Some(self.skills.average_skill_overlap(employees)?)
        } else {
            None
        };

        let risk = summarize_risk(&batch.assessments);
        let recommendations = team_recommendations(&batch.assessments, &risk);
        let top_risks = top_risks(&batch.assessments);

        Ok(TeamSummary {
            total_employees: employees.len(),
            assessed: batch.assessed(),
            skipped: batch.skipped(),
            failures: batch.failures,
            risk,
            top_risks,
            skills,
            average_overlap,
            recommendations,
        })
    }
}

/// Level counts and mean score over assessed employees only; skipped
/// records never bias the aggregate.
fn summarize_risk(assessments: &[RiskAssessment]) -> RiskSummary {
    let mut summary = RiskSummary::default();
    for assessment in assessments {
        match assessment.level {
            RiskLevel::High => summary.high += 1,
            RiskLevel::Medium => summary.medium += 1,
            RiskLevel::Low => summary.low += 1,
        }
    }
    if !assessments.is_empty() {
        let total: f64 = assessments.iter().map(|a| a.score).sum();
        summary.average_score = total / assessments.len() as f64;
    }
    summary
}

/// Highest-scoring assessments, ties kept in roster order.
fn top_risks(assessments: &[RiskAssessment]) -> Vector<RiskAssessment> {
    let mut sorted: Vec<RiskAssessment> = assessments.to_vec();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.into_iter().take(TOP_RISK_COUNT).collect()
}

fn factor_risk_above(assessment: &RiskAssessment, kind: FactorKind, trigger: f64) -> bool {
    assessment
        .factors
        .get(&kind)
        .is_some_and(|factor| factor.risk > trigger)
}

/// Team-level rules, evaluated in a fixed order.
fn team_recommendations(assessments: &[RiskAssessment], risk: &RiskSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if risk.high > 0 {
        recommendations.push(format!("Address {} high-risk employees", risk.high));
    }

    let engagement_issues = assessments
        .iter()
        .filter(|a| factor_risk_above(a, FactorKind::Engagement, TEAM_ENGAGEMENT_TRIGGER))
        .count();
    if !assessments.is_empty()
        && engagement_issues as f64 > assessments.len() as f64 * TEAM_ENGAGEMENT_SHARE
    {
        recommendations.push("Team-wide engagement improvement needed".to_string());
    }

    let salary_issues = assessments
        .iter()
        .filter(|a| factor_risk_above(a, FactorKind::Salary, TEAM_SALARY_TRIGGER))
        .count();
    if salary_issues > 0 {
        recommendations.push("Review team compensation structure".to_string());
    }

    recommendations
}
