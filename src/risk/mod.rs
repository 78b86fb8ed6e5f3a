//! Weighted multi-factor risk assessment.

pub mod factors;
pub mod recommendations;

use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::TalentmapConfig;
use crate::core::{EmployeeRecord, FactorKind, RiskAssessment, RiskFactor, RiskLevel};
use crate::errors::{Result, TalentmapError};
use crate::risk::recommendations::generate_recommendations;
use crate::taxonomy::SkillTaxonomy;

/// One record that failed validation during batch processing.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BatchFailure {
    pub index: usize,
    pub employee_id: Option<String>,
    pub error: TalentmapError,
}

/// Result of scoring a roster: per-record failures never abort the batch.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BatchAssessment {
    /// successful assessments, in roster order
    pub assessments: Vec<RiskAssessment>,
    pub failures: Vec<BatchFailure>,
}

impl BatchAssessment {
    pub fn assessed(&self) -> usize {
        self.assessments.len()
    }

    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}

/// Scores employees against a validated configuration. Holds only
/// immutable state (config, taxonomy, reference date), so one analyzer is
/// safe to share across threads.
#[derive(Debug)]
pub struct RiskAnalyzer {
    config: TalentmapConfig,
    taxonomy: SkillTaxonomy,
    as_of: NaiveDate,
}

impl RiskAnalyzer {
    /// Build an analyzer. Configuration errors are fatal here and never
    /// surface mid-computation.
    pub fn new(config: TalentmapConfig) -> Result<Self> {
        config.validate().map_err(TalentmapError::config)?;
        Ok(Self {
            config,
            taxonomy: SkillTaxonomy::builtin(),
            as_of: Utc::now().date_naive(),
        })
    }

    /// Fix the reference date used for tenure and promotion arithmetic.
    /// Assessments from one analyzer are reproducible; pinning the date
    /// makes them reproducible across analyzers too.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Replace the built-in taxonomy.
    pub fn with_taxonomy(mut self, taxonomy: SkillTaxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn config(&self) -> &TalentmapConfig {
        &self.config
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Score one employee. The identifier is the only mandatory field;
    /// every other gap degrades per the factor presence policy.
    pub fn analyze_employee(&self, record: &EmployeeRecord) -> Result<RiskAssessment> {
        if record.id.trim().is_empty() {
            return Err(TalentmapError::validation(
                "employee id is required",
                None,
            ));
        }

        let factor_map = self.calculate_factors(record);
        let score = aggregate_score(&factor_map);
        let level = self.classify(score);
        let recommendations =
            generate_recommendations(score, self.config.thresholds.high, &factor_map);

        Ok(RiskAssessment {
            employee_id: record.id.clone(),
            score,
            level,
            factors: factor_map,
            recommendations,
        })
    }

    /// Score a whole roster in parallel. Per-employee validation failures
    /// are collected, not propagated; the caller gets both the successes
    /// (in roster order) and the typed failures with their indices.
    pub fn analyze_batch(&self, employees: &[EmployeeRecord]) -> BatchAssessment {
        let results: Vec<(usize, Result<RiskAssessment>)> = employees
            .par_iter()
            .enumerate()
            .map(|(index, record)| (index, self.analyze_employee(record)))
            .collect();

        let mut assessments = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (index, result) in results {
            match result {
                Ok(assessment) => assessments.push(assessment),
                Err(error) => {
                    let id = &employees[index].id;
                    failures.push(BatchFailure {
                        index,
                        employee_id: (!id.trim().is_empty()).then(|| id.clone()),
                        error,
                    });
                }
            }
        }

        log::debug!(
            "batch assessment: {} assessed, {} skipped",
            assessments.len(),
            failures.len()
        );
        BatchAssessment {
            assessments,
            failures,
        }
    }

    /// Factor presence policy: tenure, performance, and promotion always
    /// participate; salary, engagement, manager, and skill criticality are
    /// omitted when their source field is absent, so the aggregate divides
    /// by the weight actually present.
    fn calculate_factors(&self, record: &EmployeeRecord) -> BTreeMap<FactorKind, RiskFactor> {
        let config = &self.config;
        let weights = &config.weights;
        let mut map = BTreeMap::new();

        let tenure = factors::tenure_months(record, self.as_of);
        map.insert(
            FactorKind::Tenure,
            RiskFactor {
                value: tenure as f64,
                risk: factors::tenure_risk(tenure, &config.tenure),
                weight: weights.tenure,
            },
        );

        map.insert(
            FactorKind::Performance,
            RiskFactor {
                value: record.performance_rating.unwrap_or(0.0),
                risk: factors::performance_risk(record.performance_rating),
                weight: weights.performance,
            },
        );

        if let Some(salary) = record.salary {
            let ratio = factors::market_ratio(salary, record.role.as_deref(), &config.market);
            map.insert(
                FactorKind::Salary,
                RiskFactor {
                    value: ratio,
                    risk: factors::salary_risk(ratio),
                    weight: weights.salary,
                },
            );
        }

        if let Some(score) = record.engagement_score {
            map.insert(
                FactorKind::Engagement,
                RiskFactor {
                    value: score,
                    risk: factors::engagement_risk(Some(score)),
                    weight: weights.engagement,
                },
            );
        }

        let since_promotion = factors::months_since_promotion(record, self.as_of);
        map.insert(
            FactorKind::Promotion,
            RiskFactor {
                value: since_promotion as f64,
                risk: factors::promotion_risk(since_promotion, &config.promotion),
                weight: weights.promotion,
            },
        );

        if let Some(rating) = record.manager_rating {
            map.insert(
                FactorKind::Manager,
                RiskFactor {
                    value: rating,
                    risk: factors::manager_risk(Some(rating)),
                    weight: weights.manager,
                },
            );
        }

        if !record.skills.tokens().is_empty() {
            let critical = factors::critical_skill_count(
                record,
                &self.taxonomy,
                &config.critical_skills,
            );
            map.insert(
                FactorKind::SkillCriticality,
                RiskFactor {
                    value: critical as f64,
                    risk: factors::skill_criticality_risk(critical),
                    weight: weights.skill_criticality,
                },
            );
        }

        map
    }

    fn classify(&self, score: f64) -> RiskLevel {
        let thresholds = &self.config.thresholds;
        if score >= thresholds.high {
            RiskLevel::High
        } else if score >= thresholds.low {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Weighted mean over present factors, clamped to [0,1]. An empty factor
/// map scores zero; analyzer construction guarantees at least one factor
/// carries positive weight.
pub fn aggregate_score(factors: &BTreeMap<FactorKind, RiskFactor>) -> f64 {
    let weight_sum: f64 = factors.values().map(|f| f.weight).sum();
    if weight_sum <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = factors.values().map(|f| f.risk * f.weight).sum();
    (weighted / weight_sum).clamp(0.0, 1.0)
}
