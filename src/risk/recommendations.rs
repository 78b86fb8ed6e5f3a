//! Rule-table recommendation generation.
//!
//! An ordered list of (trigger, messages) pairs evaluated in a fixed
//! sequence. Every matching rule contributes its messages; the result is
//! deduplicated preserving first-seen order, so identical input always
//! yields identical output.

use std::collections::{BTreeMap, HashSet};

use crate::core::{FactorKind, RiskFactor};

pub const DEFAULT_RECOMMENDATION: &str = "Continue regular check-ins";

enum Trigger {
    /// aggregate score reached the configured high threshold
    ScoreReachesHighThreshold,
    /// a single factor's risk exceeds the trigger value
    FactorRiskAbove(FactorKind, f64),
}

static RULES: &[(Trigger, &[&str])] = &[
    (
        Trigger::ScoreReachesHighThreshold,
        &[
            "Immediate retention conversation needed",
            "Review compensation and career development",
            "Investigate engagement issues through 1:1 meetings",
        ],
    ),
    (
        Trigger::FactorRiskAbove(FactorKind::Engagement, 0.6),
        &[
            "Focus on employee engagement initiatives",
            "Conduct stay interview",
        ],
    ),
    (
        Trigger::FactorRiskAbove(FactorKind::Promotion, 0.6),
        &[
            "Discuss career advancement opportunities",
            "Create development plan",
        ],
    ),
    (
        Trigger::FactorRiskAbove(FactorKind::Performance, 0.6),
        &["Implement performance improvement plan"],
    ),
    (
        Trigger::FactorRiskAbove(FactorKind::Salary, 0.6),
        &["Review compensation competitiveness"],
    ),
];

/// Apply every matching rule in declared order; emit the single default
/// recommendation when nothing fires.
pub fn generate_recommendations(
    score: f64,
    high_threshold: f64,
    factors: &BTreeMap<FactorKind, RiskFactor>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut recommendations = Vec::new();

    for (trigger, messages) in RULES {
        let fired = match trigger {
            Trigger::ScoreReachesHighThreshold => score >= high_threshold,
            Trigger::FactorRiskAbove(kind, trigger_risk) => factors
                .get(kind)
                .is_some_and(|factor| factor.risk > *trigger_risk),
        };
        if fired {
            for message in *messages {
                if seen.insert(*message) {
                    recommendations.push(message.to_string());
                }
            }
        }
    }

    if recommendations.is_empty() {
        recommendations.push(DEFAULT_RECOMMENDATION.to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(risk: f64) -> RiskFactor {
        RiskFactor {
            value: 0.0,
            risk,
            weight: 1.0,
        }
    }

    #[test]
    fn test_default_when_no_rule_fires() {
        let factors = BTreeMap::from([(FactorKind::Engagement, factor(0.2))]);
        let recs = generate_recommendations(0.3, 0.7, &factors);
        assert_eq!(recs, vec![DEFAULT_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_high_score_fires_retention_rule() {
        let factors = BTreeMap::new();
        let recs = generate_recommendations(0.75, 0.7, &factors);
        assert_eq!(recs[0], "Immediate retention conversation needed");
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_factor_rules_fire_in_declared_order() {
        let factors = BTreeMap::from([
            (FactorKind::Salary, factor(0.9)),
            (FactorKind::Engagement, factor(0.7)),
        ]);
        let recs = generate_recommendations(0.3, 0.7, &factors);
        assert_eq!(
            recs,
            vec![
                "Focus on employee engagement initiatives".to_string(),
                "Conduct stay interview".to_string(),
                "Review compensation competitiveness".to_string(),
            ]
        );
    }

    #[test]
    fn test_trigger_is_strictly_above() {
        let factors = BTreeMap::from([(FactorKind::Performance, factor(0.6))]);
        let recs = generate_recommendations(0.3, 0.7, &factors);
        assert_eq!(recs, vec![DEFAULT_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_output_is_deterministic() {
        let factors = BTreeMap::from([
            (FactorKind::Engagement, factor(0.7)),
            (FactorKind::Promotion, factor(0.7)),
        ]);
        let first = generate_recommendations(0.8, 0.7, &factors);
        let second = generate_recommendations(0.8, 0.7, &factors);
        assert_eq!(first, second);
    }
}
