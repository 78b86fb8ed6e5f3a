//! Per-factor risk calculators.
//!
//! Each calculator is a pure function of an employee record plus static
//! threshold tables, returning `(value, risk)` where `value` is the raw
//! measurement and `risk` is normalized to [0,1]. Missing optional fields
//! degrade to the 0.5 uncertainty midpoint, never to an error.

use chrono::{Datelike, NaiveDate};

use crate::config::{MarketSalaryTable, PromotionThresholds, TenureThresholds};
use crate::core::EmployeeRecord;
use crate::taxonomy::SkillTaxonomy;

/// Risk assigned when the underlying measurement is absent: an uncertainty
/// penalty, not optimism.
pub const MISSING_RATING_RISK: f64 = 0.5;

/// Whole months between two dates; zero when `start` is not before `end`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if start >= end {
        return 0;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Tenure in whole months as of the reference date. A missing start date
/// counts as tenure zero, which lands in the flight-risk window.
pub fn tenure_months(record: &EmployeeRecord, as_of: NaiveDate) -> u32 {
    record
        .start_date
        .map(|start| months_between(start, as_of))
        .unwrap_or(0)
}

/// U-shaped tenure curve: elevated inside the first-year flight window,
/// elevated again past the stagnation boundary, with a plateau between.
pub fn tenure_risk(months: u32, thresholds: &TenureThresholds) -> f64 {
    if months < thresholds.flight_window_months {
        0.7
    } else if months > thresholds.stagnation_months {
        0.6
    } else if months < thresholds.early_months {
        0.4
    } else {
        0.2
    }
}

pub fn performance_risk(rating: Option<f64>) -> f64 {
    let Some(rating) = rating else {
        return MISSING_RATING_RISK;
    };
    if rating < 2.5 {
        0.8
    } else if rating < 3.5 {
        0.4
    } else if rating > 4.5 {
        0.1
    } else {
        0.2
    }
}

/// Market ratio for the salary factor: salary over the market salary of the
/// first bucket whose key appears in the normalized role text.
pub fn market_ratio(salary: f64, role: Option<&str>, market: &MarketSalaryTable) -> f64 {
    salary / market.market_salary(role.unwrap_or(""))
}

pub fn salary_risk(ratio: f64) -> f64 {
    if ratio < 0.8 {
        0.9
    } else if ratio < 0.9 {
        0.7
    } else if ratio > 1.2 {
        0.2
    } else {
        0.3
    }
}

pub fn engagement_risk(score: Option<f64>) -> f64 {
    let Some(score) = score else {
        return MISSING_RATING_RISK;
    };
    if score < 2.0 {
        0.9
    } else if score < 3.5 {
        0.7
    } else if score > 4.0 {
        0.2
    } else {
        0.4
    }
}

/// Months since the last promotion, falling back to tenure when no
/// promotion was ever recorded.
pub fn months_since_promotion(record: &EmployeeRecord, as_of: NaiveDate) -> u32 {
    record
        .last_promotion_date
        .map(|date| months_between(date, as_of))
        .unwrap_or_else(|| tenure_months(record, as_of))
}

/// Risk rises with time since promotion.
pub fn promotion_risk(months: u32, thresholds: &PromotionThresholds) -> f64 {
    if months < thresholds.low_months {
        0.2
    } else if months < thresholds.high_months {
        0.5
    } else {
        0.8
    }
}

pub fn manager_risk(rating: Option<f64>) -> f64 {
    let Some(rating) = rating else {
        return MISSING_RATING_RISK;
    };
    if rating < 2.5 {
        0.8
    } else if rating < 3.5 {
        0.5
    } else if rating > 4.5 {
        0.1
    } else {
        0.2
    }
}

/// Count of the employee's mapped skills whose canonical name carries an
/// entry of the critical-skill list.
pub fn critical_skill_count(
    record: &EmployeeRecord,
    taxonomy: &SkillTaxonomy,
    critical_skills: &[String],
) -> usize {
    record
        .skills
        .tokens()
        .iter()
        .map(|token| taxonomy.map_skill(token))
        .filter(|mapped| {
            critical_skills
                .iter()
                .any(|critical| mapped.canonical_name.contains(critical.as_str()))
        })
        .count()
}

/// Base 0.2, plus a fixed step per critical skill, capped at 1.0.
pub fn skill_criticality_risk(critical_count: usize) -> f64 {
    (0.2 + 0.1 * critical_count as f64).min(1.0)
}
