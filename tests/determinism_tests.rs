//! Scoring and analysis must be reproducible: identical input and
//! configuration produce byte-identical serialized output.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use talentmap::{
    EmployeeRecord, RawSkills, RiskAnalyzer, SkillProfileAnalyzer, TalentmapConfig,
    TeamSummaryBuilder,
};

fn record() -> EmployeeRecord {
    let mut record = EmployeeRecord::new("E-77");
    record.role = Some("Lead Engineer".into());
    record.start_date = NaiveDate::from_ymd_opt(2021, 3, 15);
    record.salary = Some(130_000.0);
    record.performance_rating = Some(3.2);
    record.engagement_score = Some(3.9);
    record.manager_rating = Some(2.1);
    record.last_promotion_date = NaiveDate::from_ymd_opt(2023, 1, 10);
    record.skills = RawSkills::Text("python, ML, leadership, js, jscript".into());
    record
}

fn analyzer() -> RiskAnalyzer {
    RiskAnalyzer::new(TalentmapConfig::default())
        .unwrap()
        .with_as_of(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap())
}

#[test]
fn test_assessment_is_byte_identical_across_calls() {
    let analyzer = analyzer();
    let first = analyzer.analyze_employee(&record()).unwrap();
    let second = analyzer.analyze_employee(&record()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_assessment_is_byte_identical_across_analyzers() {
    let first = analyzer().analyze_employee(&record()).unwrap();
    let second = analyzer().analyze_employee(&record()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_team_summary_is_byte_identical_across_calls() {
    let config = TalentmapConfig::default();
    let risk = RiskAnalyzer::new(config.clone())
        .unwrap()
        .with_as_of(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    let skills = SkillProfileAnalyzer::new(config).unwrap();
    let builder = TeamSummaryBuilder::new(&risk, &skills).include_overlap(true);

    let mut other = record();
    other.id = "E-78".into();
    other.skills = RawSkills::Text("javascript, sql".into());
    let roster = vec![record(), other, EmployeeRecord::new("")];

    let first = builder.build(&roster).unwrap();
    let second = builder.build(&roster).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
