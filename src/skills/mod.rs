//! Team skill profile analysis: distribution, diversity, benchmark gaps.

pub mod diversity;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::TalentmapConfig;
use crate::core::{EmergingSkill, EmployeeRecord, SkillDistributionEntry, SkillGap};
use crate::errors::{Result, TalentmapError};
use crate::skills::diversity::{average_pairwise_overlap, shannon_entropy};
use crate::taxonomy::{CanonicalSkill, SkillTaxonomy};

/// Priority floor for a gap to count as critical.
const CRITICAL_GAP_PRIORITY: f64 = 0.7;
/// Coverage shortfall floor for a gap to count as critical.
const CRITICAL_GAP_SIZE: f64 = 0.3;

/// Individual skill analysis, reported per employee on request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmployeeSkillProfile {
    pub employee_id: String,
    pub skills: Vec<CanonicalSkill>,
    /// mean benchmark demand over the employee's benchmark-listed skills
    pub avg_market_demand: f64,
    pub critical_skills: Vec<String>,
}

/// Team-level skill profile. Derived from a full roster snapshot and
/// recomputed on each call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TeamSkillAnalysis {
    pub team_size: usize,
    pub distribution: Vec<SkillDistributionEntry>,
    /// Shannon entropy of the skill-frequency distribution, in bits
    pub diversity: f64,
    pub total_unique_skills: usize,
    pub gaps: Vec<SkillGap>,
    pub critical_gaps: Vec<SkillGap>,
    pub emerging_skills: Vec<EmergingSkill>,
}

/// Computes team skill profiles against the configured benchmark tables.
/// Stateless per call; the taxonomy and tables are immutable after
/// construction.
pub struct SkillProfileAnalyzer {
    config: TalentmapConfig,
    taxonomy: SkillTaxonomy,
}

impl SkillProfileAnalyzer {
    pub fn new(config: TalentmapConfig) -> Result<Self> {
        config.validate().map_err(TalentmapError::config)?;
        Ok(Self {
            config,
            taxonomy: SkillTaxonomy::builtin(),
        })
    }

    pub fn with_taxonomy(mut self, taxonomy: SkillTaxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn config(&self) -> &TalentmapConfig {
        &self.config
    }

    /// Full team profile: distribution, diversity, gaps, and the emerging
    /// watch-list. A barrier operation: it needs the whole roster.
    pub fn analyze_team(&self, employees: &[EmployeeRecord]) -> TeamSkillAnalysis {
        let team_size = employees.len();
        let skill_sets = self.canonical_skill_sets(employees);

        let distribution = Self::distribution(&skill_sets, team_size);
        let counts: Vec<usize> = distribution.iter().map(|entry| entry.count).collect();
        let diversity = shannon_entropy(&counts);
        let total_unique_skills = distribution.len();
        let (gaps, critical_gaps) = self.benchmark_gaps(&skill_sets, team_size);

        TeamSkillAnalysis {
            team_size,
            distribution,
            diversity,
            total_unique_skills,
            gaps,
            critical_gaps,
            emerging_skills: self.config.emerging_skills.clone(),
        }
    }

    /// Mean pairwise skill-set intersection across the team. O(n^2) in
    /// roster size, so rosters above the configured guard are rejected
    /// instead of silently hanging.
    pub fn average_skill_overlap(&self, employees: &[EmployeeRecord]) -> Result<f64> {
        let guard = self.config.max_overlap_team_size;
        if employees.len() > guard {
            return Err(TalentmapError::InvalidInput(format!(
                "pairwise overlap is O(n^2) and limited to {} employees; roster has {}",
                guard,
                employees.len()
            )));
        }
        let sets: Vec<HashSet<String>> = self
            .canonical_skill_sets(employees)
            .into_iter()
            .map(|ordered| ordered.into_iter().collect())
            .collect();
        Ok(average_pairwise_overlap(&sets))
    }

    /// Individual skill analysis for one employee.
    pub fn employee_profile(&self, record: &EmployeeRecord) -> EmployeeSkillProfile {
        let tokens = record.skills.tokens();
        let skills = self.taxonomy.map_skill_list(&tokens);

        let demands: Vec<f64> = skills
            .iter()
            .filter_map(|skill| {
                self.config
                    .benchmarks
                    .iter()
                    .find(|benchmark| benchmark.skill == skill.canonical_name)
                    .map(|benchmark| benchmark.demand)
            })
            .collect();
        let avg_market_demand = if demands.is_empty() {
            0.0
        } else {
            demands.iter().sum::<f64>() / demands.len() as f64
        };

        let mut critical_skills = Vec::new();
        let mut seen = HashSet::new();
        for skill in &skills {
            let is_critical = self
                .config
                .critical_skills
                .iter()
                .any(|critical| skill.canonical_name.contains(critical.as_str()));
            if is_critical && seen.insert(skill.canonical_name.clone()) {
                critical_skills.push(skill.canonical_name.clone());
            }
        }

        EmployeeSkillProfile {
            employee_id: record.id.clone(),
            skills,
            avg_market_demand,
            critical_skills,
        }
    }

    /// Per-employee canonical skill names, deduplicated within each
    /// employee (one person listing a skill twice must not inflate team
    /// percentages), preserving first-listed order.
    fn canonical_skill_sets(&self, employees: &[EmployeeRecord]) -> Vec<Vec<String>> {
        employees
            .iter()
            .map(|record| {
                let mut seen = HashSet::new();
                let mut ordered = Vec::new();
                for token in record.skills.tokens() {
                    let canonical = self.taxonomy.map_skill(&token).canonical_name;
                    if canonical.is_empty() {
                        continue;
                    }
                    if seen.insert(canonical.clone()) {
                        ordered.push(canonical);
                    }
                }
                ordered
            })
            .collect()
    }

    /// Count occurrences across the team, then sort by count descending.
    /// The sort is stable, so ties keep first-encountered order.
    fn distribution(skill_sets: &[Vec<String>], team_size: usize) -> Vec<SkillDistributionEntry> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for set in skill_sets {
            for skill in set {
                if !counts.contains_key(skill.as_str()) {
                    order.push(skill.as_str());
                }
                *counts.entry(skill.as_str()).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<SkillDistributionEntry> = order
            .into_iter()
            .map(|skill| SkillDistributionEntry {
                skill: skill.to_string(),
                count: counts[skill],
                percentage: counts[skill] as f64 / team_size as f64 * 100.0,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// Coverage shortfall against each configured benchmark, retaining
    /// only real gaps, sorted by priority descending.
    fn benchmark_gaps(
        &self,
        skill_sets: &[Vec<String>],
        team_size: usize,
    ) -> (Vec<SkillGap>, Vec<SkillGap>) {
        if team_size == 0 {
            return (Vec::new(), Vec::new());
        }

        let mut gaps: Vec<SkillGap> = self
            .config
            .benchmarks
            .iter()
            .filter_map(|benchmark| {
                let canonical = self.taxonomy.map_skill(&benchmark.skill).canonical_name;
                let holders = skill_sets
                    .iter()
                    .filter(|set| set.iter().any(|skill| *skill == canonical))
                    .count();
                let current = holders as f64 / team_size as f64;
                let gap = benchmark.demand - current;
                (gap > 0.0).then(|| SkillGap {
                    skill: benchmark.skill.clone(),
                    current_percentage: current,
                    required_percentage: benchmark.demand,
                    gap,
                    priority: 0.6 * benchmark.demand + 0.4 * benchmark.growth,
                })
            })
            .collect();
        gaps.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let critical_gaps = gaps
            .iter()
            .filter(|gap| gap.priority > CRITICAL_GAP_PRIORITY && gap.gap > CRITICAL_GAP_SIZE)
            .cloned()
            .collect();
        (gaps, critical_gaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawSkills;

    fn employee(id: &str, skills: &[&str]) -> EmployeeRecord {
        let mut record = EmployeeRecord::new(id);
        record.skills = RawSkills::from(skills);
        record
    }

    fn analyzer() -> SkillProfileAnalyzer {
        SkillProfileAnalyzer::new(TalentmapConfig::default()).unwrap()
    }

    #[test]
    fn test_distribution_dedupes_within_employee() {
        let team = vec![
            employee("E1", &["python", "Python", " python "]),
            employee("E2", &["python", "sql"]),
        ];
        let analysis = analyzer().analyze_team(&team);
        let python = &analysis.distribution[0];
        assert_eq!(python.skill, "python");
        assert_eq!(python.count, 2);
        assert_eq!(python.percentage, 100.0);
    }

    #[test]
    fn test_distribution_counts_aliases_as_canonical() {
        let team = vec![employee("E1", &["js"]), employee("E2", &["javascript"])];
        let analysis = analyzer().analyze_team(&team);
        assert_eq!(analysis.distribution.len(), 1);
        assert_eq!(analysis.distribution[0].skill, "javascript");
        assert_eq!(analysis.distribution[0].count, 2);
    }

    #[test]
    fn test_distribution_sorted_by_count_then_first_seen() {
        let team = vec![
            employee("E1", &["docker", "sql"]),
            employee("E2", &["sql"]),
            employee("E3", &["git"]),
        ];
        let analysis = analyzer().analyze_team(&team);
        let skills: Vec<&str> = analysis
            .distribution
            .iter()
            .map(|e| e.skill.as_str())
            .collect();
        assert_eq!(skills, vec!["sql", "docker", "git"]);
    }

    #[test]
    fn test_uniform_single_skill_team_has_zero_diversity() {
        let team = vec![
            employee("E1", &["python"]),
            employee("E2", &["python"]),
            employee("E3", &["python"]),
        ];
        let analysis = analyzer().analyze_team(&team);
        assert_eq!(analysis.diversity, 0.0);
        assert_eq!(analysis.total_unique_skills, 1);
    }

    #[test]
    fn test_empty_roster_yields_empty_analysis() {
        let analysis = analyzer().analyze_team(&[]);
        assert_eq!(analysis.team_size, 0);
        assert!(analysis.distribution.is_empty());
        assert_eq!(analysis.diversity, 0.0);
        assert!(analysis.gaps.is_empty());
        assert!(analysis.critical_gaps.is_empty());
    }

    #[test]
    fn test_gap_for_uncovered_benchmark() {
        let team = vec![
            employee("E1", &["python"]),
            employee("E2", &["sql"]),
            employee("E3", &["docker"]),
        ];
        let analysis = analyzer().analyze_team(&team);
        let gap = analysis
            .gaps
            .iter()
            .find(|gap| gap.skill == "data-analysis")
            .expect("data-analysis gap");
        assert_eq!(gap.current_percentage, 0.0);
        assert!((gap.gap - 0.9).abs() < 1e-9);
        assert!((gap.priority - (0.6 * 0.9 + 0.4 * 0.25)).abs() < 1e-9);
    }

    #[test]
    fn test_critical_gap_requires_high_priority_and_large_gap() {
        let mut config = TalentmapConfig::default();
        config.benchmarks = vec![
            crate::config::SkillBenchmark {
                skill: "cybersecurity".into(),
                demand: 0.9,
                growth: 0.5,
            },
            crate::config::SkillBenchmark {
                skill: "leadership".into(),
                demand: 0.5,
                growth: 0.1,
            },
        ];
        let analyzer = SkillProfileAnalyzer::new(config).unwrap();
        let analysis = analyzer.analyze_team(&[employee("E1", &["python"])]);
        // cybersecurity: priority 0.74, gap 0.9 -> critical
        // leadership: priority 0.34 -> not critical
        assert_eq!(analysis.gaps.len(), 2);
        assert_eq!(analysis.critical_gaps.len(), 1);
        assert_eq!(analysis.critical_gaps[0].skill, "cybersecurity");
    }

    #[test]
    fn test_covered_benchmark_produces_no_gap() {
        let team = vec![
            employee("E1", &["data-analysis"]),
            employee("E2", &["data-analysis"]),
        ];
        let analysis = analyzer().analyze_team(&team);
        assert!(analysis.gaps.iter().all(|gap| gap.skill != "data-analysis"));
    }

    #[test]
    fn test_gaps_sorted_by_priority() {
        let analysis = analyzer().analyze_team(&[employee("E1", &["git"])]);
        let priorities: Vec<f64> = analysis.gaps.iter().map(|gap| gap.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_emerging_skills_are_passed_through() {
        let analysis = analyzer().analyze_team(&[]);
        assert_eq!(
            analysis.emerging_skills,
            TalentmapConfig::default().emerging_skills
        );
    }

    #[test]
    fn test_overlap_guard_rejects_large_rosters() {
        let mut config = TalentmapConfig::default();
        config.max_overlap_team_size = 2;
        let analyzer = SkillProfileAnalyzer::new(config).unwrap();
        let team = vec![
            employee("E1", &["python"]),
            employee("E2", &["python"]),
            employee("E3", &["python"]),
        ];
        let err = analyzer.average_skill_overlap(&team).unwrap_err();
        assert!(matches!(err, TalentmapError::InvalidInput(_)));
    }

    #[test]
    fn test_overlap_counts_shared_canonical_skills() {
        let team = vec![
            employee("E1", &["js", "sql"]),
            employee("E2", &["javascript", "docker"]),
        ];
        let overlap = analyzer().average_skill_overlap(&team).unwrap();
        assert!((overlap - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_employee_profile_reports_demand_and_critical() {
        let record = employee("E1", &["programming", "leadership", "python"]);
        let profile = analyzer().employee_profile(&record);
        // programming 0.8 and leadership 0.7 are benchmark-listed
        assert!((profile.avg_market_demand - 0.75).abs() < 1e-9);
        assert_eq!(profile.critical_skills, vec!["leadership".to_string()]);
        assert_eq!(profile.skills.len(), 3);
    }
}
