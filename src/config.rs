use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::EmergingSkill;
use crate::core::FactorKind;

/// Per-factor aggregation weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorWeights {
    #[serde(default = "default_tenure_weight")]
    pub tenure: f64,

    #[serde(default = "default_performance_weight")]
    pub performance: f64,

    #[serde(default = "default_salary_weight")]
    pub salary: f64,

    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,

    #[serde(default = "default_promotion_weight")]
    pub promotion: f64,

    #[serde(default = "default_manager_weight")]
    pub manager: f64,

    #[serde(default = "default_skill_criticality_weight")]
    pub skill_criticality: f64,
}

fn default_tenure_weight() -> f64 {
    0.20
}
fn default_performance_weight() -> f64 {
    0.15
}
fn default_salary_weight() -> f64 {
    0.15
}
fn default_engagement_weight() -> f64 {
    0.20
}
fn default_promotion_weight() -> f64 {
    0.05
}
fn default_manager_weight() -> f64 {
    0.10
}
fn default_skill_criticality_weight() -> f64 {
    0.15
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            tenure: default_tenure_weight(),
            performance: default_performance_weight(),
            salary: default_salary_weight(),
            engagement: default_engagement_weight(),
            promotion: default_promotion_weight(),
            manager: default_manager_weight(),
            skill_criticality: default_skill_criticality_weight(),
        }
    }
}

impl FactorWeights {
    pub fn weight_for(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::Tenure => self.tenure,
            FactorKind::Performance => self.performance,
            FactorKind::Salary => self.salary,
            FactorKind::Engagement => self.engagement,
            FactorKind::Promotion => self.promotion,
            FactorKind::Manager => self.manager,
            FactorKind::SkillCriticality => self.skill_criticality,
        }
    }

    fn sum(&self) -> f64 {
        FactorKind::ALL.iter().map(|k| self.weight_for(*k)).sum()
    }

    // Pure function: a weight must be a finite non-negative number
    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if weight.is_finite() && weight >= 0.0 {
            Ok(())
        } else {
            Err(format!("{} weight must be a non-negative number", name))
        }
    }

    /// Validate that every weight is non-negative and at least one is
    /// positive. The aggregator divides by the sum of present weights, so
    /// an all-zero table would be a division by zero.
    pub fn validate(&self) -> Result<(), String> {
        for kind in FactorKind::ALL {
            Self::validate_weight(self.weight_for(kind), kind.as_str())?;
        }
        if self.sum() <= 0.0 {
            return Err("factor weight table must contain at least one positive weight".into());
        }
        Ok(())
    }

    /// Scale weights so they sum to 1.0. Aggregation already normalizes by
    /// the present-weight sum; this keeps configured tables comparable.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
            self.tenure /= sum;
            self.performance /= sum;
            self.salary /= sum;
            self.engagement /= sum;
            self.promotion /= sum;
            self.manager /= sum;
            self.skill_criticality /= sum;
        }
    }
}

/// Score thresholds for level classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskThresholds {
    /// score >= low classifies as medium
    #[serde(default = "default_low_threshold")]
    pub low: f64,

    /// score >= high classifies as high
    #[serde(default = "default_high_threshold")]
    pub high: f64,
}

fn default_low_threshold() -> f64 {
    0.4
}
fn default_high_threshold() -> f64 {
    0.7
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: default_low_threshold(),
            high: default_high_threshold(),
        }
    }
}

impl RiskThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.low) || !(0.0..=1.0).contains(&self.high) {
            return Err("risk thresholds must be within 0.0..=1.0".into());
        }
        if self.low >= self.high {
            return Err(format!(
                "risk thresholds must be monotonic: low ({}) must be less than high ({})",
                self.low, self.high
            ));
        }
        Ok(())
    }
}

/// Month boundaries of the U-shaped tenure curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TenureThresholds {
    /// below this, the employee is in the first-year flight window
    #[serde(default = "default_flight_window_months")]
    pub flight_window_months: u32,

    /// below this (and past the flight window), risk sits on the raised
    /// early-tenure shoulder
    #[serde(default = "default_early_months")]
    pub early_months: u32,

    /// above this, stagnation risk applies
    #[serde(default = "default_stagnation_months")]
    pub stagnation_months: u32,
}

fn default_flight_window_months() -> u32 {
    12
}
fn default_early_months() -> u32 {
    36
}
fn default_stagnation_months() -> u32 {
    120
}

impl Default for TenureThresholds {
    fn default() -> Self {
        Self {
            flight_window_months: default_flight_window_months(),
            early_months: default_early_months(),
            stagnation_months: default_stagnation_months(),
        }
    }
}

impl TenureThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.flight_window_months < self.early_months
            && self.early_months < self.stagnation_months
        {
            Ok(())
        } else {
            Err("tenure thresholds must be increasing: flight window < early < stagnation".into())
        }
    }
}

/// Months-since-promotion boundaries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PromotionThresholds {
    #[serde(default = "default_promotion_low_months")]
    pub low_months: u32,

    #[serde(default = "default_promotion_high_months")]
    pub high_months: u32,
}

fn default_promotion_low_months() -> u32 {
    24
}
fn default_promotion_high_months() -> u32 {
    48
}

impl Default for PromotionThresholds {
    fn default() -> Self {
        Self {
            low_months: default_promotion_low_months(),
            high_months: default_promotion_high_months(),
        }
    }
}

impl PromotionThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.low_months < self.high_months {
            Ok(())
        } else {
            Err("promotion thresholds must satisfy low_months < high_months".into())
        }
    }
}

/// One bucket of the market salary table. Buckets are matched against the
/// normalized role text by substring, in declared order, first match wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketSalaryBucket {
    pub role_contains: String,
    pub salary: f64,
}

/// Ordered market salary table with a default bucket for unmatched roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketSalaryTable {
    #[serde(default = "default_market_buckets")]
    pub buckets: Vec<MarketSalaryBucket>,

    #[serde(default = "default_market_salary")]
    pub default_salary: f64,
}

fn default_market_buckets() -> Vec<MarketSalaryBucket> {
    // declared order matters: "senior developer" prices as developer
    [
        ("developer", 95_000.0),
        ("senior", 120_000.0),
        ("lead", 145_000.0),
        ("manager", 160_000.0),
        ("director", 200_000.0),
        ("junior", 65_000.0),
    ]
    .iter()
    .map(|(key, salary)| MarketSalaryBucket {
        role_contains: key.to_string(),
        salary: *salary,
    })
    .collect()
}

fn default_market_salary() -> f64 {
    95_000.0
}

impl Default for MarketSalaryTable {
    fn default() -> Self {
        Self {
            buckets: default_market_buckets(),
            default_salary: default_market_salary(),
        }
    }
}

impl MarketSalaryTable {
    /// Look up the market salary for a role. The role text is normalized
    /// the same way skill tokens are: trimmed and lowercased.
    pub fn market_salary(&self, role: &str) -> f64 {
        let normalized = role.trim().to_lowercase();
        self.buckets
            .iter()
            .find(|bucket| normalized.contains(&bucket.role_contains))
            .map(|bucket| bucket.salary)
            .unwrap_or(self.default_salary)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_salary <= 0.0 {
            return Err("default market salary must be positive".into());
        }
        for bucket in &self.buckets {
            if bucket.salary <= 0.0 {
                return Err(format!(
                    "market salary for '{}' must be positive",
                    bucket.role_contains
                ));
            }
            if bucket.role_contains.is_empty() {
                return Err("market salary bucket key must be non-empty".into());
            }
        }
        Ok(())
    }
}

/// Industry benchmark for one skill: how much of a team should hold it and
/// how fast demand is growing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillBenchmark {
    pub skill: String,
    /// required share of the team, 0-1
    pub demand: f64,
    pub growth: f64,
}

fn default_benchmarks() -> Vec<SkillBenchmark> {
    [
        ("programming", 0.8, 0.15),
        ("data-analysis", 0.9, 0.25),
        ("leadership", 0.7, 0.1),
    ]
    .iter()
    .map(|(skill, demand, growth)| SkillBenchmark {
        skill: skill.to_string(),
        demand: *demand,
        growth: *growth,
    })
    .collect()
}

fn default_critical_skills() -> Vec<String> {
    [
        "leadership",
        "architecture",
        "security",
        "devops",
        "machine-learning",
        "cloud",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_emerging_skills() -> Vec<EmergingSkill> {
    [
        ("ai-prompt-engineering", 0.45, 0.3),
        ("quantum-computing", 0.35, 0.15),
        ("sustainability", 0.25, 0.4),
    ]
    .iter()
    .map(|(skill, growth, demand)| EmergingSkill {
        skill: skill.to_string(),
        growth: *growth,
        demand: *demand,
    })
    .collect()
}

fn default_max_overlap_team_size() -> usize {
    500
}

/// Complete engine configuration. Every section has defaults, so an empty
/// `.talentmap.toml` (or none at all) yields the stock rule set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TalentmapConfig {
    pub weights: FactorWeights,
    pub thresholds: RiskThresholds,
    pub tenure: TenureThresholds,
    pub promotion: PromotionThresholds,
    pub market: MarketSalaryTable,

    #[serde(default = "default_critical_skills")]
    pub critical_skills: Vec<String>,

    #[serde(default = "default_benchmarks")]
    pub benchmarks: Vec<SkillBenchmark>,

    #[serde(default = "default_emerging_skills")]
    pub emerging_skills: Vec<EmergingSkill>,

    /// Pairwise overlap is O(n^2); rosters above this size are rejected.
    #[serde(default = "default_max_overlap_team_size")]
    pub max_overlap_team_size: usize,
}

impl Default for TalentmapConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            thresholds: RiskThresholds::default(),
            tenure: TenureThresholds::default(),
            promotion: PromotionThresholds::default(),
            market: MarketSalaryTable::default(),
            critical_skills: default_critical_skills(),
            benchmarks: default_benchmarks(),
            emerging_skills: default_emerging_skills(),
            max_overlap_team_size: default_max_overlap_team_size(),
        }
    }
}

impl TalentmapConfig {
    /// Load and validate a config from an explicit TOML file. Unlike the
    /// ancestor-walking [`load_config`], a broken file here is an error,
    /// not a silent fallback.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = read_config_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_and_validate_config(&contents)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Validate every section. Construction of an analyzer from an invalid
    /// config is fatal; this never fails mid-computation.
    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        self.tenure.validate()?;
        self.promotion.validate()?;
        self.market.validate()?;
        for benchmark in &self.benchmarks {
            if !(0.0..=1.0).contains(&benchmark.demand) {
                return Err(format!(
                    "benchmark demand for '{}' must be within 0.0..=1.0",
                    benchmark.skill
                ));
            }
        }
        if self.max_overlap_team_size == 0 {
            return Err("max_overlap_team_size must be positive".into());
        }
        Ok(())
    }
}

/// Cache the configuration
static CONFIG: OnceLock<TalentmapConfig> = OnceLock::new();

const CONFIG_FILE_NAME: &str = ".talentmap.toml";

// Pure function: read config file contents
fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate a config from TOML text. A table that parses but
/// fails validation is rejected here, before anything is cached.
pub fn parse_and_validate_config(contents: &str) -> Result<TalentmapConfig, String> {
    let mut config = toml::from_str::<TalentmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.weights.validate() {
        log::warn!("Invalid factor weights: {}. Using defaults.", e);
        config.weights = FactorWeights::default();
    } else {
        config.weights.normalize();
    }

    config.validate()?;
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<TalentmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Load configuration from the nearest `.talentmap.toml`, falling back to
/// defaults when none is found.
pub fn load_config() -> TalentmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Using defaults.", e);
            return TalentmapConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_default()
}

/// Get the cached configuration
pub fn get_config() -> &'static TalentmapConfig {
    CONFIG.get_or_init(load_config)
}
