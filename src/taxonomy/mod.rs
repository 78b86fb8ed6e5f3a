//! Skill taxonomy: resolves free-text skill tokens to canonical categories
//! using exact, alias, and fuzzy matching.

pub mod similarity;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::taxonomy::similarity::normalized_similarity;

/// Minimum normalized similarity for a fuzzy match to be accepted.
pub const FUZZY_ACCEPT_THRESHOLD: f64 = 0.8;

const TECHNICAL_SKILLS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "node.js",
    "sql",
    "mongodb",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "machine-learning",
    "data-science",
    "data-analysis",
    "programming",
    "cybersecurity",
    "devops",
    "cloud-computing",
    "artificial-intelligence",
    "database-management",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem-solving",
    "critical-thinking",
    "adaptability",
    "creativity",
    "time-management",
    "emotional-intelligence",
    "conflict-resolution",
];

const DOMAIN_SKILLS: &[&str] = &[
    "project-management",
    "agile",
    "scrum",
    "marketing",
    "sales",
    "finance",
    "accounting",
    "hr",
    "operations",
    "strategy",
    "business-analysis",
    "product-management",
];

const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("nodejs", "node.js"),
    ("reactjs", "react"),
    ("ml", "machine-learning"),
    ("ai", "artificial-intelligence"),
    ("aws-cloud", "aws"),
    ("amazon-web-services", "aws"),
    ("project-mgmt", "project-management"),
    ("pm", "project-management"),
    ("postgres", "sql"),
    ("k8s", "kubernetes"),
];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Domain,
    Unknown,
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkillCategory::Technical => "technical",
            SkillCategory::Soft => "soft",
            SkillCategory::Domain => "domain",
            SkillCategory::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// How a raw token resolved against the taxonomy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Exact,
    Alias,
    Fuzzy,
    Unmatched,
}

/// The standardized descriptor a raw skill token resolves to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CanonicalSkill {
    pub canonical_name: String,
    pub category: SkillCategory,
    pub match_method: MatchMethod,
    pub confidence: f64,
}

/// Immutable canonical + alias tables, built once and shared by reference.
/// Lookups are pure functions of their input, so the table is safe for
/// unrestricted concurrent reads.
#[derive(Debug)]
pub struct SkillTaxonomy {
    /// canonical entries in insertion order; fuzzy ties resolve to the
    /// first-defined entry
    entries: Vec<(String, SkillCategory)>,
    index: HashMap<String, usize>,
    aliases: HashMap<String, String>,
}

impl SkillTaxonomy {
    /// Build a taxonomy from explicit tables. Entry order is significant:
    /// it is the fuzzy tie-break order.
    pub fn with_tables(
        entries: Vec<(String, SkillCategory)>,
        aliases: Vec<(String, String)>,
    ) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self {
            entries,
            index,
            aliases: aliases.into_iter().collect(),
        }
    }

    /// The built-in taxonomy: fixed technical, soft, and domain lists.
    pub fn builtin() -> Self {
        let entries = TECHNICAL_SKILLS
            .iter()
            .map(|s| (s.to_string(), SkillCategory::Technical))
            .chain(
                SOFT_SKILLS
                    .iter()
                    .map(|s| (s.to_string(), SkillCategory::Soft)),
            )
            .chain(
                DOMAIN_SKILLS
                    .iter()
                    .map(|s| (s.to_string(), SkillCategory::Domain)),
            )
            .collect();
        let aliases = SKILL_ALIASES
            .iter()
            .map(|(a, c)| (a.to_string(), c.to_string()))
            .collect();
        Self::with_tables(entries, aliases)
    }

    /// Process-wide shared instance of the built-in taxonomy.
    pub fn shared() -> &'static SkillTaxonomy {
        static TAXONOMY: OnceLock<SkillTaxonomy> = OnceLock::new();
        TAXONOMY.get_or_init(SkillTaxonomy::builtin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve one raw token. First match wins: exact, then alias, then the
    /// highest fuzzy similarity at or above [`FUZZY_ACCEPT_THRESHOLD`].
    /// Empty input resolves to Unmatched, never an error.
    pub fn map_skill(&self, raw: &str) -> CanonicalSkill {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Self::unmatched(normalized);
        }

        if let Some(&idx) = self.index.get(&normalized) {
            let (name, category) = &self.entries[idx];
            return CanonicalSkill {
                canonical_name: name.clone(),
                category: *category,
                match_method: MatchMethod::Exact,
                confidence: 1.0,
            };
        }

        if let Some(canonical) = self.aliases.get(&normalized) {
            if let Some(&idx) = self.index.get(canonical) {
                let (name, category) = &self.entries[idx];
                return CanonicalSkill {
                    canonical_name: name.clone(),
                    category: *category,
                    match_method: MatchMethod::Alias,
                    confidence: 1.0,
                };
            }
        }

        if let Some((idx, similarity)) = self.best_fuzzy_match(&normalized) {
            let (name, category) = &self.entries[idx];
            return CanonicalSkill {
                canonical_name: name.clone(),
                category: *category,
                match_method: MatchMethod::Fuzzy,
                confidence: similarity,
            };
        }

        Self::unmatched(normalized)
    }

    /// Resolve a list of tokens, preserving order.
    pub fn map_skill_list<S: AsRef<str>>(&self, raw: &[S]) -> Vec<CanonicalSkill> {
        raw.iter().map(|s| self.map_skill(s.as_ref())).collect()
    }

    /// Rank every canonical entry by similarity; keep the best at or above
    /// the threshold. Strictly-greater comparison keeps the first-defined
    /// entry on ties.
    fn best_fuzzy_match(&self, normalized: &str) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, (name, _)) in self.entries.iter().enumerate() {
            let similarity = normalized_similarity(normalized, name);
            if similarity < FUZZY_ACCEPT_THRESHOLD {
                continue;
            }
            match best {
                Some((_, best_sim)) if similarity <= best_sim => {}
                _ => best = Some((idx, similarity)),
            }
        }
        best
    }

    fn unmatched(normalized: String) -> CanonicalSkill {
        CanonicalSkill {
            canonical_name: normalized,
            category: SkillCategory::Unknown,
            match_method: MatchMethod::Unmatched,
            confidence: 0.0,
        }
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let taxonomy = SkillTaxonomy::builtin();
        let upper = taxonomy.map_skill("JavaScript");
        let lower = taxonomy.map_skill("javascript");
        assert_eq!(upper, lower);
        assert_eq!(upper.match_method, MatchMethod::Exact);
        assert_eq!(upper.confidence, 1.0);
        assert_eq!(upper.category, SkillCategory::Technical);
    }

    #[test]
    fn test_alias_match() {
        let taxonomy = SkillTaxonomy::builtin();
        let mapped = taxonomy.map_skill("js");
        assert_eq!(mapped.canonical_name, "javascript");
        assert_eq!(mapped.match_method, MatchMethod::Alias);
        assert_eq!(mapped.confidence, 1.0);
    }

    #[test]
    fn test_java_does_not_resolve_to_javascript() {
        let taxonomy = SkillTaxonomy::builtin();
        let mapped = taxonomy.map_skill("java");
        assert_eq!(mapped.canonical_name, "java");
        assert_eq!(mapped.match_method, MatchMethod::Exact);
    }

    #[test]
    fn test_fuzzy_match_single_typo() {
        let taxonomy = SkillTaxonomy::builtin();
        let mapped = taxonomy.map_skill("javscript");
        assert_eq!(mapped.canonical_name, "javascript");
        assert_eq!(mapped.match_method, MatchMethod::Fuzzy);
        assert!((mapped.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_fuzzy_rejects_below_threshold() {
        let taxonomy = SkillTaxonomy::builtin();
        let mapped = taxonomy.map_skill("jscript");
        assert_eq!(mapped.match_method, MatchMethod::Unmatched);
        assert_eq!(mapped.category, SkillCategory::Unknown);
        assert_eq!(mapped.confidence, 0.0);
    }

    #[test]
    fn test_empty_input_is_unmatched() {
        let taxonomy = SkillTaxonomy::builtin();
        let mapped = taxonomy.map_skill("   ");
        assert_eq!(mapped.match_method, MatchMethod::Unmatched);
        assert_eq!(mapped.canonical_name, "");
    }

    #[test]
    fn test_fuzzy_tie_breaks_by_insertion_order() {
        let taxonomy = SkillTaxonomy::with_tables(
            vec![
                ("testing".to_string(), SkillCategory::Domain),
                ("tasting".to_string(), SkillCategory::Domain),
            ],
            vec![],
        );
        // "tosting" is one substitution from both entries
        let mapped = taxonomy.map_skill("tosting");
        assert_eq!(mapped.match_method, MatchMethod::Fuzzy);
        assert_eq!(mapped.canonical_name, "testing");
    }

    #[test]
    fn test_map_skill_list_preserves_order() {
        let taxonomy = SkillTaxonomy::builtin();
        let mapped = taxonomy.map_skill_list(&["python", "js", "underwater-basket-weaving"]);
        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped[0].canonical_name, "python");
        assert_eq!(mapped[1].canonical_name, "javascript");
        assert_eq!(mapped[2].match_method, MatchMethod::Unmatched);
    }

    #[test]
    fn test_shared_instance_is_stable() {
        let a = SkillTaxonomy::shared();
        let b = SkillTaxonomy::shared();
        assert!(std::ptr::eq(a, b));
        assert!(!a.is_empty());
        assert_eq!(a.len(), 42);
    }
}
