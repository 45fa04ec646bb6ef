//! Ordered keyword rule tables for modality and classification.
//!
//! Each table is evaluated top to bottom against the lowercased statement
//! text; the first rule whose matcher fires decides the outcome, and the
//! table's fallback applies when none does.

use crate::config::RulesConfig;
use crate::types::{Classification, Modality};

#[derive(Debug, Clone)]
pub enum Matcher {
    /// Fires when any needle occurs
    Any(Vec<&'static str>),
    /// Fires only when every needle occurs
    All(Vec<&'static str>),
}

impl Matcher {
    /// `haystack` must already be lowercased
    fn matches(&self, haystack: &str) -> bool {
        match self {
            Matcher::Any(needles) => needles.iter().any(|n| haystack.contains(&n.to_lowercase())),
            Matcher::All(needles) => needles.iter().all(|n| haystack.contains(&n.to_lowercase())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule<T> {
    pub matcher: Matcher,
    pub outcome: T,
}

#[derive(Debug, Clone)]
pub struct RuleTable<T> {
    rules: Vec<Rule<T>>,
    fallback: T,
}

impl<T: Copy> RuleTable<T> {
    pub fn new(rules: Vec<Rule<T>>, fallback: T) -> Self {
        Self { rules, fallback }
    }

    pub fn evaluate(&self, lowered: &str) -> T {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(lowered))
            .map(|rule| rule.outcome)
            .unwrap_or(self.fallback)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn rule<T>(matcher: Matcher, outcome: T) -> Rule<T> {
    Rule { matcher, outcome }
}

/// Both rule tables, built once from configuration
#[derive(Debug, Clone)]
pub struct Classifier {
    modality: RuleTable<Modality>,
    classification: RuleTable<Classification>,
}

impl Classifier {
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            modality: modality_table(rules),
            classification: classification_table(rules),
        }
    }

    pub fn modality(&self, text: &str) -> Modality {
        self.modality.evaluate(&text.to_lowercase())
    }

    pub fn classification(&self, text: &str) -> Classification {
        self.classification.evaluate(&text.to_lowercase())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&RulesConfig::default())
    }
}

pub fn modality_table(rules: &RulesConfig) -> RuleTable<Modality> {
    let mut table = vec![
        rule(Matcher::Any(vec!["Simplificado", "OPP"]), Modality::Simplified),
        rule(Matcher::Any(vec!["13.485"]), Modality::Law13485),
        rule(Matcher::Any(vec!["SIPADE", "Ordinário"]), Modality::OrdinarySpecial),
    ];
    if rules.pgfn_modality {
        table.push(rule(Matcher::Any(vec!["PGFN"]), Modality::Pgfn));
    }
    RuleTable::new(table, Modality::Other)
}

pub fn classification_table(rules: &RulesConfig) -> RuleTable<Classification> {
    let mut codes = vec!["1082", "1138", "1646"];
    if rules.cpss_code {
        codes.push("CPSS");
    }
    let table = vec![
        // 37O3: OCR often reads the zero as a letter
        rule(Matcher::Any(vec!["3703", "37O3", "PASEP"]), Classification::Pasep),
        rule(Matcher::Any(codes), Classification::SocialSecurityPatronal),
        rule(
            Matcher::All(vec!["Previdenciário", "13.485"]),
            Classification::SocialSecuritySpecial,
        ),
        rule(Matcher::Any(vec!["Previdenciário"]), Classification::SocialSecurity),
    ];
    RuleTable::new(table, Classification::ToVerify)
}
