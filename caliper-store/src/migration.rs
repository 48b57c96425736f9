use std::collections::BTreeSet;
use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use caliper_core::config::{CaliperConfig, LifecycleConfig, ScoringConfig};
use caliper_core::constants::LEGACY_SCHEMA_VERSION;
use caliper_core::errors::MigrationError;
use caliper_core::pattern::{
    MatchStats, MigrationProvenance, Pattern, PatternLibrary, PatternStatus, Polarity,
};
use caliper_core::Item;
use caliper_keywords::KeywordExtractor;

/// One entry of the legacy (schema 1) format: a free-text rule with a
/// declared polarity and optional historical counts.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyPattern {
    pub rule: String,
    pub polarity: String,
    #[serde(default)]
    pub match_count: Option<u64>,
    #[serde(default)]
    pub correct_count: Option<u64>,
}

#[derive(Deserialize)]
struct LegacyFile {
    schema_version: u32,
    patterns: Vec<serde_json::Value>,
}

/// A legacy entry the migration skipped, and why. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationWarning {
    /// Position of the entry in the legacy file.
    pub index: usize,
    pub rule_excerpt: String,
    pub reason: String,
}

/// A sample item whose predicted polarity differs between the legacy rules
/// and the migrated patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDiscrepancy {
    pub item_id: String,
    pub legacy_polarity: Option<Polarity>,
    pub migrated_polarity: Option<Polarity>,
}

/// Upgrades legacy free-text rules into keyword patterns.
///
/// Keywords come from the same extractor the live pipeline uses, so a rule
/// and the pattern migrated from it match exactly the same items.
pub struct Migrator {
    extractor: KeywordExtractor,
    lifecycle: LifecycleConfig,
    scoring: ScoringConfig,
}

impl Migrator {
    pub fn new(extractor: KeywordExtractor, config: &CaliperConfig) -> Self {
        Self {
            extractor,
            lifecycle: config.lifecycle.clone(),
            scoring: config.scoring.clone(),
        }
    }

    /// Convert one legacy entry. The error is the reason the entry cannot
    /// be represented; callers turn it into a warning.
    pub fn migrate(&self, legacy: &LegacyPattern) -> Result<Pattern, String> {
        let polarity = parse_polarity(&legacy.polarity)?;

        let keywords = self.extractor.extract(&legacy.rule);
        if keywords.is_empty() {
            return Err("rule text yields no keywords".to_string());
        }

        let stats = match (legacy.match_count, legacy.correct_count) {
            (None, None) => MatchStats::new(),
            (matched, correct) => {
                let matched = matched.unwrap_or(0);
                let correct = correct.unwrap_or(0);
                MatchStats::from_counts(matched, correct).ok_or_else(|| {
                    format!("correct_count {correct} exceeds match_count {matched}")
                })?
            }
        };

        let mut pattern = Pattern::new(keywords, polarity);
        pattern.stats = stats;
        pattern.status = self.inferred_status(stats);
        Ok(pattern)
    }

    /// Status a migrated entry starts in: no history means proposed,
    /// history is held against the same gates live resolution uses.
    fn inferred_status(&self, stats: MatchStats) -> PatternStatus {
        if stats.is_empty() {
            PatternStatus::Proposed
        } else if self.lifecycle.qualifies_for_commit(stats) {
            PatternStatus::Committed
        } else if self.lifecycle.qualifies_for_reject(stats) {
            PatternStatus::Rejected
        } else {
            PatternStatus::Proposed
        }
    }

    /// Migrate a whole legacy file. Every entry is attempted; malformed
    /// entries are skipped and reported, never silently dropped and never
    /// fatal to the rest of the file.
    pub fn migrate_library(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(PatternLibrary, Vec<MigrationWarning>), MigrationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MigrationError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let file: LegacyFile =
            serde_json::from_str(&text).map_err(|e| MigrationError::NotLegacy {
                details: e.to_string(),
            })?;
        if file.schema_version != LEGACY_SCHEMA_VERSION {
            return Err(MigrationError::NotLegacy {
                details: format!(
                    "expected schema {LEGACY_SCHEMA_VERSION}, found {}",
                    file.schema_version
                ),
            });
        }

        let mut library = PatternLibrary::empty();
        library.provenance = Some(MigrationProvenance {
            source_schema: LEGACY_SCHEMA_VERSION,
            migrated_at: Utc::now(),
        });

        let mut warnings = Vec::new();
        for (index, value) in file.patterns.iter().enumerate() {
            let outcome = serde_json::from_value::<LegacyPattern>(value.clone())
                .map_err(|e| (excerpt_of(value), e.to_string()))
                .and_then(|legacy| {
                    let rule_excerpt = excerpt(&legacy.rule);
                    self.migrate(&legacy).map_err(|reason| (rule_excerpt, reason))
                });

            match outcome {
                Ok(pattern) => library.insert(pattern),
                Err((rule_excerpt, reason)) => {
                    warn!(index, rule = %rule_excerpt, %reason, "skipping legacy pattern");
                    warnings.push(MigrationWarning {
                        index,
                        rule_excerpt,
                        reason,
                    });
                }
            }
        }

        info!(
            migrated = library.len(),
            skipped = warnings.len(),
            "legacy pattern library migrated"
        );
        Ok((library, warnings))
    }

    /// Re-evaluate sample items against both representations and report
    /// every item whose predicted polarity differs. Warnings, not errors:
    /// migration is allowed to be imperfect, it has to be observable.
    pub fn validate_migration(
        &self,
        legacy: &[LegacyPattern],
        migrated: &PatternLibrary,
        sample_items: &[Item],
    ) -> Vec<MigrationDiscrepancy> {
        // Transient patterns for the legacy side, so both sides match
        // through the identical coverage rule.
        let legacy_patterns: Vec<Pattern> = legacy
            .iter()
            .filter_map(|entry| {
                let polarity = parse_polarity(&entry.polarity).ok()?;
                let keywords = self.extractor.extract(&entry.rule);
                if keywords.is_empty() {
                    return None;
                }
                Some(Pattern::new(keywords, polarity))
            })
            .collect();

        let mut discrepancies = Vec::new();
        for item in sample_items {
            let item_keywords = self.extractor.extract(&item.full_text());
            let legacy_polarity =
                self.dominant_polarity(legacy_patterns.iter(), &item_keywords);
            let migrated_polarity =
                self.dominant_polarity(migrated.patterns.values(), &item_keywords);

            if legacy_polarity != migrated_polarity {
                warn!(
                    item_id = %item.id,
                    legacy = ?legacy_polarity,
                    migrated = ?migrated_polarity,
                    "migration changed predicted polarity"
                );
                discrepancies.push(MigrationDiscrepancy {
                    item_id: item.id.clone(),
                    legacy_polarity,
                    migrated_polarity,
                });
            }
        }
        discrepancies
    }

    /// Majority polarity over matching patterns; a tie or no match is None.
    fn dominant_polarity<'a>(
        &self,
        patterns: impl Iterator<Item = &'a Pattern>,
        item_keywords: &BTreeSet<String>,
    ) -> Option<Polarity> {
        let mut good = 0usize;
        let mut bad = 0usize;
        for pattern in patterns {
            if pattern.coverage(item_keywords) >= self.scoring.match_coverage {
                match pattern.polarity {
                    Polarity::Good => good += 1,
                    Polarity::Bad => bad += 1,
                }
            }
        }
        match good.cmp(&bad) {
            std::cmp::Ordering::Greater => Some(Polarity::Good),
            std::cmp::Ordering::Less => Some(Polarity::Bad),
            std::cmp::Ordering::Equal => None,
        }
    }
}

fn parse_polarity(raw: &str) -> Result<Polarity, String> {
    match raw.trim().to_lowercase().as_str() {
        "good" => Ok(Polarity::Good),
        "bad" => Ok(Polarity::Bad),
        other => Err(format!("unknown polarity {other:?}")),
    }
}

fn excerpt(rule: &str) -> String {
    const MAX: usize = 60;
    if rule.chars().count() <= MAX {
        rule.to_string()
    } else {
        let cut: String = rule.chars().take(MAX).collect();
        format!("{cut}…")
    }
}

fn excerpt_of(value: &serde_json::Value) -> String {
    value
        .get("rule")
        .and_then(|r| r.as_str())
        .map(excerpt)
        .unwrap_or_else(|| "<no rule field>".to_string())
}
