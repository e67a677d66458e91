//! Run report

use contentlib_core::{ContentKind, ContentRegistry, Difficulty, SourceKind};
use contentlib_loader::LoadReport;
use contentlib_service::FlushSummary;
use serde::Serialize;
use std::fmt;

/// Flush counters in serializable form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlushCounts {
    pub announced: usize,
    pub refused: usize,
    pub skipped: usize,
}

impl From<FlushSummary> for FlushCounts {
    fn from(summary: FlushSummary) -> Self {
        Self {
            announced: summary.announced,
            refused: summary.refused,
            skipped: summary.skipped,
        }
    }
}

/// Content attributed to one source
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub version: String,
    pub guid: String,
    pub kind: SourceKind,
    pub items: Vec<String>,
    pub enemies: Vec<String>,
    pub valuables: Vec<String>,
}

impl SourceSummary {
    /// Summaries for every source, in first-registration order
    pub fn collect(registry: &ContentRegistry) -> Vec<Self> {
        registry
            .all()
            .into_iter()
            .map(|(source, objects)| {
                let names = |kind: ContentKind| -> Vec<String> {
                    objects
                        .iter()
                        .filter(|o| o.kind() == kind)
                        .map(|o| o.name().to_string())
                        .collect()
                };

                Self {
                    name: source.name().to_string(),
                    version: source.version().to_string(),
                    guid: source.guid().to_string(),
                    kind: source.kind(),
                    items: names(ContentKind::Item),
                    enemies: names(ContentKind::Enemy),
                    valuables: names(ContentKind::Valuable),
                }
            })
            .collect()
    }
}

/// Failure entry keyed by path or content name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub subject: String,
    pub reason: String,
}

/// Everything observed during one simulated startup
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostReport {
    pub packages_loaded: usize,
    pub packages_failed: Vec<Failure>,
    pub descriptor_failures: Vec<String>,
    pub rejected: Vec<Failure>,
    pub enemy_flush: FlushCounts,
    pub rebuilds: Vec<FlushCounts>,
    pub catalog_items: Vec<String>,
    pub templates_fixed: usize,
    pub difficulty_tables: Vec<(Difficulty, Vec<String>)>,
    pub spawned: usize,
    pub sources: Vec<SourceSummary>,
}

impl HostReport {
    pub(crate) fn record_load(&mut self, load: &LoadReport) {
        self.packages_loaded = load.loaded.len();

        self.packages_failed = load
            .failed
            .iter()
            .map(|f| Failure {
                subject: f.path.display().to_string(),
                reason: f.error.to_string(),
            })
            .collect();

        for package in &load.loaded {
            self.descriptor_failures
                .extend(package.descriptor_failures.iter().map(|e| e.to_string()));
            self.rejected.extend(package.rejected.iter().map(|(name, reason)| Failure {
                subject: name.clone(),
                reason: reason.to_string(),
            }));
        }
    }
}

impl fmt::Display for HostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Packages: {} loaded, {} failed",
            self.packages_loaded,
            self.packages_failed.len()
        )?;
        for failure in &self.packages_failed {
            writeln!(f, "  failed {}: {}", failure.subject, failure.reason)?;
        }
        for failure in &self.descriptor_failures {
            writeln!(f, "  {}", failure)?;
        }
        for rejection in &self.rejected {
            writeln!(f, "  rejected {}: {}", rejection.subject, rejection.reason)?;
        }

        writeln!(
            f,
            "Enemies: {} added, {} refused, {} skipped",
            self.enemy_flush.announced, self.enemy_flush.refused, self.enemy_flush.skipped
        )?;
        for (difficulty, names) in &self.difficulty_tables {
            writeln!(f, "  {}: {}", difficulty, names.join(", "))?;
        }

        for (i, rebuild) in self.rebuilds.iter().enumerate() {
            writeln!(
                f,
                "Catalog rebuild {}: {} added, {} refused",
                i + 1,
                rebuild.announced,
                rebuild.refused
            )?;
        }
        writeln!(f, "Catalog: {}", self.catalog_items.join(", "))?;
        if self.templates_fixed > 0 {
            writeln!(f, "Fixed {} item templates", self.templates_fixed)?;
        }

        if self.spawned > 0 {
            writeln!(f, "Spawned {} network prefabs", self.spawned)?;
        }

        writeln!(f, "Sources:")?;
        for source in &self.sources {
            writeln!(
                f,
                "  {} {} ({}): {} items, {} enemies, {} valuables",
                source.name,
                source.version,
                source.guid,
                source.items.len(),
                source.enemies.len(),
                source.valuables.len()
            )?;
        }

        Ok(())
    }
}
