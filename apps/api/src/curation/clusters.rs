//! Cluster Namer and Cluster Assigner.
//!
//! The cluster list is fixed once named; the assigner fills one column per cluster and a
//! column only becomes visible after its whole batch has been answered.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::curation::candidates::Candidate;
use crate::curation::fan_out::classify_verdicts;
use crate::curation::parse::{parse_string_list, Verdict};
use crate::curation::prompts::{cluster_check_prompt, cluster_naming_prompt};
use crate::errors::AppError;
use crate::llm_client::{Classifier, ModelTier};

/// Audience segments appended to every curation, in this order.
pub const FIXED_CLUSTERS: [&str; 3] = [
    "For Executive Leaders",
    "For Managers and High Potentials",
    "For Individual Contributors",
];

/// Ordered, duplicate-free cluster names. Cannot be extended after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSet {
    names: Vec<String>,
}

impl ClusterSet {
    /// Generated names first, then the fixed segments. Names are compared
    /// case-insensitively: the first spelling of a generated duplicate wins, and a
    /// generated name equal to a fixed segment is dropped in favour of the fixed one.
    pub fn from_generated(generated: Vec<String>) -> Self {
        let fixed: HashSet<String> = FIXED_CLUSTERS.iter().map(|f| f.to_lowercase()).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut names = Vec::new();

        for name in generated {
            let name = name.trim().to_string();
            let key = name.to_lowercase();
            if name.is_empty() || fixed.contains(&key) || !seen.insert(key) {
                warn!("Skipping duplicate or empty cluster name {:?}", name);
                continue;
            }
            names.push(name);
        }
        names.extend(FIXED_CLUSTERS.iter().map(|f| f.to_string()));

        Self { names }
    }

    pub fn fixed_only() -> Self {
        Self::from_generated(Vec::new())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Asks the quality-tier model for marketing-style group names. With no surviving
/// courses there is nothing to name, so only the fixed segments are returned.
pub async fn name_clusters(
    survivors: &[Candidate],
    user_input: &str,
    classifier: &dyn Classifier,
) -> Result<(ClusterSet, u64), AppError> {
    if survivors.is_empty() {
        return Ok((ClusterSet::fixed_only(), 0));
    }

    let titles: Vec<&str> = survivors
        .iter()
        .map(|c| c.course.course_title.as_str())
        .collect();
    let completion = classifier
        .classify(&cluster_naming_prompt(&titles, user_input), ModelTier::Quality)
        .await
        .map_err(|e| AppError::Llm(format!("Cluster naming failed: {e}")))?;

    let clusters = ClusterSet::from_generated(parse_string_list(&completion.text));
    info!("Clusters: {:?}", clusters.names());

    Ok((clusters, u64::from(completion.tokens)))
}

/// One verdict column per cluster, each aligned with the survivors it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterColumns {
    pub columns: Vec<Vec<Verdict>>,
    pub tokens: u64,
}

/// Classifies every (course, cluster) pair: clusters run one after another, courses
/// within a cluster run concurrently. Issues exactly `clusters × survivors` calls, and
/// any failure fails the whole assignment rather than dropping a cluster.
pub async fn assign_clusters(
    survivors: &[Candidate],
    clusters: &[String],
    classifier: &dyn Classifier,
    concurrency: usize,
) -> Result<ClusterColumns, AppError> {
    let mut columns = Vec::with_capacity(clusters.len());
    let mut tokens = 0;

    for cluster in clusters {
        let prompts = survivors
            .iter()
            .map(|c| cluster_check_prompt(&c.course.course_title, cluster))
            .collect();
        let label = format!("Cluster '{cluster}'");
        let batch = classify_verdicts(classifier, prompts, concurrency, &label).await?;
        tokens += batch.tokens;
        columns.push(batch.verdicts);
    }

    Ok(ClusterColumns { columns, tokens })
}
