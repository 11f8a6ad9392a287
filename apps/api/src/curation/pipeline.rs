//! Curation pipeline: orchestrates one run from free-text query to labeled table.
//!
//! Flow: select jobs → expand candidates → intersection rank + prune →
//!       relevance fan-out → name clusters → per-cluster assignment fan-out → assemble.
//!
//! Only classifier calls suspend; every join and ranking step is in-memory.

use tracing::info;

use crate::curation::candidates::expand_candidates;
use crate::curation::clusters::{assign_clusters, name_clusters};
use crate::curation::progress::{ProgressReporter, Stage};
use crate::curation::ranking::{prune_for_classification, rank_candidates};
use crate::curation::relevance::classify_relevance;
use crate::curation::relevance_filter::select_relevant_jobs;
use crate::curation::result::CurationResult;
use crate::curation::CurationSettings;
use crate::errors::AppError;
use crate::llm_client::Classifier;
use crate::taxonomy::Taxonomy;

/// Runs the full curation for `user_input` against a taxonomy snapshot.
///
/// Empty intermediate results (no matching jobs, no candidates, nothing relevant) flow
/// through to an empty result instead of an error. The returned cluster list is exactly
/// the list that was classified.
pub async fn generate_curation(
    user_input: &str,
    taxonomy: &Taxonomy,
    classifier: &dyn Classifier,
    settings: &CurationSettings,
    progress: &dyn ProgressReporter,
) -> Result<CurationResult, AppError> {
    // Step 1: query → job titles
    progress.report(Stage::SelectJobs);
    let selection = select_relevant_jobs(user_input, taxonomy, classifier).await?;
    let mut tokens = selection.tokens;
    let job_names = selection.job_names;

    // Step 2: jobs → skills → courses
    progress.report(Stage::ExpandCourses);
    let mut candidates = expand_candidates(&job_names, taxonomy);
    info!("{} candidate courses from {} jobs", candidates.len(), job_names.len());

    // Step 3: cheap pre-filter before the expensive fan-out
    progress.report(Stage::RankCandidates);
    rank_candidates(&mut candidates, &job_names, taxonomy);
    let candidates = prune_for_classification(candidates, settings);
    info!("{} candidates kept for classification", candidates.len());

    // Step 4: per-course relevance
    progress.report(Stage::ClassifyRelevance);
    let (survivors, relevance_tokens) =
        classify_relevance(candidates, &job_names, classifier, settings.concurrency).await?;
    tokens += relevance_tokens;
    progress.report(Stage::DropIrrelevant);

    // Step 5: cluster names (fixed once created)
    progress.report(Stage::NameClusters);
    let (clusters, naming_tokens) = name_clusters(&survivors, user_input, classifier).await?;
    tokens += naming_tokens;

    // Step 6: one column per cluster
    progress.report(Stage::AssignClusters);
    let columns = assign_clusters(&survivors, clusters.names(), classifier, settings.concurrency)
        .await?;
    tokens += columns.tokens;

    // Step 7: drop working fields, zip columns onto courses
    progress.report(Stage::Cleaning);
    let result = CurationResult::assemble(survivors, &clusters, columns, tokens)?;

    info!(
        "Curation complete: {} courses, {} clusters, {} tokens",
        result.courses.len(),
        result.clusters.len(),
        result.tokens_used
    );
    progress.report(Stage::Done);

    Ok(result)
}
