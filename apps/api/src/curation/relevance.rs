//! Relevance Classifier: one True/False call per candidate, fanned out through the
//! ordered pool.

use tracing::info;

use crate::curation::candidates::Candidate;
use crate::curation::fan_out::classify_verdicts;
use crate::curation::prompts::course_relevance_prompt;
use crate::errors::AppError;
use crate::llm_client::Classifier;

/// Labels every candidate and keeps the ones judged relevant, in their original order.
/// Returns the survivors and the tokens spent.
pub async fn classify_relevance(
    candidates: Vec<Candidate>,
    job_names: &[String],
    classifier: &dyn Classifier,
    concurrency: usize,
) -> Result<(Vec<Candidate>, u64), AppError> {
    let prompts = candidates
        .iter()
        .map(|c| course_relevance_prompt(job_names, &c.course.course_title))
        .collect();

    let batch = classify_verdicts(classifier, prompts, concurrency, "Course relevance").await?;

    let total = candidates.len();
    let survivors: Vec<Candidate> = candidates
        .into_iter()
        .zip(batch.verdicts)
        .map(|(mut candidate, verdict)| {
            candidate.relevant = Some(verdict);
            candidate
        })
        .filter(|c| c.relevant.is_some_and(|v| v.is_true()))
        .collect();

    info!("{} of {} candidates judged relevant", survivors.len(), total);
    Ok((survivors, batch.tokens))
}
