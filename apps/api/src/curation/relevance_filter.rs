//! Relevance Filter: maps the free-text query onto known job titles.

use tracing::info;

use crate::curation::parse::parse_string_list;
use crate::curation::prompts::job_selection_prompt;
use crate::errors::AppError;
use crate::llm_client::{Classifier, ModelTier};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSelection {
    /// Most relevant first. Names are passed through unvalidated; ones with no matching
    /// job simply expand to no courses.
    pub job_names: Vec<String>,
    pub tokens: u64,
}

pub async fn select_relevant_jobs(
    user_input: &str,
    taxonomy: &Taxonomy,
    classifier: &dyn Classifier,
) -> Result<JobSelection, AppError> {
    let prompt = job_selection_prompt(user_input, &taxonomy.job_names());
    let completion = classifier
        .classify(&prompt, ModelTier::Fast)
        .await
        .map_err(|e| AppError::Llm(format!("Job selection failed: {e}")))?;

    let job_names = parse_string_list(&completion.text);
    info!("Classifier selected jobs: {:?}", job_names);

    Ok(JobSelection {
        job_names,
        tokens: u64::from(completion.tokens),
    })
}
