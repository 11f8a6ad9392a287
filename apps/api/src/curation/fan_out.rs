//! Ordered parallel map: bounded-concurrency fan-out whose results line up with its input.
//!
//! Both classification passes zip their answers back onto candidates by position, so the
//! output order must be submission order, never completion order.

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::debug;

use crate::curation::parse::Verdict;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, Classifier, ModelTier};

/// Runs `f` over `items` with at most `concurrency` futures in flight and returns the
/// outputs in input order. The first error aborts the batch.
pub async fn ordered_parallel_map<T, R, E, F, Fut>(
    items: Vec<T>,
    concurrency: usize,
    f: F,
) -> Result<Vec<R>, E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    stream::iter(items.into_iter().map(f))
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

/// Answers from one classification batch, aligned with the submitted prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictBatch {
    pub verdicts: Vec<Verdict>,
    pub tokens: u64,
}

/// Sends every prompt to the classifier through the ordered pool and parses each answer
/// strictly as a `Verdict`.
pub async fn classify_verdicts(
    classifier: &dyn Classifier,
    prompts: Vec<Vec<ChatMessage>>,
    concurrency: usize,
    label: &str,
) -> Result<VerdictBatch, AppError> {
    let total = prompts.len();
    debug!("{label}: dispatching {total} classifier calls ({concurrency} in flight)");

    let answers = ordered_parallel_map(prompts, concurrency, |messages| async move {
        let completion = classifier
            .classify(&messages, ModelTier::Fast)
            .await
            .map_err(|e| AppError::Llm(format!("{label} classification failed: {e}")))?;
        let verdict = Verdict::parse(&completion.text)
            .map_err(|e| AppError::ClassifierOutput(format!("{label}: {e}")))?;
        Ok::<_, AppError>((verdict, completion.tokens))
    })
    .await?;

    let tokens = answers.iter().map(|(_, t)| u64::from(*t)).sum();
    let verdicts: Vec<Verdict> = answers.into_iter().map(|(v, _)| v).collect();

    debug!(
        "{label}: {total} calls complete, {} True, {tokens} tokens",
        verdicts.iter().filter(|v| v.is_true()).count()
    );

    Ok(VerdictBatch { verdicts, tokens })
}
