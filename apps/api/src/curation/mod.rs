// Curation pipeline: query → jobs → candidate courses → ranked → LLM-pruned → clustered.
// All classifier calls go through the `Classifier` trait; nothing here talks HTTP.

pub mod candidates;
pub mod clusters;
pub mod fan_out;
pub mod handlers;
pub mod parse;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod ranking;
pub mod relevance;
pub mod relevance_filter;
pub mod result;

#[cfg(test)]
pub mod testing;

/// Tuning knobs of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationSettings {
    /// Classifier calls in flight per fan-out batch.
    pub concurrency: usize,
    /// Candidates kept after intersection ranking.
    pub max_candidates: usize,
    /// Courses need strictly more enrollments than this (unless Executive Education).
    pub min_enrollment: i64,
}

impl Default for CurationSettings {
    fn default() -> Self {
        Self {
            concurrency: 8,
            max_candidates: 200,
            min_enrollment: 100,
        }
    }
}
