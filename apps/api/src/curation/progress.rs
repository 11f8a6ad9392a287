//! Progress reporting for a curation run.

use tracing::info;

/// Named checkpoints of a run, from taxonomy fetch to the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchJobs,
    FetchJobSkills,
    FetchCourseSkills,
    FetchCourseMetadata,
    DataLoaded,
    SelectJobs,
    ExpandCourses,
    RankCandidates,
    ClassifyRelevance,
    DropIrrelevant,
    NameClusters,
    AssignClusters,
    Cleaning,
    Done,
}

impl Stage {
    /// Completion percentage within its phase (data load or curation).
    pub fn percent(self) -> u8 {
        match self {
            Stage::FetchJobs => 25,
            Stage::FetchJobSkills => 50,
            Stage::FetchCourseSkills => 75,
            Stage::FetchCourseMetadata => 100,
            Stage::DataLoaded => 100,
            Stage::SelectJobs => 0,
            Stage::ExpandCourses => 20,
            Stage::RankCandidates => 25,
            Stage::ClassifyRelevance => 35,
            Stage::DropIrrelevant => 55,
            Stage::NameClusters => 65,
            Stage::AssignClusters => 75,
            Stage::Cleaning => 95,
            Stage::Done => 100,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Stage::FetchJobs => "Fetch job data",
            Stage::FetchJobSkills => "Fetch job-skill relationships",
            Stage::FetchCourseSkills => "Fetch skill-course relationships",
            Stage::FetchCourseMetadata => "Fetch course metadata",
            Stage::DataLoaded => "Data loaded",
            Stage::SelectJobs => "Asking the classifier which jobs feel relevant to the query",
            Stage::ExpandCourses => "Translating jobs into a course list",
            Stage::RankCandidates => {
                "First pruning phase: picking curation candidates by skill-tag intersection"
            }
            Stage::ClassifyRelevance => {
                "Second pruning phase: classifier selects courses related to the selected jobs"
            }
            Stage::DropIrrelevant => "Dropping courses the classifier did not find relevant",
            Stage::NameClusters => "Generating cluster names for the remaining courses",
            Stage::AssignClusters => "Deciding which clusters each course belongs in",
            Stage::Cleaning => "Cleaning data",
            Stage::Done => "Curation complete",
        }
    }
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, stage: Stage);
}

/// Default reporter: one `info!` line per stage.
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, stage: Stage) {
        info!(percent = stage.percent(), "{}", stage.message());
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingProgress {
    stages: std::sync::Mutex<Vec<Stage>>,
}

#[cfg(test)]
impl RecordingProgress {
    pub fn stages(&self) -> Vec<Stage> {
        self.stages.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ProgressReporter for RecordingProgress {
    fn report(&self, stage: Stage) {
        self.stages.lock().unwrap().push(stage);
    }
}
