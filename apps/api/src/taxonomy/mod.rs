//! Taxonomy: the job → skill → course graph that scopes candidates before any LLM call.

pub mod store;

use std::collections::HashSet;

use tracing::{info, warn};

use crate::curation::progress::{ProgressReporter, Stage};
use crate::errors::AppError;
use crate::models::taxonomy::{CourseMetadata, CourseSkillEdge, Job, JobSkillEdge};
use store::TaxonomyStore;

/// Read-only snapshot of the four taxonomy tables for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    pub jobs: Vec<Job>,
    pub job_skills: Vec<JobSkillEdge>,
    pub course_skills: Vec<CourseSkillEdge>,
    course_metadata: Vec<CourseMetadata>,
}

impl Taxonomy {
    /// Builds a snapshot, keeping the first row for any repeated `course_key`.
    pub fn new(
        jobs: Vec<Job>,
        job_skills: Vec<JobSkillEdge>,
        course_skills: Vec<CourseSkillEdge>,
        course_metadata: Vec<CourseMetadata>,
    ) -> Self {
        let mut seen = HashSet::new();
        let total = course_metadata.len();
        let course_metadata: Vec<CourseMetadata> = course_metadata
            .into_iter()
            .filter(|c| seen.insert(c.course_key.clone()))
            .collect();

        if course_metadata.len() != total {
            warn!(
                "Dropped {} course metadata rows with a duplicate course_key",
                total - course_metadata.len()
            );
        }

        Self {
            jobs,
            job_skills,
            course_skills,
            course_metadata,
        }
    }

    pub fn course_metadata(&self) -> &[CourseMetadata] {
        &self.course_metadata
    }

    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.job_name.as_str()).collect()
    }
}

/// Fetches all four tables in sequence. Store failures are returned immediately:
/// a warehouse that cannot be read is fatal for the run.
pub async fn load_taxonomy(
    store: &dyn TaxonomyStore,
    progress: &dyn ProgressReporter,
) -> Result<Taxonomy, AppError> {
    progress.report(Stage::FetchJobs);
    let jobs = store.fetch_jobs().await?;

    progress.report(Stage::FetchJobSkills);
    let job_skills = store.fetch_job_skills().await?;

    progress.report(Stage::FetchCourseSkills);
    let course_skills = store.fetch_course_skills().await?;

    progress.report(Stage::FetchCourseMetadata);
    let course_metadata = store.fetch_course_metadata().await?;

    progress.report(Stage::DataLoaded);
    info!(
        "Taxonomy loaded: {} jobs, {} job-skill edges, {} course-skill edges, {} courses",
        jobs.len(),
        job_skills.len(),
        course_skills.len(),
        course_metadata.len()
    );

    Ok(Taxonomy::new(jobs, job_skills, course_skills, course_metadata))
}
