//! Candidate Expander: jobs → skills → courses.

use std::collections::HashSet;

use serde::Serialize;

use crate::curation::parse::Verdict;
use crate::models::taxonomy::CourseMetadata;
use crate::taxonomy::Taxonomy;

/// A course under consideration, carrying the fields derived while it moves through
/// the pipeline. Working fields never reach the exported result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub course: CourseMetadata,
    /// Share of the target jobs' skills this course covers, in [0, 1].
    pub intersection_ranker: f64,
    pub relevant: Option<Verdict>,
}

impl Candidate {
    pub fn new(course: CourseMetadata) -> Self {
        Self {
            course,
            intersection_ranker: 0.0,
            relevant: None,
        }
    }
}

/// Ids of the jobs whose name is in `job_names`. Unknown names match nothing.
pub fn job_ids_for(taxonomy: &Taxonomy, job_names: &[String]) -> HashSet<i64> {
    let wanted: HashSet<&str> = job_names.iter().map(String::as_str).collect();
    taxonomy
        .jobs
        .iter()
        .filter(|j| wanted.contains(j.job_name.as_str()))
        .map(|j| j.job_id)
        .collect()
}

pub fn skill_ids_for(taxonomy: &Taxonomy, job_ids: &HashSet<i64>) -> HashSet<i64> {
    taxonomy
        .job_skills
        .iter()
        .filter(|e| job_ids.contains(&e.job_id))
        .map(|e| e.skill_id)
        .collect()
}

/// Every course teaching at least one skill of at least one named job, in catalog order.
pub fn expand_candidates(job_names: &[String], taxonomy: &Taxonomy) -> Vec<Candidate> {
    let job_ids = job_ids_for(taxonomy, job_names);
    if job_ids.is_empty() {
        return Vec::new();
    }
    let skill_ids = skill_ids_for(taxonomy, &job_ids);

    let course_keys: HashSet<&str> = taxonomy
        .course_skills
        .iter()
        .filter(|e| skill_ids.contains(&e.skill_id))
        .map(|e| e.course_key.as_str())
        .collect();

    taxonomy
        .course_metadata()
        .iter()
        .filter(|c| course_keys.contains(c.course_key.as_str()))
        .cloned()
        .map(Candidate::new)
        .collect()
}
