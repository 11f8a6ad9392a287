//! Intersection Ranker: cheap skill-overlap pre-filter ahead of the LLM passes.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::warn;

use crate::curation::candidates::{job_ids_for, skill_ids_for, Candidate};
use crate::curation::CurationSettings;
use crate::taxonomy::Taxonomy;

/// Courses in this product line skip the enrollment threshold.
pub const EXECUTIVE_EDUCATION: &str = "Executive Education";

/// Skill names of the named jobs.
///
/// Names come from the course-skill table, not the job-skill table: a job skill that no
/// course teaches has no name and is left out of the set.
pub fn job_skill_names(job_names: &[String], taxonomy: &Taxonomy) -> HashSet<String> {
    let job_ids = job_ids_for(taxonomy, job_names);
    let skill_ids = skill_ids_for(taxonomy, &job_ids);
    taxonomy
        .course_skills
        .iter()
        .filter(|e| skill_ids.contains(&e.skill_id))
        .map(|e| e.skill_name.clone())
        .collect()
}

/// `|course ∩ job| / |job|`: how much of the job skill set the course covers.
/// An empty job skill set scores 0.0 for every course.
pub fn intersection_score(course_skills: &str, job_skills: &HashSet<String>) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }
    let course_set: HashSet<&str> = course_skills.split(',').map(str::trim).collect();
    let covered = job_skills
        .iter()
        .filter(|s| course_set.contains(s.as_str()))
        .count();
    covered as f64 / job_skills.len() as f64
}

/// Writes `intersection_ranker` onto every candidate.
pub fn rank_candidates(candidates: &mut [Candidate], job_names: &[String], taxonomy: &Taxonomy) {
    let job_skills = job_skill_names(job_names, taxonomy);
    if job_skills.is_empty() && !candidates.is_empty() {
        warn!("Job skill set is empty; every candidate scores 0.0");
    }
    for candidate in candidates.iter_mut() {
        candidate.intersection_ranker = intersection_score(&candidate.course.skills, &job_skills);
    }
}

/// Keeps popular courses (or Executive Education), best score first, at most
/// `max_candidates`. Ties keep catalog order.
pub fn prune_for_classification(
    candidates: Vec<Candidate>,
    settings: &CurationSettings,
) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| {
            c.course.enrollment_count > settings.min_enrollment
                || c.course.course_product_line == EXECUTIVE_EDUCATION
        })
        .collect();

    kept.sort_by(|a, b| {
        b.intersection_ranker
            .partial_cmp(&a.intersection_ranker)
            .unwrap_or(Ordering::Equal)
    });
    kept.truncate(settings.max_candidates);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::candidates::expand_candidates;
    use crate::curation::testing::{course, sample_taxonomy};

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_coverage_scores_one() {
        let score = intersection_score("Python, SQL, Excel", &set(&["Python", "SQL"]));
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_coverage_scores_zero() {
        assert_eq!(intersection_score("Excel", &set(&["Python", "SQL"])), 0.0);
    }

    #[test]
    fn test_denominator_is_job_set_not_union() {
        // Jaccard would give 1/4; coverage is 1/2.
        let score = intersection_score("Python, Excel, Tableau", &set(&["Python", "SQL"]));
        assert!((score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stray_whitespace_in_skill_list_is_ignored() {
        let job = set(&["Python", "SQL"]);
        assert_eq!(intersection_score("Python, SQL ", &job), 1.0);
        assert_eq!(intersection_score("Python,SQL", &job), 1.0);
        assert_eq!(intersection_score(" Python ,  Excel", &job), 0.5);
    }

    #[test]
    fn test_empty_job_skill_set_scores_zero() {
        assert_eq!(intersection_score("Python", &HashSet::new()), 0.0);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let job = set(&["Python", "SQL", "Spark"]);
        for skills in ["", "Python", "Python, SQL", "Python, SQL, Spark, Excel", "Spark, Spark"] {
            let score = intersection_score(skills, &job);
            assert!((0.0..=1.0).contains(&score), "{skills:?} scored {score}");
        }
    }

    #[test]
    fn test_job_skill_names_come_from_course_skill_table() {
        let taxonomy = sample_taxonomy();
        assert_eq!(
            job_skill_names(&names(&["Data Analyst", "Data Engineer"]), &taxonomy),
            set(&["Python", "SQL", "Spark"])
        );
        assert!(job_skill_names(&names(&["Astronaut"]), &taxonomy).is_empty());
    }

    #[test]
    fn test_rank_candidates_writes_scores() {
        let taxonomy = sample_taxonomy();
        let jobs = names(&["Data Analyst"]);
        let mut candidates = expand_candidates(&jobs, &taxonomy);
        rank_candidates(&mut candidates, &jobs, &taxonomy);
        // Analyst skills {Python, SQL}: c1 covers both, c5 covers Python.
        assert_eq!(candidates[0].intersection_ranker, 1.0);
        assert_eq!(candidates[1].intersection_ranker, 0.5);
    }

    #[test]
    fn test_prune_filters_sorts_and_truncates() {
        let mut exec_ed = course("exec", "Leading Teams", 5, "Leadership");
        exec_ed.course_product_line = EXECUTIVE_EDUCATION.to_string();

        let mut candidates: Vec<Candidate> = vec![
            Candidate::new(course("low", "Low", 1000, "")),
            Candidate::new(course("tiny", "Tiny", 100, "")),
            Candidate::new(exec_ed),
            Candidate::new(course("high", "High", 150, "")),
            Candidate::new(course("mid", "Mid", 200, "")),
        ];
        for (c, score) in candidates.iter_mut().zip([0.1, 0.9, 0.5, 0.8, 0.5]) {
            c.intersection_ranker = score;
        }

        let settings = CurationSettings {
            max_candidates: 3,
            ..CurationSettings::default()
        };
        let pruned = prune_for_classification(candidates, &settings);
        let keys: Vec<&str> = pruned.iter().map(|c| c.course.course_key.as_str()).collect();
        // "tiny" has exactly 100 enrollments and is not Executive Education.
        assert_eq!(keys, vec!["high", "exec", "mid"]);
    }
}
