//! Curation Result: the labeled table handed to callers, plus its summary and export.

use anyhow::anyhow;
use serde::Serialize;

use crate::curation::candidates::Candidate;
use crate::curation::clusters::{ClusterColumns, ClusterSet};
use crate::curation::ranking::EXECUTIVE_EDUCATION;
use crate::errors::AppError;
use crate::models::taxonomy::CourseMetadata;

const OPEN_COURSE_LINE: &str = "OCM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterMembership {
    pub cluster: String,
    pub member: bool,
}

/// A curated course: its catalog row plus one membership flag per cluster, in cluster
/// order. Scoring and relevance working fields are not carried over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuratedCourse {
    #[serde(flatten)]
    pub course: CourseMetadata,
    pub memberships: Vec<ClusterMembership>,
}

impl CuratedCourse {
    pub fn is_member(&self, cluster: &str) -> bool {
        self.memberships
            .iter()
            .any(|m| m.member && m.cluster == cluster)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationResult {
    pub clusters: Vec<String>,
    pub courses: Vec<CuratedCourse>,
    pub tokens_used: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSize {
    pub cluster: String,
    pub courses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationSummary {
    pub courses_selected: usize,
    pub open_courses: usize,
    pub executive_education_courses: usize,
    pub clusters_created: usize,
    pub cluster_sizes: Vec<ClusterSize>,
}

impl CurationResult {
    /// Zips the per-cluster verdict columns onto the survivors. Every cluster must have
    /// exactly one verdict per survivor.
    pub fn assemble(
        survivors: Vec<Candidate>,
        clusters: &ClusterSet,
        columns: ClusterColumns,
        tokens_used: u64,
    ) -> Result<Self, AppError> {
        if columns.columns.len() != clusters.names().len() {
            return Err(AppError::Internal(anyhow!(
                "{} clusters but {} verdict columns",
                clusters.names().len(),
                columns.columns.len()
            )));
        }
        if let Some(bad) = columns.columns.iter().find(|c| c.len() != survivors.len()) {
            return Err(AppError::Internal(anyhow!(
                "verdict column has {} rows for {} courses",
                bad.len(),
                survivors.len()
            )));
        }

        let courses = survivors
            .into_iter()
            .enumerate()
            .map(|(row, candidate)| CuratedCourse {
                course: candidate.course,
                memberships: clusters
                    .names()
                    .iter()
                    .zip(&columns.columns)
                    .map(|(cluster, column)| ClusterMembership {
                        cluster: cluster.clone(),
                        member: column[row].is_true(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            clusters: clusters.names().to_vec(),
            courses,
            tokens_used,
        })
    }

    pub fn members_of(&self, cluster: &str) -> Vec<&CuratedCourse> {
        self.courses.iter().filter(|c| c.is_member(cluster)).collect()
    }

    pub fn summary(&self) -> CurationSummary {
        let count_line = |line: &str| {
            self.courses
                .iter()
                .filter(|c| c.course.course_product_line == line)
                .count()
        };

        CurationSummary {
            courses_selected: self.courses.len(),
            open_courses: count_line(OPEN_COURSE_LINE),
            executive_education_courses: count_line(EXECUTIVE_EDUCATION),
            clusters_created: self.clusters.len(),
            cluster_sizes: self
                .clusters
                .iter()
                .map(|cluster| ClusterSize {
                    cluster: cluster.clone(),
                    courses: self.members_of(cluster).len(),
                })
                .collect(),
        }
    }

    /// Header row: every catalog column, then one column per cluster.
    pub fn export_columns(&self) -> Vec<String> {
        CourseMetadata::COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.clusters.iter().cloned())
            .collect()
    }

    /// Comma-separated export with a header row. Cluster cells are `True`/`False`.
    pub fn to_csv(&self) -> String {
        let mut out = csv_line(self.export_columns().iter().map(String::as_str));

        for curated in &self.courses {
            let catalog = curated.course.column_values();
            let flags = curated
                .memberships
                .iter()
                .map(|m| if m.member { "True" } else { "False" });
            out.push_str(&csv_line(catalog.iter().map(String::as_str).chain(flags)));
        }
        out
    }
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(csv_field).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::parse::Verdict;
    use crate::curation::testing::course;

    fn sample_result() -> CurationResult {
        let mut exec = course("b", "Board Strategy", 80, "Strategy, Governance");
        exec.course_product_line = EXECUTIVE_EDUCATION.to_string();
        let survivors = vec![
            Candidate::new(course("a", "Python Basics", 500, "Python")),
            Candidate::new(exec),
        ];
        let clusters = ClusterSet::from_generated(vec!["Data Careers".to_string()]);
        let columns = ClusterColumns {
            columns: vec![
                vec![Verdict::True, Verdict::False],
                vec![Verdict::False, Verdict::True],
                vec![Verdict::False, Verdict::False],
                vec![Verdict::True, Verdict::False],
            ],
            tokens: 8,
        };
        CurationResult::assemble(survivors, &clusters, columns, 8).unwrap()
    }

    #[test]
    fn test_assemble_gives_each_course_one_flag_per_cluster() {
        let result = sample_result();
        assert_eq!(result.clusters.len(), 4);
        for curated in &result.courses {
            let names: Vec<&str> = curated.memberships.iter().map(|m| m.cluster.as_str()).collect();
            assert_eq!(names, result.clusters.iter().map(String::as_str).collect::<Vec<_>>());
        }
        assert!(result.courses[0].is_member("Data Careers"));
        assert!(result.courses[1].is_member("For Executive Leaders"));
    }

    #[test]
    fn test_assemble_rejects_misaligned_columns() {
        let survivors = vec![Candidate::new(course("a", "Python Basics", 500, ""))];
        let columns = ClusterColumns {
            columns: vec![vec![Verdict::True, Verdict::True]; 3],
            tokens: 0,
        };
        let err = CurationResult::assemble(survivors, &ClusterSet::fixed_only(), columns, 0)
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_assemble_rejects_missing_cluster_column() {
        let columns = ClusterColumns {
            columns: vec![vec![]; 2],
            tokens: 0,
        };
        assert!(CurationResult::assemble(vec![], &ClusterSet::fixed_only(), columns, 0).is_err());
    }

    #[test]
    fn test_summary_counts_product_lines_and_members() {
        let summary = sample_result().summary();
        assert_eq!(summary.courses_selected, 2);
        assert_eq!(summary.open_courses, 1);
        assert_eq!(summary.executive_education_courses, 1);
        assert_eq!(summary.clusters_created, 4);
        assert_eq!(summary.cluster_sizes[0].courses, 1);
        assert_eq!(summary.cluster_sizes[2].courses, 0);
    }

    #[test]
    fn test_export_columns_are_catalog_then_clusters() {
        let columns = sample_result().export_columns();
        assert_eq!(columns[0], "partner");
        assert_eq!(columns[9], "skills");
        assert_eq!(columns[10], "Data Careers");
        assert_eq!(columns.len(), 14);
        assert!(!columns.iter().any(|c| c == "intersection_ranker" || c == "relevant"));
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        let csv = sample_result().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("\"Strategy, Governance\""));
        assert!(lines[1].ends_with("True,False,False,True"));
    }

    #[test]
    fn test_csv_field_escapes_quotes() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn test_empty_result_exports_header_only() {
        let result = CurationResult::assemble(
            vec![],
            &ClusterSet::fixed_only(),
            ClusterColumns {
                columns: vec![vec![]; 3],
                tokens: 0,
            },
            0,
        )
        .unwrap();
        assert_eq!(result.to_csv().lines().count(), 1);
        assert_eq!(result.summary().courses_selected, 0);
    }
}
