use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub job_id: i64,
    pub job_name: String,
    pub median_salary: f64,
    pub course_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobSkillEdge {
    pub job_id: i64,
    pub skill_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CourseSkillEdge {
    pub course_key: String,
    pub skill_id: i64,
    pub skill_name: String,
}

/// One course as published in the catalog. `course_key` is the join key for
/// every course-level lookup and is unique within a `Taxonomy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CourseMetadata {
    pub partner: String,
    pub course_key: String,
    pub course_title: String,
    pub level_type: String,
    pub course_product_line: String,
    pub url: String,
    pub image_link: String,
    pub is_enterprise_subscription_course: bool,
    pub enrollment_count: i64,
    /// Comma-joined skill names, e.g. "Python, SQL".
    pub skills: String,
}

impl CourseMetadata {
    /// Column names in export order.
    pub const COLUMNS: [&'static str; 10] = [
        "partner",
        "course_key",
        "course_title",
        "level_type",
        "course_product_line",
        "url",
        "image_link",
        "is_enterprise_subscription_course",
        "enrollment_count",
        "skills",
    ];

    /// Cell values aligned with `COLUMNS`.
    pub fn column_values(&self) -> [String; 10] {
        [
            self.partner.clone(),
            self.course_key.clone(),
            self.course_title.clone(),
            self.level_type.clone(),
            self.course_product_line.clone(),
            self.url.clone(),
            self.image_link.clone(),
            self.is_enterprise_subscription_course.to_string(),
            self.enrollment_count.to_string(),
            self.skills.clone(),
        ]
    }
}
