//! Taxonomy Store: read-only access to the four warehouse tables.
//!
//! Each configured query is wrapped in an outer SELECT that casts every id column to
//! BIGINT and every text column to TEXT, so ad-hoc warehouse SQL only has to produce the
//! right column names.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::TaxonomyQueries;
use crate::errors::AppError;
use crate::models::taxonomy::{CourseMetadata, CourseSkillEdge, Job, JobSkillEdge};

#[async_trait]
pub trait TaxonomyStore: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, AppError>;
    async fn fetch_job_skills(&self) -> Result<Vec<JobSkillEdge>, AppError>;
    async fn fetch_course_skills(&self) -> Result<Vec<CourseSkillEdge>, AppError>;
    async fn fetch_course_metadata(&self) -> Result<Vec<CourseMetadata>, AppError>;
}

pub struct PgTaxonomyStore {
    pool: PgPool,
    queries: TaxonomyQueries,
}

impl PgTaxonomyStore {
    pub fn new(pool: PgPool, queries: TaxonomyQueries) -> Self {
        Self { pool, queries }
    }
}

#[async_trait]
impl TaxonomyStore for PgTaxonomyStore {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, AppError> {
        let sql = jobs_sql(&self.queries.jobs);
        Ok(sqlx::query_as::<_, Job>(&sql).fetch_all(&self.pool).await?)
    }

    async fn fetch_job_skills(&self) -> Result<Vec<JobSkillEdge>, AppError> {
        let sql = job_skills_sql(&self.queries.job_skills);
        Ok(sqlx::query_as::<_, JobSkillEdge>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn fetch_course_skills(&self) -> Result<Vec<CourseSkillEdge>, AppError> {
        let sql = course_skills_sql(&self.queries.course_skills);
        Ok(sqlx::query_as::<_, CourseSkillEdge>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn fetch_course_metadata(&self) -> Result<Vec<CourseMetadata>, AppError> {
        let sql = course_metadata_sql(&self.queries.course_metadata);
        Ok(sqlx::query_as::<_, CourseMetadata>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }
}

fn jobs_sql(inner: &str) -> String {
    format!(
        r#"
        SELECT CAST(src.job_id AS BIGINT) AS job_id,
               CAST(src.job_name AS TEXT) AS job_name,
               CAST(COALESCE(src.median_salary, 0) AS DOUBLE PRECISION) AS median_salary,
               CAST(COALESCE(src.course_count, 0) AS BIGINT) AS course_count
        FROM ({inner}) AS src
        "#
    )
}

fn job_skills_sql(inner: &str) -> String {
    format!(
        r#"
        SELECT CAST(src.job_id AS BIGINT) AS job_id,
               CAST(src.skill_id AS BIGINT) AS skill_id
        FROM ({inner}) AS src
        "#
    )
}

fn course_skills_sql(inner: &str) -> String {
    format!(
        r#"
        SELECT CAST(src.course_key AS TEXT) AS course_key,
               CAST(src.skill_id AS BIGINT) AS skill_id,
               CAST(src.skill_name AS TEXT) AS skill_name
        FROM ({inner}) AS src
        "#
    )
}

fn course_metadata_sql(inner: &str) -> String {
    format!(
        r#"
        SELECT CAST(COALESCE(src.partner, '') AS TEXT) AS partner,
               CAST(src.course_key AS TEXT) AS course_key,
               CAST(COALESCE(src.course_title, '') AS TEXT) AS course_title,
               CAST(COALESCE(src.level_type, '') AS TEXT) AS level_type,
               CAST(COALESCE(src.course_product_line, '') AS TEXT) AS course_product_line,
               CAST(COALESCE(src.url, '') AS TEXT) AS url,
               CAST(COALESCE(src.image_link, '') AS TEXT) AS image_link,
               CAST(COALESCE(src.is_enterprise_subscription_course, FALSE) AS BOOLEAN)
                   AS is_enterprise_subscription_course,
               CAST(COALESCE(src.enrollment_count, 0) AS BIGINT) AS enrollment_count,
               CAST(COALESCE(src.skills, '') AS TEXT) AS skills
        FROM ({inner}) AS src
        "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_queries_cast_id_columns() {
        assert!(jobs_sql("SELECT 1").contains("CAST(src.job_id AS BIGINT)"));
        assert!(job_skills_sql("SELECT 1").contains("CAST(src.skill_id AS BIGINT)"));
        assert!(course_skills_sql("SELECT 1").contains("CAST(src.skill_id AS BIGINT)"));
    }

    #[test]
    fn test_wrapped_query_embeds_inner_sql_as_subquery() {
        let sql = course_metadata_sql("SELECT * FROM courses");
        assert!(sql.contains("FROM (SELECT * FROM courses) AS src"));
    }
}
