use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::curation::CurationSettings;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_max_retries: u32,
    pub llm_backoff_ms: u64,
    pub curation: CurationSettings,
    pub queries: TaxonomyQueries,
}

/// SQL text for the four taxonomy tables. Each query is wrapped by the store,
/// so it only has to produce the expected column names.
#[derive(Debug, Clone)]
pub struct TaxonomyQueries {
    pub jobs: String,
    pub job_skills: String,
    pub course_skills: String,
    pub course_metadata: String,
}

impl Default for TaxonomyQueries {
    fn default() -> Self {
        Self {
            jobs: "SELECT job_id, job_name, median_salary, course_count FROM taxonomy_jobs"
                .to_string(),
            job_skills: "SELECT job_id, skill_id FROM taxonomy_job_skills".to_string(),
            course_skills: "SELECT course_key, skill_id, skill_name FROM taxonomy_course_skills"
                .to_string(),
            course_metadata: "SELECT course_key, partner, course_title, level_type, \
                course_product_line, url, image_link, is_enterprise_subscription_course, \
                enrollment_count, skills FROM course_metadata"
                .to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = CurationSettings::default();
        let curation = CurationSettings {
            concurrency: env_or("CLASSIFIER_CONCURRENCY", defaults.concurrency)?,
            max_candidates: env_or("MAX_CANDIDATES", defaults.max_candidates)?,
            min_enrollment: env_or("MIN_ENROLLMENT", defaults.min_enrollment)?,
        };
        if curation.concurrency == 0 {
            bail!("CLASSIFIER_CONCURRENCY must be at least 1");
        }
        if curation.max_candidates == 0 {
            bail!("MAX_CANDIDATES must be at least 1");
        }

        let default_queries = TaxonomyQueries::default();

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_BASE_URL.to_string()),
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_max_retries: env_or("LLM_MAX_RETRIES", 5u32)?,
            llm_backoff_ms: env_or("LLM_BACKOFF_MS", 1000u64)?,
            curation,
            queries: TaxonomyQueries {
                jobs: std::env::var("JOBS_SQL").unwrap_or(default_queries.jobs),
                job_skills: std::env::var("JOB_SKILLS_SQL").unwrap_or(default_queries.job_skills),
                course_skills: std::env::var("COURSE_SKILLS_SQL")
                    .unwrap_or(default_queries.course_skills),
                course_metadata: std::env::var("COURSE_METADATA_SQL")
                    .unwrap_or(default_queries.course_metadata),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}
