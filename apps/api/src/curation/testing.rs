//! Test doubles: a scripted classifier and an in-memory taxonomy store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, Classifier, Completion, LlmError, ModelTier};
use crate::models::taxonomy::{CourseMetadata, CourseSkillEdge, Job, JobSkillEdge};
use crate::taxonomy::store::TaxonomyStore;
use crate::taxonomy::Taxonomy;

type AnswerFn = Box<dyn Fn(&str) -> String + Send + Sync>;
type DelayFn = Box<dyn Fn(&str) -> Duration + Send + Sync>;

/// Answers each call by running a closure over the joined prompt text.
pub struct ScriptedClassifier {
    answer: AnswerFn,
    delay: Option<DelayFn>,
    tokens: u32,
    calls: AtomicUsize,
    log: Mutex<Vec<(ModelTier, String)>>,
}

impl ScriptedClassifier {
    pub fn new(answer: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            answer: Box::new(answer),
            delay: None,
            tokens: 1,
            calls: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts seen so far, in the order calls started.
    pub fn prompts(&self) -> Vec<(ModelTier, String)> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(
        &self,
        messages: &[ChatMessage],
        tier: ModelTier,
    ) -> Result<Completion, LlmError> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push((tier, prompt.clone()));

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(&prompt)).await;
        }

        Ok(Completion {
            text: (self.answer)(&prompt),
            tokens: self.tokens,
        })
    }
}

/// Literal classifier answer for a boolean.
pub fn verdict(yes: bool) -> String {
    let answer = if yes { "True" } else { "False" };
    answer.to_string()
}

/// Serves a fixed snapshot, or fails every fetch like an unreachable warehouse.
pub struct InMemoryTaxonomyStore {
    taxonomy: Option<Taxonomy>,
}

impl InMemoryTaxonomyStore {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: Some(taxonomy),
        }
    }

    pub fn failing() -> Self {
        Self { taxonomy: None }
    }

    fn snapshot(&self) -> Result<&Taxonomy, AppError> {
        self.taxonomy
            .as_ref()
            .ok_or(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl TaxonomyStore for InMemoryTaxonomyStore {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.snapshot()?.jobs.clone())
    }

    async fn fetch_job_skills(&self) -> Result<Vec<JobSkillEdge>, AppError> {
        Ok(self.snapshot()?.job_skills.clone())
    }

    async fn fetch_course_skills(&self) -> Result<Vec<CourseSkillEdge>, AppError> {
        Ok(self.snapshot()?.course_skills.clone())
    }

    async fn fetch_course_metadata(&self) -> Result<Vec<CourseMetadata>, AppError> {
        Ok(self.snapshot()?.course_metadata().to_vec())
    }
}

pub fn course(key: &str, title: &str, enrollment_count: i64, skills: &str) -> CourseMetadata {
    CourseMetadata {
        partner: "edX".to_string(),
        course_key: key.to_string(),
        course_title: title.to_string(),
        level_type: "Introductory".to_string(),
        course_product_line: "OCM".to_string(),
        url: format!("https://example.org/course/{key}"),
        image_link: format!("https://example.org/img/{key}.png"),
        is_enterprise_subscription_course: true,
        enrollment_count,
        skills: skills.to_string(),
    }
}

fn job(job_id: i64, job_name: &str) -> Job {
    Job {
        job_id,
        job_name: job_name.to_string(),
        median_salary: 90_000.0,
        course_count: 10,
    }
}

fn course_skill(course_key: &str, skill_id: i64, skill_name: &str) -> CourseSkillEdge {
    CourseSkillEdge {
        course_key: course_key.to_string(),
        skill_id,
        skill_name: skill_name.to_string(),
    }
}

/// Small catalog: analysts and engineers share Python; chefs share nothing with them.
///
/// | course | title                        | enrollment | skills      |
/// |--------|------------------------------|------------|-------------|
/// | c1     | Python and SQL for Analysts  | 500        | Python, SQL |
/// | c2     | Big Data with Spark (ExecEd) | 50         | Spark       |
/// | c3     | Knife Skills                 | 1000       | Cooking     |
/// | c4     | Excel Basics                 | 900        | Excel       |
/// | c5     | Intro Python                 | 20         | Python      |
pub fn sample_taxonomy() -> Taxonomy {
    let mut spark = course("c2", "Big Data with Spark", 50, "Spark");
    spark.course_product_line = "Executive Education".to_string();

    Taxonomy::new(
        vec![job(1, "Data Analyst"), job(2, "Data Engineer"), job(3, "Chef")],
        vec![
            JobSkillEdge { job_id: 1, skill_id: 10 },
            JobSkillEdge { job_id: 1, skill_id: 11 },
            JobSkillEdge { job_id: 2, skill_id: 10 },
            JobSkillEdge { job_id: 2, skill_id: 12 },
            JobSkillEdge { job_id: 3, skill_id: 20 },
        ],
        vec![
            course_skill("c1", 10, "Python"),
            course_skill("c1", 11, "SQL"),
            course_skill("c2", 12, "Spark"),
            course_skill("c3", 20, "Cooking"),
            course_skill("c4", 13, "Excel"),
            course_skill("c5", 10, "Python"),
        ],
        vec![
            course("c1", "Python and SQL for Analysts", 500, "Python, SQL"),
            spark,
            course("c3", "Knife Skills", 1000, "Cooking"),
            course("c4", "Excel Basics", 900, "Excel"),
            course("c5", "Intro Python", 20, "Python"),
        ],
    )
}
