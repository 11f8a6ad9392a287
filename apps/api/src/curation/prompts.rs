//! Prompt builders for every classifier call the pipeline makes.

use crate::llm_client::prompts::{BOOLEAN_ANSWER_FORMAT, LIST_ANSWER_FORMAT};
use crate::llm_client::ChatMessage;

pub const JOB_SELECTION_TEMPLATE: &str = "\
Which jobs in the list below are most relevant to the query? Return the relevant jobs
sorted with the most relevant roles first. Try to include 4-5 jobs. Limit to no more
than 7 jobs. Only use job titles exactly as they appear in the list.

Query: {user_input}

Jobs:
{job_list}

{answer_format}";

pub const COURSE_RELEVANCE_TEMPLATE: &str = "\
Does the course below feel like it teaches skills relevant to the list of jobs below?
Feel free to be a little looser and include courses that you think could be relevant,
even if not 100% sure.

Jobs:
{jobs}

Course:
{course}

{answer_format}";

pub const CLUSTER_NAMING_TEMPLATE: &str = "\
Given the original user input, create 3-5 cluster names you think could be used to
cluster the courses. This should be written in a marketing tone, as this will be used
to show a small curation of courses on an ecommerce website. The clusters should make
sense with the original prompt from the user. You do NOT need to return the course
cluster assignments.

Original prompt:
{user_input}

Courses:
{courses}

{answer_format}";

pub const CLUSTER_CHECK_TEMPLATE: &str = "\
Based on the course title, do you think this course belongs to the course cluster
described below? Important: be strict, and only allow courses that you really think
match this cluster.

course: {course}
cluster: {cluster}

{answer_format}";

pub fn job_selection_prompt(user_input: &str, job_names: &[&str]) -> Vec<ChatMessage> {
    vec![ChatMessage::system(
        JOB_SELECTION_TEMPLATE
            .replace("{job_list}", &job_names.join("\n"))
            .replace("{answer_format}", LIST_ANSWER_FORMAT)
            .replace("{user_input}", user_input),
    )]
}

pub fn course_relevance_prompt(jobs: &[String], course_title: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(
        COURSE_RELEVANCE_TEMPLATE
            .replace("{jobs}", &jobs.join(", "))
            .replace("{answer_format}", BOOLEAN_ANSWER_FORMAT)
            .replace("{course}", course_title),
    )]
}

pub fn cluster_naming_prompt(course_titles: &[&str], user_input: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(
        CLUSTER_NAMING_TEMPLATE
            .replace("{courses}", &course_titles.join("\n"))
            .replace("{answer_format}", LIST_ANSWER_FORMAT)
            .replace("{user_input}", user_input),
    )]
}

pub fn cluster_check_prompt(course_title: &str, cluster: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(
        CLUSTER_CHECK_TEMPLATE
            .replace("{cluster}", cluster)
            .replace("{answer_format}", BOOLEAN_ANSWER_FORMAT)
            .replace("{course}", course_title),
    )]
}
