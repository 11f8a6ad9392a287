// Shared prompt fragments.
// Each pipeline stage builds its own prompts in curation/prompts.rs;
// this file only holds the answer-format instructions they have in common.

/// Appended to every yes/no classification prompt. `curation::parse::Verdict`
/// accepts exactly these two tokens.
pub const BOOLEAN_ANSWER_FORMAT: &str = "\
Desired Result format:
Return either \"True\" or \"False\" as a string. No additional text.";

/// Appended to prompts whose answer is parsed by `curation::parse::parse_string_list`.
pub const LIST_ANSWER_FORMAT: &str = "\
Desired Result format: return a Python list of strings, formatted like
['item 1', 'item 2', 'item 3']
No additional text.";
