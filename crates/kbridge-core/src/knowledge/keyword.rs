//! Keyword matching over the corpus

use super::corpus::KnowledgeBase;

/// Topic keywords recognized in queries
pub const KEYWORDS: &[&str] = &[
    "vacation",
    "remote",
    "benefit",
    "sick",
    "dress",
    "policy",
    "time off",
    "leave",
    "work",
    "health",
    "insurance",
    "401k",
    "retirement",
    "training",
    "development",
    "expense",
    "travel",
    "equipment",
    "harassment",
    "safety",
    "overtime",
    "referral",
    "social media",
    "flexible",
    "schedule",
    "mental health",
    "probation",
    "review",
    "performance",
];

pub(crate) const FOUND_HEADER: &str = "Here's what I found in the company knowledge base:\n\n";
pub(crate) const NOT_FOUND_HEADER: &str =
    "I couldn't find specific information about that query. Here are some available topics:\n\n";

/// Number of topics listed when nothing matches
const TOPIC_LIMIT: usize = 5;

/// Answer `query` by keyword overlap
///
/// A record matches when a keyword appears both in the query and in the
/// record's question or answer. Records keep corpus order.
pub fn keyword_search(kb: &KnowledgeBase, query: &str) -> String {
    let query = query.to_lowercase();
    let active: Vec<&str> = KEYWORDS.iter().copied().filter(|k| query.contains(k)).collect();

    let matches: Vec<String> = kb
        .qa_pairs
        .iter()
        .filter(|qa| {
            let question = qa.question.to_lowercase();
            let answer = qa.answer.to_lowercase();
            active.iter().any(|k| question.contains(k) || answer.contains(k))
        })
        .map(|qa| format!("Q: {}\nA: {}", qa.question, qa.answer))
        .collect();

    if !matches.is_empty() {
        return format!("{}{}", FOUND_HEADER, matches.join("\n\n"));
    }

    let mut topics = String::from(NOT_FOUND_HEADER);
    for (i, qa) in kb.qa_pairs.iter().take(TOPIC_LIMIT).enumerate() {
        topics.push_str(&format!("{}. {}\n", i + 1, qa.question));
    }
    topics.push_str(&format!("\nTotal topics available: {}", kb.len()));
    topics
}
