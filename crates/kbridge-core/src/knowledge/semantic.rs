//! Model-assisted matching over the corpus

use thiserror::Error;

use crate::providers::{GenerateRequest, ModelBackend, ProviderError};

use super::corpus::KnowledgeBase;

const TEMPERATURE: f32 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Why the model could not answer from the corpus
#[derive(Error, Debug)]
pub enum SemanticError {
    #[error(transparent)]
    Backend(#[from] ProviderError),

    #[error("model returned no text")]
    EmptyAnswer,
}

/// Render the corpus as numbered Q/A blocks
pub fn render_corpus(kb: &KnowledgeBase) -> String {
    kb.qa_pairs
        .iter()
        .enumerate()
        .map(|(i, qa)| format!("{}. Q: {}\n   A: {}", i + 1, qa.question, qa.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Instruction prompt asking the model to answer `query` from the corpus only
pub fn semantic_prompt(kb: &KnowledgeBase, query: &str) -> String {
    format!(
        r#"You are a helpful company knowledge base assistant. A user has asked a question, and you need to find the most relevant information from our company knowledge base.

User Question: "{query}"

Company Knowledge Base:
{corpus}

Instructions:
1. Analyze the user's question to understand what they're looking for
2. Find the most relevant Q&A pair(s) that answer their question
3. If you find relevant information, return it in this format:
   "Here's what I found in the company knowledge base:

   Q: [Question]
   A: [Answer]"

4. If you find multiple relevant items, include all of them
5. If no information directly answers their question, say "I couldn't find specific information about that in our knowledge base. Here are some related topics that might help:" and list the closest matches
6. Always be helpful and professional
7. Don't make up information that's not in the knowledge base

Please provide your response now."#,
        query = query,
        corpus = render_corpus(kb),
    )
}

/// Ask `backend` to answer `query` from the corpus
pub async fn semantic_search(
    backend: &dyn ModelBackend,
    model: &str,
    kb: &KnowledgeBase,
    query: &str,
) -> Result<String, SemanticError> {
    let request = GenerateRequest::new(model, semantic_prompt(kb, query))
        .with_temperature(TEMPERATURE)
        .with_max_output_tokens(MAX_OUTPUT_TOKENS);

    let response = backend.generate(request).await?;
    response
        .usable_text()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(SemanticError::EmptyAnswer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::providers::MockBackend;
    use crate::types::ModelResponse;
    use std::sync::Arc;

    #[test]
    fn test_render_corpus() {
        let rendered = render_corpus(&KnowledgeBase::seed());
        assert!(rendered.starts_with("1. Q: What is the company's vacation policy?\n   A: Employees receive 15 days"));
        assert!(rendered.contains("\n\n5. Q: What is the dress code?"));
    }

    #[test]
    fn test_prompt_embeds_query_and_corpus() {
        let prompt = semantic_prompt(&KnowledgeBase::seed(), "Can I wear jeans?");
        assert!(prompt.contains("User Question: \"Can I wear jeans?\""));
        assert!(prompt.contains("5. Q: What is the dress code?"));
        assert!(prompt.contains("Don't make up information"));
    }

    #[tokio::test]
    async fn test_answer_is_trimmed_and_settings_applied() {
        let backend = MockBackend::text("  Jeans are fine on Fridays.\n", Arc::new(NoOpLogger::new()));
        let answer = semantic_search(&backend, "gemini-1.5-flash", &KnowledgeBase::seed(), "jeans?")
            .await
            .unwrap();

        assert_eq!(answer, "Jeans are fine on Fridays.");
        let request = &backend.requests()[0];
        assert_eq!(request.temperature, TEMPERATURE);
        assert_eq!(request.max_output_tokens, Some(MAX_OUTPUT_TOKENS));
        assert!(request.tools.is_empty());
    }

    #[tokio::test]
    async fn test_blank_answer_is_an_error() {
        let backend = MockBackend::fixed(ModelResponse::from_text("   "), Arc::new(NoOpLogger::new()));
        let result = semantic_search(&backend, "m", &KnowledgeBase::seed(), "q").await;
        assert!(matches!(result, Err(SemanticError::EmptyAnswer)));
    }
}
