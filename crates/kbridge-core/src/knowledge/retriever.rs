//! KnowledgeRetriever - answers corpus queries with the best available strategy

use std::sync::Arc;

use crate::logging::Logger;
use crate::providers::{GenaiBackend, ModelBackend};
use crate::secrets::SecretStore;

use super::corpus::KnowledgeBase;
use super::keyword::keyword_search;
use super::semantic::semantic_search;

/// Answer for an empty corpus, whatever the strategy
pub const EMPTY_CORPUS: &str = "Knowledge base is empty or not available.";

/// How queries are matched against the corpus
pub enum Strategy {
    /// Ask a model, falling back to keywords when it can't answer
    Semantic {
        backend: Arc<dyn ModelBackend>,
        model: String,
    },
    /// Keyword overlap only
    Keyword,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Semantic { .. } => "semantic",
            Strategy::Keyword => "keyword",
        }
    }
}

/// Read-only retriever over a shared corpus
pub struct KnowledgeRetriever {
    kb: Arc<KnowledgeBase>,
    strategy: Strategy,
    logger: Arc<dyn Logger>,
}

impl KnowledgeRetriever {
    pub fn new(kb: Arc<KnowledgeBase>, strategy: Strategy, logger: Arc<dyn Logger>) -> Self {
        Self { kb, strategy, logger }
    }

    /// Keyword-only retriever
    pub fn keyword(kb: Arc<KnowledgeBase>, logger: Arc<dyn Logger>) -> Self {
        Self::new(kb, Strategy::Keyword, logger)
    }

    /// Pick the strategy from credential availability
    ///
    /// Semantic when `secrets` has a key for `model`'s provider, keyword
    /// otherwise.
    pub fn from_secrets(
        kb: Arc<KnowledgeBase>,
        model: &str,
        secrets: &dyn SecretStore,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let strategy = match GenaiBackend::from_secrets(model, secrets, logger.clone()) {
            Ok(backend) => {
                logger.info("[KnowledgeRetriever] Model client initialized for semantic search");
                Strategy::Semantic {
                    backend: Arc::new(backend),
                    model: model.to_string(),
                }
            }
            Err(e) => {
                logger.warn(&format!("[KnowledgeRetriever] {} - falling back to keyword search", e));
                Strategy::Keyword
            }
        };
        Self::new(kb, strategy, logger)
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Answer `query` from the corpus
    pub async fn retrieve(&self, query: &str) -> String {
        self.logger.info(&format!("[KnowledgeRetriever] Query: {}", query));

        if self.kb.is_empty() {
            return EMPTY_CORPUS.to_string();
        }

        if let Strategy::Semantic { backend, model } = &self.strategy {
            match semantic_search(backend.as_ref(), model, &self.kb, query).await {
                Ok(answer) => {
                    self.logger.info("[KnowledgeRetriever] Semantic search completed successfully");
                    return answer;
                }
                Err(e) => {
                    self.logger.warn(&format!(
                        "[KnowledgeRetriever] Semantic search failed ({}), falling back to keyword search",
                        e
                    ));
                }
            }
        }

        self.logger.info("[KnowledgeRetriever] Using keyword search");
        keyword_search(&self.kb, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger, NoOpLogger};
    use crate::providers::MockBackend;
    use crate::secrets::MemorySecretStore;
    use crate::types::ModelResponse;

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn semantic(backend: MockBackend, kb: KnowledgeBase, logger: Arc<dyn Logger>) -> KnowledgeRetriever {
        KnowledgeRetriever::new(
            Arc::new(kb),
            Strategy::Semantic {
                backend: Arc::new(backend),
                model: "gemini-1.5-flash".to_string(),
            },
            logger,
        )
    }

    #[tokio::test]
    async fn test_keyword_strategy() {
        let retriever = KnowledgeRetriever::keyword(Arc::new(KnowledgeBase::seed()), logger());
        let answer = retriever.retrieve("What is the dress code?").await;
        assert!(answer.contains("business casual dress code"));
    }

    #[tokio::test]
    async fn test_empty_corpus_for_both_strategies() {
        let keyword = KnowledgeRetriever::keyword(Arc::new(KnowledgeBase::default()), logger());
        assert_eq!(keyword.retrieve("vacation").await, EMPTY_CORPUS);

        let retriever = semantic(MockBackend::text("unused", logger()), KnowledgeBase::default(), logger());
        assert_eq!(retriever.retrieve("vacation").await, EMPTY_CORPUS);
    }

    #[tokio::test]
    async fn test_semantic_answer_returned() {
        let retriever = semantic(
            MockBackend::text("Here's what I found in the company knowledge base: ...", logger()),
            KnowledgeBase::seed(),
            logger(),
        );
        assert_eq!(
            retriever.retrieve("jeans?").await,
            "Here's what I found in the company knowledge base: ..."
        );
    }

    #[tokio::test]
    async fn test_semantic_failure_falls_back_to_keyword() {
        let memory = Arc::new(MemoryLogger::new());
        let retriever = semantic(MockBackend::error("quota", logger()), KnowledgeBase::seed(), memory.clone());

        let answer = retriever.retrieve("What is the dress code?").await;
        assert!(answer.contains("business casual dress code"));

        let warnings = memory.messages(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("quota"));
    }

    #[tokio::test]
    async fn test_blank_semantic_answer_falls_back_to_keyword() {
        let memory = Arc::new(MemoryLogger::new());
        let backend = MockBackend::fixed(ModelResponse::from_text("   "), logger());
        let retriever = semantic(backend, KnowledgeBase::seed(), memory.clone());

        let answer = retriever.retrieve("What is the dress code?").await;
        assert!(answer.contains("business casual dress code"));

        let warnings = memory.messages(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("model returned no text"));
    }

    #[test]
    fn test_strategy_from_secrets() {
        let kb = Arc::new(KnowledgeBase::seed());

        let without = KnowledgeRetriever::from_secrets(kb.clone(), "gemini-1.5-flash", &MemorySecretStore::new(), logger());
        assert_eq!(without.strategy().name(), "keyword");

        let secrets = MemorySecretStore::new().with_secret("gemini", "test-key");
        let with = KnowledgeRetriever::from_secrets(kb, "gemini-1.5-flash", &secrets, logger());
        assert_eq!(with.strategy().name(), "semantic");
    }
}
