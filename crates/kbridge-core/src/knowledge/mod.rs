//! Company knowledge base
//!
//! A JSON corpus of question/answer records and the retriever that answers
//! queries against it, either by asking a model or by keyword overlap.

mod corpus;
mod keyword;
mod retriever;
mod semantic;

pub use corpus::{KnowledgeBase, KnowledgeError, KnowledgeResult, QaRecord};
pub use keyword::{keyword_search, KEYWORDS};
pub use retriever::{KnowledgeRetriever, Strategy, EMPTY_CORPUS};
pub use semantic::{render_corpus, semantic_prompt, semantic_search, SemanticError};
