//! Knowledge corpus (JSON file of question/answer records)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::Logger;

/// Corpus errors
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed knowledge base: {0}")]
    Json(#[from] serde_json::Error),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// One question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl QaRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The whole corpus, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub qa_pairs: Vec<QaRecord>,
}

impl KnowledgeBase {
    pub fn new(qa_pairs: Vec<QaRecord>) -> Self {
        Self { qa_pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.qa_pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.qa_pairs.len()
    }

    /// Sample corpus written when no file exists yet
    pub fn seed() -> Self {
        Self::new(vec![
            QaRecord::new(
                "What is the company's vacation policy?",
                "Employees receive 15 days of paid vacation per year for the first 2 years, 20 days after 2 years of service, and 25 days after 5 years. Vacation days must be approved by your manager in advance.",
            ),
            QaRecord::new(
                "What is the remote work policy?",
                "Employees can work remotely up to 3 days per week with manager approval. Full remote work is available for senior employees and special circumstances. All remote workers must maintain core hours of 10 AM - 3 PM EST.",
            ),
            QaRecord::new(
                "What benefits does the company offer?",
                "We offer comprehensive health insurance (medical, dental, vision), 401k with 4% company match, life insurance, disability insurance, flexible spending accounts, employee assistance program, and professional development stipend of $2000 per year.",
            ),
            QaRecord::new(
                "How many sick days do employees get?",
                "Employees receive 10 paid sick days per year. Unused sick days can be carried over up to a maximum of 20 days. Extended sick leave may be available under FMLA.",
            ),
            QaRecord::new(
                "What is the dress code?",
                "We have a business casual dress code. On Fridays, casual dress is acceptable. For client meetings, business professional attire is required.",
            ),
        ])
    }

    /// Default corpus location (`<data dir>/kbridge/knowledge_base.json`)
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kbridge")
            .join("knowledge_base.json")
    }

    /// Read a corpus file
    pub fn load(path: &Path) -> KnowledgeResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the corpus as indented JSON, creating parent directories
    pub fn save(&self, path: &Path) -> KnowledgeResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load the corpus, writing the seed first if the file is missing
    ///
    /// Never fails: an unreadable or malformed file is logged and yields an
    /// empty corpus.
    pub fn load_or_seed(path: &Path, logger: &dyn Logger) -> Self {
        logger.info(&format!("[KnowledgeBase] Loading knowledge base from: {}", path.display()));

        if !path.exists() {
            match Self::seed().save(path) {
                Ok(()) => logger.info("[KnowledgeBase] Created sample knowledge base"),
                Err(e) => {
                    logger.error(&format!("[KnowledgeBase] Error creating sample knowledge base: {}", e));
                    return Self::default();
                }
            }
        }

        match Self::load(path) {
            Ok(kb) => {
                logger.info(&format!("[KnowledgeBase] Loaded {} records", kb.len()));
                kb
            }
            Err(e) => {
                logger.error(&format!("[KnowledgeBase] Error loading knowledge base: {}", e));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger, NoOpLogger};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_seeded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("knowledge_base.json");

        let kb = KnowledgeBase::load_or_seed(&path, &NoOpLogger::new());
        assert_eq!(kb, KnowledgeBase::seed());
        assert!(path.exists());

        // Second load reads the written file back
        assert_eq!(KnowledgeBase::load(&path).unwrap().len(), 5);
    }

    #[test]
    fn test_existing_file_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(
            &path,
            r#"{"qa_pairs": [{"question": "Parking?", "answer": "Lot B"}, {"question": "No answer"}]}"#,
        )
        .unwrap();

        let kb = KnowledgeBase::load_or_seed(&path, &NoOpLogger::new());
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.qa_pairs[0], QaRecord::new("Parking?", "Lot B"));
        assert_eq!(kb.qa_pairs[1].answer, "");
    }

    #[test]
    fn test_malformed_file_gives_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(&path, "{ not json").unwrap();

        let logger = MemoryLogger::new();
        let kb = KnowledgeBase::load_or_seed(&path, &logger);
        assert!(kb.is_empty());
        assert_eq!(logger.messages(LogLevel::Error).len(), 1);
    }

    #[test]
    fn test_missing_qa_pairs_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(&path, "{}").unwrap();

        assert!(KnowledgeBase::load_or_seed(&path, &NoOpLogger::new()).is_empty());
    }
}
