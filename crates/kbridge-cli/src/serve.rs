//! `kbridge serve`: the knowledge base MCP server on stdio or streamable HTTP

use std::sync::Arc;

use anyhow::Result;
use kbridge_core::{
    ConsoleLogger, EnvSecretStore, KnowledgeBase, KnowledgeRetriever, KnowledgeServer, Logger,
};

use crate::settings::Settings;

pub async fn run(settings: &Settings, http: Option<String>, stdio: bool) -> Result<()> {
    // Shares the client's stderr when spawned by it
    let logger: Arc<dyn Logger> =
        Arc::new(ConsoleLogger::with_prefix("[kbridge serve]").with_level(settings.config.log_level));

    let kb = Arc::new(KnowledgeBase::load_or_seed(
        &settings.config.knowledge_base_path(),
        logger.as_ref(),
    ));
    let retriever =
        KnowledgeRetriever::from_secrets(kb, &settings.model, &EnvSecretStore::new(), logger.clone());
    let server = KnowledgeServer::new(Arc::new(retriever), logger);

    match settings.listen_addr(http, stdio) {
        Some(addr) => server.serve_http(&addr).await?,
        None => server.serve_stdio().await?,
    }
    Ok(())
}
