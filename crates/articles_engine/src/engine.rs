use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use articles_logging::{articles_debug, articles_info};

use crate::{ApiError, ApiRequest, ApiResponse, ArticlesApi, EngineEvent};

/// Receives completion events from the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

enum EngineCommand {
    Submit { seq: u64, request: ApiRequest },
}

/// Runs API requests on a background tokio runtime.
///
/// Every submitted request runs as its own task: nothing is queued behind an
/// in-flight request, and completions are emitted in the order they finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn ArticlesApi>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("articles-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, sink.as_ref()).await;
                    });
                }
                articles_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, seq: u64, request: ApiRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { seq, request });
    }
}

async fn handle_command(api: &dyn ArticlesApi, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Submit { seq, request } => {
            let kind = request.kind();
            articles_info!("Request #{} {:?} started", seq, kind);
            let result = execute(api, request).await;
            match &result {
                Ok(_) => articles_info!("Request #{} {:?} succeeded", seq, kind),
                Err(err) => articles_info!("Request #{} {:?} failed: {}", seq, kind, err),
            }
            sink.emit(EngineEvent::Completed { seq, kind, result });
        }
    }
}

async fn execute(api: &dyn ArticlesApi, request: ApiRequest) -> Result<ApiResponse, ApiError> {
    match request {
        ApiRequest::Login(credentials) => api.login(&credentials).await.map(ApiResponse::LoggedIn),
        ApiRequest::ListArticles { token } => api
            .list_articles(token.as_deref())
            .await
            .map(ApiResponse::Articles),
        ApiRequest::CreateArticle { token, draft } => api
            .create_article(token.as_deref(), &draft)
            .await
            .map(ApiResponse::Created),
        ApiRequest::UpdateArticle {
            token,
            article_id,
            draft,
        } => api
            .update_article(token.as_deref(), article_id, &draft)
            .await
            .map(ApiResponse::Updated),
        ApiRequest::DeleteArticle { token, article_id } => api
            .delete_article(token.as_deref(), article_id)
            .await
            .map(ApiResponse::Deleted),
    }
}
