use std::sync::{mpsc, Arc};

use articles_core::{
    ApiFailure, Article, ArticleDraft, ArticleListReply, ArticleReply, Credentials, Effect,
    LoginReply, Msg, Route, Topic,
};
use articles_engine::{
    ApiError, ApiRequest, ApiResponse, ArticlesApi, EngineEvent, EngineHandle, EventSink,
    RequestKind, TokenStore,
};
use articles_logging::{articles_error, articles_info, articles_warn};

/// Everything the dispatch loop consumes.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Quit,
}

pub struct EffectRunner {
    engine: EngineHandle,
    tokens: Arc<dyn TokenStore>,
    msg_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn ArticlesApi>,
        tokens: Arc<dyn TokenStore>,
        msg_tx: mpsc::Sender<AppEvent>,
    ) -> std::io::Result<Self> {
        let sink = Arc::new(MsgSink {
            tx: msg_tx.clone(),
        });
        let engine = EngineHandle::new(api, sink)?;
        Ok(Self {
            engine,
            tokens,
            msg_tx,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Login { credentials } => {
                    self.submit(ApiRequest::Login(to_wire_credentials(credentials)));
                }
                Effect::StoreToken { token } => {
                    let outcome = self.tokens.set(&token).map_err(|err| {
                        articles_error!("Failed to store token: {}", err);
                        err.to_string()
                    });
                    self.send(Msg::TokenStored(outcome));
                }
                Effect::ClearToken => {
                    if let Err(err) = self.tokens.remove() {
                        articles_error!("Failed to remove token: {}", err);
                        self.send(Msg::TokenStoreFailed(err.to_string()));
                    }
                }
                Effect::FetchArticles => {
                    let token = self.token();
                    self.submit(ApiRequest::ListArticles { token });
                }
                Effect::CreateArticle { draft } => {
                    let token = self.token();
                    self.submit(ApiRequest::CreateArticle {
                        token,
                        draft: to_wire_draft(draft),
                    });
                }
                Effect::UpdateArticle { article_id, draft } => {
                    let token = self.token();
                    self.submit(ApiRequest::UpdateArticle {
                        token,
                        article_id,
                        draft: to_wire_draft(draft),
                    });
                }
                Effect::DeleteArticle { article_id } => {
                    let token = self.token();
                    self.submit(ApiRequest::DeleteArticle { token, article_id });
                }
                Effect::RouteEntered { route } => {
                    articles_info!("Entered route {}", route.path());
                    // The articles view loads the collection whenever it is shown.
                    if route == Route::Articles {
                        self.send(Msg::ArticlesRequested);
                    }
                }
            }
        }
    }

    fn submit(&self, request: ApiRequest) {
        let seq = articles_logging::next_action_seq();
        articles_info!("Submitting request #{} {:?}", seq, request.kind());
        self.engine.submit(seq, request);
    }

    /// Reads the token at dispatch time; an unreadable store behaves like an empty one.
    fn token(&self) -> Option<String> {
        match self.tokens.get() {
            Ok(token) => token,
            Err(err) => {
                articles_warn!("Failed to read token: {}", err);
                None
            }
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(AppEvent::Msg(msg));
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Msg(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    let EngineEvent::Completed { seq, kind, result } = event;
    match (kind, result) {
        (RequestKind::Login, Ok(ApiResponse::LoggedIn(reply))) => Msg::LoginFinished(Ok(LoginReply {
            message: reply.message,
            token: reply.token,
        })),
        // A 401 from the login endpoint means bad credentials, not an expired session.
        (RequestKind::Login, Err(err)) => Msg::LoginFinished(Err(ApiFailure::Other(err.to_string()))),
        (RequestKind::ListArticles, Ok(ApiResponse::Articles(reply))) => {
            Msg::ArticlesLoaded(Ok(ArticleListReply {
                message: reply.message,
                articles: reply.articles.into_iter().map(from_wire_article).collect(),
            }))
        }
        (RequestKind::ListArticles, Err(err)) => Msg::ArticlesLoaded(Err(map_failure(err))),
        (RequestKind::CreateArticle, Ok(ApiResponse::Created(reply))) => {
            Msg::ArticleCreated(Ok(ArticleReply {
                message: reply.message,
                article: from_wire_article(reply.article),
            }))
        }
        (RequestKind::CreateArticle, Err(err)) => Msg::ArticleCreated(Err(map_failure(err))),
        (RequestKind::UpdateArticle { article_id }, Ok(ApiResponse::Updated(reply))) => {
            Msg::ArticleUpdated {
                article_id,
                result: Ok(ArticleReply {
                    message: reply.message,
                    article: from_wire_article(reply.article),
                }),
            }
        }
        (RequestKind::UpdateArticle { article_id }, Err(err)) => Msg::ArticleUpdated {
            article_id,
            result: Err(map_failure(err)),
        },
        (RequestKind::DeleteArticle { article_id }, Ok(ApiResponse::Deleted(reply))) => {
            Msg::ArticleDeleted {
                article_id,
                result: Ok(reply.message),
            }
        }
        (RequestKind::DeleteArticle { article_id }, Err(err)) => Msg::ArticleDeleted {
            article_id,
            result: Err(map_failure(err)),
        },
        (kind, Ok(response)) => {
            articles_error!(
                "Request #{} {:?} completed with mismatched response {:?}",
                seq,
                kind,
                response
            );
            mismatched(kind)
        }
    }
}

/// Closes the request window of `kind` when the engine answered with the wrong payload.
fn mismatched(kind: RequestKind) -> Msg {
    let failure = ApiFailure::Other("unexpected response from server".to_string());
    match kind {
        RequestKind::Login => Msg::LoginFinished(Err(failure)),
        RequestKind::ListArticles => Msg::ArticlesLoaded(Err(failure)),
        RequestKind::CreateArticle => Msg::ArticleCreated(Err(failure)),
        RequestKind::UpdateArticle { article_id } => Msg::ArticleUpdated {
            article_id,
            result: Err(failure),
        },
        RequestKind::DeleteArticle { article_id } => Msg::ArticleDeleted {
            article_id,
            result: Err(failure),
        },
    }
}

fn map_failure(err: ApiError) -> ApiFailure {
    match err {
        ApiError::Unauthorized { .. } => ApiFailure::Unauthorized,
        other => ApiFailure::Other(other.to_string()),
    }
}

fn to_wire_credentials(credentials: Credentials) -> articles_engine::Credentials {
    articles_engine::Credentials {
        username: credentials.username,
        password: credentials.password,
    }
}

fn to_wire_draft(draft: ArticleDraft) -> articles_engine::ArticleDraft {
    articles_engine::ArticleDraft {
        title: draft.title,
        text: draft.text,
        topic: to_wire_topic(draft.topic),
    }
}

fn from_wire_article(article: articles_engine::Article) -> Article {
    Article {
        article_id: article.article_id,
        title: article.title,
        text: article.text,
        topic: from_wire_topic(article.topic),
    }
}

fn to_wire_topic(topic: Topic) -> articles_engine::Topic {
    match topic {
        Topic::JavaScript => articles_engine::Topic::JavaScript,
        Topic::React => articles_engine::Topic::React,
        Topic::Node => articles_engine::Topic::Node,
    }
}

fn from_wire_topic(topic: articles_engine::Topic) -> Topic {
    match topic {
        articles_engine::Topic::JavaScript => Topic::JavaScript,
        articles_engine::Topic::React => Topic::React,
        articles_engine::Topic::Node => Topic::Node,
    }
}
