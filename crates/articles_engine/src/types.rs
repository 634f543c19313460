use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ArticleId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    JavaScript,
    React,
    Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: ArticleId,
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

/// Request body for create and update; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleListResponse {
    pub message: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleResponse {
    pub message: String,
    pub article: Article,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A request for the engine; authenticated requests carry the token read at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Login(Credentials),
    ListArticles {
        token: Option<String>,
    },
    CreateArticle {
        token: Option<String>,
        draft: ArticleDraft,
    },
    UpdateArticle {
        token: Option<String>,
        article_id: ArticleId,
        draft: ArticleDraft,
    },
    DeleteArticle {
        token: Option<String>,
        article_id: ArticleId,
    },
}

impl ApiRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ApiRequest::Login(_) => RequestKind::Login,
            ApiRequest::ListArticles { .. } => RequestKind::ListArticles,
            ApiRequest::CreateArticle { .. } => RequestKind::CreateArticle,
            ApiRequest::UpdateArticle { article_id, .. } => RequestKind::UpdateArticle {
                article_id: *article_id,
            },
            ApiRequest::DeleteArticle { article_id, .. } => RequestKind::DeleteArticle {
                article_id: *article_id,
            },
        }
    }
}

/// Identifies a finished request without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Login,
    ListArticles,
    CreateArticle,
    UpdateArticle { article_id: ArticleId },
    DeleteArticle { article_id: ArticleId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    LoggedIn(LoginResponse),
    Articles(ArticleListResponse),
    Created(ArticleResponse),
    Updated(ArticleResponse),
    Deleted(MessageResponse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Completed {
        seq: u64,
        kind: RequestKind,
        result: Result<ApiResponse, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// HTTP 401; `message` is the server's text, if it sent one.
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}
