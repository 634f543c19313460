//! Articles engine: HTTP API client, token storage and effect execution.
mod api;
mod engine;
mod persist;
mod token;
mod types;

pub use api::{ApiSettings, ArticlesApi, ReqwestArticlesApi};
pub use engine::{EngineHandle, EventSink};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError, TOKEN_FILENAME};
pub use types::{
    ApiError, ApiRequest, ApiResponse, Article, ArticleDraft, ArticleId, ArticleListResponse,
    ArticleResponse, Credentials, EngineEvent, LoginResponse, MessageResponse, RequestKind, Topic,
};
