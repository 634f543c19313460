use crate::{ArticleDraft, ArticleId, Credentials, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Login { credentials: Credentials },
    StoreToken { token: String },
    ClearToken,
    FetchArticles,
    CreateArticle { draft: ArticleDraft },
    UpdateArticle { article_id: ArticleId, draft: ArticleDraft },
    DeleteArticle { article_id: ArticleId },
    /// A view became active; the platform performs its mount-time work.
    RouteEntered { route: Route },
}
