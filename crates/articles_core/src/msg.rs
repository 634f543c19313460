use crate::{
    ApiFailure, ArticleDraft, ArticleId, ArticleListReply, ArticleReply, Credentials, LoginReply,
    Route, Topic,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a login form input.
    LoginInputChanged { field: LoginField, value: String },
    /// User submitted the login form.
    LoginSubmitted,
    /// Authenticate with explicit credentials.
    LoginRequested(Credentials),
    /// Authentication request finished.
    LoginFinished(Result<LoginReply, ApiFailure>),
    /// User clicked Logout.
    LogoutClicked,
    /// User followed a navigation link.
    Navigate(Route),
    /// Fetch the full article collection.
    ArticlesRequested,
    /// Article list request finished.
    ArticlesLoaded(Result<ArticleListReply, ApiFailure>),
    /// User edited a text input of the article form.
    ArticleInputChanged { field: ArticleField, value: String },
    /// User picked a topic in the article form.
    TopicSelected(Option<Topic>),
    /// User submitted the article form (create or update, depending on edit mode).
    ArticleFormSubmitted,
    /// Create a new article.
    ArticleCreateRequested(ArticleDraft),
    /// Create request finished.
    ArticleCreated(Result<ArticleReply, ApiFailure>),
    /// Replace an existing article's fields.
    ArticleUpdateRequested {
        article_id: ArticleId,
        draft: ArticleDraft,
    },
    /// Update request finished.
    ArticleUpdated {
        article_id: ArticleId,
        result: Result<ArticleReply, ApiFailure>,
    },
    /// User clicked Delete on an article.
    DeleteClicked(ArticleId),
    /// Delete an article.
    ArticleDeleteRequested(ArticleId),
    /// Delete request finished; `Ok` carries the server message.
    ArticleDeleted {
        article_id: ArticleId,
        result: Result<String, ApiFailure>,
    },
    /// User clicked Edit on an article.
    EditClicked(ArticleId),
    /// User clicked Cancel edit.
    CancelEditClicked,
    /// The token from a successful login was written (or not) to the token store.
    TokenStored(Result<(), String>),
    /// The local token store could not be cleared.
    TokenStoreFailed(String),
}
