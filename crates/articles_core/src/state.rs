use std::fmt;
use std::str::FromStr;

use crate::view_model::{AppViewModel, ArticleFormView, ArticleRowView, FormMode, LoginFormView};

pub type ArticleId = u64;

/// Banner text shown after a logout.
pub const LOGOUT_MESSAGE: &str = "Goodbye!";

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    JavaScript,
    React,
    Node,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::JavaScript, Topic::React, Topic::Node];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::JavaScript => "JavaScript",
            Topic::React => "React",
            Topic::Node => "Node",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown topic: {raw}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub article_id: ArticleId,
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

/// Article fields as sent to the server on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReply {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleListReply {
    pub message: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleReply {
    pub message: String,
    pub article: Article,
}

/// Outcome of a failed request as far as the UI is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// The server rejected the session token; the UI redirects silently.
    Unauthorized,
    /// Anything else; the text is shown in the message banner.
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Articles,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Articles => "/articles",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim().trim_end_matches('/') {
            "" => Some(Route::Login),
            "/articles" | "articles" => Some(Route::Articles),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn is_submittable(&self) -> bool {
        self.username.trim().chars().count() >= MIN_USERNAME_LEN
            && self.password.trim().chars().count() >= MIN_PASSWORD_LEN
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleForm {
    pub title: String,
    pub text: String,
    pub topic: Option<Topic>,
}

impl ArticleForm {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            text: article.text.clone(),
            topic: Some(article.topic),
        }
    }

    /// Returns the draft to send, or `None` while a field is missing.
    pub fn draft(&self) -> Option<ArticleDraft> {
        let title = self.title.trim();
        let text = self.text.trim();
        if title.is_empty() || text.is_empty() {
            return None;
        }
        Some(ArticleDraft {
            title: title.to_string(),
            text: text.to_string(),
            topic: self.topic?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    message: String,
    spinner_on: bool,
    articles: Vec<Article>,
    current_article_id: Option<ArticleId>,
    route: Route,
    login_form: LoginForm,
    article_form: ArticleForm,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spinner_on(&self) -> bool {
        self.spinner_on
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn current_article_id(&self) -> Option<ArticleId> {
        self.current_article_id
    }

    pub fn current_article(&self) -> Option<&Article> {
        let id = self.current_article_id?;
        self.articles.iter().find(|article| article.article_id == id)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login_form
    }

    pub fn article_form(&self) -> &ArticleForm {
        &self.article_form
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let editing = self.current_article_id.is_some();
        let article_form = ArticleFormView {
            title: self.article_form.title.clone(),
            text: self.article_form.text.clone(),
            topic: self.article_form.topic,
            mode: match self.current_article_id {
                Some(article_id) => FormMode::Edit { article_id },
                None => FormMode::Create,
            },
            submit_enabled: self.article_form.draft().is_some(),
        };
        let articles = self
            .articles
            .iter()
            .map(|article| ArticleRowView {
                article_id: article.article_id,
                title: article.title.clone(),
                text: article.text.clone(),
                topic: article.topic,
                editing: self.current_article_id == Some(article.article_id),
                actions_enabled: !editing,
            })
            .collect();

        AppViewModel {
            route: self.route,
            message: self.message.clone(),
            spinner_on: self.spinner_on,
            login: LoginFormView {
                username: self.login_form.username.clone(),
                password_len: self.login_form.password.chars().count(),
                submit_enabled: self.login_form.is_submittable(),
            },
            article_form,
            articles,
        }
    }

    /// Opens a request window: clears the banner and turns the spinner on.
    pub(crate) fn begin_request(&mut self) {
        self.message.clear();
        self.spinner_on = true;
        self.dirty = true;
    }

    pub(crate) fn end_request(&mut self) {
        self.spinner_on = false;
        self.dirty = true;
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.dirty = true;
    }

    /// Returns `true` when the route actually changed.
    pub(crate) fn navigate(&mut self, route: Route) -> bool {
        if self.route == route {
            return false;
        }
        self.route = route;
        self.dirty = true;
        true
    }

    pub(crate) fn replace_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.dirty = true;
    }

    pub(crate) fn append_article(&mut self, article: Article) {
        self.articles.push(article);
        self.dirty = true;
    }

    pub(crate) fn replace_article(&mut self, article_id: ArticleId, article: Article) {
        for slot in self
            .articles
            .iter_mut()
            .filter(|existing| existing.article_id == article_id)
        {
            *slot = article.clone();
        }
        self.dirty = true;
    }

    pub(crate) fn remove_article(&mut self, article_id: ArticleId) {
        self.articles.retain(|article| article.article_id != article_id);
        self.dirty = true;
    }

    pub(crate) fn set_current_article(&mut self, article_id: Option<ArticleId>) {
        self.current_article_id = article_id;
        self.dirty = true;
    }

    pub(crate) fn login_form_mut(&mut self) -> &mut LoginForm {
        self.dirty = true;
        &mut self.login_form
    }

    pub(crate) fn article_form_mut(&mut self) -> &mut ArticleForm {
        self.dirty = true;
        &mut self.article_form
    }

    pub(crate) fn reset_article_form(&mut self) {
        self.article_form = ArticleForm::default();
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_requires_trimmed_lengths() {
        let mut form = LoginForm {
            username: "  ab  ".to_string(),
            password: "12345678".to_string(),
        };
        assert!(!form.is_submittable());

        form.username = " abc ".to_string();
        assert!(form.is_submittable());

        form.password = " 1234567 ".to_string();
        assert!(!form.is_submittable());
    }

    #[test]
    fn article_form_draft_needs_every_field() {
        let mut form = ArticleForm {
            title: "Title".to_string(),
            text: "   ".to_string(),
            topic: Some(Topic::Node),
        };
        assert_eq!(form.draft(), None);

        form.text = " body ".to_string();
        assert_eq!(
            form.draft(),
            Some(ArticleDraft {
                title: "Title".to_string(),
                text: "body".to_string(),
                topic: Topic::Node,
            })
        );

        form.topic = None;
        assert_eq!(form.draft(), None);
    }

    #[test]
    fn topic_parses_case_insensitively() {
        assert_eq!("react".parse::<Topic>(), Ok(Topic::React));
        assert_eq!(" JavaScript ".parse::<Topic>(), Ok(Topic::JavaScript));
        assert!("Rust".parse::<Topic>().is_err());
    }

    #[test]
    fn route_paths_round_trip() {
        for route in [Route::Login, Route::Articles] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/articles/"), Some(Route::Articles));
        assert_eq!(Route::from_path("/nowhere"), None);
    }
}
