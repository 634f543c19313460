use crate::{ArticleId, Route, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit {
        article_id: ArticleId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginFormView {
    pub username: String,
    /// Only the length is exposed so the password is never rendered.
    pub password_len: usize,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleFormView {
    pub title: String,
    pub text: String,
    pub topic: Option<Topic>,
    pub mode: FormMode,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub message: String,
    pub spinner_on: bool,
    pub login: LoginFormView,
    pub article_form: ArticleFormView,
    pub articles: Vec<ArticleRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRowView {
    pub article_id: ArticleId,
    pub title: String,
    pub text: String,
    pub topic: Topic,
    pub editing: bool,
    pub actions_enabled: bool,
}
