//! Articles core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{ArticleField, LoginField, Msg};
pub use state::{
    ApiFailure, AppState, Article, ArticleDraft, ArticleForm, ArticleId, ArticleListReply,
    ArticleReply, Credentials, LoginForm, LoginReply, Route, Topic, LOGOUT_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, ArticleFormView, ArticleRowView, FormMode, LoginFormView};
