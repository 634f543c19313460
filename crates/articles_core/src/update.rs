use crate::{
    ApiFailure, AppState, ArticleField, ArticleForm, Effect, LoginField, Msg, Route,
    LOGOUT_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::LoginInputChanged { field, value } => {
            let form = state.login_form_mut();
            match field {
                LoginField::Username => form.username = value,
                LoginField::Password => form.password = value,
            }
        }
        Msg::LoginSubmitted => {
            if !state.login_form().is_submittable() {
                return (state, effects);
            }
            let credentials = state.login_form().credentials();
            state.begin_request();
            effects.push(Effect::Login { credentials });
        }
        Msg::LoginRequested(credentials) => {
            state.begin_request();
            effects.push(Effect::Login { credentials });
        }
        Msg::LoginFinished(result) => {
            match result {
                // Navigation waits for `TokenStored`, so the first list request carries the token.
                Ok(reply) => {
                    effects.push(Effect::StoreToken { token: reply.token });
                    state.set_message(reply.message);
                }
                Err(failure) => fail(&mut state, failure, &mut effects),
            }
            state.end_request();
        }
        Msg::LogoutClicked => {
            effects.push(Effect::ClearToken);
            state.set_message(LOGOUT_MESSAGE);
            enter(&mut state, Route::Login, &mut effects);
        }
        Msg::Navigate(route) => enter(&mut state, route, &mut effects),
        Msg::ArticlesRequested => {
            state.begin_request();
            effects.push(Effect::FetchArticles);
        }
        Msg::ArticlesLoaded(result) => {
            match result {
                Ok(reply) => {
                    state.replace_articles(reply.articles);
                    state.set_message(reply.message);
                }
                Err(failure) => fail(&mut state, failure, &mut effects),
            }
            state.end_request();
        }
        Msg::ArticleInputChanged { field, value } => {
            let form = state.article_form_mut();
            match field {
                ArticleField::Title => form.title = value,
                ArticleField::Text => form.text = value,
            }
        }
        Msg::TopicSelected(topic) => state.article_form_mut().topic = topic,
        Msg::ArticleFormSubmitted => {
            let Some(draft) = state.article_form().draft() else {
                return (state, effects);
            };
            state.reset_article_form();
            state.begin_request();
            match state.current_article_id() {
                Some(article_id) => effects.push(Effect::UpdateArticle { article_id, draft }),
                None => effects.push(Effect::CreateArticle { draft }),
            }
        }
        Msg::ArticleCreateRequested(draft) => {
            state.begin_request();
            effects.push(Effect::CreateArticle { draft });
        }
        Msg::ArticleCreated(result) => {
            match result {
                Ok(reply) => {
                    state.append_article(reply.article);
                    state.set_message(reply.message);
                }
                Err(failure) => fail(&mut state, failure, &mut effects),
            }
            state.end_request();
        }
        Msg::ArticleUpdateRequested { article_id, draft } => {
            state.begin_request();
            effects.push(Effect::UpdateArticle { article_id, draft });
        }
        Msg::ArticleUpdated { article_id, result } => {
            match result {
                Ok(reply) => {
                    state.replace_article(article_id, reply.article);
                    state.set_message(reply.message);
                    state.set_current_article(None);
                }
                Err(failure) => fail(&mut state, failure, &mut effects),
            }
            state.end_request();
        }
        Msg::DeleteClicked(article_id) => {
            if state.current_article_id().is_some() {
                return (state, effects);
            }
            state.begin_request();
            effects.push(Effect::DeleteArticle { article_id });
        }
        Msg::ArticleDeleteRequested(article_id) => {
            state.begin_request();
            effects.push(Effect::DeleteArticle { article_id });
        }
        Msg::ArticleDeleted { article_id, result } => {
            match result {
                Ok(message) => {
                    state.remove_article(article_id);
                    state.set_message(message);
                }
                Err(failure) => fail(&mut state, failure, &mut effects),
            }
            state.end_request();
        }
        Msg::EditClicked(article_id) => {
            if state.current_article_id().is_some() {
                return (state, effects);
            }
            let Some(article) = state
                .articles()
                .iter()
                .find(|article| article.article_id == article_id)
                .cloned()
            else {
                return (state, effects);
            };
            state.set_current_article(Some(article_id));
            *state.article_form_mut() = ArticleForm::from_article(&article);
        }
        Msg::CancelEditClicked => {
            if state.current_article_id().is_some() {
                state.set_current_article(None);
                state.reset_article_form();
            }
        }
        Msg::TokenStored(Ok(())) => enter(&mut state, Route::Articles, &mut effects),
        Msg::TokenStored(Err(message)) | Msg::TokenStoreFailed(message) => {
            state.set_message(message)
        }
    }

    (state, effects)
}

fn enter(state: &mut AppState, route: Route, effects: &mut Vec<Effect>) {
    if state.navigate(route) {
        effects.push(Effect::RouteEntered { route });
    }
}

// A 401 is reported by the redirect itself, so the banner stays as it is.
fn fail(state: &mut AppState, failure: ApiFailure, effects: &mut Vec<Effect>) {
    match failure {
        ApiFailure::Unauthorized => enter(state, Route::Login, effects),
        ApiFailure::Other(message) => state.set_message(message),
    }
}
