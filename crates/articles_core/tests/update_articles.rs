use std::sync::Once;

use articles_core::{
    update, ApiFailure, AppState, Article, ArticleDraft, ArticleId, ArticleListReply,
    ArticleReply, Effect, Msg, Route, Topic,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(articles_logging::initialize_for_tests);
}

fn article(article_id: ArticleId) -> Article {
    Article {
        article_id,
        title: format!("Title {article_id}"),
        text: format!("Text {article_id}"),
        topic: Topic::React,
    }
}

fn draft(title: &str) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        text: "Body".to_string(),
        topic: Topic::Node,
    }
}

/// State on the articles view holding the given collection, with a clean banner.
fn loaded(ids: &[ArticleId]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Articles));
    let (state, _) = update(state, Msg::ArticlesRequested);
    let (state, _) = update(
        state,
        Msg::ArticlesLoaded(Ok(ArticleListReply {
            message: String::new(),
            articles: ids.iter().copied().map(article).collect(),
        })),
    );
    state
}

#[test]
fn list_replaces_collection_verbatim() {
    init_logging();
    let state = loaded(&[7, 8]);

    let (state, effects) = update(state, Msg::ArticlesRequested);
    assert!(state.spinner_on());
    assert_eq!(effects, vec![Effect::FetchArticles]);

    let returned = vec![article(3), article(1)];
    let (state, effects) = update(
        state,
        Msg::ArticlesLoaded(Ok(ArticleListReply {
            message: "Here are your articles".to_string(),
            articles: returned.clone(),
        })),
    );

    assert_eq!(state.articles(), returned.as_slice());
    assert_eq!(state.message(), "Here are your articles");
    assert!(!state.spinner_on());
    assert!(effects.is_empty());
}

#[test]
fn create_appends_server_article() {
    init_logging();
    let state = loaded(&[1, 2]);
    let (state, effects) = update(state, Msg::ArticleCreateRequested(draft("New")));
    assert_eq!(
        effects,
        vec![Effect::CreateArticle {
            draft: draft("New")
        }]
    );

    let created = Article {
        article_id: 9,
        title: "New".to_string(),
        text: "Body".to_string(),
        topic: Topic::Node,
    };
    let (state, _) = update(
        state,
        Msg::ArticleCreated(Ok(ArticleReply {
            message: "created".to_string(),
            article: created.clone(),
        })),
    );

    assert_eq!(state.articles(), &[article(1), article(2), created][..]);
    assert_eq!(state.message(), "created");
    assert!(!state.spinner_on());
}

#[test]
fn update_replaces_only_matching_entry_and_clears_edit_marker() {
    init_logging();
    let state = loaded(&[1, 2, 3]);
    let (state, _) = update(state, Msg::EditClicked(2));
    assert_eq!(state.current_article_id(), Some(2));

    let (state, effects) = update(
        state,
        Msg::ArticleUpdateRequested {
            article_id: 2,
            draft: draft("Changed"),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::UpdateArticle {
            article_id: 2,
            draft: draft("Changed"),
        }]
    );

    let changed = Article {
        article_id: 2,
        title: "Changed".to_string(),
        text: "Body".to_string(),
        topic: Topic::Node,
    };
    let (state, _) = update(
        state,
        Msg::ArticleUpdated {
            article_id: 2,
            result: Ok(ArticleReply {
                message: "updated".to_string(),
                article: changed.clone(),
            }),
        },
    );

    assert_eq!(state.articles(), &[article(1), changed, article(3)][..]);
    assert_eq!(state.current_article_id(), None);
    assert_eq!(state.message(), "updated");
}

#[test]
fn delete_removes_exactly_that_entry() {
    init_logging();
    let state = loaded(&[1, 2, 3]);
    let (state, effects) = update(state, Msg::ArticleDeleteRequested(3));
    assert_eq!(effects, vec![Effect::DeleteArticle { article_id: 3 }]);

    let (state, _) = update(
        state,
        Msg::ArticleDeleted {
            article_id: 3,
            result: Ok("deleted".to_string()),
        },
    );

    assert_eq!(state.articles(), &[article(1), article(2)][..]);
    assert_eq!(state.message(), "deleted");
    assert!(!state.spinner_on());
}

#[test]
fn unauthorized_redirects_without_message() {
    init_logging();
    let failures: Vec<Msg> = vec![
        Msg::ArticlesLoaded(Err(ApiFailure::Unauthorized)),
        Msg::ArticleCreated(Err(ApiFailure::Unauthorized)),
        Msg::ArticleUpdated {
            article_id: 1,
            result: Err(ApiFailure::Unauthorized),
        },
        Msg::ArticleDeleted {
            article_id: 1,
            result: Err(ApiFailure::Unauthorized),
        },
    ];

    for failure in failures {
        let state = loaded(&[1]);
        let (state, _) = update(state, Msg::ArticlesRequested);
        let (state, effects) = update(state, failure);

        assert_eq!(state.message(), "");
        assert_eq!(state.route(), Route::Login);
        assert!(!state.spinner_on());
        assert_eq!(state.articles(), &[article(1)][..]);
        assert_eq!(
            effects,
            vec![Effect::RouteEntered {
                route: Route::Login
            }]
        );
    }
}

#[test]
fn other_failures_surface_text_and_leave_collection() {
    init_logging();
    let state = loaded(&[1, 2]);
    let (state, _) = update(state, Msg::ArticleDeleteRequested(1));
    let (state, effects) = update(
        state,
        Msg::ArticleDeleted {
            article_id: 1,
            result: Err(ApiFailure::Other("Failed to fetch".to_string())),
        },
    );

    assert_eq!(state.message(), "Failed to fetch");
    assert_eq!(state.route(), Route::Articles);
    assert_eq!(state.articles(), &[article(1), article(2)][..]);
    assert!(!state.spinner_on());
    assert!(effects.is_empty());
}

#[test]
fn overlapping_completions_apply_in_arrival_order() {
    init_logging();
    let state = loaded(&[]);
    let (state, _) = update(state, Msg::ArticlesRequested);
    let (state, _) = update(state, Msg::ArticlesRequested);

    let (state, _) = update(
        state,
        Msg::ArticlesLoaded(Ok(ArticleListReply {
            message: "second".to_string(),
            articles: vec![article(2)],
        })),
    );
    let (state, _) = update(
        state,
        Msg::ArticlesLoaded(Ok(ArticleListReply {
            message: "first".to_string(),
            articles: vec![article(1)],
        })),
    );

    assert_eq!(state.articles(), &[article(1)][..]);
    assert_eq!(state.message(), "first");
}
