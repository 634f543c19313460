use std::time::Duration;

use articles_engine::{
    ApiError, ApiSettings, Article, ArticleDraft, ArticlesApi, Credentials, ReqwestArticlesApi,
    Topic,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestArticlesApi {
    ReqwestArticlesApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("valid base url")
}

fn draft() -> ArticleDraft {
    ArticleDraft {
        title: "Closures".to_string(),
        text: "Functions remember their scope".to_string(),
        topic: Topic::JavaScript,
    }
}

#[tokio::test]
async fn login_posts_credentials_and_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "a", "password": "b"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "ok", "token": "T"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = api_for(&server)
        .login(&Credentials {
            username: "a".to_string(),
            password: "b".to_string(),
        })
        .await
        .expect("login ok");

    assert_eq!(reply.message, "ok");
    assert_eq!(reply.token, "T");
}

#[tokio::test]
async fn list_sends_raw_token_as_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(header("Authorization", "T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Here are your articles",
            "articles": [
                {"article_id": 1, "title": "One", "text": "First", "topic": "React"},
                {"article_id": 2, "title": "Two", "text": "Second", "topic": "Node"}
            ]
        })))
        .mount(&server)
        .await;

    let reply = api_for(&server)
        .list_articles(Some("T"))
        .await
        .expect("list ok");

    assert_eq!(reply.message, "Here are your articles");
    assert_eq!(
        reply.articles,
        vec![
            Article {
                article_id: 1,
                title: "One".to_string(),
                text: "First".to_string(),
                topic: Topic::React,
            },
            Article {
                article_id: 2,
                title: "Two".to_string(),
                text: "Second".to_string(),
                topic: Topic::Node,
            },
        ]
    );
}

#[tokio::test]
async fn missing_token_omits_header_and_maps_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token required"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).list_articles(None).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            message: "Token required".to_string()
        }
    );

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn create_posts_draft_and_returns_canonical_article() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/articles"))
        .and(header("Authorization", "T"))
        .and(body_json(json!({
            "title": "Closures",
            "text": "Functions remember their scope",
            "topic": "JavaScript"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Well done, great article!",
            "article": {
                "article_id": 9,
                "title": "Closures",
                "text": "Functions remember their scope",
                "topic": "JavaScript"
            }
        })))
        .mount(&server)
        .await;

    let reply = api_for(&server)
        .create_article(Some("T"), &draft())
        .await
        .expect("create ok");

    assert_eq!(reply.article.article_id, 9);
    assert_eq!(reply.message, "Well done, great article!");
}

#[tokio::test]
async fn update_and_delete_target_article_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/articles/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Nice update!",
            "article": {
                "article_id": 3,
                "title": "Closures",
                "text": "Functions remember their scope",
                "topic": "JavaScript"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/articles/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let updated = api
        .update_article(Some("T"), 3, &draft())
        .await
        .expect("update ok");
    assert_eq!(updated.article.article_id, 3);

    let deleted = api.delete_article(Some("T"), 3).await.expect("delete ok");
    assert_eq!(deleted.message, "deleted");
}

#[tokio::test]
async fn other_statuses_carry_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/articles"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "title is required"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_article(Some("T"), &draft())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 422,
            message: "title is required".to_string()
        }
    );
    assert_eq!(err.to_string(), "title is required");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_articles(Some("T")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn request_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"message": "late", "articles": []})),
        )
        .mount(&server)
        .await;

    let api = ReqwestArticlesApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.list_articles(Some("T")).await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on port 1 on a test host.
    let api = ReqwestArticlesApi::new(ApiSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.list_articles(Some("T")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}
