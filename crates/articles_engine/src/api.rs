use std::time::Duration;

use articles_logging::{articles_debug, articles_warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    ApiError, ArticleDraft, ArticleId, ArticleListResponse, ArticleResponse, Credentials,
    LoginResponse, MessageResponse,
};

const LOGIN_PATH: &str = "api/login";
const ARTICLES_PATH: &str = "api/articles";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// `None` leaves the transport's own behaviour in place.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// The remote article service.
///
/// Authenticated calls take the raw token; it is sent as the `Authorization`
/// header verbatim, and omitted when `None`.
#[async_trait::async_trait]
pub trait ArticlesApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    async fn list_articles(&self, token: Option<&str>) -> Result<ArticleListResponse, ApiError>;

    async fn create_article(
        &self,
        token: Option<&str>,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError>;

    async fn update_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError>;

    async fn delete_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
    ) -> Result<MessageResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestArticlesApi {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestArticlesApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut raw = settings.base_url.trim().to_string();
        // Joining relative paths keeps any path prefix only when the base ends in '/'.
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    fn article_endpoint(&self, article_id: ArticleId) -> Result<Url, ApiError> {
        self.endpoint(&format!("{ARTICLES_PATH}/{article_id}"))
    }

    async fn send<B, R>(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        articles_debug!("{} {}", method, url.path());
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        articles_debug!("{} {} -> {}", method, url.path(), status);

        if !status.is_success() {
            let message = error_message(status, &bytes);
            articles_warn!("{} {} failed: {}", method, url.path(), message);
            return Err(if status == StatusCode::UNAUTHORIZED {
                ApiError::Unauthorized { message }
            } else {
                ApiError::Status {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ArticlesApi for ReqwestArticlesApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(LOGIN_PATH)?;
        self.send(Method::POST, url, None, Some(credentials)).await
    }

    async fn list_articles(&self, token: Option<&str>) -> Result<ArticleListResponse, ApiError> {
        let url = self.endpoint(ARTICLES_PATH)?;
        self.send::<(), _>(Method::GET, url, token, None).await
    }

    async fn create_article(
        &self,
        token: Option<&str>,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError> {
        let url = self.endpoint(ARTICLES_PATH)?;
        self.send(Method::POST, url, token, Some(draft)).await
    }

    async fn update_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError> {
        let url = self.article_endpoint(article_id)?;
        self.send(Method::PUT, url, token, Some(draft)).await
    }

    async fn delete_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.article_endpoint(article_id)?;
        self.send::<(), _>(Method::DELETE, url, token, None).await
    }
}

/// Prefers the `message` field of a JSON error body, falling back to the status line.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<MessageResponse>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| status.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    ApiError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_path_prefix() {
        let api = ReqwestArticlesApi::new(ApiSettings {
            base_url: "http://localhost:9000/proxy".to_string(),
            ..ApiSettings::default()
        })
        .unwrap();

        assert_eq!(
            api.endpoint(LOGIN_PATH).unwrap().as_str(),
            "http://localhost:9000/proxy/api/login"
        );
        assert_eq!(
            api.article_endpoint(12).unwrap().as_str(),
            "http://localhost:9000/proxy/api/articles/12"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ReqwestArticlesApi::new(ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn error_message_prefers_body_text() {
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, br#"{"message":"title required"}"#),
            "title required"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, b"oops"),
            "500 Internal Server Error"
        );
    }
}
