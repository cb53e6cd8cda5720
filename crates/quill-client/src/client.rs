use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus};
use quill_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::cache::ClientPostCache;
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Performs post round trips against the API and reconciles the injected cache with
/// what the server confirms.
#[derive(Clone)]
pub struct PostsClient {
    http: Client,
    base: Url,
    token: Option<String>,
    cache: Arc<ClientPostCache>,
}

impl PostsClient {
    pub fn new(config: &ClientConfig, cache: Arc<ClientPostCache>) -> Result<Self, ClientError> {
        let mut base = Url::parse(&config.base_url)?;
        // Relative joins replace the last segment unless the path ends in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = Client::builder().user_agent(Self::user_agent()).build()?;

        Ok(Self {
            http,
            base,
            token: config.token.clone(),
            cache,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("quill-client/", env!("CARGO_PKG_VERSION"))
    }

    pub fn cache(&self) -> &Arc<ClientPostCache> {
        &self.cache
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Fetch the full listing and make it the entire cache.
    pub async fn fetch_all(&self) -> Result<Vec<Post>, ClientError> {
        let posts: Vec<Post> = self.send(self.request(Method::GET, "posts")?).await?;
        self.cache.replace_all(posts.clone()).await;
        Ok(posts)
    }

    /// Fetch one post and refresh its cache entry.
    pub async fn fetch_one(&self, id: Uuid) -> Result<Post, ClientError> {
        let post: Post = self
            .send(self.request(Method::GET, &format!("posts/{id}"))?)
            .await?;
        self.cache.upsert_one(post.clone()).await;
        Ok(post)
    }

    pub async fn create(&self, input: &CreatePostRequest) -> Result<Post, ClientError> {
        let post: Post = self
            .send(self.request(Method::POST, "posts")?.json(input))
            .await?;
        tracing::debug!(post_id = %post.id, "Post created");
        self.cache.upsert_one(post.clone()).await;
        Ok(post)
    }

    pub async fn update(&self, id: Uuid, input: &UpdatePostRequest) -> Result<Post, ClientError> {
        let post: Post = self
            .send(self.request(Method::PUT, &format!("posts/{id}"))?.json(input))
            .await?;
        tracing::debug!(post_id = %post.id, "Post updated");
        self.cache.upsert_one(post.clone()).await;
        Ok(post)
    }

    pub async fn publish(&self, id: Uuid) -> Result<Post, ClientError> {
        self.set_status(id, PostStatus::Published).await
    }

    pub async fn unpublish(&self, id: Uuid) -> Result<Post, ClientError> {
        self.set_status(id, PostStatus::Draft).await
    }

    async fn set_status(&self, id: Uuid, status: PostStatus) -> Result<Post, ClientError> {
        let input = UpdatePostRequest {
            status: Some(status),
            ..UpdatePostRequest::default()
        };
        self.update(id, &input).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .request(Method::DELETE, &format!("posts/{id}"))?
            .send()
            .await?;
        Self::check(resp).await?;
        tracing::debug!(post_id = %id, "Post deleted");
        self.cache.remove_one(id).await;
        Ok(())
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(ClientError::Url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let req = self.http.request(method, self.url(path)?);
        Ok(match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        Self::handle(req.send().await?).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let bytes = Self::check(resp).await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn check(resp: Response) -> Result<Vec<u8>, ClientError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let err = ClientError::from_response(status, &bytes);
            tracing::warn!(%status, error = %err, "Post request failed");
            return Err(err);
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use httpmock::MockServer;
    use quill_core::domain::{AuthorSnapshot, Category};

    use super::*;

    fn post(title: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: "Some words here".to_string(),
            excerpt: "Some words here...".to_string(),
            featured_image: None,
            tags: vec!["rust".to_string()],
            category: Category::Programming,
            status: PostStatus::Draft,
            author_id: Uuid::new_v4(),
            author: AuthorSnapshot {
                name: "ferris".to_string(),
                avatar: "https://example.com/a.png".to_string(),
            },
            reading_time: 1,
            published_date: Utc::now(),
        }
    }

    fn client(server: &MockServer, cache: Arc<ClientPostCache>) -> PostsClient {
        let config = ClientConfig::new(server.url("/api")).with_token("token");
        PostsClient::new(&config, cache).expect("client")
    }

    fn json(value: &impl serde::Serialize) -> String {
        serde_json::to_string(value).expect("serialize")
    }

    #[tokio::test]
    async fn fetch_all_replaces_cache() -> Result<(), ClientError> {
        let server = MockServer::start();
        let fresh = vec![post("One"), post("Two")];
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/posts");
            then.status(200)
                .header("content-type", "application/json")
                .body(json(&fresh));
        });

        let cache = Arc::new(ClientPostCache::new());
        let stale = post("Stale");
        cache.replace_all(vec![stale.clone()]).await;

        let client = client(&server, cache.clone());
        client.fetch_all().await?;

        mock.assert();
        assert_eq!(cache.snapshot().await, fresh);
        assert!(cache.get(stale.id).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn create_sends_bearer_and_appends() -> Result<(), ClientError> {
        let server = MockServer::start();
        let created = post("New");
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/api/posts")
                .header("authorization", "Bearer token")
                .json_body_includes(r#"{"title":"New"}"#);
            then.status(201)
                .header("content-type", "application/json")
                .body(json(&created));
        });

        let cache = Arc::new(ClientPostCache::new());
        let client = client(&server, cache.clone());
        let input = CreatePostRequest {
            title: "New".to_string(),
            content: "Some words here".to_string(),
            category: Some(Category::Programming),
            ..CreatePostRequest::default()
        };
        let returned = client.create(&input).await?;

        mock.assert();
        assert_eq!(returned.id, created.id);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get(created.id).await, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn failed_create_leaves_cache_unchanged() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST").path("/api/posts");
            then.status(400)
                .header("content-type", "application/json")
                .body(r#"{"type":"about:blank","title":"Bad Request","status":400,"detail":"title is required"}"#);
        });

        let cache = Arc::new(ClientPostCache::new());
        let existing = post("Existing");
        cache.replace_all(vec![existing.clone()]).await;

        let client = client(&server, cache.clone());
        let err = client
            .create(&CreatePostRequest::default())
            .await
            .expect_err("validation failure");

        assert!(matches!(err, ClientError::Validation(msg) if msg == "title is required"));
        assert_eq!(cache.snapshot().await, vec![existing]);
    }

    #[tokio::test]
    async fn update_replaces_in_place() -> Result<(), ClientError> {
        let server = MockServer::start();
        let original = post("Original");
        let mut edited = original.clone();
        edited.status = PostStatus::Published;
        let path = format!("/api/posts/{}", original.id);
        let mock = server.mock(|when, then| {
            when.method("PUT")
                .path(path.as_str())
                .json_body_includes(r#"{"status":"published"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .body(json(&edited));
        });

        let cache = Arc::new(ClientPostCache::new());
        cache
            .replace_all(vec![original.clone(), post("Other")])
            .await;

        let client = client(&server, cache.clone());
        client.publish(original.id).await?;

        mock.assert();
        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.snapshot().await[0], edited);
        Ok(())
    }

    #[tokio::test]
    async fn forbidden_update_leaves_cache_unchanged() {
        let server = MockServer::start();
        let original = post("Original");
        let path = format!("/api/posts/{}", original.id);
        server.mock(|when, then| {
            when.method("PUT").path(path.as_str());
            then.status(403)
                .header("content-type", "application/json")
                .body(r#"{"type":"about:blank","title":"Forbidden","status":403}"#);
        });

        let cache = Arc::new(ClientPostCache::new());
        cache.replace_all(vec![original.clone()]).await;

        let client = client(&server, cache.clone());
        let input = UpdatePostRequest {
            title: Some("Hijacked".to_string()),
            ..UpdatePostRequest::default()
        };
        let err = client
            .update(original.id, &input)
            .await
            .expect_err("forbidden");

        assert!(matches!(err, ClientError::Forbidden));
        assert_eq!(cache.get(original.id).await, Some(original));
    }

    #[tokio::test]
    async fn delete_removes_entry() -> Result<(), ClientError> {
        let server = MockServer::start();
        let doomed = post("Doomed");
        let kept = post("Kept");
        let path = format!("/api/posts/{}", doomed.id);
        let mock = server.mock(|when, then| {
            when.method("DELETE").path(path.as_str());
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"data":null,"message":"Post deleted"}"#);
        });

        let cache = Arc::new(ClientPostCache::new());
        cache.replace_all(vec![doomed.clone(), kept.clone()]).await;

        let client = client(&server, cache.clone());
        client.delete(doomed.id).await?;

        mock.assert();
        assert_eq!(cache.snapshot().await, vec![kept]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_of_unknown_post_leaves_cache_unchanged() {
        let server = MockServer::start();
        let missing = Uuid::new_v4();
        let path = format!("/api/posts/{missing}");
        server.mock(|when, then| {
            when.method("DELETE").path(path.as_str());
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"type":"about:blank","title":"Not Found","status":404,"detail":"Post not found"}"#);
        });

        let cache = Arc::new(ClientPostCache::new());
        let existing = post("Existing");
        cache.replace_all(vec![existing.clone()]).await;

        let client = client(&server, cache.clone());
        let err = client.delete(missing).await.expect_err("not found");

        assert!(matches!(err, ClientError::NotFound(_)));
        assert_eq!(cache.snapshot().await, vec![existing]);
    }

    #[tokio::test]
    async fn server_error_on_fetch_keeps_cache() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/posts");
            then.status(500).body("boom");
        });

        let cache = Arc::new(ClientPostCache::new());
        let existing = post("Existing");
        cache.replace_all(vec![existing.clone()]).await;

        let client = client(&server, cache.clone());
        let err = client.fetch_all().await.expect_err("server error");

        assert!(matches!(err, ClientError::Server { status: 500, .. }));
        assert_eq!(cache.snapshot().await, vec![existing]);
    }

    #[tokio::test]
    async fn fetch_one_refreshes_entry_in_place() -> Result<(), ClientError> {
        let server = MockServer::start();
        let original = post("Original");
        let mut fresh = original.clone();
        fresh.title = "Edited elsewhere".to_string();
        let path = format!("/api/posts/{}", original.id);
        let mock = server.mock(|when, then| {
            when.method("GET").path(path.as_str());
            then.status(200)
                .header("content-type", "application/json")
                .body(json(&fresh));
        });

        let cache = Arc::new(ClientPostCache::new());
        let other = post("Other");
        cache.replace_all(vec![original.clone(), other.clone()]).await;

        let client = client(&server, cache.clone());
        client.fetch_one(original.id).await?;

        mock.assert();
        assert_eq!(cache.snapshot().await, vec![fresh, other]);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_one_not_found_leaves_cache_unchanged() {
        let server = MockServer::start();
        let existing = post("Existing");
        let path = format!("/api/posts/{}", existing.id);
        server.mock(|when, then| {
            when.method("GET").path(path.as_str());
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"type":"about:blank","title":"Not Found","status":404,"detail":"Post not found"}"#);
        });

        let cache = Arc::new(ClientPostCache::new());
        cache.replace_all(vec![existing.clone()]).await;

        let client = client(&server, cache.clone());
        let err = client.fetch_one(existing.id).await.expect_err("not found");

        assert!(matches!(err, ClientError::NotFound(msg) if msg == "Post not found"));
        assert_eq!(cache.snapshot().await, vec![existing]);
    }

    #[tokio::test]
    async fn unpublish_sends_draft_status() -> Result<(), ClientError> {
        let server = MockServer::start();
        let mut live = post("Live");
        live.status = PostStatus::Published;
        let mut drafted = live.clone();
        drafted.status = PostStatus::Draft;
        let path = format!("/api/posts/{}", live.id);
        let mock = server.mock(|when, then| {
            when.method("PUT")
                .path(path.as_str())
                .json_body_includes(r#"{"status":"draft"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .body(json(&drafted));
        });

        let cache = Arc::new(ClientPostCache::new());
        cache.replace_all(vec![live.clone()]).await;

        let client = client(&server, cache.clone());
        let returned = client.unpublish(live.id).await?;

        mock.assert();
        assert_eq!(returned.status, PostStatus::Draft);
        assert_eq!(cache.get(live.id).await.map(|p| p.status), Some(PostStatus::Draft));
        Ok(())
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_prefix() {
        let config = ClientConfig::new("http://localhost:8080/api");
        let client = PostsClient::new(&config, Arc::new(ClientPostCache::new())).expect("client");
        assert_eq!(
            client.url("posts").expect("url").as_str(),
            "http://localhost:8080/api/posts"
        );
    }
}
