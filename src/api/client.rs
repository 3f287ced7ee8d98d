use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::config::ApiConfig;
use crate::model::{Comment, CreatedComment, NewComment, Post, PostId, User};

/// Posts and users, fetched together on start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
}

/// Client for the blog JSON API. Cheap to clone; clones share a
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /posts`
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get_json("/posts").await
    }

    /// `GET /users`
    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    /// Fetch posts and users concurrently. Fails if either request fails.
    pub async fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
        let (posts, users) = tokio::try_join!(self.fetch_posts(), self.fetch_users())?;
        tracing::info!(posts = posts.len(), users = users.len(), "Catalog loaded");
        Ok(Catalog { posts, users })
    }

    /// `GET /comments?postId={id}`
    pub async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError> {
        let comments: Vec<Comment> = self
            .get_json(&format!("/comments?postId={}", post_id))
            .await?;
        // The thread must only ever hold this post's comments.
        Ok(comments
            .into_iter()
            .filter(|comment| comment.post_id == post_id)
            .collect())
    }

    /// `POST /comments`. Returns the server-assigned id.
    pub async fn create_comment(&self, comment: &NewComment) -> Result<CreatedComment, ApiError> {
        let endpoint = "/comments";
        let response = self
            .client
            .post(self.url(endpoint))
            .json(comment)
            .send()
            .await
            .map_err(|e| ApiError::from_send(endpoint, e))?;

        let created: CreatedComment = Self::decode(endpoint, response).await?;
        tracing::info!(
            post_id = comment.post_id,
            remote_id = created.id,
            "Comment created"
        );
        Ok(created)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        tracing::debug!(endpoint, "GET");
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| ApiError::from_send(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::from_body(endpoint, e))
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}
