//! Post endpoints

use super::{AuthenticatedClient, PublicClient};
use crate::error::Result;
use crate::request::ApiRequest;
use quill_core::{Post, PostDraft, PostPatch};

const POSTS_PATH: &str = "/posts/";

fn post_path(id: u64) -> String {
    format!("{POSTS_PATH}{id}/")
}

impl PublicClient {
    /// List every post; reads are open to anonymous users
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.execute(ApiRequest::get(POSTS_PATH)).await
    }
}

impl AuthenticatedClient {
    /// List every post
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.execute(ApiRequest::get(POSTS_PATH)).await
    }

    /// List the posts written by `author`
    ///
    /// The backend has no author filter, so the full list is filtered here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded
    pub async fn list_posts_by(&self, author: &str) -> Result<Vec<Post>> {
        let mut posts = self.list_posts().await?;
        posts.retain(|post| post.is_authored_by(author));
        Ok(posts)
    }

    /// Fetch one post
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id
    pub async fn get_post(&self, id: u64) -> Result<Post> {
        self.execute(ApiRequest::get(post_path(id))).await
    }

    /// Create a post owned by the signed-in user
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the backend rejects the draft
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post> {
        let request = ApiRequest::post(POSTS_PATH).json(draft)?;
        let post: Post = self.execute(request).await?;
        info!(id = post.id, "Created post");
        Ok(post)
    }

    /// Change the title and/or content of a post
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the post belongs to another user, or `NotFound`
    pub async fn update_post(&self, id: u64, patch: &PostPatch) -> Result<Post> {
        let request = ApiRequest::patch(post_path(id)).json(patch)?;
        let post: Post = self.execute(request).await?;
        info!(id, "Updated post");
        Ok(post)
    }

    /// Delete a post
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the post belongs to another user, or `NotFound`
    pub async fn delete_post(&self, id: u64) -> Result<()> {
        self.execute_empty(ApiRequest::delete(post_path(id))).await?;
        info!(id, "Deleted post");
        Ok(())
    }
}
