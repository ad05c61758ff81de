/// Post handlers - HTTP endpoints for post operations
use crate::domain::{NewPost, PostPatch};
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::{LikeOutcome, PostService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "searchQuery", default)]
    pub search_query: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub selected_file: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub creator: Option<String>,
    pub selected_file: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Apply only if the stored version still matches
    pub version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub value: String,
}

/// GET /posts?page=N
pub async fn get_posts(
    service: web::Data<PostService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page = service.list_posts(query.page.as_deref()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /posts/search?searchQuery=..&tags=a,b
pub async fn get_posts_by_search(
    service: web::Data<PostService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let posts = service
        .search_posts(&query.search_query, &query.tags)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": posts })))
}

/// GET /posts/{id}
pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let post = service.get_post(&post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /posts
pub async fn create_post(
    service: web::Data<PostService>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let post = service
        .create_post(NewPost {
            title: req.title,
            message: req.message,
            creator: user_id.0,
            tags: req.tags,
            selected_file: req.selected_file,
        })
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// PATCH /posts/{id}
pub async fn update_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let patch = PostPatch {
        title: req.title,
        message: req.message,
        creator: req.creator,
        tags: req.tags,
        selected_file: req.selected_file,
    };

    let post = service.update_post(&post_id, patch, req.version).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete_post(&post_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Post deleted success" })))
}

/// PATCH /posts/{id}/likePost
pub async fn like_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
    user_id: Option<UserId>,
) -> Result<HttpResponse> {
    let user = user_id.as_ref().map(UserId::as_str);

    match service.like_post(&post_id, user).await? {
        LikeOutcome::Updated(post) => Ok(HttpResponse::Ok().json(post)),
        LikeOutcome::Unauthenticated => {
            Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Unauthenticated" })))
        }
    }
}

/// POST /posts/{id}/commentPost
pub async fn comment_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let post = service.comment_post(&post_id, &req.value).await?;
    Ok(HttpResponse::Ok().json(post))
}
