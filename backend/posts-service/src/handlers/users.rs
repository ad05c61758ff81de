/// Account handlers
use crate::error::Result;
use crate::services::{SignInRequest, SignUpRequest, UserService};
use actix_web::{web, HttpResponse};

/// POST /user/signup
pub async fn sign_up(
    service: web::Data<UserService>,
    req: web::Json<SignUpRequest>,
) -> Result<HttpResponse> {
    let response = service.sign_up(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// POST /user/signin
pub async fn sign_in(
    service: web::Data<UserService>,
    req: web::Json<SignInRequest>,
) -> Result<HttpResponse> {
    let response = service.sign_in(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
