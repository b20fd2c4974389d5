use super::error::*;
use crate::application_impl::{CacheInvalidator, CacheReader, Validator, keys};
use crate::application_port::{
    AuthService, CompanyService, JobService, LoginInput, ServiceError, SignupInput,
};
use crate::domain_model::{
    Company, CompanyId, CompanyProfileUpdate, CompanyPublic, JobDraft, JobId, JobUpdate,
    Pagination,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::header::SET_COOKIE;

pub const REFRESH_COOKIE: &str = "__Host-token";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ApiError) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `__Host-` prefix: Secure, Path=/, no Domain.
fn refresh_cookie(value: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Secure; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        REFRESH_COOKIE, value, max_age_secs
    )
}

fn clear_refresh_cookie() -> String {
    refresh_cookie("", 0)
}

// ---------------------------------------------------------------- auth

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

pub async fn login(
    cookie: Option<String>,
    body: LoginRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut v = Validator::new();
    v.email("email", &body.email);
    v.password("password", &body.password);
    v.finish().map_err(reject_service)?;

    let result = auth_service
        .login(
            LoginInput {
                email: body.email,
                password: body.password,
            },
            cookie.as_deref(),
        )
        .await
        .map_err(reject_service)?;

    let json = warp::reply::json(&ApiResponse::ok(LoginResponse {
        access_token: result.tokens.access_token.clone(),
    }));
    Ok(warp::reply::with_header(
        json,
        SET_COOKIE,
        refresh_cookie(
            &result.tokens.refresh_token,
            result.tokens.refresh_max_age_secs,
        ),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub website: String,
    pub headquarter: String,
    pub logo: String,
    pub description: String,
}

pub async fn signup(
    body: SignupRequest,
    auth_service: Arc<dyn AuthService>,
    invalidator: Arc<CacheInvalidator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut v = Validator::new();
    v.min_len("name", &body.name, 3);
    v.email("email", &body.email);
    v.password("password", &body.password);
    v.password("confirm", &body.confirm);
    v.url("website", &body.website);
    v.min_len("headquarter", &body.headquarter, 3);
    v.url("logo", &body.logo);
    v.min_len("description", &body.description, 3);
    if body.password != body.confirm {
        v.push("confirm", "passwords don't match");
    }
    v.finish().map_err(reject_service)?;

    auth_service
        .signup(SignupInput {
            name: body.name,
            email: body.email,
            password: body.password,
            website: body.website,
            headquarter: body.headquarter,
            logo: body.logo,
            description: body.description,
        })
        .await
        .map_err(reject_service)?;

    invalidator
        .invalidate(&[keys::pagination_pattern("company")], &[])
        .await;

    Ok(warp::reply::json(&ApiResponse::ok(MessageResponse {
        message: "A link to activate your account has been emailed to the email address provided.",
    })))
}

pub async fn refresh(
    cookie: Option<String>,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Some(cookie) = cookie else {
        return Err(reject_service(ServiceError::Token(
            "Token is missing".to_string(),
        )));
    };

    let tokens = auth_service
        .refresh_session(&cookie)
        .await
        .map_err(reject_service)?;

    let json = warp::reply::json(&ApiResponse::ok(LoginResponse {
        access_token: tokens.access_token.clone(),
    }));
    Ok(warp::reply::with_header(
        json,
        SET_COOKIE,
        refresh_cookie(&tokens.refresh_token, tokens.refresh_max_age_secs),
    ))
}

pub async fn logout(
    _company: Company,
    cookie: Option<String>,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    auth_service
        .logout(cookie.as_deref())
        .await
        .map_err(reject_service)?;

    let json = warp::reply::json(&ApiResponse::ok(MessageResponse {
        message: "Logged out successfully",
    }));
    Ok(warp::reply::with_header(
        json,
        SET_COOKIE,
        clear_refresh_cookie(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

pub async fn verify_email(
    body: VerifyEmailRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    auth_service
        .verify_email(&body.token)
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(MessageResponse {
        message: "Email verified successfully",
    })))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    company: Company,
    body: ChangePasswordRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut v = Validator::new();
    v.password("old_password", &body.old_password);
    v.password("new_password", &body.new_password);
    v.finish().map_err(reject_service)?;

    auth_service
        .change_password(company.id, &body.old_password, &body.new_password)
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(MessageResponse {
        message: "Password changed successfully",
    })))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    body: ForgotPasswordRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut v = Validator::new();
    v.email("email", &body.email);
    v.finish().map_err(reject_service)?;

    auth_service
        .forgot_password(&body.email)
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(MessageResponse {
        message: "If that email address is in our database, an email is sent to reset your password",
    })))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

pub async fn reset_password(
    body: ResetPasswordRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut v = Validator::new();
    v.password("password", &body.password);
    v.finish().map_err(reject_service)?;

    auth_service
        .reset_password(&body.token, &body.password)
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(MessageResponse {
        message: "Password reset successfully",
    })))
}

pub async fn send_verification_email(
    company: Company,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    auth_service
        .send_verification_email(company.id)
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(MessageResponse {
        message:
            "If your email address is not already verified, an email is sent to verify your email address",
    })))
}

pub async fn me(company: Company) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&ApiResponse::ok(company.to_public())))
}

// ---------------------------------------------------------------- reads

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl PaginationQuery {
    fn normalized(self) -> Pagination {
        Pagination::normalized(self.page, self.limit, self.search)
    }
}

fn parse_job_id(raw: &str) -> Result<JobId, warp::Rejection> {
    let mut v = Validator::new();
    let id = v.uuid("id", raw);
    v.finish().map_err(reject_service)?;
    Ok(JobId(id.unwrap_or_default()))
}

fn parse_company_id(raw: &str) -> Result<CompanyId, warp::Rejection> {
    let mut v = Validator::new();
    let id = v.uuid("id", raw);
    v.finish().map_err(reject_service)?;
    Ok(CompanyId(id.unwrap_or_default()))
}

pub async fn list_jobs(
    query: PaginationQuery,
    cache: Arc<CacheReader>,
    job_service: Arc<dyn JobService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let p = query.normalized();
    let key = keys::pagination("job", &p);
    let jobs = cache
        .read(&key, || async { job_service.paginate(&p, None).await })
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(jobs)))
}

pub async fn get_job(
    id: String,
    cache: Arc<CacheReader>,
    job_service: Arc<dyn JobService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = parse_job_id(&id)?;
    let key = keys::entity("job", id);
    let job = cache
        .read(&key, || async {
            job_service
                .find(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Job", id))
        })
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(job)))
}

pub async fn list_companies(
    query: PaginationQuery,
    cache: Arc<CacheReader>,
    company_service: Arc<dyn CompanyService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let p = query.normalized();
    let key = keys::pagination("company", &p);
    let companies = cache
        .read(&key, || async { company_service.paginate(&p).await })
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(companies)))
}

pub async fn get_company(
    id: String,
    cache: Arc<CacheReader>,
    company_service: Arc<dyn CompanyService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = parse_company_id(&id)?;
    let key = keys::entity("company", id);
    let company: CompanyPublic = cache
        .read(&key, || async {
            company_service
                .find(id)
                .await?
                .map(|c| c.to_public())
                .ok_or_else(|| ServiceError::not_found("Company", id))
        })
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(company)))
}

pub async fn list_company_jobs(
    id: String,
    query: PaginationQuery,
    cache: Arc<CacheReader>,
    job_service: Arc<dyn JobService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = parse_company_id(&id)?;
    let p = query.normalized();
    let key = keys::scoped_pagination("company", id, "job", &p);
    let jobs = cache
        .read(&key, || async { job_service.paginate(&p, Some(id)).await })
        .await
        .map_err(reject_service)?;

    Ok(warp::reply::json(&ApiResponse::ok(jobs)))
}

// ---------------------------------------------------------------- writes

#[derive(Debug, Deserialize)]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub application_link: String,
}

fn job_listing_patterns(company_id: CompanyId) -> Vec<String> {
    vec![
        keys::pagination_pattern("job"),
        keys::scoped_pagination_pattern("company", company_id, "job"),
    ]
}

pub async fn post_job(
    company: Company,
    body: JobRequest,
    job_service: Arc<dyn JobService>,
    cache: Arc<CacheReader>,
    invalidator: Arc<CacheInvalidator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut v = Validator::new();
    v.non_empty("title", &body.title);
    v.non_empty("description", &body.description);
    let kind = v.job_kind("type", &body.kind);
    v.url("application_link", &body.application_link);
    v.finish().map_err(reject_service)?;
    // an unparseable kind already failed validation above
    let kind = kind.ok_or_else(|| {
        reject_service(ServiceError::Internal("job kind missing".to_string()))
    })?;

    let job = job_service
        .create(
            company.id,
            JobDraft {
                title: body.title,
                description: body.description,
                kind,
                application_link: body.application_link,
            },
        )
        .await
        .map_err(reject_service)?;

    cache.write(&keys::entity("job", job.id), &job).await;
    invalidator
        .invalidate(&job_listing_patterns(company.id), &[])
        .await;

    Ok(warp::reply::json(&ApiResponse::ok(job)))
}

#[derive(Debug, Deserialize)]
pub struct JobUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub application_link: Option<String>,
}

pub async fn edit_job(
    id: String,
    company: Company,
    body: JobUpdateRequest,
    job_service: Arc<dyn JobService>,
    cache: Arc<CacheReader>,
    invalidator: Arc<CacheInvalidator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = parse_job_id(&id)?;

    let mut v = Validator::new();
    if let Some(title) = &body.title {
        v.non_empty("title", title);
    }
    if let Some(description) = &body.description {
        v.non_empty("description", description);
    }
    let kind = body.kind.as_deref().and_then(|raw| v.job_kind("type", raw));
    if let Some(link) = &body.application_link {
        v.url("application_link", link);
    }
    v.finish().map_err(reject_service)?;

    let existing = job_service
        .find(id)
        .await
        .map_err(reject_service)?
        .ok_or_else(|| reject_service(ServiceError::not_found("Job", id)))?;
    if existing.company_id != company.id {
        return Err(reject_service(ServiceError::Forbidden));
    }

    let job = job_service
        .update(
            id,
            JobUpdate {
                title: body.title,
                description: body.description,
                kind,
                application_link: body.application_link,
            },
        )
        .await
        .map_err(reject_service)?;

    cache.write(&keys::entity("job", job.id), &job).await;
    invalidator
        .invalidate(&job_listing_patterns(company.id), &[])
        .await;

    Ok(warp::reply::json(&ApiResponse::ok(job)))
}

pub async fn delete_job(
    id: String,
    company: Company,
    job_service: Arc<dyn JobService>,
    invalidator: Arc<CacheInvalidator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = parse_job_id(&id)?;

    let existing = job_service
        .find(id)
        .await
        .map_err(reject_service)?
        .ok_or_else(|| reject_service(ServiceError::not_found("Job", id)))?;
    if existing.company_id != company.id {
        return Err(reject_service(ServiceError::Forbidden));
    }

    job_service.delete(id).await.map_err(reject_service)?;

    invalidator
        .invalidate(
            &job_listing_patterns(company.id),
            &[keys::entity("job", id)],
        )
        .await;

    Ok(warp::reply::json(&ApiResponse::ok(MessageResponse {
        message: "Job deleted successfully",
    })))
}

#[derive(Debug, Deserialize)]
pub struct CompanyUpdateRequest {
    pub name: Option<String>,
    pub website: Option<String>,
    pub headquarter: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
}

pub async fn edit_company(
    company: Company,
    body: CompanyUpdateRequest,
    company_service: Arc<dyn CompanyService>,
    cache: Arc<CacheReader>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut v = Validator::new();
    if let Some(name) = &body.name {
        v.min_len("name", name, 3);
    }
    if let Some(website) = &body.website {
        v.url("website", website);
    }
    if let Some(headquarter) = &body.headquarter {
        v.min_len("headquarter", headquarter, 3);
    }
    if let Some(logo) = &body.logo {
        v.url("logo", logo);
    }
    if let Some(description) = &body.description {
        v.min_len("description", description, 3);
    }
    v.finish().map_err(reject_service)?;

    let updated = company_service
        .update_profile(
            company.id,
            CompanyProfileUpdate {
                name: body.name,
                website: body.website,
                headquarter: body.headquarter,
                logo: body.logo,
                description: body.description,
            },
        )
        .await
        .map_err(reject_service)?;

    let public = updated.to_public();
    cache
        .write(&keys::entity("company", public.id), &public)
        .await;

    Ok(warp::reply::json(&ApiResponse::ok(public)))
}
