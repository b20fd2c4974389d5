use super::handler;
use super::handler::REFRESH_COOKIE;
use crate::api::v1::error::reject_service;
use crate::application_port::AuthService;
use crate::domain_model::Company;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let login = warp::post()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::cookie::optional(REFRESH_COOKIE))
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let signup = warp::post()
        .and(warp::path("signup"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and(with(server.invalidator.clone()))
        .and_then(handler::signup);

    let refresh = warp::post()
        .and(warp::path("refresh"))
        .and(warp::path::end())
        .and(warp::cookie::optional(REFRESH_COOKIE))
        .and(with(server.auth_service.clone()))
        .and_then(handler::refresh);

    let logout = warp::post()
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), false))
        .and(warp::cookie::optional(REFRESH_COOKIE))
        .and(with(server.auth_service.clone()))
        .and_then(handler::logout);

    let verify_email = warp::post()
        .and(warp::path("verify_email"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::verify_email);

    let change_password = warp::post()
        .and(warp::path("change_password"))
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), false))
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::change_password);

    let forgot_password = warp::post()
        .and(warp::path("forgot_password"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::forgot_password);

    let reset_password = warp::post()
        .and(warp::path("reset_password"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::reset_password);

    let send_verification_email = warp::post()
        .and(warp::path("send_verification_email"))
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), false))
        .and(with(server.auth_service.clone()))
        .and_then(handler::send_verification_email);

    let me = warp::get()
        .and(warp::path("me"))
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), false))
        .and_then(handler::me);

    let list_jobs = warp::get()
        .and(warp::path("jobs"))
        .and(warp::path::end())
        .and(warp::query::<handler::PaginationQuery>())
        .and(with(server.cache.clone()))
        .and(with(server.job_service.clone()))
        .and_then(handler::list_jobs);

    let get_job = warp::get()
        .and(warp::path("jobs"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with(server.cache.clone()))
        .and(with(server.job_service.clone()))
        .and_then(handler::get_job);

    let post_job = warp::post()
        .and(warp::path("jobs"))
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), true))
        .and(warp::body::json())
        .and(with(server.job_service.clone()))
        .and(with(server.cache.clone()))
        .and(with(server.invalidator.clone()))
        .and_then(handler::post_job);

    let edit_job = warp::put()
        .and(warp::path("jobs"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), true))
        .and(warp::body::json())
        .and(with(server.job_service.clone()))
        .and(with(server.cache.clone()))
        .and(with(server.invalidator.clone()))
        .and_then(handler::edit_job);

    let delete_job = warp::delete()
        .and(warp::path("jobs"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), true))
        .and(with(server.job_service.clone()))
        .and(with(server.invalidator.clone()))
        .and_then(handler::delete_job);

    let list_companies = warp::get()
        .and(warp::path("companies"))
        .and(warp::path::end())
        .and(warp::query::<handler::PaginationQuery>())
        .and(with(server.cache.clone()))
        .and(with(server.company_service.clone()))
        .and_then(handler::list_companies);

    let get_company = warp::get()
        .and(warp::path("companies"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with(server.cache.clone()))
        .and(with(server.company_service.clone()))
        .and_then(handler::get_company);

    let list_company_jobs = warp::get()
        .and(warp::path("companies"))
        .and(warp::path::param::<String>())
        .and(warp::path("jobs"))
        .and(warp::path::end())
        .and(warp::query::<handler::PaginationQuery>())
        .and(with(server.cache.clone()))
        .and(with(server.job_service.clone()))
        .and_then(handler::list_company_jobs);

    let edit_company = warp::put()
        .and(warp::path("companies"))
        .and(warp::path::end())
        .and(with_auth(server.auth_service.clone(), false))
        .and(warp::body::json())
        .and(with(server.company_service.clone()))
        .and(with(server.cache.clone()))
        .and_then(handler::edit_company);

    login
        .or(signup)
        .or(refresh)
        .or(logout)
        .or(verify_email)
        .or(change_password)
        .or(forgot_password)
        .or(reset_password)
        .or(send_verification_email)
        .or(me)
        .or(list_jobs)
        .or(get_job)
        .or(post_job)
        .or(edit_job)
        .or(delete_job)
        .or(list_companies)
        .or(get_company)
        .or(list_company_jobs)
        .or(edit_company)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Cross-cutting guard: bearer extraction + access token verification +
/// owner resolution, optionally demanding a verified email. Composed onto
/// routes instead of written into handlers.
fn with_auth(
    auth_service: Arc<dyn AuthService>,
    require_verified: bool,
) -> impl Filter<Extract = (Company,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>(http::header::AUTHORIZATION.as_str()).and_then(
        move |header: Option<String>| {
            let auth_service = auth_service.clone();
            async move {
                let bearer = header
                    .as_deref()
                    .and_then(|h| h.strip_prefix("Bearer "));
                auth_service
                    .authenticate(bearer, require_verified)
                    .await
                    .map_err(reject_service)
            }
        },
    )
}
