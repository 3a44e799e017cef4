//! Bearer token and role middleware
//!
//! `BearerAuth` 校验 token 并把 [`AuthUser`] 放入 request extensions，
//! `RequireRole` 在其之后检查角色。scope 上的组合顺序：
//!
//! ```ignore
//! web::scope("/admin").wrap(RequireRole::admin()).wrap(BearerAuth)
//! ```
//!
//! 最后 wrap 的最先执行。

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::AUTHORIZATION},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{error, info, trace};

use crate::api::jwt::JwtService;
use crate::api::services::{ErrorCode, error_response};
use crate::errors::TrackerError;
use crate::storage::Role;

/// 已认证的调用者
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = TrackerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .copied()
                .ok_or_else(|| TrackerError::token_invalid("Token is missing!")),
        )
    }
}

/// 从 Authorization header 提取 token，`Bearer ` 前缀可省略
fn extract_token(req: &ServiceRequest) -> Option<String> {
    let raw = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn reject<B>(req: ServiceRequest, status: StatusCode, code: ErrorCode, message: &str) -> ServiceResponse<EitherBody<B>> {
    req.into_response(error_response(status, code, message).map_into_right_body())
}

/// Bearer token 认证中间件
///
/// `JwtService` 从 app data 读取（`web::Data<JwtService>`）。
#[derive(Clone, Default)]
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // CORS 预检直接放行
            if req.method() == Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let Some(jwt) = req.app_data::<web::Data<JwtService>>().cloned() else {
                error!("JwtService is not registered as app data");
                return Ok(reject(
                    req,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    "Authentication is not configured",
                ));
            };

            let Some(token) = extract_token(&req) else {
                info!("Rejected request without token: {}", req.path());
                return Ok(reject(
                    req,
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::TokenInvalid,
                    "Token is missing!",
                ));
            };

            let user = jwt.validate_token(&token).ok().and_then(|claims| {
                claims.subject_id().map(|id| AuthUser {
                    id,
                    role: claims.role,
                })
            });

            match user {
                Some(user) => {
                    trace!("Authenticated {} id={}", user.role, user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                None => {
                    info!("Rejected request with invalid token: {}", req.path());
                    Ok(reject(
                        req,
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::TokenInvalid,
                        "Token is invalid!",
                    ))
                }
            }
        })
    }
}

/// 角色检查中间件，必须放在 `BearerAuth` 内层
#[derive(Clone, Copy)]
pub struct RequireRole(pub Role);

impl RequireRole {
    pub fn admin() -> Self {
        Self(Role::Admin)
    }

    pub fn employee() -> Self {
        Self(Role::Employee)
    }

    fn denial_message(&self) -> &'static str {
        match self.0 {
            Role::Admin => "Admin access required!",
            Role::Employee => "Employee access only!",
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            role: *self,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    role: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.role;

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let user = req.extensions().get::<AuthUser>().copied();
            match user {
                Some(user) if user.role == required.0 => {
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Some(user) => {
                    info!(
                        "Denied {} id={} access to {}",
                        user.role,
                        user.id,
                        req.path()
                    );
                    Ok(reject(
                        req,
                        StatusCode::FORBIDDEN,
                        ErrorCode::Forbidden,
                        required.denial_message(),
                    ))
                }
                None => Ok(reject(
                    req,
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::TokenInvalid,
                    "Token is missing!",
                )),
            }
        })
    }
}
