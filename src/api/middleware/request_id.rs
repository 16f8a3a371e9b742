//! Request ID middleware
//!
//! 每个请求一个 request_id：优先沿用上游传入的 X-Request-ID，否则生成 UUID v4。
//! request_id 注入 tracing span，并写回响应头。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{Instrument, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upstream ids longer than this are replaced.
const MAX_INBOUND_ID_LEN: usize = 64;

/// 请求 ID，可从 request extensions 中提取
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

fn inbound_request_id(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let trimmed = value.trim();
    (trimmed.len() <= MAX_INBOUND_ID_LEN && crate::utils::is_url_safe(trimmed))
        .then(|| trimmed.to_string())
}

#[derive(Clone, Default)]
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestIdService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        let request_id = inbound_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(RequestId(request_id.clone()));

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );

        Box::pin(
            async move {
                let mut response = srv.call(req).await?;

                if let Ok(header_value) = HeaderValue::from_str(&request_id) {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}
