//! HTTP timing middleware
//!
//! 记录每个请求的状态码和耗时。4xx 记 info，5xx 记 warn。

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Clone, Default)]
pub struct TimingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
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
        let start = Instant::now();

        Box::pin(async move {
            let result = srv.call(req).await;
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            match &result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_server_error() {
                        warn!(status = status.as_u16(), elapsed_ms, "request failed");
                    } else if status.is_client_error() {
                        info!(status = status.as_u16(), elapsed_ms, "request rejected");
                    } else {
                        debug!(status = status.as_u16(), elapsed_ms, "request completed");
                    }
                }
                Err(e) => warn!(elapsed_ms, "request errored: {}", e),
            }

            result
        })
    }
}
