//! Request ID middleware - tags every request with a correlation id.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is echoed back unchanged.
const MAX_INCOMING_LEN: usize = 128;

/// Reuses an incoming `X-Request-ID` or generates one, records it on the
/// request span and echoes it on the response.
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

fn incoming_id(req: &ServiceRequest) -> Option<HeaderValue> {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty() && v.len() <= MAX_INCOMING_LEN && v.to_str().is_ok())
        .cloned()
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = incoming_id(&req).unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        });

        let span = tracing::info_span!(
            "request_id",
            request_id = request_id.to_str().unwrap_or("unknown"),
        );
        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), request_id);
                Ok(res)
            }
            .instrument(span),
        )
    }
}
