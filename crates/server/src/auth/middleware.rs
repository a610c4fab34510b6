use std::collections::HashMap;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};

use super::identity::CallerIdentity;

/// The principal behind a configured bearer token.
#[derive(Debug, Clone)]
pub struct TokenPrincipal {
    /// Display name of the account.
    pub name: String,
    /// Email address of the account.
    pub email: String,
}

/// Bearer token → principal table loaded from the server configuration.
pub type TokenTable = HashMap<String, TokenPrincipal>;

/// Tower layer that authenticates requests against the static token table.
///
/// With no table configured the layer injects an anonymous identity so the
/// guarded routes stay usable in standalone/dev mode.
#[derive(Clone)]
pub struct AuthLayer {
    tokens: Option<Arc<TokenTable>>,
}

impl AuthLayer {
    pub fn new(tokens: Option<Arc<TokenTable>>) -> Self {
        Self { tokens }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            tokens: self.tokens.clone(),
        }
    }
}

/// Tower service that authenticates requests.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    tokens: Option<Arc<TokenTable>>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let tokens = self.tokens.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(tokens) = tokens else {
                // Auth disabled: inject the anonymous identity.
                req.extensions_mut().insert(CallerIdentity::anonymous());
                return inner.call(req).await;
            };

            if let Some(auth_header) = req.headers().get("authorization")
                && let Ok(header_str) = auth_header.to_str()
                && let Some(token) = header_str.strip_prefix("Bearer ")
            {
                match tokens.get(token) {
                    Some(principal) => {
                        req.extensions_mut().insert(CallerIdentity::from_token(
                            principal.name.clone(),
                            principal.email.clone(),
                        ));
                        return inner.call(req).await;
                    }
                    None => return Ok(unauthorized("invalid token")),
                }
            }

            Ok(unauthorized("missing authentication credentials"))
        })
    }
}

fn unauthorized(message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}
