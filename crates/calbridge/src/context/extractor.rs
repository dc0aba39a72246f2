//! Axum extractor for RequestContext.

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use super::types::{RequestContext, RequestId};
use crate::config::Config;

/// Header set by the authenticating proxy in front of the service.
const REMOTE_USER_HEADER: &str = "x-remote-user";

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_user_id(headers: &HeaderMap, default_user: &str) -> String {
    headers
        .get(REMOTE_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_user)
        .to_string()
}

impl<S> FromRequestParts<S> for RequestContext
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<Config>::from_ref(state);

        Ok(RequestContext {
            user_id: extract_user_id(&parts.headers, &config.default_user),
            request_id: extract_request_id(&parts.headers),
        })
    }
}
