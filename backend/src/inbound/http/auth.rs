//! Bearer-token extraction for HTTP handlers.
//!
//! The extractor resolves the `Authorization` header against the configured
//! [`TokenService`](crate::domain::TokenService). A missing header yields an
//! anonymous context; a present but unverifiable credential fails the
//! request outright, even on endpoints where authentication is optional.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::{Ready, ready};

use crate::domain::token::{Claims, TokenError};
use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// The caller's verified claims, if a bearer token accompanied the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    claims: Option<Claims>,
}

impl AuthContext {
    /// The verified claims, if any.
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Require an authenticated caller or fail with `401 Unauthorized`.
    pub fn require(&self) -> Result<&Claims, Error> {
        self.claims
            .as_ref()
            .ok_or_else(|| Error::unauthorized("authentication required"))
    }

    /// Consume the context, yielding the claims if present.
    pub fn into_claims(self) -> Option<Claims> {
        self.claims
    }
}

fn extract(req: &HttpRequest) -> Result<AuthContext, Error> {
    let Some(raw) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(AuthContext { claims: None });
    };
    let value = raw
        .to_str()
        .map_err(|_| Error::unauthorized("invalid authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("expected a bearer token"))?;

    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("authentication state is not configured"))?;
    let claims = state.tokens.verify(token).map_err(|error| match error {
        TokenError::Expired => Error::unauthorized("token expired"),
        _ => Error::unauthorized("invalid token"),
    })?;
    Ok(AuthContext {
        claims: Some(claims),
    })
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

/// The caller's network origin, used as the rate-limit key.
pub fn client_origin(req: &HttpRequest) -> String {
    req.peer_addr()
        .map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}
