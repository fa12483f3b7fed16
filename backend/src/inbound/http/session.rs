//! Session cookie helpers to keep HTTP handlers free of cookie plumbing.
//!
//! The session carrier is a plain `token` cookie holding the session UUID.
//! Resolution is delegated to the [`SessionAuthenticator`] port so the same
//! identity checks apply whatever store backs the sessions.
//!
//! [`SessionAuthenticator`]: crate::domain::ports::SessionAuthenticator

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionToken, UserId};
use crate::inbound::http::state::HttpState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

/// Already-expired cookie that makes clients drop the session.
pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .finish()
}

/// Raw session cookie value, if any.
pub fn session_token_value(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
}

fn state_of(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

/// Authenticated caller resolved from the session cookie.
///
/// Extraction fails with `unauthenticated` when the cookie is missing and
/// with `invalid_session` when it does not name a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn id(self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = state_of(req);
        let token = session_token_value(req);
        Box::pin(async move {
            let state = state?;
            state
                .authenticator
                .authenticate(token.as_deref())
                .await
                .map(Self)
        })
    }
}
