use std::convert::Infallible;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

/// Name of the cookie that carries a visitor's identity.
pub const VISITOR_COOKIE: &str = "visitor_id";

const MAX_VISITOR_ID_LEN: usize = 64;

/// Anonymous voter identity taken from the `visitor_id` cookie.
///
/// Visitors without a usable cookie get a fresh UUID; `issued` tells the
/// handler to hand it back with [`VisitorId::cookie`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorId {
    id: String,
    issued: bool,
}

impl VisitorId {
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// True when this identity was minted for the current request.
    pub fn is_new(&self) -> bool {
        self.issued
    }

    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build(VISITOR_COOKIE, self.id.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .permanent()
            .finish()
    }

    fn fresh() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            issued: true,
        }
    }
}

fn usable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_VISITOR_ID_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromRequest for VisitorId {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let visitor = match req.cookie(VISITOR_COOKIE) {
            Some(cookie) if usable(cookie.value()) => VisitorId {
                id: cookie.value().to_string(),
                issued: false,
            },
            _ => VisitorId::fresh(),
        };
        ready(Ok(visitor))
    }
}
