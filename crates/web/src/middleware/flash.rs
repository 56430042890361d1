//! One-shot notices carried across a redirect in a signed cookie.
//!
//! A handler that redirects attaches the notice with [`FlashSigner::set`].
//! The next page view extracts it with [`Flash`], renders it, and returns
//! [`ClearFlash`] so the browser drops the cookie. Nothing is stored on the
//! server.
//!
//! The cookie goes through the `cookie` crate's signed jar, keyed from the
//! session secret. The notice text is base64url encoded so the value stays
//! within the cookie-octet range. Cookies with a bad signature or encoding
//! are treated as absent (and still cleared).

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponseParts, ResponseParts},
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use cookie::time::Duration;
use cookie::{Cookie, CookieJar, Key, SameSite};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use thiserror::Error;

use crate::state::AppState;

/// Flash cookie name.
pub const FLASH_COOKIE_NAME: &str = "cb_flash";

/// Errors that can occur while issuing a flash cookie.
#[derive(Debug, Error)]
pub enum FlashError {
    #[error("invalid cookie header: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),
}

/// Signs and verifies flash cookies with the configured session secret.
#[derive(Clone)]
pub struct FlashSigner {
    key: Key,
    secure: bool,
}

impl std::fmt::Debug for FlashSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashSigner")
            .field("key", &"[REDACTED]")
            .field("secure", &self.secure)
            .finish()
    }
}

impl FlashSigner {
    /// Create a signer. `secure` adds the `Secure` cookie attribute.
    ///
    /// The 64-byte signing key is the SHA-512 digest of `secret`.
    #[must_use]
    pub fn new(secret: &SecretString, secure: bool) -> Self {
        let digest = Sha512::digest(secret.expose_secret().as_bytes());
        Self {
            key: Key::from(digest.as_slice()),
            secure,
        }
    }

    /// Jar holding a freshly signed flash cookie for `message`.
    fn signed_jar(&self, message: &str) -> CookieJar {
        let cookie = Cookie::build((FLASH_COOKIE_NAME, URL_SAFE_NO_PAD.encode(message)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);

        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);
        jar
    }

    /// Verify a received flash cookie and return the message it carries.
    #[must_use]
    pub fn verify(&self, cookie: Cookie<'static>) -> Option<String> {
        let mut jar = CookieJar::new();
        jar.add_original(cookie);

        let verified = jar.signed(&self.key).get(FLASH_COOKIE_NAME)?;
        let bytes = URL_SAFE_NO_PAD.decode(verified.value()).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Build the response part that attaches `message` to the next page view.
    ///
    /// # Errors
    ///
    /// Returns `FlashError::InvalidHeader` if the cookie cannot be written
    /// as a header value.
    pub fn set(&self, message: &str) -> Result<SetFlash, FlashError> {
        let headers = self
            .signed_jar(message)
            .delta()
            .map(|cookie| HeaderValue::from_str(&cookie.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SetFlash(headers))
    }
}

/// Response part that sets the flash cookie.
#[derive(Debug)]
pub struct SetFlash(Vec<HeaderValue>);

impl IntoResponseParts for SetFlash {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for value in self.0 {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}

/// Response part that removes the flash cookie once it has been rendered.
#[derive(Debug, Clone, Copy)]
pub struct ClearFlash {
    present: bool,
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
}

impl IntoResponseParts for ClearFlash {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.present {
            return Ok(res);
        }
        if let Ok(value) = HeaderValue::from_str(&removal_cookie().to_string()) {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}

/// Extractor for the pending flash notice, if any.
///
/// # Example
///
/// ```rust,ignore
/// async fn page(flash: Flash) -> impl IntoResponse {
///     let (notice, clear) = flash.consume();
///     (clear, PageTemplate { notice })
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Flash {
    message: Option<String>,
    present: bool,
}

impl Flash {
    /// Take the notice and the response part that clears it.
    #[must_use]
    pub fn consume(self) -> (Option<String>, ClearFlash) {
        (
            self.message,
            ClearFlash {
                present: self.present,
            },
        )
    }

    fn from_parts(parts: &Parts, signer: &FlashSigner) -> Self {
        find_flash_cookie(parts).map_or_else(Self::default, |cookie| Self {
            message: signer.verify(cookie),
            present: true,
        })
    }
}

impl FromRequestParts<AppState> for Flash {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, state.flash()))
    }
}

/// Find the flash cookie across all `Cookie` headers, with any surrounding
/// quotes removed from its value.
fn find_flash_cookie(parts: &Parts) -> Option<Cookie<'static>> {
    let mut cookie = parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == FLASH_COOKIE_NAME)?
        .into_owned();

    let unquoted = cookie.value_trimmed().to_owned();
    cookie.set_value(unquoted);
    Some(cookie)
}
