//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, only when a DSN is configured)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, no-store, etc.)
//!
//! The flash cookie is not a layer: handlers read it with the [`Flash`]
//! extractor and set it with [`FlashSigner::set`].

pub mod flash;
pub mod request_id;
pub mod security_headers;

pub use flash::{ClearFlash, Flash, FlashSigner, SetFlash};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
