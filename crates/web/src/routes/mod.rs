//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Contacts
//! GET  /                       - Contact list
//! GET  /add                    - Blank add form
//! POST /add                    - Create contact, redirect to /
//! GET  /edit/{id}              - Edit form (404 if unknown)
//! POST /edit/{id}              - Update contact, redirect to /
//! GET  /delete/{id}            - Delete contact, redirect to /
//! POST /delete/{id}            - Same as GET (used by the list page)
//! ```

pub mod contacts;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the contact CRUD routes.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::index))
        .route("/add", get(contacts::new_form).post(contacts::create))
        .route("/edit/{id}", get(contacts::edit_form).post(contacts::update))
        .route("/delete/{id}", get(contacts::delete).post(contacts::delete))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(contact_routes())
}
