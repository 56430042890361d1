//! Contact CRUD route handlers.
//!
//! Each handler validates first, then runs exactly one statement through
//! [`ContactRepository`]. Writes answer with a redirect that carries a
//! one-shot notice; reads render a template and clear any pending notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use contactbook_core::{Contact, ContactDraft, ContactError, ContactId};

use crate::db::ContactRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::Flash;
use crate::state::AppState;

/// Notice shown when a submitted form is missing a field.
pub const NOTICE_REQUIRED: &str = "Name and phone are required!";
/// Notice shown after a contact is created.
pub const NOTICE_ADDED: &str = "Contact added successfully!";
/// Notice shown after a contact is updated.
pub const NOTICE_UPDATED: &str = "Contact updated successfully!";
/// Notice shown after a contact is deleted.
pub const NOTICE_DELETED: &str = "Contact deleted successfully!";

/// Submitted add/edit form. Absent fields read as empty.
#[derive(Debug, Default)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
}

impl ContactForm {
    fn into_draft(self) -> std::result::Result<ContactDraft, ContactError> {
        ContactDraft::new(self.name, self.phone)
    }
}

/// Collects the decoded form pairs. When a field is repeated, the first
/// value is used and the rest are ignored.
impl From<Vec<(String, String)>> for ContactForm {
    fn from(fields: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        let (mut seen_name, mut seen_phone) = (false, false);
        for (key, value) in fields {
            match key.as_str() {
                "name" if !seen_name => {
                    form.name = value;
                    seen_name = true;
                }
                "phone" if !seen_phone => {
                    form.phone = value;
                    seen_phone = true;
                }
                _ => {}
            }
        }
        form
    }
}

/// Contact ID taken from the `{id}` path segment.
///
/// Anything other than a positive integer is answered with 404, the same as
/// an ID that matches no route.
#[derive(Debug, Clone, Copy)]
pub struct ContactIdPath(pub ContactId);

impl<S> FromRequestParts<S> for ContactIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;

        raw.parse::<ContactId>()
            .map(Self)
            .map_err(|e| AppError::NotFound(e.to_string()))
    }
}

/// Contact list page template.
#[derive(Template, WebTemplate)]
#[template(path = "contacts/index.html")]
pub struct ContactsIndexTemplate {
    pub notice: Option<String>,
    pub contacts: Vec<Contact>,
}

/// Add contact form template.
#[derive(Template, WebTemplate)]
#[template(path = "contacts/add.html")]
pub struct ContactAddTemplate {
    pub notice: Option<String>,
}

/// Edit contact form template.
#[derive(Template, WebTemplate)]
#[template(path = "contacts/edit.html")]
pub struct ContactEditTemplate {
    pub notice: Option<String>,
    pub contact: Contact,
}

/// Redirect to `to`, attaching `notice` for the next page view.
fn redirect_with_notice(state: &AppState, to: &str, notice: &str) -> Result<Response> {
    Ok((state.flash().set(notice)?, Redirect::to(to)).into_response())
}

/// GET / - list all contacts.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, flash: Flash) -> Result<impl IntoResponse> {
    let contacts = ContactRepository::new(state.pool()).list_all().await?;
    let (notice, clear) = flash.consume();

    Ok((clear, ContactsIndexTemplate { notice, contacts }))
}

/// GET /add - blank create form.
#[instrument(skip_all)]
pub async fn new_form(flash: Flash) -> impl IntoResponse {
    let (notice, clear) = flash.consume();
    (clear, ContactAddTemplate { notice })
}

/// POST /add - create a contact.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let draft = match ContactForm::from(fields).into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(reason = %e, "Rejected contact submission");
            return redirect_with_notice(&state, "/add", NOTICE_REQUIRED);
        }
    };

    let contact = ContactRepository::new(state.pool()).create(&draft).await?;
    tracing::info!(contact_id = %contact.id, "Contact added");

    redirect_with_notice(&state, "/", NOTICE_ADDED)
}

/// GET /edit/{id} - form pre-filled with the contact, or 404.
#[instrument(skip(state, flash))]
pub async fn edit_form(
    State(state): State<AppState>,
    ContactIdPath(id): ContactIdPath,
    flash: Flash,
) -> Result<impl IntoResponse> {
    let contact = ContactRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contact {id}")))?;
    let (notice, clear) = flash.consume();

    Ok((clear, ContactEditTemplate { notice, contact }))
}

/// POST /edit/{id} - update a contact.
///
/// An unknown ID updates nothing and still reports success.
#[instrument(skip(state, fields))]
pub async fn update(
    State(state): State<AppState>,
    ContactIdPath(id): ContactIdPath,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let draft = match ContactForm::from(fields).into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(reason = %e, "Rejected contact submission");
            return redirect_with_notice(&state, &format!("/edit/{id}"), NOTICE_REQUIRED);
        }
    };

    if ContactRepository::new(state.pool()).update(id, &draft).await? {
        tracing::info!(contact_id = %id, "Contact updated");
    } else {
        tracing::debug!(contact_id = %id, "Update matched no contact");
    }

    redirect_with_notice(&state, "/", NOTICE_UPDATED)
}

/// GET or POST /delete/{id} - delete a contact.
///
/// Deleting an unknown ID is a no-op that still reports success.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ContactIdPath(id): ContactIdPath,
) -> Result<Response> {
    if ContactRepository::new(state.pool()).delete(id).await? {
        tracing::info!(contact_id = %id, "Contact deleted");
    } else {
        tracing::debug!(contact_id = %id, "Delete matched no contact");
    }

    redirect_with_notice(&state, "/", NOTICE_DELETED)
}
