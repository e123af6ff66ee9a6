//! Contact form state and submission.
//!
//! `ContactForm` is the plain state (fields + status) with validation.
//! `ContactController` drives a submission through a `ContactSender` and owns
//! the timer that returns a finished status to idle.

use crate::error::PortfolioError;
use crate::models::{ContactField, ContactFormView, ContactSubmission, FormStatus, StatusKind};
use crate::services::store::RestStore;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const MSG_SENDING: &str = "Sending your message...";
pub const MSG_SENT: &str =
    "Thank you! Your message has been sent successfully. I'll get back to you soon.";
pub const MSG_SEND_FAILED: &str =
    "Oops! Something went wrong. Please try again or contact me directly.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    Blank(ContactField),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

impl ValidationError {
    pub fn field(&self) -> ContactField {
        match self {
            ValidationError::Blank(field) => *field,
            ValidationError::InvalidEmail => ContactField::Email,
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// ─── Form state ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: FormStatus) {
        self.status = status;
    }

    pub fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Presence first (in field order), then email shape. The email is checked
    /// as typed; only the blank test trims.
    pub fn validate(&self) -> Result<ContactSubmission, ValidationError> {
        for (field, value) in [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Message, &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Blank(field));
            }
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(ContactSubmission {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }

    pub fn view(&self) -> ContactFormView {
        ContactFormView {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            status: self.status.clone(),
        }
    }
}

// ─── Senders ───────────────────────────────────────────────────────────────

#[async_trait]
pub trait ContactSender: Send + Sync {
    async fn send(&self, submission: &ContactSubmission) -> Result<(), PortfolioError>;
}

/// Waits a fixed delay and reports success. Nothing is delivered.
pub struct SimulatedSender {
    delay: Duration,
    recipient_name: String,
}

impl SimulatedSender {
    pub fn new(delay: Duration, recipient_name: impl Into<String>) -> Self {
        Self {
            delay,
            recipient_name: recipient_name.into(),
        }
    }
}

#[async_trait]
impl ContactSender for SimulatedSender {
    async fn send(&self, submission: &ContactSubmission) -> Result<(), PortfolioError> {
        tokio::time::sleep(self.delay).await;
        log::info!(
            "Simulated delivery of message {} from {} to {}",
            submission.id,
            submission.email,
            self.recipient_name
        );
        Ok(())
    }
}

/// Stores the message in the remote `messages` table.
pub struct StoreMessageSender {
    store: Arc<RestStore>,
}

impl StoreMessageSender {
    pub fn new(store: Arc<RestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContactSender for StoreMessageSender {
    async fn send(&self, submission: &ContactSubmission) -> Result<(), PortfolioError> {
        self.store.insert_message(submission).await
    }
}

// ─── Controller ────────────────────────────────────────────────────────────

/// Called on every status change while the form lock is held; must not call
/// back into the controller.
pub type StatusListener = Arc<dyn Fn(&FormStatus) + Send + Sync>;

struct ResetTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Shared {
    form: Mutex<ContactForm>,
    listener: Option<StatusListener>,
    /// Bumped on every status change; a timer only resets its own generation.
    generation: Mutex<u64>,
    /// Set once the view is gone. Nothing changes status after that.
    torn_down: AtomicBool,
}

impl Shared {
    fn set_status(&self, form: &mut ContactForm, status: FormStatus) -> u64 {
        form.set_status(status.clone());
        let mut generation = self.generation.lock();
        *generation += 1;
        if let Some(listener) = &self.listener {
            listener(&status);
        }
        *generation
    }
}

pub struct ContactController {
    shared: Arc<Shared>,
    sender: Arc<dyn ContactSender>,
    reset_after: Duration,
    timer: Mutex<Option<ResetTimer>>,
}

impl ContactController {
    pub fn new(sender: Arc<dyn ContactSender>, reset_after: Duration) -> Self {
        Self::with_listener(sender, reset_after, None)
    }

    pub fn with_listener(
        sender: Arc<dyn ContactSender>,
        reset_after: Duration,
        listener: Option<StatusListener>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                form: Mutex::new(ContactForm::new()),
                listener,
                generation: Mutex::new(0),
                torn_down: AtomicBool::new(false),
            }),
            sender,
            reset_after,
            timer: Mutex::new(None),
        }
    }

    pub fn view(&self) -> ContactFormView {
        self.shared.form.lock().view()
    }

    pub fn status(&self) -> FormStatus {
        self.shared.form.lock().status().clone()
    }

    pub fn set_field(&self, field: ContactField, value: impl Into<String>) -> ContactFormView {
        let mut form = self.shared.form.lock();
        form.set_field(field, value);
        form.view()
    }

    /// Validate, send, and settle on success or error. Returns the settled
    /// status. A submit while a send is in flight is ignored, as is any
    /// submit after `teardown`.
    pub async fn submit(&self) -> FormStatus {
        let submission = {
            let mut form = self.shared.form.lock();
            if self.shared.torn_down.load(Ordering::SeqCst) {
                log::debug!("Contact submit ignored: view torn down");
                return form.status().clone();
            }
            if form.status().kind == StatusKind::Loading {
                log::debug!("Contact submit ignored: already sending");
                return form.status().clone();
            }
            let validated = form.validate();
            let submission = match validated {
                Ok(submission) => {
                    self.shared.set_status(&mut form, FormStatus::loading(MSG_SENDING));
                    submission
                }
                Err(e) => {
                    log::debug!("Contact form rejected: {} ({})", e, e.field());
                    let status = FormStatus::error(e.to_string(), Some(e.field()));
                    let generation = self.shared.set_status(&mut form, status.clone());
                    self.schedule_reset(generation);
                    return status;
                }
            };
            // The previous message's reset must not fire over this one.
            self.cancel_reset();
            submission
        };

        log::info!("Sending contact message {}", submission.id);
        let result = self.sender.send(&submission).await;

        let mut form = self.shared.form.lock();
        if self.shared.torn_down.load(Ordering::SeqCst) {
            log::debug!("Contact message {} settled after teardown; status left as is", submission.id);
            return form.status().clone();
        }
        let status = match result {
            Ok(()) => {
                form.clear_fields();
                FormStatus::success(MSG_SENT)
            }
            Err(e) => {
                log::error!("Failed to send contact message {}: {}", submission.id, e);
                FormStatus::error(MSG_SEND_FAILED, None)
            }
        };
        let generation = self.shared.set_status(&mut form, status.clone());
        self.schedule_reset(generation);
        status
    }

    /// Callers hold the form lock, so timers are installed in generation order.
    fn schedule_reset(&self, generation: u64) {
        let mut timer = self.timer.lock();
        if self.shared.torn_down.load(Ordering::SeqCst) {
            return;
        }
        let shared = self.shared.clone();
        let delay = self.reset_after;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut form = shared.form.lock();
            if shared.torn_down.load(Ordering::SeqCst) || *shared.generation.lock() != generation {
                return;
            }
            shared.set_status(&mut form, FormStatus::idle());
        });
        if let Some(previous) = timer.replace(ResetTimer { generation, handle }) {
            previous.handle.abort();
        }
    }

    fn cancel_reset(&self) {
        if let Some(timer) = self.timer.lock().take() {
            log::debug!("Cancelled status reset for generation {}", timer.generation);
            timer.handle.abort();
        }
    }

    /// The view is going away: cancel any pending reset and stop a send still
    /// in flight from settling into this form.
    pub fn teardown(&self) {
        let mut timer = self.timer.lock();
        self.shared.torn_down.store(true, Ordering::SeqCst);
        if let Some(pending) = timer.take() {
            log::debug!("Cancelled status reset for generation {}", pending.generation);
            pending.handle.abort();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.torn_down.load(Ordering::SeqCst)
    }
}

impl Drop for ContactController {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, email: &str, message: &str) -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(ContactField::Name, name);
        form.set_field(ContactField::Email, email);
        form.set_field(ContactField::Message, message);
        form
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = filled("", "a@b.com", "hi").validate().unwrap_err();
        assert_eq!(err, ValidationError::Blank(ContactField::Name));
        assert_eq!(err.to_string(), "Please fill in all fields.");
    }

    #[test]
    fn whitespace_only_fields_count_as_blank() {
        let err = filled("Jo", "a@b.com", "   \n").validate().unwrap_err();
        assert_eq!(err, ValidationError::Blank(ContactField::Message));
    }

    #[test]
    fn malformed_email_is_rejected_on_email_field() {
        let err = filled("Jo", "not-an-email", "hi").validate().unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(err.field(), ContactField::Email);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("jo@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("jo@example"));
        assert!(!is_valid_email("jo@@example.com"));
        assert!(!is_valid_email("jo smith@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(" jo@example.com"));
    }

    #[test]
    fn valid_form_yields_trimmed_submission() {
        let submission = filled(" Jo ", "jo@example.com", " hello ").validate().unwrap();
        assert_eq!(submission.name, "Jo");
        assert_eq!(submission.email, "jo@example.com");
        assert_eq!(submission.message, "hello");
    }

    #[test]
    fn new_form_is_idle_and_empty() {
        let view = ContactForm::new().view();
        assert_eq!(view.status, FormStatus::idle());
        assert!(view.name.is_empty() && view.email.is_empty() && view.message.is_empty());
    }
}
