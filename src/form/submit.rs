//! Edit session: loads one property, owns its form state and drives the
//! submission lifecycle `Idle -> Validating -> Submitting -> Success | Failed`.

use super::{Collection, Field, FieldEdit, FormState};
use crate::error::{FormError, LoadError};
use crate::gateway::PropertyGateway;
use crate::models::PropertyDraft;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const FIX_ERRORS_BANNER: &str = "Please fix the errors in the form";

/// Where the submission lifecycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// Result of one submit trigger
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Saved; the view should navigate to `redirect`
    Saved { redirect: String },
    /// Validation failed, nothing was sent
    Rejected { errors: BTreeMap<Field, String> },
    /// The gateway refused the update; the message is shown verbatim
    Failed { message: String },
    /// Another submission is in flight
    AlreadySubmitting,
    /// The property was already saved in this session
    AlreadySaved,
    /// The session was closed before the gateway answered
    Discarded,
}

/// Everything a view needs to render the form
#[derive(Debug, Clone)]
pub struct SessionView {
    pub phase: SubmitPhase,
    pub banner: Option<String>,
    pub notice: Option<String>,
    pub draft: PropertyDraft,
    pub errors: BTreeMap<Field, String>,
}

#[derive(Debug)]
struct SessionState {
    form: FormState,
    phase: SubmitPhase,
    banner: Option<String>,
    closed: bool,
}

/// One edit of one property.
///
/// State sits behind a mutex that is never held across an await, so several
/// submit futures on the same session see each other's in-flight guard.
pub struct EditSession<G: PropertyGateway + ?Sized> {
    gateway: Arc<G>,
    redirect: String,
    state: Mutex<SessionState>,
}

impl<G: PropertyGateway + ?Sized> EditSession<G> {
    /// Load property `id` from the gateway and open a session on it
    pub async fn load(gateway: Arc<G>, id: &str, redirect: impl Into<String>) -> Result<Self, LoadError> {
        let draft = Self::fetch_draft(gateway.as_ref(), id).await?;
        Ok(Self::open(gateway, FormState::new(draft), redirect))
    }

    /// Like [`EditSession::load`] with a fixed current date
    pub async fn load_with_today(
        gateway: Arc<G>,
        id: &str,
        redirect: impl Into<String>,
        today: NaiveDate,
    ) -> Result<Self, LoadError> {
        let draft = Self::fetch_draft(gateway.as_ref(), id).await?;
        Ok(Self::open(gateway, FormState::with_today(draft, today), redirect))
    }

    async fn fetch_draft(gateway: &G, id: &str) -> Result<PropertyDraft, LoadError> {
        info!("Loading property {} from {}", id, gateway.source_name());
        let records = gateway.list().await.map_err(|err| {
            warn!("Failed to load properties: {}", err);
            LoadError::from(err)
        })?;

        records
            .iter()
            .find(|record| record.id == id)
            .map(PropertyDraft::from_record)
            .ok_or_else(|| {
                warn!("Property {} not among {} records", id, records.len());
                LoadError::NotFound(id.to_string())
            })
    }

    fn open(gateway: Arc<G>, form: FormState, redirect: impl Into<String>) -> Self {
        Self {
            gateway,
            redirect: redirect.into(),
            state: Mutex::new(SessionState {
                form,
                phase: SubmitPhase::Idle,
                banner: None,
                closed: false,
            }),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.state.lock().phase
    }

    pub fn banner(&self) -> Option<String> {
        self.state.lock().banner.clone()
    }

    pub fn snapshot(&self) -> SessionView {
        let state = self.state.lock();
        SessionView {
            phase: state.phase,
            banner: state.banner.clone(),
            notice: state.form.notice().map(String::from),
            draft: state.form.draft().clone(),
            errors: state.form.errors().clone(),
        }
    }

    /// Run `f` against the form state
    pub fn with_form<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        f(&mut self.state.lock().form)
    }

    pub fn apply(&self, edit: FieldEdit) {
        self.with_form(|form| form.apply(edit))
    }

    pub fn mark_touched(&self, field: Field) {
        self.with_form(|form| form.mark_touched(field))
    }

    pub fn toggle(&self, collection: Collection, item: &str) -> Result<bool, FormError> {
        self.with_form(|form| form.toggle(collection, item))
    }

    pub fn add_image(&self, url: &str) -> Result<(), FormError> {
        self.with_form(|form| form.add_image(url))
    }

    pub fn remove_image(&self, index: usize) -> Option<String> {
        self.with_form(|form| form.remove_image(index))
    }

    /// Tear the session down; a pending update's result is then ignored
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let (id, record) = {
            let mut state = self.state.lock();
            match state.phase {
                SubmitPhase::Submitting => {
                    debug!("Submit ignored, update already in flight");
                    return SubmitOutcome::AlreadySubmitting;
                }
                SubmitPhase::Success => return SubmitOutcome::AlreadySaved,
                _ => {}
            }
            if state.closed {
                return SubmitOutcome::Discarded;
            }

            state.phase = SubmitPhase::Validating;
            if !state.form.validate_all() {
                state.phase = SubmitPhase::Failed;
                state.banner = Some(FIX_ERRORS_BANNER.to_string());
                debug!("Submit blocked by {} field errors", state.form.errors().len());
                return SubmitOutcome::Rejected {
                    errors: state.form.errors().clone(),
                };
            }

            let id = state.form.draft().id().to_string();
            let record = match state.form.draft().to_record() {
                Ok(record) => record,
                Err(err) => {
                    state.phase = SubmitPhase::Failed;
                    let message = err.to_string();
                    state.banner = Some(message.clone());
                    return SubmitOutcome::Failed { message };
                }
            };

            state.phase = SubmitPhase::Submitting;
            state.banner = None;
            (id, record)
        };

        info!("Submitting property {} to {}", id, self.gateway.source_name());
        let result = self.gateway.update(&id, &record).await;

        let mut state = self.state.lock();
        if state.closed {
            debug!("Session closed before update of {} resolved", id);
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                state.phase = SubmitPhase::Success;
                info!("Property {} saved, redirecting to {}", id, self.redirect);
                SubmitOutcome::Saved {
                    redirect: self.redirect.clone(),
                }
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Update of property {} failed: {}", id, message);
                state.phase = SubmitPhase::Failed;
                state.banner = Some(message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }
}
