//! Club events: creation, public registration, and closing
//!
//! Registration is a public-page path like join submission: guests count,
//! but the frozen switch and the registrations gate still apply.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::{Action, ActionContext, DenyReason, authorize, authorize_public};
use crate::domain::DomainId;
use crate::error::WorkflowError;
use crate::flags::FlagStore;
use crate::session::Identity;
use crate::store::ClubStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Workshop,
    Hackathon,
    Bootcamp,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Workshop => f.write_str("workshop"),
            EventKind::Hackathon => f.write_str("hackathon"),
            EventKind::Bootcamp => f.write_str("bootcamp"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Past,
}

/// A scheduled club event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    /// Free-form start time, e.g. "14:00"
    pub time: String,
    pub location: String,
    pub description: String,
    /// Hosting domain, `None` for club-wide events
    pub domain: Option<DomainId>,
    /// Seats taken so far
    pub registered: u32,
    pub capacity: u32,
    pub status: EventStatus,
    pub speaker: Option<String>,
}

/// Input for creating an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub description: String,
    pub domain: Option<DomainId>,
    pub capacity: u32,
    pub speaker: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, kind: EventKind, date: NaiveDate, capacity: u32) -> Self {
        Self {
            title: title.into(),
            kind,
            date,
            time: String::new(),
            location: String::new(),
            description: String::new(),
            domain: None,
            capacity,
            speaker: None,
        }
    }

    pub fn at(mut self, time: impl Into<String>, location: impl Into<String>) -> Self {
        self.time = time.into();
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn in_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }
}

pub struct EventWorkflow {
    store: Arc<ClubStore>,
    flags: Arc<FlagStore>,
}

impl EventWorkflow {
    pub fn new(store: Arc<ClubStore>, flags: Arc<FlagStore>) -> Self {
        Self { store, flags }
    }

    /// Schedule an event
    pub fn create(&self, actor: &Identity, new: NewEvent) -> Result<Event, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::CreateEvent, &ActionContext::global(), &flags).require()?;
        if let Some(domain) = &new.domain {
            self.store.require_domain(domain)?;
        }

        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            kind: new.kind,
            date: new.date,
            time: new.time,
            location: new.location,
            description: new.description,
            domain: new.domain,
            registered: 0,
            capacity: new.capacity,
            status: EventStatus::Upcoming,
            speaker: new.speaker,
        };
        let event = self.store.insert_event(event);
        tracing::info!(event = %event.id, kind = %event.kind, "event created");
        Ok(event)
    }

    /// Take a seat. `actor` is `None` for guests on the public page.
    pub fn register(
        &self,
        actor: Option<&Identity>,
        event_id: &str,
    ) -> Result<Event, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize_public(actor, Action::RegisterForEvent, &ActionContext::global(), &flags)
            .require()?;

        let event = self.store.update_event(event_id, |event| {
            if event.status != EventStatus::Upcoming {
                return Err(DenyReason::InvalidTransition.into());
            }
            if event.registered >= event.capacity {
                return Err(WorkflowError::EventFull(event.id.clone()));
            }
            event.registered += 1;
            Ok(event.clone())
        })?;

        tracing::info!(event = %event.id, registered = event.registered, "registration taken");
        Ok(event)
    }

    /// Upcoming → Past
    pub fn close(&self, actor: &Identity, event_id: &str) -> Result<Event, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::CreateEvent, &ActionContext::global(), &flags).require()?;

        let event = self.store.update_event(event_id, |event| {
            if event.status != EventStatus::Upcoming {
                return Err(DenyReason::InvalidTransition.into());
            }
            event.status = EventStatus::Past;
            Ok(event.clone())
        })?;

        tracing::info!(event = %event.id, "event closed");
        Ok(event)
    }
}
