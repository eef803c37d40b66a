//! Unit tests for the events capability.

mod bus_tests;
mod domain_tests;

use crate::events::domain::{DomainEvent, ProjectCreated, UserCreated};

pub(super) fn user_created(user_id: &str) -> DomainEvent {
    DomainEvent::UserCreated(UserCreated {
        user_id: user_id.to_owned(),
        email: format!("{user_id}@example.com"),
    })
}

pub(super) fn project_created(project_id: &str) -> DomainEvent {
    DomainEvent::ProjectCreated(ProjectCreated {
        project_id: project_id.to_owned(),
        owner_id: "u-1".to_owned(),
        name: "Switchyard".to_owned(),
    })
}
