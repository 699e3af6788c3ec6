use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::application::domain::{SessionId, NO, YES};
use crate::workflows::application::form::ApplicationFormState;
use crate::workflows::application::presentation::PostingDetails;
use crate::workflows::application::repository::{
    RepositoryError, SessionRecord, SessionRepository,
};
use crate::workflows::application::{application_router, ApplicationFormService};

/// Scenario 2 applicant: every required field filled, everything else left at defaults.
pub(super) fn complete_state() -> ApplicationFormState {
    ApplicationFormState {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "555-1234".to_string(),
        four_day_office_expectation: YES.to_string(),
        work_auth_us: YES.to_string(),
        needs_sponsorship: NO.to_string(),
        ..ApplicationFormState::default()
    }
}

pub(super) fn posting() -> PostingDetails {
    PostingDetails {
        brand_name: "Northwind".to_string(),
        job_title: "Platform Engineer".to_string(),
        job_meta: "Denver, CO · Infrastructure & Tooling · On-site".to_string(),
        office_location: "Denver, CO".to_string(),
        footer_note: "Northwind careers".to_string(),
    }
}

pub(super) fn build_service() -> (
    ApplicationFormService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ApplicationFormService::new(repository.clone(), posting());
    (service, repository)
}

pub(super) fn router_with_service(
    service: ApplicationFormService<MemoryRepository>,
) -> axum::Router {
    application_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify<T, F>(&self, id: &SessionId, apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(apply(record))
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }

    fn modify<T, F>(&self, _id: &SessionId, _apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) const BOUNDARY: &str = "----job-application-test-boundary";

/// Text and file parts for a `multipart/form-data` body.
pub(super) enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        contents: &'a [u8],
    },
}

pub(super) fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                contents,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(contents);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
