//! Resource catalog service.
//!
//! Reading the catalog is open to any authenticated caller; writes are
//! admin only. Field validation runs after the role check, mirroring the
//! endpoint's check order (existing record, role, then payload), and
//! reports failures under the wire field name (`type`, not `kind`).

use crate::api::dto::{CreateResourceRequest, UpdateResourceRequest};
use crate::error::{AppError, AppResult, ValidationFieldError};
use crate::models::{Resource, User};
use crate::policy::{self, Action};
use crate::repositories::ResourceRepo;

/// Upper bound shared by the name and type columns.
const MAX_FIELD_CHARS: usize = 255;

/// Catalog rules. Cloning shares the repository's pool handle.
#[derive(Clone)]
pub struct ResourceService {
    repo: ResourceRepo,
}

impl ResourceService {
    pub fn new(repo: ResourceRepo) -> Self {
        Self { repo }
    }

    /// Lists all resources, any authenticated caller.
    pub async fn list_resources(&self) -> AppResult<Vec<Resource>> {
        self.repo.list().await
    }

    /// Fetches a resource or reports `NotFound` under the client-facing
    /// entity name.
    pub async fn get_resource(&self, id: i64) -> AppResult<Resource> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Resource", "id", id))
    }

    /// Creates a resource. Admin only; the role check precedes validation.
    pub async fn create_resource(
        &self,
        caller: &User,
        payload: CreateResourceRequest,
    ) -> AppResult<Resource> {
        policy::authorize(caller, Action::CreateResource)?;
        validate_create(&payload)?;
        self.repo.create(payload.into_record()).await
    }

    /// Partially updates a resource. The record must exist before the
    /// role check runs, then present fields are validated and applied.
    pub async fn update_resource(
        &self,
        caller: &User,
        id: i64,
        payload: UpdateResourceRequest,
    ) -> AppResult<Resource> {
        let resource = self.get_resource(id).await?;
        policy::authorize(caller, Action::UpdateResource)?;
        validate_update(&payload)?;

        let update_data = payload.into_changes();
        if update_data.is_empty() {
            return Ok(resource);
        }
        self.repo.update(id, update_data).await
    }

    /// Soft-deletes a resource. The record must exist before the role
    /// check runs.
    pub async fn delete_resource(&self, caller: &User, id: i64) -> AppResult<()> {
        self.get_resource(id).await?;
        policy::authorize(caller, Action::DeleteResource)?;
        let affected = self.repo.soft_delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("Resource", "id", id));
        }
        Ok(())
    }
}

fn validate_create(payload: &CreateResourceRequest) -> AppResult<()> {
    let mut failures = Vec::new();
    match payload.name.as_deref() {
        None => failures.push(ValidationFieldError::new(
            "name",
            "The name field is required.",
        )),
        Some(value) if value.chars().count() > MAX_FIELD_CHARS => {
            failures.push(ValidationFieldError::new(
                "name",
                "The name field must not be greater than 255 characters.",
            ))
        }
        Some(_) => {}
    }
    match payload.kind.as_deref() {
        None => failures.push(ValidationFieldError::new(
            "type",
            "The type field is required.",
        )),
        Some(value) if value.chars().count() > MAX_FIELD_CHARS => {
            failures.push(ValidationFieldError::new(
                "type",
                "The type field must not be greater than 255 characters.",
            ))
        }
        Some(_) => {}
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation_errors(failures))
    }
}

fn validate_update(payload: &UpdateResourceRequest) -> AppResult<()> {
    let mut failures = Vec::new();
    if let Some(value) = payload.name.as_deref() {
        if value.chars().count() > MAX_FIELD_CHARS {
            failures.push(ValidationFieldError::new(
                "name",
                "The name field must not be greater than 255 characters.",
            ));
        }
    }
    if let Some(value) = payload.kind.as_deref() {
        if value.chars().count() > MAX_FIELD_CHARS {
            failures.push(ValidationFieldError::new(
                "type",
                "The type field must not be greater than 255 characters.",
            ));
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation_errors(failures))
    }
}
