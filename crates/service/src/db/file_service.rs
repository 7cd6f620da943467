//! Placeholder file operations.
//!
//! Project files live in an external blob store referenced by
//! `project.blob_url`; this module only validates the parent project and the
//! presence of that reference. The actual blob I/O is an external
//! collaborator.

use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::guard;

/// The project must exist and carry a blob reference before any file
/// operation can be forwarded to the store.
pub async fn ensure_project_blob(
    db: &DatabaseConnection,
    project_id: i32,
) -> Result<String, ServiceError> {
    let project = guard::project_exists(db, project_id).await?;
    project
        .blob_url
        .ok_or_else(|| ServiceError::not_found("project blob"))
}
