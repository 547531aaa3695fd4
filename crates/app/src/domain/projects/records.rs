//! Project Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Project UUID
pub type ProjectUuid = TypedUuid<ProjectRecord>;

/// Project Record
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub uuid: ProjectUuid,
    pub owner: UserUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
