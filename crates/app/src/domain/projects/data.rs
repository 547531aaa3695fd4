//! Project Data

use crate::domain::projects::records::ProjectUuid;

/// New Project Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub uuid: ProjectUuid,
    pub name: String,
}
