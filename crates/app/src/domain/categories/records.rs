//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
}
