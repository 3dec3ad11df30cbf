pub mod contacts;
pub mod posts;
pub mod projects;
pub mod users;

pub use contacts::ContactStore;
pub use posts::PostStore;
pub use projects::ProjectStore;
pub use users::UserStore;

use crate::database::StoreError;

/// Map an owner-filtered lookup result to NotFound.
///
/// Every entity accessor funnels through this helper, so an ownership
/// mismatch is always indistinguishable from a missing record: non-owners
/// learn nothing about which ids exist.
pub(crate) fn owned_or_not_found<T>(row: Option<T>, entity: &str) -> Result<T, StoreError> {
    row.ok_or_else(|| StoreError::NotFound(format!("{} not found", entity)))
}
