//! JSON seed fixture
//!
//! Users and groups are managed out of band. At startup the runtime loads
//! them from a fixture of the form:
//!
//! ```json
//! {
//!   "users": [{"username": "leo"}],
//!   "groups": [{"title": "Cats", "slug": "cats", "description": "..."}]
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::{NewGroup, StoreError, Username};
use crate::ports::outbound::EntityStore;

/// User entry of a fixture.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SeedUser {
    pub username: Username,
}

/// Seed fixture contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedFixture {
    pub users: Vec<SeedUser>,
    pub groups: Vec<NewGroup>,
}

/// Seed loading failures.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("store rejected fixture: {0}")]
    Store(#[from] StoreError),
}

/// Counts of inserted rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub groups: usize,
}

impl SeedFixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Insert every user and group of `fixture` into `store`.
///
/// Stops at the first rejected row; a duplicate username or slug fails with
/// `StoreError::Conflict`.
pub async fn load_fixture<S: EntityStore + ?Sized>(
    store: &S,
    fixture: SeedFixture,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for user in fixture.users {
        store.insert_user(user.username).await?;
        report.users += 1;
    }
    for group in fixture.groups {
        store.insert_group(group).await?;
        report.groups += 1;
    }

    info!(
        users = report.users,
        groups = report.groups,
        "[yt-01] Seed fixture loaded"
    );
    Ok(report)
}
