//! Authenticated owner stored in the request depot.

use salvo::prelude::{Depot, StatusError};

use tally_app::domain::users::records::UserUuid;

const OWNER_UUID_DEPOT_KEY: &str = "owner_uuid";

/// Carries the owner resolved by the auth middleware to the handlers.
pub(crate) trait OwnerDepotExt {
    fn insert_owner_uuid(&mut self, owner: UserUuid);

    /// The authenticated owner, or 401 when the auth middleware did not run.
    fn owner_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl OwnerDepotExt for Depot {
    fn insert_owner_uuid(&mut self, owner: UserUuid) {
        self.insert(OWNER_UUID_DEPOT_KEY, owner);
    }

    fn owner_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(OWNER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn missing_owner_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.owner_uuid_or_401().err();

        assert_eq!(
            error.map(|error| error.code),
            Some(salvo::http::StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn inserted_owner_is_returned() -> TestResult {
        let owner = UserUuid::from_uuid(Uuid::now_v7());
        let mut depot = Depot::new();

        depot.insert_owner_uuid(owner);

        assert_eq!(depot.owner_uuid_or_401()?, owner);

        Ok(())
    }
}
