use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use uuid::Uuid;

use super::households_model::{
    generate_invite_code, normalize_invite_code, Household, Profile, ProfileRole,
};
use super::households_traits::HouseholdRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result};
use crate::schema::{households, profiles};

pub struct HouseholdRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HouseholdRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        HouseholdRepository { pool, writer }
    }

    fn attach_profile(
        conn: &mut SqliteConnection,
        profile_id: &str,
        household_id: &str,
        role: ProfileRole,
    ) -> Result<()> {
        let updated = diesel::update(profiles::table.find(profile_id))
            .set((
                profiles::household_id.eq(household_id),
                profiles::role.eq(role.as_str()),
            ))
            .execute(conn)?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Profile '{}' not found", profile_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl HouseholdRepositoryTrait for HouseholdRepository {
    fn get_household(&self, id: &str) -> Result<Household> {
        let mut conn = get_connection(&self.pool)?;
        households::table
            .find(id)
            .first::<Household>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Household '{}' not found", id)))
    }

    fn get_members(&self, household_id: &str) -> Result<Vec<Profile>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(profiles::table
            .filter(profiles::household_id.eq(household_id))
            .order(profiles::display_name.asc())
            .load::<Profile>(&mut conn)?)
    }

    async fn create_household(&self, name: String, profile_id: String) -> Result<Household> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Household> {
                conn.transaction::<Household, Error, _>(|conn| {
                    let household = Household {
                        id: Uuid::new_v4().to_string(),
                        name,
                        invite_code: generate_invite_code(),
                        created_at: Utc::now().to_rfc3339(),
                    };

                    let inserted = diesel::insert_into(households::table)
                        .values(&household)
                        .execute(conn);

                    // One retry with a fresh code covers the unlikely collision.
                    let household = match inserted {
                        Ok(_) => household,
                        Err(DieselError::DatabaseError(
                            DatabaseErrorKind::UniqueViolation,
                            _,
                        )) => {
                            let retry = Household {
                                invite_code: generate_invite_code(),
                                ..household
                            };
                            diesel::insert_into(households::table)
                                .values(&retry)
                                .execute(conn)?;
                            retry
                        }
                        Err(e) => return Err(e.into()),
                    };

                    Self::attach_profile(conn, &profile_id, &household.id, ProfileRole::Admin)?;

                    Ok(household)
                })
            })
            .await
    }

    async fn join_with_code(&self, code: String, profile_id: String) -> Result<Household> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Household> {
                let normalized = normalize_invite_code(&code);

                let household = households::table
                    .filter(households::invite_code.eq(&normalized))
                    .first::<Household>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        Error::NotFound(format!("No household with invite code '{}'", normalized))
                    })?;

                Self::attach_profile(conn, &profile_id, &household.id, ProfileRole::Member)?;

                Ok(household)
            })
            .await
    }
}
