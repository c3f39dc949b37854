//! `PostgreSQL` profile store backed by Diesel.

use super::{
    models::{LegacyProfileRow, ProfileChangeset, ProfileRow},
    schema::profiles,
};
use crate::board::domain::UserId;
use crate::profile::{
    domain::{PersistedProfileData, Profile, UserColor},
    ports::{
        ProfileCapabilities, ProfilePatch, ProfileStore, ProfileStoreError, ProfileStoreResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by profile adapters.
pub type ProfilePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed profile store.
///
/// Rows are provisioned by the auth provider's signup trigger; this store
/// only reads and updates them.
#[derive(Debug, Clone)]
pub struct PostgresProfileStore {
    pool: ProfilePgPool,
    capabilities: ProfileCapabilities,
}

#[derive(QueryableByName)]
struct ColumnPresence {
    #[diesel(sql_type = diesel::sql_types::Bool)]
    present: bool,
}

impl PostgresProfileStore {
    /// Creates a store assuming a fully migrated schema.
    #[must_use]
    pub const fn new(pool: ProfilePgPool) -> Self {
        Self {
            pool,
            capabilities: ProfileCapabilities::current(),
        }
    }

    /// Creates a store after probing the deployed schema for `user_color`.
    ///
    /// The probe runs once at construction and the result is cached in
    /// [`ProfileCapabilities`].
    ///
    /// # Errors
    ///
    /// Returns [`ProfileStoreError::Transient`] when the probe query fails.
    pub async fn detect(pool: ProfilePgPool) -> ProfileStoreResult<Self> {
        let probe_pool = pool.clone();
        let user_color = run_on_pool(probe_pool, |connection| {
            let row: ColumnPresence = diesel::sql_query(concat!(
                "SELECT EXISTS (SELECT 1 FROM information_schema.columns ",
                "WHERE table_name = 'profiles' AND column_name = 'user_color') AS present",
            ))
            .get_result(connection)
            .map_err(ProfileStoreError::transient)?;
            Ok(row.present)
        })
        .await?;

        Ok(Self {
            pool,
            capabilities: ProfileCapabilities { user_color },
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_on_pool(self.pool.clone(), f).await
    }
}

async fn run_on_pool<F, T>(pool: ProfilePgPool, f: F) -> ProfileStoreResult<T>
where
    F: FnOnce(&mut PgConnection) -> ProfileStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(ProfileStoreError::transient)?;
        f(&mut connection)
    })
    .await
    .map_err(ProfileStoreError::transient)?
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find(&self, id: UserId) -> ProfileStoreResult<Option<Profile>> {
        let capabilities = self.capabilities;
        self.run_blocking(move |connection| {
            let row = if capabilities.user_color {
                profiles::table
                    .filter(profiles::id.eq(id.into_inner()))
                    .select(ProfileRow::as_select())
                    .first::<ProfileRow>(connection)
                    .optional()
                    .map_err(ProfileStoreError::transient)?
            } else {
                profiles::table
                    .filter(profiles::id.eq(id.into_inner()))
                    .select((
                        profiles::id,
                        profiles::display_name,
                        profiles::avatar_url,
                        profiles::created_at,
                        profiles::updated_at,
                    ))
                    .first::<LegacyProfileRow>(connection)
                    .optional()
                    .map_err(ProfileStoreError::transient)?
                    .map(ProfileRow::from)
            };
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn list(&self) -> ProfileStoreResult<Vec<Profile>> {
        let capabilities = self.capabilities;
        self.run_blocking(move |connection| {
            let rows = if capabilities.user_color {
                profiles::table
                    .order((profiles::display_name.asc(), profiles::id.asc()))
                    .select(ProfileRow::as_select())
                    .load::<ProfileRow>(connection)
                    .map_err(ProfileStoreError::transient)?
            } else {
                profiles::table
                    .order((profiles::display_name.asc(), profiles::id.asc()))
                    .select((
                        profiles::id,
                        profiles::display_name,
                        profiles::avatar_url,
                        profiles::created_at,
                        profiles::updated_at,
                    ))
                    .load::<LegacyProfileRow>(connection)
                    .map_err(ProfileStoreError::transient)?
                    .into_iter()
                    .map(ProfileRow::from)
                    .collect()
            };
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }

    async fn update(&self, id: UserId, patch: ProfilePatch) -> ProfileStoreResult<()> {
        if patch.user_color.is_some() && !self.capabilities.user_color {
            return Err(ProfileStoreError::SchemaMismatch {
                column: "user_color",
            });
        }
        let changeset = to_changeset(patch);

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(profiles::table.filter(profiles::id.eq(id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(ProfileStoreError::transient)?;
            if affected == 0 {
                return Err(ProfileStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    fn capabilities(&self) -> ProfileCapabilities {
        self.capabilities
    }
}

fn to_changeset(patch: ProfilePatch) -> ProfileChangeset {
    ProfileChangeset {
        display_name: patch.display_name,
        avatar_url: patch.avatar_url,
        user_color: patch
            .user_color
            .map(|color| color.map(|chosen| chosen.as_str().to_owned())),
        updated_at: patch.updated_at,
    }
}

fn row_to_profile(row: ProfileRow) -> ProfileStoreResult<Profile> {
    let user_color = row
        .user_color
        .as_deref()
        .map(UserColor::try_from)
        .transpose()
        .map_err(ProfileStoreError::transient)?;

    Ok(Profile::from_persisted(PersistedProfileData {
        id: UserId::from_uuid(row.id),
        display_name: row.display_name,
        avatar_url: row.avatar_url,
        user_color,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
