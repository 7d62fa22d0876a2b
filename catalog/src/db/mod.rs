// Konnect
// Copyright 2024 The Konnect Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction to manipulate services and their versions.

use crate::model::{
    PageRequest, SearchTerms, Service, ServiceFields, ServiceId, Version, VersionFields, VersionId,
    VersionStatus,
};
#[cfg(feature = "postgres")]
use konnect_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use konnect_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use konnect_core::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use time::OffsetDateTime;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Converts a row count as returned by the database into our unsigned representation.
fn count_from_db(count: i64) -> DbResult<u64> {
    u64::try_from(count)
        .map_err(|_| DbError::DataIntegrityError(format!("Invalid negative count {}", count)))
}

/// Converts the number of versions of a service as stored in the database.
fn versions_count_from_db(count: i64) -> DbResult<u32> {
    u32::try_from(count)
        .map_err(|_| DbError::DataIntegrityError(format!("Invalid versions_count {}", count)))
}

/// Computes the `LIMIT` and `OFFSET` values to fetch `page`.
fn limit_and_offset(page: &PageRequest) -> DbResult<(i64, i64)> {
    let limit = i64::try_from(page.limit())
        .map_err(|e| DbError::BackendError(format!("Page size out of range: {}", e)))?;
    let offset = i64::try_from(page.offset())
        .map_err(|e| DbError::BackendError(format!("Page out of range: {}", e)))?;
    Ok((limit, offset))
}

/// Text search document for a service in PostgreSQL.  Must match the index in the schema.
#[cfg(feature = "postgres")]
const PG_SERVICE_DOCUMENT: &str = "to_tsvector('simple', name || ' ' || COALESCE(description, ''))";

/// Lowercases `text` the same way `SearchTerms` lowercases query terms so that the SQLite search
/// columns can be compared byte by byte.
#[cfg(any(feature = "sqlite", test))]
fn fold_for_search(text: &str) -> String {
    text.to_lowercase()
}

/// Builds the SQLite expression that scores how well a service matches `nterms` search terms.
///
/// Every term needs two bound `LIKE` patterns: one for the name and one for the description.
#[cfg(any(feature = "sqlite", test))]
fn sqlite_search_score(nterms: usize) -> String {
    let mut parts = Vec::with_capacity(nterms * 2);
    for _ in 0..nterms {
        parts.push("(CASE WHEN name_folded LIKE ? THEN 2 ELSE 0 END)");
        parts.push("(CASE WHEN description_folded LIKE ? THEN 1 ELSE 0 END)");
    }
    parts.join(" + ")
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Service {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let slug: String = row.try_get("slug").map_err(postgres::map_sqlx_error)?;
        let description: Option<String> =
            row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;
        let updated_at: OffsetDateTime =
            row.try_get("updated_at").map_err(postgres::map_sqlx_error)?;
        let versions_count: i32 =
            row.try_get("versions_count").map_err(postgres::map_sqlx_error)?;

        let fields = ServiceFields::new(name, slug, description)?;
        Ok(Service::new(ServiceId::new(id), fields, created_at)
            .with_updated_at(updated_at)
            .with_versions_count(versions_count_from_db(i64::from(versions_count))?))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Version {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let service_id: String = row.try_get("service_id").map_err(postgres::map_sqlx_error)?;
        let semver: String = row.try_get("semver").map_err(postgres::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(postgres::map_sqlx_error)?;
        let changelog: Option<String> =
            row.try_get("changelog").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;

        let status = VersionStatus::try_from(status.as_str())?;
        let fields = VersionFields::new(semver, status, changelog)?;
        Ok(Version::new(VersionId::new(id), ServiceId::new(service_id), fields, created_at))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Service {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let slug: String = row.try_get("slug").map_err(sqlite::map_sqlx_error)?;
        let description: Option<String> =
            row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 = row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_secs: i64 = row.try_get("updated_at_secs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_nsecs: i64 =
            row.try_get("updated_at_nsecs").map_err(sqlite::map_sqlx_error)?;
        let versions_count: i64 = row.try_get("versions_count").map_err(sqlite::map_sqlx_error)?;

        let fields = ServiceFields::new(name, slug, description)?;
        let created_at = build_timestamp(created_at_secs, created_at_nsecs)?;
        let updated_at = build_timestamp(updated_at_secs, updated_at_nsecs)?;
        Ok(Service::new(ServiceId::new(id), fields, created_at)
            .with_updated_at(updated_at)
            .with_versions_count(versions_count_from_db(versions_count)?))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Version {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let service_id: String = row.try_get("service_id").map_err(sqlite::map_sqlx_error)?;
        let semver: String = row.try_get("semver").map_err(sqlite::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(sqlite::map_sqlx_error)?;
        let changelog: Option<String> = row.try_get("changelog").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 = row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;

        let status = VersionStatus::try_from(status.as_str())?;
        let fields = VersionFields::new(semver, status, changelog)?;
        let created_at = build_timestamp(created_at_secs, created_at_nsecs)?;
        Ok(Version::new(VersionId::new(id), ServiceId::new(service_id), fields, created_at))
    }
}

/// Stores a brand new `service`.  The versions count always starts at zero.
///
/// Fails with `AlreadyExists` if the name or the slug are already in use.
pub(crate) async fn create_service(ex: &mut Executor, service: &Service) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO services (id, name, slug, description, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)";
            let done = sqlx::query(query_str)
                .bind(service.id().as_ref())
                .bind(service.name())
                .bind(service.slug())
                .bind(service.description().as_deref())
                .bind(*service.created_at())
                .bind(*service.updated_at())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (created_at_secs, created_at_nsecs) = unpack_timestamp(*service.created_at())?;
            let (updated_at_secs, updated_at_nsecs) = unpack_timestamp(*service.updated_at())?;

            let query_str = "
                INSERT INTO services (
                    id, name, slug, description, name_folded, description_folded,
                    created_at_secs, created_at_nsecs, updated_at_secs, updated_at_nsecs
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(service.id().as_ref())
                .bind(service.name())
                .bind(service.slug())
                .bind(service.description().as_deref())
                .bind(fold_for_search(service.name()))
                .bind(fold_for_search(service.description().as_deref().unwrap_or_default()))
                .bind(created_at_secs)
                .bind(created_at_nsecs)
                .bind(updated_at_secs)
                .bind(updated_at_nsecs)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError(format!(
            "Insertion affected {} rows instead of 1",
            rows_affected
        )));
    }
    Ok(())
}

/// Gets the service identified by `id`.
pub(crate) async fn get_service(ex: &mut Executor, id: &ServiceId) -> DbResult<Service> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM services WHERE id = $1";
            let raw_service = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Service::try_from(raw_service)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM services WHERE id = ?";
            let raw_service = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Service::try_from(raw_service)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Counts all services.
pub(crate) async fn count_services(ex: &mut Executor) -> DbResult<u64> {
    let query_str = "SELECT COUNT(*) AS count FROM services";
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let row = sqlx::query(query_str)
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let row =
                sqlx::query(query_str).fetch_one(&mut **ex).await.map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    count_from_db(count)
}

/// Gets one `page` of services, newest first.
pub(crate) async fn list_services(ex: &mut Executor, page: &PageRequest) -> DbResult<Vec<Service>> {
    let (limit, offset) = limit_and_offset(page)?;

    let mut services = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM services
                ORDER BY created_at DESC, id ASC
                LIMIT $1 OFFSET $2";
            let rows = sqlx::query(query_str)
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            for row in rows {
                services.push(Service::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM services
                ORDER BY created_at_secs DESC, created_at_nsecs DESC, id ASC
                LIMIT ? OFFSET ?";
            let rows = sqlx::query(query_str)
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            for row in rows {
                services.push(Service::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(services)
}

/// Counts the services that match any of the search `terms`.
///
/// The caller must ensure that `terms` is not empty.
pub(crate) async fn count_search_services(
    ex: &mut Executor,
    terms: &SearchTerms,
) -> DbResult<u64> {
    debug_assert!(!terms.is_empty());

    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT COUNT(*) AS count FROM services
                WHERE {} @@ to_tsquery('simple', $1)",
                PG_SERVICE_DOCUMENT
            );
            let row = sqlx::query(&query_str)
                .bind(terms.to_any_query())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT COUNT(*) AS count FROM (SELECT {} AS score FROM services) WHERE score > 0",
                sqlite_search_score(terms.iter().count())
            );
            let mut query = sqlx::query(&query_str);
            for term in terms.iter() {
                let pattern = format!("%{}%", term);
                query = query.bind(pattern.clone()).bind(pattern);
            }
            let row = query.fetch_one(&mut **ex).await.map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    count_from_db(count)
}

/// Gets one `page` of the services that match any of the search `terms`, most relevant first and
/// newest first among equally relevant ones.
///
/// The caller must ensure that `terms` is not empty.
pub(crate) async fn search_services(
    ex: &mut Executor,
    terms: &SearchTerms,
    page: &PageRequest,
) -> DbResult<Vec<Service>> {
    debug_assert!(!terms.is_empty());
    let (limit, offset) = limit_and_offset(page)?;

    let mut services = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT *, ts_rank({doc}, to_tsquery('simple', $1)) AS rank FROM services
                WHERE {doc} @@ to_tsquery('simple', $1)
                ORDER BY rank DESC, created_at DESC, id ASC
                LIMIT $2 OFFSET $3",
                doc = PG_SERVICE_DOCUMENT
            );
            let rows = sqlx::query(&query_str)
                .bind(terms.to_any_query())
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            for row in rows {
                services.push(Service::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT * FROM (SELECT *, {} AS score FROM services)
                WHERE score > 0
                ORDER BY score DESC, created_at_secs DESC, created_at_nsecs DESC, id ASC
                LIMIT ? OFFSET ?",
                sqlite_search_score(terms.iter().count())
            );
            let mut query = sqlx::query(&query_str);
            for term in terms.iter() {
                let pattern = format!("%{}%", term);
                query = query.bind(pattern.clone()).bind(pattern);
            }
            let rows = query
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            for row in rows {
                services.push(Service::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(services)
}

/// Replaces the user-editable properties of the service identified by `id` with `fields` and
/// records the modification time as `updated_at`.
pub(crate) async fn update_service(
    ex: &mut Executor,
    id: &ServiceId,
    fields: &ServiceFields,
    updated_at: OffsetDateTime,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE services SET name = $1, slug = $2, description = $3, updated_at = $4
                WHERE id = $5";
            let done = sqlx::query(query_str)
                .bind(fields.name())
                .bind(fields.slug())
                .bind(fields.description().as_deref())
                .bind(updated_at)
                .bind(id.as_ref())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (updated_at_secs, updated_at_nsecs) = unpack_timestamp(updated_at)?;

            let query_str = "
                UPDATE services
                SET
                    name = ?, slug = ?, description = ?, name_folded = ?, description_folded = ?,
                    updated_at_secs = ?, updated_at_nsecs = ?
                WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(fields.name())
                .bind(fields.slug())
                .bind(fields.description().as_deref())
                .bind(fold_for_search(fields.name()))
                .bind(fold_for_search(fields.description().as_deref().unwrap_or_default()))
                .bind(updated_at_secs)
                .bind(updated_at_nsecs)
                .bind(id.as_ref())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Deletes the service identified by `id` together with all of its versions.
pub(crate) async fn delete_service(ex: &mut Executor, id: &ServiceId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM services WHERE id = $1")
                .bind(id.as_ref())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM services WHERE id = ?")
                .bind(id.as_ref())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}

/// Stores a brand new `version`.
///
/// The owning service must exist or else the database rejects the insertion.
pub(crate) async fn create_version(ex: &mut Executor, version: &Version) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO versions (id, service_id, semver, status, changelog, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)";
            let done = sqlx::query(query_str)
                .bind(version.id().as_ref())
                .bind(version.service_id().as_ref())
                .bind(version.semver())
                .bind(version.status().as_str())
                .bind(version.changelog().as_deref())
                .bind(*version.created_at())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (created_at_secs, created_at_nsecs) = unpack_timestamp(*version.created_at())?;

            let query_str = "
                INSERT INTO versions (
                    id, service_id, semver, status, changelog, created_at_secs, created_at_nsecs
                )
                VALUES (?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(version.id().as_ref())
                .bind(version.service_id().as_ref())
                .bind(version.semver())
                .bind(version.status().as_str())
                .bind(version.changelog().as_deref())
                .bind(created_at_secs)
                .bind(created_at_nsecs)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError(format!(
            "Insertion affected {} rows instead of 1",
            rows_affected
        )));
    }
    Ok(())
}

/// Increments the cached number of versions of the service identified by `id`.
///
/// Returns the number of affected rows, which is zero if the service does not exist.  This is not
/// considered an error.
pub(crate) async fn increment_versions_count(ex: &mut Executor, id: &ServiceId) -> DbResult<u64> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE services SET versions_count = versions_count + 1 WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_ref())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE services SET versions_count = versions_count + 1 WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_ref())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(rows_affected)
}

/// Counts the versions that belong to the service identified by `service_id`.
pub(crate) async fn count_versions(ex: &mut Executor, service_id: &ServiceId) -> DbResult<u64> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let row = sqlx::query("SELECT COUNT(*) AS count FROM versions WHERE service_id = $1")
                .bind(service_id.as_ref())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let row = sqlx::query("SELECT COUNT(*) AS count FROM versions WHERE service_id = ?")
                .bind(service_id.as_ref())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    count_from_db(count)
}

/// Gets one `page` of the versions that belong to the service identified by `service_id`, newest
/// first.
pub(crate) async fn list_versions(
    ex: &mut Executor,
    service_id: &ServiceId,
    page: &PageRequest,
) -> DbResult<Vec<Version>> {
    let (limit, offset) = limit_and_offset(page)?;

    let mut versions = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM versions
                WHERE service_id = $1
                ORDER BY created_at DESC, id ASC
                LIMIT $2 OFFSET $3";
            let rows = sqlx::query(query_str)
                .bind(service_id.as_ref())
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            for row in rows {
                versions.push(Version::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM versions
                WHERE service_id = ?
                ORDER BY created_at_secs DESC, created_at_nsecs DESC, id ASC
                LIMIT ? OFFSET ?";
            let rows = sqlx::query(query_str)
                .bind(service_id.as_ref())
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            for row in rows {
                versions.push(Version::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(versions)
}
