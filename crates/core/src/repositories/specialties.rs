//! Specialty persistence.

use super::shared::NamedTable;
use crate::models::Specialty;
use crate::{ClinicResult, NonEmptyText};
use rusqlite::Connection;

const TABLE: NamedTable = NamedTable::new("specialties");

pub fn insert_specialty(conn: &Connection, name: &NonEmptyText) -> ClinicResult<Specialty> {
    let id = TABLE.insert(conn, name)?;
    Ok(Specialty {
        id,
        name: name.clone(),
    })
}

pub fn get_specialty(conn: &Connection, id: i64) -> ClinicResult<Option<Specialty>> {
    Ok(TABLE
        .get(conn, id)?
        .map(|(id, name)| Specialty { id, name }))
}

pub fn list_specialties(conn: &Connection) -> ClinicResult<Vec<Specialty>> {
    Ok(TABLE
        .list(conn)?
        .into_iter()
        .map(|(id, name)| Specialty { id, name })
        .collect())
}

/// Replaces the name. Returns `None` if the specialty does not exist.
pub fn update_specialty(
    conn: &Connection,
    id: i64,
    name: &NonEmptyText,
) -> ClinicResult<Option<Specialty>> {
    if !TABLE.update(conn, id, name)? {
        return Ok(None);
    }
    Ok(Some(Specialty {
        id,
        name: name.clone(),
    }))
}

/// Returns `false` if the specialty does not exist.
///
/// Fails with `HasRelations` while any doctor lists it.
pub fn delete_specialty(conn: &Connection, id: i64) -> ClinicResult<bool> {
    TABLE.delete(conn, id)
}
