//! Diagnosis persistence.

use super::shared::NamedTable;
use crate::models::Diagnosis;
use crate::{ClinicResult, NonEmptyText};
use rusqlite::Connection;

const TABLE: NamedTable = NamedTable::new("diagnoses");

pub fn insert_diagnosis(conn: &Connection, name: &NonEmptyText) -> ClinicResult<Diagnosis> {
    let id = TABLE.insert(conn, name)?;
    Ok(Diagnosis {
        id,
        name: name.clone(),
    })
}

pub fn get_diagnosis(conn: &Connection, id: i64) -> ClinicResult<Option<Diagnosis>> {
    Ok(TABLE
        .get(conn, id)?
        .map(|(id, name)| Diagnosis { id, name }))
}

pub fn list_diagnoses(conn: &Connection) -> ClinicResult<Vec<Diagnosis>> {
    Ok(TABLE
        .list(conn)?
        .into_iter()
        .map(|(id, name)| Diagnosis { id, name })
        .collect())
}

/// Replaces the name. Returns `None` if the diagnosis does not exist.
pub fn update_diagnosis(
    conn: &Connection,
    id: i64,
    name: &NonEmptyText,
) -> ClinicResult<Option<Diagnosis>> {
    if !TABLE.update(conn, id, name)? {
        return Ok(None);
    }
    Ok(Some(Diagnosis {
        id,
        name: name.clone(),
    }))
}

/// Returns `false` if the diagnosis does not exist.
///
/// Fails with `HasRelations` while any visit cites it.
pub fn delete_diagnosis(conn: &Connection, id: i64) -> ClinicResult<bool> {
    TABLE.delete(conn, id)
}
