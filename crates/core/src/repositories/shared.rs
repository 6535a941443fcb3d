//! Shared repository utilities.
//!
//! Row decoding helpers used by every repository, plus [`NamedTable`], the persistence for
//! the two reference tables whose rows are just an id and a name (diagnoses, specialties).

use crate::{ClinicError, ClinicResult, Fee, NonEmptyText};
use rusqlite::{params, Connection, OptionalExtension};

/// Decodes a stored name column.
pub(crate) fn decode_name(raw: String) -> ClinicResult<NonEmptyText> {
    NonEmptyText::new(&raw)
        .map_err(|e| ClinicError::InvalidStoredValue(format!("name {raw:?}: {e}")))
}

/// Decodes a stored fee column (canonical decimal text).
pub(crate) fn decode_fee(raw: &str) -> ClinicResult<Fee> {
    Fee::parse(raw).map_err(|e| ClinicError::InvalidStoredValue(format!("fee {raw:?}: {e}")))
}

pub(crate) fn encode_bool(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn decode_bool(raw: i64) -> bool {
    raw != 0
}

/// Table of `(id, name)` rows.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NamedTable {
    table: &'static str,
}

impl NamedTable {
    pub(crate) const fn new(table: &'static str) -> Self {
        Self { table }
    }

    pub(crate) fn insert(&self, conn: &Connection, name: &NonEmptyText) -> ClinicResult<i64> {
        conn.execute(
            &format!("INSERT INTO {} (name) VALUES (?1)", self.table),
            params![name.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub(crate) fn get(
        &self,
        conn: &Connection,
        id: i64,
    ) -> ClinicResult<Option<(i64, NonEmptyText)>> {
        let row = conn
            .query_row(
                &format!("SELECT id, name FROM {} WHERE id = ?1", self.table),
                params![id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((id, name)) => Ok(Some((id, decode_name(name)?))),
            None => Ok(None),
        }
    }

    pub(crate) fn list(&self, conn: &Connection) -> ClinicResult<Vec<(i64, NonEmptyText)>> {
        let mut stmt = conn.prepare(&format!("SELECT id, name FROM {} ORDER BY id", self.table))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, name) = row?;
            out.push((id, decode_name(name)?));
        }
        Ok(out)
    }

    /// Returns `false` if no row has `id`.
    pub(crate) fn update(
        &self,
        conn: &Connection,
        id: i64,
        name: &NonEmptyText,
    ) -> ClinicResult<bool> {
        let changed = conn
            .execute(
                &format!("UPDATE {} SET name = ?1 WHERE id = ?2", self.table),
                params![name.as_str(), id],
            )
            .map_err(ClinicError::from_write)?;
        Ok(changed > 0)
    }

    /// Returns `false` if no row has `id`.
    pub(crate) fn delete(&self, conn: &Connection, id: i64) -> ClinicResult<bool> {
        let changed = conn
            .execute(
                &format!("DELETE FROM {} WHERE id = ?1", self.table),
                params![id],
            )
            .map_err(ClinicError::from_write)?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    const TABLE: NamedTable = NamedTable::new("specialties");

    #[test]
    fn test_named_table_crud() {
        let conn = open_memory_database().unwrap();
        let name = NonEmptyText::new("Cardiology").unwrap();

        let id = TABLE.insert(&conn, &name).unwrap();
        assert_eq!(TABLE.get(&conn, id).unwrap(), Some((id, name)));

        let renamed = NonEmptyText::new("Neurology").unwrap();
        assert!(TABLE.update(&conn, id, &renamed).unwrap());
        assert_eq!(TABLE.list(&conn).unwrap(), vec![(id, renamed)]);

        assert!(TABLE.delete(&conn, id).unwrap());
        assert!(!TABLE.delete(&conn, id).unwrap());
        assert_eq!(TABLE.get(&conn, id).unwrap(), None);
    }

    #[test]
    fn test_decode_rejects_corrupt_rows() {
        assert!(matches!(
            decode_name("  ".into()),
            Err(ClinicError::InvalidStoredValue(_))
        ));
        assert!(matches!(
            decode_fee("-3"),
            Err(ClinicError::InvalidStoredValue(_))
        ));
    }
}
