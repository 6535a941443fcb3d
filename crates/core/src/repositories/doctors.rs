//! Doctor persistence, including the doctor ↔ specialty links.
//!
//! A doctor and its specialty links are always written together inside one transaction.
//! Deleting a doctor drops its links (cascade) but is refused while a patient names the
//! doctor as GP or a visit references it.

use super::shared::{decode_bool, decode_name, encode_bool};
use crate::models::{Doctor, DoctorDraft, Specialty};
use crate::{ClinicError, ClinicResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

type DoctorRow = (i64, String, Option<NaiveDate>, i64);

fn read_doctor_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DoctorRow> {
    Ok((
        row.get::<_, i64>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, Option<NaiveDate>>(2)?,
        row.get::<_, i64>(3)?,
    ))
}

fn build_doctor(conn: &Connection, row: DoctorRow) -> ClinicResult<Doctor> {
    let (id, name, birthdate, is_gp) = row;
    Ok(Doctor {
        id,
        name: decode_name(name)?,
        birthdate,
        is_gp: decode_bool(is_gp),
        specialties: specialties_for_doctor(conn, id)?,
    })
}

/// Specialties linked to a doctor, ordered by id.
pub fn specialties_for_doctor(conn: &Connection, doctor_id: i64) -> ClinicResult<Vec<Specialty>> {
    let mut stmt = conn.prepare_cached(
        "SELECT s.id, s.name
         FROM specialties s
         JOIN doctor_specialties ds ON ds.specialty_id = s.id
         WHERE ds.doctor_id = ?1
         ORDER BY s.id",
    )?;
    let rows = stmt.query_map(params![doctor_id], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut specialties = Vec::new();
    for row in rows {
        let (id, name) = row?;
        specialties.push(Specialty {
            id,
            name: decode_name(name)?,
        });
    }
    Ok(specialties)
}

fn link_specialties(conn: &Connection, doctor_id: i64, specialties: &[Specialty]) -> ClinicResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO doctor_specialties (doctor_id, specialty_id) VALUES (?1, ?2)",
    )?;
    for specialty in specialties {
        stmt.execute(params![doctor_id, specialty.id])
            .map_err(ClinicError::from_write)?;
    }
    Ok(())
}

/// Inserts a doctor with already-resolved specialties.
pub fn insert_doctor(
    conn: &Connection,
    draft: &DoctorDraft,
    specialties: Vec<Specialty>,
) -> ClinicResult<Doctor> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO doctors (name, birthdate, is_gp) VALUES (?1, ?2, ?3)",
        params![draft.name.as_str(), draft.birthdate, encode_bool(draft.is_gp)],
    )?;
    let id = tx.last_insert_rowid();
    link_specialties(&tx, id, &specialties)?;
    tx.commit()?;

    Ok(Doctor {
        id,
        name: draft.name.clone(),
        birthdate: draft.birthdate,
        is_gp: draft.is_gp,
        specialties,
    })
}

pub fn get_doctor(conn: &Connection, id: i64) -> ClinicResult<Option<Doctor>> {
    let row = conn
        .query_row(
            "SELECT id, name, birthdate, is_gp FROM doctors WHERE id = ?1",
            params![id],
            read_doctor_row,
        )
        .optional()?;

    match row {
        Some(row) => Ok(Some(build_doctor(conn, row)?)),
        None => Ok(None),
    }
}

pub fn list_doctors(conn: &Connection) -> ClinicResult<Vec<Doctor>> {
    let mut stmt = conn.prepare("SELECT id, name, birthdate, is_gp FROM doctors ORDER BY id")?;
    let rows = stmt
        .query_map([], read_doctor_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(|row| build_doctor(conn, row)).collect()
}

/// Replaces every mutable attribute, including the specialty set.
///
/// Returns `None` if the doctor does not exist; nothing is written in that case.
pub fn update_doctor(
    conn: &Connection,
    id: i64,
    draft: &DoctorDraft,
    specialties: Vec<Specialty>,
) -> ClinicResult<Option<Doctor>> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx
        .execute(
            "UPDATE doctors SET name = ?1, birthdate = ?2, is_gp = ?3 WHERE id = ?4",
            params![draft.name.as_str(), draft.birthdate, encode_bool(draft.is_gp), id],
        )
        .map_err(ClinicError::from_write)?;
    if changed == 0 {
        return Ok(None);
    }

    tx.execute(
        "DELETE FROM doctor_specialties WHERE doctor_id = ?1",
        params![id],
    )?;
    link_specialties(&tx, id, &specialties)?;
    tx.commit()?;

    Ok(Some(Doctor {
        id,
        name: draft.name.clone(),
        birthdate: draft.birthdate,
        is_gp: draft.is_gp,
        specialties,
    }))
}

/// Returns `false` if the doctor does not exist.
pub fn delete_doctor(conn: &Connection, id: i64) -> ClinicResult<bool> {
    let changed = conn
        .execute("DELETE FROM doctors WHERE id = ?1", params![id])
        .map_err(ClinicError::from_write)?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::repositories::specialties::insert_specialty;
    use crate::NonEmptyText;
    use std::collections::BTreeSet;

    fn draft(name: &str, is_gp: bool) -> DoctorDraft {
        DoctorDraft {
            name: NonEmptyText::new(name).unwrap(),
            birthdate: NaiveDate::from_ymd_opt(1970, 5, 17),
            is_gp,
            specialty_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_insert_and_get_doctor_with_specialties() {
        let conn = open_memory_database().unwrap();
        let cardiology = insert_specialty(&conn, &NonEmptyText::new("Cardiology").unwrap()).unwrap();
        let surgery = insert_specialty(&conn, &NonEmptyText::new("Surgery").unwrap()).unwrap();

        let created = insert_doctor(
            &conn,
            &draft("Dr. Ivanova", false),
            vec![cardiology.clone(), surgery.clone()],
        )
        .unwrap();

        let loaded = get_doctor(&conn, created.id).unwrap().expect("doctor should exist");
        assert_eq!(loaded, created);
        assert_eq!(loaded.specialties, vec![cardiology, surgery]);
        assert_eq!(loaded.birthdate, NaiveDate::from_ymd_opt(1970, 5, 17));
    }

    #[test]
    fn test_update_replaces_specialty_set() {
        let conn = open_memory_database().unwrap();
        let cardiology = insert_specialty(&conn, &NonEmptyText::new("Cardiology").unwrap()).unwrap();
        let surgery = insert_specialty(&conn, &NonEmptyText::new("Surgery").unwrap()).unwrap();
        let created = insert_doctor(&conn, &draft("Dr. Ivanova", false), vec![cardiology]).unwrap();

        let updated = update_doctor(&conn, created.id, &draft("Dr. Petrova", true), vec![surgery.clone()])
            .unwrap()
            .expect("doctor should exist");

        assert_eq!(updated.name.as_str(), "Dr. Petrova");
        assert!(updated.is_gp);
        assert_eq!(specialties_for_doctor(&conn, created.id).unwrap(), vec![surgery]);
    }

    #[test]
    fn test_update_missing_doctor_writes_nothing() {
        let conn = open_memory_database().unwrap();
        assert_eq!(update_doctor(&conn, 99, &draft("Ghost", true), vec![]).unwrap(), None);
        assert!(list_doctors(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_delete_doctor_drops_specialty_links() {
        let conn = open_memory_database().unwrap();
        let cardiology = insert_specialty(&conn, &NonEmptyText::new("Cardiology").unwrap()).unwrap();
        let created = insert_doctor(&conn, &draft("Dr. Ivanova", false), vec![cardiology]).unwrap();

        assert!(delete_doctor(&conn, created.id).unwrap());
        let links: i64 = conn
            .query_row("SELECT COUNT(*) FROM doctor_specialties", [], |row| row.get(0))
            .unwrap();
        assert_eq!(links, 0);
    }
}
