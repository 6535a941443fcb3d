//! Patient persistence.

use super::shared::{decode_bool, decode_name, encode_bool};
use crate::models::{Patient, PatientDraft};
use crate::{ClinicError, ClinicResult};
use rusqlite::{params, Connection, OptionalExtension};

type PatientRow = (i64, String, i64, Option<i64>);

fn read_patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok((
        row.get::<_, i64>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, i64>(2)?,
        row.get::<_, Option<i64>>(3)?,
    ))
}

fn build_patient(row: PatientRow) -> ClinicResult<Patient> {
    let (id, name, has_insurance, gp_id) = row;
    Ok(Patient {
        id,
        name: decode_name(name)?,
        has_insurance: decode_bool(has_insurance),
        gp_id,
    })
}

fn select_patients(conn: &Connection, sql: &str, args: &[i64]) -> ClinicResult<Vec<Patient>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args), read_patient_row)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(build_patient(row?)?);
    }
    Ok(patients)
}

pub fn insert_patient(conn: &Connection, draft: &PatientDraft) -> ClinicResult<Patient> {
    conn.execute(
        "INSERT INTO patients (name, has_insurance, gp_id) VALUES (?1, ?2, ?3)",
        params![
            draft.name.as_str(),
            encode_bool(draft.has_insurance),
            draft.gp_id
        ],
    )?;
    Ok(Patient {
        id: conn.last_insert_rowid(),
        name: draft.name.clone(),
        has_insurance: draft.has_insurance,
        gp_id: draft.gp_id,
    })
}

pub fn get_patient(conn: &Connection, id: i64) -> ClinicResult<Option<Patient>> {
    let row = conn
        .query_row(
            "SELECT id, name, has_insurance, gp_id FROM patients WHERE id = ?1",
            params![id],
            read_patient_row,
        )
        .optional()?;
    row.map(build_patient).transpose()
}

pub fn list_patients(conn: &Connection) -> ClinicResult<Vec<Patient>> {
    select_patients(
        conn,
        "SELECT id, name, has_insurance, gp_id FROM patients ORDER BY id",
        &[],
    )
}

/// Patients whose insurance flag equals `has_insurance`.
pub fn list_patients_by_insurance(
    conn: &Connection,
    has_insurance: bool,
) -> ClinicResult<Vec<Patient>> {
    select_patients(
        conn,
        "SELECT id, name, has_insurance, gp_id FROM patients
         WHERE has_insurance = ?1 ORDER BY id",
        &[encode_bool(has_insurance)],
    )
}

pub fn count_patients(conn: &Connection) -> ClinicResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count.unsigned_abs())
}

pub fn count_patients_by_insurance(conn: &Connection, has_insurance: bool) -> ClinicResult<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM patients WHERE has_insurance = ?1",
        params![encode_bool(has_insurance)],
        |row| row.get(0),
    )?;
    Ok(count.unsigned_abs())
}

/// Replaces every mutable attribute. Returns `None` if the patient does not exist.
pub fn update_patient(
    conn: &Connection,
    id: i64,
    draft: &PatientDraft,
) -> ClinicResult<Option<Patient>> {
    let changed = conn
        .execute(
            "UPDATE patients SET name = ?1, has_insurance = ?2, gp_id = ?3 WHERE id = ?4",
            params![
                draft.name.as_str(),
                encode_bool(draft.has_insurance),
                draft.gp_id,
                id
            ],
        )
        .map_err(ClinicError::from_write)?;

    if changed == 0 {
        return Ok(None);
    }
    Ok(Some(Patient {
        id,
        name: draft.name.clone(),
        has_insurance: draft.has_insurance,
        gp_id: draft.gp_id,
    }))
}

/// Returns `false` if the patient does not exist.
pub fn delete_patient(conn: &Connection, id: i64) -> ClinicResult<bool> {
    let changed = conn
        .execute("DELETE FROM patients WHERE id = ?1", params![id])
        .map_err(ClinicError::from_write)?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::NonEmptyText;

    fn draft(name: &str, has_insurance: bool) -> PatientDraft {
        PatientDraft {
            name: NonEmptyText::new(name).unwrap(),
            has_insurance,
            gp_id: None,
        }
    }

    #[test]
    fn test_filters_and_counts_by_insurance() {
        let conn = open_memory_database().unwrap();
        let insured = insert_patient(&conn, &draft("Maria", true)).unwrap();
        insert_patient(&conn, &draft("Georgi", false)).unwrap();
        insert_patient(&conn, &draft("Elena", false)).unwrap();

        assert_eq!(count_patients(&conn).unwrap(), 3);
        assert_eq!(count_patients_by_insurance(&conn, false).unwrap(), 2);
        assert_eq!(list_patients_by_insurance(&conn, true).unwrap(), vec![insured]);
    }

    #[test]
    fn test_gp_reference_must_exist_in_store() {
        let conn = open_memory_database().unwrap();
        let mut orphan = draft("Maria", true);
        orphan.gp_id = Some(404);

        let err = insert_patient(&conn, &orphan).expect_err("foreign key should reject");
        assert!(matches!(err, ClinicError::Database(_)));
    }
}
