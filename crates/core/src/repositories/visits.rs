//! Visit persistence, including the visit ↔ diagnosis links.
//!
//! Reads always join the visit's patient (for the insurance flag) and health system (for
//! the fee), which is everything the aggregation layer needs.

use super::shared::{decode_bool, decode_fee, decode_name, encode_bool};
use crate::models::{Diagnosis, HealthSystem, Patient, Visit, VisitDraft};
use crate::{ClinicError, ClinicResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

const SELECT_VISITS: &str = "SELECT v.id, v.patient_id, p.has_insurance, v.doctor_id,
        hs.id, hs.no_insurance_fee, v.visit_date
 FROM visits v
 JOIN patients p ON p.id = v.patient_id
 JOIN health_systems hs ON hs.id = v.health_system_id";

/// Which subset of visits to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFilter {
    All,
    Id(i64),
    Doctor(i64),
    Diagnosis(i64),
    PatientInsurance(bool),
    DoctorAndPatientInsurance { doctor_id: i64, has_insurance: bool },
}

impl VisitFilter {
    fn clause(&self) -> (&'static str, Vec<i64>) {
        match *self {
            VisitFilter::All => ("", vec![]),
            VisitFilter::Id(id) => ("WHERE v.id = ?1", vec![id]),
            VisitFilter::Doctor(doctor_id) => ("WHERE v.doctor_id = ?1", vec![doctor_id]),
            VisitFilter::Diagnosis(diagnosis_id) => (
                "WHERE EXISTS (SELECT 1 FROM visit_diagnoses vd
                               WHERE vd.visit_id = v.id AND vd.diagnosis_id = ?1)",
                vec![diagnosis_id],
            ),
            VisitFilter::PatientInsurance(has_insurance) => {
                ("WHERE p.has_insurance = ?1", vec![encode_bool(has_insurance)])
            }
            VisitFilter::DoctorAndPatientInsurance {
                doctor_id,
                has_insurance,
            } => (
                "WHERE v.doctor_id = ?1 AND p.has_insurance = ?2",
                vec![doctor_id, encode_bool(has_insurance)],
            ),
        }
    }
}

type VisitRow = (i64, i64, i64, i64, i64, String, NaiveDate);

/// Diagnoses cited by a visit, ordered by id.
pub fn diagnoses_for_visit(conn: &Connection, visit_id: i64) -> ClinicResult<Vec<Diagnosis>> {
    let mut stmt = conn.prepare_cached(
        "SELECT d.id, d.name
         FROM diagnoses d
         JOIN visit_diagnoses vd ON vd.diagnosis_id = d.id
         WHERE vd.visit_id = ?1
         ORDER BY d.id",
    )?;
    let rows = stmt.query_map(params![visit_id], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut diagnoses = Vec::new();
    for row in rows {
        let (id, name) = row?;
        diagnoses.push(Diagnosis {
            id,
            name: decode_name(name)?,
        });
    }
    Ok(diagnoses)
}

/// Reads the visits selected by `filter`, ordered by id.
pub fn select_visits(conn: &Connection, filter: VisitFilter) -> ClinicResult<Vec<Visit>> {
    let (clause, args) = filter.clause();
    let sql = format!("{SELECT_VISITS} {clause} ORDER BY v.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(args), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, NaiveDate>(6)?,
            ))
        })?
        .collect::<Result<Vec<VisitRow>, _>>()?;

    let mut visits = Vec::with_capacity(rows.len());
    for (id, patient_id, has_insurance, doctor_id, hs_id, fee, visit_date) in rows {
        visits.push(Visit {
            id,
            patient_id,
            patient_has_insurance: decode_bool(has_insurance),
            doctor_id,
            health_system: HealthSystem {
                id: hs_id,
                no_insurance_fee: decode_fee(&fee)?,
            },
            diagnoses: diagnoses_for_visit(conn, id)?,
            visit_date,
        });
    }
    Ok(visits)
}

pub fn get_visit(conn: &Connection, id: i64) -> ClinicResult<Option<Visit>> {
    Ok(select_visits(conn, VisitFilter::Id(id))?.into_iter().next())
}

pub fn count_visits_by_patient(conn: &Connection, patient_id: i64) -> ClinicResult<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM visits WHERE patient_id = ?1",
        params![patient_id],
        |row| row.get(0),
    )?;
    Ok(count.unsigned_abs())
}

pub fn count_visits_by_diagnosis(conn: &Connection, diagnosis_id: i64) -> ClinicResult<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT visit_id) FROM visit_diagnoses WHERE diagnosis_id = ?1",
        params![diagnosis_id],
        |row| row.get(0),
    )?;
    Ok(count.unsigned_abs())
}

fn link_diagnoses(conn: &Connection, visit_id: i64, diagnoses: &[Diagnosis]) -> ClinicResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO visit_diagnoses (visit_id, diagnosis_id) VALUES (?1, ?2)",
    )?;
    for diagnosis in diagnoses {
        stmt.execute(params![visit_id, diagnosis.id])
            .map_err(ClinicError::from_write)?;
    }
    Ok(())
}

/// Resolved references of a visit write.
#[derive(Debug, Clone)]
pub struct VisitRefs {
    pub patient: Patient,
    pub doctor_id: i64,
    pub health_system: HealthSystem,
    pub diagnoses: Vec<Diagnosis>,
}

fn assemble(id: i64, draft: &VisitDraft, refs: VisitRefs) -> Visit {
    Visit {
        id,
        patient_id: refs.patient.id,
        patient_has_insurance: refs.patient.has_insurance,
        doctor_id: refs.doctor_id,
        health_system: refs.health_system,
        diagnoses: refs.diagnoses,
        visit_date: draft.visit_date(),
    }
}

/// Inserts a visit whose references were already resolved.
pub fn insert_visit(conn: &Connection, draft: &VisitDraft, refs: VisitRefs) -> ClinicResult<Visit> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO visits (patient_id, doctor_id, health_system_id, visit_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            refs.patient.id,
            refs.doctor_id,
            refs.health_system.id,
            draft.visit_date()
        ],
    )?;
    let id = tx.last_insert_rowid();
    link_diagnoses(&tx, id, &refs.diagnoses)?;
    tx.commit()?;

    Ok(assemble(id, draft, refs))
}

/// Replaces every mutable attribute, including the diagnosis set.
///
/// Returns `None` if the visit does not exist; nothing is written in that case.
pub fn update_visit(
    conn: &Connection,
    id: i64,
    draft: &VisitDraft,
    refs: VisitRefs,
) -> ClinicResult<Option<Visit>> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx
        .execute(
            "UPDATE visits
             SET patient_id = ?1, doctor_id = ?2, health_system_id = ?3, visit_date = ?4
             WHERE id = ?5",
            params![
                refs.patient.id,
                refs.doctor_id,
                refs.health_system.id,
                draft.visit_date(),
                id
            ],
        )
        .map_err(ClinicError::from_write)?;
    if changed == 0 {
        return Ok(None);
    }

    tx.execute("DELETE FROM visit_diagnoses WHERE visit_id = ?1", params![id])?;
    link_diagnoses(&tx, id, &refs.diagnoses)?;
    tx.commit()?;

    Ok(Some(assemble(id, draft, refs)))
}

/// Returns `false` if the visit does not exist. Diagnosis links go with it.
pub fn delete_visit(conn: &Connection, id: i64) -> ClinicResult<bool> {
    let changed = conn
        .execute("DELETE FROM visits WHERE id = ?1", params![id])
        .map_err(ClinicError::from_write)?;
    Ok(changed > 0)
}
