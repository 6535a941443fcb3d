//! Health system persistence.
//!
//! Fees are stored as canonical decimal text and decoded back into [`Fee`], so the value
//! read is exactly the value written.

use super::shared::decode_fee;
use crate::models::HealthSystem;
use crate::{ClinicError, ClinicResult, Fee};
use rusqlite::{params, Connection, OptionalExtension};

pub fn insert_health_system(conn: &Connection, fee: Fee) -> ClinicResult<HealthSystem> {
    conn.execute(
        "INSERT INTO health_systems (no_insurance_fee) VALUES (?1)",
        params![fee.to_string()],
    )?;
    Ok(HealthSystem {
        id: conn.last_insert_rowid(),
        no_insurance_fee: fee,
    })
}

pub fn get_health_system(conn: &Connection, id: i64) -> ClinicResult<Option<HealthSystem>> {
    let row = conn
        .query_row(
            "SELECT id, no_insurance_fee FROM health_systems WHERE id = ?1",
            params![id],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    match row {
        Some((id, fee)) => Ok(Some(HealthSystem {
            id,
            no_insurance_fee: decode_fee(&fee)?,
        })),
        None => Ok(None),
    }
}

pub fn list_health_systems(conn: &Connection) -> ClinicResult<Vec<HealthSystem>> {
    let mut stmt = conn.prepare("SELECT id, no_insurance_fee FROM health_systems ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut systems = Vec::new();
    for row in rows {
        let (id, fee) = row?;
        systems.push(HealthSystem {
            id,
            no_insurance_fee: decode_fee(&fee)?,
        });
    }
    Ok(systems)
}

/// Replaces the fee. Returns `None` if the health system does not exist.
pub fn update_health_system(
    conn: &Connection,
    id: i64,
    fee: Fee,
) -> ClinicResult<Option<HealthSystem>> {
    let changed = conn
        .execute(
            "UPDATE health_systems SET no_insurance_fee = ?1 WHERE id = ?2",
            params![fee.to_string(), id],
        )
        .map_err(ClinicError::from_write)?;

    if changed == 0 {
        return Ok(None);
    }
    Ok(Some(HealthSystem {
        id,
        no_insurance_fee: fee,
    }))
}

/// Returns `false` if the health system does not exist.
pub fn delete_health_system(conn: &Connection, id: i64) -> ClinicResult<bool> {
    let changed = conn
        .execute("DELETE FROM health_systems WHERE id = ?1", params![id])
        .map_err(ClinicError::from_write)?;
    Ok(changed > 0)
}
