//! Wire request and response shapes.
//!
//! Request fields are all optional on the wire so that a missing field is reported as a
//! validation message instead of a JSON decoding failure. Responses are plain records;
//! they are built from core entities with explicit `From` impls in `clinic-core`.
//!
//! Monetary amounts serialise as decimal strings. Numeric request amounts are read from
//! their source digits, never through a float. Dates use `yyyy-MM-dd`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

// ============================================================================
// REQUESTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthSystemRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "25.50")]
    pub no_insurance_fee: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "1975-03-14")]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub is_gp: Option<bool>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<i64>>)]
    pub specialties_ids: Option<BTreeSet<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub has_insurance: Option<bool>,
    #[serde(default)]
    pub gp_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    #[serde(default)]
    pub health_system_id: Option<i64>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<i64>>)]
    pub diagnoses_ids: Option<BTreeSet<i64>>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-02")]
    pub visit_date: Option<NaiveDate>,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthSystemResponse {
    pub id: i64,
    #[schema(value_type = String, example = "25.50")]
    pub no_insurance_fee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    pub id: i64,
    pub name: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub birthdate: Option<NaiveDate>,
    pub is_gp: bool,
    pub specialties: Vec<SpecialtyResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: i64,
    pub name: String,
    pub has_insurance: bool,
    pub gp_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub health_system_id: i64,
    pub diagnoses: Vec<DiagnosisResponse>,
    #[schema(value_type = String, format = Date)]
    pub visit_date: NaiveDate,
}

// ============================================================================
// ERROR BODIES
// ============================================================================

/// Body for not-found and business-rule failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Body for field validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}
