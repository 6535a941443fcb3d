//! # API REST
//!
//! REST API for the clinic records service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - Mapping of core errors onto status codes and JSON error bodies
//!
//! Uses `api-shared` for wire types and `clinic-core` for everything behind them.

#![warn(rust_2018_idioms)]

pub mod error;
mod handlers;

use api_shared::{
    DiagnosisRequest, DiagnosisResponse, DoctorRequest, DoctorResponse, ErrorsBody, HealthRes,
    HealthSystemRequest, HealthSystemResponse, MessageBody, PatientRequest, PatientResponse,
    SpecialtyRequest, SpecialtyResponse, VisitRequest, VisitResponse,
};
use axum::routing::get;
use axum::Router;
use clinic_core::ClinicServices;
use handlers::{diagnoses, doctors, health, health_systems, patients, specialties, visits};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    services: ClinicServices,
}

impl AppState {
    pub fn new(services: ClinicServices) -> Self {
        Self { services }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        diagnoses::create_diagnosis,
        diagnoses::list_diagnoses,
        diagnoses::get_diagnosis,
        diagnoses::update_diagnosis,
        diagnoses::delete_diagnosis,
        specialties::create_specialty,
        specialties::list_specialties,
        specialties::get_specialty,
        specialties::update_specialty,
        specialties::delete_specialty,
        health_systems::create_health_system,
        health_systems::list_health_systems,
        health_systems::get_health_system,
        health_systems::update_health_system,
        health_systems::delete_health_system,
        doctors::create_doctor,
        doctors::list_doctors,
        doctors::get_doctor,
        doctors::update_doctor,
        doctors::delete_doctor,
        patients::create_patient,
        patients::list_patients,
        patients::get_patient,
        patients::update_patient,
        patients::delete_patient,
        patients::insured_patients,
        patients::percent_without_insurance,
        visits::create_visit,
        visits::list_visits,
        visits::get_visit,
        visits::update_visit,
        visits::delete_visit,
        visits::total_income,
        visits::total_income_by_doctor,
        visits::count_visits_by_patient,
        visits::count_visits_by_diagnosis,
        visits::count_doctors_by_income,
        visits::total_income_by_diagnosis,
        visits::total_income_from_uninsured_patients,
        visits::doctor_income_from_insured_patients,
    ),
    components(schemas(
        HealthRes,
        DiagnosisRequest,
        DiagnosisResponse,
        SpecialtyRequest,
        SpecialtyResponse,
        HealthSystemRequest,
        HealthSystemResponse,
        DoctorRequest,
        DoctorResponse,
        PatientRequest,
        PatientResponse,
        VisitRequest,
        VisitResponse,
        MessageBody,
        ErrorsBody,
    ))
)]
pub struct ApiDoc;

/// Builds the complete application router, Swagger UI included.
pub fn router(services: ClinicServices) -> Router {
    let state = AppState::new(services);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/diagnoses",
            get(diagnoses::list_diagnoses).post(diagnoses::create_diagnosis),
        )
        .route(
            "/diagnoses/:id",
            get(diagnoses::get_diagnosis)
                .put(diagnoses::update_diagnosis)
                .delete(diagnoses::delete_diagnosis),
        )
        .route(
            "/specialties",
            get(specialties::list_specialties).post(specialties::create_specialty),
        )
        .route(
            "/specialties/:id",
            get(specialties::get_specialty)
                .put(specialties::update_specialty)
                .delete(specialties::delete_specialty),
        )
        .route(
            "/health-systems",
            get(health_systems::list_health_systems).post(health_systems::create_health_system),
        )
        .route(
            "/health-systems/:id",
            get(health_systems::get_health_system)
                .put(health_systems::update_health_system)
                .delete(health_systems::delete_health_system),
        )
        .route(
            "/doctors",
            get(doctors::list_doctors).post(doctors::create_doctor),
        )
        .route(
            "/doctors/:id",
            get(doctors::get_doctor)
                .put(doctors::update_doctor)
                .delete(doctors::delete_doctor),
        )
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/patients/has-insurance", get(patients::insured_patients))
        .route(
            "/patients/percent-without-insurance",
            get(patients::percent_without_insurance),
        )
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/visits", get(visits::list_visits).post(visits::create_visit))
        .route("/visits/total-income", get(visits::total_income))
        .route(
            "/visits/total-income-by-doctor/:doctor_id",
            get(visits::total_income_by_doctor),
        )
        .route(
            "/visits/count-visits-by-patient/:patient_id",
            get(visits::count_visits_by_patient),
        )
        .route(
            "/visits/count-visits-by-diagnosis/:diagnosis_id",
            get(visits::count_visits_by_diagnosis),
        )
        .route(
            "/visits/count-doctors-by-income/:min_income",
            get(visits::count_doctors_by_income),
        )
        .route(
            "/visits/total-income-by-diagnosis/:diagnosis_id",
            get(visits::total_income_by_diagnosis),
        )
        .route(
            "/visits/total-income-by-patients-no-insurance",
            get(visits::total_income_from_uninsured_patients),
        )
        .route(
            "/visits/total-income-by-doctor-insured-patients/:doctor_id",
            get(visits::doctor_income_from_insured_patients),
        )
        .route(
            "/visits/:id",
            get(visits::get_visit)
                .put(visits::update_visit)
                .delete(visits::delete_visit),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
