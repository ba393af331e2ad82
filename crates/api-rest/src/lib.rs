//! # API REST
//!
//! REST surface for the visit-queue coordinator.
//!
//! Exposes both in-process call surfaces of the engine over HTTP:
//! - the patient-join surface (`/queue/join`, `/queue/position/{name}`),
//! - the operator surface (`/queue/next`, `/queue/skip`, `/queue/pause`,
//!   `/queue`, `/queue/current`, `/stats`),
//!
//! plus the registration generator (`/registration`) and a health check.
//!
//! The engine assumes a single logical writer, so the shared state wraps
//! it in a mutex: every handler takes the lock for the duration of its
//! operation, which serialises the four mutating operations against each
//! other and against reads.
//!
//! Input validation lives here, at the boundary: empty names or entry
//! codes are rejected with 400 before the engine is called; the engine
//! itself stays total.

#![warn(rust_2018_idioms)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CallNextRes, ClearCurrentRes, CurrentRes, DoctorReq, DoctorRes, HealthRes, JoinReq, JoinRes,
    PatientDto, PauseRes, PositionRes, QueueRes, RegisterReq, RegisterRes, SkipRes, StatsRes,
};
use vq_core::{CoreConfig, Patient, PatientStatus, VisitQueue};
use vq_registration::HospitalRegistration;
use vq_types::{EntryCode, PatientName};

/// Operator-facing guard text when call-next finds an empty queue.
pub const NO_PATIENTS_MESSAGE: &str = "No patients in queue";

/// Application state shared across REST API handlers.
///
/// Holds the single shared queue engine behind a mutex — the external
/// serialization point the (single-writer) engine requires once multiple
/// request handlers can reach it concurrently.
#[derive(Clone)]
pub struct AppState {
    queue: Arc<Mutex<VisitQueue>>,
}

impl AppState {
    /// Build state with a fresh empty queue using the system clock.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_queue(VisitQueue::new(cfg))
    }

    /// Build state around an existing engine (tests inject a fixed clock
    /// this way).
    pub fn with_queue(queue: VisitQueue) -> Self {
        Self {
            queue: Arc::new(Mutex::new(queue)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, VisitQueue>, (StatusCode, &'static str)> {
        self.queue.lock().map_err(|e| {
            tracing::error!("queue state lock poisoned: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_queue,
        join_queue,
        patient_position,
        call_next,
        skip_patient,
        toggle_pause,
        current_patient,
        clear_current_patient,
        stats,
        register_hospital,
    ),
    components(schemas(
        HealthRes,
        QueueRes,
        PatientDto,
        JoinReq,
        JoinRes,
        PositionRes,
        CallNextRes,
        SkipRes,
        PauseRes,
        CurrentRes,
        ClearCurrentRes,
        StatsRes,
        RegisterReq,
        RegisterRes,
        DoctorReq,
        DoctorRes,
    ))
)]
struct ApiDoc;

/// Build the application router with Swagger UI and permissive CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/queue", get(get_queue))
        .route("/queue/join", post(join_queue))
        .route("/queue/position/:name", get(patient_position))
        .route("/queue/next", post(call_next))
        .route("/queue/skip", post(skip_patient))
        .route("/queue/pause", post(toggle_pause))
        .route("/queue/current", get(current_patient))
        .route("/queue/current", delete(clear_current_patient))
        .route("/stats", get(stats))
        .route("/registration", post(register_hospital))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the application until the server exits.
///
/// # Errors
/// Returns an error if the address cannot be bound or the HTTP server
/// fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    tracing::info!("-- Starting visit-queue REST API on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn patient_dto(patient: &Patient) -> PatientDto {
    PatientDto {
        id: patient.id.to_string(),
        name: patient.name.clone(),
        position: patient.position as u32,
        status: match patient.status {
            PatientStatus::Waiting => "waiting",
            PatientStatus::BeingServed => "being-served",
            PatientStatus::Skipped => "skipped",
        }
        .into(),
        joined_at: patient.joined_at.clone(),
        entry_code: patient.entry_code.clone(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring and load balancer checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes::alive())
}

#[utoipa::path(
    get,
    path = "/queue",
    responses(
        (status = 200, description = "Waiting sequence and pause flag", body = QueueRes),
        (status = 500, description = "Internal server error")
    )
)]
/// The waiting sequence in order, head first, with the pause flag.
///
/// The pause flag is a display-only signal for operator surfaces; the
/// engine never consults it.
#[axum::debug_handler]
async fn get_queue(
    State(state): State<AppState>,
) -> Result<Json<QueueRes>, (StatusCode, &'static str)> {
    let queue = state.lock()?;
    Ok(Json(QueueRes {
        patients: queue.waiting().iter().map(patient_dto).collect(),
        paused: queue.is_paused(),
    }))
}

#[utoipa::path(
    post,
    path = "/queue/join",
    request_body = JoinReq,
    responses(
        (status = 201, description = "Joined the queue", body = JoinRes),
        (status = 400, description = "Empty name or entry code"),
        (status = 500, description = "Internal server error")
    )
)]
/// Join the queue with a display name and an entry code.
///
/// The entry code is opaque to the queue and accepted as-is; only
/// non-emptiness is enforced. Responds with the assigned position and the
/// projected wait in minutes.
#[axum::debug_handler]
async fn join_queue(
    State(state): State<AppState>,
    Json(req): Json<JoinReq>,
) -> Result<(StatusCode, Json<JoinRes>), (StatusCode, &'static str)> {
    let name = match PatientName::new(&req.name) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("join rejected, invalid name: {}", e);
            return Err((StatusCode::BAD_REQUEST, "Patient name is required"));
        }
    };
    let entry_code = match EntryCode::new(&req.entry_code) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("join rejected, invalid entry code: {}", e);
            return Err((StatusCode::BAD_REQUEST, "Entry code is required"));
        }
    };

    let mut queue = state.lock()?;
    queue.join(name.into_inner(), entry_code.into_inner());

    // The new patient sits at the tail, so its position equals the queue
    // length and the wait projection covers the whole queue.
    let position = queue.waiting().len() as u32;
    let estimated_wait = queue.stats().avg_wait_time;
    Ok((
        StatusCode::CREATED,
        Json(JoinRes {
            position,
            estimated_wait,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/queue/position/{name}",
    params(
        ("name" = String, Path, description = "Exact (case-sensitive) patient display name")
    ),
    responses(
        (status = 200, description = "Position of the first matching waiting patient, 0 if none", body = PositionRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Position lookup for the patient-join surface.
///
/// Returns 0 when no waiting patient matches; ties between patients
/// sharing a name resolve to the lowest position.
#[axum::debug_handler]
async fn patient_position(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
) -> Result<Json<PositionRes>, (StatusCode, &'static str)> {
    let queue = state.lock()?;
    Ok(Json(PositionRes {
        position: queue.patient_position(&name) as u32,
    }))
}

#[utoipa::path(
    post,
    path = "/queue/next",
    responses(
        (status = 200, description = "Called patient, or guard message when the queue is empty", body = CallNextRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Advance the queue: the head patient becomes the current patient.
///
/// On an empty queue the engine silently no-ops; the guard message for
/// the operator is supplied here.
#[axum::debug_handler]
async fn call_next(
    State(state): State<AppState>,
) -> Result<Json<CallNextRes>, (StatusCode, &'static str)> {
    let mut queue = state.lock()?;
    match queue.call_next() {
        Some(patient) => Ok(Json(CallNextRes {
            message: format!("Now serving {}", patient.name),
            patient: Some(patient_dto(&patient)),
        })),
        None => Ok(Json(CallNextRes {
            patient: None,
            message: NO_PATIENTS_MESSAGE.into(),
        })),
    }
}

#[utoipa::path(
    post,
    path = "/queue/skip",
    responses(
        (status = 200, description = "Head patient moved to the tail as skipped", body = SkipRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Skip the head patient: it cycles to the tail with status `skipped`.
///
/// No-op on an empty queue; `success` reports whether anyone was skipped.
#[axum::debug_handler]
async fn skip_patient(
    State(state): State<AppState>,
) -> Result<Json<SkipRes>, (StatusCode, &'static str)> {
    let mut queue = state.lock()?;
    let had_patients = !queue.waiting().is_empty();
    queue.skip_patient();
    Ok(Json(SkipRes {
        success: had_patients,
    }))
}

#[utoipa::path(
    post,
    path = "/queue/pause",
    responses(
        (status = 200, description = "Pause flag after toggling", body = PauseRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Toggle the display-only pause flag.
#[axum::debug_handler]
async fn toggle_pause(
    State(state): State<AppState>,
) -> Result<Json<PauseRes>, (StatusCode, &'static str)> {
    let mut queue = state.lock()?;
    queue.toggle_pause();
    Ok(Json(PauseRes {
        paused: queue.is_paused(),
    }))
}

#[utoipa::path(
    get,
    path = "/queue/current",
    responses(
        (status = 200, description = "Currently-served patient, if any", body = CurrentRes),
        (status = 500, description = "Internal server error")
    )
)]
/// The patient most recently called from the queue.
#[axum::debug_handler]
async fn current_patient(
    State(state): State<AppState>,
) -> Result<Json<CurrentRes>, (StatusCode, &'static str)> {
    let queue = state.lock()?;
    Ok(Json(CurrentRes {
        patient: queue.current_patient().map(patient_dto),
    }))
}

#[utoipa::path(
    delete,
    path = "/queue/current",
    responses(
        (status = 200, description = "Currently-serving display cleared", body = ClearCurrentRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Clear the "currently serving" display.
#[axum::debug_handler]
async fn clear_current_patient(
    State(state): State<AppState>,
) -> Result<Json<ClearCurrentRes>, (StatusCode, &'static str)> {
    let mut queue = state.lock()?;
    queue.set_current_patient(None);
    Ok(Json(ClearCurrentRes { success: true }))
}

#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Derived queue statistics", body = StatsRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Derived statistics, recomputed from the live counters on every call.
#[axum::debug_handler]
async fn stats(State(state): State<AppState>) -> Result<Json<StatsRes>, (StatusCode, &'static str)> {
    let queue = state.lock()?;
    let stats = queue.stats();
    Ok(Json(StatsRes {
        total_patients: stats.total_patients,
        patients_served: stats.patients_served,
        avg_wait_time: stats.avg_wait_time,
        efficiency: stats.efficiency,
    }))
}

#[utoipa::path(
    post,
    path = "/registration",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Hospital registered, entry codes generated", body = RegisterRes),
        (status = 400, description = "Missing hospital name, doctor fields, or doctors"),
        (status = 500, description = "Internal server error")
    )
)]
/// Run the registration generator for a hospital and its doctors.
///
/// Produces one entry code and one QR payload per doctor. Registrations
/// are not persisted and the queue does not validate entry codes against
/// them; the generated codes are handed to patients out of band.
#[axum::debug_handler]
async fn register_hospital(
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<RegisterRes>), (StatusCode, &'static str)> {
    let doctors: Vec<(String, String)> = req
        .doctors
        .into_iter()
        .map(|d| (d.name, d.department))
        .collect();

    let mut rng = rand::thread_rng();
    let hospital = match HospitalRegistration::register(&req.hospital_name, &doctors, &mut rng) {
        Ok(hospital) => hospital,
        Err(e) => {
            tracing::warn!("registration rejected: {}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid registration"));
        }
    };

    let payloads = hospital.qr_payloads();
    let mut doctors = Vec::with_capacity(hospital.doctors.len());
    for (doctor, payload) in hospital.doctors.iter().zip(&payloads) {
        let qr_payload = payload.to_json().map_err(|e| {
            tracing::error!("QR payload serialisation error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        })?;
        doctors.push(DoctorRes {
            name: doctor.name.clone(),
            department: doctor.department.clone(),
            entry_code: doctor.entry_code.as_str().to_owned(),
            qr_payload,
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterRes {
            hospital_id: hospital.hospital_id.to_string(),
            hospital_name: hospital.hospital_name,
            doctors,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState::new(&CoreConfig::default()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn join_req(name: &str, code: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/queue/join")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "name": name, "entryCode": code }).to_string(),
            ))
            .expect("request")
    }

    fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn join_then_position_and_stats() {
        let app = test_app();

        let res = app.clone().oneshot(join_req("Alice", "DOC001")).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let join = body_json(res).await;
        assert_eq!(join["position"], 1);
        assert_eq!(join["estimatedWait"], 15);

        let res = app
            .clone()
            .oneshot(get_req("/queue/position/Alice"))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["position"], 1);

        // Unknown name: 0 sentinel in-band, not an error.
        let res = app
            .clone()
            .oneshot(get_req("/queue/position/Nobody"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["position"], 0);

        let res = app.clone().oneshot(get_req("/stats")).await.unwrap();
        let stats = body_json(res).await;
        assert_eq!(stats["totalPatients"], 1);
        assert_eq!(stats["patientsServed"], 0);
        assert_eq!(stats["efficiency"], 0);
    }

    #[tokio::test]
    async fn join_rejects_empty_fields_at_the_boundary() {
        let app = test_app();

        let res = app.clone().oneshot(join_req("  ", "DOC001")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app.clone().oneshot(join_req("Alice", "")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        // Nothing reached the engine.
        let res = app.clone().oneshot(get_req("/queue")).await.unwrap();
        assert!(body_json(res).await["patients"]
            .as_array()
            .expect("array")
            .is_empty());
    }

    #[tokio::test]
    async fn call_next_advances_and_guards_empty_queue() {
        let app = test_app();

        let res = app.clone().oneshot(post("/queue/next")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let guard = body_json(res).await;
        assert!(guard["patient"].is_null());
        assert_eq!(guard["message"], NO_PATIENTS_MESSAGE);

        app.clone().oneshot(join_req("Alice", "X1")).await.unwrap();
        app.clone().oneshot(join_req("Bob", "X1")).await.unwrap();

        let res = app.clone().oneshot(post("/queue/next")).await.unwrap();
        let called = body_json(res).await;
        assert_eq!(called["patient"]["name"], "Alice");

        let res = app.clone().oneshot(get_req("/queue/current")).await.unwrap();
        assert_eq!(body_json(res).await["patient"]["name"], "Alice");

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/queue/current")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(res).await["success"], true);

        let res = app.clone().oneshot(get_req("/queue/current")).await.unwrap();
        assert!(body_json(res).await["patient"].is_null());
    }

    #[tokio::test]
    async fn skip_cycles_head_to_tail() {
        let app = test_app();
        app.clone().oneshot(join_req("A", "Z0")).await.unwrap();
        app.clone().oneshot(join_req("B", "Z0")).await.unwrap();

        let res = app.clone().oneshot(post("/queue/skip")).await.unwrap();
        assert_eq!(body_json(res).await["success"], true);

        let res = app.clone().oneshot(get_req("/queue")).await.unwrap();
        let queue = body_json(res).await;
        let patients = queue["patients"].as_array().expect("array");
        assert_eq!(patients[0]["name"], "B");
        assert_eq!(patients[1]["name"], "A");
        assert_eq!(patients[1]["status"], "skipped");
        assert_eq!(patients[1]["position"], 2);
    }

    #[tokio::test]
    async fn pause_toggles_but_does_not_block_joins() {
        let app = test_app();

        let res = app.clone().oneshot(post("/queue/pause")).await.unwrap();
        assert_eq!(body_json(res).await["paused"], true);

        let res = app.clone().oneshot(join_req("Alice", "X1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app.clone().oneshot(post("/queue/pause")).await.unwrap();
        assert_eq!(body_json(res).await["paused"], false);
    }

    #[tokio::test]
    async fn registration_generates_codes_and_payloads() {
        let app = test_app();
        let req = Request::builder()
            .method("POST")
            .uri("/registration")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "hospitalName": "City General",
                    "doctors": [
                        { "name": "Dr. Sarah Johnson", "department": "Cardiology" }
                    ]
                })
                .to_string(),
            ))
            .unwrap();

        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let registered = body_json(res).await;
        let doctor = &registered["doctors"][0];
        assert_eq!(doctor["entryCode"].as_str().expect("code").len(), 6);

        let payload: serde_json::Value =
            serde_json::from_str(doctor["qrPayload"].as_str().expect("payload")).expect("json");
        assert_eq!(payload["hospitalName"], "City General");
        assert_eq!(payload["entryCode"], doctor["entryCode"]);

        // Missing doctors list is a boundary rejection.
        let req = Request::builder()
            .method("POST")
            .uri("/registration")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "hospitalName": "City General", "doctors": [] }).to_string(),
            ))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_is_alive() {
        let app = test_app();
        let res = app.clone().oneshot(get_req("/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["ok"], true);
    }
}
