//! Runs the real clients against an in-process fake of both backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api::{fetch_lookups, login_error_message, ApiClient, Backend, LoggedUser};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{
    ApiConfig, ConsoleConfig, CreateUsuarioRequest, LookupKind, RawId, Session, SessionStore,
    UpdateUsuarioRequest,
};

const TOKEN: &str = "jwt-123";

#[derive(Clone, Default)]
struct Fake {
    last_login: Arc<Mutex<Option<Value>>>,
    last_create: Arc<Mutex<Option<Value>>>,
    last_update: Arc<Mutex<Option<(String, Value)>>>,
    deleted: Arc<Mutex<Vec<String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn authenticate(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    *fake.last_login.lock().unwrap() = Some(body.clone());
    if body["password"] == "secret" {
        Json(json!({
            "token": TOKEN,
            "fechaExpiracion": "2099-01-01T00:00:00",
            "userId": 17
        }))
        .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn profile(Path(id): Path<String>) -> Response {
    if id != "17" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "rank": "CAP",
        "lastName": "Pérez",
        "firstName": "Juan",
        "organization": "Armada",
        "unit": "Base Norte"
    }))
    .into_response()
}

async fn list_usuarios(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        { "id": 1, "logon": "jperez", "matriculaRevista": 1234567, "apellido": "Pérez", "nombre": "Juan", "jerarquiaId": 2 },
        { "idUsuarioMinidoc": "2", "userName": "mgomez", "apellido": "Gómez", "nombre": "María" }
    ]))
    .into_response()
}

async fn create_usuario(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    *fake.last_create.lock().unwrap() = Some(body);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "title": "One or more validation errors occurred.",
            "status": 400,
            "errors": {
                "MatriculaRevista": ["La matrícula ya está registrada"],
                "Logon": "El logon ya existe"
            }
        })),
    )
        .into_response()
}

async fn get_usuario(Path(id): Path<String>) -> Response {
    if id == "1" {
        Json(json!({ "id": 1, "logon": "jperez", "apellido": "Pérez", "nombre": "Juan" })).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Usuario no encontrado" }))).into_response()
    }
}

async fn update_usuario(
    State(fake): State<Fake>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    *fake.last_update.lock().unwrap() = Some((id.clone(), body.clone()));
    match id.as_str() {
        "1" => Json(json!({ "id": 1, "apellido": body["Apellido"], "nombre": body["Nombre"] })).into_response(),
        "2" => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "title": "One or more validation errors occurred.",
                "status": 400,
                "errors": { "Apellido": ["El apellido es obligatorio"] }
            })),
        )
            .into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn delete_usuario(State(fake): State<Fake>, Path(id): Path<String>) -> StatusCode {
    fake.deleted.lock().unwrap().push(id);
    StatusCode::NO_CONTENT
}

async fn jerarquias() -> Json<Value> {
    Json(json!([
        { "idJerarquia": "3", "nombre": "Capitán", "iniciales": "CAP" },
        { "nombre": "sin id" }
    ]))
}

async fn escalafones() -> Json<Value> {
    Json(json!([{ "idEscalafo": 5, "letra": "A", "descripcion": "Administrativo" }]))
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn empty_table() -> Json<Value> {
    Json(json!([]))
}

async fn serve(fake: Fake) -> String {
    let router = Router::new()
        .route("/api/v1.0/users/authenticate", post(authenticate))
        .route("/api/v1.0/users/{id}", get(profile))
        .route("/api/UsuarioMinidoc", get(list_usuarios).post(create_usuario))
        .route(
            "/api/UsuarioMinidoc/{id}",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
        .route("/api/Jerarquia", get(jerarquias))
        .route("/api/Escalafon", get(escalafones))
        .route("/api/Destino", get(broken))
        .route("/api/Nivel", get(empty_table))
        .route("/api/Alcance", get(empty_table))
        .route("/api/Cuerpo", get(empty_table))
        .route("/api/TipoClasificacion", get(empty_table))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn config(base: &str) -> ConsoleConfig {
    ConsoleConfig {
        api: ApiConfig {
            minidoc_url: base.to_string(),
            auth_url: base.to_string(),
            ..ApiConfig::default()
        },
        ..ConsoleConfig::default()
    }
}

fn stale_session() -> Session {
    Session {
        token: "stale".into(),
        expires_at: "2099-01-01T00:00:00Z".into(),
        user_id: "9".into(),
    }
}

#[tokio::test]
async fn test_login_stores_session_and_authorizes_requests() {
    let fake = Fake::default();
    let base = serve(fake.clone()).await;
    let session = SessionStore::in_memory();
    let backend = Backend::new(&config(&base), session.clone(), || {}).unwrap();

    let auth = backend.auth.login("jperez", "secret").await.unwrap();
    assert_eq!(auth.token, TOKEN);

    let sent = fake.last_login.lock().unwrap().clone().unwrap();
    assert_eq!(sent["logon"], "jperez");
    assert_eq!(sent["instanceUri"], "/api/v1.0/users/authenticate");

    assert_eq!(session.token().as_deref(), Some(TOKEN));
    assert_eq!(session.user_id().as_deref(), Some("17"));
    assert!(backend.auth.is_authenticated());

    let profile = backend.auth.user_data("17").await.unwrap();
    let user = LoggedUser::new("jperez", &auth, profile);
    assert_eq!(user.greeting_name(), "CAP Pérez Juan");

    let usuarios = backend.usuarios.get_all().await.unwrap();
    assert_eq!(usuarios.len(), 2);
    assert_eq!(usuarios[1].key(), Some(&RawId::from("2")));
    assert_eq!(usuarios[1].logon_name(), Some("mgomez"));
}

#[tokio::test]
async fn test_bad_credentials_do_not_touch_session() {
    let base = serve(Fake::default()).await;
    let session = SessionStore::in_memory();
    session.save(&stale_session()).unwrap();
    let backend = Backend::new(&config(&base), session.clone(), || {}).unwrap();

    let err = backend.auth.login("jperez", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(
        login_error_message(&err),
        "Credenciales inválidas. Verifique su usuario y contraseña."
    );
    assert_eq!(session.token().as_deref(), Some("stale"));
}

#[tokio::test]
async fn test_minidoc_401_clears_session_and_runs_hook() {
    let base = serve(Fake::default()).await;
    let session = SessionStore::in_memory();
    session.save(&stale_session()).unwrap();

    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = redirects.clone();
    let backend = Backend::new(&config(&base), session.clone(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    let err = backend.usuarios.get_all().await.unwrap_err();
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Error al cargar usuarios");
    assert!(session.load().is_none());
    assert_eq!(redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_create_surfaces_validation_errors_in_order() {
    let fake = Fake::default();
    let base = serve(fake.clone()).await;
    let backend = Backend::new(&config(&base), SessionStore::in_memory(), || {}).unwrap();

    let request = CreateUsuarioRequest {
        logon: "jperez".into(),
        password: "secreto".into(),
        password_confirmation: "secreto".into(),
        matricula_revista: "1234567".into(),
        apellido: "Pérez".into(),
        nombre: "Juan".into(),
        jerarquia_id: 3,
        destino_id: None,
        nivel_id: 1,
        id_tipo_clasificacion: 2,
        id_escalafon: Some(5),
        id_cuerpo: None,
        confianza: true,
        super_confianza: false,
    };
    let err = backend.usuarios.create(&request).await.unwrap_err();

    assert_eq!(err.message, "La matrícula ya está registrada");
    assert_eq!(err.status, Some(400));
    let fields: Vec<&str> = err.field_errors.iter().map(|(f, _)| f.as_str()).collect();
    assert_eq!(fields, vec!["MatriculaRevista", "Logon"]);
    assert_eq!(err.field_errors[1].1, vec!["El logon ya existe".to_string()]);

    let sent = fake.last_create.lock().unwrap().clone().unwrap();
    assert_eq!(sent["Logon"], "jperez");
    assert_eq!(sent["JerarquiaId"], 3);
    assert_eq!(sent["DestinoId"], Value::Null);
    assert_eq!(sent["SuperConfianza"], false);
}

fn update_request(apellido: &str) -> UpdateUsuarioRequest {
    UpdateUsuarioRequest {
        matricula_revista: "1234567".into(),
        apellido: apellido.into(),
        nombre: "Juan".into(),
        jerarquia_id: 3,
        destino_id: Some(10),
        nivel_id: 1,
        id_tipo_clasificacion: 2,
        id_escalafon: None,
        id_cuerpo: Some(4),
        confianza: false,
        super_confianza: true,
    }
}

#[tokio::test]
async fn test_update_sends_pascal_case_body() {
    let fake = Fake::default();
    let base = serve(fake.clone()).await;
    let backend = Backend::new(&config(&base), SessionStore::in_memory(), || {}).unwrap();

    let updated = backend
        .usuarios
        .update(&RawId::from(1), &update_request("Pérez"))
        .await
        .unwrap();
    assert_eq!(updated["apellido"], "Pérez");

    let (id, sent) = fake.last_update.lock().unwrap().clone().unwrap();
    assert_eq!(id, "1");
    assert_eq!(sent["MatriculaRevista"], "1234567");
    assert_eq!(sent["JerarquiaId"], 3);
    assert_eq!(sent["DestinoId"], 10);
    assert_eq!(sent["IdEscalafon"], Value::Null);
    assert_eq!(sent["IdCuerpo"], 4);
    assert_eq!(sent["SuperConfianza"], true);
    // Credentials are never part of an update
    assert!(sent.get("Logon").is_none());
    assert!(sent.get("Password").is_none());
}

#[tokio::test]
async fn test_update_failures() {
    let base = serve(Fake::default()).await;
    let backend = Backend::new(&config(&base), SessionStore::in_memory(), || {}).unwrap();

    let err = backend
        .usuarios
        .update(&RawId::from("2"), &update_request(""))
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "El apellido es obligatorio");
    assert_eq!(err.field_errors[0].0, "Apellido");

    let err = backend
        .usuarios
        .update(&RawId::from(3), &update_request("Pérez"))
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "Error al actualizar usuario");
}

#[tokio::test]
async fn test_get_by_id_and_delete() {
    let fake = Fake::default();
    let base = serve(fake.clone()).await;
    let backend = Backend::new(&config(&base), SessionStore::in_memory(), || {}).unwrap();

    let usuario = backend.usuarios.get_by_id(&RawId::from(1)).await.unwrap();
    assert_eq!(usuario.full_name(), "Pérez, Juan");

    let err = backend.usuarios.get_by_id(&RawId::from(99)).await.unwrap_err();
    assert_eq!(err.message, "Usuario no encontrado");

    backend.usuarios.delete(&RawId::from(1)).await.unwrap();
    assert_eq!(*fake.deleted.lock().unwrap(), vec!["1".to_string()]);
}

#[tokio::test]
async fn test_lookups_degrade_per_table() {
    let base = serve(Fake::default()).await;
    let client = ApiClient::minidoc(&config(&base).api, SessionStore::in_memory()).unwrap();

    let load = fetch_lookups(&client).await;
    assert!(!load.all_failed());
    assert_eq!(load.failed.len(), 1);
    assert_eq!(load.failed[0].0, LookupKind::Destinos);

    let cache = &load.cache;
    assert_eq!(cache.entries(LookupKind::Jerarquias).len(), 1);
    assert_eq!(cache.detail_by_id(LookupKind::Jerarquias, &RawId::from(3)), "Capitán");
    assert_eq!(cache.detail_by_id(LookupKind::Escalafones, &RawId::from("5")), "A");
    assert!(!cache.has_data(LookupKind::Destinos));
    assert_eq!(cache.counts().total, 2);
}

#[tokio::test]
async fn test_unreachable_backend_fails_every_table() {
    // Nothing listens on port 9 on loopback
    let client = ApiClient::minidoc(
        &ApiConfig {
            minidoc_url: "http://127.0.0.1:9/api".into(),
            ..ApiConfig::default()
        },
        SessionStore::in_memory(),
    )
    .unwrap();

    let load = fetch_lookups(&client).await;
    assert!(load.all_failed());
    assert!(load.cache.is_empty());
}
