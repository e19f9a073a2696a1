// queue-client/tests/http_backend.rs
// Client, poller and session against an in-process fake backend

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use queue_client::{
    Action, ClientConfig, ClientError, OperatorSession, QueueHttpClient, SnapshotPoller,
};
use queue_core::{EmployeeCreate, EmployeeRole, ErrorCode, SnapshotError, TicketStatus};

const TOKEN: &str = "test-token";

// ============================================================================
// Fake backend
// ============================================================================

struct FakeBackend {
    tickets: Mutex<Vec<Value>>,
    tables: Vec<Value>,
    commands: Mutex<Vec<String>>,
    registrations: AtomicUsize,
    deleted: Mutex<Vec<i64>>,
}

impl FakeBackend {
    fn new(tickets: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            tickets: Mutex::new(tickets),
            tables: vec![
                json!({"id": 1, "number": 1, "status": "FREE"}),
                json!({"id": 2, "number": 2, "status": "OCCUPIED", "employee": {"id": 8}}),
            ],
            commands: Mutex::new(Vec::new()),
            registrations: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
        })
    }

    fn standard() -> Arc<Self> {
        Self::new(vec![
            json!({"id": 1, "status": "PENDING", "createdAt": "2025-01-17T08:00:00"}),
            json!({
                "id": 2, "status": "PENDING", "createdAt": "2025-01-17T08:10:00",
                "timeSlot": {"slotTime": "08:05:00"}
            }),
            json!({
                "id": 3, "status": "CALLED", "createdAt": "2025-01-17T07:50:00",
                "calledAt": "2025-01-17T08:20:00", "table": {"id": 2, "number": 2}
            }),
        ])
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token missing"})),
    )
        .into_response()
}

async fn queue_all(State(b): State<Arc<FakeBackend>>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let tickets = b.tickets.lock().unwrap().clone();
    Json(tickets).into_response()
}

async fn table_all(State(b): State<Arc<FakeBackend>>) -> Json<Vec<Value>> {
    Json(b.tables.clone())
}

async fn dispatch(
    State(b): State<Arc<FakeBackend>>,
    Path((id, action)): Path<(i64, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let Some(table_id) = query.get("tableId").and_then(|v| v.parse::<i64>().ok()) else {
        return (StatusCode::BAD_REQUEST, "tableId required").into_response();
    };
    let mut tickets = b.tickets.lock().unwrap();
    let Some(ticket) = tickets.iter_mut().find(|t| t["id"] == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Ticket not found"})),
        )
            .into_response();
    };
    let status = ticket["status"].as_str().unwrap_or_default().to_string();
    let next = match (action.as_str(), status.as_str()) {
        ("call", "PENDING") => "CALLED",
        ("call", _) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({"code": 4002, "message": "Ticket is not waiting"})),
            )
                .into_response();
        }
        ("recall", "CALLED" | "RE_CALLED") => "RE_CALLED",
        ("arrived", "CALLED" | "RE_CALLED") => "ARRIVED",
        ("noShow", "CALLED" | "RE_CALLED") => "NO_SHOW",
        ("served", "ARRIVED") => "SERVED",
        _ => {
            return (
                StatusCode::CONFLICT,
                Json(json!({"message": "Transition not allowed"})),
            )
                .into_response();
        }
    };
    ticket["status"] = json!(next);
    ticket["table"] = json!({"id": table_id, "number": table_id});
    if next == "CALLED" {
        ticket["calledAt"] = json!("2025-01-17T09:00:00");
    }
    b.commands
        .lock()
        .unwrap()
        .push(format!("{}/{}/{}", id, action, table_id));
    StatusCode::OK.into_response()
}

async fn employee_all() -> Json<Value> {
    Json(json!([
        {
            "id": 1, "lastName": "Petrov", "firstName": "Ivan", "middleName": "Sergeevich",
            "email": "admin@example.com", "phone": "100", "role": {"id": 2, "name": "ADMIN"},
            "isOnline": true
        },
        {
            "id": 5, "lastName": "Smirnova", "firstName": "Olga",
            "email": "olga@example.com", "phone": "105", "role": {"name": "EMPLOYEE"}
        }
    ]))
}

async fn employee_delete(State(b): State<Arc<FakeBackend>>, Path(id): Path<i64>) -> StatusCode {
    b.deleted.lock().unwrap().push(id);
    StatusCode::NO_CONTENT
}

async fn register(State(b): State<Arc<FakeBackend>>, Json(payload): Json<Value>) -> Json<Value> {
    b.registrations.fetch_add(1, Ordering::SeqCst);
    let role_name = if payload["role"] == 2 { "ADMIN" } else { "EMPLOYEE" };
    Json(json!({
        "id": 10,
        "lastName": payload["lastName"],
        "firstName": payload["firstName"],
        "middleName": payload["middleName"],
        "email": payload["email"],
        "phone": payload["phone"],
        "role": {"id": payload["role"], "name": role_name},
    }))
}

async fn spawn_backend(backend: Arc<FakeBackend>) -> String {
    let app = Router::new()
        .route("/api/v1/employee/queue/all", get(queue_all))
        .route("/api/v1/employee/table/all", get(table_all))
        .route("/api/v1/employee/queue/{id}/{action}", post(dispatch))
        .route("/api/v1/employee/employee/all", get(employee_all))
        .route("/api/v1/employee/employee/{id}", delete(employee_delete))
        .route("/api/v1/auth/register", post(register))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> QueueHttpClient {
    QueueHttpClient::new(&ClientConfig::new(base_url).with_token(TOKEN)).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_snapshot() {
    let base = spawn_backend(FakeBackend::standard()).await;
    let snapshot = client(&base).fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.tickets().len(), 3);
    assert_eq!(snapshot.tables().len(), 2);
    assert_eq!(snapshot.ticket(3).unwrap().table_id, Some(2));
    assert_eq!(snapshot.table(2).unwrap().assigned_operator_id, Some(8));
    assert!(snapshot.ticket(2).unwrap().slot_time.is_some());
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let base = spawn_backend(FakeBackend::standard()).await;
    let anonymous = QueueHttpClient::new(&ClientConfig::new(&base)).unwrap();
    assert!(matches!(
        anonymous.fetch_snapshot().await,
        Err(ClientError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_malformed_snapshot_is_rejected() {
    let backend = FakeBackend::new(vec![json!({
        "id": 1, "status": "CALLED", "createdAt": "2025-01-17T08:00:00",
        "table": {"id": 9, "number": 9}
    })]);
    let base = spawn_backend(backend).await;

    match client(&base).fetch_snapshot().await {
        Err(ClientError::Snapshot(SnapshotError::UnknownTableReference { ticket_id, table_id })) => {
            assert_eq!((ticket_id, table_id), (1, 9));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_backend_error_code_is_surfaced() {
    let base = spawn_backend(FakeBackend::standard()).await;
    let command = queue_core::Command {
        action: Action::Call,
        ticket_id: 3,
        table_id: 2,
    };

    match client(&base).dispatch(&command).await {
        Err(ClientError::Api(err)) => {
            assert_eq!(err.code, ErrorCode::TicketNotPending);
            assert_eq!(err.message, "Ticket is not waiting");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_operator_serves_a_ticket_end_to_end() {
    let backend = FakeBackend::standard();
    let base = spawn_backend(backend.clone()).await;
    let http = client(&base);

    let shutdown = CancellationToken::new();
    let poller = SnapshotPoller::spawn(http.clone(), Duration::from_secs(60), shutdown.clone());
    let mut rx = poller.subscribe();
    let wait = Duration::from_secs(5);

    tokio::time::timeout(wait, rx.changed()).await.unwrap().unwrap();
    let mut session = OperatorSession::new(7, http);
    session.ingest(rx.borrow_and_update().clone());

    // table 2 belongs to operator 8
    assert_eq!(
        session
            .claimable_tables()
            .iter()
            .map(|t| t.id)
            .collect::<Vec<_>>(),
        vec![1]
    );
    session.claim(1).unwrap();

    // walk-in at 08:00 goes before the 08:05 slot
    let pending: Vec<_> = session.partition().pending.iter().map(|t| t.id).collect();
    assert_eq!(pending, vec![1, 2]);
    assert!(session.partition().called.is_empty());

    let command = session.call_next().await.unwrap();
    assert_eq!((command.ticket_id, command.table_id), (1, 1));

    for action in [Action::Arrived, Action::Served] {
        poller.refresh();
        tokio::time::timeout(wait, rx.changed()).await.unwrap().unwrap();
        session.ingest(rx.borrow_and_update().clone());
        session.perform(action, 1).await.unwrap();
    }

    poller.refresh();
    tokio::time::timeout(wait, rx.changed()).await.unwrap().unwrap();
    session.ingest(rx.borrow_and_update().clone());
    assert_eq!(
        session.snapshot().ticket(1).unwrap().status,
        TicketStatus::Served
    );
    assert!(session.available_actions(1).is_empty());

    assert_eq!(
        *backend.commands.lock().unwrap(),
        vec!["1/call/1", "1/arrived/1", "1/served/1"]
    );

    shutdown.cancel();
    poller.join().await;
}

#[tokio::test]
async fn test_employee_api() {
    let backend = FakeBackend::standard();
    let base = spawn_backend(backend.clone()).await;
    let http = client(&base);

    let employees = http.list_employees().await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].full_name(), "Petrov Ivan Sergeevich");
    assert_eq!(employees[0].role, EmployeeRole::Admin);
    assert_eq!(employees[1].badge(), "Employee #5");

    let mut payload = EmployeeCreate {
        last_name: "Kuznetsov".into(),
        first_name: "Pavel".into(),
        middle_name: String::new(),
        phone: "+7 900 123 45 67".into(),
        email: "pavel@example.com".into(),
        password: "12345".into(),
        role: EmployeeRole::Employee,
    };
    match http.register_employee(&payload).await {
        Err(ClientError::Api(err)) => assert_eq!(err.code, ErrorCode::PasswordTooShort),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(backend.registrations.load(Ordering::SeqCst), 0);

    payload.password = "123456".into();
    let created = http.register_employee(&payload).await.unwrap();
    assert_eq!(created.id, 10);
    assert_eq!(created.role, EmployeeRole::Employee);
    assert_eq!(backend.registrations.load(Ordering::SeqCst), 1);

    match http.delete_employee(1).await {
        Err(err) => assert_eq!(err.code(), ErrorCode::CannotDeleteAdmin),
        Ok(()) => panic!("primary admin must not be deletable"),
    }
    http.delete_employee(5).await.unwrap();
    assert_eq!(*backend.deleted.lock().unwrap(), vec![5]);
}
