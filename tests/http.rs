//! Exercises the REST repository against a local axum stand-in for the
//! storefront's admin API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use milkstore_admin::domain::types::{ApiBaseUrl, VoucherCode, VoucherId};
use milkstore_admin::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use milkstore_admin::repository::errors::RepositoryError;
use milkstore_admin::repository::http::HttpVoucherRepository;
use milkstore_admin::repository::{VoucherListQuery, VoucherReader, VoucherWriter};

mod common;

use common::{date, seed};

#[derive(Default)]
struct BackendState {
    next_id: i32,
    vouchers: Vec<Voucher>,
    cookies: Vec<String>,
}

type Shared = Arc<Mutex<BackendState>>;

#[derive(Deserialize)]
struct ListParams {
    page: Option<usize>,
    limit: Option<usize>,
    search: Option<String>,
}

async fn list_vouchers(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    if let Some(cookie) = headers.get("cookie").and_then(|v| v.to_str().ok()) {
        state.cookies.push(cookie.to_string());
    }

    let matches: Vec<Voucher> = state
        .vouchers
        .iter()
        .filter(|v| match &params.search {
            Some(term) => v.code.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        })
        .cloned()
        .collect();
    let total = matches.len();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(1000);
    let items: Vec<Voucher> = matches
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    Json(json!({ "items": items, "totalItems": total }))
}

async fn create_voucher(
    State(state): State<Shared>,
    Json(draft): Json<NewVoucher>,
) -> Result<Json<Voucher>, (StatusCode, Json<Value>)> {
    let mut state = state.lock().unwrap();
    if state.vouchers.iter().any(|v| v.code == draft.code) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "message": "a voucher with this code already exists" })),
        ));
    }

    state.next_id += 1;
    let voucher = Voucher {
        id: VoucherId::new(state.next_id).expect("valid id"),
        code: draft.code,
        usage_limit: draft.usage_limit,
        used_count: 0,
        start_date: draft.start_date,
        end_date: draft.end_date,
        is_free_shipping: draft.is_free_shipping,
    };
    state.vouchers.push(voucher.clone());
    Ok(Json(voucher))
}

async fn get_voucher(
    State(state): State<Shared>,
    Path(id): Path<i32>,
) -> Result<Json<Voucher>, (StatusCode, Json<Value>)> {
    let state = state.lock().unwrap();
    state
        .vouchers
        .iter()
        .find(|v| v.id.get() == id)
        .cloned()
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "voucher not found" })),
        ))
}

async fn update_voucher(
    State(state): State<Shared>,
    Path(id): Path<i32>,
    Json(updates): Json<UpdateVoucher>,
) -> Result<Json<Voucher>, (StatusCode, Json<Value>)> {
    let mut state = state.lock().unwrap();
    let voucher = state.vouchers.iter_mut().find(|v| v.id.get() == id).ok_or((
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "voucher not found" })),
    ))?;
    voucher.usage_limit = updates.usage_limit;
    voucher.start_date = updates.start_date;
    voucher.end_date = updates.end_date;
    voucher.is_free_shipping = updates.is_free_shipping;
    Ok(Json(voucher.clone()))
}

async fn delete_voucher(
    State(state): State<Shared>,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut state = state.lock().unwrap();
    let before = state.vouchers.len();
    state.vouchers.retain(|v| v.id.get() != id);
    if state.vouchers.len() == before {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "voucher not found" })),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn app(state: Shared) -> Router {
    Router::new()
        .route("/vouchers", get(list_vouchers).post(create_voucher))
        .route(
            "/vouchers/:id",
            get(get_voucher).put(update_voucher).delete(delete_voucher),
        )
        .with_state(state)
}

/// Serves the fixture backend on its own thread and returns the base URL.
fn spawn_backend(state: Shared) -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind fixture server");
            tx.send(listener.local_addr().expect("local addr"))
                .expect("report addr");
            axum::serve(listener, app(state)).await.expect("serve");
        });
    });
    let addr: SocketAddr = rx.recv().expect("fixture server addr");
    format!("http://{addr}")
}

fn client(base: &str) -> HttpVoucherRepository {
    HttpVoucherRepository::new(ApiBaseUrl::new(base).expect("valid base url"))
        .expect("build client")
}

fn seeded_backend(count: usize) -> Shared {
    Arc::new(Mutex::new(BackendState {
        next_id: count as i32,
        vouchers: seed(count),
        cookies: Vec::new(),
    }))
}

#[test]
fn test_list_sends_pagination_and_search_parameters() {
    let state = seeded_backend(25);
    let base = spawn_backend(state.clone());
    let repo = client(&base);

    let (total, items) = repo
        .list(&VoucherListQuery::new().paginate(2, 10))
        .expect("list page 2");
    assert_eq!(total, 25);
    assert_eq!(items.len(), 10);
    assert_eq!(items[0].id.get(), 11);

    let (total, items) = repo
        .list(&VoucherListQuery::new().search("CODE2").paginate(1, 10))
        .expect("search");
    assert_eq!(total, 6);
    assert_eq!(items.len(), 6);
}

#[test]
fn test_create_then_get_by_id_round_trips() {
    let state = seeded_backend(0);
    let base = spawn_backend(state);
    let repo = client(&base);

    let draft = NewVoucher::new(
        VoucherCode::new("tet24").expect("valid code"),
        40,
        date(2024, 2, 1),
        date(2024, 2, 15),
        true,
    );
    let created = repo.create(&draft).expect("create");
    assert_eq!(created.code, "TET24");
    assert_eq!(created.used_count, 0);

    let fetched = repo
        .get_by_id(created.id)
        .expect("get")
        .expect("voucher exists");
    assert_eq!(fetched, created);

    let missing = repo
        .get_by_id(VoucherId::new(999).expect("valid id"))
        .expect("get");
    assert!(missing.is_none());
}

#[test]
fn test_server_rejection_surfaces_the_server_message() {
    let state = seeded_backend(1);
    let base = spawn_backend(state);
    let repo = client(&base);

    let draft = NewVoucher::new(
        VoucherCode::new("CODE01").expect("valid code"),
        10,
        date(2024, 3, 1),
        date(2024, 4, 1),
        false,
    );
    match repo.create(&draft) {
        Err(RepositoryError::Remote(message)) => {
            assert_eq!(message, "a voucher with this code already exists");
        }
        other => panic!("expected the server's message, got {other:?}"),
    }
}

#[test]
fn test_update_and_missing_update_behave() {
    let state = seeded_backend(1);
    let base = spawn_backend(state);
    let repo = client(&base);

    let id = VoucherId::new(1).expect("valid id");
    let updates = UpdateVoucher::new(77, date(2024, 6, 1), date(2024, 6, 30), true);
    let updated = repo.update(id, &updates).expect("update");
    assert_eq!(updated.usage_limit, 77);
    assert!(updated.is_free_shipping);

    let missing = repo.update(VoucherId::new(42).expect("valid id"), &updates);
    assert!(matches!(missing, Err(RepositoryError::NotFound)));
}

#[test]
fn test_delete_removes_the_record() {
    let state = seeded_backend(3);
    let base = spawn_backend(state);
    let repo = client(&base);

    let id = VoucherId::new(2).expect("valid id");
    repo.delete(id).expect("delete");

    let (total, items) = repo
        .list(&VoucherListQuery::new().paginate(1, 10))
        .expect("list");
    assert_eq!(total, 2);
    assert!(items.iter().all(|v| v.id != id));

    assert!(matches!(repo.delete(id), Err(RepositoryError::NotFound)));
}

#[test]
fn test_configured_session_cookie_travels_with_requests() {
    let state = seeded_backend(1);
    let base = spawn_backend(state.clone());
    let repo = HttpVoucherRepository::with_session(
        ApiBaseUrl::new(&base).expect("valid base url"),
        Some("session=tester"),
    )
    .expect("build client");

    repo.list(&VoucherListQuery::new().paginate(1, 10))
        .expect("list");

    let cookies = state.lock().unwrap().cookies.clone();
    assert!(cookies.iter().any(|c| c.contains("session=tester")));
}
