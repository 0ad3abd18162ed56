//! End-to-end tests over real HTTP.
//!
//! # Design
//! The scripted stub server answers with canned responses and records every
//! request, which covers status classification and header injection. The
//! in-memory todo server covers a full CRUD lifecycle. Both run on random
//! ports from background threads while the blocking client calls them.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};

use mock_server::stub::{RecordedRequest, Stub};
use todo_api_client::{ApiError, Either, Task, TodoApiClient};

const TASKS_RESPONSE: &str = include_str!("fixtures/get_tasks_response.json");
const TASK_RESPONSE: &str = include_str!("fixtures/get_task_by_id_response.json");
const ADD_TASK_REQUEST: &str = include_str!("fixtures/add_task_request.json");

/// Start a stub server and a client pointed at it.
fn stubbed() -> (Stub, TodoApiClient) {
    let stub = Stub::new();
    let addr = mock_server::spawn(stub.router()).unwrap();
    (stub, TodoApiClient::with_base_url(&format!("http://{addr}/")))
}

fn only_request(stub: &Stub) -> RecordedRequest {
    let mut requests = stub.requests();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

/// Serve one connection with a hand-written response, bypassing axum so the
/// body can be anything, including bytes that are not UTF-8.
fn raw_server(response: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response).unwrap();
    });
    addr
}

fn kata_task() -> Task {
    Task::new("1", "2", "Finish this kata", false)
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

#[test]
fn every_operation_sends_accept_and_content_type_headers() {
    let (stub, api) = stubbed();
    for _ in 0..5 {
        stub.enqueue(200, "");
    }

    let _ = api.list_all();
    let _ = api.get_by_id("1");
    let _ = api.create(&kata_task());
    let _ = api.update_by_id(&kata_task());
    let _ = api.delete_by_id("1");

    let requests = stub.requests();
    assert_eq!(requests.len(), 5);
    for req in &requests {
        assert_eq!(req.header("Accept"), Some("application/json"), "{} {}", req.method, req.path);
        assert_eq!(req.header("Content-Type"), Some("application/json"), "{} {}", req.method, req.path);
    }
}

// ---------------------------------------------------------------------------
// list_all
// ---------------------------------------------------------------------------

#[test]
fn list_all_sends_get_to_todos() {
    let (stub, api) = stubbed();
    stub.enqueue(200, TASKS_RESPONSE);

    let _ = api.list_all();

    let req = only_request(&stub);
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/todos");
}

#[test]
fn list_all_parses_every_task() {
    let (stub, api) = stubbed();
    stub.enqueue(200, TASKS_RESPONSE);

    let tasks = api.list_all().into_value().unwrap();

    assert_eq!(tasks.len(), 200);
    assert_eq!(tasks[0], Task::new("1", "1", "delectus aut autem", false));
}

#[test]
fn list_all_with_empty_success_body_is_unknown() {
    let (stub, api) = stubbed();
    stub.enqueue(200, "");

    assert_eq!(api.list_all(), Either::failure(ApiError::Unknown(200)));
}

#[test]
fn list_all_teapot_is_unknown_418() {
    let (stub, api) = stubbed();
    stub.enqueue(418, "");

    assert_eq!(api.list_all(), Either::failure(ApiError::Unknown(418)));
}

// ---------------------------------------------------------------------------
// get_by_id
// ---------------------------------------------------------------------------

#[test]
fn get_by_id_sends_get_to_task_path() {
    let (stub, api) = stubbed();
    stub.enqueue(200, TASK_RESPONSE);

    let task = api.get_by_id("1");

    assert_eq!(task, Either::success(Task::new("1", "1", "delectus aut autem", false)));
    let req = only_request(&stub);
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/todos/1");
}

#[test]
fn get_by_id_missing_task_is_not_found() {
    let (stub, api) = stubbed();
    stub.enqueue(404, "");

    assert_eq!(api.get_by_id("1"), Either::failure(ApiError::NotFound));
}

#[test]
fn get_by_id_not_found_ignores_an_error_body() {
    let (stub, api) = stubbed();
    stub.enqueue(404, TASK_RESPONSE);

    assert_eq!(api.get_by_id("1"), Either::failure(ApiError::NotFound));
}

#[test]
fn get_by_id_teapot_is_unknown_418() {
    let (stub, api) = stubbed();
    stub.enqueue(418, "");

    assert_eq!(api.get_by_id("1").into_error(), Some(ApiError::Unknown(418)));
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[test]
fn create_posts_the_serialized_task() {
    let (stub, api) = stubbed();
    stub.enqueue(201, ADD_TASK_REQUEST);

    let _ = api.create(&kata_task());

    let req = only_request(&stub);
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/todos");
    let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    let expected: serde_json::Value = serde_json::from_str(ADD_TASK_REQUEST).unwrap();
    assert_eq!(sent, expected);
}

#[test]
fn create_returns_the_echoed_task() {
    let (stub, api) = stubbed();
    stub.enqueue(201, ADD_TASK_REQUEST);

    assert_eq!(api.create(&kata_task()), Either::success(kata_task()));
}

#[test]
fn create_teapot_is_unknown_418() {
    let (stub, api) = stubbed();
    stub.enqueue(418, "");

    assert_eq!(api.create(&kata_task()), Either::failure(ApiError::Unknown(418)));
}

// ---------------------------------------------------------------------------
// update_by_id
// ---------------------------------------------------------------------------

#[test]
fn update_by_id_puts_to_the_task_path() {
    let (stub, api) = stubbed();
    stub.enqueue(200, ADD_TASK_REQUEST);

    let updated = api.update_by_id(&kata_task());

    assert_eq!(updated, Either::success(kata_task()));
    let req = only_request(&stub);
    assert_eq!(req.method, "PUT");
    assert_eq!(req.path, "/todos/1");
    let sent: Task = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent, kata_task());
}

#[test]
fn update_by_id_missing_task_is_not_found() {
    let (stub, api) = stubbed();
    stub.enqueue(404, "");

    assert_eq!(api.update_by_id(&kata_task()), Either::failure(ApiError::NotFound));
}

#[test]
fn update_by_id_teapot_is_unknown_418() {
    let (stub, api) = stubbed();
    stub.enqueue(418, "");

    assert_eq!(api.update_by_id(&kata_task()), Either::failure(ApiError::Unknown(418)));
}

// ---------------------------------------------------------------------------
// delete_by_id
// ---------------------------------------------------------------------------

#[test]
fn delete_by_id_with_empty_success_body_succeeds() {
    let (stub, api) = stubbed();
    stub.enqueue(200, "");

    let outcome = api.delete_by_id("1");

    assert_eq!(outcome, Either::success(()));
    assert_eq!(outcome.error(), None);
    let req = only_request(&stub);
    assert_eq!(req.method, "DELETE");
    assert_eq!(req.path, "/todos/1");
}

#[test]
fn delete_by_id_missing_task_is_not_found() {
    let (stub, api) = stubbed();
    stub.enqueue(404, "");

    assert_eq!(api.delete_by_id("1").error(), Some(&ApiError::NotFound));
}

#[test]
fn delete_by_id_teapot_is_unknown_418() {
    let (stub, api) = stubbed();
    stub.enqueue(418, "");

    assert_eq!(api.delete_by_id("1").error(), Some(&ApiError::Unknown(418)));
}

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

#[test]
fn unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = TodoApiClient::with_base_url(&format!("http://{addr}"));

    assert_eq!(api.list_all(), Either::failure(ApiError::Network));
    assert_eq!(api.get_by_id("1"), Either::failure(ApiError::Network));
    assert_eq!(api.create(&kata_task()), Either::failure(ApiError::Network));
    assert_eq!(api.update_by_id(&kata_task()), Either::failure(ApiError::Network));
    assert_eq!(api.delete_by_id("1"), Either::failure(ApiError::Network));
}

#[test]
fn not_found_with_non_utf8_body_is_not_found() {
    let addr = raw_server(b"HTTP/1.1 404 Not Found\r\nContent-Length: 3\r\nConnection: close\r\n\r\n\xff\xfe\xfd");
    let api = TodoApiClient::with_base_url(&format!("http://{addr}"));

    assert_eq!(api.get_by_id("1"), Either::failure(ApiError::NotFound));
}

#[test]
fn success_with_non_utf8_body_is_unknown_with_received_status() {
    let addr = raw_server(b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\nConnection: close\r\n\r\n\xff\xfe\xfd");
    let api = TodoApiClient::with_base_url(&format!("http://{addr}"));

    assert_eq!(api.get_by_id("1"), Either::failure(ApiError::Unknown(200)));
}

#[test]
fn truncated_body_after_status_is_classified() {
    let addr = raw_server(b"HTTP/1.1 404 Not Found\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"error\"");
    let api = TodoApiClient::with_base_url(&format!("http://{addr}"));

    assert_eq!(api.get_by_id("1"), Either::failure(ApiError::NotFound));
}

#[test]
fn truncated_delete_response_is_still_a_success() {
    let addr = raw_server(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{}");
    let api = TodoApiClient::with_base_url(&format!("http://{addr}"));

    assert_eq!(api.delete_by_id("1"), Either::success(()));
}

// ---------------------------------------------------------------------------
// Lifecycle against the in-memory server
// ---------------------------------------------------------------------------

#[test]
fn crud_lifecycle() {
    let addr = mock_server::spawn(mock_server::app()).unwrap();
    let api = TodoApiClient::with_base_url(&format!("http://{addr}"));

    // list: empty
    assert_eq!(api.list_all(), Either::success(Vec::new()));

    // create
    let task = Task::new("7", "1", "Integration test", false);
    assert_eq!(api.create(&task), Either::success(task.clone()));

    // get
    assert_eq!(api.get_by_id("7"), Either::success(task.clone()));

    // update
    let finished = Task {
        is_finished: true,
        ..task.clone()
    };
    assert_eq!(api.update_by_id(&finished), Either::success(finished.clone()));
    assert_eq!(api.list_all(), Either::success(vec![finished]));

    // delete, then everything about the task is gone
    assert_eq!(api.delete_by_id("7"), Either::success(()));
    assert_eq!(api.get_by_id("7"), Either::failure(ApiError::NotFound));
    assert_eq!(api.delete_by_id("7"), Either::failure(ApiError::NotFound));
    assert_eq!(api.update_by_id(&task), Either::failure(ApiError::NotFound));
    assert_eq!(api.list_all(), Either::success(Vec::new()));
}

#[test]
fn client_is_usable_from_several_threads() {
    let addr = mock_server::spawn(mock_server::app()).unwrap();
    let api = TodoApiClient::with_base_url(&format!("http://{addr}"));

    std::thread::scope(|s| {
        for i in 0..4 {
            let api = &api;
            s.spawn(move || {
                let task = Task::new(i.to_string(), "1", format!("task {i}"), false);
                assert_eq!(api.create(&task), Either::success(task));
            });
        }
    });

    assert_eq!(api.list_all().into_value().map(|tasks| tasks.len()), Some(4));
}
