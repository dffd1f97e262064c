//! Mock Graph API server for testing
//!
//! An in-process HTTP server that keeps real test-user state, so the HTTP
//! client and the services can be exercised end to end:
//! - POST   /{app}/accounts/test-users          create
//! - GET    /{app}/accounts/test-users          list (cursor paged)
//! - DELETE /{app}/accounts/test-users?uid=ID   disassociate
//! - DELETE /{id}                               delete
//! - POST   /{id}                               update name/password
//! - POST   /{id}/friends/{other}               friend request / accept

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;

/// Mock Graph API server
pub struct MockGraphServer {
    port: u16,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<MockState>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behaviour switches for the mock
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub app_id: String,
    /// Token app-level calls must present
    pub app_token: String,
    /// Page size used when the client sends no `limit`
    pub page_size: usize,
    /// Answer `{"success": false}` to new friend requests
    pub fail_friend_requests: bool,
    /// Answer `{"success": false}` when accepting a pending request
    pub fail_friend_accepts: bool,
    /// Answer `{"success": false}` to deletes of existing users
    pub refuse_deletes: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            app_id: "1234".to_string(),
            app_token: "1234|secret".to_string(),
            page_size: 2,
            fail_friend_requests: false,
            fail_friend_accepts: false,
            refuse_deletes: false,
        }
    }
}

#[derive(Debug, Clone)]
struct MockUser {
    id: String,
    access_token: Option<String>,
    name: String,
    password: String,
    permissions: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    users: Vec<MockUser>,
    next_id: u64,
    pending: Vec<(String, String)>,
    friendships: Vec<(String, String)>,
    /// "METHOD /path" for every request served
    log: Vec<String>,
}

impl MockGraphServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let state = Arc::new(Mutex::new(MockState {
            next_id: 100_000,
            ..Default::default()
        }));

        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let state_clone = Arc::clone(&state);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = Arc::clone(&state_clone);
                        thread::spawn(move || handle_connection(stream, &cfg, &state));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            state,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests served so far, as "METHOD /path"
    pub fn request_log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn are_friends(&self, a: &str, b: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .friendships
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    pub fn has_pending_request(&self, from: &str, to: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .pending
            .iter()
            .any(|(x, y)| x == from && y == to)
    }

    pub fn user_name(&self, id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.users.iter().find(|u| u.id == id).map(|u| u.name.clone())
    }

    pub fn user_permissions(&self, id: &str) -> Option<Vec<String>> {
        let state = self.state.lock().unwrap();
        state.users.iter().find(|u| u.id == id).map(|u| u.permissions.clone())
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockGraphServer {
    fn drop(&mut self) {
        self.stop();
    }
}

struct MockRequest {
    method: String,
    path: String,
    params: HashMap<String, String>,
}

impl MockRequest {
    fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn token(&self) -> Option<&str> {
        self.param("access_token")
    }
}

fn read_request(stream: &mut TcpStream) -> Option<MockRequest> {
    stream.set_nonblocking(false).ok()?;
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 || line == "\r\n" || line == "\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target.clone(), String::new()),
    };

    let mut params: HashMap<String, String> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    params.extend(url::form_urlencoded::parse(&body).into_owned());

    Some(MockRequest {
        method,
        path,
        params,
    })
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, state: &Mutex<MockState>) {
    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, "Bad Request", &graph_error("Malformed request", 100));
        return;
    };

    let (status, body) = {
        let mut state = state.lock().unwrap();
        state.log.push(format!("{} {}", request.method, request.path));
        route(&request, config, &mut state)
    };

    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Error",
    };
    send_response(&mut stream, status, status_text, &body);
}

fn route(request: &MockRequest, config: &MockConfig, state: &mut MockState) -> (u16, String) {
    let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
    let app_collection = segments.len() == 3
        && segments[0] == config.app_id
        && segments[1] == "accounts"
        && segments[2] == "test-users";

    match (request.method.as_str(), segments.as_slice()) {
        ("POST", _) if app_collection => with_app_token(request, config, || create_user(request, state)),
        ("GET", _) if app_collection => with_app_token(request, config, || list_users(request, config, state)),
        ("DELETE", _) if app_collection => {
            with_app_token(request, config, || disassociate_user(request, state))
        }
        ("POST", [from, "friends", to]) => befriend(request, config, state, from, to),
        ("DELETE", [id]) => with_app_token(request, config, || delete_user(config, state, id)),
        ("POST", [id]) => with_app_token(request, config, || update_user(request, state, id)),
        _ => (404, graph_error("Unknown path components", 2500)),
    }
}

fn with_app_token<F>(request: &MockRequest, config: &MockConfig, f: F) -> (u16, String)
where
    F: FnOnce() -> (u16, String),
{
    if request.token() != Some(config.app_token.as_str()) {
        return (400, graph_error("Invalid OAuth access token.", 190));
    }
    f()
}

fn create_user(request: &MockRequest, state: &mut MockState) -> (u16, String) {
    state.next_id += 1;
    let id = state.next_id.to_string();
    // The platform installs the app unless told otherwise
    let installed = request.param("installed") != Some("false");
    let permissions = request
        .param("permissions")
        .map(|p| p.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    let name = request.param("name").unwrap_or("Open Graph Test User").to_string();

    let user = MockUser {
        access_token: installed.then(|| format!("token-{}", id)),
        id: id.clone(),
        name,
        password: format!("pw{}", id),
        permissions,
    };
    state.users.push(user.clone());

    let mut body = user_json(&user);
    body["email"] = json!(format!("user_{}@tfbnw.net", id));
    body["password"] = json!(user.password);
    (200, body.to_string())
}

fn list_users(request: &MockRequest, config: &MockConfig, state: &MockState) -> (u16, String) {
    let limit = request
        .param("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(config.page_size)
        .max(1);
    let start: usize = request.param("after").and_then(|a| a.parse().ok()).unwrap_or(0);
    let end = (start + limit).min(state.users.len());

    let data: Vec<_> = state.users.get(start..end).unwrap_or(&[]).iter().map(user_json).collect();
    let mut body = json!({
        "data": data,
        "paging": { "cursors": { "before": start.to_string(), "after": end.to_string() } }
    });
    if end < state.users.len() {
        body["paging"]["next"] = json!(format!("https://graph.example/next?after={}", end));
    }
    (200, body.to_string())
}

fn disassociate_user(request: &MockRequest, state: &mut MockState) -> (u16, String) {
    let Some(uid) = request.param("uid") else {
        return (400, graph_error("(#100) The parameter uid is required", 100));
    };
    let before = state.users.len();
    state.users.retain(|u| u.id != uid);
    success(state.users.len() < before)
}

fn delete_user(config: &MockConfig, state: &mut MockState, id: &str) -> (u16, String) {
    if !state.users.iter().any(|u| u.id == id) {
        return (400, graph_error(&format!("(#100) Invalid test user id {}", id), 100));
    }
    if config.refuse_deletes {
        return success(false);
    }
    state.users.retain(|u| u.id != id);
    success(true)
}

fn update_user(request: &MockRequest, state: &mut MockState, id: &str) -> (u16, String) {
    let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
        return success(false);
    };
    if let Some(name) = request.param("name") {
        user.name = name.to_string();
    }
    if let Some(password) = request.param("password") {
        user.password = password.to_string();
    }
    success(true)
}

fn befriend(
    request: &MockRequest,
    config: &MockConfig,
    state: &mut MockState,
    from: &str,
    to: &str,
) -> (u16, String) {
    let own_token = state
        .users
        .iter()
        .find(|u| u.id == from)
        .and_then(|u| u.access_token.clone());
    if own_token.is_none() || request.token() != own_token.as_deref() {
        return (400, graph_error("Invalid OAuth access token.", 190));
    }
    if !state.users.iter().any(|u| u.id == to) {
        return (400, graph_error(&format!("(#100) Unknown user {}", to), 100));
    }

    let accepting = state.pending.iter().any(|(a, b)| a == to && b == from);
    if accepting {
        if config.fail_friend_accepts {
            return success(false);
        }
        state.pending.retain(|(a, b)| !(a == to && b == from));
        state.friendships.push((to.to_string(), from.to_string()));
    } else {
        if config.fail_friend_requests {
            return success(false);
        }
        state.pending.push((from.to_string(), to.to_string()));
    }
    success(true)
}

fn user_json(user: &MockUser) -> serde_json::Value {
    let mut value = json!({
        "id": user.id,
        "login_url": format!("https://graph.example/login/{}", user.id),
    });
    if let Some(token) = &user.access_token {
        value["access_token"] = json!(token);
    }
    value
}

fn success(ok: bool) -> (u16, String) {
    (200, json!({ "success": ok }).to_string())
}

fn graph_error(message: &str, code: i64) -> String {
    json!({
        "error": { "message": message, "type": "OAuthException", "code": code }
    })
    .to_string()
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::adapters::graph::GraphClient;
    use crate::domain::result::{Error, FriendPhase};
    use crate::domain::{CreateTestUserRequest, TestUser, UpdateTestUser};
    use crate::ports::{AppCredentials, GraphApi};
    use crate::services::{FriendService, TestUserService};

    const APP_TOKEN: &str = "1234|secret";

    fn services(server: &MockGraphServer) -> (TestUserService, FriendService) {
        let client = GraphClient::new(&server.base_url(), None, Duration::from_secs(5)).unwrap();
        let api: Arc<dyn GraphApi> = Arc::new(client);
        let app = AppCredentials::new("1234").with_secret("secret");
        (
            TestUserService::new(Arc::clone(&api), app),
            FriendService::new(api),
        )
    }

    #[test]
    fn test_create_installed_user() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);

        let request = CreateTestUserRequest::installed(["email", "user_friends"]).with_name("Bob");
        let user = users.create(&request, APP_TOKEN).unwrap();

        assert!(user.has_access_token());
        assert!(user.email.is_some());
        assert!(user.password.is_some());
        assert_eq!(server.user_name(&user.id).as_deref(), Some("Bob"));
        assert_eq!(
            server.user_permissions(&user.id).unwrap(),
            vec!["email".to_string(), "user_friends".to_string()]
        );
    }

    #[test]
    fn test_create_not_installed_user_has_no_token() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);

        let user = users.create(&CreateTestUserRequest::not_installed(), APP_TOKEN).unwrap();
        assert!(!user.has_access_token());
    }

    #[test]
    fn test_wrong_app_token_surfaces_platform_error() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);

        let err = users.create(&CreateTestUserRequest::default(), "bogus").unwrap_err();
        match err {
            Error::Api {
                status,
                message,
                kind,
                code,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid OAuth access token.");
                assert_eq!(kind.as_deref(), Some("OAuthException"));
                assert_eq!(code, Some(190));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_spans_pages() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);

        let mut created = Vec::new();
        for _ in 0..5 {
            created.push(users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap().id);
        }

        let listed: Vec<String> = users
            .list(APP_TOKEN)
            .map(|u| u.unwrap().id)
            .collect();
        assert_eq!(listed, created);

        let gets = server
            .request_log()
            .iter()
            .filter(|r| r.starts_with("GET"))
            .count();
        assert_eq!(gets, 3);
    }

    #[test]
    fn test_list_honours_page_size() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);
        let users = users.with_page_size(Some(10));

        for _ in 0..5 {
            users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        }
        let mut paged = users.list(APP_TOKEN);
        assert_eq!(paged.by_ref().count(), 5);
        assert_eq!(paged.pages_fetched(), 1);
    }

    #[test]
    fn test_find_remove_and_disassociate() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);

        let a = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        let b = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        let c = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();

        assert_eq!(users.find(&c.id, APP_TOKEN).unwrap().map(|u| u.id), Some(c.id.clone()));
        assert!(users.remove(&a, APP_TOKEN).unwrap());
        assert!(users.disassociate(&b, APP_TOKEN).unwrap());
        assert!(!users.disassociate(&b, APP_TOKEN).unwrap());

        assert_eq!(server.user_count(), 1);
        assert!(users.find(&a.id, APP_TOKEN).unwrap().is_none());
        assert!(server
            .request_log()
            .contains(&"DELETE /1234/accounts/test-users".to_string()));
    }

    #[test]
    fn test_remove_unknown_user_is_api_error() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);

        let err = users.remove(&TestUser::new("999"), APP_TOKEN).unwrap_err();
        assert!(matches!(err, Error::Api { status: 400, .. }));
        assert!(err.to_string().contains("Invalid test user id 999"));
    }

    #[test]
    fn test_refused_remove_is_false_not_error() {
        let server = MockGraphServer::start(MockConfig {
            refuse_deletes: true,
            ..Default::default()
        })
        .unwrap();
        let (users, _) = services(&server);

        let user = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        assert!(!users.remove(&user, APP_TOKEN).unwrap());
        assert_eq!(server.user_count(), 1);
    }

    #[test]
    fn test_update_user() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, _) = services(&server);

        let user = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        let changes = UpdateTestUser::default().with_name("Renamed");
        assert!(users.update(&user, &changes, APP_TOKEN).unwrap());
        assert_eq!(server.user_name(&user.id).as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_friend_connection() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, friends) = services(&server);

        let a = users.create(&CreateTestUserRequest::installed(["email"]), APP_TOKEN).unwrap();
        let b = users.create(&CreateTestUserRequest::installed(["email"]), APP_TOKEN).unwrap();

        friends.connect(&a, &b).unwrap();
        assert!(server.are_friends(&a.id, &b.id));
        assert!(!server.has_pending_request(&a.id, &b.id));
    }

    #[test]
    fn test_friend_accept_failure_leaves_pending_request() {
        let server = MockGraphServer::start(MockConfig {
            fail_friend_accepts: true,
            ..Default::default()
        })
        .unwrap();
        let (users, friends) = services(&server);

        let a = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        let b = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();

        let err = friends.connect(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            Error::Friendship { phase: FriendPhase::Accept, .. }
        ));
        assert!(server.has_pending_request(&a.id, &b.id));
        assert!(!server.are_friends(&a.id, &b.id));
    }

    #[test]
    fn test_friend_request_failure_still_sends_accept() {
        let server = MockGraphServer::start(MockConfig {
            fail_friend_requests: true,
            ..Default::default()
        })
        .unwrap();
        let (users, friends) = services(&server);

        let a = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        let b = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();

        let err = friends.connect(&a, &b).unwrap_err();
        match err {
            Error::Friendship { phase, from, to } => {
                assert_eq!(phase, FriendPhase::Request);
                assert_eq!(from, a.id);
                assert_eq!(to, b.id);
            }
            other => panic!("expected Friendship error, got {:?}", other),
        }

        let friend_posts: Vec<String> = server
            .request_log()
            .into_iter()
            .filter(|r| r.starts_with("POST") && r.contains("/friends/"))
            .collect();
        assert_eq!(
            friend_posts,
            vec![
                format!("POST /{}/friends/{}", a.id, b.id),
                format!("POST /{}/friends/{}", b.id, a.id),
            ]
        );
        assert!(!server.are_friends(&a.id, &b.id));
    }

    #[test]
    fn test_friend_with_foreign_token_is_api_error() {
        let server = MockGraphServer::start(MockConfig::default()).unwrap();
        let (users, friends) = services(&server);

        let a = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        let b = users.create(&CreateTestUserRequest::default(), APP_TOKEN).unwrap();
        let impostor = TestUser::new(a.id.clone()).with_access_token("stolen");

        let err = friends.connect(&impostor, &b).unwrap_err();
        assert!(matches!(err, Error::Api { status: 400, .. }));
        // Transport-level failures stop the handshake at once
        let friend_calls = server
            .request_log()
            .iter()
            .filter(|r| r.contains("/friends/"))
            .count();
        assert_eq!(friend_calls, 1);
    }
}
