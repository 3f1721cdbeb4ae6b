//! Mock GET services server for testing
//!
//! Simulates the services API over plain HTTP so the transport can be
//! exercised without network access. Every endpoint accepts
//! `POST {method, params}` and answers `{exception, response}`:
//! - `session` / `authenticateSystem` returns a temporary session id
//! - `institution` / `retrieveLookupList` returns a fixed institution list
//! - `commerce` / `retrieveAccounts` and
//!   `retrieveTransactionHistoryWithinDateRange`, and `user` / `retrieve`
//!   require the user session id, otherwise answer `INVALID_SESSION`

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

/// Session id minted by `authenticateSystem`
pub const MOCK_TEMPORARY_SESSION: &str = "mock-temporary-session";

/// Session id accepted for user-only methods
pub const MOCK_USER_SESSION: &str = "mock-user-session";

/// Configuration for the mock server
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Answer every request with this HTTP status and an HTML body
    pub http_status: Option<u16>,
    /// Answer 200 with a body that is not JSON
    pub invalid_json: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

/// One request as seen by the server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Option<JsonValue> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Mock services server on a random local port
pub struct MockCbordServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockCbordServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop notices shutdown
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let requests_clone = Arc::clone(&requests);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = Arc::clone(&requests_clone);
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
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
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockCbordServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<RecordedRequest>>) {
    let _ = stream.set_nonblocking(false);
    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, "Bad Request", "text/plain", "bad request");
        return;
    };

    if let Ok(mut requests) = log.lock() {
        requests.push(request.clone());
    }

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if let Some(status) = config.http_status {
        send_response(&mut stream, status, "Error", "text/html", "<html>unavailable</html>");
        return;
    }

    if config.invalid_json {
        send_response(&mut stream, 200, "OK", "application/json", "<html>not json</html>");
        return;
    }

    if request.method != "POST" {
        send_response(&mut stream, 405, "Method Not Allowed", "text/plain", "POST only");
        return;
    }

    let Some(body) = request.json_body() else {
        send_envelope(&mut stream, Err("Malformed request body"));
        return;
    };

    let endpoint = request.path.trim_start_matches('/');
    let method = body["method"].as_str().unwrap_or_default();
    let params = &body["params"];
    let session_id = params["sessionId"].as_str();

    let result = match (endpoint, method) {
        ("session", "authenticateSystem") => {
            if params["systemCredentials"]["userName"] == "get_mobile" {
                Ok(json!(MOCK_TEMPORARY_SESSION))
            } else {
                Err("Invalid system credentials")
            }
        }
        ("institution", "retrieveLookupList") => match session_id {
            Some(MOCK_TEMPORARY_SESSION) | Some(MOCK_USER_SESSION) => Ok(mock_institutions()),
            _ => Err("INVALID_SESSION"),
        },
        ("commerce", "retrieveAccounts") => user_only(session_id, mock_accounts),
        ("commerce", "retrieveTransactionHistoryWithinDateRange") => {
            let max = params["queryCriteria"]["maxReturnMostRecent"].as_u64().unwrap_or(10) as usize;
            user_only(session_id, || mock_transactions(max))
        }
        ("user", "retrieve") => user_only(session_id, mock_user),
        _ => Err("Unknown method"),
    };

    send_envelope(&mut stream, result);
}

fn user_only(session_id: Option<&str>, payload: impl FnOnce() -> JsonValue) -> Result<JsonValue, &'static str> {
    if session_id == Some(MOCK_USER_SESSION) {
        Ok(payload())
    } else {
        Err("INVALID_SESSION")
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let body_end = data.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&data[header_end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn send_envelope(stream: &mut TcpStream, result: Result<JsonValue, &str>) {
    let envelope = match result {
        Ok(response) => json!({ "exception": null, "response": response }),
        Err(exception) => json!({ "exception": exception, "response": null }),
    };
    send_response(stream, 200, "OK", "application/json", &envelope.to_string());
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, content_type: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn mock_institutions() -> JsonValue {
    json!({
        "institutions": [
            {
                "id": "inst-1",
                "name": "State University",
                "shortName": "stateu",
                "environmentName": null,
                "type": 1,
                "guestDeposit": 1,
                "guestLogin": 0,
                "guestLoginNotRequired": 0
            },
            {
                "id": "inst-2",
                "name": "Tech Institute",
                "shortName": "tech",
                "environmentName": null,
                "type": 1,
                "guestDeposit": 0,
                "guestLogin": 0,
                "guestLoginNotRequired": 1
            }
        ]
    })
}

fn mock_accounts() -> JsonValue {
    json!({
        "accounts": [
            {
                "id": "acc-1",
                "institutionId": "inst-1",
                "paymentSystemId": "ps-1",
                "userId": "user-1",
                "isActive": true,
                "accountDisplayName": "Dining Dollars",
                "paymentSystemType": 1,
                "accountTender": "4",
                "isAccountTenderActive": true,
                "accountType": 3,
                "depositAccepted": true,
                "lastFour": null,
                "nameOnMedia": null,
                "expirationMonth": null,
                "expirationYear": null,
                "billingAddressId": null,
                "balance": 152.75
            },
            {
                "id": "acc-2",
                "institutionId": "inst-1",
                "paymentSystemId": "ps-1",
                "userId": "user-1",
                "isActive": true,
                "accountDisplayName": "Meal Swipes",
                "paymentSystemType": 1,
                "accountTender": "7",
                "isAccountTenderActive": true,
                "accountType": 1,
                "depositAccepted": false,
                "balance": 12
            }
        ]
    })
}

fn mock_transactions(max: usize) -> JsonValue {
    let transactions: Vec<JsonValue> = (0..25)
        .map(|i| {
            json!({
                "transactionId": format!("tx-{}", 25 - i),
                "transactionSequence": 25 - i,
                "transactionType": 1,
                "amount": -(5.25 + i as f64),
                "resultingBalance": 152.75 + i as f64,
                "postedDate": null,
                "actualDate": format!("2024-03-{:02}T12:00:00.000+0000", 28 - i),
                "patronId": "user-1",
                "planId": null,
                "tenderId": "4",
                "locationId": null,
                "locationName": "Main Dining Hall",
                "patronFullName": "Jane Doe",
                "accountType": 3,
                "accountName": "Dining Dollars",
                "paymentSystemType": 1
            })
        })
        .collect();

    let capped = transactions.len() > max;
    json!({
        "totalCount": transactions.len(),
        "returnCapped": capped,
        "transactions": transactions.into_iter().take(max).collect::<Vec<_>>()
    })
}

fn mock_user() -> JsonValue {
    json!({
        "id": "user-1",
        "userName": "jdoe",
        "objectRevision": 3,
        "institutionId": "inst-1",
        "firstName": "Jane",
        "middleName": "",
        "lastName": "Doe",
        "status": 1,
        "staleProfile": false,
        "active": true,
        "timeZone": "America/New_York",
        "locale": "en_US",
        "cashlessMediaStatus": 0,
        "guestUser": false,
        "hasCashlessCard": true,
        "lastUpdatedProfile": null,
        "lastUpdatedCashless": null,
        "emailBounceMessage": null,
        "emailBounceStatus": null,
        "childUserInfoList": [],
        "userNotificationInfoList": [],
        "userMediaInfoList": null,
        "email": "jdoe@stateu.edu",
        "phone": "555-0100"
    })
}
