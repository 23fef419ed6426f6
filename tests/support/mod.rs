//! Shared test helpers: a local stand-in for the Gemini API plus fake
//! display, clipboard and clock.

#![allow(dead_code)]

use lllm_lib::capture::{DisplayBackend, WindowEntry};
use lllm_lib::clipboard::{ClipboardSink, Clock, CopyThrottle};
use lllm_lib::{Launcher, LllmError, PluginConfig};
use std::io::Read;
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// One request as the mock API received it.
#[derive(Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// Local HTTP server answering every request with the same status + body.
pub struct MockApi {
    pub endpoint: String,
    requests: mpsc::Receiver<RecordedRequest>,
}

impl MockApi {
    pub fn start(status: u16, body: &str) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock API");
        let addr = server.server_addr().to_ip().expect("mock API has an IP address");
        let (tx, rx) = mpsc::channel();
        let body = body.to_string();

        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut raw = String::new();
                let _ = request.as_reader().read_to_string(&mut raw);
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string());
                let _ = tx.send(RecordedRequest {
                    method: request.method().as_str().to_string(),
                    url: request.url().to_string(),
                    content_type,
                    body: serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null),
                });

                let header = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"application/json"[..],
                )
                .expect("static header");
                let response = tiny_http::Response::from_string(body.clone())
                    .with_status_code(tiny_http::StatusCode(status))
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            endpoint: format!("http://{}/v1beta/models/", addr),
            requests: rx,
        }
    }

    /// Serve a well-formed answer.
    pub fn answering(text: &str) -> Self {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
        });
        Self::start(200, &body.to_string())
    }

    pub fn next_request(&self) -> RecordedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("mock API received no request")
    }

    pub fn received_nothing(&self) -> bool {
        self.requests.try_recv().is_err()
    }

    pub fn config(&self) -> PluginConfig {
        PluginConfig {
            endpoint: self.endpoint.clone(),
            model: "test-model".into(),
            api_key: "test-api-key".into(),
            trigger_keyword: "~".into(),
            system_prompt: "You are a test assistant.".into(),
            tools_enabled: false,
        }
    }
}

/// Display with a fixed window list; records calls in order.
#[derive(Default)]
pub struct FakeDisplay {
    pub windows: Vec<WindowEntry>,
    pub fail_capture: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeDisplay {
    pub fn with_launcher_window() -> Self {
        Self {
            windows: vec![
                WindowEntry {
                    handle: 10,
                    title: "Visual Studio Code".into(),
                    process_name: "Code".into(),
                },
                WindowEntry {
                    handle: 20,
                    title: "PowerToys Run".into(),
                    process_name: "PowerToys.PowerLauncher".into(),
                },
            ],
            ..Self::default()
        }
    }

    /// Launcher window present, but the display capture fails.
    pub fn failing_capture() -> Self {
        Self {
            fail_capture: true,
            ..Self::with_launcher_window()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DisplayBackend for FakeDisplay {
    fn list_visible_windows(&self) -> Result<Vec<WindowEntry>, LllmError> {
        self.record("list".into());
        Ok(self.windows.clone())
    }

    fn hide(&self, window: &WindowEntry) -> Result<(), LllmError> {
        self.record(format!("hide {}", window.handle));
        Ok(())
    }

    fn show(&self, window: &WindowEntry) -> Result<(), LllmError> {
        self.record(format!("show {}", window.handle));
        Ok(())
    }

    fn capture_display(&self) -> Result<Vec<u8>, LllmError> {
        self.record("capture".into());
        if self.fail_capture {
            return Err(LllmError::Capture("no primary monitor".into()));
        }
        Ok(PNG_BYTES.to_vec())
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryClipboard {
    pub fn text(&self) -> Option<String> {
        self.text.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), LllmError> {
        *self.text.lock().unwrap() = Some(text.to_string());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

pub struct FakeClock {
    now: Mutex<Instant>,
}

impl FakeClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

/// Everything a launcher test needs to poke at.
pub struct Harness {
    pub launcher: Launcher,
    pub display: Arc<FakeDisplay>,
    pub clipboard: Arc<MemoryClipboard>,
    pub clock: Arc<FakeClock>,
}

pub fn harness(config: PluginConfig, display: FakeDisplay) -> Harness {
    let display = Arc::new(display);
    let clipboard = Arc::new(MemoryClipboard::default());
    let clock = FakeClock::new();
    let launcher = Launcher::new(
        config,
        display.clone(),
        clipboard.clone(),
        CopyThrottle::new(Duration::from_secs(1), clock.clone()),
    );
    Harness {
        launcher,
        display,
        clipboard,
        clock,
    }
}
