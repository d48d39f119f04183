//! Minimal HTTP/1.1 JSON server for integration tests.
//!
//! Serves `/pokemon/{id}` and `/species/{id}/` for ids `1..=max_id`. Routes
//! can be made to fail (HTTP 503) a number of times, or forever, or to stall
//! before answering. Every request path is recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct ServerState {
    pub max_id: u32,
    /// Path -> remaining failures (u32::MAX = always fail).
    pub failures: HashMap<String, u32>,
    pub legendary: Vec<u32>,
    /// Path -> how long to sit on the request before answering.
    pub stalls: HashMap<String, Duration>,
    pub requests: Vec<String>,
}

pub struct ApiServer {
    pub base: String,
    pub state: Arc<Mutex<ServerState>>,
}

impl ApiServer {
    /// Base URL of the primary endpoint, e.g. `http://127.0.0.1:1234/pokemon/`.
    pub fn primary_base(&self) -> String {
        format!("{}pokemon/", self.base)
    }

    pub fn fail(&self, path: &str, times: u32) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(path.to_string(), times);
    }

    pub fn stall(&self, path: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .stalls
            .insert(path.to_string(), delay);
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| *p == path).count()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(max_id: u32, legendary: &[u32]) -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}/", port);
    let state = Arc::new(Mutex::new(ServerState {
        max_id,
        legendary: legendary.to_vec(),
        ..ServerState::default()
    }));
    let shared = Arc::clone(&state);
    let species_base = base.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let shared = Arc::clone(&shared);
            let species_base = species_base.clone();
            thread::spawn(move || handle(stream, &shared, &species_base));
        }
    });
    ApiServer { base, state }
}

fn handle(mut stream: std::net::TcpStream, state: &Mutex<ServerState>, base: &str) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let stall = {
        let mut st = state.lock().unwrap();
        st.requests.push(path.clone());
        st.stalls.get(&path).copied()
    };
    if let Some(delay) = stall {
        thread::sleep(delay);
    }

    let (status, body) = {
        let mut st = state.lock().unwrap();
        let failing = match st.failures.get_mut(&path) {
            Some(left) if *left > 0 => {
                if *left != u32::MAX {
                    *left -= 1;
                }
                true
            }
            _ => false,
        };
        if failing {
            ("503 Service Unavailable", "busy".to_string())
        } else {
            route(&path, &st, base)
        }
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn route(path: &str, st: &ServerState, base: &str) -> (&'static str, String) {
    let id_in_range = |s: &str| s.parse::<u32>().ok().filter(|id| (1..=st.max_id).contains(id));
    if let Some(id) = path.strip_prefix("/pokemon/").and_then(id_in_range) {
        let types = if id % 3 == 0 {
            r#"[{"slot":1,"type":{"name":"water"}}]"#
        } else {
            r#"[{"slot":1,"type":{"name":"grass"}},{"slot":2,"type":{"name":"poison"}}]"#
        };
        let body = format!(
            r#"{{"id":{id},"name":"mon-{id}","height":{id},"weight":{w},"order":{id},
"species":{{"name":"mon-{id}","url":"{base}species/{id}/"}},
"stats":[{{"base_stat":45,"effort":0,"stat":{{"name":"hp","url":"x"}}}},
{{"base_stat":49,"effort":0,"stat":{{"name":"attack","url":"x"}}}},
{{"base_stat":49,"effort":0,"stat":{{"name":"defense","url":"x"}}}},
{{"base_stat":65,"effort":1,"stat":{{"name":"special-attack","url":"x"}}}},
{{"base_stat":65,"effort":0,"stat":{{"name":"special-defense","url":"x"}}}},
{{"base_stat":45,"effort":0,"stat":{{"name":"speed","url":"x"}}}}],
"types":{types}}}"#,
            w = id * 10,
        );
        return ("200 OK", body);
    }
    if let Some(id) = path
        .strip_prefix("/species/")
        .map(|s| s.trim_end_matches('/'))
        .and_then(id_in_range)
    {
        let legendary = st.legendary.contains(&id);
        return (
            "200 OK",
            format!(r#"{{"is_legendary":{legendary},"is_mythical":false,"capture_rate":45}}"#),
        );
    }
    ("404 Not Found", "Not Found".to_string())
}
