//! Canned HTTP server for exercising the Maps collaborators offline.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// How the server answers requests for one service path.
#[derive(Debug, Clone)]
pub enum Reply {
    /// `200 OK` with a JSON body.
    Json(String),
    /// A bare status line with an empty body.
    Status(u16),
    /// Accept the request and never answer.
    Hang,
}

/// Serves canned replies keyed by path prefix, recording each request
/// target.
#[derive(Debug)]
pub struct CannedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Start serving `routes` on an ephemeral localhost port.
    pub fn start(routes: Vec<(&'static str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind canned server");
        let address = listener.local_addr().expect("local address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let target = read_target(&stream);
                recorded
                    .lock()
                    .expect("request log lock")
                    .push(target.clone());
                let reply = routes
                    .iter()
                    .find(|(prefix, _)| target.starts_with(prefix))
                    .map_or(Reply::Status(404), |(_, reply)| reply.clone());
                respond(stream, &reply);
            }
        });
        Self {
            base_url: format!("http://{address}"),
            requests,
        }
    }

    /// Base URL to configure the collaborators with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request targets (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log lock").clone()
    }
}

fn read_target(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("read request line");
    loop {
        let mut header = String::new();
        let read = reader.read_line(&mut header).expect("read header");
        if read == 0 || header == "\r\n" {
            break;
        }
    }
    request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_owned()
}

fn respond(mut stream: TcpStream, reply: &Reply) {
    let (status, body) = match reply {
        Reply::Json(body) => (200, body.as_str()),
        Reply::Status(status) => (*status, ""),
        Reply::Hang => {
            thread::sleep(Duration::from_secs(5));
            return;
        }
    };
    let response = format!(
        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}
