//! Shared test infrastructure for integration tests.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::thread::JoinHandle;

/// Credentials accepted by the stub services.
pub const TEST_ENV: [(&str, &str); 3] = [
    ("PRACTICUM_TOKEN", "practicum-secret"),
    ("TELEGRAM_TOKEN", "telegram-secret"),
    ("CHAT_ID", "12345"),
];

/// Run the watcher binary with a scrubbed environment.
pub fn run_watcher(env: &[(&str, &str)], args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_review-watch"))
        .args(args)
        .env_clear()
        .envs(env.iter().copied())
        .current_dir(cwd)
        .output()
        .expect("spawn review-watch")
}

/// One-shot HTTP server answering queued `(status, body)` pairs in order.
pub struct StubServer {
    base: String,
    handle: JoinHandle<Vec<String>>,
}

impl StubServer {
    pub fn serve(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let base = format!("http://{}", listener.local_addr().expect("stub addr"));
        let handle = std::thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().expect("accept stub connection");
                requests.push(read_request(&mut stream));
                let reply = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    if status < 400 { "OK" } else { "Error" },
                    body.len()
                );
                stream.write_all(reply.as_bytes()).expect("write stub reply");
            }
            requests
        });
        Self { base, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Wait for every queued response to be served and return the raw requests.
    pub fn finish(self) -> Vec<String> {
        self.handle.join().expect("stub server thread")
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();
    let mut content_length = 0usize;
    let mut chunked = false;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).expect("read request line") == 0 {
            break;
        }
        let lower = line.to_ascii_lowercase();
        if let Some(value) = lower.strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
        if lower.starts_with("transfer-encoding:") && lower.contains("chunked") {
            chunked = true;
        }
        head.push_str(&line);
        if line == "\r\n" {
            break;
        }
    }

    let mut body = Vec::new();
    if chunked {
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).expect("read chunk size");
            let size = usize::from_str_radix(size_line.trim(), 16).unwrap_or(0);
            let mut chunk = vec![0u8; size + 2];
            reader.read_exact(&mut chunk).expect("read chunk");
            if size == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    } else {
        body.resize(content_length, 0);
        reader.read_exact(&mut body).expect("read request body");
    }
    head.push_str(&String::from_utf8_lossy(&body));
    head
}
