#![allow(dead_code)]

use std::{
    collections::VecDeque,
    fs,
    io::{BufRead, BufReader, Write},
    net::TcpListener,
    path::Path,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use restaurant_geocoder::{Config, NominatimConfig};
use serde_json::Value;

/// Minimal HTTP responder standing in for the geocoding service. Replies with
/// the canned responses in order, then with 500s.
pub struct Server {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Server {
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let url = format!("http://{}/search", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mut responses: VecDeque<(u16, String)> = responses
            .into_iter()
            .map(|(code, body)| (code, body.to_string()))
            .collect();

        let seen = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };

                let mut head = String::new();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                        break;
                    }
                    head.push_str(&line);
                }
                seen.lock().unwrap().push(head);

                let (code, body) = responses
                    .pop_front()
                    .unwrap_or((500, "{}".to_string()));
                let _ = write!(
                    stream,
                    "HTTP/1.1 {code} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.flush();
            }
        });

        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn config(&self, delay: Duration) -> NominatimConfig {
        NominatimConfig {
            endpoint: self.url.clone(),
            delay,
            timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }
}

/// Endpoint nothing is listening on.
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/search")
}

/// Endpoint that accepts connections but never answers.
pub fn silent_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut open = Vec::new();
        for stream in listener.incoming() {
            open.push(stream);
        }
    });
    format!("http://{addr}/search")
}

pub fn fixture(dir: &Path, value: &Value) -> Config {
    let path = dir.join("Restaurants.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    Config::in_place(path)
}

pub fn output(config: &Config) -> Value {
    serde_json::from_str(&fs::read_to_string(&config.output).unwrap()).unwrap()
}
