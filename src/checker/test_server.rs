// src/checker/test_server.rs
// A throwaway HTTP server on 127.0.0.1 that serves fixed bodies per path.
// Unknown paths get a 404. Stops when dropped.

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use url::Url;

pub struct TestServer {
    base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
    shutdown: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl TestServer {
    pub fn start(routes: &[(&str, u16, &str)]) -> Self {
        let routes: HashMap<String, (u16, String)> = routes
            .iter()
            .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
            .collect();

        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}", server.server_addr());
        let hits = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&hits);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(20)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let path = request.url().split('?').next().unwrap_or("/").to_string();
            recorded.lock().unwrap().push(path.clone());

            let (status, body) = routes
                .get(&path)
                .cloned()
                .unwrap_or((404, "not found".to_string()));
            let _ = request.respond(tiny_http::Response::from_string(body).with_status_code(status));
        });

        TestServer {
            base_url,
            hits,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Url {
        Url::parse(&self.base_url).unwrap().join(path).unwrap()
    }

    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
