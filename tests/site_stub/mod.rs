// A tiny_http server standing in for the checked website.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct SiteStub {
    pub base_url: String,
    shutdown: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SiteStub {
    /// Serves `routes` (path, status, body); anything else is a 404.
    pub fn start(routes: Vec<(&'static str, u16, String)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}", server.server_addr());
        let (shutdown, shutdown_rx) = mpsc::channel::<()>();

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
            let (status, body) = routes
                .iter()
                .find(|(route, _, _)| *route == path)
                .map(|(_, status, body)| (*status, body.clone()))
                .unwrap_or((404, "not found".to_string()));

            let _ = request.respond(tiny_http::Response::from_string(body).with_status_code(status));
        });

        SiteStub {
            base_url,
            shutdown,
            handle: Some(handle),
        }
    }
}

impl Drop for SiteStub {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn healthy_page() -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <title>{}</title>
    <meta name="description" content="{}">
    <script type="application/ld+json">{{"@type":"Organization"}}</script>
  </head>
  <body><h1>Family rides</h1><img src="carousel.jpg" alt="Carousel"></body>
</html>"#,
        "Family Rides and Coasters for Amusement Parks",
        "d".repeat(140)
    )
}

pub fn sitemap(count: usize) -> String {
    let urls: String = (0..count)
        .map(|i| format!("<url><loc>https://example.com/p{}</loc></url>", i))
        .collect();
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><urlset>{}</urlset>"#, urls)
}
