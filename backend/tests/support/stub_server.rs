//! Local actix server standing in for an upstream HTTP API.
//!
//! Every request is recorded before being routed, so tests can assert on the
//! exact calls an adapter made.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::dev::{ServerHandle, Service};
use actix_web::http::Method;
use actix_web::{App, HttpServer, web};

/// One request as the stub saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path and query, e.g. `/api/v2/pokemon?limit=151&offset=0`.
    pub uri: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Running stub with its request log.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl StubServer {
    /// Start a stub on an ephemeral port serving the routes `configure` adds.
    pub async fn start<F>(configure: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        let server = HttpServer::new(move || {
            let log = Arc::clone(&log);
            App::new()
                .wrap_fn(move |req, srv| {
                    let recorded = RecordedRequest {
                        method: req.method().clone(),
                        uri: req.uri().to_string(),
                        headers: req
                            .headers()
                            .iter()
                            .map(|(name, value)| {
                                (
                                    name.as_str().to_owned(),
                                    value.to_str().unwrap_or_default().to_owned(),
                                )
                            })
                            .collect(),
                    };
                    log.lock().expect("request log lock").push(recorded);
                    srv.call(req)
                })
                .configure(configure.clone())
        })
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle,
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log lock").clone()
    }

    /// Stop accepting connections.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
