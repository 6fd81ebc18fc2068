//! Shared helpers for spinning up a Campus API server.

#![allow(dead_code)]

use campus_api::{create_router, AppState, Config, Store};
use tokio::net::TcpListener;

/// A running server and the base URL of its resource routes.
pub struct TestServer {
    pub api_url: String,
    pub root_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a server on a free port over the given store.
pub async fn spawn_server(config: Config, store: Store) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let root_url = format!("http://{addr}");
    let api_url = format!("{root_url}{}", config.api_prefix);

    let router = create_router(AppState::with_store(config, store));
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    TestServer {
        api_url,
        root_url,
        handle,
    }
}

/// Spawns a server with default configuration and the built-in seed data.
pub async fn spawn_default_server() -> TestServer {
    spawn_server(Config::default(), Store::builtin()).await
}

/// The `Link` header of a response.
pub fn link(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("link")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
