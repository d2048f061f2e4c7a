use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

fn default_http_client_builder() -> reqwest::ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(120))
        // Hyper's connection pool exposes only max-idle-per-host and an idle
        // timeout, no TTL on connections themselves. A short idle timeout is
        // what picks up DNS/backend-restart changes in practice.
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
}

/// Single shared client so the pool above is actually shared across attempts.
pub(crate) fn http_client() -> reqwest::Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT.get_or_init(|| default_http_client_builder().build().expect("failed to build default HTTP client")).clone()
}
