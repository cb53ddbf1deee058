use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};

// Shared by the loader and the backend client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

pub(crate) fn client() -> &'static Client {
    &CLIENT
}
