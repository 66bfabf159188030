use once_cell::sync::Lazy;

/// Shared blocking client. Requests never time out; a stalled gateway stalls the run.
pub static BLOCKING_CLIENT: Lazy<reqwest::blocking::Client> = Lazy::new(|| {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("gateway-bench/", env!("CARGO_PKG_VERSION")))
        .timeout(None::<std::time::Duration>)
        .build()
        .expect("failed to build blocking reqwest client")
});
