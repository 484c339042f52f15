use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use ollama_assist::config::ClientConfig;

/// Run blocking client code off the async test runtime
///
/// The client uses reqwest's blocking API, which must not run on a
/// runtime worker thread.
#[allow(dead_code)]
pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

/// Enabled client configuration pointing at a mock server
#[allow(dead_code)]
pub fn config_for(uri: &str) -> ClientConfig {
    ClientConfig::enabled(uri, "llama2")
}

/// Host URL for a local port nothing listens on
#[allow(dead_code)]
pub fn unused_local_host() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[allow(dead_code)]
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("failed to write file");
    (temp_dir, path)
}
