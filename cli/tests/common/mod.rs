//! Mock server bootstrap shared by the integration tests.

/// Serve the mock API on a random port from a background thread and return
/// its base URL.
pub fn start_server(token: &'static str) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, token).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}
