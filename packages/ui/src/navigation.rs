//! Full-page navigation outside the router.
//!
//! The API client runs the unauthorized hook from plain Rust code with no
//! access to the Dioxus navigator, so it goes through `window.location`.

/// Send the browser to `/login`, unless it is already there.
pub fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        if location.pathname().is_ok_and(|path| path == "/login") {
            return;
        }
        if let Err(e) = location.set_href("/login") {
            tracing::error!("Failed to redirect to /login: {:?}", e);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("Session rejected by the server, login required");
}

/// Wait `ms` milliseconds without blocking the event loop.
pub async fn pause(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}
