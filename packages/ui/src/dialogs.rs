//! Blocking browser dialogs (`window.alert` / `window.confirm`).
//!
//! Native builds have no modal dialogs: alerts are logged and confirmations
//! are declined, so nothing destructive happens without a user answer.

pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        match web_sys::window() {
            Some(window) => {
                if let Err(e) = window.alert_with_message(message) {
                    tracing::warn!("Failed to show alert: {:?}", e);
                }
            }
            None => tracing::warn!("No window, alert dropped: {message}"),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("{message}");
}

pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        match web_sys::window().map(|window| window.confirm_with_message(message)) {
            Some(Ok(answer)) => answer,
            Some(Err(e)) => {
                tracing::warn!("Failed to show confirm, declining: {:?}", e);
                false
            }
            None => false,
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("No dialog available, declining: {message}");
        false
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_native_confirm_declines() {
        alert("Usuario eliminado exitosamente");
        assert!(!confirm("¿Está seguro que desea eliminar a Pérez, Juan?"));
    }
}
