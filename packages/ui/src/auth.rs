//! Authentication context and hooks for the UI.

use api::{Backend, LoggedUser};
use dioxus::prelude::*;

use crate::icons::FaArrowRightFromBracket;
use crate::Icon;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    /// Profile of the operator, once the login page fetched it.
    pub user: Option<LoggedUser>,
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The API services shared by every page.
pub fn use_backend() -> Backend {
    use_context::<Backend>()
}

/// Provider component that owns the API clients and the authentication state.
/// Wrap your app with this component; children only render once the clients exist.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    // Built once; the Backend context is provided from inside the hook.
    let ready = use_hook(|| match crate::session::make_backend(&crate::session::load_config()) {
        Ok(backend) => {
            provide_context(backend);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to build the API clients: {}", e);
            Err(e.to_string())
        }
    });

    let auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    if let Err(e) = ready {
        return rsx! {
            div {
                class: "flex flex-col items-center justify-center min-h-screen p-8 text-center text-red-700",
                h2 { class: "m-0 mb-2 text-xl font-semibold", "No se pudo iniciar la aplicación" }
                p { class: "m-0 text-sm", "{e}" }
            }
        };
    }

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Cerrar sesión".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let backend = use_backend();
    let nav = navigator();

    let onclick = move |_| {
        backend.auth.logout();
        auth_state.set(AuthState::default());
        nav.replace("/login");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            Icon { icon: FaArrowRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}
