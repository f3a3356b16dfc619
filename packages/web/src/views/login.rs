//! Login page view: logon/password form, then a short welcome screen.

use api::{login_error_message, LoggedUser};
use dioxus::prelude::*;
use ui::icons::{FaCircleCheck, FaCircleExclamation, FaEnvelope, FaEye, FaEyeSlash, FaLock, FaUser};
use ui::{pause, use_auth, use_backend, AuthState, Icon};

use crate::Route;

/// How long the welcome screen stays up before entering the console.
const WELCOME_MS: u32 = 1500;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let backend = use_backend();
    let nav = use_navigator();

    let mut logon = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut welcome = use_signal(|| None::<LoggedUser>);

    // Already holding a valid session
    if welcome().is_none() && !loading() && backend.auth.is_authenticated() {
        nav.replace(Route::Usuarios {});
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        let backend = backend.clone();
        loading.set(true);
        error.set(None);
        spawn(async move {
            let user = logon().trim().to_string();
            let result = async {
                let response = backend.auth.login(&user, &password()).await?;
                let profile = backend.auth.user_data(&response.user_id.to_string()).await?;
                Ok::<_, api::ApiError>(LoggedUser::new(&user, &response, profile))
            }
            .await;

            match result {
                Ok(logged) => {
                    tracing::info!("👋 Welcome {}", logged.greeting_name());
                    auth.set(AuthState {
                        user: Some(logged.clone()),
                    });
                    welcome.set(Some(logged));
                    loading.set(false);
                    pause(WELCOME_MS).await;
                    nav.replace(Route::Usuarios {});
                }
                Err(e) => {
                    tracing::error!("❌ Login failed: {}", e);
                    backend.auth.logout();
                    error.set(Some(login_error_message(&e)));
                    loading.set(false);
                }
            }
        });
    };

    if let Some(user) = welcome() {
        return rsx! {
            div {
                class: "flex items-center justify-center min-h-screen p-8 bg-gradient-to-br from-primary-900 to-primary-500",
                div {
                    class: "w-full max-w-sm bg-white rounded-xl p-8 shadow-2xl flex flex-col items-center text-center text-green-700",
                    Icon { icon: FaCircleCheck, width: 56, height: 56 }
                    h2 { class: "mt-3 mb-2 text-xl font-semibold text-neutral-900", "¡Bienvenido!" }
                    p {
                        class: "m-0 text-base text-neutral-700",
                        span { class: "font-bold text-primary-500", "{user.jerarquia}" }
                        " {user.apellido} {user.nombre}"
                    }
                    p { class: "mt-2 mb-0 text-sm text-neutral-500", "Accediendo al sistema MINIDOC..." }
                }
            }
        };
    }

    rsx! {
        div {
            class: "flex items-center justify-center min-h-screen p-8 bg-gradient-to-br from-primary-900 to-primary-500",
            div {
                class: "w-full max-w-sm bg-white rounded-xl p-8 shadow-2xl",
                div {
                    class: "flex flex-col items-center mb-6 text-center text-primary-500",
                    Icon { icon: FaEnvelope, width: 40, height: 40 }
                    h1 { class: "mt-2 mb-1 text-2xl font-bold tracking-widest", "MINIDOC" }
                    p { class: "m-0 text-sm text-neutral-500", "Sistema de Gestión y Distribución de GFH" }
                }

                form {
                    class: "flex flex-col gap-1.5",
                    onsubmit: onsubmit,

                    label { class: "mt-2 text-xs font-semibold text-neutral-700", r#for: "username", "Usuario" }
                    div {
                        class: "relative flex items-center gap-2 text-neutral-400",
                        Icon { icon: FaUser, width: 14, height: 14 }
                        input {
                            id: "username",
                            class: "input",
                            r#type: "text",
                            placeholder: "Ingrese su usuario",
                            autocomplete: "username",
                            required: true,
                            disabled: loading(),
                            value: "{logon}",
                            oninput: move |evt: FormEvent| {
                                logon.set(evt.value());
                                error.set(None);
                            },
                        }
                    }

                    label { class: "mt-2 text-xs font-semibold text-neutral-700", r#for: "password", "Contraseña" }
                    div {
                        class: "relative flex items-center gap-2 text-neutral-400",
                        Icon { icon: FaLock, width: 14, height: 14 }
                        input {
                            id: "password",
                            class: "input",
                            r#type: if show_password() { "text" } else { "password" },
                            placeholder: "Ingrese su contraseña",
                            autocomplete: "current-password",
                            required: true,
                            disabled: loading(),
                            value: "{password}",
                            oninput: move |evt: FormEvent| {
                                password.set(evt.value());
                                error.set(None);
                            },
                        }
                        button {
                            class: "absolute right-2 bg-transparent border-none cursor-pointer text-neutral-500",
                            r#type: "button",
                            disabled: loading(),
                            onclick: move |_| show_password.set(!show_password()),
                            if show_password() {
                                Icon { icon: FaEye, width: 14, height: 14 }
                            } else {
                                Icon { icon: FaEyeSlash, width: 14, height: 14 }
                            }
                        }
                    }

                    if let Some(message) = error() {
                        div {
                            class: "alert alert-error",
                            Icon { icon: FaCircleExclamation, width: 14, height: 14 }
                            span { "{message}" }
                        }
                    }

                    button {
                        class: "btn btn-primary justify-center mt-4 py-2.5",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Ingresando..." } else { "Iniciar Sesión" }
                    }
                }

                div {
                    class: "mt-6 text-center text-xs text-neutral-400",
                    "Servicio de Análisis Operativo, Armas y Guerra Electrónica"
                }
            }
        }
    }
}
