use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Login, Usuarios};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/usuarios")]
    Usuarios {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: ui::CONSOLE_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/login`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Login {});
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8 text-center",
            h1 { class: "m-0 mb-2 text-2xl font-semibold text-neutral-900", "Página no encontrada" }
            p { class: "m-0 mb-4 text-sm text-neutral-500", "La ruta /{path} no existe." }
            Link { class: "text-primary-500 underline", to: Route::Login {}, "Volver al inicio" }
        }
    }
}
