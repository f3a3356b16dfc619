use dioxus::prelude::*;

use crate::menu::HeaderConfig;

/// Top bar of the console.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        header {
            class: "navbar",
            span { class: "navbar-brand", "MINIDOC" }
            div { class: "navbar-actions", {children} }
        }
    }
}

/// Title, description and action buttons of the current section.
#[component]
pub fn ContentHeader(
    config: HeaderConfig,
    #[props(default = false)] loading: bool,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "flex items-end justify-between px-6 pt-5 pb-3",
            div {
                h1 { class: "m-0 mb-1 text-xl font-semibold text-neutral-900", "{config.title}" }
                p { class: "m-0 text-sm text-neutral-500", "{config.description}" }
            }
            div {
                class: if loading { "flex gap-2 opacity-70" } else { "flex gap-2" },
                {children}
            }
        }
    }
}
