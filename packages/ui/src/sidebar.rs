use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::icons::{FaUser, FaUsers};
use crate::menu::{categories, sections_by_category, Category};
use crate::Icon;

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");

/// Section menu of the usuarios page.
#[component]
pub fn UsuarioSidebar(active_section: String, on_select: EventHandler<String>) -> Element {
    let auth = use_auth();
    let user = auth.read().user.clone();

    rsx! {
        document::Stylesheet { href: SIDEBAR_CSS }

        aside {
            class: "sidebar",

            div {
                class: "sidebar-user",
                Icon { icon: FaUser, width: 16, height: 16 }
                if let Some(u) = user {
                    div {
                        class: "sidebar-user-text",
                        span { class: "sidebar-user-name", "{u.greeting_name()}" }
                        span { class: "sidebar-user-unit", "{u.destino}" }
                    }
                } else {
                    span { class: "sidebar-user-name", "MINIDOC" }
                }
            }

            div {
                class: "sidebar-title",
                Icon { icon: FaUsers, width: 14, height: 14 }
                span { "Usuarios" }
            }

            nav {
                class: "sidebar-tree",
                for category in categories() {
                    CategoryNode {
                        key: "{category.id}",
                        category,
                        active_section: active_section.clone(),
                        on_select,
                    }
                }
            }

            div {
                class: "sidebar-bottom",
                LogoutButton { class: "sidebar-bottom-item" }
            }
        }
    }
}

#[component]
fn CategoryNode(category: Category, active_section: String, on_select: EventHandler<String>) -> Element {
    let mut expanded = use_signal(|| true);

    rsx! {
        div {
            class: "category-node",
            div {
                class: "category-header",
                onclick: move |_| expanded.set(!expanded()),
                span {
                    class: "icon",
                    if expanded() { "\u{25BE}" } else { "\u{25B8}" }
                }
                span { "{category.label}" }
            }

            if expanded() {
                div {
                    class: "category-children",
                    for section in sections_by_category(category.id) {
                        div {
                            key: "{section.id}",
                            class: if active_section == section.id { "section-item active" } else { "section-item" },
                            title: "{section.description}",
                            onclick: move |_| on_select.call(section.id.to_string()),
                            span { "{section.label}" }
                            if !section.implemented {
                                span { class: "section-badge", "Próximamente" }
                            }
                        }
                    }
                }
            }
        }
    }
}
