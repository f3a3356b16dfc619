//! The usuarios console: section sidebar, content header and the active
//! section (table, wizard or placeholder), plus the detail and edit modals.

use dioxus::prelude::*;
use store::{RawId, Usuario};
use ui::dialogs::{alert, confirm};
use ui::icons::{FaPlus, FaRotateRight};
use ui::menu::{header_for, section_by_id, AGREGAR_USUARIO, LISTADO_GENERAL};
use ui::usuario_form::MISSING_KEY_MESSAGE;
use ui::views::{ModalOverlay, SectionPlaceholder};
use ui::{
    use_backend, use_usuarios, ContentHeader, Icon, LookupsProvider, Navbar, UsuarioDetailModal,
    UsuarioForm, UsuarioSidebar, UsuarioTable, UsuariosList,
};

use crate::Route;

/// Guarded entry point: without a valid session the user goes back to `/login`.
#[component]
pub fn Usuarios() -> Element {
    let backend = use_backend();
    let nav = use_navigator();

    if !backend.auth.is_authenticated() {
        tracing::debug!("No valid session, redirecting to /login");
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        LookupsProvider {
            UsuariosConsole {}
        }
    }
}

#[component]
fn UsuariosConsole() -> Element {
    let backend = use_backend();
    let mut active_section = use_signal(|| LISTADO_GENERAL.to_string());
    let mut list = use_usuarios();
    let mut viewing = use_signal(|| None::<RawId>);
    let mut editing = use_signal(|| None::<Usuario>);

    let on_delete = move |usuario: Usuario| {
        let Some(id) = usuario.key().cloned() else {
            alert("Error al eliminar usuario:\nEl registro no tiene identificador");
            return;
        };
        if !confirm(&format!(
            "¿Está seguro que desea eliminar a {}?",
            usuario.display_name()
        )) {
            return;
        }
        let backend = backend.clone();
        spawn(async move {
            match backend.usuarios.delete(&id).await {
                Ok(()) => {
                    alert("Usuario eliminado exitosamente");
                    list.refresh();
                }
                Err(e) => alert(&format!("Error al eliminar usuario:\n{}", e.message)),
            }
        });
    };

    let section = active_section();
    let header = header_for(&section);
    let editing_key = editing
        .read()
        .as_ref()
        .and_then(|u| u.key().map(|k| k.to_string()))
        .unwrap_or_default();

    rsx! {
        div {
            class: "flex min-h-screen bg-neutral-50",
            UsuarioSidebar {
                active_section: section.clone(),
                on_select: move |id: String| {
                    tracing::debug!("Section selected: {}", id);
                    active_section.set(id);
                },
            }
            main {
                class: "flex flex-1 flex-col min-w-0",
                Navbar {}
                ContentHeader {
                    config: header,
                    loading: (list.loading)(),
                    if section == LISTADO_GENERAL {
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| active_section.set(AGREGAR_USUARIO.to_string()),
                            Icon { icon: FaPlus, width: 12, height: 12 }
                            " Nuevo Usuario"
                        }
                        button {
                            class: "btn btn-secondary",
                            disabled: (list.loading)(),
                            onclick: move |_| list.refresh(),
                            Icon { icon: FaRotateRight, width: 12, height: 12 }
                            " Actualizar"
                        }
                    } else if section == "busqueda-avanzada" {
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| alert("Buscar próximamente..."),
                            "Buscar"
                        }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| alert("Limpiar filtros próximamente..."),
                            "Limpiar Filtros"
                        }
                    }
                }
                div {
                    class: "px-6 pb-6",
                    SectionContent {
                        section: section.clone(),
                        list,
                        on_view: move |u: Usuario| viewing.set(u.key().cloned()),
                        on_edit: move |u: Usuario| {
                            if u.key().is_some() {
                                editing.set(Some(u));
                            } else {
                                tracing::warn!("Refusing to edit a usuario without a key");
                                alert(MISSING_KEY_MESSAGE);
                            }
                        },
                        on_delete,
                        on_back: move |_| active_section.set(LISTADO_GENERAL.to_string()),
                    }
                }
            }
        }

        if let Some(id) = viewing() {
            UsuarioDetailModal {
                key: "{id}",
                usuario_id: id,
                on_close: move |_| viewing.set(None),
            }
        }

        if let Some(usuario) = editing() {
            ModalOverlay {
                on_close: move |_| editing.set(None),
                wide: true,
                div {
                    class: "flex items-center gap-3 px-5 py-4 border-b border-neutral-200",
                    h2 { class: "m-0 text-lg font-semibold text-neutral-900", "Modificar Usuario" }
                    span { class: "text-xs text-neutral-500", "{usuario.full_name()}" }
                }
                div {
                    class: "p-5",
                    UsuarioForm {
                        key: "{editing_key}",
                        editing: usuario.clone(),
                        on_saved: move |message: String| {
                            alert(&message);
                            editing.set(None);
                            list.refresh();
                        },
                        on_cancel: move |_| editing.set(None),
                    }
                }
            }
        }
    }
}

#[component]
fn SectionContent(
    section: String,
    list: UsuariosList,
    on_view: EventHandler<Usuario>,
    on_edit: EventHandler<Usuario>,
    on_delete: EventHandler<Usuario>,
    on_back: EventHandler<()>,
) -> Element {
    let mut list = list;
    match section_by_id(&section) {
        Some(s) if s.id == AGREGAR_USUARIO => rsx! {
            UsuarioForm {
                on_saved: move |_| list.refresh(),
                on_cancel: move |_| on_back.call(()),
            }
        },
        Some(s) if !s.implemented => rsx! {
            SectionPlaceholder { section: s }
        },
        _ => rsx! {
            UsuarioTable { list, on_view, on_edit, on_delete }
        },
    }
}
