use dioxus::prelude::*;
use store::listing::{destino_label, jerarquia_label, visible_usuarios};
use store::{SortConfig, SortDirection, SortKey, Usuario};

use crate::icons::{
    FaCircleExclamation, FaEye, FaMagnifyingGlass, FaPen, FaRotateRight, FaSort, FaSortDown,
    FaSortUp, FaTrashCan,
};
use crate::lookups::use_lookups;
use crate::usuarios::UsuariosList;
use crate::Icon;

/// Searchable, sortable usuario table. The query only applies when the
/// search form is submitted.
#[component]
pub fn UsuarioTable(
    list: UsuariosList,
    on_view: EventHandler<Usuario>,
    on_edit: EventHandler<Usuario>,
    on_delete: EventHandler<Usuario>,
) -> Element {
    let lookups = use_lookups();
    let mut draft = use_signal(String::new);
    let mut query = use_signal(String::new);
    let sort = use_signal(SortConfig::default);
    let mut list = list;

    if (list.loading)() {
        return rsx! {
            div { class: "p-8 text-center text-neutral-500", "Cargando usuarios..." }
        };
    }

    let cache = lookups.state.read().cache.clone();
    let data = list.data.read().clone();
    let active_query = query();
    let rows: Vec<(String, Usuario)> = visible_usuarios(&data, &active_query, sort(), &cache)
        .into_iter()
        .enumerate()
        .map(|(i, u)| {
            let key = u.key().map(|k| k.to_string()).unwrap_or_else(|| format!("row-{i}"));
            (key, u.clone())
        })
        .collect();
    let shown = rows.len();
    let total = data.len();
    let empty = empty_state(total, shown, (list.error)().is_some(), &active_query);

    rsx! {
        div {
            class: "bg-white border border-neutral-200 rounded-lg",

            div {
                class: "flex flex-wrap items-center justify-between gap-3 p-4 border-b border-neutral-200",
                form {
                    class: "flex flex-1 items-center gap-2",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        query.set(draft().trim().to_string());
                    },
                    span {
                        class: "inline-flex items-center gap-1 text-sm font-semibold whitespace-nowrap",
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                        " Búsqueda:"
                    }
                    input {
                        class: "input max-w-md",
                        r#type: "text",
                        placeholder: "Buscar por MR, apellido, nombre, usuario, jerarquía o destino...",
                        value: "{draft}",
                        oninput: move |evt: FormEvent| draft.set(evt.value()),
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Buscar" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            draft.set(String::new());
                            query.set(String::new());
                        },
                        "Limpiar"
                    }
                }
                div {
                    class: "text-xs text-right text-neutral-500",
                    "Mostrando "
                    strong { "{shown}" }
                    " de "
                    strong { "{total}" }
                    " resultados"
                    if !active_query.is_empty() {
                        div { class: "mt-0.5", "Búsqueda: \"{active_query}\"" }
                    }
                }
            }

            if let Some(message) = (list.error)() {
                div {
                    class: "alert alert-error m-4",
                    Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                    div {
                        class: "flex-1",
                        h4 { class: "m-0 mb-1 font-semibold", "Error de Conexión" }
                        p { class: "m-0", "{message}" }
                    }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| list.refresh(),
                        Icon { icon: FaRotateRight, width: 12, height: 12 }
                        " Reintentar"
                    }
                }
            }

            div {
                class: "overflow-x-auto",
                if let Some(message) = empty {
                    div { class: "py-12 px-4 text-center text-neutral-500", "{message}" }
                } else if shown > 0 {
                    table {
                        class: "w-full border-collapse text-sm",
                        thead {
                            tr {
                                for column in SortKey::ALL {
                                    SortHeader { key: "{column.header()}", column, sort }
                                }
                                th { class: "px-3 py-2 text-right font-semibold text-neutral-600 bg-neutral-50 whitespace-nowrap", "Acciones" }
                            }
                        }
                        tbody {
                            for (row_key, usuario) in rows {
                                UsuarioRow {
                                    key: "{row_key}",
                                    jerarquia: jerarquia_label(&usuario, &cache),
                                    destino: destino_label(&usuario, &cache),
                                    usuario,
                                    on_view,
                                    on_edit,
                                    on_delete,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SortHeader(column: SortKey, sort: Signal<SortConfig>) -> Element {
    let mut sort = sort;
    let direction = sort.read().is_sorted_by(column);
    rsx! {
        th {
            class: if direction.is_some() {
                "px-3 py-2 text-left font-semibold whitespace-nowrap cursor-pointer select-none bg-neutral-50 text-primary-500"
            } else {
                "px-3 py-2 text-left font-semibold whitespace-nowrap cursor-pointer select-none bg-neutral-50 text-neutral-600"
            },
            onclick: move |_| {
                let next = sort().toggle(column);
                sort.set(next);
            },
            span { class: "mr-1.5", "{column.header()}" }
            match direction {
                Some(SortDirection::Asc) => rsx! { Icon { icon: FaSortUp, width: 12, height: 12 } },
                Some(SortDirection::Desc) => rsx! { Icon { icon: FaSortDown, width: 12, height: 12 } },
                None => rsx! { Icon { icon: FaSort, width: 12, height: 12 } },
            }
        }
    }
}

#[component]
fn UsuarioRow(
    usuario: Usuario,
    jerarquia: String,
    destino: String,
    on_view: EventHandler<Usuario>,
    on_edit: EventHandler<Usuario>,
    on_delete: EventHandler<Usuario>,
) -> Element {
    let view = usuario.clone();
    let edit = usuario.clone();
    let delete = usuario.clone();

    rsx! {
        tr {
            class: "border-b border-neutral-100 hover:bg-neutral-50",
            td { class: "px-3 py-2 tabular-nums", "{usuario.matricula().unwrap_or_default()}" }
            td { class: "px-3 py-2", "{usuario.apellido().unwrap_or_default()}" }
            td { class: "px-3 py-2", "{usuario.nombre().unwrap_or_default()}" }
            td { class: "px-3 py-2", "{usuario.logon_name().unwrap_or_default()}" }
            td { class: "px-3 py-2", "{jerarquia}" }
            td { class: "px-3 py-2", "{destino}" }
            td {
                class: "px-3 py-2 text-right whitespace-nowrap",
                button {
                    class: "icon-btn",
                    title: "Ver detalles",
                    onclick: move |_| on_view.call(view.clone()),
                    Icon { icon: FaEye, width: 14, height: 14 }
                }
                button {
                    class: "icon-btn",
                    title: "Editar",
                    onclick: move |_| on_edit.call(edit.clone()),
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                button {
                    class: "icon-btn hover:text-red-700",
                    title: "Eliminar",
                    onclick: move |_| on_delete.call(delete.clone()),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                }
            }
        }
    }
}

/// Message for a table with no rows. A failed load shows only the error
/// banner.
fn empty_state(total: usize, shown: usize, failed: bool, query: &str) -> Option<String> {
    if failed && total == 0 {
        None
    } else if total == 0 {
        Some("No hay usuarios registrados".to_string())
    } else if shown == 0 {
        Some(format!("No se encontraron resultados para \"{query}\""))
    } else {
        None
    }
}
