//! Read-only detail modal for one usuario.
//!
//! The record is fetched fresh when the modal opens; [`detail_sections`]
//! turns it into labelled rows resolved against the lookup tables.

use dioxus::prelude::*;
use store::lookups::NOT_SPECIFIED;
use store::{LookupCache, LookupKind, RawId, Usuario};

use crate::auth::use_backend;
use crate::icons::{FaCircleExclamation, FaRotateRight, FaUser, FaXmark};
use crate::lookups::use_lookups;
use crate::views::ModalOverlay;
use crate::Icon;

#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    /// `Some(flag)` for SÍ/NO rows, so they can be styled.
    pub flag: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailSection {
    pub title: &'static str,
    pub rows: Vec<DetailRow>,
}

fn text_row(label: &'static str, value: Option<String>) -> DetailRow {
    DetailRow {
        label,
        value: value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        flag: None,
    }
}

fn flag_row(label: &'static str, flag: bool) -> DetailRow {
    DetailRow {
        label,
        value: (if flag { "SÍ" } else { "NO" }).to_string(),
        flag: Some(flag),
    }
}

fn present(id: &Option<RawId>) -> Option<&RawId> {
    id.as_ref().filter(|id| id.is_present())
}

/// Sections of the detail view. "Especialización" only appears when the
/// record has a corps or a ladder.
pub fn detail_sections(usuario: &Usuario, lookups: &LookupCache) -> Vec<DetailSection> {
    let describe = |kind: LookupKind, id: &Option<RawId>| lookups.describe(kind, present(id));

    let mut sections = vec![
        DetailSection {
            title: "Datos de Acceso",
            rows: vec![
                text_row("Usuario (Logon)", usuario.logon_name().map(str::to_string)),
                DetailRow {
                    label: "ID Usuario",
                    value: usuario
                        .key()
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                    flag: None,
                },
            ],
        },
        DetailSection {
            title: "Datos Personales",
            rows: vec![
                text_row("Matrícula de Revista", usuario.matricula()),
                text_row("Apellido", usuario.apellido().map(str::to_string)),
                text_row("Nombre", usuario.nombre().map(str::to_string)),
            ],
        },
        DetailSection {
            title: "Información Militar",
            rows: vec![
                text_row("Jerarquía", Some(describe(LookupKind::Jerarquias, &usuario.jerarquia_id))),
                text_row("Destino", Some(describe(LookupKind::Destinos, &usuario.destino_id))),
            ],
        },
    ];

    let mut especializacion = Vec::new();
    if present(&usuario.id_cuerpo).is_some() {
        especializacion.push(text_row(
            "Cuerpo",
            Some(describe(LookupKind::Cuerpos, &usuario.id_cuerpo)),
        ));
    }
    if present(&usuario.id_escalafon).is_some() {
        especializacion.push(text_row(
            "Escalafón",
            Some(describe(LookupKind::Escalafones, &usuario.id_escalafon)),
        ));
    }
    if !especializacion.is_empty() {
        sections.push(DetailSection {
            title: "Especialización",
            rows: especializacion,
        });
    }

    sections.push(DetailSection {
        title: "Nivel y Alcance",
        rows: vec![
            text_row("Nivel", Some(describe(LookupKind::Niveles, &usuario.nivel_id))),
            text_row("Alcance", Some(describe(LookupKind::Alcances, &usuario.alcance_id))),
        ],
    });
    sections.push(DetailSection {
        title: "Permisos Especiales",
        rows: vec![
            flag_row("Confianza", usuario.has_confianza()),
            flag_row("Super Confianza", usuario.has_super_confianza()),
        ],
    });
    sections
}

/// Modal showing one usuario. Closes on Escape, the close button or a click
/// outside the card.
#[component]
pub fn UsuarioDetailModal(usuario_id: RawId, on_close: EventHandler<()>) -> Element {
    let backend = use_backend();
    let lookups = use_lookups();
    let mut attempt = use_signal(|| 0u32);

    let id = usuario_id.clone();
    let record = use_resource(move || {
        let backend = backend.clone();
        let id = id.clone();
        async move {
            let _ = attempt();
            tracing::debug!(%id, "📥 Loading usuario detail");
            backend.usuarios.get_by_id(&id).await
        }
    });

    let loaded = record.read().clone();
    let cache = lookups.state.read().cache.clone();
    let usuario = match &loaded {
        Some(Ok(u)) => Some(u.clone()),
        _ => None,
    };
    let title = usuario
        .as_ref()
        .map(Usuario::full_name)
        .unwrap_or_else(|| "Cargando...".to_string());

    rsx! {
        ModalOverlay {
            on_close,
            wide: true,
            div {
                class: "flex items-center gap-3 px-5 py-4 border-b border-neutral-200",
                div {
                    class: "flex p-2 rounded-full bg-primary-50 text-primary-500",
                    Icon { icon: FaUser, width: 22, height: 22 }
                }
                div {
                    class: "flex-1",
                    h2 { class: "m-0 text-lg font-semibold text-neutral-900", "{title}" }
                    if let Some(u) = &usuario {
                        span {
                            class: "text-xs text-neutral-500",
                            "Usuario: {u.logon_name().unwrap_or_default()} | MR: {u.matricula().unwrap_or_default()}"
                        }
                    }
                }
                button {
                    class: "bg-transparent border-none cursor-pointer text-neutral-500 hover:text-neutral-800",
                    aria_label: "Cerrar modal",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaXmark, width: 20, height: 20 }
                }
            }
            div {
                class: "p-5",
                match loaded {
                    None => rsx! {
                        div { class: "p-8 text-center text-neutral-500", "Cargando información del usuario..." }
                    },
                    Some(Err(e)) => rsx! {
                        div {
                            class: "alert alert-error",
                            Icon { icon: FaCircleExclamation, width: 18, height: 18 }
                            div {
                                h3 { class: "m-0 mb-1 text-sm font-semibold", "Error al cargar los datos" }
                                p { class: "m-0 mb-2", "{e.message}" }
                                button {
                                    class: "btn btn-secondary",
                                    onclick: move |_| *attempt.write() += 1,
                                    Icon { icon: FaRotateRight, width: 12, height: 12 }
                                    " Reintentar"
                                }
                            }
                        }
                    },
                    Some(Ok(u)) => rsx! {
                        div {
                            class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                            for section in detail_sections(&u, &cache) {
                                div {
                                    key: "{section.title}",
                                    class: "border border-neutral-200 rounded-md px-4 py-3",
                                    h3 { class: "m-0 mb-2 text-sm font-semibold text-primary-500", "{section.title}" }
                                    for row in section.rows {
                                        div {
                                            key: "{row.label}",
                                            class: "flex justify-between gap-4 py-1 text-sm",
                                            span { class: "text-neutral-500", "{row.label}:" }
                                            span {
                                                class: match row.flag {
                                                    Some(true) => "font-medium text-right text-green-700",
                                                    Some(false) => "font-medium text-right text-red-700",
                                                    None => "font-medium text-right text-neutral-800",
                                                },
                                                "{row.value}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cache() -> LookupCache {
        LookupCache::from_raw([
            (
                LookupKind::Jerarquias,
                vec![json!({"idJerarquia": 3, "nombre": "Capitán", "iniciales": "CT"})],
            ),
            (
                LookupKind::Cuerpos,
                vec![json!({"idCuerpo": 2, "descripcion": "Comando"})],
            ),
            (LookupKind::Niveles, vec![json!({"idNivel": 1, "nombre": "Alto"})]),
        ])
    }

    fn usuario() -> Usuario {
        serde_json::from_value(json!({
            "id": 12,
            "logon": "jperez",
            "matriculaRevista": 1234567,
            "apellido": "Pérez",
            "nombre": "Juan",
            "jerarquiaId": 3,
            "nivelId": 1,
            "confianza": true
        }))
        .unwrap()
    }

    fn section<'a>(sections: &'a [DetailSection], title: &str) -> &'a DetailSection {
        sections.iter().find(|s| s.title == title).unwrap()
    }

    #[test]
    fn test_sections_resolve_lookups() {
        let sections = detail_sections(&usuario(), &cache());
        let militar = section(&sections, "Información Militar");
        assert_eq!(militar.rows[0].value, "Capitán (CT)");
        assert_eq!(militar.rows[1].value, NOT_SPECIFIED);
        let nivel = section(&sections, "Nivel y Alcance");
        assert_eq!(nivel.rows[0].value, "Alto");
        assert_eq!(nivel.rows[1].value, NOT_SPECIFIED);
    }

    #[test]
    fn test_access_and_personal_rows() {
        let sections = detail_sections(&usuario(), &cache());
        let acceso = section(&sections, "Datos de Acceso");
        assert_eq!(acceso.rows[0].value, "jperez");
        assert_eq!(acceso.rows[1].value, "12");
        let personal = section(&sections, "Datos Personales");
        assert_eq!(personal.rows[0].value, "1234567");
        assert_eq!(personal.rows[1].value, "Pérez");
    }

    #[test]
    fn test_especializacion_only_with_corps_or_ladder() {
        let sections = detail_sections(&usuario(), &cache());
        assert!(sections.iter().all(|s| s.title != "Especialización"));

        let mut with_corps = usuario();
        with_corps.id_cuerpo = Some(RawId::from(2));
        let sections = detail_sections(&with_corps, &cache());
        let esp = section(&sections, "Especialización");
        assert_eq!(esp.rows.len(), 1);
        assert_eq!(esp.rows[0].value, "Comando");
    }

    #[test]
    fn test_flags_render_si_no() {
        let sections = detail_sections(&usuario(), &cache());
        let permisos = section(&sections, "Permisos Especiales");
        assert_eq!(permisos.rows[0].value, "SÍ");
        assert_eq!(permisos.rows[0].flag, Some(true));
        assert_eq!(permisos.rows[1].value, "NO");
    }

    #[test]
    fn test_missing_key_shows_na() {
        let sections = detail_sections(&Usuario::default(), &LookupCache::new());
        let acceso = section(&sections, "Datos de Acceso");
        assert_eq!(acceso.rows[0].value, NOT_SPECIFIED);
        assert_eq!(acceso.rows[1].value, "N/A");
    }
}
