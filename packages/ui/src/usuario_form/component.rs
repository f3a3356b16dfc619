use dioxus::prelude::*;
use store::{LookupKind, Usuario};

use super::wizard::{Back, Field, Step, Submission, Wizard};
use crate::auth::use_backend;
use crate::icons::{FaArrowLeft, FaArrowRight, FaCircleCheck, FaCircleExclamation, FaRotateRight};
use crate::lookups::use_lookups;
use crate::Icon;

/// Shown instead of the form when asked to edit a record without a key.
pub const MISSING_KEY_MESSAGE: &str = "No se puede modificar el usuario: el registro no tiene identificador";

/// Multi-step create/edit form. `editing` switches to edit mode, prefilled
/// from the record; a record without a key is refused. `on_saved` receives
/// the success message.
#[component]
pub fn UsuarioForm(
    editing: Option<Usuario>,
    on_saved: EventHandler<String>,
    on_cancel: EventHandler<()>,
) -> Element {
    let backend = use_backend();
    let mut lookups = use_lookups();
    let initial = editing.clone();
    let mut wizard = use_signal(move || {
        initial
            .as_ref()
            .and_then(Wizard::try_edit)
            .unwrap_or_else(Wizard::create)
    });
    let mut submitting = use_signal(|| false);
    let mut banner = use_signal(|| None::<String>);
    let mut created = use_signal(|| false);

    if editing.as_ref().is_some_and(|u| u.key().is_none()) {
        return rsx! {
            div {
                class: "alert alert-error",
                Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                span { "{MISSING_KEY_MESSAGE}" }
            }
        };
    }

    let lookups_state = lookups.state.read().clone();
    if lookups_state.loading {
        return rsx! {
            div { class: "p-8 text-center text-neutral-500", "Cargando datos..." }
        };
    }
    if let Some(message) = lookups_state.error.clone() {
        return rsx! {
            div {
                class: "alert alert-error",
                Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                span { "{message}" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| lookups.refresh(),
                    Icon { icon: FaRotateRight, width: 12, height: 12 }
                    " Reintentar"
                }
            }
        };
    }

    if created() {
        return rsx! {
            div {
                class: "flex flex-col items-center py-8 px-4 text-center text-green-700",
                Icon { icon: FaCircleCheck, width: 48, height: 48 }
                h3 { class: "mt-3 mb-1 text-lg font-semibold text-neutral-900", "¡Usuario Creado Exitosamente!" }
                p { class: "m-0 text-sm text-neutral-600", "El usuario ha sido registrado en el sistema." }
                div {
                    class: "flex justify-center gap-2 mt-5",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| {
                            wizard.write().reset();
                            banner.set(None);
                            created.set(false);
                        },
                        "Crear Otro Usuario"
                    }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_cancel.call(()),
                        "Volver al listado"
                    }
                }
            }
        };
    }

    let submit = move |_| {
        let Some(submission) = wizard.write().submission() else {
            return;
        };
        let backend = backend.clone();
        submitting.set(true);
        banner.set(None);
        spawn(async move {
            let is_create = matches!(submission, Submission::Create(_));
            let result = match &submission {
                Submission::Create(request) => backend
                    .usuarios
                    .create(request)
                    .await
                    .map(|_| "Usuario creado exitosamente"),
                Submission::Update(id, request) => backend
                    .usuarios
                    .update(id, request)
                    .await
                    .map(|_| "Usuario actualizado exitosamente"),
            };
            submitting.set(false);
            match result {
                Ok(message) => {
                    if is_create {
                        created.set(true);
                    }
                    on_saved.call(message.to_string());
                }
                Err(e) => {
                    let mapped = wizard.write().apply_server_errors(&e.field_errors);
                    tracing::debug!("Mapped {} server field errors", mapped);
                    banner.set(Some(e.message));
                }
            }
        });
    };

    let state = wizard.read();
    let steps = state.steps();
    let position = state.position();
    let progress = state.progress_percent();
    let step = state.step;
    let is_last = state.is_last_step();
    let is_edit = state.is_edit();
    let review = state.data.review_rows(&lookups_state.cache, !is_edit);
    drop(state);

    rsx! {
        div {
            class: "bg-white border border-neutral-200 rounded-lg p-5",

            div {
                class: "h-1 bg-neutral-200 rounded-full overflow-hidden",
                div { class: "h-full bg-primary-500 transition-all", style: "width: {progress}%" }
            }
            ol {
                class: "flex justify-between list-none p-0 mt-3 mb-4",
                for (i, s) in steps.iter().enumerate() {
                    li {
                        key: "{s.label()}",
                        class: if i == position {
                            "flex items-center gap-1.5 text-xs font-semibold text-primary-500"
                        } else if i < position {
                            "flex items-center gap-1.5 text-xs text-green-700"
                        } else {
                            "flex items-center gap-1.5 text-xs text-neutral-400"
                        },
                        span {
                            class: "inline-flex items-center justify-center w-6 h-6 rounded-full border border-current",
                            "{i + 1}"
                        }
                        span { "{s.label()}" }
                    }
                }
            }

            if let Some(message) = banner() {
                div {
                    class: "alert alert-error",
                    Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                    span { "{message}" }
                }
            }

            h3 { class: "m-0 mb-4 text-base font-semibold text-neutral-800", "{step.title()}" }

            div {
                class: "grid grid-cols-1 md:grid-cols-2 gap-x-5 gap-y-4",
                match step {
                    Step::Personal => rsx! {
                        TextField {
                            wizard,
                            field: Field::MatriculaRevista,
                            label: "Matrícula de Revista *",
                            placeholder: "1234567",
                        }
                        TextField { wizard, field: Field::Apellido, label: "Apellido *" }
                        TextField { wizard, field: Field::Nombre, label: "Nombre *" }
                    },
                    Step::Militar => rsx! {
                        SelectField { wizard, field: Field::JerarquiaId, kind: LookupKind::Jerarquias, label: "Jerarquía *" }
                        SelectField { wizard, field: Field::DestinoId, kind: LookupKind::Destinos, label: "Destino" }
                        SelectField { wizard, field: Field::IdCuerpo, kind: LookupKind::Cuerpos, label: "Cuerpo" }
                        SelectField { wizard, field: Field::IdEscalafon, kind: LookupKind::Escalafones, label: "Escalafón" }
                    },
                    Step::Clasificacion => rsx! {
                        SelectField { wizard, field: Field::NivelId, kind: LookupKind::Niveles, label: "Nivel *" }
                        SelectField {
                            wizard,
                            field: Field::IdTipoClasificacion,
                            kind: LookupKind::TiposClasificacion,
                            label: "Tipo de Clasificación *",
                        }
                        CheckField { wizard, field: Field::Confianza, label: "Confianza" }
                        CheckField { wizard, field: Field::SuperConfianza, label: "Super Confianza" }
                    },
                    Step::Acceso => rsx! {
                        TextField { wizard, field: Field::UserName, label: "Nombre de Usuario *" }
                        TextField { wizard, field: Field::Password, label: "Contraseña *", input_type: "password" }
                        TextField {
                            wizard,
                            field: Field::PasswordConfirmation,
                            label: "Confirmar Contraseña *",
                            input_type: "password",
                        }
                    },
                    Step::Confirmar => rsx! {
                        dl {
                            class: "col-span-full m-0",
                            for (label, value) in review {
                                div {
                                    key: "{label}",
                                    class: "flex justify-between py-1.5 border-b border-neutral-100 text-sm",
                                    dt { class: "text-neutral-500", "{label}" }
                                    dd { class: "m-0 font-medium", "{value}" }
                                }
                            }
                        }
                    },
                }
            }

            div {
                class: "flex justify-between gap-2 mt-5",
                button {
                    class: "btn btn-secondary",
                    disabled: submitting(),
                    onclick: move |_| {
                        if wizard.write().back() == Back::Cancel {
                            on_cancel.call(());
                        }
                    },
                    Icon { icon: FaArrowLeft, width: 12, height: 12 }
                    if position == 0 { " Cancelar" } else { " Anterior" }
                }
                if is_last {
                    button {
                        class: "btn btn-primary",
                        disabled: submitting(),
                        onclick: submit,
                        if submitting() {
                            "Guardando..."
                        } else if is_edit {
                            "Guardar Cambios"
                        } else {
                            "Crear Usuario"
                        }
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| {
                            wizard.write().next();
                        },
                        "Siguiente "
                        Icon { icon: FaArrowRight, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[component]
fn FieldError(wizard: Signal<Wizard>, field: Field) -> Element {
    let error = wizard.read().error(field).map(str::to_string);
    rsx! {
        if let Some(message) = error {
            span { class: "text-xs text-red-600", "{message}" }
        }
    }
}

#[component]
fn TextField(
    wizard: Signal<Wizard>,
    field: Field,
    label: &'static str,
    #[props(default = "text")] input_type: &'static str,
    #[props(default = "")] placeholder: &'static str,
) -> Element {
    let value = wizard.read().data.text(field).to_string();
    let invalid = wizard.read().error(field).is_some();

    rsx! {
        div {
            class: "flex flex-col gap-1",
            label { class: "text-xs font-semibold text-neutral-700", "{label}" }
            input {
                class: if invalid { "input input-invalid" } else { "input" },
                r#type: input_type,
                placeholder,
                value: "{value}",
                oninput: move |evt: FormEvent| wizard.write().set_text(field, evt.value()),
                onblur: move |_| wizard.write().blur(field),
            }
            FieldError { wizard, field }
        }
    }
}

#[component]
fn SelectField(wizard: Signal<Wizard>, field: Field, kind: LookupKind, label: &'static str) -> Element {
    let lookups = use_lookups();
    let value = wizard.read().data.text(field).to_string();
    let invalid = wizard.read().error(field).is_some();
    let options: Vec<(i64, String)> = lookups
        .state
        .read()
        .cache
        .entries(kind)
        .iter()
        .map(|entry| (entry.id, entry.option_label().to_string()))
        .collect();

    rsx! {
        div {
            class: "flex flex-col gap-1",
            label { class: "text-xs font-semibold text-neutral-700", "{label}" }
            select {
                class: if invalid { "input input-invalid" } else { "input" },
                value: "{value}",
                onchange: move |evt: FormEvent| wizard.write().set_text(field, evt.value()),
                onblur: move |_| wizard.write().blur(field),
                option { value: "", "Seleccione..." }
                for (id, text) in options {
                    option {
                        key: "{id}",
                        value: "{id}",
                        selected: value == id.to_string(),
                        "{text}"
                    }
                }
            }
            FieldError { wizard, field }
        }
    }
}

#[component]
fn CheckField(wizard: Signal<Wizard>, field: Field, label: &'static str) -> Element {
    let checked = wizard.read().data.flag(field);
    rsx! {
        label {
            class: "flex items-center gap-2 text-sm",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |evt: FormEvent| wizard.write().set_flag(field, evt.checked()),
            }
            span { "{label}" }
        }
    }
}
