//! State machine behind the usuario wizard.
//!
//! Steps run Personal → Militar → Clasificación → Acceso → Confirmar. Edit
//! mode skips Acceso: credentials are managed by the authentication service.
//! Errors are recorded per field but only shown once the field is touched
//! (blurred, or its step validated).

use std::collections::{BTreeMap, BTreeSet};

use store::models::parse_int_prefix;
use store::lookups::NOT_SPECIFIED;
use store::{CreateUsuarioRequest, LookupCache, LookupKind, RawId, UpdateUsuarioRequest, Usuario};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Personal,
    Militar,
    Clasificacion,
    Acceso,
    Confirmar,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Personal,
        Step::Militar,
        Step::Clasificacion,
        Step::Acceso,
        Step::Confirmar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Step::Personal => "Personal",
            Step::Militar => "Militar",
            Step::Clasificacion => "Clasificación",
            Step::Acceso => "Acceso",
            Step::Confirmar => "Confirmar",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Personal => "Datos Personales",
            Step::Militar => "Información Militar",
            Step::Clasificacion => "Clasificación y Permisos",
            Step::Acceso => "Datos de Acceso",
            Step::Confirmar => "Confirmar Datos",
        }
    }

    /// Fields checked before leaving this step.
    pub fn validated_fields(self) -> &'static [Field] {
        match self {
            Step::Personal => &[Field::MatriculaRevista, Field::Apellido, Field::Nombre],
            Step::Militar => &[Field::JerarquiaId],
            Step::Clasificacion => &[Field::NivelId, Field::IdTipoClasificacion],
            Step::Acceso => &[Field::UserName, Field::Password, Field::PasswordConfirmation],
            Step::Confirmar => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    MatriculaRevista,
    Apellido,
    Nombre,
    JerarquiaId,
    DestinoId,
    IdCuerpo,
    IdEscalafon,
    NivelId,
    IdTipoClasificacion,
    Confianza,
    SuperConfianza,
    UserName,
    Password,
    PasswordConfirmation,
}

impl Field {
    pub fn step(self) -> Step {
        match self {
            Field::MatriculaRevista | Field::Apellido | Field::Nombre => Step::Personal,
            Field::JerarquiaId | Field::DestinoId | Field::IdCuerpo | Field::IdEscalafon => {
                Step::Militar
            }
            Field::NivelId
            | Field::IdTipoClasificacion
            | Field::Confianza
            | Field::SuperConfianza => Step::Clasificacion,
            Field::UserName | Field::Password | Field::PasswordConfirmation => Step::Acceso,
        }
    }

    /// Map a server-side field name (PascalCase, camelCase, any case) to a form field.
    pub fn from_server_name(name: &str) -> Option<Field> {
        let field = match name.to_ascii_lowercase().as_str() {
            "matricularevista" => Field::MatriculaRevista,
            "apellido" => Field::Apellido,
            "nombre" => Field::Nombre,
            "jerarquiaid" => Field::JerarquiaId,
            "destinoid" => Field::DestinoId,
            "idcuerpo" => Field::IdCuerpo,
            "idescalafon" => Field::IdEscalafon,
            "nivelid" => Field::NivelId,
            "idtipoclasificacion" => Field::IdTipoClasificacion,
            "confianza" => Field::Confianza,
            "superconfianza" => Field::SuperConfianza,
            "logon" | "username" => Field::UserName,
            "password" => Field::Password,
            "passwordconfirmation" => Field::PasswordConfirmation,
            _ => return None,
        };
        Some(field)
    }
}

/// Raw form values, as typed or selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormData {
    pub matricula_revista: String,
    pub apellido: String,
    pub nombre: String,
    pub jerarquia_id: String,
    pub destino_id: String,
    pub id_cuerpo: String,
    pub id_escalafon: String,
    pub nivel_id: String,
    pub id_tipo_clasificacion: String,
    pub confianza: bool,
    pub super_confianza: bool,
    pub user_name: String,
    pub password: String,
    pub password_confirmation: String,
}

fn id_text(id: &Option<RawId>) -> String {
    id.as_ref()
        .filter(|id| id.is_present())
        .and_then(RawId::as_i64)
        .map(|id| id.to_string())
        .unwrap_or_default()
}

fn optional_id(value: &str) -> Option<i64> {
    parse_int_prefix(value.trim())
}

impl FormData {
    /// Prefill from an existing record.
    pub fn from_usuario(usuario: &Usuario) -> Self {
        Self {
            matricula_revista: usuario.matricula().unwrap_or_default(),
            apellido: usuario.apellido().unwrap_or_default().to_string(),
            nombre: usuario.nombre().unwrap_or_default().to_string(),
            jerarquia_id: id_text(&usuario.jerarquia_id),
            destino_id: id_text(&usuario.destino_id),
            id_cuerpo: id_text(&usuario.id_cuerpo),
            id_escalafon: id_text(&usuario.id_escalafon),
            nivel_id: id_text(&usuario.nivel_id),
            id_tipo_clasificacion: id_text(&usuario.id_tipo_clasificacion),
            confianza: usuario.has_confianza(),
            super_confianza: usuario.has_super_confianza(),
            user_name: usuario.logon_name().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::MatriculaRevista => &self.matricula_revista,
            Field::Apellido => &self.apellido,
            Field::Nombre => &self.nombre,
            Field::JerarquiaId => &self.jerarquia_id,
            Field::DestinoId => &self.destino_id,
            Field::IdCuerpo => &self.id_cuerpo,
            Field::IdEscalafon => &self.id_escalafon,
            Field::NivelId => &self.nivel_id,
            Field::IdTipoClasificacion => &self.id_tipo_clasificacion,
            Field::UserName => &self.user_name,
            Field::Password => &self.password,
            Field::PasswordConfirmation => &self.password_confirmation,
            Field::Confianza | Field::SuperConfianza => "",
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::MatriculaRevista => &mut self.matricula_revista,
            Field::Apellido => &mut self.apellido,
            Field::Nombre => &mut self.nombre,
            Field::JerarquiaId => &mut self.jerarquia_id,
            Field::DestinoId => &mut self.destino_id,
            Field::IdCuerpo => &mut self.id_cuerpo,
            Field::IdEscalafon => &mut self.id_escalafon,
            Field::NivelId => &mut self.nivel_id,
            Field::IdTipoClasificacion => &mut self.id_tipo_clasificacion,
            Field::UserName => &mut self.user_name,
            Field::Password => &mut self.password,
            Field::PasswordConfirmation => &mut self.password_confirmation,
            Field::Confianza | Field::SuperConfianza => return None,
        })
    }

    pub fn flag(&self, field: Field) -> bool {
        match field {
            Field::Confianza => self.confianza,
            Field::SuperConfianza => self.super_confianza,
            _ => false,
        }
    }

    /// Label/value pairs for the confirmation step.
    pub fn review_rows(&self, lookups: &LookupCache, with_credentials: bool) -> Vec<(&'static str, String)> {
        let select = |kind: LookupKind, value: &str| {
            lookups
                .lookup_by_id(kind, &RawId::from(value))
                .map(|entry| entry.option_label())
                .filter(|label| !label.is_empty())
                .unwrap_or(NOT_SPECIFIED)
                .to_string()
        };
        let yes_no = |flag: bool| (if flag { "SÍ" } else { "NO" }).to_string();

        let mut rows = vec![
            ("Matrícula de Revista", self.matricula_revista.clone()),
            ("Apellido", self.apellido.trim().to_string()),
            ("Nombre", self.nombre.trim().to_string()),
            ("Jerarquía", select(LookupKind::Jerarquias, &self.jerarquia_id)),
            ("Destino", select(LookupKind::Destinos, &self.destino_id)),
            ("Cuerpo", select(LookupKind::Cuerpos, &self.id_cuerpo)),
            ("Escalafón", select(LookupKind::Escalafones, &self.id_escalafon)),
            ("Nivel", select(LookupKind::Niveles, &self.nivel_id)),
            ("Tipo de Clasificación", select(LookupKind::TiposClasificacion, &self.id_tipo_clasificacion)),
            ("Confianza", yes_no(self.confianza)),
            ("Super Confianza", yes_no(self.super_confianza)),
        ];
        if with_credentials {
            rows.push(("Usuario", self.user_name.trim().to_string()));
        }
        rows
    }

    /// `None` when a required select does not hold a number.
    pub fn to_update_request(&self) -> Option<UpdateUsuarioRequest> {
        Some(UpdateUsuarioRequest {
            matricula_revista: self.matricula_revista.clone(),
            apellido: self.apellido.trim().to_string(),
            nombre: self.nombre.trim().to_string(),
            jerarquia_id: optional_id(&self.jerarquia_id)?,
            destino_id: optional_id(&self.destino_id),
            nivel_id: optional_id(&self.nivel_id)?,
            id_tipo_clasificacion: optional_id(&self.id_tipo_clasificacion)?,
            id_escalafon: optional_id(&self.id_escalafon),
            id_cuerpo: optional_id(&self.id_cuerpo),
            confianza: self.confianza,
            super_confianza: self.super_confianza,
        })
    }

    pub fn to_create_request(&self) -> Option<CreateUsuarioRequest> {
        let update = self.to_update_request()?;
        Some(CreateUsuarioRequest {
            logon: self.user_name.trim().to_string(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
            matricula_revista: update.matricula_revista,
            apellido: update.apellido,
            nombre: update.nombre,
            jerarquia_id: update.jerarquia_id,
            destino_id: update.destino_id,
            nivel_id: update.nivel_id,
            id_tipo_clasificacion: update.id_tipo_clasificacion,
            id_escalafon: update.id_escalafon,
            id_cuerpo: update.id_cuerpo,
            confianza: update.confianza,
            super_confianza: update.super_confianza,
        })
    }
}

const REQUIRED: &str = "Este campo es obligatorio";

/// Client-side rule for one field, or `None` when the value is acceptable.
pub fn validate_field(field: Field, data: &FormData) -> Option<&'static str> {
    let value = data.text(field);
    match field {
        Field::MatriculaRevista => {
            let ok = value.len() == 7 && value.bytes().all(|b| b.is_ascii_digit());
            (!ok).then_some("Debe tener exactamente 7 dígitos")
        }
        Field::Apellido | Field::Nombre => value.trim().is_empty().then_some(REQUIRED),
        Field::JerarquiaId | Field::NivelId | Field::IdTipoClasificacion => {
            value.is_empty().then_some(REQUIRED)
        }
        Field::UserName => {
            if value.trim().is_empty() {
                Some("El nombre de usuario es obligatorio")
            } else if value.chars().count() < 3 {
                Some("Debe tener al menos 3 caracteres")
            } else {
                None
            }
        }
        Field::Password => {
            if value.is_empty() {
                Some("La contraseña es obligatoria")
            } else if value.chars().count() < 6 {
                Some("Debe tener al menos 6 caracteres")
            } else {
                None
            }
        }
        Field::PasswordConfirmation => {
            if value.is_empty() {
                Some("Debe confirmar la contraseña")
            } else if value != data.password {
                Some("Las contraseñas no coinciden")
            } else {
                None
            }
        }
        Field::DestinoId
        | Field::IdCuerpo
        | Field::IdEscalafon
        | Field::Confianza
        | Field::SuperConfianza => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WizardMode {
    Create,
    Edit { id: RawId },
}

/// What a back press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Back {
    Moved,
    Cancel,
}

/// A validated payload ready to send.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(CreateUsuarioRequest),
    Update(RawId, UpdateUsuarioRequest),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Wizard {
    pub mode: WizardMode,
    pub step: Step,
    pub data: FormData,
    errors: BTreeMap<Field, String>,
    touched: BTreeSet<Field>,
}

impl Wizard {
    pub fn create() -> Self {
        Self {
            mode: WizardMode::Create,
            step: Step::Personal,
            data: FormData::default(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
        }
    }

    pub fn edit(id: RawId, usuario: &Usuario) -> Self {
        Self {
            mode: WizardMode::Edit { id },
            data: FormData::from_usuario(usuario),
            ..Self::create()
        }
    }

    /// Edit mode for a loaded record; `None` when the record has no key.
    pub fn try_edit(usuario: &Usuario) -> Option<Self> {
        usuario.key().map(|id| Self::edit(id.clone(), usuario))
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, WizardMode::Edit { .. })
    }

    pub fn steps(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| !(self.is_edit() && *step == Step::Acceso))
            .collect()
    }

    /// Zero-based position of the current step.
    pub fn position(&self) -> usize {
        self.steps()
            .iter()
            .position(|s| *s == self.step)
            .unwrap_or(0)
    }

    pub fn is_last_step(&self) -> bool {
        self.position() + 1 == self.steps().len()
    }

    /// Progress bar fill, 0 on the first step and 100 on the last.
    pub fn progress_percent(&self) -> u32 {
        let last = self.steps().len().saturating_sub(1).max(1);
        (self.position() * 100 / last) as u32
    }

    /// The error to display for `field`: only once the field was touched.
    pub fn error(&self, field: Field) -> Option<&str> {
        if self.touched.contains(&field) {
            self.errors.get(&field).map(String::as_str)
        } else {
            None
        }
    }

    pub fn set_text(&mut self, field: Field, value: String) {
        if let Some(slot) = self.data.text_mut(field) {
            *slot = value;
        }
        if self.touched.contains(&field) {
            self.revalidate(field);
        }
    }

    pub fn set_flag(&mut self, field: Field, value: bool) {
        match field {
            Field::Confianza => self.data.confianza = value,
            Field::SuperConfianza => self.data.super_confianza = value,
            _ => {}
        }
    }

    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    fn revalidate(&mut self, field: Field) {
        match validate_field(field, &self.data) {
            Some(message) => {
                self.errors.insert(field, message.to_string());
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Touch and validate every field of `step`.
    pub fn validate_step(&mut self, step: Step) -> bool {
        let mut valid = true;
        for &field in step.validated_fields() {
            self.touched.insert(field);
            self.revalidate(field);
            valid &= !self.errors.contains_key(&field);
        }
        valid
    }

    /// Advance when the current step validates.
    pub fn next(&mut self) -> bool {
        if !self.validate_step(self.step) {
            return false;
        }
        let steps = self.steps();
        if let Some(next) = steps.get(self.position() + 1) {
            self.step = *next;
        }
        true
    }

    pub fn back(&mut self) -> Back {
        let position = self.position();
        if position == 0 {
            return Back::Cancel;
        }
        self.step = self.steps()[position - 1];
        Back::Moved
    }

    /// Validate every step; on failure move to the first invalid one.
    pub fn validate_all(&mut self) -> bool {
        let mut first_invalid = None;
        for step in self.steps() {
            if !self.validate_step(step) && first_invalid.is_none() {
                first_invalid = Some(step);
            }
        }
        match first_invalid {
            Some(step) => {
                self.step = step;
                false
            }
            None => true,
        }
    }

    /// Validate everything and build the request for the current mode.
    pub fn submission(&mut self) -> Option<Submission> {
        if !self.validate_all() {
            return None;
        }
        match &self.mode {
            WizardMode::Create => self.data.to_create_request().map(Submission::Create),
            WizardMode::Edit { id } => self
                .data
                .to_update_request()
                .map(|request| Submission::Update(id.clone(), request)),
        }
    }

    /// Record server-side validation errors against the matching fields and
    /// move to the earliest step carrying one. Returns how many were mapped.
    pub fn apply_server_errors(&mut self, field_errors: &[(String, Vec<String>)]) -> usize {
        let mut mapped = 0;
        for (name, messages) in field_errors {
            let (Some(field), Some(message)) = (Field::from_server_name(name), messages.first())
            else {
                continue;
            };
            if self.is_edit() && field.step() == Step::Acceso {
                continue;
            }
            self.errors.insert(field, message.clone());
            self.touched.insert(field);
            mapped += 1;
        }
        if let Some(step) = self.errors.keys().map(|f| f.step()).min() {
            if mapped > 0 {
                self.step = step;
            }
        }
        mapped
    }

    /// Back to an empty first step, keeping the mode.
    pub fn reset(&mut self) {
        *self = match &self.mode {
            WizardMode::Create => Self::create(),
            WizardMode::Edit { .. } => Self {
                mode: self.mode.clone(),
                step: Step::Personal,
                data: self.data.clone(),
                errors: BTreeMap::new(),
                touched: BTreeSet::new(),
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Wizard {
        let mut w = Wizard::create();
        w.set_text(Field::MatriculaRevista, "1234567".into());
        w.set_text(Field::Apellido, " Pérez ".into());
        w.set_text(Field::Nombre, "Juan".into());
        w.set_text(Field::JerarquiaId, "3".into());
        w.set_text(Field::NivelId, "1".into());
        w.set_text(Field::IdTipoClasificacion, "2".into());
        w.set_text(Field::UserName, "jperez".into());
        w.set_text(Field::Password, "secreto".into());
        w.set_text(Field::PasswordConfirmation, "secreto".into());
        w
    }

    #[test]
    fn test_matricula_rule() {
        let mut data = FormData::default();
        for (value, ok) in [("1234567", true), ("123456", false), ("12345678", false), ("12a4567", false), ("１２３４５６７", false)] {
            data.matricula_revista = value.into();
            assert_eq!(validate_field(Field::MatriculaRevista, &data).is_none(), ok, "{value}");
        }
    }

    #[test]
    fn test_credential_rules() {
        let mut data = FormData::default();
        assert_eq!(validate_field(Field::UserName, &data), Some("El nombre de usuario es obligatorio"));
        data.user_name = "ab".into();
        assert_eq!(validate_field(Field::UserName, &data), Some("Debe tener al menos 3 caracteres"));
        assert_eq!(validate_field(Field::Password, &data), Some("La contraseña es obligatoria"));
        data.password = "12345".into();
        assert_eq!(validate_field(Field::Password, &data), Some("Debe tener al menos 6 caracteres"));
        data.password = "123456".into();
        assert_eq!(validate_field(Field::PasswordConfirmation, &data), Some("Debe confirmar la contraseña"));
        data.password_confirmation = "654321".into();
        assert_eq!(validate_field(Field::PasswordConfirmation, &data), Some("Las contraseñas no coinciden"));
        data.password_confirmation = "123456".into();
        assert_eq!(validate_field(Field::PasswordConfirmation, &data), None);
    }

    #[test]
    fn test_next_blocks_on_invalid_step() {
        let mut w = Wizard::create();
        assert!(!w.next());
        assert_eq!(w.step, Step::Personal);
        assert_eq!(w.error(Field::MatriculaRevista), Some("Debe tener exactamente 7 dígitos"));
        assert_eq!(w.error(Field::Apellido), Some("Este campo es obligatorio"));
        // Fields of later steps stay untouched
        assert_eq!(w.error(Field::JerarquiaId), None);
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut w = Wizard::create();
        w.set_text(Field::Apellido, "".into());
        assert_eq!(w.error(Field::Apellido), None);
        w.blur(Field::Apellido);
        assert_eq!(w.error(Field::Apellido), Some("Este campo es obligatorio"));
        // Touched fields revalidate on edit
        w.set_text(Field::Apellido, "Gómez".into());
        assert_eq!(w.error(Field::Apellido), None);
    }

    #[test]
    fn test_walks_all_steps_and_back() {
        let mut w = filled();
        assert_eq!(w.progress_percent(), 0);
        for expected in [Step::Militar, Step::Clasificacion, Step::Acceso, Step::Confirmar] {
            assert!(w.next());
            assert_eq!(w.step, expected);
        }
        assert!(w.is_last_step());
        assert_eq!(w.progress_percent(), 100);
        assert_eq!(w.back(), Back::Moved);
        assert_eq!(w.step, Step::Acceso);

        let mut fresh = Wizard::create();
        assert_eq!(fresh.back(), Back::Cancel);
    }

    #[test]
    fn test_submission_builds_create_payload() {
        let mut w = filled();
        w.set_text(Field::IdEscalafon, "5".into());
        w.set_flag(Field::Confianza, true);
        let Some(Submission::Create(request)) = w.submission() else {
            panic!("expected a create submission");
        };
        assert_eq!(request.logon, "jperez");
        assert_eq!(request.apellido, "Pérez");
        assert_eq!(request.jerarquia_id, 3);
        assert_eq!(request.destino_id, None);
        assert_eq!(request.id_escalafon, Some(5));
        assert!(request.confianza);
        assert!(!request.super_confianza);
    }

    #[test]
    fn test_submission_jumps_to_first_invalid_step() {
        let mut w = filled();
        w.set_text(Field::NivelId, "".into());
        w.set_text(Field::PasswordConfirmation, "otra".into());
        w.step = Step::Confirmar;
        assert!(w.submission().is_none());
        assert_eq!(w.step, Step::Clasificacion);
        assert_eq!(w.error(Field::PasswordConfirmation), Some("Las contraseñas no coinciden"));
    }

    #[test]
    fn test_edit_mode_skips_credentials() {
        let usuario: Usuario = serde_json::from_str(
            r#"{"id": 8, "logon": "mgomez", "matriculaRevista": 7654321, "apellido": "Gómez",
                "nombre": "María", "jerarquiaId": "4", "nivelId": 2, "idTipoClasificacion": 1,
                "destinoId": 0, "superConfianza": true}"#,
        )
        .unwrap();
        let mut w = Wizard::edit(RawId::from(8), &usuario);
        assert_eq!(w.steps().len(), 4);
        assert!(!w.steps().contains(&Step::Acceso));
        assert_eq!(w.data.jerarquia_id, "4");
        assert_eq!(w.data.destino_id, "");

        while !w.is_last_step() {
            assert!(w.next());
        }
        let Some(Submission::Update(id, request)) = w.submission() else {
            panic!("expected an update submission");
        };
        assert_eq!(id, RawId::from(8));
        assert_eq!(request.matricula_revista, "7654321");
        assert_eq!(request.destino_id, None);
        assert!(request.super_confianza);
    }

    #[test]
    fn test_server_errors_map_to_fields() {
        let mut w = filled();
        w.step = Step::Confirmar;
        let mapped = w.apply_server_errors(&[
            ("Logon".into(), vec!["El logon ya existe".into()]),
            ("matriculaRevista".into(), vec!["Duplicada".into()]),
            ("Unknown".into(), vec!["ignored".into()]),
        ]);
        assert_eq!(mapped, 2);
        assert_eq!(w.error(Field::UserName), Some("El logon ya existe"));
        assert_eq!(w.error(Field::MatriculaRevista), Some("Duplicada"));
        assert_eq!(w.step, Step::Personal);
    }

    #[test]
    fn test_edit_requires_a_key() {
        let keyless: Usuario = serde_json::from_str(r#"{"logon": "mgomez", "apellido": "Gómez"}"#).unwrap();
        assert!(Wizard::try_edit(&keyless).is_none());

        let keyed: Usuario = serde_json::from_str(r#"{"idUsuarioMinidoc": "5", "logon": "mgomez"}"#).unwrap();
        let w = Wizard::try_edit(&keyed).unwrap();
        assert!(w.is_edit());
        assert!(!w.steps().contains(&Step::Acceso));
    }

    #[test]
    fn test_edit_mode_ignores_credential_errors() {
        let usuario: Usuario = serde_json::from_str(
            r#"{"id": 8, "logon": "mgomez", "matriculaRevista": 7654321, "apellido": "Gómez",
                "nombre": "María", "jerarquiaId": 4, "nivelId": 2, "idTipoClasificacion": 1}"#,
        )
        .unwrap();
        let mut w = Wizard::edit(RawId::from(8), &usuario);
        w.step = Step::Confirmar;

        let mapped = w.apply_server_errors(&[
            ("Logon".into(), vec!["El logon ya existe".into()]),
            ("Password".into(), vec!["Muy corta".into()]),
        ]);
        assert_eq!(mapped, 0);
        assert_eq!(w.error(Field::UserName), None);
        assert_eq!(w.error(Field::Password), None);
        // Nothing to fix on an earlier step; the banner carries the message
        assert_eq!(w.step, Step::Confirmar);

        let mapped = w.apply_server_errors(&[
            ("Logon".into(), vec!["El logon ya existe".into()]),
            ("NivelId".into(), vec!["Nivel inválido".into()]),
        ]);
        assert_eq!(mapped, 1);
        assert_eq!(w.error(Field::NivelId), Some("Nivel inválido"));
        assert_eq!(w.step, Step::Clasificacion);
    }

    #[test]
    fn test_review_rows_resolve_lookups() {
        let lookups = LookupCache::from_raw([
            (LookupKind::Jerarquias, vec![serde_json::json!({"id": 3, "nombre": "Capitán", "iniciales": "CAP"})]),
            (LookupKind::TiposClasificacion, vec![serde_json::json!({"id": 2, "descripcion": "Operativo"})]),
        ]);
        let w = filled();
        let rows = w.data.review_rows(&lookups, true);
        let get = |label: &str| rows.iter().find(|(l, _)| *l == label).map(|(_, v)| v.as_str());
        assert_eq!(get("Jerarquía"), Some("Capitán"));
        assert_eq!(get("Tipo de Clasificación"), Some("Operativo"));
        assert_eq!(get("Destino"), Some("No especificado"));
        assert_eq!(get("Confianza"), Some("NO"));
        assert_eq!(get("Usuario"), Some("jperez"));
        assert!(w.data.review_rows(&lookups, false).iter().all(|(l, _)| *l != "Usuario"));
    }

    #[test]
    fn test_reset_returns_to_empty_first_step() {
        let mut w = filled();
        w.next();
        w.reset();
        assert_eq!(w, Wizard::create());
    }
}
