//! Client-side search and column sorting over the loaded user list.

use crate::lookups::{LookupCache, LookupKind};
use crate::models::Usuario;

pub const NO_INFORMATION: &str = "Sin Información";

/// Rank shown in the table: embedded object first, then the lookup cache,
/// then `"ID: n"`, then [`NO_INFORMATION`].
pub fn jerarquia_label(usuario: &Usuario, lookups: &LookupCache) -> String {
    if let Some(j) = &usuario.jerarquia {
        if let Some(nombre) = j.nombre.as_deref().filter(|s| !s.is_empty()) {
            return nombre.to_string();
        }
        if let Some(iniciales) = j.iniciales.as_deref().filter(|s| !s.is_empty()) {
            return iniciales.to_string();
        }
    }
    resolved_or_id(usuario.jerarquia_id.as_ref(), LookupKind::Jerarquias, lookups)
}

/// Destination shown in the table, same degradation as [`jerarquia_label`].
pub fn destino_label(usuario: &Usuario, lookups: &LookupCache) -> String {
    if let Some(nombre) = usuario
        .destino
        .as_ref()
        .and_then(|d| d.nombre.as_deref())
        .filter(|s| !s.is_empty())
    {
        return nombre.to_string();
    }
    resolved_or_id(usuario.destino_id.as_ref(), LookupKind::Destinos, lookups)
}

fn resolved_or_id(
    id: Option<&crate::models::RawId>,
    kind: LookupKind,
    lookups: &LookupCache,
) -> String {
    match id.filter(|id| id.is_present()) {
        Some(id) => match lookups.detail_by_id(kind, id) {
            "" => format!("ID: {id}"),
            label => label.to_string(),
        },
        None => NO_INFORMATION.to_string(),
    }
}

/// Whether any searchable field contains `needle` (already lowercased).
fn matches(usuario: &Usuario, needle: &str, lookups: &LookupCache) -> bool {
    let contains = |value: Option<&str>| {
        value
            .map(|v| v.to_lowercase().contains(needle))
            .unwrap_or(false)
    };
    contains(usuario.matricula().as_deref())
        || contains(usuario.apellido())
        || contains(usuario.nombre())
        || contains(usuario.logon_name())
        || jerarquia_label(usuario, lookups).to_lowercase().contains(needle)
        || destino_label(usuario, lookups).to_lowercase().contains(needle)
}

/// Records whose roll number, surname, name, logon, rank or destination
/// contains `query` case-insensitively. A blank query keeps every record.
pub fn filter_usuarios<'a>(
    usuarios: &'a [Usuario],
    query: &str,
    lookups: &LookupCache,
) -> Vec<&'a Usuario> {
    let query = query.trim();
    if query.is_empty() {
        return usuarios.iter().collect();
    }
    let needle = query.to_lowercase();
    usuarios
        .iter()
        .filter(|u| matches(u, &needle, lookups))
        .collect()
}

/// Sortable table columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    MatriculaRevista,
    Apellido,
    Nombre,
    UserName,
    Jerarquia,
    Destino,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::MatriculaRevista,
        SortKey::Apellido,
        SortKey::Nombre,
        SortKey::UserName,
        SortKey::Jerarquia,
        SortKey::Destino,
    ];

    pub fn header(self) -> &'static str {
        match self {
            SortKey::MatriculaRevista => "MR",
            SortKey::Apellido => "Apellido",
            SortKey::Nombre => "Nombre",
            SortKey::UserName => "Usuario",
            SortKey::Jerarquia => "Jerarquía",
            SortKey::Destino => "Destino",
        }
    }

    /// The column value coerced to a string; missing values compare as `""`.
    pub fn value(self, usuario: &Usuario, lookups: &LookupCache) -> String {
        match self {
            SortKey::MatriculaRevista => usuario.matricula().unwrap_or_default(),
            SortKey::Apellido => usuario.apellido().unwrap_or_default().to_string(),
            SortKey::Nombre => usuario.nombre().unwrap_or_default().to_string(),
            SortKey::UserName => usuario.logon_name().unwrap_or_default().to_string(),
            SortKey::Jerarquia => jerarquia_label(usuario, lookups),
            SortKey::Destino => destino_label(usuario, lookups),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Current sort column and direction. No key means input order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Header click: the same column flips ascending to descending, anything
    /// else starts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == Some(key) && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self {
            key: Some(key),
            direction,
        }
    }

    pub fn is_sorted_by(&self, key: SortKey) -> Option<SortDirection> {
        (self.key == Some(key)).then_some(self.direction)
    }
}

/// Sort `rows` in place. Ascending is a stable sort on the string-coerced
/// column; descending is the exact reverse of the ascending order.
pub fn sort_usuarios(rows: &mut Vec<&Usuario>, config: SortConfig, lookups: &LookupCache) {
    let Some(key) = config.key else {
        return;
    };
    let mut keyed: Vec<(String, &Usuario)> = rows
        .iter()
        .map(|u| (key.value(u, lookups), *u))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    if config.direction == SortDirection::Desc {
        keyed.reverse();
    }
    *rows = keyed.into_iter().map(|(_, u)| u).collect();
}

/// Filter then sort, the way the table renders.
pub fn visible_usuarios<'a>(
    usuarios: &'a [Usuario],
    query: &str,
    config: SortConfig,
    lookups: &LookupCache,
) -> Vec<&'a Usuario> {
    let mut rows = filter_usuarios(usuarios, query, lookups);
    sort_usuarios(&mut rows, config, lookups);
    rows
}
