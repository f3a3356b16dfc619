//! # Lookup cache: reference tables resolved to display labels
//!
//! MINIDOC user records point into seven small catalog tables (rank,
//! destination, level, scope, corps, ladder, classification type). Each table
//! comes from its own endpoint and each uses its own field names, so entries
//! are normalized at fetch time into a single [`LookupEntry`] shape:
//!
//! | Kind | id candidates | nombre | abreviatura | descripcion | detalle | valor |
//! |------|---------------|--------|-------------|-------------|---------|-------|
//! | `Jerarquias` | `id`, `idJerarquia` | `nombre` | `iniciales` | | | |
//! | `Destinos` | `id`, `idDestino` | `nombre` | `cuatrigrama` | | | `nroDestino` |
//! | `Niveles` | `id`, `idNivel` | `nombre` | | | | `valor` |
//! | `Alcances` | `id`, `idAlcance` | `nombre` | | | | `valor` |
//! | `Cuerpos` | `id`, `idCuerpo` | | | `descripcion` | `detalle` | |
//! | `Escalafones` | `id`, `idEscalafon`, `idEscalafo` | | `letra` | `descripcion` | | |
//! | `TiposClasificacion` | `id`, `idTipoClasificacion`, `idClasificacion` | | | `descripcion` | `detalle` | |
//!
//! [`LookupCache`] then answers synchronous queries against the in-memory
//! tables. Resolution never fails: unknown ids give an empty label (or the
//! caller's fallback).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::RawId;

/// Placeholder used by the detail view when a label cannot be resolved.
pub const NOT_SPECIFIED: &str = "No especificado";

/// The reference tables the console knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LookupKind {
    Jerarquias,
    Destinos,
    Niveles,
    Alcances,
    Cuerpos,
    Escalafones,
    TiposClasificacion,
}

impl LookupKind {
    pub const ALL: [LookupKind; 7] = [
        LookupKind::Jerarquias,
        LookupKind::Destinos,
        LookupKind::Niveles,
        LookupKind::Alcances,
        LookupKind::Cuerpos,
        LookupKind::Escalafones,
        LookupKind::TiposClasificacion,
    ];

    /// Path of the MINIDOC endpoint serving this table.
    pub fn endpoint(self) -> &'static str {
        match self {
            LookupKind::Jerarquias => "/Jerarquia",
            LookupKind::Destinos => "/Destino",
            LookupKind::Niveles => "/Nivel",
            LookupKind::Alcances => "/Alcance",
            LookupKind::Cuerpos => "/Cuerpo",
            LookupKind::Escalafones => "/Escalafon",
            LookupKind::TiposClasificacion => "/TipoClasificacion",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LookupKind::Jerarquias => "Jerarquías",
            LookupKind::Destinos => "Destinos",
            LookupKind::Niveles => "Niveles",
            LookupKind::Alcances => "Alcances",
            LookupKind::Cuerpos => "Cuerpos",
            LookupKind::Escalafones => "Escalafones",
            LookupKind::TiposClasificacion => "Tipos de Clasificación",
        }
    }

    fn id_keys(self) -> &'static [&'static str] {
        match self {
            LookupKind::Jerarquias => &["id", "idJerarquia"],
            LookupKind::Destinos => &["id", "idDestino"],
            LookupKind::Niveles => &["id", "idNivel"],
            LookupKind::Alcances => &["id", "idAlcance"],
            LookupKind::Cuerpos => &["id", "idCuerpo"],
            LookupKind::Escalafones => &["id", "idEscalafon", "idEscalafo"],
            LookupKind::TiposClasificacion => &["id", "idTipoClasificacion", "idClasificacion"],
        }
    }
}

/// A normalized catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: i64,
    pub nombre: Option<String>,
    /// Short form: rank initials, destination four-letter code, ladder letter.
    pub abreviatura: Option<String>,
    pub descripcion: Option<String>,
    pub detalle: Option<String>,
    pub valor: Option<String>,
}

fn text_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn id_field(raw: &Value, key: &str) -> Option<i64> {
    let id = match raw.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => crate::models::parse_int_prefix(s),
        _ => None,
    }?;
    (id != 0).then_some(id)
}

fn first<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|c| c.as_deref().filter(|s| !s.is_empty()))
}

impl LookupEntry {
    /// Normalize one raw JSON object from a lookup endpoint. Entries without a
    /// usable id are dropped.
    pub fn normalize(kind: LookupKind, raw: &Value) -> Option<Self> {
        let id = kind.id_keys().iter().find_map(|key| id_field(raw, key))?;
        let entry = match kind {
            LookupKind::Jerarquias => LookupEntry {
                id,
                nombre: text_field(raw, "nombre"),
                abreviatura: text_field(raw, "iniciales"),
                ..Default::default()
            },
            LookupKind::Destinos => LookupEntry {
                id,
                nombre: text_field(raw, "nombre"),
                abreviatura: text_field(raw, "cuatrigrama"),
                valor: text_field(raw, "nroDestino"),
                ..Default::default()
            },
            LookupKind::Niveles | LookupKind::Alcances => LookupEntry {
                id,
                nombre: text_field(raw, "nombre"),
                valor: text_field(raw, "valor"),
                ..Default::default()
            },
            LookupKind::Cuerpos | LookupKind::TiposClasificacion => LookupEntry {
                id,
                descripcion: text_field(raw, "descripcion"),
                detalle: text_field(raw, "detalle"),
                ..Default::default()
            },
            LookupKind::Escalafones => LookupEntry {
                id,
                abreviatura: text_field(raw, "letra"),
                descripcion: text_field(raw, "descripcion"),
                ..Default::default()
            },
        };
        Some(entry)
    }

    /// Best display label for this kind of entry, or `""`.
    pub fn label(&self, kind: LookupKind) -> &str {
        let label = match kind {
            LookupKind::Jerarquias | LookupKind::Destinos => first(&[&self.nombre, &self.abreviatura]),
            LookupKind::Escalafones => first(&[&self.abreviatura, &self.descripcion]),
            _ => first(&[&self.descripcion, &self.nombre, &self.detalle]),
        };
        label.unwrap_or("")
    }

    /// Text shown in select options and the review step.
    pub fn option_label(&self) -> &str {
        first(&[&self.nombre, &self.descripcion, &self.abreviatura]).unwrap_or("")
    }

    /// Long description for the detail view, or `None` when every field is empty.
    pub fn describe(&self, kind: LookupKind) -> Option<String> {
        let text = match kind {
            LookupKind::Jerarquias | LookupKind::Destinos => {
                let nombre = self.nombre.as_deref().unwrap_or_default();
                match self.abreviatura.as_deref().filter(|a| !a.is_empty()) {
                    Some(abbr) => format!("{nombre} ({abbr})"),
                    None => nombre.to_string(),
                }
            }
            LookupKind::Escalafones => format!(
                "{} {}",
                self.abreviatura.as_deref().unwrap_or_default(),
                self.descripcion.as_deref().unwrap_or_default()
            )
            .trim()
            .to_string(),
            LookupKind::Cuerpos => self.descripcion.clone().unwrap_or_default(),
            LookupKind::Niveles | LookupKind::Alcances => self.nombre.clone().unwrap_or_default(),
            LookupKind::TiposClasificacion => self.label(kind).to_string(),
        };
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

/// Entry counts per table plus the total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LookupCounts {
    pub per_kind: BTreeMap<LookupKind, usize>,
    pub total: usize,
}

/// In-memory reference tables with synchronous resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LookupCache {
    tables: BTreeMap<LookupKind, Vec<LookupEntry>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from the raw JSON arrays of each endpoint.
    pub fn from_raw(tables: impl IntoIterator<Item = (LookupKind, Vec<Value>)>) -> Self {
        let mut cache = Self::new();
        for (kind, rows) in tables {
            let entries = rows
                .iter()
                .filter_map(|row| LookupEntry::normalize(kind, row))
                .collect();
            cache.insert(kind, entries);
        }
        cache
    }

    pub fn insert(&mut self, kind: LookupKind, entries: Vec<LookupEntry>) {
        self.tables.insert(kind, entries);
    }

    pub fn entries(&self, kind: LookupKind) -> &[LookupEntry] {
        self.tables.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The whole entry for `id`, if present.
    pub fn lookup_by_id(&self, kind: LookupKind, id: &RawId) -> Option<&LookupEntry> {
        let id = id.as_i64()?;
        self.entries(kind).iter().find(|entry| entry.id == id)
    }

    /// Best label for `id`, or `""` when the id is empty or unknown.
    pub fn detail_by_id(&self, kind: LookupKind, id: &RawId) -> &str {
        self.lookup_by_id(kind, id)
            .map(|entry| entry.label(kind))
            .unwrap_or("")
    }

    /// Like [`detail_by_id`](Self::detail_by_id) but substitutes `fallback` for an empty result.
    pub fn label_or<'a>(&'a self, kind: LookupKind, id: Option<&RawId>, fallback: &'a str) -> &'a str {
        match id.map(|id| self.detail_by_id(kind, id)) {
            Some(label) if !label.is_empty() => label,
            _ => fallback,
        }
    }

    /// Long description for the detail view, degrading to the short label and
    /// then to [`NOT_SPECIFIED`].
    pub fn describe(&self, kind: LookupKind, id: Option<&RawId>) -> String {
        id.and_then(|id| self.lookup_by_id(kind, id))
            .and_then(|entry| entry.describe(kind))
            .unwrap_or_else(|| self.label_or(kind, id, NOT_SPECIFIED).to_string())
    }

    pub fn has_data(&self, kind: LookupKind) -> bool {
        !self.entries(kind).is_empty()
    }

    pub fn counts(&self) -> LookupCounts {
        let per_kind: BTreeMap<LookupKind, usize> = LookupKind::ALL
            .iter()
            .map(|kind| (*kind, self.entries(*kind).len()))
            .collect();
        let total = per_kind.values().sum();
        LookupCounts { per_kind, total }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }
}
