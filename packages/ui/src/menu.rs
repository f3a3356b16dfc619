//! # Usuario module menu
//!
//! Static configuration of the section sidebar: four categories, each with
//! its sections in display order. Only sections flagged `implemented` have a
//! working view; the rest render a placeholder.
//!
//! | Category | Sections |
//! |----------|----------|
//! | Listado y Consultas | Listado General, Búsqueda Avanzada |
//! | Gestión | Agregar Usuario, Modificar Usuario, Movimientos |
//! | Permisos y Accesos | Otorgar Permisos, Control de Accesos |
//! | Organización | Usuario en Orgánica, Estructura Jerárquica |

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub order: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub order: u8,
    pub implemented: bool,
    pub description: &'static str,
}

pub const LISTADO_GENERAL: &str = "listado-general";
pub const AGREGAR_USUARIO: &str = "agregar-usuario";
pub const MODIFICAR_USUARIO: &str = "modificar-usuario";

pub const CATEGORIES: &[Category] = &[
    Category { id: "listado", label: "Listado y Consultas", order: 1 },
    Category { id: "gestion", label: "Gestión", order: 2 },
    Category { id: "permisos", label: "Permisos y Accesos", order: 3 },
    Category { id: "organizacion", label: "Organización", order: 4 },
];

pub const SECTIONS: &[Section] = &[
    Section {
        id: LISTADO_GENERAL,
        label: "Listado General",
        category: "listado",
        order: 1,
        implemented: true,
        description: "Ver todos los usuarios del sistema",
    },
    Section {
        id: "busqueda-avanzada",
        label: "Búsqueda Avanzada",
        category: "listado",
        order: 2,
        implemented: false,
        description: "Búsqueda con filtros múltiples",
    },
    Section {
        id: AGREGAR_USUARIO,
        label: "Agregar Usuario",
        category: "gestion",
        order: 1,
        implemented: true,
        description: "Crear un nuevo usuario en el sistema",
    },
    Section {
        id: MODIFICAR_USUARIO,
        label: "Modificar Usuario",
        category: "gestion",
        order: 2,
        implemented: false,
        description: "Editar información de usuarios existentes",
    },
    Section {
        id: "movimientos",
        label: "Movimientos",
        category: "gestion",
        order: 3,
        implemented: false,
        description: "Historial de cambios y movimientos",
    },
    Section {
        id: "otorgar-permisos",
        label: "Otorgar Permisos",
        category: "permisos",
        order: 1,
        implemented: false,
        description: "Asignar permisos y roles",
    },
    Section {
        id: "control-accesos",
        label: "Control de Accesos",
        category: "permisos",
        order: 2,
        implemented: false,
        description: "Monitoreo de accesos al sistema",
    },
    Section {
        id: "usuario-organica",
        label: "Usuario en Orgánica",
        category: "organizacion",
        order: 1,
        implemented: false,
        description: "Vista organizacional de usuarios",
    },
    Section {
        id: "estructura-jerarquica",
        label: "Estructura Jerárquica",
        category: "organizacion",
        order: 2,
        implemented: false,
        description: "Visualización de la estructura militar",
    },
];

pub fn categories() -> Vec<Category> {
    let mut categories = CATEGORIES.to_vec();
    categories.sort_by_key(|c| c.order);
    categories
}

pub fn sections_by_category(category_id: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = SECTIONS
        .iter()
        .filter(|s| s.category == category_id)
        .copied()
        .collect();
    sections.sort_by_key(|s| s.order);
    sections
}

pub fn implemented_sections() -> Vec<Section> {
    SECTIONS.iter().filter(|s| s.implemented).copied().collect()
}

pub fn pending_sections() -> Vec<Section> {
    SECTIONS.iter().filter(|s| !s.implemented).copied().collect()
}

pub fn section_by_id(id: &str) -> Option<Section> {
    SECTIONS.iter().find(|s| s.id == id).copied()
}

pub fn category_by_id(id: &str) -> Option<Category> {
    CATEGORIES.iter().find(|c| c.id == id).copied()
}

/// Title and description of the content header for a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderConfig {
    pub title: &'static str,
    pub description: &'static str,
}

pub fn header_for(section_id: &str) -> HeaderConfig {
    let (title, description) = match section_id {
        LISTADO_GENERAL => (
            "Listado General de Usuarios",
            "Consulta y gestión de usuarios del sistema",
        ),
        "busqueda-avanzada" => (
            "Búsqueda Avanzada",
            "Filtros y búsqueda detallada de usuarios",
        ),
        AGREGAR_USUARIO => ("Agregar Nuevo Usuario", "Complete la información del usuario"),
        MODIFICAR_USUARIO => ("Modificar Usuario", "Edición de datos de usuario"),
        "otorgar-permisos" => (
            "Otorgar Permisos",
            "Gestión de permisos y accesos de usuarios",
        ),
        "control-accesos" => ("Control de Accesos", "Monitoreo de accesos al sistema"),
        "estructura-jerarquica" => (
            "Estructura Jerárquica",
            "Visualización de la estructura organizacional",
        ),
        _ => (
            "Gestión de Usuarios",
            "Selecciona una opción del menú lateral",
        ),
    };
    HeaderConfig { title, description }
}
