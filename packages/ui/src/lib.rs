//! This crate contains all shared UI for the workspace.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `auth` | [`AuthProvider`], [`use_auth`], [`use_backend`], [`LogoutButton`] |
//! | `lookups` | [`LookupsProvider`] and [`use_lookups`] over the seven reference tables |
//! | `usuarios` | [`use_usuarios`] list hook |
//! | [`menu`] | Sidebar categories/sections and per-section headers |
//! | [`usuario_form`] | Create/edit wizard |
//! | `usuario_table`, `usuario_detail` | List and detail views |
//! | [`dialogs`] | Native alert/confirm |

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const CONSOLE_CSS: Asset = asset!("/assets/console.css");

mod session;
pub use session::{make_backend, make_session_store};

pub mod dialogs;
pub mod menu;
mod navigation;
pub use navigation::{pause, redirect_to_login};

pub mod views;

mod navbar;
pub use navbar::{ContentHeader, Navbar};

mod auth;
pub use auth::{use_auth, use_backend, AuthProvider, AuthState, LogoutButton};

mod lookups;
pub use lookups::{use_lookups, Lookups, LookupsProvider, LookupsState, LOOKUPS_ERROR};

mod usuarios;
pub use usuarios::{use_usuarios, UsuariosList};

mod sidebar;
pub use sidebar::UsuarioSidebar;

pub mod usuario_form;
pub use usuario_form::UsuarioForm;

mod usuario_table;
pub use usuario_table::UsuarioTable;

pub mod usuario_detail;
pub use usuario_detail::UsuarioDetailModal;
