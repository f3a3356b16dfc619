//! # Usuario wizard
//!
//! | File | Purpose |
//! |------|---------|
//! | `wizard.rs` | Steps, field rules, touched/error tracking, request building |
//! | `component.rs` | The Dioxus form driving a `Signal<Wizard>` |

mod component;
pub mod wizard;

pub use component::{UsuarioForm, MISSING_KEY_MESSAGE};
pub use wizard::{Field, FormData, Step, Wizard};
