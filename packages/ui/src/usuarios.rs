//! Usuario list hook.

use dioxus::prelude::*;
use store::Usuario;

use crate::auth::use_backend;

/// Handle returned by [`use_usuarios`].
#[derive(Clone, Copy, PartialEq)]
pub struct UsuariosList {
    pub data: Signal<Vec<Usuario>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
    generation: Signal<u32>,
}

impl UsuariosList {
    pub fn refresh(&mut self) {
        *self.generation.write() += 1;
    }

    /// Loaded, without error, and nothing came back.
    pub fn is_empty(&self) -> bool {
        !(self.loading)() && (self.error)().is_none() && self.data.read().is_empty()
    }
}

/// Load all usuarios when the calling component mounts.
pub fn use_usuarios() -> UsuariosList {
    let backend = use_backend();
    let mut data = use_signal(Vec::<Usuario>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let generation = use_signal(|| 0u32);

    let _ = use_resource(move || {
        let backend = backend.clone();
        async move {
            let _ = generation();
            loading.set(true);
            error.set(None);
            match backend.usuarios.get_all().await {
                Ok(usuarios) => data.set(usuarios),
                Err(e) => {
                    error.set(Some(e.message));
                    data.set(Vec::new());
                }
            }
            loading.set(false);
        }
    });

    UsuariosList {
        data,
        loading,
        error,
        generation,
    }
}
