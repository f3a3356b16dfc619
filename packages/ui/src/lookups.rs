//! Page-wide lookup tables.
//!
//! [`LookupsProvider`] loads the seven tables once when mounted and shares
//! them through [`use_lookups`]; `refresh` reloads them in the background.

use dioxus::prelude::*;
use store::LookupCache;

use crate::auth::use_backend;

pub const LOOKUPS_ERROR: &str = "Error al cargar datos de configuración";

#[derive(Clone, Debug, PartialEq)]
pub struct LookupsState {
    pub cache: LookupCache,
    pub loading: bool,
    /// Set only when no table at all could be loaded.
    pub error: Option<String>,
}

impl Default for LookupsState {
    fn default() -> Self {
        Self {
            cache: LookupCache::new(),
            loading: true,
            error: None,
        }
    }
}

impl LookupsState {
    pub fn from_load(load: api::LookupLoad) -> Self {
        let error = load.all_failed().then(|| LOOKUPS_ERROR.to_string());
        Self {
            cache: load.cache,
            loading: false,
            error,
        }
    }
}

/// Handle returned by [`use_lookups`].
#[derive(Clone, Copy, PartialEq)]
pub struct Lookups {
    pub state: Signal<LookupsState>,
    generation: Signal<u32>,
}

impl Lookups {
    pub fn refresh(&mut self) {
        *self.generation.write() += 1;
    }
}

pub fn use_lookups() -> Lookups {
    use_context::<Lookups>()
}

#[component]
pub fn LookupsProvider(children: Element) -> Element {
    let backend = use_backend();
    let mut state = use_signal(LookupsState::default);
    let generation = use_signal(|| 0u32);

    let _ = use_resource(move || {
        let backend = backend.clone();
        async move {
            // Subscribe before the first await so refresh() reruns the load
            let round = generation();
            if round > 0 {
                state.with_mut(|s| s.loading = true);
            }
            let load = backend.lookups().await;
            state.set(LookupsState::from_load(load));
        }
    });

    use_context_provider(|| Lookups { state, generation });

    rsx! {
        {children}
    }
}
