use dioxus::prelude::*;

use crate::menu::Section;

/// Empty state shown for sections that have no view yet.
#[component]
pub fn SectionPlaceholder(section: Section) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center py-12 px-4 text-center text-neutral-500",
            h2 { class: "m-0 mb-2 font-medium text-lg text-neutral-700", "{section.label}" }
            p { class: "m-0 mb-2 text-sm", "{section.description}" }
            p { class: "m-0 text-xs", "Esta sección estará disponible próximamente." }
        }
    }
}
