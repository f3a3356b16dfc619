mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod section_placeholder;
pub use section_placeholder::SectionPlaceholder;
