//! Application use cases / business logic

pub mod classify;
pub mod edit;
pub mod render;

pub use classify::{MAX_WORDS_TO_COMBINE, PhraseClassifier};
pub use edit::{EditError, HierarchyEditor, category_label};
pub use render::{NO_MATCHES, TimingReport, render_tally};
