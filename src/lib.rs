//! Variant Picker Library
//!
//! Progressive selection of product options over a fixed catalog of
//! purchasable variants. At every step only values that still lead to a
//! catalog entry remain selectable.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod filter;
pub mod picker;
pub mod selection;
pub mod session;
pub mod signal;
pub mod types;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use error::SelectionError;
pub use filter::SelectionFilter;
pub use picker::{AttributeView, PickerView, VariantPicker};
pub use selection::Selection;
pub use session::{run_session, SessionCommand};
pub use signal::{ListenerId, ResolutionEvent, ResolutionListener, ResolutionNotifier};
pub use types::{Attribute, OutputFormat, SelectionStatus, Variant, VariantId};
