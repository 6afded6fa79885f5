pub mod choice;
pub mod class_form;

pub use choice::{Choice, ChoiceField};
pub use class_form::{ClassForm, FormError, FormField, FormOptions};
