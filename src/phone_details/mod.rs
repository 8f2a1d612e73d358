mod key_fields;
mod phone;
mod specs;
mod text;

pub use key_fields::KeyFields;
pub use phone::{PhoneDetails, DEFAULT_SECTION};
pub use specs::{SpecSheet, Specification, Specifications};
pub use text::{clean_text, joined_text};
