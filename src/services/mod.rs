pub mod registration;

pub use registration::{get_full_show_detail, register_show, RegistrationError};
