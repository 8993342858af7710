pub mod email;
pub mod env;
pub mod error;
pub mod text;
