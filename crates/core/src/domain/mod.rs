pub mod input;
pub mod plan;
pub mod profile;
pub mod result;
pub mod settings;
