pub mod input_loader;
pub mod toml_loader;

pub use input_loader::load_input_text;
pub use toml_loader::load_catalog_file;
