// Code generation module
// Renders decoded clips as C source for the firmware image

pub mod array;

pub use array::{parse_elements, render_declaration, symbol_name, write_declaration};
