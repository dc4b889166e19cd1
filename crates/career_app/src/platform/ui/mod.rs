pub mod help;
pub mod render;
