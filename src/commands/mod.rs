// Declarative commands
pub mod apply;
pub mod validate;

// Device inspection
pub mod get;
