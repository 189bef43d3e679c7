pub mod args;
pub mod events;
pub mod validation;
