//! Named code templates.
//!
//! Each [`crate::Target`] has one assembly template (`experiment.<ext>`) and one template per
//! component type (`components/<type>.<ext>`). Registries are loaded once and never mutated.

mod builtin;
pub(crate) mod registry;
