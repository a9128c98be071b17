pub(crate) mod any;
pub(crate) mod builtin;
