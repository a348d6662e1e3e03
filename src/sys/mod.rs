//! Raw FFI bindings.
//!
//! These are the C-layout types the VM hands across the agent boundary. Prefer
//! the wrappers in [`crate::env`] and the component modules; nothing here
//! releases memory or checks status codes.

pub mod jni;
pub mod jvmti;
