//! # jvmti-inspect
//!
//! Safe introspection of a running JVM through JVMTI and JNI.
//!
//! JVMTI hands results back through out-parameters, many of them buffers the
//! agent must give back with `Deallocate`, and reports failure through status
//! codes. This crate wraps the introspection subset of that interface so that:
//!
//! - every nonzero status becomes a typed [`Error`] carrying the code, the VM's
//!   name for it and what was being attempted;
//! - every buffer the VM allocates is released exactly once, on success and on
//!   every failure path;
//! - results come back as owned values: [`MethodIdentity`], [`ClassHandle`],
//!   [`StackTrace`], [`LocalVariableScopeTable`], [`Bytecodes`].
//!
//! Agent startup, event callbacks and capability negotiation belong to the
//! hosting agent. It passes in a live `jvmtiEnv*` and, for lookups by name, a
//! live `JNIEnv*`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use jvmti_inspect::prelude::*;
//!
//! fn on_breakpoint(jvmti_ptr: *mut jvmti::jvmtiEnv, jni_ptr: *mut jni::JNIEnv, thread: jni::jthread) -> Result<()> {
//!     let jvmti = unsafe { Jvmti::from_raw(jvmti_ptr) };
//!     let jni = unsafe { JniEnv::from_raw(jni_ptr) };
//!
//!     let trace = StackTrace::capture(&jvmti, thread, 64)?;
//!     if trace.contains_main(&jvmti)? {
//!         let top = trace.frames()[0];
//!         let table = LocalVariableScopeTable::new(&jvmti, top.method)?;
//!         for var in table.live_at(top.location) {
//!             if var.signature == "I" {
//!                 let value = jvmti.get_local_int(thread, 0, var.slot)?;
//!                 log::info!("{} = {}", var.name, value);
//!             }
//!         }
//!     }
//!
//!     let string_class = ClassHandle::by_name(&jni, "java/lang/String")?;
//!     let value_field = string_class.get_field_handle_by_name(&jvmti, "value")?;
//!     log::info!("String.value: {}", string_class.get_field_signature(&jvmti, value_field)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Hosting agent code                     │
//! ├─────────────────────────────────────────────────────────┤
//! │                  Value objects                           │
//! │   method, locals, class, bytecode, stack, directory      │
//! ├─────────────────────────────────────────────────────────┤
//! │              Environment wrappers (env module)           │
//! │   env::Jvmti - status check, Deallocate, typed locals    │
//! │   env::JniEnv - reflective lookups by name               │
//! │   release::ReleaseGuard - scoped buffer release          │
//! ├─────────────────────────────────────────────────────────┤
//! │              Raw FFI Bindings (sys module)               │
//! │   sys::jni - JNI types, leading vtable slots             │
//! │   sys::jvmti - JVMTI types, error codes, vtable slots    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threads
//!
//! Nothing here suspends threads. Stack and local queries against another
//! thread require the caller to have suspended it. Neither environment wrapper
//! is `Send` or `Sync`.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: status translation and early-exit
//! releases at `debug`, releases that fail where no error can be returned at
//! `warn`. No logger is installed.

pub mod sys;
pub mod env;
pub mod error;
pub mod release;

pub mod bytecode;
pub mod class;
pub mod directory;
pub mod locals;
pub mod method;
pub mod stack;

pub mod prelude;

// Implementation modules (use `env` module for the public API)
#[doc(hidden)]
pub mod jvmti_wrapper;
#[doc(hidden)]
pub mod jni_wrapper;

pub use crate::sys::jni;
pub use crate::sys::jvmti;

pub use bytecode::Bytecodes;
pub use class::{ClassHandle, FieldHandle};
pub use directory::{get_class_by_name, get_loaded_classes};
pub use error::{Error, NativeFailure, Result};
pub use locals::{LocalVariableEntry, LocalVariableScopeTable};
pub use method::MethodIdentity;
pub use stack::{EntryPoint, StackFrame, StackTrace, UnresolvedFrame};
