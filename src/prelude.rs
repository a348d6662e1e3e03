//! Common imports for inspecting a VM.
//!
//! This prelude is intentionally small: the two environment handles, the value
//! objects and the error type.

pub use crate::bytecode::Bytecodes;
pub use crate::class::{ClassHandle, FieldHandle};
pub use crate::directory::{get_class_by_name, get_loaded_classes};
pub use crate::env::{JniEnv, Jvmti};
pub use crate::error::{Error, Result};
pub use crate::locals::{LocalVariableEntry, LocalVariableScopeTable};
pub use crate::method::MethodIdentity;
pub use crate::stack::{EntryPoint, StackFrame, StackTrace, UnresolvedFrame};
pub use crate::sys::{jni, jvmti};
