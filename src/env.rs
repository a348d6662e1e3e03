//! Environment wrappers for JVMTI and JNI.
//!
//! The two handles play different roles:
//!
//! - [`Jvmti`] is the instrumentation handle. Locals, stack, bytecode and
//!   class/field metadata are queried through it, and it owns status
//!   translation ([`Jvmti::check`]) and buffer release ([`Jvmti::deallocate`]).
//! - [`JniEnv`] is the object-model handle, used for reflective lookups by
//!   name: classes, instance methods and fields.
//!
//! Both borrow a pointer the VM handed to the hosting agent. Neither owns it.
//!
//! ```rust,ignore
//! use jvmti_inspect::prelude::*;
//!
//! fn inspect(jvmti_ptr: *mut jvmti::jvmtiEnv, jni_ptr: *mut jni::JNIEnv) -> Result<()> {
//!     let jvmti = unsafe { Jvmti::from_raw(jvmti_ptr) };
//!     let jni = unsafe { JniEnv::from_raw(jni_ptr) };
//!
//!     jvmti.require_bytecode_index_locations()?;
//!     let system = ClassHandle::by_name(&jni, "java/lang/System")?;
//!     for method in system.get_direct_declared_methods(&jvmti)? {
//!         println!("{}{}", method.name(), method.signature());
//!     }
//!     Ok(())
//! }
//! ```

pub use crate::jni_wrapper::JniEnv;
pub use crate::jvmti_wrapper::Jvmti;
pub use crate::release::ReleaseGuard;
