//! Class and field handles.
//!
//! A [`ClassHandle`] wraps a class reference the VM owns. Everything derived
//! from it (signature, fields, methods) is fetched on each call and never
//! cached, since a class can be redefined between two calls.

use crate::env::{JniEnv, Jvmti};
use crate::error::{Error, Result};
use crate::jvmti_wrapper::{jvmti_fn, optional_string, owned_string};
use crate::method::MethodIdentity;
use crate::release::ReleaseGuard;
use crate::sys::jni;
use std::os::raw::c_char;
use std::{ptr, slice};

/// A borrowed class reference.
///
/// Copying the handle copies the reference; it is never released by this
/// crate. Construction does not validate the reference, so a lookup that found
/// nothing produces a null handle (see [`ClassHandle::is_null`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClassHandle {
    klass: jni::jclass,
}

/// A field reference, only meaningful together with the class it came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldHandle(jni::jfieldID);

impl FieldHandle {
    pub fn from_raw(field: jni::jfieldID) -> Self {
        FieldHandle(field)
    }

    pub fn raw(&self) -> jni::jfieldID {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// Name, signature and generic signature of a field, from one `GetFieldName`.
struct FieldNames {
    name: String,
    signature: String,
    generic_signature: String,
}

impl ClassHandle {
    pub fn from_raw(klass: jni::jclass) -> Self {
        ClassHandle { klass }
    }

    /// The class that declares `method`.
    pub fn declaring(jvmti: &Jvmti, method: jni::jmethodID) -> Result<Self> {
        let mut klass: jni::jclass = ptr::null_mut();
        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetMethodDeclaringClass)?;
            let err = get_fn(jvmti.raw(), method, &mut klass);
            jvmti.check(err, "Cannot get method declaring class.")?;
        }
        Ok(ClassHandle { klass })
    }

    /// The runtime class of `obj`.
    pub fn of_object(jni: &JniEnv, obj: jni::jobject) -> Result<Self> {
        Ok(ClassHandle { klass: jni.get_object_class(obj)? })
    }

    /// Looks a class up by its internal name, e.g. `java/lang/String`.
    pub fn by_name(jni: &JniEnv, name: &str) -> Result<Self> {
        Ok(ClassHandle { klass: jni.find_class(name)? })
    }

    pub fn raw(&self) -> jni::jclass {
        self.klass
    }

    pub fn is_null(&self) -> bool {
        self.klass.is_null()
    }

    fn signatures(&self, jvmti: &Jvmti) -> Result<(String, Option<String>)> {
        let mut sig_ptr: *mut c_char = ptr::null_mut();
        let mut gen_ptr: *mut c_char = ptr::null_mut();

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetClassSignature)?;
            let err = get_fn(jvmti.raw(), self.klass, &mut sig_ptr, &mut gen_ptr);
            jvmti.check(err, "klass is not a class object or the class has been unloaded.")?;

            let mut buffers = ReleaseGuard::new(jvmti);
            buffers.track(sig_ptr);
            buffers.track(gen_ptr);

            let signature = owned_string(sig_ptr);
            let generic = optional_string(gen_ptr);
            buffers.release()?;
            Ok((signature, generic))
        }
    }

    /// The class's type descriptor, e.g. `Ljava/lang/String;`.
    pub fn get_signature(&self, jvmti: &Jvmti) -> Result<String> {
        Ok(self.signatures(jvmti)?.0)
    }

    /// The generic signature attribute of the class.
    ///
    /// Fails with [`Error::NoGenericSignature`] when the class has none.
    pub fn get_generic_signature(&self, jvmti: &Jvmti) -> Result<String> {
        self.signatures(jvmti)?.1.ok_or(Error::NoGenericSignature)
    }

    /// Name of the source file the class was compiled from. Fails with
    /// `ABSENT_INFORMATION` if the class file carries no `SourceFile` attribute.
    pub fn get_source_file_name(&self, jvmti: &Jvmti) -> Result<String> {
        let mut name_ptr: *mut c_char = ptr::null_mut();
        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetSourceFileName)?;
            let err = get_fn(jvmti.raw(), self.klass, &mut name_ptr);
            jvmti.check(err, "Could not get class source file.")?;

            let mut buffers = ReleaseGuard::new(jvmti);
            buffers.track(name_ptr);
            let name = owned_string(name_ptr);
            buffers.release()?;
            Ok(name)
        }
    }

    /// Fields declared directly by this class, in VM order.
    pub fn get_class_fields(&self, jvmti: &Jvmti) -> Result<Vec<FieldHandle>> {
        let mut count: jni::jint = 0;
        let mut fields_ptr: *mut jni::jfieldID = ptr::null_mut();

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetClassFields)?;
            let err = get_fn(jvmti.raw(), self.klass, &mut count, &mut fields_ptr);
            jvmti.check(err, "Could not get class fields.")?;

            let mut buffers = ReleaseGuard::new(jvmti);
            buffers.track(fields_ptr);

            let fields = if fields_ptr.is_null() || count <= 0 {
                Vec::new()
            } else {
                slice::from_raw_parts(fields_ptr, count as usize)
                    .iter()
                    .map(|&f| FieldHandle(f))
                    .collect()
            };
            buffers.release()?;
            Ok(fields)
        }
    }

    fn field_names(&self, jvmti: &Jvmti, field: FieldHandle) -> Result<FieldNames> {
        let mut name_ptr: *mut c_char = ptr::null_mut();
        let mut sig_ptr: *mut c_char = ptr::null_mut();
        let mut gen_ptr: *mut c_char = ptr::null_mut();

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetFieldName)?;
            let err = get_fn(jvmti.raw(), self.klass, field.0, &mut name_ptr, &mut sig_ptr, &mut gen_ptr);
            jvmti.check(err, "Could not get field name.")?;

            let mut buffers = ReleaseGuard::new(jvmti);
            buffers.track(name_ptr);
            buffers.track(sig_ptr);
            buffers.track(gen_ptr);

            let names = FieldNames {
                name: owned_string(name_ptr),
                signature: owned_string(sig_ptr),
                generic_signature: owned_string(gen_ptr),
            };
            buffers.release()?;
            Ok(names)
        }
    }

    pub fn get_field_name(&self, jvmti: &Jvmti, field: FieldHandle) -> Result<String> {
        Ok(self.field_names(jvmti, field)?.name)
    }

    pub fn get_field_signature(&self, jvmti: &Jvmti, field: FieldHandle) -> Result<String> {
        Ok(self.field_names(jvmti, field)?.signature)
    }

    /// Empty when the field has no generic type.
    pub fn get_field_generic_signature(&self, jvmti: &Jvmti, field: FieldHandle) -> Result<String> {
        Ok(self.field_names(jvmti, field)?.generic_signature)
    }

    /// Finds a declared field by name.
    ///
    /// Scans [`get_class_fields`](Self::get_class_fields) in order and
    /// returns the first match, or [`Error::FieldNotFound`] carrying the
    /// class signature.
    pub fn get_field_handle_by_name(&self, jvmti: &Jvmti, name: &str) -> Result<FieldHandle> {
        for field in self.get_class_fields(jvmti)? {
            if self.get_field_name(jvmti, field)? == name {
                return Ok(field);
            }
        }
        Err(Error::FieldNotFound {
            field: name.to_string(),
            class_signature: self.get_signature(jvmti)?,
        })
    }

    /// Resolves an instance field through JNI by name and type descriptor.
    ///
    /// The result is not validated: an unknown pair gives whatever handle the
    /// VM produces for it.
    pub fn get_field_handle_by_name_sig(&self, jni: &JniEnv, name: &str, sig: &str) -> Result<FieldHandle> {
        Ok(FieldHandle(jni.get_field_id(self.klass, name, sig)?))
    }

    /// Methods declared directly by this class, each resolved to its identity.
    pub fn get_direct_declared_methods(&self, jvmti: &Jvmti) -> Result<Vec<MethodIdentity>> {
        let mut count: jni::jint = 0;
        let mut methods_ptr: *mut jni::jmethodID = ptr::null_mut();

        unsafe {
            let get_fn = jvmti_fn!(jvmti, GetClassMethods)?;
            let err = get_fn(jvmti.raw(), self.klass, &mut count, &mut methods_ptr);
            jvmti.check(err, "Could not get declared methods.")?;

            let mut buffers = ReleaseGuard::new(jvmti);
            buffers.track(methods_ptr);

            let ids: &[jni::jmethodID] = if methods_ptr.is_null() || count <= 0 {
                &[]
            } else {
                slice::from_raw_parts(methods_ptr, count as usize)
            };
            let methods = ids
                .iter()
                .map(|&id| MethodIdentity::new(jvmti, id))
                .collect::<Result<Vec<_>>>()?;
            buffers.release()?;
            Ok(methods)
        }
    }

    /// Resolves an instance method through JNI and reads its identity.
    pub fn get_method_by_name_sig(&self, jvmti: &Jvmti, jni: &JniEnv, name: &str, sig: &str) -> Result<MethodIdentity> {
        let id = jni
            .get_method_id(self.klass, name, sig)?
            .ok_or_else(|| Error::MethodNotFound { name: name.to_string(), signature: sig.to_string() })?;
        MethodIdentity::new(jvmti, id)
    }
}
