// jvmti-inspect/src/sys/jni.rs
//
// Raw JNI types and the leading part of the JNI function table.
//
// Only the reflective lookups (FindClass, GetObjectClass, GetMethodID,
// GetFieldID) are typed. Every slot before GetFieldID is still declared, in
// VM order, so the typed slots sit at their native offsets. The table is only
// ever read through the pointer a VM hands out, so slots past the last one
// declared here are never touched.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::ffi::c_void;
use std::os::raw::c_char;

// =============================================================================
// Primitive Types
// =============================================================================

pub type jint = i32;
pub type jlong = i64;
pub type jbyte = i8;
pub type jboolean = u8;
pub type jchar = u16;
pub type jshort = i16;
pub type jfloat = f32;
pub type jdouble = f64;
pub type jsize = jint;

// =============================================================================
// Reference Types (opaque pointers)
// =============================================================================

pub type jobject = *mut c_void;
pub type jclass = jobject;
pub type jstring = jobject;
pub type jthread = jobject;
pub type jthrowable = jobject;

// =============================================================================
// ID Types (opaque identifiers)
// =============================================================================

pub type jmethodID = *mut c_void;
pub type jfieldID = *mut c_void;

pub const JNI_TRUE: jboolean = 1;
pub const JNI_FALSE: jboolean = 0;

// =============================================================================
// Function Table
// =============================================================================

#[repr(C)]
#[derive(Copy, Clone)]
pub struct JNINativeInterface_ {
    /*   0 */ pub reserved0: *mut c_void,
    /*   1 */ pub reserved1: *mut c_void,
    /*   2 */ pub reserved2: *mut c_void,
    /*   3 */ pub reserved3: *mut c_void,
    /*   4 */ pub GetVersion: *mut c_void,
    /*   5 */ pub DefineClass: *mut c_void,
    /*   6 */ pub FindClass: Option<unsafe extern "system" fn(env: *mut JNIEnv, name: *const c_char) -> jclass>,
    /*   7 */ pub FromReflectedMethod: *mut c_void,
    /*   8 */ pub FromReflectedField: *mut c_void,
    /*   9 */ pub ToReflectedMethod: *mut c_void,
    /*  10 */ pub GetSuperclass: *mut c_void,
    /*  11 */ pub IsAssignableFrom: *mut c_void,
    /*  12 */ pub ToReflectedField: *mut c_void,
    /*  13 */ pub Throw: *mut c_void,
    /*  14 */ pub ThrowNew: *mut c_void,
    /*  15 */ pub ExceptionOccurred: *mut c_void,
    /*  16 */ pub ExceptionDescribe: *mut c_void,
    /*  17 */ pub ExceptionClear: *mut c_void,
    /*  18 */ pub FatalError: *mut c_void,
    /*  19 */ pub PushLocalFrame: *mut c_void,
    /*  20 */ pub PopLocalFrame: *mut c_void,
    /*  21 */ pub NewGlobalRef: *mut c_void,
    /*  22 */ pub DeleteGlobalRef: *mut c_void,
    /*  23 */ pub DeleteLocalRef: *mut c_void,
    /*  24 */ pub IsSameObject: *mut c_void,
    /*  25 */ pub NewLocalRef: *mut c_void,
    /*  26 */ pub EnsureLocalCapacity: *mut c_void,
    /*  27 */ pub AllocObject: *mut c_void,
    /*  28 */ pub NewObject: *mut c_void,
    /*  29 */ pub NewObjectV: *mut c_void,
    /*  30 */ pub NewObjectA: *mut c_void,
    /*  31 */ pub GetObjectClass: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jclass>,
    /*  32 */ pub IsInstanceOf: *mut c_void,
    /*  33 */ pub GetMethodID: Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, name: *const c_char, sig: *const c_char) -> jmethodID>,
    /*  34 */ pub CallObjectMethod: *mut c_void,
    /*  35 */ pub CallObjectMethodV: *mut c_void,
    /*  36 */ pub CallObjectMethodA: *mut c_void,
    /*  37 */ pub CallBooleanMethod: *mut c_void,
    /*  38 */ pub CallBooleanMethodV: *mut c_void,
    /*  39 */ pub CallBooleanMethodA: *mut c_void,
    /*  40 */ pub CallByteMethod: *mut c_void,
    /*  41 */ pub CallByteMethodV: *mut c_void,
    /*  42 */ pub CallByteMethodA: *mut c_void,
    /*  43 */ pub CallCharMethod: *mut c_void,
    /*  44 */ pub CallCharMethodV: *mut c_void,
    /*  45 */ pub CallCharMethodA: *mut c_void,
    /*  46 */ pub CallShortMethod: *mut c_void,
    /*  47 */ pub CallShortMethodV: *mut c_void,
    /*  48 */ pub CallShortMethodA: *mut c_void,
    /*  49 */ pub CallIntMethod: *mut c_void,
    /*  50 */ pub CallIntMethodV: *mut c_void,
    /*  51 */ pub CallIntMethodA: *mut c_void,
    /*  52 */ pub CallLongMethod: *mut c_void,
    /*  53 */ pub CallLongMethodV: *mut c_void,
    /*  54 */ pub CallLongMethodA: *mut c_void,
    /*  55 */ pub CallFloatMethod: *mut c_void,
    /*  56 */ pub CallFloatMethodV: *mut c_void,
    /*  57 */ pub CallFloatMethodA: *mut c_void,
    /*  58 */ pub CallDoubleMethod: *mut c_void,
    /*  59 */ pub CallDoubleMethodV: *mut c_void,
    /*  60 */ pub CallDoubleMethodA: *mut c_void,
    /*  61 */ pub CallVoidMethod: *mut c_void,
    /*  62 */ pub CallVoidMethodV: *mut c_void,
    /*  63 */ pub CallVoidMethodA: *mut c_void,
    /*  64 */ pub CallNonvirtualObjectMethod: *mut c_void,
    /*  65 */ pub CallNonvirtualObjectMethodV: *mut c_void,
    /*  66 */ pub CallNonvirtualObjectMethodA: *mut c_void,
    /*  67 */ pub CallNonvirtualBooleanMethod: *mut c_void,
    /*  68 */ pub CallNonvirtualBooleanMethodV: *mut c_void,
    /*  69 */ pub CallNonvirtualBooleanMethodA: *mut c_void,
    /*  70 */ pub CallNonvirtualByteMethod: *mut c_void,
    /*  71 */ pub CallNonvirtualByteMethodV: *mut c_void,
    /*  72 */ pub CallNonvirtualByteMethodA: *mut c_void,
    /*  73 */ pub CallNonvirtualCharMethod: *mut c_void,
    /*  74 */ pub CallNonvirtualCharMethodV: *mut c_void,
    /*  75 */ pub CallNonvirtualCharMethodA: *mut c_void,
    /*  76 */ pub CallNonvirtualShortMethod: *mut c_void,
    /*  77 */ pub CallNonvirtualShortMethodV: *mut c_void,
    /*  78 */ pub CallNonvirtualShortMethodA: *mut c_void,
    /*  79 */ pub CallNonvirtualIntMethod: *mut c_void,
    /*  80 */ pub CallNonvirtualIntMethodV: *mut c_void,
    /*  81 */ pub CallNonvirtualIntMethodA: *mut c_void,
    /*  82 */ pub CallNonvirtualLongMethod: *mut c_void,
    /*  83 */ pub CallNonvirtualLongMethodV: *mut c_void,
    /*  84 */ pub CallNonvirtualLongMethodA: *mut c_void,
    /*  85 */ pub CallNonvirtualFloatMethod: *mut c_void,
    /*  86 */ pub CallNonvirtualFloatMethodV: *mut c_void,
    /*  87 */ pub CallNonvirtualFloatMethodA: *mut c_void,
    /*  88 */ pub CallNonvirtualDoubleMethod: *mut c_void,
    /*  89 */ pub CallNonvirtualDoubleMethodV: *mut c_void,
    /*  90 */ pub CallNonvirtualDoubleMethodA: *mut c_void,
    /*  91 */ pub CallNonvirtualVoidMethod: *mut c_void,
    /*  92 */ pub CallNonvirtualVoidMethodV: *mut c_void,
    /*  93 */ pub CallNonvirtualVoidMethodA: *mut c_void,
    /*  94 */ pub GetFieldID: Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, name: *const c_char, sig: *const c_char) -> jfieldID>,
}

impl Default for JNINativeInterface_ {
    /// A table with every slot empty.
    fn default() -> Self {
        // SAFETY: every field is a raw pointer or an `Option` of a function
        // pointer, for both of which all-zero is a valid (null / `None`) value.
        unsafe { std::mem::zeroed() }
    }
}

pub type JNIEnv = *const JNINativeInterface_;
