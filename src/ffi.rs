//! Exported C ABI.
//!
//! The legacy symbols (`My_variable`, `fact`, `my_mod`, `get_time`) keep the
//! signatures binding generators already expect. The `util_*` symbols report
//! failures as status codes or NULL and hand out owned strings.
//!
//! No export unwinds: every fallible path is turned into a status code,
//! a NULL pointer, or a value recorded in the thread's last-error slot.

#![allow(non_upper_case_globals, non_snake_case)]

use std::cell::RefCell;
use std::ffi::{c_char, c_double, c_int, CStr, CString};
use std::sync::{Mutex, PoisonError};

use crate::clock;
use crate::math;
use crate::models::context::{LibraryContext, DEFAULT_SHARED_CONSTANT};
use crate::models::error::{UtilityError, STATUS_NULL_POINTER, STATUS_OK};
use crate::models::last_error;
use crate::models::request;

/// The shared constant as a raw C global.
///
/// Unsynchronized. Callers on several threads must serialize every read and
/// write themselves. Rust code should use [`LibraryContext`] instead.
#[no_mangle]
pub static mut My_variable: c_double = DEFAULT_SHARED_CONSTANT;

/// Reads `My_variable`. Same synchronization caveat as the global.
#[no_mangle]
pub extern "C" fn My_variable_get() -> c_double {
    // SAFETY: plain load of a `f64`; races are the caller's responsibility.
    unsafe { std::ptr::addr_of!(My_variable).read() }
}

/// Writes `My_variable`. Same synchronization caveat as the global.
#[no_mangle]
pub extern "C" fn My_variable_set(value: c_double) {
    // SAFETY: plain store of a `f64`; races are the caller's responsibility.
    unsafe { std::ptr::addr_of_mut!(My_variable).write(value) }
}

/// Factorial with C `int` wraparound; `1` for `n <= 1`.
#[no_mangle]
pub extern "C" fn fact(n: c_int) -> c_int {
    math::factorial_wrapping(n)
}

/// Truncating remainder. A zero divisor returns `0` and sets the last error.
#[no_mangle]
pub extern "C" fn my_mod(x: c_int, y: c_int) -> c_int {
    math::modulo_legacy(x, y)
}

thread_local! {
    static TIME_BUFFER: RefCell<CString> = RefCell::new(CString::default());
}

/// Current local time in ctime layout.
///
/// The pointer refers to a per-thread buffer that stays valid until the next
/// `get_time` call on the same thread or until the thread exits. Copy the text
/// before calling again. Returns NULL and sets the last error when the clock
/// cannot be read.
#[no_mangle]
pub extern "C" fn get_time() -> *const c_char {
    let text = match clock::current_time_string().and_then(to_c_string) {
        Ok(text) => text,
        Err(err) => {
            last_error::record(&err);
            return std::ptr::null();
        }
    };
    TIME_BUFFER.with(|buf| {
        let mut buf = buf.borrow_mut();
        *buf = text;
        buf.as_ptr()
    })
}

/// Checked factorial. Writes the result to `out` and returns `0`, or returns
/// a non-zero status and leaves `out` untouched.
///
/// # Safety
///
/// `out` must be NULL or valid for a write of one `int`.
#[no_mangle]
pub unsafe extern "C" fn util_fact_checked(n: c_int, out: *mut c_int) -> c_int {
    if out.is_null() {
        return STATUS_NULL_POINTER;
    }
    match math::factorial(n) {
        Ok(value) => {
            *out = value;
            STATUS_OK
        }
        Err(err) => err.code(),
    }
}

/// Checked remainder, same conventions as [`util_fact_checked`].
///
/// # Safety
///
/// `out` must be NULL or valid for a write of one `int`.
#[no_mangle]
pub unsafe extern "C" fn util_mod_checked(x: c_int, y: c_int, out: *mut c_int) -> c_int {
    if out.is_null() {
        return STATUS_NULL_POINTER;
    }
    match math::modulo(x, y) {
        Ok(value) => {
            *out = value;
            STATUS_OK
        }
        Err(err) => err.code(),
    }
}

/// Current local time as a caller-owned string. Release it with
/// [`util_string_free`]. NULL when the clock cannot be read.
#[no_mangle]
pub extern "C" fn util_time_string() -> *mut c_char {
    match clock::current_time_string().and_then(to_c_string) {
        Ok(text) => text.into_raw(),
        Err(err) => {
            last_error::record(&err);
            std::ptr::null_mut()
        }
    }
}

/// Frees a string returned by [`util_time_string`] or [`util_handle_json`].
///
/// # Safety
///
/// `ptr` must be NULL or a pointer obtained from one of those functions that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn util_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Status code of the last failure on the calling thread, `0` if none.
#[no_mangle]
pub extern "C" fn util_last_error() -> c_int {
    last_error::get()
}

#[no_mangle]
pub extern "C" fn util_clear_last_error() {
    last_error::clear();
}

static SHARED_CONTEXT: Mutex<LibraryContext> = Mutex::new(LibraryContext::DEFAULT);

/// Executes a JSON request (see [`request::Request`]) against the process-wide
/// context and returns a caller-owned JSON response. Free it with
/// [`util_string_free`]. Returns NULL only when `input` is NULL.
///
/// # Safety
///
/// `input` must be NULL or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn util_handle_json(input: *const c_char) -> *mut c_char {
    if input.is_null() {
        last_error::record_code(STATUS_NULL_POINTER);
        return std::ptr::null_mut();
    }
    let input = CStr::from_ptr(input).to_string_lossy();
    // A poisoned lock still holds a valid context; nothing panics while holding it.
    let mut ctx = SHARED_CONTEXT.lock().unwrap_or_else(PoisonError::into_inner);
    let response = request::handle_json(&input, &mut ctx);
    drop(ctx);
    match to_c_string(response) {
        Ok(text) => text.into_raw(),
        Err(err) => {
            last_error::record(&err);
            std::ptr::null_mut()
        }
    }
}

/// Crate version as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn util_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}

// Unreachable in practice: ctime text never contains NUL and serde_json
// escapes it as `\u0000`.
fn to_c_string(text: String) -> Result<CString, UtilityError> {
    CString::new(text)
        .map_err(|e| UtilityError::InvalidRequest(format!("interior NUL in output: {e}")))
}
