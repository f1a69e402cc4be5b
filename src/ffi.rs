//! FFI bindings for Cycle Forecast
//!
//! This module provides C-compatible functions for calling the engine from
//! other languages (for example a Node.js or mobile host). All functions use
//! null-terminated C strings and return allocated memory that must be freed by
//! the caller using `cycle_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::{predict_json, Forecaster};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Forecast from a JSON array of cycle records.
///
/// # Safety
/// - `records_json` and `today` must be valid null-terminated C strings.
/// - `today` is the current date as `YYYY-MM-DD`.
/// - Returns a newly allocated string that must be freed with `cycle_free_string`.
/// - Returns NULL on error; call `cycle_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn cycle_predict_json(
    records_json: *const c_char,
    today: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(records_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid records JSON string pointer");
            return ptr::null_mut();
        }
    };

    let today_str = match cstr_to_string(today) {
        Some(s) => s,
        None => {
            set_last_error("Invalid date string pointer");
            return ptr::null_mut();
        }
    };

    match predict_json(&json_str, &today_str) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Forecast considering only the most recent `history_limit` records.
///
/// # Safety
/// - Same contract as `cycle_predict_json`.
/// - `history_limit <= 0` disables the limit.
#[no_mangle]
pub unsafe extern "C" fn cycle_predict_recent_json(
    records_json: *const c_char,
    today: *const c_char,
    history_limit: i32,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(records_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid records JSON string pointer");
            return ptr::null_mut();
        }
    };

    let today_date = match cstr_to_string(today).map(|s| crate::dates::parse_date(&s)) {
        Some(Ok(date)) => date,
        Some(Err(e)) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
        None => {
            set_last_error("Invalid date string pointer");
            return ptr::null_mut();
        }
    };

    let forecaster = Forecaster::with_history_limit(history_limit.max(0) as usize);

    match forecaster.predict_json(&json_str, today_date) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a string returned by this library.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a `cycle_*` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn cycle_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn cycle_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn cycle_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
