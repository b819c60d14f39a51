//! Per-thread last-error slot for C callers.
//!
//! Exports with a bare `int` return cannot carry an error, so they record
//! the failure here, errno-style. The slot holds a status code and is only
//! overwritten by failures; callers clear it explicitly.

use std::cell::Cell;

use super::error::{UtilityError, STATUS_OK};

thread_local! {
    static LAST_ERROR: Cell<i32> = const { Cell::new(STATUS_OK) };
}

/// Records `err` as the calling thread's last error.
pub fn record(err: &UtilityError) {
    record_code(err.code());
}

pub(crate) fn record_code(code: i32) {
    LAST_ERROR.with(|slot| slot.set(code));
}

/// Status code of the most recent failure on this thread, or `0`.
pub fn get() -> i32 {
    LAST_ERROR.with(Cell::get)
}

pub fn clear() {
    LAST_ERROR.with(|slot| slot.set(STATUS_OK));
}
