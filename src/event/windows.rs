//! Native named events for Windows targets.

use std::io;
use std::time::Duration;

use windows_sys::Win32::Foundation::{
    CloseHandle, ERROR_ALREADY_EXISTS, ERROR_FILE_NOT_FOUND, GetLastError, HANDLE, WAIT_FAILED,
    WAIT_OBJECT_0, WAIT_TIMEOUT,
};
use windows_sys::Win32::System::Threading::{
    CreateEventW, OpenEventW, ResetEvent, SetEvent, WaitForSingleObject, EVENT_ALL_ACCESS,
};

use crate::Result;

fn to_wide(name: &str) -> Vec<u16> {
    name.encode_utf16().chain(std::iter::once(0)).collect()
}

fn last_error() -> crate::Error {
    io::Error::last_os_error().into()
}

#[derive(Debug)]
pub(super) struct RawEvent {
    handle: HANDLE,
}

// An event handle may be used and closed from any thread.
unsafe impl Send for RawEvent {}
unsafe impl Sync for RawEvent {}

impl RawEvent {
    /// Create the named manual-reset event. The state always starts
    /// unasserted, also when the name already existed.
    pub(super) fn create(name: &str) -> Result<Self> {
        let wide = to_wide(name);
        let handle = unsafe { CreateEventW(std::ptr::null(), 1, 0, wide.as_ptr()) };
        if handle.is_null() {
            return Err(last_error());
        }
        let already_exists = unsafe { GetLastError() } == ERROR_ALREADY_EXISTS;
        let event = Self { handle };
        if already_exists {
            event.reset()?;
        }
        Ok(event)
    }

    /// Open an existing named event.
    pub(super) fn open(name: &str) -> Result<Self> {
        let wide = to_wide(name);
        let handle = unsafe { OpenEventW(EVENT_ALL_ACCESS, 0, wide.as_ptr()) };
        if handle.is_null() {
            return Err(last_error());
        }
        Ok(Self { handle })
    }

    pub(super) fn exists(name: &str) -> bool {
        let wide = to_wide(name);
        let handle = unsafe { OpenEventW(EVENT_ALL_ACCESS, 0, wide.as_ptr()) };
        if handle.is_null() {
            // Access failures still mean the name is taken.
            return unsafe { GetLastError() } != ERROR_FILE_NOT_FOUND;
        }
        unsafe { CloseHandle(handle) };
        true
    }

    pub(super) fn set(&self) -> Result<()> {
        if unsafe { SetEvent(self.handle) } == 0 {
            return Err(last_error());
        }
        Ok(())
    }

    pub(super) fn reset(&self) -> Result<()> {
        if unsafe { ResetEvent(self.handle) } == 0 {
            return Err(last_error());
        }
        Ok(())
    }

    pub(super) fn is_set(&self) -> Result<bool> {
        self.wait_timeout(Duration::ZERO)
    }

    pub(super) fn wait_timeout(&self, timeout: Duration) -> Result<bool> {
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        match unsafe { WaitForSingleObject(self.handle, millis) } {
            WAIT_OBJECT_0 => Ok(true),
            WAIT_TIMEOUT => Ok(false),
            WAIT_FAILED => Err(last_error()),
            other => Err(io::Error::other(format!("unexpected wait result {other}")).into()),
        }
    }
}

impl Drop for RawEvent {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.handle) };
    }
}
