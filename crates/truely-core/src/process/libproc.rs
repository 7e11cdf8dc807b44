//! macOS process table backed by libproc.

use std::ffi::c_int;
use std::io;
use std::mem::size_of;
use std::ptr;

use crate::process::errors::ProcessError;
use crate::process::probe::fetch_two_phase;
use crate::process::table::ProcessTable;
use crate::process::types::{PATH_CAPACITY, Pid, RawProcess};

pub struct LibprocProcessTable;

fn last_os_error(call: &str) -> ProcessError {
    ProcessError::TableQueryFailed {
        message: format!("{} failed: {}", call, io::Error::last_os_error()),
    }
}

fn read_string(
    pid: Pid,
    read: unsafe extern "C" fn(c_int, *mut libc::c_void, u32) -> c_int,
) -> Option<String> {
    let mut buffer = vec![0u8; PATH_CAPACITY];
    // SAFETY: the buffer is valid for PATH_CAPACITY bytes and the size passed matches it.
    let written = unsafe { read(pid.as_i32(), buffer.as_mut_ptr().cast(), PATH_CAPACITY as u32) };
    if written <= 0 {
        return None;
    }
    buffer.truncate((written as usize).min(PATH_CAPACITY));
    if let Some(nul) = buffer.iter().position(|&b| b == 0) {
        buffer.truncate(nul);
    }
    (!buffer.is_empty()).then(|| String::from_utf8_lossy(&buffer).into_owned())
}

impl ProcessTable for LibprocProcessTable {
    fn backend_name(&self) -> &'static str {
        "libproc"
    }

    fn snapshot(&self) -> Result<Vec<RawProcess>, ProcessError> {
        let pids = fetch_two_phase::<libc::pid_t, _, _>(
            || {
                // SAFETY: a null buffer only asks for the current pid count.
                let count = unsafe { libc::proc_listallpids(ptr::null_mut(), 0) };
                if count < 0 {
                    return Err(last_os_error("proc_listallpids"));
                }
                Ok(count as usize)
            },
            |buffer| {
                let bytes = c_int::try_from(buffer.len() * size_of::<libc::pid_t>()).map_err(
                    |_| ProcessError::AllocationFailed {
                        requested: buffer.len(),
                    },
                )?;
                // SAFETY: buffer is valid for `bytes` bytes; libproc never writes past that size.
                let count = unsafe { libc::proc_listallpids(buffer.as_mut_ptr().cast(), bytes) };
                if count < 0 {
                    return Err(last_os_error("proc_listallpids"));
                }
                Ok(count as usize)
            },
        )?;

        Ok(pids.into_iter().map(|pid| RawProcess { pid }).collect())
    }

    fn name(&self, pid: Pid) -> Result<String, ProcessError> {
        read_string(pid, libc::proc_name).ok_or(ProcessError::NotFound { pid: pid.as_i32() })
    }

    fn path(&self, pid: Pid) -> Result<String, ProcessError> {
        read_string(pid, libc::proc_pidpath)
            .ok_or(ProcessError::PathUnavailable { pid: pid.as_i32() })
    }
}
