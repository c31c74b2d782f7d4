pub mod bindings;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub mod linux_syscall;

// Counting is only possible where the `perf_event_open` syscall exists,
// every other target gets a stub that always reports `Unsupported`.
macro_rules! syscall {
    ($syscall:ident, $($arg:expr),* $(,)?) => {{
        #[cfg(any(target_os = "linux", target_os = "android"))]
        let val = $crate::ffi::linux_syscall::$syscall($($arg),*);
        #[cfg(not(any(target_os = "linux", target_os = "android")))]
        let val = {
            $(let _ = $arg;)*
            Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
        };
        val
    }};
}
pub(crate) use syscall;

/// Whether the target provides the `perf_event_open` syscall.
pub const SUPPORTED: bool = cfg!(any(target_os = "linux", target_os = "android"));

pub type Attr = bindings::perf_event_attr;

#[cfg(unix)]
pub fn raw_fd(file: &std::fs::File) -> i32 {
    use std::os::fd::AsRawFd;
    file.as_raw_fd()
}

#[cfg(not(unix))]
pub fn raw_fd(_: &std::fs::File) -> i32 {
    -1
}
