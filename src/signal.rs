// signal.rs - SIGINT/SIGTERM turn into a stop request checked once per frame
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn request_stop(_signal: libc::c_int) {
    STOP_REQUESTED.store(true, Ordering::SeqCst);
}

/// Route SIGINT and SIGTERM to a flag the render loop polls.
///
/// The process then leaves the loop normally and the device session is
/// dropped instead of the kernel killing us mid-frame.
pub fn install_stop_handler() -> io::Result<&'static AtomicBool> {
    let handler = request_stop as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for signal in [libc::SIGINT, libc::SIGTERM] {
        // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
        if unsafe { libc::signal(signal, handler) } == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(&STOP_REQUESTED)
}
