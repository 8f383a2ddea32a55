// Hanfe TTY Mirror
// Optional side channel that injects composed text into a terminal

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;

use super::EmitterError;

/// Write-only handle on a TTY that mirrors the logical text stream.
///
/// Injection goes through `TIOCSTI` byte by byte so the text lands in the
/// terminal's input queue. When the kernel forbids `TIOCSTI`
/// (`dev.tty.legacy_tiocsti=0`), a plain `write` puts the bytes on the
/// output side instead; that is best-effort mirroring, not input.
#[derive(Debug)]
pub struct TtyMirror {
    fd: RawFd,
}

impl TtyMirror {
    pub fn open(path: &Path) -> Result<Self, EmitterError> {
        let cpath = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| EmitterError::Tty(io::Error::from(io::ErrorKind::InvalidInput)))?;
        let fd = unsafe {
            libc::open(
                cpath.as_ptr(),
                libc::O_WRONLY | libc::O_NOCTTY | libc::O_CLOEXEC,
            )
        };
        if fd < 0 {
            return Err(EmitterError::Tty(io::Error::last_os_error()));
        }
        Ok(Self { fd })
    }

    /// Inject UTF-8 text, one byte at a time.
    pub fn inject(&mut self, text: &str) -> Result<(), EmitterError> {
        for byte in text.as_bytes() {
            let rc = unsafe { libc::ioctl(self.fd, libc::TIOCSTI, byte as *const u8) };
            if rc < 0 {
                let written =
                    unsafe { libc::write(self.fd, byte as *const u8 as *const libc::c_void, 1) };
                if written != 1 {
                    return Err(EmitterError::Tty(io::Error::last_os_error()));
                }
            }
        }
        Ok(())
    }
}

impl Drop for TtyMirror {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}
