//! Best-effort "disable copy-on-write" hint for freshly opened tile files.
//!
//! Applied once per writable open. Failures are logged and never surfaced.

use std::fmt::Debug;
use std::fs::File;
use std::io;

/// Applies a platform-specific "no copy-on-write" attribute to a file.
///
/// Implementations must be safe to call on any open file; a filesystem that
/// has no such notion should simply return `Ok(())`.
pub trait CopyOnWriteControl: Send + Sync + Debug {
    fn disable_copy_on_write(&self, file: &File) -> io::Result<()>;
}

/// Uses the host OS's file-attribute interface (`FS_IOC_SETFLAGS` with
/// `FS_NOCOW_FL` on Linux). A no-op elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformCopyOnWrite;

/// Never touches file attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCopyOnWriteControl;

impl CopyOnWriteControl for NoCopyOnWriteControl {
    fn disable_copy_on_write(&self, _file: &File) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use std::fs::File;
    use std::io;
    use std::os::unix::io::AsRawFd;

    /// `FS_NOCOW_FL` from `linux/fs.h`.
    pub const FS_NOCOW_FL: libc::c_long = 0x0080_0000;

    const IOC_NRBITS: u64 = 8;
    const IOC_TYPEBITS: u64 = 8;
    const IOC_SIZEBITS: u64 = 14;
    const IOC_NRSHIFT: u64 = 0;
    const IOC_TYPESHIFT: u64 = IOC_NRSHIFT + IOC_NRBITS;
    const IOC_SIZESHIFT: u64 = IOC_TYPESHIFT + IOC_TYPEBITS;
    const IOC_DIRSHIFT: u64 = IOC_SIZESHIFT + IOC_SIZEBITS;
    const IOC_WRITE: u64 = 1;
    const IOC_READ: u64 = 2;

    const fn ioc(dir: u64, ty: u8, nr: u8, size: usize) -> u64 {
        (dir << IOC_DIRSHIFT)
            | ((ty as u64) << IOC_TYPESHIFT)
            | ((nr as u64) << IOC_NRSHIFT)
            | ((size as u64) << IOC_SIZESHIFT)
    }

    // `_IOR('f', 1, long)` / `_IOW('f', 2, long)`
    const FS_IOC_GETFLAGS: u64 = ioc(IOC_READ, b'f', 1, size_of::<libc::c_long>());
    const FS_IOC_SETFLAGS: u64 = ioc(IOC_WRITE, b'f', 2, size_of::<libc::c_long>());

    pub fn set_no_cow(file: &File) -> io::Result<()> {
        let fd = file.as_raw_fd();
        let mut flags: libc::c_long = 0;

        // SAFETY: `fd` is valid for the lifetime of `file`; `flags` outlives the call.
        let ret = unsafe { libc::ioctl(fd, FS_IOC_GETFLAGS as _, &mut flags as *mut libc::c_long) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }

        if flags & FS_NOCOW_FL != 0 {
            return Ok(());
        }
        flags |= FS_NOCOW_FL;

        // SAFETY: as above.
        let ret = unsafe { libc::ioctl(fd, FS_IOC_SETFLAGS as _, &flags as *const libc::c_long) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl CopyOnWriteControl for PlatformCopyOnWrite {
    #[cfg(target_os = "linux")]
    fn disable_copy_on_write(&self, file: &File) -> io::Result<()> {
        linux::set_no_cow(file)
    }

    #[cfg(not(target_os = "linux"))]
    fn disable_copy_on_write(&self, _file: &File) -> io::Result<()> {
        Ok(())
    }
}
