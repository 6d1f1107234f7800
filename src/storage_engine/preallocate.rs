//! Grows a tile file to its index-region size before it is memory-mapped.

use crate::storage_engine::constants::ZERO_FILL_CHUNK_SIZE;
use crate::storage_engine::positioned_io::write_at;
use std::fs::File;
use std::io;
use tracing::debug;

/// How missing bytes are materialized when a file is grown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preallocation {
    /// Ask the OS to allocate the range (`fallocate` on Linux). Falls back to
    /// zero-filling when the filesystem does not support it.
    #[default]
    Fast,

    /// Always write zero-filled chunks.
    ZeroFill,
}

/// Ensures `file` is at least `target` bytes long.
///
/// If the file is already large enough this is a no-op that returns the
/// current size. Otherwise the gap between the current end and `target` is
/// allocated according to `strategy`.
///
/// # Returns
/// - `Ok(size)`: The file size after the call (`>= target`).
/// - `Err(std::io::Error)`: If the size could not be read or the file could not
///   be grown.
pub fn ensure_size(file: &File, target: u64, strategy: Preallocation) -> io::Result<u64> {
    let current = file.metadata()?.len();
    if current >= target {
        return Ok(current);
    }

    match strategy {
        Preallocation::Fast => match allocate_range(file, current, target - current) {
            Ok(()) => {}
            Err(err) if is_unsupported(&err) => {
                debug!(
                    "Fast allocation unsupported ({}), zero-filling {} bytes.",
                    err,
                    target - current
                );
                zero_fill(file, current, target)?;
            }
            Err(err) => {
                return Err(io::Error::new(
                    err.kind(),
                    format!("failed to perform fallocate: {err}"),
                ));
            }
        },
        Preallocation::ZeroFill => zero_fill(file, current, target)?,
    }

    Ok(file.metadata()?.len())
}

/// Writes zeros over `[from, to)` in `ZERO_FILL_CHUNK_SIZE` chunks using
/// positioned writes.
pub fn zero_fill(file: &File, from: u64, to: u64) -> io::Result<()> {
    if to <= from {
        return Ok(());
    }

    let buffer = vec![0u8; ZERO_FILL_CHUNK_SIZE];
    let mut cursor = from;

    while cursor < to {
        let chunk = (to - cursor).min(ZERO_FILL_CHUNK_SIZE as u64) as usize;
        let written = write_at(file, &buffer[..chunk], cursor)?;
        if written == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("zero-fill stalled at offset {cursor} of {to}"),
            ));
        }
        cursor += written as u64;
    }

    Ok(())
}

#[cfg(target_os = "linux")]
fn allocate_range(file: &File, offset: u64, len: u64) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let offset = libc::off_t::try_from(offset)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset out of range"))?;
    let len = libc::off_t::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length out of range"))?;

    loop {
        // SAFETY: the fd is owned by `file` and stays open for the call.
        let ret = unsafe { libc::fallocate(file.as_raw_fd(), 0, offset, len) };
        if ret == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn allocate_range(_file: &File, _offset: u64, _len: u64) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "range allocation is not available on this platform",
    ))
}

fn is_unsupported(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::Unsupported {
        return true;
    }

    #[cfg(unix)]
    {
        matches!(err.raw_os_error(), Some(code) if code == libc::EOPNOTSUPP || code == libc::ENOTSUP)
    }
    #[cfg(not(unix))]
    {
        false
    }
}
