use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{ConfigError, Result};

/// A file opened through one of the `_auto` accessors.
///
/// Clones share the same underlying file. The owning [`crate::Config`] keeps
/// one clone and closes it in [`crate::Config::close`]; the caller may close
/// it earlier with [`TrackedFile::close`]. Any I/O on a closed file fails.
#[derive(Debug, Clone)]
pub struct TrackedFile {
    path: PathBuf,
    writable: bool,
    file: Rc<RefCell<Option<File>>>,
}

impl TrackedFile {
    pub(crate) fn new(path: PathBuf, file: File, writable: bool) -> Self {
        Self {
            path,
            writable,
            file: Rc::new(RefCell::new(Some(file))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.borrow().is_none()
    }

    /// Close the file. Writable files are synced to disk first.
    pub fn close(&self) -> Result<()> {
        let file = self
            .file
            .borrow_mut()
            .take()
            .ok_or_else(|| ConfigError::AlreadyClosed(self.path.display().to_string()))?;

        if self.writable {
            file.sync_all()
                .map_err(|e| ConfigError::io(e, "close", &self.path))?;
        }
        Ok(())
    }

    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        match self.file.borrow_mut().as_mut() {
            Some(file) => f(file),
            None => Err(io::Error::other(format!("{} is closed", self.path.display()))),
        }
    }
}

impl Read for TrackedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.with_file(|file| file.read(buf))
    }
}

impl Write for TrackedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl Seek for TrackedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.with_file(|file| file.seek(pos))
    }
}
