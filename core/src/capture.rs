//! Console output target with scoped redirection
//!
//! Setup routines and the fixture serializer report everything through a
//! [`Console`]. A [`Redirect`] guard swaps the console's target for an
//! in-memory [`CaptureBuffer`] and puts the previous target back when it is
//! dropped, whether the scope ends normally, through `?`, or by unwinding.
//! The guard holds the console by exclusive reference, so two redirections
//! of the same console can never be active side by side.

use std::fmt;
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Shared in-memory byte sink. Clones write to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far, decoded lossily as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The output target setup and serialization write to
pub struct Console {
    target: Box<dyn Write + Send>,
    depth: usize,
}

impl Console {
    /// Console writing to the process standard output
    pub fn stdout() -> Self {
        Self::with_target(io::stdout())
    }

    /// Console writing to an arbitrary target
    pub fn with_target(target: impl Write + Send + 'static) -> Self {
        Self {
            target: Box::new(target),
            depth: 0,
        }
    }

    /// Send output to `sink` until the returned guard is dropped.
    ///
    /// Without a sink, output goes to a fresh buffer that is thrown away with
    /// the guard.
    pub fn redirect(&mut self, sink: Option<CaptureBuffer>) -> Redirect<'_> {
        let sink = sink.unwrap_or_default();
        if let Err(e) = self.target.flush() {
            debug!("Failed to flush console before redirect: {}", e);
        }
        let previous = std::mem::replace(&mut self.target, Box::new(sink));
        self.depth += 1;
        debug!(depth = self.depth, "console redirected");
        Redirect {
            console: self,
            previous: Some(previous),
        }
    }

    /// Run `f` with output redirected to `sink`
    pub fn with_redirect<T>(
        &mut self,
        sink: Option<CaptureBuffer>,
        f: impl FnOnce(&mut Console) -> T,
    ) -> T {
        let mut guard = self.redirect(sink);
        f(&mut *guard)
    }

    /// Number of redirections currently in effect
    pub fn redirection_depth(&self) -> usize {
        self.depth
    }

    pub fn is_redirected(&self) -> bool {
        self.depth > 0
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.target.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.target.flush()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

/// Active redirection of a [`Console`]; restores the previous target on drop
pub struct Redirect<'a> {
    console: &'a mut Console,
    previous: Option<Box<dyn Write + Send>>,
}

impl Deref for Redirect<'_> {
    type Target = Console;

    fn deref(&self) -> &Console {
        self.console
    }
}

impl DerefMut for Redirect<'_> {
    fn deref_mut(&mut self) -> &mut Console {
        self.console
    }
}

impl Drop for Redirect<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            if let Err(e) = self.console.target.flush() {
                debug!("Failed to flush redirected output: {}", e);
            }
            self.console.target = previous;
            self.console.depth -= 1;
            debug!(depth = self.console.depth, "console restored");
        }
    }
}
