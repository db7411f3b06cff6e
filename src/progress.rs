use std::io::{self, Read};

/// Read-through wrapper that reports cumulative progress.
///
/// Every read that yields bytes bumps the counter and calls the observer
/// with `(transferred, total)` before returning. End of stream and errors
/// leave the counter alone and skip the observer. `transferred` is never
/// clamped to `total`; a `total` of 0 means the size is unknown.
pub struct ProgressReader<R, F> {
    inner: R,
    total: u64,
    transferred: u64,
    observer: F,
}

impl<R, F> ProgressReader<R, F>
where
    R: Read,
    F: FnMut(u64, u64),
{
    pub fn new(inner: R, total: u64, observer: F) -> Self {
        Self {
            inner,
            total,
            transferred: 0,
            observer,
        }
    }

    pub fn transferred(&self) -> u64 {
        self.transferred
    }
}

impl<R, F> Read for ProgressReader<R, F>
where
    R: Read,
    F: FnMut(u64, u64),
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.transferred += n as u64;
            (self.observer)(self.transferred, self.total);
        }
        Ok(n)
    }
}
