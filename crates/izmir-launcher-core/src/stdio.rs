use std::io;
use std::pin::Pin;
use std::sync::{Arc, PoisonError};
use std::task::{Context, Poll};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

type SharedWriter = Arc<Mutex<Box<dyn AsyncWrite + Unpin + Sync + Send>>>;

async fn write_line(writer: &SharedWriter, message: &str) -> io::Result<()> {
    let mut lock = writer.lock().await;
    lock.write_all(message.as_bytes()).await?;
    lock.write_all(b"\n").await?;
    lock.flush().await
}

/// Sink for the launcher's own standard-output diagnostics
pub struct LauncherStdOut(SharedWriter);

impl Clone for LauncherStdOut {
    fn clone(&self) -> Self {
        LauncherStdOut(self.0.clone())
    }
}

impl LauncherStdOut {
    pub fn new(t: Box<dyn AsyncWrite + Unpin + Sync + Send>) -> LauncherStdOut {
        LauncherStdOut(Arc::new(Mutex::new(t)))
    }

    pub fn stdout() -> LauncherStdOut {
        Self::new(Box::new(tokio::io::stdout()))
    }

    /// Write `message` followed by a newline and flush
    pub async fn print(&self, message: &str) -> io::Result<()> {
        write_line(&self.0, message).await
    }
}

/// Sink for the launcher's own error diagnostics
pub struct LauncherStdErr(SharedWriter);

impl Clone for LauncherStdErr {
    fn clone(&self) -> Self {
        LauncherStdErr(self.0.clone())
    }
}

impl LauncherStdErr {
    pub fn new(t: Box<dyn AsyncWrite + Unpin + Sync + Send>) -> LauncherStdErr {
        LauncherStdErr(Arc::new(Mutex::new(t)))
    }

    pub fn stderr() -> LauncherStdErr {
        Self::new(Box::new(tokio::io::stderr()))
    }

    /// Write `message` followed by a newline and flush
    pub async fn print(&self, message: &str) -> io::Result<()> {
        write_line(&self.0, message).await
    }
}

/// In-memory writer for capturing diagnostics, e.g. when embedding the launcher
#[derive(Clone, Default)]
pub struct CaptureBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl AsyncWrite for CaptureBuffer {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_print_appends_newline() {
        let buffer = CaptureBuffer::new();
        let out = LauncherStdOut::new(Box::new(buffer.clone()));
        out.print("first").await.unwrap();
        out.clone().print("second").await.unwrap();
        assert_eq!(buffer.contents(), "first\nsecond\n");
    }

    #[tokio::test]
    async fn test_stderr_sink_is_independent() {
        let out_buffer = CaptureBuffer::new();
        let err_buffer = CaptureBuffer::new();
        let out = LauncherStdOut::new(Box::new(out_buffer.clone()));
        let err = LauncherStdErr::new(Box::new(err_buffer.clone()));

        err.print("broken").await.unwrap();
        out.print("fine").await.unwrap();
        assert_eq!(err_buffer.contents(), "broken\n");
        assert_eq!(out_buffer.contents(), "fine\n");
    }
}
