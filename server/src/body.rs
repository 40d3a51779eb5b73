use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};

use app::workspace::ScratchSession;
use axum::body::Bytes;
use futures::Stream;
use tokio_util::io::ReaderStream;

/// Response body that streams the clip file without buffering it, while
/// holding the scratch session. Dropping the body (stream finished, or
/// the client went away) releases both scratch files.
pub struct ClipBody {
    inner: ReaderStream<tokio::fs::File>,
    _session: ScratchSession,
}

impl ClipBody {
    pub fn new(file: tokio::fs::File, session: ScratchSession) -> ClipBody {
        ClipBody {
            inner: ReaderStream::new(file),
            _session: session,
        }
    }
}

impl Stream for ClipBody {
    type Item = Result<Bytes, io::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
