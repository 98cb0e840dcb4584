use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use tokio::io::AsyncReadExt;

use crate::error::Operation;
use crate::{Config, Error, Result};

/// A lazy, single-pass stream of the lines of a file.
///
/// Lines are yielded without their terminator. `\n`, `\r\n` and a lone `\r`
/// all end a line; with `collapse_crlf` disabled `\r\n` counts as two
/// breaks. A trailing terminator does not produce an extra empty line, and
/// an empty file yields nothing.
///
/// The file is read in chunks of `line_chunk_size` bytes and stays open
/// until the stream is exhausted or dropped. Compose it with
/// [`futures::StreamExt`] and [`futures::TryStreamExt`]; it cannot be
/// restarted.
pub struct Lines {
    inner: BoxStream<'static, Result<String>>,
}

impl Lines {
    pub(crate) fn new(file: tokio::fs::File, path: PathBuf, config: &Config) -> Self {
        let reader = LineReader {
            file,
            path,
            buf: Vec::new(),
            start: 0,
            searched: 0,
            chunk: vec![0; config.line_chunk_size.max(1)],
            eof: false,
            collapse_crlf: config.collapse_crlf,
        };

        let inner = stream::try_unfold(reader, |mut reader| async move {
            let line = reader.next_line().await?;
            Ok::<_, Error>(line.map(|line| (line, reader)))
        })
        .boxed();

        Self { inner }
    }
}

impl Stream for Lines {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for Lines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lines").finish_non_exhaustive()
    }
}

struct LineReader {
    file: tokio::fs::File,
    path: PathBuf,
    /// Bytes read from disk; everything before `start` is already yielded
    buf: Vec<u8>,
    start: usize,
    /// Offset in `buf` up to which no line break has been found
    searched: usize,
    chunk: Vec<u8>,
    eof: bool,
    collapse_crlf: bool,
}

impl LineReader {
    async fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some((end, consumed)) = self.find_break() {
                let line = self.buf[self.start..end].to_vec();
                self.start = consumed;
                self.searched = consumed;
                return self.decode(line).map(Some);
            }

            if self.eof {
                if self.start == self.buf.len() {
                    return Ok(None);
                }
                let line = self.buf[self.start..].to_vec();
                self.start = self.buf.len();
                self.searched = self.start;
                return self.decode(line).map(Some);
            }

            self.fill().await?;
        }
    }

    /// Returns the end of the next line and the offset just past its
    /// terminator, or `None` when more input is needed to decide. Bytes
    /// already scanned are not scanned again.
    fn find_break(&mut self) -> Option<(usize, usize)> {
        let from = self.searched.max(self.start);
        let Some(rel) = self.buf[from..]
            .iter()
            .position(|b| *b == b'\n' || *b == b'\r')
        else {
            self.searched = self.buf.len();
            return None;
        };
        let pos = from + rel;

        if self.buf[pos] == b'\n' {
            return Some((pos, pos + 1));
        }

        match self.buf.get(pos + 1) {
            Some(b'\n') if self.collapse_crlf => Some((pos, pos + 2)),
            Some(_) => Some((pos, pos + 1)),
            // A `\r` at the end of the buffer may be the first half of `\r\n`
            None if self.collapse_crlf && !self.eof => {
                self.searched = pos;
                None
            }
            None => Some((pos, pos + 1)),
        }
    }

    /// Drops yielded bytes once per read, then appends the next chunk.
    async fn fill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.searched -= self.start;
            self.start = 0;
        }

        let n = self
            .file
            .read(&mut self.chunk)
            .await
            .map_err(|e| Error::io(Operation::Read, &self.path, e))?;

        if n == 0 {
            self.eof = true;
        } else {
            self.buf.extend_from_slice(&self.chunk[..n]);
        }
        Ok(())
    }

    fn decode(&self, line: Vec<u8>) -> Result<String> {
        String::from_utf8(line).map_err(|source| Error::Utf8 { path: self.path.clone(), source })
    }
}
