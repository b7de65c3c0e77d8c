//! Bodies for the blocking binding.
//!
//! [`BlockingBody`] is how [`HttpConverter`](crate::HttpConverter) obtains the
//! bytes of an `http::Request<B>` or `http::Response<B>`. In-memory bodies are
//! borrowed; [`ReaderBody`] drains a `std::io::Read` source.

use std::borrow::Cow;
use std::io::{self, Read};

use bytes::Bytes;

/// A request or response body that can be read synchronously.
pub trait BlockingBody {
    /// Return the full body. Streaming sources are consumed.
    fn read_body(&mut self) -> io::Result<Cow<'_, [u8]>>;
}

impl BlockingBody for Bytes {
    fn read_body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(&self[..]))
    }
}

impl BlockingBody for Vec<u8> {
    fn read_body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl BlockingBody for String {
    fn read_body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl BlockingBody for &[u8] {
    fn read_body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(*self))
    }
}

impl BlockingBody for () {
    fn read_body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(&[]))
    }
}

/// Body backed by a reader, e.g. a socket or file.
///
/// The reader is drained to the end on the first read; later reads return
/// whatever is left, which is usually nothing.
#[derive(Debug)]
pub struct ReaderBody<R> {
    inner: R,
}

impl<R: Read> ReaderBody<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> BlockingBody for ReaderBody<R> {
    fn read_body(&mut self) -> io::Result<Cow<'_, [u8]>> {
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf)?;
        Ok(Cow::Owned(buf))
    }
}
