use std::io::Read;

use crate::error::SourceError;

/// Upstream supplier of raw interleaved S16 stereo bytes.
pub trait ByteSource {
    /// Copies up to `dest.len()` bytes into `dest` and returns how many were written.
    ///
    /// `0` means end of stream. The count need not be a multiple of a frame.
    fn fetch(&mut self, dest: &mut [u8]) -> Result<usize, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn fetch(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
        (**self).fetch(dest)
    }
}

impl ByteSource for Box<dyn ByteSource> {
    fn fetch(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
        self.as_mut().fetch(dest)
    }
}

/// In-memory source.
///
/// An optional chunk limit caps every fetch, which makes short and unaligned
/// upstream reads easy to reproduce.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
    chunk: Option<usize>,
}

impl<'a> SliceSource<'a> {
    /// Creates a source that hands out `data` as fast as asked.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk: None,
        }
    }

    /// Limits each fetch to at most `chunk` bytes.
    #[must_use]
    pub const fn with_chunk(self, chunk: usize) -> Self {
        Self {
            chunk: Some(chunk),
            ..self
        }
    }

    /// Bytes not yet fetched.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn fetch(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
        let n = self
            .chunk
            .map_or(dest.len(), |c| c.min(dest.len()))
            .min(self.remaining());
        dest[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Adapts any [`Read`] as a source.
#[derive(Debug)]
pub struct ReadSource<R: Read> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    /// Wraps `inner`.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn fetch(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
        loop {
            match self.inner.read(dest) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(feature = "wav")]
mod wav {
    use std::{
        fs::File,
        io::{BufReader, Read},
        path::Path,
    };

    use hound::{SampleFormat, WavReader};
    use ratefeed_core::common::{Freq, Hz, CHANNELS};

    use super::ByteSource;
    use crate::error::SourceError;

    /// Streams the samples of a 16-bit stereo WAV file.
    pub struct WavSource<R: Read> {
        reader: WavReader<R>,
        pending: Option<u8>,
    }

    impl WavSource<BufReader<File>> {
        /// Opens the WAV file at `path`.
        ///
        /// # Errors
        ///
        /// Returns [`SourceError`] if the file cannot be read or is not
        /// 16-bit integer stereo.
        pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
            Self::from_reader(WavReader::open(path)?)
        }
    }

    impl<R: Read> WavSource<R> {
        /// Reads the WAV header from `inner`.
        ///
        /// # Errors
        ///
        /// Returns [`SourceError`] if the header is broken or the format is
        /// not 16-bit integer stereo.
        pub fn new(inner: R) -> Result<Self, SourceError> {
            Self::from_reader(WavReader::new(inner)?)
        }

        fn from_reader(reader: WavReader<R>) -> Result<Self, SourceError> {
            let spec = reader.spec();
            if spec.channels as usize != CHANNELS
                || spec.bits_per_sample != 16
                || spec.sample_format != SampleFormat::Int
            {
                return Err(SourceError::new(format!(
                    "Unsupported WAV format: {} channel(s), {} bit {:?}",
                    spec.channels, spec.bits_per_sample, spec.sample_format
                )));
            }
            Ok(Self {
                reader,
                pending: None,
            })
        }

        /// Sample rate declared by the file header.
        #[must_use]
        pub fn rate(&self) -> Freq<u32> {
            self.reader.spec().sample_rate * Hz
        }
    }

    impl<R: Read> ByteSource for WavSource<R> {
        fn fetch(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
            let mut n = 0;
            while n < dest.len() {
                if let Some(b) = self.pending.take() {
                    dest[n] = b;
                    n += 1;
                    continue;
                }
                let Some(sample) = self.reader.samples::<i16>().next() else {
                    break;
                };
                let [lo, hi] = sample?.to_ne_bytes();
                dest[n] = lo;
                n += 1;
                match dest.get_mut(n) {
                    Some(d) => {
                        *d = hi;
                        n += 1;
                    }
                    None => self.pending = Some(hi),
                }
            }
            Ok(n)
        }
    }
}

#[cfg(feature = "wav")]
pub use wav::WavSource;
