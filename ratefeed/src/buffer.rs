use getset::CopyGetters;
use zerocopy::IntoBytes;

use ratefeed_core::common::{CHANNELS, FRAME_BYTES, SAMPLE_BYTES};

/// Samples reserved at the head of the buffer for the interpolation seed frame.
pub const SEED: usize = CHANNELS;

/// Staging buffer of interleaved S16 stereo samples.
///
/// `read_pos` is the next frame the kernel interpolates towards and
/// `read_pos - 2` the frame it interpolates from. `write_pos` is one past the
/// last complete frame. Up to three bytes of an incomplete frame are kept
/// right after `write_pos` until the rest arrives.
#[derive(Debug, Clone, CopyGetters)]
pub struct StagingBuffer {
    data: Vec<i16>,
    /// Index of the next frame to consume, in samples.
    #[getset(get_copy = "pub")]
    read_pos: usize,
    /// One past the last complete frame, in samples.
    #[getset(get_copy = "pub")]
    write_pos: usize,
    /// Bytes of an incomplete frame carried to the next fetch.
    #[getset(get_copy = "pub")]
    stray_bytes: usize,
    primed: bool,
}

impl StagingBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity % CHANNELS == 0);
        let mut buffer = Self {
            data: vec![0; capacity],
            read_pos: 0,
            write_pos: 0,
            stray_bytes: 0,
            primed: false,
        };
        buffer.reset();
        buffer
    }

    /// Capacity in samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Unused samples after `write_pos`.
    #[must_use]
    pub fn free_space(&self) -> usize {
        self.capacity() - self.write_pos
    }

    /// Complete frames from `read_pos` to `write_pos`.
    #[must_use]
    pub fn frames_available(&self) -> usize {
        (self.write_pos - self.read_pos) / CHANNELS
    }

    /// Returns `true` if the kernel has consumed every staged frame.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.read_pos == self.write_pos
    }

    /// Returns `true` if no more bytes can be fetched.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.write_pos == self.capacity()
    }

    /// Samples from the head of the buffer up to `write_pos`.
    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.data[..self.write_pos]
    }

    pub(crate) fn reset(&mut self) {
        let cap = self.capacity();
        self.read_pos = SEED.min(cap);
        self.write_pos = (2 * SEED).min(cap);
        self.stray_bytes = 0;
        self.primed = false;
        self.data.fill(0);
    }

    /// Window of at most `limit` bytes to fetch into, after the stray bytes.
    pub(crate) fn fetch_window(&mut self, limit: usize) -> &mut [u8] {
        let start = self.write_pos * SAMPLE_BYTES;
        let len = (self.free_space() * SAMPLE_BYTES).min(limit);
        debug_assert!(len >= self.stray_bytes);
        &mut self.data.as_mut_bytes()[start + self.stray_bytes..start + len]
    }

    /// Accounts `n` bytes written into the last fetch window and returns the
    /// number of frames completed.
    pub(crate) fn commit(&mut self, n: usize) -> usize {
        let total = self.stray_bytes + n;
        let frames = total / FRAME_BYTES;
        let old = self.write_pos;
        self.write_pos += frames * CHANNELS;
        self.stray_bytes = total % FRAME_BYTES;
        debug_assert!(
            self.write_pos * SAMPLE_BYTES + self.stray_bytes <= self.data.as_bytes().len()
        );
        if frames > 0 && !self.primed && old >= SEED {
            self.data.copy_within(old..old + CHANNELS, old - SEED);
            self.primed = true;
        }
        frames
    }

    /// Splits into the staged samples and the read cursor for a kernel run.
    pub(crate) fn staged(&mut self) -> (&[i16], &mut usize) {
        (&self.data[..self.write_pos], &mut self.read_pos)
    }

    /// Moves the last consumed frame and the single lookahead frame to the
    /// head so the next fetch has the whole buffer.
    pub(crate) fn compact(&mut self) {
        debug_assert_eq!(self.write_pos - self.read_pos, CHANNELS);
        let src = self.read_pos - SEED;
        self.data.copy_within(src..src + 2 * CHANNELS, 0);
        self.move_stray(2 * SEED);
        self.read_pos = SEED;
        self.write_pos = 2 * SEED;
    }

    /// Keeps the last consumed frame as the next seed once everything staged
    /// has been consumed.
    pub(crate) fn recycle(&mut self) {
        debug_assert!(self.is_drained());
        let src = self.read_pos - SEED;
        self.data.copy_within(src..self.read_pos, 0);
        self.move_stray(SEED);
        self.read_pos = SEED;
        self.write_pos = SEED;
    }

    fn move_stray(&mut self, to: usize) {
        let from = self.write_pos * SAMPLE_BYTES;
        let to = to * SAMPLE_BYTES;
        let n = self.stray_bytes;
        self.data.as_mut_bytes().copy_within(from..from + n, to);
    }

    pub(crate) fn check_invariants(&self) {
        debug_assert!(self.read_pos <= self.write_pos);
        debug_assert!(self.write_pos <= self.capacity());
        debug_assert!(self.read_pos % CHANNELS == 0 && self.write_pos % CHANNELS == 0);
        debug_assert!(self.stray_bytes < FRAME_BYTES);
    }
}
