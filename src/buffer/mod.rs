//! Internal buffer management.
//!
//! [`SlidingBuffer`] owns the chunker's read buffer and keeps at least
//! `max_size` unread bytes available to the cut-point search until the
//! source runs dry. It is an implementation detail and not part of the
//! public API.

mod window;

pub(crate) use window::SlidingBuffer;
