// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! A simple unidirectional pull stream.
//!
//! Consumers pull values out of a FIFO buffer; a refill callback produces
//! values on demand. The stream is synchronous and single-consumer: the
//! lexer feeds one of these to the parser, which requests tokens one at a
//! time with a single token of lookahead.
//!
//! # Example
//!
//! ```
//! use std::collections::VecDeque;
//! use adder_core::source_analysis::Stream;
//!
//! // The producer counts to 3, then reports itself exhausted.
//! let mut value = 0;
//! let mut stream = Stream::with_min_buffer(
//!     move |buffer: &mut VecDeque<i32>| {
//!         if value >= 3 {
//!             return false;
//!         }
//!         buffer.push_back(value);
//!         value += 1;
//!         true
//!     },
//!     1,
//! );
//!
//! assert_eq!(stream.read(), Some(0));
//! assert_eq!(stream.read(), Some(1));
//! assert_eq!(stream.read(), Some(2));
//! assert_eq!(stream.read(), None);
//! assert!(stream.depleted());
//! ```

use std::collections::VecDeque;

/// Buffer length the stream tries to maintain when observed.
pub const DEFAULT_MIN_BUFFER: usize = 10;

/// A lazily-filled FIFO buffer of `T` backed by a refill callback.
///
/// The callback appends zero or more values per invocation and returns
/// `false` once the producer is exhausted. Each observation (`peek`,
/// `read`, `advance`) triggers at most one refill pass, which invokes the
/// callback until the buffer holds at least `min_buffer` values or the
/// producer finishes. A finished producer is never invoked again.
///
/// There are no failure modes at this layer; `None` from [`Stream::peek`]
/// or [`Stream::read`] always means the stream is depleted.
pub struct Stream<T, F>
where
    F: FnMut(&mut VecDeque<T>) -> bool,
{
    /// Callback used to fill the buffer.
    fill: F,
    /// Buffered values awaiting consumption.
    buffer: VecDeque<T>,
    /// Buffer length a refill pass aims for.
    min_buffer: usize,
    /// Whether the producer has reported itself exhausted. The buffer may
    /// still be non-empty after this flips.
    finished: bool,
}

impl<T, F> Stream<T, F>
where
    F: FnMut(&mut VecDeque<T>) -> bool,
{
    /// Creates a stream with the default minimum buffer length.
    pub fn new(fill: F) -> Self {
        Self::with_min_buffer(fill, DEFAULT_MIN_BUFFER)
    }

    /// Creates a stream that keeps at least `min_buffer` values buffered
    /// while the producer lasts.
    pub fn with_min_buffer(fill: F, min_buffer: usize) -> Self {
        Self {
            fill,
            buffer: VecDeque::new(),
            min_buffer,
            finished: false,
        }
    }

    /// Peeks at the next value without consuming it.
    ///
    /// Returns `None` iff the stream is depleted. Peeking repeatedly
    /// returns the same value without invoking the producer again.
    pub fn peek(&mut self) -> Option<&T> {
        self.refill();
        self.buffer.front()
    }

    /// Reads the next value, consuming it.
    ///
    /// Returns `None` iff the stream is depleted.
    pub fn read(&mut self) -> Option<T> {
        self.refill();
        self.buffer.pop_front()
    }

    /// Consumes the next value without returning it.
    ///
    /// Returns `false` iff the stream is depleted.
    pub fn advance(&mut self) -> bool {
        self.refill();
        self.buffer.pop_front().is_some()
    }

    /// Is the producer finished?
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Is the buffer currently empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Is the stream depleted? That is, the producer is finished and the
    /// buffer is empty.
    #[must_use]
    pub fn depleted(&self) -> bool {
        self.finished() && self.is_empty()
    }

    /// Tops the buffer up to `min_buffer` values, or until the producer
    /// reports itself exhausted.
    fn refill(&mut self) {
        if self.finished {
            return;
        }
        while self.buffer.len() < self.min_buffer {
            if !(self.fill)(&mut self.buffer) {
                self.finished = true;
                break;
            }
        }
    }
}

impl<T, F> std::fmt::Debug for Stream<T, F>
where
    F: FnMut(&mut VecDeque<T>) -> bool,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("buffered", &self.buffer.len())
            .field("finished", &self.finished)
            .finish()
    }
}
