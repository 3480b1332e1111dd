// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


use std::collections::HashSet;
use std::fmt;

use crate::bloom::Shape;
use crate::common::floor_mod;
use crate::error::Error;

/// A finite sequence of bit indices in `[0, m)` for some shape.
///
/// The sequence may contain duplicates unless it has been passed through
/// [`unique`](Self::unique). A producer is restarted by calling
/// [`for_each_index`](Self::for_each_index) again.
pub trait IndexProducer: fmt::Debug {
    /// Calls `consumer` with every index in order.
    ///
    /// Stops as soon as `consumer` returns `false` and returns `false`; returns `true` once the
    /// sequence is exhausted.
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool;

    /// Collects the sequence into a vector.
    fn as_index_array(&self) -> Vec<u32> {
        let mut indices = vec![];
        self.for_each_index(&mut |index| {
            indices.push(index);
            true
        });
        indices
    }

    /// Wraps this producer so that each index is produced only on its first occurrence.
    fn unique(self) -> UniqueIndexProducer<Self>
    where
        Self: Sized,
    {
        UniqueIndexProducer { inner: self }
    }
}

impl<P: IndexProducer + ?Sized> IndexProducer for &P {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        (**self).for_each_index(consumer)
    }
}

impl<P: IndexProducer + ?Sized> IndexProducer for Box<P> {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        (**self).for_each_index(consumer)
    }
}

impl IndexProducer for [u32] {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        self.iter().all(|&index| consumer(index))
    }
}

impl IndexProducer for Vec<u32> {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        self.as_slice().for_each_index(consumer)
    }
}

/// A producer of no indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyIndexProducer;

impl IndexProducer for EmptyIndexProducer {
    fn for_each_index(&self, _consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        true
    }
}

/// Removes repeated indices from another producer, keeping first occurrences in order.
///
/// Every call to [`for_each_index`](IndexProducer::for_each_index) starts with an empty
/// tracking set, so the wrapper is reusable whenever the inner producer is.
#[derive(Debug, Clone)]
pub struct UniqueIndexProducer<P> {
    inner: P,
}

impl<P: IndexProducer> IndexProducer for UniqueIndexProducer<P> {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        let mut seen = HashSet::new();
        self.inner
            .for_each_index(&mut |index| !seen.insert(index) || consumer(index))
    }
}

/// Produces indices from the set bits of a raw byte buffer.
///
/// The buffer is read as a bit sequence where bit 0 is the least significant bit of byte 0.
/// For every set bit, in order, the producer emits `position mod m`, stopping after `k` values.
/// A buffer with fewer than `k` set bits produces fewer indices.
///
/// # Examples
///
/// ```
/// # use bloomhash::bloom::BufferIndexProducer;
/// # use bloomhash::bloom::IndexProducer;
/// # use bloomhash::bloom::Shape;
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Md5Cyclic;
/// let shape = Shape::new(Md5Cyclic::new().identity().clone(), 1, 10, 3).unwrap();
/// let producer = BufferIndexProducer::new(vec![0b0000_0101, 0b0000_0010], &shape).unwrap();
/// assert_eq!(producer.as_index_array(), vec![0, 2, 9]);
/// ```
#[derive(Debug, Clone)]
pub struct BufferIndexProducer {
    buffer: Vec<u8>,
    number_of_bits: u32,
    number_of_hash_functions: u32,
}

impl BufferIndexProducer {
    /// Creates a producer over `buffer` for `shape`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `buffer` is empty.
    pub fn new(buffer: Vec<u8>, shape: &Shape) -> Result<Self, Error> {
        if buffer.is_empty() {
            return Err(Error::invalid_argument("buffer must not be empty"));
        }
        Ok(BufferIndexProducer {
            buffer,
            number_of_bits: shape.number_of_bits(),
            number_of_hash_functions: shape.number_of_hash_functions(),
        })
    }
}

impl IndexProducer for BufferIndexProducer {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        let m = u64::from(self.number_of_bits);
        let mut remaining = self.number_of_hash_functions;
        for (byte_index, &byte) in self.buffer.iter().enumerate() {
            let mut bits = byte;
            while bits != 0 {
                if remaining == 0 {
                    return true;
                }
                let position = (byte_index as u64) * 8 + u64::from(bits.trailing_zeros());
                if !consumer((position % m) as u32) {
                    return false;
                }
                remaining -= 1;
                // clear lowest set bit
                bits &= bits - 1;
            }
        }
        true
    }
}

/// A pull-style cursor over a sequence of indices.
///
/// A cursor created from an arbitrary producer with [`IndexCursor::new`] drains the producer
/// when it is created. Cursors over a cyclic sequence, such as the one returned by
/// [`SimpleHasher::cursor`](crate::bloom::SimpleHasher::cursor), compute each index when it is
/// requested. Asking for an index after the last one returns a `NoSuchElement` error. The
/// cursor is also an [`Iterator`].
///
/// # Examples
///
/// ```
/// # use bloomhash::bloom::IndexCursor;
/// # use bloomhash::error::ErrorKind;
/// let mut cursor = IndexCursor::new(&vec![3, 1]);
/// assert!(cursor.has_next());
/// assert_eq!(cursor.next_index().unwrap(), 3);
/// assert_eq!(cursor.next_index().unwrap(), 1);
/// assert!(!cursor.has_next());
/// assert_eq!(cursor.next_index().unwrap_err().kind(), ErrorKind::NoSuchElement);
/// ```
#[derive(Debug, Clone)]
pub struct IndexCursor {
    source: CursorSource,
    position: usize,
}

#[derive(Debug, Clone)]
enum CursorSource {
    Buffered(Vec<u32>),
    Cyclic {
        value: i64,
        increment: i64,
        count: u32,
        number_of_bits: u32,
    },
}

impl IndexCursor {
    /// Creates a cursor positioned before the first index of `producer`.
    pub fn new<P: IndexProducer + ?Sized>(producer: &P) -> Self {
        IndexCursor {
            source: CursorSource::Buffered(producer.as_index_array()),
            position: 0,
        }
    }

    /// Creates a cursor over `floor_mod(initial + i * increment, m)` for `i` in `0..k`.
    pub(crate) fn cyclic(initial: i64, increment: i64, shape: &Shape) -> Self {
        IndexCursor {
            source: CursorSource::Cyclic {
                value: initial,
                increment,
                count: shape.number_of_hash_functions(),
                number_of_bits: shape.number_of_bits(),
            },
            position: 0,
        }
    }

    fn total_len(&self) -> usize {
        match &self.source {
            CursorSource::Buffered(indices) => indices.len(),
            CursorSource::Cyclic { count, .. } => *count as usize,
        }
    }

    /// Returns true if another index is available.
    pub fn has_next(&self) -> bool {
        self.position < self.total_len()
    }

    /// Returns the next index.
    ///
    /// # Errors
    ///
    /// Returns a `NoSuchElement` error once the cursor is exhausted.
    pub fn next_index(&mut self) -> Result<u32, Error> {
        if !self.has_next() {
            let err = Error::no_such_element("no more indices");
            return Err(err.with_context("position", self.position));
        }
        let index = match &mut self.source {
            CursorSource::Buffered(indices) => indices[self.position],
            CursorSource::Cyclic {
                value,
                increment,
                number_of_bits,
                ..
            } => {
                let index = floor_mod(*value, *number_of_bits);
                *value = value.wrapping_add(*increment);
                index
            }
        };
        self.position += 1;
        Ok(index)
    }
}

impl Iterator for IndexCursor {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.next_index().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IndexCursor {}
