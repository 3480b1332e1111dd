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


use crate::bloom::Hasher;
use crate::bloom::IndexCursor;
use crate::bloom::IndexProducer;
use crate::bloom::Shape;
use crate::common::floor_mod;
use crate::error::Error;
use crate::hash::walk_cyclic;
use crate::hash::HashFunctionIdentity;

/// A hasher for a single item described by two 64-bit values.
///
/// The `i`-th index for a shape with `k` hash functions and `m` bits is
///
/// ```text
/// floor_mod(initial + i * increment, m)    for i in 0..k
/// ```
///
/// with wrapping 64-bit arithmetic. This is the combinatorial (double hashing) scheme of Kirsch
/// and Mitzenmacher. The hasher does not depend on a hash function identity, so it works with
/// any shape.
///
/// # Examples
///
/// ```
/// # use bloomhash::bloom::Hasher;
/// # use bloomhash::bloom::IndexProducer;
/// # use bloomhash::bloom::Shape;
/// # use bloomhash::bloom::SimpleHasher;
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Md5Cyclic;
/// let shape = Shape::new(Md5Cyclic::new().identity().clone(), 1, 72, 3).unwrap();
/// let hasher = SimpleHasher::new(5, 12);
/// assert_eq!(hasher.indices(&shape).unwrap().as_index_array(), vec![5, 17, 29]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleHasher {
    initial: i64,
    increment: i64,
}

impl SimpleHasher {
    /// Creates a hasher from its two seed values.
    pub fn new(initial: i64, increment: i64) -> Self {
        SimpleHasher { initial, increment }
    }

    /// Creates a hasher from a byte buffer, typically the output of a 128-bit hash.
    ///
    /// The buffer is split into two halves (the second gets the extra byte of an odd length).
    /// Up to 8 bytes of each half are packed big-endian into the high bytes of a 64-bit value:
    /// the first half becomes `initial`, the second `increment`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `buffer` is empty.
    pub fn from_bytes(buffer: &[u8]) -> Result<Self, Error> {
        if buffer.is_empty() {
            return Err(Error::invalid_argument("buffer length must be greater than 0"));
        }
        let (first, second) = buffer.split_at(buffer.len() / 2);
        Ok(SimpleHasher {
            initial: pack_high_bytes(first),
            increment: pack_high_bytes(second),
        })
    }

    /// Returns the initial value.
    pub fn initial(&self) -> i64 {
        self.initial
    }

    /// Returns the increment.
    pub fn increment(&self) -> i64 {
        self.increment
    }

    /// Returns a cursor over the indices for `shape` that computes each index on demand.
    ///
    /// The cursor yields the same sequence as [`indices`](Hasher::indices).
    pub fn cursor(&self, shape: &Shape) -> IndexCursor {
        IndexCursor::cyclic(self.initial, self.increment, shape)
    }
}

fn pack_high_bytes(bytes: &[u8]) -> i64 {
    let mut buf = [0u8; 8];
    let len = bytes.len().min(8);
    buf[..len].copy_from_slice(&bytes[..len]);
    i64::from_be_bytes(buf)
}

impl Hasher for SimpleHasher {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        None
    }

    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        Ok(Box::new(SimpleIndexProducer {
            initial: self.initial,
            increment: self.increment,
            number_of_bits: shape.number_of_bits(),
            number_of_hash_functions: shape.number_of_hash_functions(),
        }))
    }

    fn size(&self) -> usize {
        1
    }
}

#[derive(Debug)]
struct SimpleIndexProducer {
    initial: i64,
    increment: i64,
    number_of_bits: u32,
    number_of_hash_functions: u32,
}

impl IndexProducer for SimpleIndexProducer {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        walk_cyclic(
            self.initial,
            self.increment,
            self.number_of_hash_functions,
            &mut |raw| consumer(floor_mod(raw, self.number_of_bits)),
        )
    }
}
