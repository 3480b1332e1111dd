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


//! Hash functions that turn a byte buffer into a stream of 64-bit values.
//!
//! Every function is described by a [`HashFunctionIdentity`]. A [`Shape`](crate::bloom::Shape)
//! records the identity it was sized for, and hashers refuse to produce indices for a shape whose
//! identity does not match their own (see [`check_are_equal`]).
//!
//! A function is "walked" by applying it with the seeds `0, 1, 2, ...`. For
//! [`ProcessType::Cyclic`] functions one computation yields `value(0)` and an increment, and
//! `value(s) = value(0) + s * increment` with wrapping arithmetic. [`ProcessType::Iterative`]
//! functions compute every seed independently.

mod identity;
mod md5_cyclic;
mod murmur;
mod murmurhash;
mod objects;

pub use self::identity::are_equal;
pub use self::identity::check_are_equal;
pub use self::identity::common_comparator;
pub use self::identity::deep_comparator;
pub use self::identity::HashFunctionIdentity;
pub use self::identity::ProcessType;
pub use self::identity::Signedness;
pub use self::md5_cyclic::Md5Cyclic;
pub use self::murmur::Murmur128x64Cyclic;
pub use self::murmur::Murmur32x86Iterative;
pub use self::objects::ObjectsHashIterative;

use std::fmt;

/// The provider recorded in the identities of the functions shipped with this crate.
pub const PROVIDER: &str = env!("CARGO_PKG_NAME");

/// A deterministic function from a byte buffer and a seed to a 64-bit value.
///
/// Implementations are immutable and may be shared between threads.
pub trait HashFunction: fmt::Debug + Send + Sync {
    /// Returns the identity describing this function.
    fn identity(&self) -> &HashFunctionIdentity;

    /// Applies the function to `buffer` with the given `seed`.
    ///
    /// For cyclic functions the result equals `value(0) + seed * increment` (wrapping).
    fn apply(&self, buffer: &[u8], seed: u32) -> i64;

    /// Returns `(value(0), increment)` for cyclic functions and `None` otherwise.
    ///
    /// The default derives the pair from two applications; implementations that compute both
    /// halves of a single digest should override it.
    fn cyclic_parts(&self, buffer: &[u8]) -> Option<(i64, i64)> {
        match self.identity().process_type() {
            ProcessType::Cyclic => {
                let base = self.apply(buffer, 0);
                let increment = self.apply(buffer, 1).wrapping_sub(base);
                Some((base, increment))
            }
            ProcessType::Iterative => None,
        }
    }

    /// Feeds the values for seeds `0..count` to `consumer` in order.
    ///
    /// Stops and returns `false` as soon as `consumer` returns `false`.
    fn walk(&self, buffer: &[u8], count: u32, consumer: &mut dyn FnMut(i64) -> bool) -> bool {
        match self.cyclic_parts(buffer) {
            Some((base, increment)) => walk_cyclic(base, increment, count, consumer),
            None => (0..count).all(|seed| consumer(self.apply(buffer, seed))),
        }
    }
}

/// Walks `count` values of the cyclic sequence starting at `base`.
pub(crate) fn walk_cyclic(
    base: i64,
    increment: i64,
    count: u32,
    consumer: &mut dyn FnMut(i64) -> bool,
) -> bool {
    let mut value = base;
    for _ in 0..count {
        if !consumer(value) {
            return false;
        }
        value = value.wrapping_add(increment);
    }
    true
}

/// Computes the value of a cyclic sequence at `seed`.
fn cyclic_value(base: i64, increment: i64, seed: u32) -> i64 {
    base.wrapping_add(increment.wrapping_mul(i64::from(seed)))
}

/// Builds the identity of a function shipped with this crate.
///
/// The signature is the function applied with seed 0 to `NAME-SIGNEDNESS-PROCESSTYPE`.
fn identity_with_signature(
    name: &str,
    signedness: Signedness,
    process_type: ProcessType,
    apply_seed_zero: impl FnOnce(&[u8]) -> i64,
) -> HashFunctionIdentity {
    let text = format!("{name}-{signedness}-{process_type}");
    let signature = apply_seed_zero(text.as_bytes());
    HashFunctionIdentity::new(name, PROVIDER, signedness, process_type, signature)
}
