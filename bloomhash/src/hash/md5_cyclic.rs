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


use byteorder::ByteOrder;
use byteorder::BE;

use super::cyclic_value;
use super::identity_with_signature;
use super::HashFunction;
use super::HashFunctionIdentity;
use super::ProcessType;
use super::Signedness;

/// Cyclic hash function built on the MD5 digest.
///
/// The 128-bit digest is read as two big-endian 64-bit integers: the first is `value(0)`, the
/// second the increment. MD5 is used for its distribution only, not for any security property.
///
/// # Examples
///
/// ```
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Md5Cyclic;
/// let md5 = Md5Cyclic::new();
/// assert_eq!(md5.identity().name(), "MD5");
/// assert_eq!(md5.apply(b"Hello", 0), md5.apply(b"Hello", 0));
/// ```
#[derive(Debug, Clone)]
pub struct Md5Cyclic {
    identity: HashFunctionIdentity,
}

impl Md5Cyclic {
    /// The name of this hash function.
    pub const NAME: &'static str = "MD5";

    /// Creates the function and computes its signature.
    pub fn new() -> Self {
        let identity = identity_with_signature(
            Self::NAME,
            Signedness::Signed,
            ProcessType::Cyclic,
            |buffer| digest_parts(buffer).0,
        );
        Md5Cyclic { identity }
    }
}

impl Default for Md5Cyclic {
    fn default() -> Self {
        Self::new()
    }
}

fn digest_parts(buffer: &[u8]) -> (i64, i64) {
    let digest = md5::compute(buffer).0;
    (BE::read_i64(&digest[..8]), BE::read_i64(&digest[8..]))
}

impl HashFunction for Md5Cyclic {
    fn identity(&self) -> &HashFunctionIdentity {
        &self.identity
    }

    fn apply(&self, buffer: &[u8], seed: u32) -> i64 {
        let (base, increment) = digest_parts(buffer);
        cyclic_value(base, increment, seed)
    }

    fn cyclic_parts(&self, buffer: &[u8]) -> Option<(i64, i64)> {
        Some(digest_parts(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let md5 = Md5Cyclic::new();
        let identity = md5.identity();
        assert_eq!(identity.name(), "MD5");
        assert_eq!(identity.provider(), "bloomhash");
        assert_eq!(identity.signedness(), Signedness::Signed);
        assert_eq!(identity.process_type(), ProcessType::Cyclic);
        assert_eq!(identity.signature(), -6790451487108189226);
    }

    #[test]
    fn test_digest_halves() {
        // md5("Hello") = 8b1a9953c4611296a827abf8c47804d7
        let md5 = Md5Cyclic::new();
        let base = 0x8b1a9953c4611296u64 as i64;
        let increment = 0xa827abf8c47804d7u64 as i64;
        assert_eq!(md5.cyclic_parts(b"Hello"), Some((base, increment)));
        assert_eq!(md5.apply(b"Hello", 0), base);
        assert_eq!(md5.apply(b"Hello", 1), base.wrapping_add(increment));
        assert_eq!(
            md5.apply(b"Hello", 5),
            base.wrapping_add(increment.wrapping_mul(5))
        );
    }

    #[test]
    fn test_walk_matches_apply() {
        let md5 = Md5Cyclic::new();
        let mut walked = vec![];
        assert!(md5.walk(b"walk", 10, &mut |v| {
            walked.push(v);
            true
        }));
        let applied: Vec<i64> = (0..10).map(|seed| md5.apply(b"walk", seed)).collect();
        assert_eq!(walked, applied);
    }

    #[test]
    fn test_walk_short_circuits() {
        let md5 = Md5Cyclic::new();
        let mut calls = 0;
        assert!(!md5.walk(b"walk", 10, &mut |_| {
            calls += 1;
            calls < 3
        }));
        assert_eq!(calls, 3);
    }
}
