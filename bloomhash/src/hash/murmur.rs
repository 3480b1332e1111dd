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


use super::cyclic_value;
use super::identity_with_signature;
use super::murmurhash::murmurhash3_x64_128;
use super::murmurhash::murmurhash3_x86_32;
use super::HashFunction;
use super::HashFunctionIdentity;
use super::ProcessType;
use super::Signedness;

/// Cyclic hash function built on the 128-bit MurmurHash3 (x64 variant) with seed 0.
///
/// `h1` is `value(0)` and `h2` the increment.
#[derive(Debug, Clone)]
pub struct Murmur128x64Cyclic {
    identity: HashFunctionIdentity,
}

impl Murmur128x64Cyclic {
    /// The name of this hash function.
    pub const NAME: &'static str = "Murmur3_x64_128";

    /// Creates the function and computes its signature.
    pub fn new() -> Self {
        let identity = identity_with_signature(
            Self::NAME,
            Signedness::Signed,
            ProcessType::Cyclic,
            |buffer| hash_parts(buffer).0,
        );
        Murmur128x64Cyclic { identity }
    }
}

impl Default for Murmur128x64Cyclic {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_parts(buffer: &[u8]) -> (i64, i64) {
    let (h1, h2) = murmurhash3_x64_128(buffer, 0);
    (h1 as i64, h2 as i64)
}

impl HashFunction for Murmur128x64Cyclic {
    fn identity(&self) -> &HashFunctionIdentity {
        &self.identity
    }

    fn apply(&self, buffer: &[u8], seed: u32) -> i64 {
        let (base, increment) = hash_parts(buffer);
        cyclic_value(base, increment, seed)
    }

    fn cyclic_parts(&self, buffer: &[u8]) -> Option<(i64, i64)> {
        Some(hash_parts(buffer))
    }
}

/// Iterative hash function built on the 32-bit MurmurHash3 (x86 variant).
///
/// The walk seed is used as the murmur seed, so every value is a fresh hash of the buffer. The
/// 32-bit result is sign-extended.
#[derive(Debug, Clone)]
pub struct Murmur32x86Iterative {
    identity: HashFunctionIdentity,
}

impl Murmur32x86Iterative {
    /// The name of this hash function.
    pub const NAME: &'static str = "Murmur3_x86_32";

    /// Creates the function and computes its signature.
    pub fn new() -> Self {
        let identity = identity_with_signature(
            Self::NAME,
            Signedness::Signed,
            ProcessType::Iterative,
            |buffer| hash32(buffer, 0),
        );
        Murmur32x86Iterative { identity }
    }
}

impl Default for Murmur32x86Iterative {
    fn default() -> Self {
        Self::new()
    }
}

fn hash32(buffer: &[u8], seed: u32) -> i64 {
    i64::from(murmurhash3_x86_32(buffer, seed) as i32)
}

impl HashFunction for Murmur32x86Iterative {
    fn identity(&self) -> &HashFunctionIdentity {
        &self.identity
    }

    fn apply(&self, buffer: &[u8], seed: u32) -> i64 {
        hash32(buffer, seed)
    }
}
