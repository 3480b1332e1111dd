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


use super::identity_with_signature;
use super::HashFunction;
use super::HashFunctionIdentity;
use super::ProcessType;
use super::Signedness;

/// Iterative fallback hash function using the 31-multiplier polynomial hash.
///
/// The value for seed `s` combines the wrapping sum of the values for seeds `0..s` with the
/// content hash of the buffer:
///
/// ```text
/// value(s) = 31 * (31 + fold(sum(value(0..s)))) + content(buffer)    (32-bit wrapping)
/// ```
///
/// where `fold(x)` xors the two 32-bit halves of `x` and `content` is the polynomial hash of the
/// buffer's signed bytes starting at 1. Each value depends on all previous ones, so there is no
/// shortcut: walking `k` seeds costs `k` combinations.
#[derive(Debug, Clone)]
pub struct ObjectsHashIterative {
    identity: HashFunctionIdentity,
}

impl ObjectsHashIterative {
    /// The name of this hash function.
    pub const NAME: &'static str = "Objects32Hash";

    /// Creates the function and computes its signature.
    pub fn new() -> Self {
        let identity = identity_with_signature(
            Self::NAME,
            Signedness::Signed,
            ProcessType::Iterative,
            |buffer| combine(0, content_hash(buffer)),
        );
        ObjectsHashIterative { identity }
    }
}

impl Default for ObjectsHashIterative {
    fn default() -> Self {
        Self::new()
    }
}

fn content_hash(buffer: &[u8]) -> i32 {
    buffer.iter().fold(1i32, |acc, &b| {
        acc.wrapping_mul(31).wrapping_add(i32::from(b as i8))
    })
}

fn combine(last: i64, content: i32) -> i64 {
    let folded = (last ^ ((last as u64) >> 32) as i64) as i32;
    let head = 31i32.wrapping_add(folded);
    i64::from(head.wrapping_mul(31).wrapping_add(content))
}

impl HashFunction for ObjectsHashIterative {
    fn identity(&self) -> &HashFunctionIdentity {
        &self.identity
    }

    fn apply(&self, buffer: &[u8], seed: u32) -> i64 {
        let content = content_hash(buffer);
        let mut last = 0i64;
        let mut result = combine(last, content);
        for _ in 0..seed {
            last = last.wrapping_add(result);
            result = combine(last, content);
        }
        result
    }

    fn walk(&self, buffer: &[u8], count: u32, consumer: &mut dyn FnMut(i64) -> bool) -> bool {
        let content = content_hash(buffer);
        let mut last = 0i64;
        for _ in 0..count {
            let result = combine(last, content);
            if !consumer(result) {
                return false;
            }
            last = last.wrapping_add(result);
        }
        true
    }
}
