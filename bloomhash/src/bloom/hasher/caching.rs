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


use std::sync::Arc;

use crate::bloom::Hasher;
use crate::bloom::HasherBuilder;
use crate::bloom::IndexProducer;
use crate::bloom::Shape;
use crate::common::floor_mod;
use crate::error::Error;
use crate::hash::check_are_equal;
use crate::hash::walk_cyclic;
use crate::hash::HashFunction;
use crate::hash::HashFunctionIdentity;
use crate::hash::ProcessType;

/// A hasher that stores the `(value(0), increment)` pair of every item instead of its bytes.
///
/// Each item is hashed once, when it is added to the builder, so producing indices never
/// re-hashes. The indices are identical to those of a [`DynamicHasher`](super::DynamicHasher)
/// over the same items with the same function. Only cyclic hash functions can be cached.
#[derive(Debug, Clone)]
pub struct CachingHasher {
    identity: HashFunctionIdentity,
    parts: Vec<(i64, i64)>,
}

impl CachingHasher {
    /// Returns the cached `(value(0), increment)` pairs in insertion order.
    pub fn parts(&self) -> &[(i64, i64)] {
        &self.parts
    }
}

impl Hasher for CachingHasher {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        Some(&self.identity)
    }

    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        check_are_equal(shape.hash_function_identity(), &self.identity)?;
        Ok(Box::new(CachingIndexProducer {
            parts: &self.parts,
            number_of_bits: shape.number_of_bits(),
            number_of_hash_functions: shape.number_of_hash_functions(),
        }))
    }

    fn size(&self) -> usize {
        self.parts.len()
    }
}

#[derive(Debug)]
struct CachingIndexProducer<'a> {
    parts: &'a [(i64, i64)],
    number_of_bits: u32,
    number_of_hash_functions: u32,
}

impl IndexProducer for CachingIndexProducer<'_> {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        let m = self.number_of_bits;
        self.parts.iter().all(|&(base, increment)| {
            walk_cyclic(base, increment, self.number_of_hash_functions, &mut |value| {
                consumer(floor_mod(value, m))
            })
        })
    }
}

/// Accumulates items for a [`CachingHasher`], hashing each as it is added.
#[derive(Debug, Clone)]
pub struct CachingHasherBuilder {
    function: Arc<dyn HashFunction>,
    parts: Vec<(i64, i64)>,
}

impl CachingHasherBuilder {
    /// Creates an empty builder for hashers using `function`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `function` is not cyclic.
    pub fn new(function: Arc<dyn HashFunction>) -> Result<Self, Error> {
        let identity = function.identity();
        if identity.process_type() != ProcessType::Cyclic {
            return Err(Error::invalid_argument(format!(
                "caching requires a cyclic hash function: {}",
                identity.as_common_string()
            )));
        }
        Ok(CachingHasherBuilder {
            function,
            parts: vec![],
        })
    }
}

impl HasherBuilder for CachingHasherBuilder {
    type Hasher = CachingHasher;

    fn with_bytes(&mut self, item: impl Into<Vec<u8>>) -> &mut Self {
        let item = item.into();
        let function = self.function.as_ref();
        // cyclic_parts is always Some for cyclic functions; fall back to the definition
        let parts = function.cyclic_parts(&item).unwrap_or_else(|| {
            let base = function.apply(&item, 0);
            (base, function.apply(&item, 1).wrapping_sub(base))
        });
        self.parts.push(parts);
        self
    }

    fn build(&mut self) -> CachingHasher {
        tracing::trace!(
            function = self.function.identity().name(),
            items = self.parts.len(),
            "built caching hasher"
        );
        CachingHasher {
            identity: self.function.identity().clone(),
            parts: std::mem::take(&mut self.parts),
        }
    }
}
