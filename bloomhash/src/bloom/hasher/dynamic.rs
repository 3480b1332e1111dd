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
use crate::hash::HashFunction;
use crate::hash::HashFunctionIdentity;

/// A hasher that keeps the raw bytes of every item and hashes them on demand.
///
/// For each buffer, in insertion order, the hash function is walked with the seeds `0..k` and
/// every value is reduced into `[0, m)` with a floor modulus. Indices are neither sorted nor
/// deduplicated. The shape must have been sized for the same hash function.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use bloomhash::bloom::Charset;
/// # use bloomhash::bloom::DynamicHasherBuilder;
/// # use bloomhash::bloom::Hasher;
/// # use bloomhash::bloom::HasherBuilder;
/// # use bloomhash::bloom::IndexProducer;
/// # use bloomhash::bloom::Shape;
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Md5Cyclic;
/// let function = Arc::new(Md5Cyclic::new());
/// let shape = Shape::new(function.identity().clone(), 1, 72, 17).unwrap();
///
/// let hasher = DynamicHasherBuilder::new(function)
///     .with_str("Hello", Charset::Utf8)
///     .build();
/// let indices = hasher.indices(&shape).unwrap().as_index_array();
/// assert_eq!(
///     indices,
///     vec![6, 69, 44, 19, 10, 57, 48, 23, 70, 61, 36, 11, 2, 49, 24, 15, 62]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DynamicHasher {
    function: Arc<dyn HashFunction>,
    buffers: Vec<Vec<u8>>,
}

impl DynamicHasher {
    /// Creates a hasher over `buffers`.
    pub fn new(function: Arc<dyn HashFunction>, buffers: Vec<Vec<u8>>) -> Self {
        tracing::trace!(
            function = function.identity().name(),
            items = buffers.len(),
            "built dynamic hasher"
        );
        DynamicHasher { function, buffers }
    }

    /// Returns the hash function applied to the buffers.
    pub fn hash_function(&self) -> &Arc<dyn HashFunction> {
        &self.function
    }
}

impl Hasher for DynamicHasher {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        Some(self.function.identity())
    }

    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        check_are_equal(shape.hash_function_identity(), self.function.identity())?;
        Ok(Box::new(DynamicIndexProducer {
            function: self.function.as_ref(),
            buffers: &self.buffers,
            number_of_bits: shape.number_of_bits(),
            number_of_hash_functions: shape.number_of_hash_functions(),
        }))
    }

    fn size(&self) -> usize {
        self.buffers.len()
    }
}

#[derive(Debug)]
struct DynamicIndexProducer<'a> {
    function: &'a dyn HashFunction,
    buffers: &'a [Vec<u8>],
    number_of_bits: u32,
    number_of_hash_functions: u32,
}

impl IndexProducer for DynamicIndexProducer<'_> {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        let m = self.number_of_bits;
        self.buffers.iter().all(|buffer| {
            self.function
                .walk(buffer, self.number_of_hash_functions, &mut |value| {
                    consumer(floor_mod(value, m))
                })
        })
    }
}

/// Accumulates byte buffers for a [`DynamicHasher`].
///
/// Buffers are stored as given. [`build`](HasherBuilder::build) moves them into the hasher and
/// leaves the builder empty, ready for the next set of items.
#[derive(Debug, Clone)]
pub struct DynamicHasherBuilder {
    function: Arc<dyn HashFunction>,
    buffers: Vec<Vec<u8>>,
}

impl DynamicHasherBuilder {
    /// Creates an empty builder for hashers using `function`.
    pub fn new(function: Arc<dyn HashFunction>) -> Self {
        DynamicHasherBuilder {
            function,
            buffers: vec![],
        }
    }
}

impl HasherBuilder for DynamicHasherBuilder {
    type Hasher = DynamicHasher;

    fn with_bytes(&mut self, item: impl Into<Vec<u8>>) -> &mut Self {
        self.buffers.push(item.into());
        self
    }

    fn build(&mut self) -> DynamicHasher {
        DynamicHasher::new(self.function.clone(), std::mem::take(&mut self.buffers))
    }
}
