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


use std::collections::BTreeSet;

use crate::bloom::Hasher;
use crate::bloom::IndexProducer;
use crate::bloom::Shape;
use crate::error::Error;
use crate::hash::check_are_equal;
use crate::hash::HashFunctionIdentity;

/// A hasher holding pre-computed indices for one specific shape.
///
/// The indices are validated, deduplicated and sorted ascending when the hasher is built. They
/// can only be produced for a shape equal to the one they were computed for. This makes a
/// static hasher a cache for the result of a more expensive hasher.
///
/// # Examples
///
/// ```
/// # use bloomhash::bloom::Hasher;
/// # use bloomhash::bloom::IndexProducer;
/// # use bloomhash::bloom::Shape;
/// # use bloomhash::bloom::StaticHasher;
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Md5Cyclic;
/// let shape = Shape::new(Md5Cyclic::new().identity().clone(), 3, 72, 17).unwrap();
/// let hasher = StaticHasher::from_indices([1, 3, 5, 7, 9, 3, 5, 1], &shape).unwrap();
/// assert_eq!(hasher.size(), 5);
/// assert_eq!(hasher.indices(&shape).unwrap().as_index_array(), vec![1, 3, 5, 7, 9]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHasher {
    shape: Shape,
    values: Vec<u32>,
}

impl StaticHasher {
    /// Creates a hasher from indices computed for `shape`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if any index is not less than the number of bits of
    /// `shape`.
    pub fn from_indices(
        indices: impl IntoIterator<Item = u32>,
        shape: &Shape,
    ) -> Result<Self, Error> {
        let mut values = BTreeSet::new();
        for index in indices {
            if index >= shape.number_of_bits() {
                return Err(Error::invalid_argument(format!(
                    "bit index ({index}) is too big for {shape}"
                )));
            }
            values.insert(index);
        }
        Ok(StaticHasher {
            shape: shape.clone(),
            values: values.into_iter().collect(),
        })
    }

    /// Materializes the indices `hasher` produces for `shape`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `hasher` uses a hash function other than the one
    /// `shape` was sized for, or cannot produce indices for `shape`.
    pub fn from_hasher<H: Hasher + ?Sized>(hasher: &H, shape: &Shape) -> Result<Self, Error> {
        if let Some(identity) = hasher.hash_function_identity() {
            check_are_equal(shape.hash_function_identity(), identity)?;
        }
        let indices = hasher.indices(shape)?.as_index_array();
        Self::from_indices(indices, shape)
    }

    /// Returns the shape the indices were computed for.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the sorted unique indices.
    pub fn values(&self) -> &[u32] {
        &self.values
    }
}

impl Hasher for StaticHasher {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        Some(self.shape.hash_function_identity())
    }

    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        if &self.shape != shape {
            return Err(Error::shape_mismatch(&self.shape, shape));
        }
        Ok(Box::new(self.values.as_slice()))
    }

    fn unique_indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        // already unique
        self.indices(shape)
    }

    fn size(&self) -> usize {
        self.values.len()
    }
}
