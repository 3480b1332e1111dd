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


//! Hashers turn items into bit indices for a [`Shape`].
//!
//! | Hasher | Stores | Items |
//! |---|---|---|
//! | [`SimpleHasher`] | two seeds | 1 |
//! | [`DynamicHasher`] | byte buffers and the hash function | one per buffer |
//! | [`CachingHasher`] | the cyclic pair of each buffer | one per buffer |
//! | [`StaticHasher`] | sorted unique indices for one shape | one per index |
//! | [`HasherCollection`] | child hashers | sum of the children |
//! | [`SingleItemHasherCollection`] | child hashers | at most 1 |
//! | [`NullHasher`] | nothing | 0 |

mod caching;
mod collection;
mod dynamic;
mod encoding;
mod null;
mod simple;
mod static_hasher;

pub use self::caching::CachingHasher;
pub use self::caching::CachingHasherBuilder;
pub use self::collection::HasherCollection;
pub use self::collection::SingleItemHasherCollection;
pub use self::dynamic::DynamicHasher;
pub use self::dynamic::DynamicHasherBuilder;
pub use self::encoding::Charset;
pub use self::null::NullHasher;
pub use self::simple::SimpleHasher;
pub use self::static_hasher::StaticHasher;

use std::fmt;

use crate::bloom::IndexProducer;
use crate::bloom::Shape;
use crate::error::Error;
use crate::hash::HashFunctionIdentity;

/// One or more items that can be turned into bit indices for a shape.
///
/// Compatibility between the hasher and the shape is checked when [`indices`](Self::indices) is
/// called, before any index is produced.
pub trait Hasher: fmt::Debug {
    /// Returns the identity of the hash function used by this hasher, or `None` if the hasher
    /// does not depend on one.
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity>;

    /// Returns a producer of the indices of every item for `shape`.
    ///
    /// The sequence is not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the hasher cannot produce indices for `shape`.
    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error>;

    /// Returns a producer of the indices for `shape` with repeats removed.
    ///
    /// # Errors
    ///
    /// See [`indices`](Self::indices).
    fn unique_indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        Ok(Box::new(self.indices(shape)?.unique()))
    }

    /// Returns the number of items represented by this hasher.
    fn size(&self) -> usize;

    /// Returns true if this hasher represents no items.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<H: Hasher + ?Sized> Hasher for Box<H> {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        (**self).hash_function_identity()
    }

    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        (**self).indices(shape)
    }

    fn unique_indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        (**self).unique_indices(shape)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// Accumulates items for a hasher.
///
/// Builders are mutated through `&mut self`; share one between threads only behind a lock.
pub trait HasherBuilder {
    /// The hasher produced by [`build`](Self::build).
    type Hasher: Hasher;

    /// Adds an item given as raw bytes.
    fn with_bytes(&mut self, item: impl Into<Vec<u8>>) -> &mut Self;

    /// Adds a string item encoded with `charset`.
    fn with_str(&mut self, item: &str, charset: Charset) -> &mut Self {
        self.with_bytes(charset.encode(item))
    }

    /// Adds a string item as its UTF-16 code units in little-endian order, without any charset
    /// translation.
    fn with_unencoded(&mut self, item: &str) -> &mut Self {
        self.with_bytes(encoding::encode_unencoded(item))
    }

    /// Returns a hasher for the items added so far and resets the builder to empty.
    fn build(&mut self) -> Self::Hasher;
}
