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


//! Bloom filter shapes, hashers and index producers.
//!
//! A [`Shape`] fixes the geometry of a filter: the hash function it was sized for, the number
//! of bits `m` and the number of hash functions `k`. A [`Hasher`] describes one or more items
//! and produces, for a given shape, `k` bit indices in `[0, m)` per item through an
//! [`IndexProducer`]. Hashers check that they were built with the shape's hash function before
//! producing anything.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bloomhash::bloom::DynamicHasherBuilder;
//! use bloomhash::bloom::Hasher;
//! use bloomhash::bloom::HasherBuilder;
//! use bloomhash::bloom::IndexProducer;
//! use bloomhash::bloom::Shape;
//! use bloomhash::hash::HashFunction;
//! use bloomhash::hash::Md5Cyclic;
//!
//! let function = Arc::new(Md5Cyclic::new());
//!
//! // 5 items in 24 bits gives 3 hash functions
//! let shape = Shape::with_bits(function.identity().clone(), 5, 24).unwrap();
//! assert_eq!(shape.number_of_hash_functions(), 3);
//!
//! let hasher = DynamicHasherBuilder::new(function)
//!     .with_bytes("apple")
//!     .with_bytes("banana")
//!     .build();
//! let indices = hasher.indices(&shape).unwrap().as_index_array();
//! assert_eq!(indices.len(), 6);
//! assert!(indices.iter().all(|&index| index < 24));
//! ```
//!
//! # Shapes
//!
//! A shape can be given directly or derived from some of its parameters:
//!
//! | Constructor | Given | Derived |
//! |---|---|---|
//! | [`Shape::new`] | n, m, k | p |
//! | [`Shape::with_bits`] | n, m | k, p |
//! | [`Shape::with_probability`] | n, p | m, k |
//! | [`Shape::with_probability_bits_hashes`] | p, m, k | n |
//!
//! The false positive probability is `p = (1 - exp(-k * n / m))^k`.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Kirsch and Mitzenmacher (2008). "Less Hashing, Same Performance: Building a Better Bloom
//!   Filter"

mod filter;
mod hasher;
mod index_producer;
mod shape;

pub use self::filter::SimpleBloomFilter;
pub use self::hasher::CachingHasher;
pub use self::hasher::CachingHasherBuilder;
pub use self::hasher::Charset;
pub use self::hasher::DynamicHasher;
pub use self::hasher::DynamicHasherBuilder;
pub use self::hasher::Hasher;
pub use self::hasher::HasherBuilder;
pub use self::hasher::HasherCollection;
pub use self::hasher::NullHasher;
pub use self::hasher::SimpleHasher;
pub use self::hasher::SingleItemHasherCollection;
pub use self::hasher::StaticHasher;
pub use self::index_producer::BufferIndexProducer;
pub use self::index_producer::EmptyIndexProducer;
pub use self::index_producer::IndexCursor;
pub use self::index_producer::IndexProducer;
pub use self::index_producer::UniqueIndexProducer;
pub use self::shape::Shape;
pub use self::shape::MAX_NUM_BITS;
pub use self::shape::MAX_NUM_HASH_FUNCTIONS;
pub use self::shape::MAX_NUM_ITEMS;
