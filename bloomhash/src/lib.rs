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


//! # bloomhash
//!
//! Building blocks for Bloom filters: hash functions with comparable identities, filter shapes,
//! hashers that turn items into bit indices, and the producers that deliver those indices.
//!
//! - [`hash`]: the [`HashFunction`](hash::HashFunction) trait, its
//!   [`HashFunctionIdentity`](hash::HashFunctionIdentity) and the bundled MD5, Murmur3 and
//!   polynomial implementations.
//! - [`bloom`]: [`Shape`](bloom::Shape), the [`Hasher`](bloom::Hasher) family,
//!   [`IndexProducer`](bloom::IndexProducer) and a simple bit-array filter.
//! - [`error`]: the error type returned by every fallible operation.
//!
//! The library emits [`tracing`] events and never installs a subscriber.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;
pub mod hash;

mod common;
