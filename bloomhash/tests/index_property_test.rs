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


//! Property tests for index production across hashers and hash functions.

mod common;

use std::sync::Arc;

use bloomhash::bloom::CachingHasherBuilder;
use bloomhash::bloom::DynamicHasherBuilder;
use bloomhash::bloom::Hasher;
use bloomhash::bloom::HasherBuilder;
use bloomhash::bloom::IndexProducer;
use bloomhash::bloom::Shape;
use bloomhash::bloom::SimpleBloomFilter;
use bloomhash::bloom::SimpleHasher;
use bloomhash::bloom::StaticHasher;
use bloomhash::hash::HashFunction;
use bloomhash::hash::Md5Cyclic;
use bloomhash::hash::Murmur128x64Cyclic;
use common::all_functions;
use common::test_identity;
use proptest::collection;
use proptest::prelude::*;

fn items() -> impl Strategy<Value = Vec<Vec<u8>>> {
    collection::vec(collection::vec(any::<u8>(), 0..64), 0..8)
}

proptest! {
    #[test]
    fn test_dynamic_indices_in_range(
        items in items(),
        m in 64u32..10_000,
        k in 1u32..=64,
    ) {
        for function in all_functions() {
            let shape = Shape::new(function.identity().clone(), 1, m, k).unwrap();
            let mut builder = DynamicHasherBuilder::new(function);
            for item in &items {
                builder.with_bytes(item.clone());
            }
            let hasher = builder.build();
            let indices = hasher.indices(&shape).unwrap().as_index_array();
            prop_assert_eq!(indices.len(), items.len() * k as usize);
            prop_assert!(indices.iter().all(|&index| index < m));
        }
    }

    #[test]
    fn test_simple_hasher_floor_mod(
        initial in any::<i64>(),
        increment in any::<i64>(),
        m in 64u32..=i32::MAX as u32,
        k in 1u32..=8,
    ) {
        let shape = Shape::new(test_identity(), 1, m, k).unwrap();
        let indices = SimpleHasher::new(initial, increment)
            .indices(&shape)
            .unwrap()
            .as_index_array();
        prop_assert_eq!(indices.len(), k as usize);
        for (i, index) in indices.into_iter().enumerate() {
            let value = initial.wrapping_add((i as i64).wrapping_mul(increment));
            prop_assert_eq!(i64::from(index), value.rem_euclid(i64::from(m)));
        }
    }

    #[test]
    fn test_static_round_trip(
        items in items(),
        m in 64u32..2_000,
        k in 1u32..=32,
    ) {
        let function: Arc<dyn HashFunction> = Arc::new(Md5Cyclic::new());
        let shape = Shape::new(function.identity().clone(), 1, m, k).unwrap();
        let mut builder = DynamicHasherBuilder::new(function);
        for item in items {
            builder.with_bytes(item);
        }
        let dynamic = builder.build();

        let mut expected = dynamic.indices(&shape).unwrap().as_index_array();
        expected.sort_unstable();
        expected.dedup();

        let hasher = StaticHasher::from_hasher(&dynamic, &shape).unwrap();
        prop_assert_eq!(hasher.size(), expected.len());
        prop_assert_eq!(hasher.indices(&shape).unwrap().as_index_array(), expected);
    }

    #[test]
    fn test_caching_matches_dynamic(
        items in items(),
        m in 64u32..10_000,
        k in 1u32..=64,
    ) {
        let functions: [Arc<dyn HashFunction>; 2] =
            [Arc::new(Md5Cyclic::new()), Arc::new(Murmur128x64Cyclic::new())];
        for function in functions {
            let shape = Shape::new(function.identity().clone(), 1, m, k).unwrap();
            let mut caching = CachingHasherBuilder::new(function.clone()).unwrap();
            let mut dynamic = DynamicHasherBuilder::new(function);
            for item in &items {
                caching.with_bytes(item.clone());
                dynamic.with_bytes(item.clone());
            }
            prop_assert_eq!(
                caching.build().indices(&shape).unwrap().as_index_array(),
                dynamic.build().indices(&shape).unwrap().as_index_array()
            );
        }
    }

    #[test]
    fn test_filter_has_no_false_negatives(
        items in items(),
        m in 64u32..10_000,
        k in 1u32..=16,
    ) {
        let function: Arc<dyn HashFunction> = Arc::new(Murmur128x64Cyclic::new());
        let shape = Shape::new(function.identity().clone(), 1, m, k).unwrap();
        let mut builder = DynamicHasherBuilder::new(function);
        let mut filter = SimpleBloomFilter::new(shape);
        for item in &items {
            filter.merge(&builder.with_bytes(item.clone()).build()).unwrap();
        }
        for item in &items {
            prop_assert!(filter.contains(&builder.with_bytes(item.clone()).build()).unwrap());
        }
        prop_assert!(filter.cardinality() <= (items.len() * k as usize) as u64);
    }
}
