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


//! SimpleBloomFilter Integration Tests
//!
//! These tests verify the public API behavior of SimpleBloomFilter, focusing on:
//! - Membership without false negatives and with a bounded false positive rate
//! - Cardinality based estimation of the number of items
//! - Union of filters sharing a shape

use std::sync::Arc;

use bloomhash::bloom::DynamicHasherBuilder;
use bloomhash::bloom::HasherBuilder;
use bloomhash::bloom::HasherCollection;
use bloomhash::bloom::IndexProducer;
use bloomhash::bloom::Shape;
use bloomhash::bloom::SimpleBloomFilter;
use bloomhash::hash::HashFunction;
use bloomhash::hash::Murmur128x64Cyclic;
use googletest::assert_that;
use googletest::prelude::le;
use googletest::prelude::near;

const NUM_ITEMS: u32 = 1000;
const TARGET_FPP: f64 = 0.01;

fn filter_with_items(
    builder: &mut DynamicHasherBuilder,
    shape: &Shape,
    items: std::ops::Range<u32>,
) -> SimpleBloomFilter {
    let mut filter = SimpleBloomFilter::new(shape.clone());
    for item in items {
        filter
            .merge(&builder.with_bytes(item.to_le_bytes()).build())
            .unwrap();
    }
    filter
}

#[test]
fn test_membership_and_estimate() {
    let function: Arc<dyn HashFunction> = Arc::new(Murmur128x64Cyclic::new());
    let shape =
        Shape::with_probability(function.identity().clone(), NUM_ITEMS, TARGET_FPP).unwrap();
    let mut builder = DynamicHasherBuilder::new(function);
    let filter = filter_with_items(&mut builder, &shape, 0..NUM_ITEMS);

    for item in 0..NUM_ITEMS {
        let hasher = builder.with_bytes(item.to_le_bytes()).build();
        assert!(filter.contains(&hasher).unwrap(), "false negative for {item}");
    }

    let false_positives = (NUM_ITEMS..NUM_ITEMS + 10_000)
        .filter(|item| {
            let hasher = builder.with_bytes(item.to_le_bytes()).build();
            filter.contains(&hasher).unwrap()
        })
        .count();
    assert_that!(false_positives as f64 / 10_000.0, le(TARGET_FPP * 3.0));

    assert_that!(
        filter.estimate_n(),
        near(f64::from(NUM_ITEMS), 0.1 * f64::from(NUM_ITEMS))
    );
}

#[test]
fn test_union() {
    let function: Arc<dyn HashFunction> = Arc::new(Murmur128x64Cyclic::new());
    let shape =
        Shape::with_probability(function.identity().clone(), NUM_ITEMS, TARGET_FPP).unwrap();
    let mut builder = DynamicHasherBuilder::new(function);

    let mut first = filter_with_items(&mut builder, &shape, 0..500);
    let second = filter_with_items(&mut builder, &shape, 400..NUM_ITEMS);
    let all = filter_with_items(&mut builder, &shape, 0..NUM_ITEMS);

    first.merge_filter(&second).unwrap();
    assert_eq!(first, all);
    assert!(all.contains_filter(&second).unwrap());
    assert_eq!(first.as_index_array(), all.as_index_array());
}

#[test]
fn test_merge_collection() {
    let function: Arc<dyn HashFunction> = Arc::new(Murmur128x64Cyclic::new());
    let shape = Shape::with_probability(function.identity().clone(), 10, TARGET_FPP).unwrap();
    let mut builder = DynamicHasherBuilder::new(function);

    let mut collection = HasherCollection::new();
    collection.add(builder.with_bytes("apple").build());
    collection.add(builder.with_bytes("banana").build());

    let mut filter = SimpleBloomFilter::new(shape);
    assert!(filter.merge(&collection).unwrap());
    assert!(filter.contains(&builder.with_bytes("apple").build()).unwrap());
    assert!(filter.contains(&builder.with_bytes("banana").build()).unwrap());
    assert!(filter.contains(&collection).unwrap());
}
