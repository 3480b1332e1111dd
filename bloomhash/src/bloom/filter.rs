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


use crate::bloom::Hasher;
use crate::bloom::IndexProducer;
use crate::bloom::Shape;
use crate::error::Error;

/// A Bloom filter over a [`Shape`], with bits packed in `u64` words.
///
/// Items enter the filter through a [`Hasher`] whose indices are computed for the filter's
/// shape, so a hasher built with a different hash function is rejected instead of silently
/// setting unrelated bits.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use bloomhash::bloom::DynamicHasherBuilder;
/// # use bloomhash::bloom::HasherBuilder;
/// # use bloomhash::bloom::Shape;
/// # use bloomhash::bloom::SimpleBloomFilter;
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Murmur128x64Cyclic;
/// let function = Arc::new(Murmur128x64Cyclic::new());
/// let shape = Shape::with_probability(function.identity().clone(), 1000, 0.01).unwrap();
/// let mut builder = DynamicHasherBuilder::new(function);
///
/// let mut filter = SimpleBloomFilter::new(shape);
/// filter.merge(&builder.with_bytes("apple").build()).unwrap();
///
/// assert!(filter.contains(&builder.with_bytes("apple").build()).unwrap());
/// assert!(!filter.contains(&builder.with_bytes("grape").build()).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleBloomFilter {
    shape: Shape,
    bit_array: Vec<u64>,
}

impl SimpleBloomFilter {
    /// Creates an empty filter for `shape`.
    pub fn new(shape: Shape) -> Self {
        let num_words = shape.number_of_bits().div_ceil(64) as usize;
        SimpleBloomFilter {
            shape,
            bit_array: vec![0; num_words],
        }
    }

    /// Returns the shape of the filter.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Clears every bit.
    pub fn clear(&mut self) {
        self.bit_array.fill(0);
    }

    /// Returns true if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bit_array.iter().all(|&word| word == 0)
    }

    /// Sets the bits of every item of `hasher`.
    ///
    /// Returns true if at least one bit was not set before.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `hasher` cannot produce indices for the shape of
    /// this filter. The filter is left unchanged.
    pub fn merge<H: Hasher + ?Sized>(&mut self, hasher: &H) -> Result<bool, Error> {
        let indices = hasher.indices(&self.shape)?.as_index_array();
        Ok(self.set_bits(&indices))
    }

    /// Sets the bits of an explicit index sequence.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if an index is not less than the number of bits. No
    /// bit is set in that case.
    pub fn merge_indices<P: IndexProducer + ?Sized>(&mut self, producer: &P) -> Result<(), Error> {
        let indices = producer.as_index_array();
        if let Some(&index) = indices
            .iter()
            .find(|&&index| index >= self.shape.number_of_bits())
        {
            return Err(Error::out_of_range("bit index", index)
                .with_context("number_of_bits", self.shape.number_of_bits()));
        }
        self.set_bits(&indices);
        Ok(())
    }

    /// Unions `other` into this filter.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the shapes differ.
    pub fn merge_filter(&mut self, other: &SimpleBloomFilter) -> Result<(), Error> {
        self.check_shape(other)?;
        for (word, other_word) in self.bit_array.iter_mut().zip(&other.bit_array) {
            *word |= *other_word;
        }
        Ok(())
    }

    /// Returns true if every bit of every item of `hasher` is set.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `hasher` cannot produce indices for the shape of
    /// this filter.
    pub fn contains<H: Hasher + ?Sized>(&self, hasher: &H) -> Result<bool, Error> {
        let indices = hasher.indices(&self.shape)?;
        Ok(indices.for_each_index(&mut |index| self.get_bit(index)))
    }

    /// Returns true if every bit set in `other` is also set in this filter.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the shapes differ.
    pub fn contains_filter(&self, other: &SimpleBloomFilter) -> Result<bool, Error> {
        self.check_shape(other)?;
        Ok(self
            .bit_array
            .iter()
            .zip(&other.bit_array)
            .all(|(word, other_word)| word & other_word == *other_word))
    }

    /// Returns the number of set bits.
    pub fn cardinality(&self) -> u64 {
        self.bit_array
            .iter()
            .map(|word| u64::from(word.count_ones()))
            .sum()
    }

    /// Estimates the number of items merged into the filter.
    ///
    /// Uses `-(m / k) * ln(1 - c / m)` where `c` is the [`cardinality`](Self::cardinality).
    /// A saturated filter yields infinity.
    pub fn estimate_n(&self) -> f64 {
        let m = f64::from(self.shape.number_of_bits());
        let k = f64::from(self.shape.number_of_hash_functions());
        let c = self.cardinality() as f64;
        -(m / k) * (1.0 - c / m).ln()
    }

    fn check_shape(&self, other: &SimpleBloomFilter) -> Result<(), Error> {
        if self.shape != other.shape {
            return Err(Error::shape_mismatch(&self.shape, &other.shape));
        }
        Ok(())
    }

    fn get_bit(&self, bit_index: u32) -> bool {
        let word_index = (bit_index >> 6) as usize;
        let mask = 1u64 << (bit_index & 63);
        self.bit_array[word_index] & mask != 0
    }

    fn set_bits(&mut self, indices: &[u32]) -> bool {
        let mut changed = false;
        for &bit_index in indices {
            let word_index = (bit_index >> 6) as usize;
            let mask = 1u64 << (bit_index & 63);
            changed |= self.bit_array[word_index] & mask == 0;
            self.bit_array[word_index] |= mask;
        }
        changed
    }
}

impl IndexProducer for SimpleBloomFilter {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        for (word_index, &word) in self.bit_array.iter().enumerate() {
            let mut remaining = word;
            while remaining != 0 {
                let bit_index = (word_index as u32) * 64 + remaining.trailing_zeros();
                if !consumer(bit_index) {
                    return false;
                }
                // clear lowest set bit
                remaining &= remaining - 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use googletest::prelude::*;

    use super::*;
    use crate::bloom::DynamicHasherBuilder;
    use crate::bloom::HasherBuilder;
    use crate::bloom::NullHasher;
    use crate::bloom::SimpleHasher;
    use crate::bloom::StaticHasher;
    use crate::error::ErrorKind;
    use crate::hash::HashFunction;
    use crate::hash::Md5Cyclic;
    use crate::hash::Murmur128x64Cyclic;

    fn md5_shape(m: u32, k: u32) -> Shape {
        Shape::new(Md5Cyclic::new().identity().clone(), 3, m, k).unwrap()
    }

    #[test]
    fn test_merge_and_contains() {
        let function: Arc<dyn HashFunction> = Arc::new(Md5Cyclic::new());
        let mut builder = DynamicHasherBuilder::new(function);
        let mut filter = SimpleBloomFilter::new(md5_shape(72, 17));
        assert!(filter.is_empty());

        let hello = builder.with_bytes("Hello").build();
        assert!(filter.merge(&hello).unwrap());
        assert!(!filter.merge(&hello).unwrap());
        assert!(!filter.is_empty());
        assert_eq!(filter.cardinality(), 17);
        assert!(filter.contains(&hello).unwrap());
        assert_eq!(
            filter.as_index_array(),
            vec![2, 6, 10, 11, 15, 19, 23, 24, 36, 44, 48, 49, 57, 61, 62, 69, 70]
        );
        assert_that!(filter.estimate_n(), near(1.1407041901422401, 1e-12));

        // the null hasher is trivially contained
        assert!(filter.contains(&NullHasher).unwrap());

        filter.clear();
        assert!(filter.is_empty());
        assert!(!filter.contains(&hello).unwrap());
    }

    #[test]
    fn test_merge_rejects_mismatched_hasher() {
        let function: Arc<dyn HashFunction> = Arc::new(Murmur128x64Cyclic::new());
        let hasher = DynamicHasherBuilder::new(function)
            .with_bytes("Hello")
            .build();
        let mut filter = SimpleBloomFilter::new(md5_shape(72, 17));
        assert_eq!(
            filter.merge(&hasher).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(filter.contains(&hasher).is_err());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_merge_indices() {
        let mut filter = SimpleBloomFilter::new(md5_shape(100, 3));
        filter.merge_indices(&[0u32, 63, 64, 99][..]).unwrap();
        assert_eq!(filter.as_index_array(), vec![0, 63, 64, 99]);

        let err = filter.merge_indices(&vec![1u32, 100]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.context("number_of_bits"), Some("100"));
        assert_eq!(filter.cardinality(), 4);
    }

    #[test]
    fn test_merge_filter_and_contains_filter() {
        let shape = md5_shape(72, 3);
        let mut first = SimpleBloomFilter::new(shape.clone());
        let mut second = SimpleBloomFilter::new(shape.clone());
        first.merge(&SimpleHasher::new(0, 1)).unwrap();
        second.merge(&SimpleHasher::new(10, 1)).unwrap();

        assert!(!first.contains_filter(&second).unwrap());
        first.merge_filter(&second).unwrap();
        assert!(first.contains_filter(&second).unwrap());
        assert_eq!(first.as_index_array(), vec![0, 1, 2, 10, 11, 12]);
        assert_that!(first.estimate_n(), near(2.0882730477511156, 1e-12));

        let other = SimpleBloomFilter::new(md5_shape(72, 4));
        assert!(first.merge_filter(&other).is_err());
        assert!(first.contains_filter(&other).is_err());
    }

    #[test]
    fn test_static_hasher_from_filter() {
        let shape = md5_shape(72, 3);
        let mut filter = SimpleBloomFilter::new(shape.clone());
        filter.merge(&SimpleHasher::new(70, 1)).unwrap();
        let hasher = StaticHasher::from_indices(filter.as_index_array(), &shape).unwrap();
        assert_eq!(hasher.values(), &[0, 70, 71]);
        assert!(filter.contains(&hasher).unwrap());
    }
}
