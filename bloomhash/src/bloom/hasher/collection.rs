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
use crate::hash::HashFunctionIdentity;

/// An ordered collection of hashers, each child keeping its own item count.
///
/// The indices of the collection are the indices of every child, in the order the children were
/// added. All child producers are created before any index is produced, so a child that rejects
/// the shape fails the whole call without emitting anything.
///
/// # Examples
///
/// ```
/// # use bloomhash::bloom::Hasher;
/// # use bloomhash::bloom::HasherCollection;
/// # use bloomhash::bloom::IndexProducer;
/// # use bloomhash::bloom::NullHasher;
/// # use bloomhash::bloom::Shape;
/// # use bloomhash::bloom::SimpleHasher;
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Md5Cyclic;
/// let shape = Shape::new(Md5Cyclic::new().identity().clone(), 2, 72, 2).unwrap();
/// let mut collection = HasherCollection::new();
/// collection.add(SimpleHasher::new(1, 1));
/// collection.add(NullHasher);
/// collection.add(SimpleHasher::new(10, 1));
///
/// assert_eq!(collection.size(), 2);
/// assert_eq!(collection.indices(&shape).unwrap().as_index_array(), vec![1, 2, 10, 11]);
/// ```
#[derive(Debug, Default)]
pub struct HasherCollection {
    hashers: Vec<Box<dyn Hasher>>,
}

impl HasherCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding `hashers` in iteration order.
    pub fn from_hashers(hashers: impl IntoIterator<Item = Box<dyn Hasher>>) -> Self {
        HasherCollection {
            hashers: hashers.into_iter().collect(),
        }
    }

    /// Appends a hasher.
    pub fn add(&mut self, hasher: impl Hasher + 'static) {
        self.hashers.push(Box::new(hasher));
    }

    /// Appends every hasher of `hashers`.
    pub fn add_all(&mut self, hashers: impl IntoIterator<Item = Box<dyn Hasher>>) {
        self.hashers.extend(hashers);
    }

    /// Returns the child hashers in insertion order.
    pub fn hashers(&self) -> &[Box<dyn Hasher>] {
        &self.hashers
    }

    /// Returns a producer of the indices of all children with repeats removed across children.
    ///
    /// [`unique_indices`](Hasher::unique_indices) only removes repeats within each child.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if any child cannot produce indices for `shape`.
    pub fn absolute_unique_indices<'a>(
        &'a self,
        shape: &Shape,
    ) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        Ok(Box::new(self.indices(shape)?.unique()))
    }
}

impl Hasher for HasherCollection {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        None
    }

    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        ChainedIndexProducer::try_new(&self.hashers, |hasher| hasher.indices(shape))
    }

    fn unique_indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        ChainedIndexProducer::try_new(&self.hashers, |hasher| hasher.unique_indices(shape))
    }

    fn size(&self) -> usize {
        self.hashers.iter().map(|hasher| hasher.size()).sum()
    }
}

/// A collection of hashers that together describe a single item.
///
/// The first hasher added is the primary description of the item; later hashers contribute
/// more indices to that same item. Repeats are removed across all children by
/// [`unique_indices`](Hasher::unique_indices).
#[derive(Debug, Default)]
pub struct SingleItemHasherCollection {
    inner: HasherCollection,
}

impl SingleItemHasherCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding `hashers` in iteration order.
    pub fn from_hashers(hashers: impl IntoIterator<Item = Box<dyn Hasher>>) -> Self {
        SingleItemHasherCollection {
            inner: HasherCollection::from_hashers(hashers),
        }
    }

    /// Adds a hasher to the item.
    pub fn add(&mut self, hasher: impl Hasher + 'static) {
        self.inner.add(hasher);
    }

    /// Adds every hasher of `hashers` to the item.
    pub fn add_all(&mut self, hashers: impl IntoIterator<Item = Box<dyn Hasher>>) {
        self.inner.add_all(hashers);
    }

    /// Returns the first hasher added, if any.
    pub fn primary(&self) -> Option<&dyn Hasher> {
        self.inner.hashers.first().map(|hasher| hasher.as_ref())
    }

    /// Returns the child hashers in insertion order.
    pub fn hashers(&self) -> &[Box<dyn Hasher>] {
        self.inner.hashers()
    }
}

impl Hasher for SingleItemHasherCollection {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        None
    }

    fn indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        self.inner.indices(shape)
    }

    fn unique_indices<'a>(&'a self, shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        self.inner.absolute_unique_indices(shape)
    }

    fn size(&self) -> usize {
        usize::from(self.inner.hashers.iter().any(|hasher| !hasher.is_empty()))
    }
}

/// Produces the indices of several producers one after another.
#[derive(Debug)]
struct ChainedIndexProducer<'a> {
    producers: Vec<Box<dyn IndexProducer + 'a>>,
}

impl<'a> ChainedIndexProducer<'a> {
    fn try_new(
        hashers: &'a [Box<dyn Hasher>],
        mut indices: impl FnMut(&'a dyn Hasher) -> Result<Box<dyn IndexProducer + 'a>, Error>,
    ) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        let producers = hashers
            .iter()
            .map(|hasher| indices(hasher.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Box::new(ChainedIndexProducer { producers }))
    }
}

impl IndexProducer for ChainedIndexProducer<'_> {
    fn for_each_index(&self, consumer: &mut dyn FnMut(u32) -> bool) -> bool {
        self.producers
            .iter()
            .all(|producer| producer.for_each_index(consumer))
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

    fn shape(m: u32, k: u32) -> Shape {
        Shape::new(Md5Cyclic::new().identity().clone(), 3, m, k).unwrap()
    }

    #[test]
    fn test_concatenates_in_order() {
        let mut collection = HasherCollection::new();
        collection.add(SimpleHasher::new(1, 1));
        collection.add(SimpleHasher::new(1, 1));
        collection.add(SimpleHasher::new(40, 2));
        assert_eq!(collection.size(), 3);
        assert_eq!(
            collection.indices(&shape(72, 3)).unwrap().as_index_array(),
            vec![1, 2, 3, 1, 2, 3, 40, 42, 44]
        );
    }

    #[test]
    fn test_unique_per_child_and_absolute() {
        let mut collection = HasherCollection::new();
        collection.add(SimpleHasher::new(1, 36));
        collection.add(SimpleHasher::new(1, 36));
        let shape = shape(72, 4);

        assert_eq!(
            collection.indices(&shape).unwrap().as_index_array(),
            vec![1, 37, 1, 37, 1, 37, 1, 37]
        );
        assert_eq!(
            collection.unique_indices(&shape).unwrap().as_index_array(),
            vec![1, 37, 1, 37]
        );
        assert_eq!(
            collection
                .absolute_unique_indices(&shape)
                .unwrap()
                .as_index_array(),
            vec![1, 37]
        );
    }

    #[test]
    fn test_size_sums_children() {
        let function: Arc<dyn HashFunction> = Arc::new(Md5Cyclic::new());
        let dynamic = DynamicHasherBuilder::new(function)
            .with_bytes("a")
            .with_bytes("b")
            .build();

        let mut collection = HasherCollection::new();
        assert!(collection.is_empty());
        collection.add(NullHasher);
        assert_eq!(collection.size(), 0);
        collection.add(dynamic);
        collection.add(SimpleHasher::new(0, 1));
        assert_eq!(collection.size(), 3);
        assert_eq!(collection.hashers().len(), 3);
    }

    #[test]
    fn test_mismatch_fails_whole_collection() {
        let function: Arc<dyn HashFunction> = Arc::new(Murmur128x64Cyclic::new());
        let mismatched = DynamicHasherBuilder::new(function)
            .with_bytes("Hello")
            .build();

        let collection = HasherCollection::from_hashers([
            Box::new(SimpleHasher::new(1, 1)) as Box<dyn Hasher>,
            Box::new(mismatched),
        ]);
        let err = collection.indices(&shape(72, 3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(collection.unique_indices(&shape(72, 3)).is_err());
    }

    #[test]
    fn test_nested_collection() {
        let inner = HasherCollection::from_hashers([
            Box::new(SimpleHasher::new(1, 1)) as Box<dyn Hasher>,
            Box::new(SimpleHasher::new(5, 1)),
        ]);
        let mut outer = HasherCollection::new();
        outer.add(inner);
        outer.add_all([Box::new(SimpleHasher::new(9, 1)) as Box<dyn Hasher>]);
        assert_eq!(outer.size(), 3);
        assert_eq!(
            outer.indices(&shape(72, 2)).unwrap().as_index_array(),
            vec![1, 2, 5, 6, 9, 10]
        );
    }

    #[test]
    fn test_single_item_collection() {
        let shape = shape(72, 2);
        let mut item = SingleItemHasherCollection::new();
        assert!(item.primary().is_none());
        assert_eq!(item.size(), 0);

        item.add(NullHasher);
        assert_eq!(item.size(), 0);

        item.add(StaticHasher::from_indices([3, 7], &shape).unwrap());
        item.add(SimpleHasher::new(7, 1));
        assert_eq!(item.size(), 1);
        assert_eq!(item.hashers().len(), 3);
        assert_that!(item.primary().map(|hasher| hasher.size()), some(eq(0)));

        assert_eq!(
            item.indices(&shape).unwrap().as_index_array(),
            vec![3, 7, 7, 8]
        );
        assert_eq!(
            item.unique_indices(&shape).unwrap().as_index_array(),
            vec![3, 7, 8]
        );
    }
}
