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


use crate::bloom::EmptyIndexProducer;
use crate::bloom::Hasher;
use crate::bloom::IndexProducer;
use crate::bloom::Shape;
use crate::error::Error;
use crate::hash::HashFunctionIdentity;

/// A hasher that represents no items and produces no indices for any shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullHasher;

impl Hasher for NullHasher {
    fn hash_function_identity(&self) -> Option<&HashFunctionIdentity> {
        None
    }

    fn indices<'a>(&'a self, _shape: &Shape) -> Result<Box<dyn IndexProducer + 'a>, Error> {
        Ok(Box::new(EmptyIndexProducer))
    }

    fn size(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashFunction;
    use crate::hash::Md5Cyclic;
    use crate::hash::Murmur32x86Iterative;

    #[test]
    fn test_null_hasher() {
        assert_eq!(std::mem::size_of::<NullHasher>(), 0);
        assert_eq!(NullHasher.size(), 0);
        assert!(NullHasher.is_empty());
        assert!(NullHasher.hash_function_identity().is_none());

        for identity in [
            Md5Cyclic::new().identity().clone(),
            Murmur32x86Iterative::new().identity().clone(),
        ] {
            let shape = Shape::new(identity, 1, 72, 17).unwrap();
            assert!(NullHasher.indices(&shape).unwrap().as_index_array().is_empty());
            assert!(NullHasher
                .unique_indices(&shape)
                .unwrap()
                .as_index_array()
                .is_empty());
        }
    }
}
