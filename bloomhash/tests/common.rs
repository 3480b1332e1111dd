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

use bloomhash::hash::HashFunction;
use bloomhash::hash::HashFunctionIdentity;
use bloomhash::hash::Md5Cyclic;
use bloomhash::hash::Murmur128x64Cyclic;
use bloomhash::hash::Murmur32x86Iterative;
use bloomhash::hash::ObjectsHashIterative;
use bloomhash::hash::ProcessType;
use bloomhash::hash::Signedness;

/// Indices of "Hello" hashed with MD5 for a shape with m = 72 and k = 17.
#[allow(dead_code)] // not every test binary uses it
pub const MD5_HELLO_INDICES: [u32; 17] = [
    6, 69, 44, 19, 10, 57, 48, 23, 70, 61, 36, 11, 2, 49, 24, 15, 62,
];

#[allow(dead_code)] // not every test binary uses it
pub fn test_identity() -> HashFunctionIdentity {
    HashFunctionIdentity::new(
        "Test Function",
        "Apache",
        Signedness::Signed,
        ProcessType::Cyclic,
        0,
    )
}

#[allow(dead_code)] // not every test binary uses it
pub fn all_functions() -> Vec<Arc<dyn HashFunction>> {
    vec![
        Arc::new(Md5Cyclic::new()),
        Arc::new(Murmur128x64Cyclic::new()),
        Arc::new(Murmur32x86Iterative::new()),
        Arc::new(ObjectsHashIterative::new()),
    ]
}
