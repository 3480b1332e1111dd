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


use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use crate::error::Error;
use crate::hash::HashFunction;

/// Whether the raw output of a hash function is treated as signed or unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signedness {
    /// The output is a two's complement signed value.
    Signed,
    /// The output is an unsigned value.
    Unsigned,
}

impl Signedness {
    /// Returns the upper-case name used in identity strings and signatures.
    pub const fn as_str(self) -> &'static str {
        match self {
            Signedness::Signed => "SIGNED",
            Signedness::Unsigned => "UNSIGNED",
        }
    }
}

impl fmt::Display for Signedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a hash function produces the values for consecutive seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessType {
    /// One computation yields `value(0)` and an increment; `value(s) = value(0) + s * increment`.
    Cyclic,
    /// Every seed is an independent computation.
    Iterative,
}

impl ProcessType {
    /// Returns the upper-case name used in identity strings and signatures.
    pub const fn as_str(self) -> &'static str {
        match self {
            ProcessType::Cyclic => "CYCLIC",
            ProcessType::Iterative => "ITERATIVE",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes a hash function implementation.
///
/// Two identities are "commonly" equal when their names match ignoring case and their process
/// type and signedness are the same. Comparing "deeply" additionally requires the providers to
/// match ignoring case. The signature is informational and takes part in neither comparison.
///
/// `==` and [`Hash`](std::hash::Hash) are exact: every field, including the signature, must
/// match with case. Shapes and hashers never use them; they compare with
/// [`common_eq`](Self::common_eq).
///
/// # Examples
///
/// ```
/// # use bloomhash::hash::HashFunctionIdentity;
/// # use bloomhash::hash::ProcessType;
/// # use bloomhash::hash::Signedness;
/// let a = HashFunctionIdentity::new("md5", "left", Signedness::Signed, ProcessType::Cyclic, 1);
/// let b = HashFunctionIdentity::new("MD5", "right", Signedness::Signed, ProcessType::Cyclic, 2);
/// assert!(a.common_eq(&b));
/// assert!(!a.deep_eq(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashFunctionIdentity {
    name: String,
    provider: String,
    signedness: Signedness,
    process_type: ProcessType,
    signature: i64,
}

impl HashFunctionIdentity {
    /// Creates an identity from its parts.
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        signedness: Signedness,
        process_type: ProcessType,
        signature: i64,
    ) -> Self {
        HashFunctionIdentity {
            name: name.into(),
            provider: provider.into(),
            signedness,
            process_type,
            signature,
        }
    }

    /// Returns the name of the hash function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the provider of the hash function implementation.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the signedness of the hash function output.
    pub fn signedness(&self) -> Signedness {
        self.signedness
    }

    /// Returns the process type of the hash function.
    pub fn process_type(&self) -> ProcessType {
        self.process_type
    }

    /// Returns the signature of the hash function.
    pub fn signature(&self) -> i64 {
        self.signature
    }

    /// Formats the fields taking part in common equality, e.g. `MD5-SIGNED-CYCLIC`.
    pub fn as_common_string(&self) -> String {
        format!("{}-{}-{}", self.name, self.signedness, self.process_type)
    }

    /// Orders by name ignoring case, then process type, then signedness.
    pub fn common_cmp(&self, other: &HashFunctionIdentity) -> Ordering {
        cmp_ignore_case(&self.name, &other.name)
            .then(self.process_type.cmp(&other.process_type))
            .then(self.signedness.cmp(&other.signedness))
    }

    /// Orders as [`common_cmp`](Self::common_cmp), then by provider ignoring case.
    pub fn deep_cmp(&self, other: &HashFunctionIdentity) -> Ordering {
        self.common_cmp(other)
            .then_with(|| cmp_ignore_case(&self.provider, &other.provider))
    }

    /// Returns true if the identities are equal under the common comparator.
    pub fn common_eq(&self, other: &HashFunctionIdentity) -> bool {
        self.common_cmp(other) == Ordering::Equal
    }

    /// Returns true if the identities are equal under the deep comparator.
    pub fn deep_eq(&self, other: &HashFunctionIdentity) -> bool {
        self.deep_cmp(other) == Ordering::Equal
    }

    /// Feeds the commonly-compared fields into `state`.
    ///
    /// Identities that are [`common_eq`](Self::common_eq) hash identically.
    pub fn common_hash<H: Hasher>(&self, state: &mut H) {
        for c in self.name.chars().flat_map(char::to_lowercase) {
            c.hash(state);
        }
        self.signedness.hash(state);
        self.process_type.hash(state);
    }
}

impl<F: HashFunction + ?Sized> From<&F> for HashFunctionIdentity {
    fn from(function: &F) -> Self {
        function.identity().clone()
    }
}

impl fmt::Display for HashFunctionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_common_string(), self.provider)
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let a = a.chars().flat_map(char::to_lowercase);
    let b = b.chars().flat_map(char::to_lowercase);
    a.cmp(b)
}

/// Comparator for sorting identities with the common ordering.
///
/// # Examples
///
/// ```
/// # use bloomhash::hash::common_comparator;
/// # use bloomhash::hash::HashFunctionIdentity;
/// # use bloomhash::hash::ProcessType;
/// # use bloomhash::hash::Signedness;
/// let mut ids = vec![
///     HashFunctionIdentity::new("b", "p", Signedness::Signed, ProcessType::Cyclic, 0),
///     HashFunctionIdentity::new("A", "p", Signedness::Signed, ProcessType::Cyclic, 0),
/// ];
/// ids.sort_by(common_comparator);
/// assert_eq!(ids[0].name(), "A");
/// ```
pub fn common_comparator(a: &HashFunctionIdentity, b: &HashFunctionIdentity) -> Ordering {
    a.common_cmp(b)
}

/// Comparator for sorting identities with the deep ordering.
pub fn deep_comparator(a: &HashFunctionIdentity, b: &HashFunctionIdentity) -> Ordering {
    a.deep_cmp(b)
}

/// Returns true if the two identities are commonly equal.
pub fn are_equal(a: &HashFunctionIdentity, b: &HashFunctionIdentity) -> bool {
    a.common_eq(b)
}

/// Checks that the two identities are commonly equal.
///
/// # Errors
///
/// Returns an `InvalidArgument` error naming both identities if they differ.
pub fn check_are_equal(
    expected: &HashFunctionIdentity,
    actual: &HashFunctionIdentity,
) -> Result<(), Error> {
    if are_equal(expected, actual) {
        Ok(())
    } else {
        Err(Error::hash_functions_not_equal(
            expected.as_common_string(),
            actual.as_common_string(),
        ))
    }
}
