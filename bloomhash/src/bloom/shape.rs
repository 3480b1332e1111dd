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


use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use crate::error::Error;
use crate::hash::are_equal;
use crate::hash::HashFunctionIdentity;

/// The largest supported number of bits, `i32::MAX`.
pub const MAX_NUM_BITS: u32 = i32::MAX as u32;
/// The largest supported number of hash functions.
pub const MAX_NUM_HASH_FUNCTIONS: u32 = i32::MAX as u32;
/// The largest supported number of items.
pub const MAX_NUM_ITEMS: u32 = i32::MAX as u32;

/// The layout of a Bloom filter: number of bits `m`, number of hash functions `k`, the number of
/// items `n` it was sized for, and the identity of the hash function the layout assumes.
///
/// Equality and hashing consider `m`, `k` and the hash function identity (compared ignoring the
/// provider and the case of the name). The number of items only feeds the reported
/// [`probability`](Self::probability), so shapes sized for different `n` but sharing a physical
/// layout are equal.
///
/// # Examples
///
/// ```
/// # use bloomhash::bloom::Shape;
/// # use bloomhash::hash::HashFunction;
/// # use bloomhash::hash::Md5Cyclic;
/// let identity = Md5Cyclic::new().identity().clone();
/// let shape = Shape::with_bits(identity, 5, 24).unwrap();
/// assert_eq!(shape.number_of_hash_functions(), 3);
/// assert!((shape.probability() - 0.100375138).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Shape {
    hash_function_identity: HashFunctionIdentity,
    number_of_items: u32,
    number_of_bits: u32,
    number_of_hash_functions: u32,
}

impl Shape {
    /// Creates a shape from explicit `n`, `m` and `k`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the identity name is empty, if any of `n`, `m`, `k`
    /// is zero or too large, or if the resulting probability is not in `(0, 1)`.
    pub fn new(
        identity: HashFunctionIdentity,
        number_of_items: u32,
        number_of_bits: u32,
        number_of_hash_functions: u32,
    ) -> Result<Self, Error> {
        check_identity(&identity)?;
        check_number_of_items(number_of_items)?;
        check_number_of_bits(number_of_bits)?;
        check_number_of_hash_functions(number_of_hash_functions)?;
        let shape = Shape {
            hash_function_identity: identity,
            number_of_items,
            number_of_bits,
            number_of_hash_functions,
        };
        check_calculated_probability(shape.probability())?;
        Ok(shape)
    }

    /// Creates a shape from `n` and `m`, choosing the optimal `k = round((m / n) * ln 2)`.
    ///
    /// `k` is at least 1.
    ///
    /// # Errors
    ///
    /// See [`Shape::new`].
    pub fn with_bits(
        identity: HashFunctionIdentity,
        number_of_items: u32,
        number_of_bits: u32,
    ) -> Result<Self, Error> {
        check_identity(&identity)?;
        check_number_of_items(number_of_items)?;
        check_number_of_bits(number_of_bits)?;
        let k = optimal_number_of_hash_functions(number_of_items, number_of_bits);
        tracing::debug!(n = number_of_items, m = number_of_bits, k, "derived hash count");
        Self::new(identity, number_of_items, number_of_bits, k)
    }

    /// Creates a shape holding `n` items at the target false positive probability `p`.
    ///
    /// `m = ceil(-n * ln(p) / ln(2)^2)` and `k` is chosen as in [`Shape::with_bits`].
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the identity name is empty, `n` is zero, `p` is not
    /// in `(0, 1)`, or the derived number of bits exceeds [`MAX_NUM_BITS`].
    pub fn with_probability(
        identity: HashFunctionIdentity,
        number_of_items: u32,
        probability: f64,
    ) -> Result<Self, Error> {
        check_identity(&identity)?;
        check_number_of_items(number_of_items)?;
        check_probability(probability)?;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;
        let m = (-f64::from(number_of_items) * probability.ln() / ln2_squared).ceil();
        if m > f64::from(MAX_NUM_BITS) {
            return Err(Error::invalid_argument(format!(
                "resulting filter has more than {MAX_NUM_BITS} bits: {m}"
            )));
        }
        let m = m as u32;
        tracing::debug!(n = number_of_items, p = probability, m, "derived bit count");
        Self::with_bits(identity, number_of_items, m)
    }

    /// Creates a shape from `m` and `k`, deriving how many items it holds at probability `p`.
    ///
    /// `n = ceil(m / (-k / ln(1 - exp(ln(p) / k))))`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the identity name is empty, `p` is not in `(0, 1)`,
    /// `m` or `k` is invalid, or the derived number of items is too large.
    pub fn with_probability_bits_hashes(
        identity: HashFunctionIdentity,
        probability: f64,
        number_of_bits: u32,
        number_of_hash_functions: u32,
    ) -> Result<Self, Error> {
        check_identity(&identity)?;
        check_probability(probability)?;
        check_number_of_bits(number_of_bits)?;
        check_number_of_hash_functions(number_of_hash_functions)?;
        let m = f64::from(number_of_bits);
        let k = f64::from(number_of_hash_functions);
        let n = (m / (-k / (1.0 - (probability.ln() / k).exp()).ln())).ceil();
        if n.is_nan() || n > f64::from(MAX_NUM_ITEMS) {
            return Err(Error::invalid_argument(format!(
                "estimated number of items is too large: {n}"
            )));
        }
        let n = n as u32;
        tracing::debug!(
            p = probability,
            m = number_of_bits,
            k = number_of_hash_functions,
            n,
            "derived item count"
        );
        Self::new(identity, n, number_of_bits, number_of_hash_functions)
    }

    /// Returns the identity of the hash function this shape was sized for.
    pub fn hash_function_identity(&self) -> &HashFunctionIdentity {
        &self.hash_function_identity
    }

    /// Returns the number of items (`n`) the shape was sized for.
    pub fn number_of_items(&self) -> u32 {
        self.number_of_items
    }

    /// Returns the number of bits (`m`).
    pub fn number_of_bits(&self) -> u32 {
        self.number_of_bits
    }

    /// Returns the number of hash functions (`k`).
    pub fn number_of_hash_functions(&self) -> u32 {
        self.number_of_hash_functions
    }

    /// Returns the false positive probability after `n` items: `(1 - e^(-kn/m))^k`.
    pub fn probability(&self) -> f64 {
        let k = f64::from(self.number_of_hash_functions);
        let n = f64::from(self.number_of_items);
        let m = f64::from(self.number_of_bits);
        (1.0 - (-k * n / m).exp()).powf(k)
    }
}

/// `round((m / n) * ln 2)`, at least 1.
fn optimal_number_of_hash_functions(number_of_items: u32, number_of_bits: u32) -> u32 {
    let k = (f64::from(number_of_bits) / f64::from(number_of_items) * std::f64::consts::LN_2)
        .round();
    k.clamp(1.0, f64::from(MAX_NUM_HASH_FUNCTIONS)) as u32
}

fn check_identity(identity: &HashFunctionIdentity) -> Result<(), Error> {
    if identity.name().trim().is_empty() {
        return Err(Error::invalid_argument(
            "hash function identity name must not be empty",
        ));
    }
    Ok(())
}

fn check_number_of_items(number_of_items: u32) -> Result<(), Error> {
    if number_of_items < 1 || number_of_items > MAX_NUM_ITEMS {
        return Err(Error::out_of_range("number of items", number_of_items));
    }
    Ok(())
}

fn check_number_of_bits(number_of_bits: u32) -> Result<(), Error> {
    if number_of_bits < 1 || number_of_bits > MAX_NUM_BITS {
        return Err(Error::out_of_range("number of bits", number_of_bits));
    }
    Ok(())
}

fn check_number_of_hash_functions(number_of_hash_functions: u32) -> Result<(), Error> {
    if number_of_hash_functions < 1 || number_of_hash_functions > MAX_NUM_HASH_FUNCTIONS {
        return Err(Error::out_of_range(
            "number of hash functions",
            number_of_hash_functions,
        ));
    }
    Ok(())
}

fn check_probability(probability: f64) -> Result<(), Error> {
    // NaN fails both comparisons
    if !(probability > 0.0 && probability < 1.0) {
        return Err(Error::invalid_argument(format!(
            "probability must be greater than 0 and less than 1: {probability}"
        )));
    }
    Ok(())
}

fn check_calculated_probability(probability: f64) -> Result<(), Error> {
    if probability >= 1.0 {
        return Err(Error::invalid_argument(format!(
            "calculated probability is greater than or equal to 1: {probability}"
        )));
    }
    if probability.is_nan() || probability <= 0.0 {
        return Err(Error::invalid_argument(format!(
            "calculated probability is not greater than 0: {probability}"
        )));
    }
    Ok(())
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.number_of_bits == other.number_of_bits
            && self.number_of_hash_functions == other.number_of_hash_functions
            && are_equal(&self.hash_function_identity, &other.hash_function_identity)
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number_of_bits.hash(state);
        self.number_of_hash_functions.hash(state);
        self.hash_function_identity.common_hash(state);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape[ {} m={} k={} ]",
            self.hash_function_identity.as_common_string(),
            self.number_of_bits,
            self.number_of_hash_functions
        )
    }
}
