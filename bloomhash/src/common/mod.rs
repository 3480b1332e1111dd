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


//! Arithmetic helpers shared by the hash functions and the index producers.

/// Reduces a raw hash value into `[0, divisor)`.
///
/// Unlike `%`, the result is never negative, including for `i64::MIN`.
///
/// # Panics
///
/// Panics if `divisor` is zero.
pub(crate) fn floor_mod(value: i64, divisor: u32) -> u32 {
    value.rem_euclid(i64::from(divisor)) as u32
}

#[cfg(test)]
mod tests {
    use super::floor_mod;

    #[test]
    fn test_floor_mod_positive() {
        assert_eq!(floor_mod(0, 72), 0);
        assert_eq!(floor_mod(77, 72), 5);
        assert_eq!(floor_mod(i64::MAX, 72), (i64::MAX % 72) as u32);
    }

    #[test]
    fn test_floor_mod_negative() {
        assert_eq!(floor_mod(-1, 72), 71);
        assert_eq!(floor_mod(-72, 72), 0);
        assert_eq!(floor_mod(-73, 72), 71);
        // -2^63 = -128102389400760776 * 72 + 64
        assert_eq!(floor_mod(i64::MIN, 72), 64);
        assert_eq!(floor_mod(i64::MIN, 1), 0);
        assert_eq!(floor_mod(i64::MIN, i32::MAX as u32), 2147483645);
    }
}
