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


use byteorder::ByteOrder;
use byteorder::LE;

const C1_64: u64 = 0x87c37b91114253d5;
const C2_64: u64 = 0x4cf5ad432745937f;
const C1_32: u32 = 0xcc9e2d51;
const C2_32: u32 = 0x1b873593;

/// Computes the 128-bit MurmurHash3 (x64 variant) of `data`.
///
/// Returns the two 64-bit halves `(h1, h2)` in the order the reference implementation emits
/// them.
pub(crate) fn murmurhash3_x64_128(data: &[u8], seed: u64) -> (u64, u64) {
    let mut h1 = seed;
    let mut h2 = seed;

    // body: 16 byte blocks
    let blocks = data.len() >> 4;
    for i in 0..blocks {
        let lo = i << 4;
        let k1 = LE::read_u64(&data[lo..lo + 8]);
        let k2 = LE::read_u64(&data[lo + 8..lo + 16]);

        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dce729);

        h2 ^= mix_k2(k2);
        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x38495ab5);
    }

    // tail: up to 15 bytes
    let tail = &data[blocks << 4..];
    if tail.len() > 8 {
        h2 ^= mix_k2(read_partial_u64(&tail[8..]));
    }
    if !tail.is_empty() {
        h1 ^= mix_k1(read_partial_u64(&tail[..tail.len().min(8)]));
    }

    let total = data.len() as u64;
    h1 ^= total;
    h2 ^= total;
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    h1 = fmix64(h1);
    h2 = fmix64(h2);
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    (h1, h2)
}

/// Computes the 32-bit MurmurHash3 (x86 variant) of `data`.
pub(crate) fn murmurhash3_x86_32(data: &[u8], seed: u32) -> u32 {
    let mut h = seed;

    let blocks = data.len() >> 2;
    for i in 0..blocks {
        let k = LE::read_u32(&data[i << 2..(i << 2) + 4]);
        h ^= mix_k32(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe6546b64);
    }

    let tail = &data[blocks << 2..];
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k ^= u32::from(b) << (8 * i);
        }
        h ^= mix_k32(k);
    }

    h ^= data.len() as u32;
    fmix32(h)
}

#[inline]
fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1_64).rotate_left(31).wrapping_mul(C2_64)
}

#[inline]
fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2_64).rotate_left(33).wrapping_mul(C1_64)
}

#[inline]
fn mix_k32(k: u32) -> u32 {
    k.wrapping_mul(C1_32).rotate_left(15).wrapping_mul(C2_32)
}

/// Reads up to 8 bytes as a little-endian u64, zero-padding the missing high bytes.
fn read_partial_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^ (k >> 33)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x64_128_remainders() {
        // remainder > 8
        let (h1, h2) = murmurhash3_x64_128(b"The quick brown fox jumps over the lazy dog", 0);
        assert_eq!(h1, 0xe34bbc7bbc071b6c);
        assert_eq!(h2, 0x7a433ca9c49a9347);

        // remainder < 8
        let (h1, h2) = murmurhash3_x64_128(b"The quick brown fox jumps over the lazy dogdogdog", 0);
        assert_eq!(h1, 0x9c8205300e612fc4);
        assert_eq!(h2, 0xcbc0af6136aa3df9);

        // remainder = 8
        let (h1, h2) = murmurhash3_x64_128(b"The quick brown fox jumps over the lazy1", 0);
        assert_eq!(h1, 0xe3301a827e5cdfe3);
        assert_eq!(h2, 0xbdbf05f8da0f0392);

        // remainder = 0
        let (h1, h2) = murmurhash3_x64_128(b"The quick brown fox jumps over t", 0);
        assert_eq!(h1, 0xdf6af91bb29bdacf);
        assert_eq!(h2, 0x91a341c58df1f3a6);
    }

    #[test]
    fn test_x64_128_empty() {
        assert_eq!(murmurhash3_x64_128(&[], 0), (0, 0));
    }

    #[test]
    fn test_x86_32_vectors() {
        assert_eq!(murmurhash3_x86_32(b"", 0), 0);
        assert_eq!(murmurhash3_x86_32(b"", 1), 0x514e28b7);
        assert_eq!(murmurhash3_x86_32(b"test", 0), 0xba6bd213);
        assert_eq!(murmurhash3_x86_32(b"Hello, world!", 1234), 0xfaf6cdb3);
        assert_eq!(
            murmurhash3_x86_32(b"The quick brown fox jumps over the lazy dog", 0),
            0x2e4ff723
        );
    }
}
