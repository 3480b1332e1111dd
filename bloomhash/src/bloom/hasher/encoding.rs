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


/// Character encodings for string items.
///
/// Characters that cannot be represented are replaced with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// UTF-8.
    #[default]
    Utf8,
    /// UTF-16 big-endian preceded by the byte order mark `FE FF`.
    Utf16,
    /// UTF-16 big-endian without byte order mark.
    Utf16Be,
    /// UTF-16 little-endian without byte order mark.
    Utf16Le,
    /// 7-bit ASCII.
    UsAscii,
    /// ISO Latin 1.
    Iso8859_1,
}

impl Charset {
    /// Encodes `item` into bytes.
    pub fn encode(self, item: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => item.as_bytes().to_vec(),
            Charset::Utf16 => {
                let mut bytes = vec![0xfe, 0xff];
                bytes.extend(item.encode_utf16().flat_map(u16::to_be_bytes));
                bytes
            }
            Charset::Utf16Be => item.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => item.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Charset::UsAscii => encode_single_byte(item, 0x7f),
            Charset::Iso8859_1 => encode_single_byte(item, 0xff),
        }
    }
}

fn encode_single_byte(item: &str, max: u32) -> Vec<u8> {
    item.chars()
        .map(|c| {
            let code = u32::from(c);
            if code <= max {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// Packs the UTF-16 code units of `item` little-endian.
pub(super) fn encode_unencoded(item: &str) -> Vec<u8> {
    Charset::Utf16Le.encode(item)
}
