//! MurmurHash3, x86 32-bit variant.
//!
//! Two entry points produce identical digests:
//! - [`murmur3_32`] hashes a complete byte slice in one call (usable in `const` context)
//! - [`Murmur3`] absorbs input incrementally, so a fixed prefix can be hashed once
//!   and the resulting state copied for every candidate suffix

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

#[inline]
const fn mix_k(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
const fn mix_h(h: u32, k: u32) -> u32 {
    (h ^ mix_k(k))
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe654_6b64)
}

#[inline]
const fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// One-shot MurmurHash3 x86_32 of `data` with `seed`.
pub const fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    let mut h = seed;
    let blocks = data.len() & !3;

    let mut i = 0;
    while i < blocks {
        let k = u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
        h = mix_h(h, k);
        i += 4;
    }

    let tail = match data.len() & 3 {
        3 => u32::from_le_bytes([data[i], data[i + 1], data[i + 2], 0]),
        2 => u32::from_le_bytes([data[i], data[i + 1], 0, 0]),
        1 => u32::from_le_bytes([data[i], 0, 0, 0]),
        _ => 0,
    };
    if data.len() & 3 != 0 {
        h ^= mix_k(tail);
    }

    // The reference implementation folds the length in as a 32-bit int
    fmix32(h ^ data.len() as u32)
}

/// Streaming MurmurHash3 x86_32 state.
///
/// Cheap to copy: cloning a state after absorbing a prefix and then feeding a
/// suffix gives the same digest as hashing `prefix ++ suffix` in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3 {
    h: u32,
    tail: u32,
    tail_len: u32,
    total_len: u32,
}

impl Murmur3 {
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            h: seed,
            tail: 0,
            tail_len: 0,
            total_len: 0,
        }
    }

    /// Absorb more input.
    pub fn update(&mut self, mut bytes: &[u8]) {
        self.total_len = self.total_len.wrapping_add(bytes.len() as u32);

        // Top up a partial block left over from the previous call
        while self.tail_len > 0 && !bytes.is_empty() {
            self.push_tail_byte(bytes[0]);
            bytes = &bytes[1..];
        }

        let mut blocks = bytes.chunks_exact(4);
        for block in &mut blocks {
            let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            self.h = mix_h(self.h, k);
        }

        for &byte in blocks.remainder() {
            self.push_tail_byte(byte);
        }
    }

    #[inline]
    fn push_tail_byte(&mut self, byte: u8) {
        self.tail |= (byte as u32) << (8 * self.tail_len);
        self.tail_len += 1;
        if self.tail_len == 4 {
            self.h = mix_h(self.h, self.tail);
            self.tail = 0;
            self.tail_len = 0;
        }
    }

    /// Digest of everything absorbed so far. Does not consume the state.
    pub fn finish32(&self) -> u32 {
        let mut h = self.h;
        if self.tail_len > 0 {
            h ^= mix_k(self.tail);
        }
        fmix32(h ^ self.total_len)
    }
}

impl Default for Murmur3 {
    fn default() -> Self {
        Self::with_seed(0)
    }
}
