use super::alphabet::Alphabet;

/// Enumerates every string of one fixed length over an alphabet.
///
/// Candidates are produced in odometer order: the leftmost position varies
/// slowest, and each position walks the alphabet in its declared order.
/// A single buffer of `length` bytes is rewritten in place at each
/// recursion depth, so no per-candidate allocation happens.
pub struct Generator<'a> {
    alphabet: &'a Alphabet,
    length: usize,
}

impl<'a> Generator<'a> {
    pub fn new(alphabet: &'a Alphabet, length: usize) -> Self {
        Self { alphabet, length }
    }

    /// Number of candidates this generator visits, `None` on `u64` overflow.
    pub fn space_size(&self) -> Option<u64> {
        space_size(self.alphabet.len(), self.length)
    }

    /// Call `visit` once per candidate, in odometer order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&[u8]),
    {
        let Some(&first) = self.alphabet.symbols().first() else {
            return;
        };
        let mut buffer = vec![first; self.length];
        self.fill(&mut buffer, 0, &mut visit);
    }

    fn fill<F>(&self, buffer: &mut [u8], depth: usize, visit: &mut F)
    where
        F: FnMut(&[u8]),
    {
        if depth == buffer.len() {
            visit(buffer);
            return;
        }

        for &symbol in self.alphabet.symbols() {
            buffer[depth] = symbol;
            self.fill(buffer, depth + 1, visit);
        }
    }
}

/// `symbols ^ length`, or `None` when it does not fit in a `u64`.
pub fn space_size(symbols: usize, length: usize) -> Option<u64> {
    let length = u32::try_from(length).ok()?;
    (symbols as u64).checked_pow(length)
}
