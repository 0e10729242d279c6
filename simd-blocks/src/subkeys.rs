//! Expanded round keys.

use core::fmt::{self, Debug};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// An already-expanded round key table plus the number of rounds to run.
///
/// The table layout is opaque to the engine: it is handed to the kernels unchanged and never
/// mutated. With the `zeroize` feature the table can be wiped through [`zeroize::Zeroize`] once
/// the owning cipher is done with it.
#[derive(Clone)]
pub struct SubkeyTable<K> {
    table: K,
    rounds: u32,
}

impl<K> SubkeyTable<K> {
    /// Wrap an expanded key `table` to be run for `rounds` rounds.
    pub const fn new(table: K, rounds: u32) -> Self {
        Self { table, rounds }
    }

    /// Expanded round keys.
    #[inline]
    pub fn table(&self) -> &K {
        &self.table
    }

    /// Round count.
    #[inline]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl<K> Debug for SubkeyTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubkeyTable")
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl<K: Zeroize> Zeroize for SubkeyTable<K> {
    fn zeroize(&mut self) {
        self.table.zeroize();
        self.rounds.zeroize();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::SubkeyTable;
    use std::format;

    #[test]
    fn debug_hides_key_material() {
        let subkeys = SubkeyTable::new([0x42u32; 4], 12);
        assert_eq!(format!("{subkeys:?}"), "SubkeyTable { rounds: 12, .. }");
        assert_eq!(subkeys.table(), &[0x42; 4]);
    }
}
