#[macro_use]
extern crate quickcheck_macros;

use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// the tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op {
    /// Insert the value unless it's already there
    Insert(i16),
    /// Delete the value
    Delete(i16),
    /// Search for the value
    Search(i16),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(i16::arbitrary(g)),
            1 => Op::Delete(i16::arbitrary(g)),
            2 => Op::Search(i16::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
