use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op {
    /// Insert the value unless it's already there
    Insert(i8),
    /// Delete the value from the tree
    Delete(i8),
    /// Compare in-order walks
    Iter,
}

impl Arbitrary for Op {
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(i8::arbitrary(g)),
            1 => Op::Delete(i8::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::Op;
    use crate::tree::{Insertion, Tree};

    /// Applies a set of operations to a tree and a `BTreeSet`, checking every result against the
    /// set along the way.
    fn do_ops(ops: &[Op], tree: &mut Tree, set: &mut BTreeSet<i32>) -> bool {
        for op in ops {
            let agrees = match *op {
                Op::Insert(v) => {
                    let v = i32::from(v);
                    let expected = if set.insert(v) {
                        Insertion::Inserted
                    } else {
                        Insertion::Duplicate
                    };
                    tree.insert_unique(v) == Ok(expected)
                }
                Op::Delete(v) => {
                    let v = i32::from(v);
                    tree.delete(v) == set.remove(&v)
                }
                Op::Iter => tree.iter().eq(set.iter().copied()),
            };
            if !agrees || tree.len() != set.len() {
                return false;
            }
        }
        true
    }

    quickcheck! {
        fn fuzz_multiple_operations(ops: Vec<Op>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set)
                && set.iter().all(|v| tree.contains(*v))
                && tree.iter().eq(set.iter().copied())
        }
    }

    quickcheck! {
        fn every_search_subtree_is_sorted_and_contains_root(xs: Vec<i16>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert_unique(i32::from(*x)).unwrap();
            }

            xs.iter().all(|x| {
                let x = i32::from(*x);
                let Some(node) = tree.search(x) else {
                    return false;
                };
                let walked: Vec<_> = node.iter().collect();
                walked.windows(2).all(|w| w[0] < w[1]) && walked.contains(&x)
            })
        }
    }
}
