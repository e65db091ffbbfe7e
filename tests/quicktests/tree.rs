use intbst::tree::{Insertion, Tree};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same values in both.
fn do_ops(ops: &[Op], tree: &mut Tree, set: &mut BTreeSet<i32>) {
    for op in ops {
        match *op {
            Op::Insert(v) => {
                let v = i32::from(v);
                let inserted = tree.insert_unique(v).unwrap() == Insertion::Inserted;
                assert_eq!(inserted, set.insert(v));
            }
            Op::Delete(v) => {
                let v = i32::from(v);
                assert_eq!(tree.delete(v), set.remove(&v));
            }
            Op::Search(v) => {
                let v = i32::from(v);
                assert_eq!(tree.search(v).map(|n| n.value()), set.get(&v).copied());
            }
        }
        assert_eq!(tree.len(), set.len());
        assert_eq!(tree.is_empty(), set.is_empty());
    }
}

fn tree_of(xs: &[i16]) -> Tree {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert_unique(i32::from(*x)).unwrap();
    }
    tree
}

#[quickcheck]
fn fuzz_multiple_operations(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.iter().eq(set.iter().copied())
}

#[quickcheck]
fn in_order_is_sorted_input(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);

    let mut expected: Vec<i32> = xs.iter().map(|x| i32::from(*x)).collect();
    expected.sort_unstable();
    expected.dedup();

    tree.iter().collect::<Vec<_>>() == expected && tree.len() == expected.len()
}

#[quickcheck]
fn contains_not(xs: Vec<i16>, nots: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(i32::from(*x)).is_none())
}

#[quickcheck]
fn search_delete_search(xs: Vec<i16>) -> bool {
    let mut tree = tree_of(&xs);

    xs.iter().all(|x| {
        let x = i32::from(*x);
        let before = tree.len();
        // Duplicates in `xs` were deleted on an earlier pass.
        let was_present = tree.search(x).is_some();
        let deleted = tree.delete(x);
        deleted == was_present
            && tree.search(x).is_none()
            && tree.len() == before - usize::from(deleted)
    })
}

#[quickcheck]
fn deleting_everything_empties_the_tree(xs: Vec<i16>, order: Vec<usize>) -> bool {
    let mut tree = tree_of(&xs);
    let mut remaining: Vec<i32> = tree.iter().collect();

    // Delete in an arbitrary order picked by `order`.
    let mut picks = order.into_iter();
    while !remaining.is_empty() {
        let at = picks.next().unwrap_or(0) % remaining.len();
        let value = remaining.swap_remove(at);
        if !tree.delete(value) || tree.len() != remaining.len() {
            return false;
        }
    }

    tree.is_empty() && tree.len() == 0 && tree.root().is_none()
}

#[quickcheck]
fn destroy_all_frees_len_nodes(xs: Vec<i16>) -> bool {
    let mut tree = tree_of(&xs);
    let len = tree.len();

    tree.destroy_all() == len && tree.is_empty()
}
