use std::collections::BTreeSet;

use bintree::{BinaryTree, Bst, Link, SplayOptions, SplayTree, Traversal, TreeError};

// ── helpers ──────────────────────────────────────────────────────────────

// Do not reorder: the expected shapes below depend on it.
const SAMPLE: [i32; 9] = [8, 3, 10, 1, 6, 4, 7, 14, 12];

fn bst() -> Bst<i32> {
    SAMPLE.into_iter().collect()
}

/// Splay tree with the same shape as `bst()` (no splaying while building).
fn splay() -> SplayTree<i32> {
    let mut tree = SplayTree::with_options(SplayOptions {
        splay_on_insert: false,
    });
    tree.extend(SAMPLE);
    tree
}

fn sorted_unique(values: &[i32]) -> Vec<i32> {
    values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

// ── construction ─────────────────────────────────────────────────────────

#[test]
fn test_empty_tree() {
    let tree: Bst<i32> = Bst::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.root(), None);
    assert!(tree.root_node().is_none());
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.height_recursive(), 0);
    assert!(tree.values(Traversal::Level).is_empty());
    assert!(tree.iddfs().is_empty());
    assert!(!tree.search(&1));
    assert_eq!(tree.min(), None);
    assert_eq!(tree.max(), None);
    tree.validate().unwrap();

    let splay: SplayTree<i32> = SplayTree::new();
    assert!(splay.is_empty());
    assert_eq!(splay.height(), 0);
}

#[test]
fn test_single_node() {
    let mut tree = Bst::new();
    assert!(tree.insert(1));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.height_recursive(), 1);
    assert_eq!(tree.in_order_successor(&1), None);
}

#[test]
fn test_built_tree_shape() {
    let tree = bst();
    assert_eq!(tree.root(), Some(&8));
    assert_eq!(tree.left_subtree().map(|n| *n.value()), Some(3));
    assert_eq!(tree.right_subtree().map(|n| *n.value()), Some(10));
    let six = tree.left_subtree().unwrap().right().unwrap();
    assert_eq!(*six.value(), 6);
    assert_eq!(*six.left().unwrap().value(), 4);
    assert_eq!(*six.right().unwrap().value(), 7);
    assert_eq!(tree.height(), 4);
}

#[test]
fn test_duplicate_insert_ignored() {
    let mut tree = bst();
    for v in SAMPLE {
        assert!(!tree.insert(v));
    }
    assert_eq!(tree.len(), SAMPLE.len());
    assert_eq!(tree.values(Traversal::Pre), vec![8, 3, 1, 6, 4, 7, 10, 14, 12]);

    let mut splay = splay();
    for v in SAMPLE {
        assert!(!splay.insert(v));
    }
    assert_eq!(splay.len(), SAMPLE.len());
}

// ── search / min / max ───────────────────────────────────────────────────

#[test]
fn test_search() {
    let tree = bst();
    assert!(tree.search(&6));
    assert!(!tree.search(&9));
    for v in SAMPLE {
        assert!(tree.search(&v));
    }
}

#[test]
fn test_locate_triple() {
    let tree = bst();
    let s = tree.locate(&8);
    assert!(s.found);
    assert_eq!((s.parent, s.link), (None, Link::None));
    let s = tree.locate(&14);
    assert!(s.found);
    assert_eq!(s.link, Link::Right);
    let s = tree.locate(&11);
    assert!(!s.found);
    assert_eq!(s.link, Link::Left);
}

#[test]
fn test_min_max() {
    let tree = bst();
    assert_eq!(tree.min(), Some(&1));
    assert_eq!(tree.max(), Some(&14));
    let summary = tree.summary();
    assert_eq!(summary.node_count, 9);
    assert_eq!(summary.height, 4);
    assert_eq!(summary.min, Some(&1));
    assert_eq!(summary.max, Some(&14));
}

// ── traversal ────────────────────────────────────────────────────────────

#[test]
fn test_traversal_orders() {
    let tree = bst();
    assert_eq!(tree.values(Traversal::In), sorted_unique(&SAMPLE));
    assert_eq!(tree.values(Traversal::Pre), vec![8, 3, 1, 6, 4, 7, 10, 14, 12]);
    assert_eq!(tree.values(Traversal::Post), vec![1, 4, 7, 6, 3, 12, 14, 10, 8]);
    assert_eq!(tree.values(Traversal::Level), vec![8, 3, 10, 1, 6, 14, 4, 7, 12]);
}

#[test]
fn test_traversal_mapping() {
    let tree = bst();
    assert_eq!(
        tree.traversal(Traversal::Post, |v| v * 2),
        vec![2, 8, 14, 12, 6, 24, 28, 20, 16]
    );
    assert_eq!(
        tree.traversal(Traversal::In, |v| v.to_string()),
        vec!["1", "3", "4", "6", "7", "8", "10", "12", "14"]
    );
}

#[test]
fn test_traversal_is_restartable() {
    let tree = bst();
    for order in Traversal::ALL {
        assert_eq!(tree.values(order), tree.values(order), "order {}", order);
    }
}

#[test]
fn test_pre_order_recursive_matches_iterative() {
    let tree = bst();
    assert_eq!(tree.pre_order_recursive(|v| *v), tree.values(Traversal::Pre));
}

#[test]
fn test_traversal_named() {
    let tree = bst();
    assert_eq!(
        tree.traversal_named("level", |v| *v).unwrap(),
        vec![8, 3, 10, 1, 6, 14, 4, 7, 12]
    );
    assert_eq!(tree.traversal_named("in-order", |v| *v).unwrap(), sorted_unique(&SAMPLE));
    assert_eq!(
        tree.traversal_named("zigzag", |v| *v),
        Err(TreeError::UnsupportedTraversal("zigzag".to_string()))
    );
    assert!(matches!(
        "sideways".parse::<Traversal>(),
        Err(TreeError::UnsupportedTraversal(_))
    ));
}

#[test]
fn test_iddfs_matches_level_order() {
    let tree = bst();
    assert_eq!(tree.iddfs(), vec![8, 3, 10, 1, 6, 14, 4, 7, 12]);
    assert_eq!(tree.iddfs_with(|v| v + 1), tree.traversal(Traversal::Level, |v| v + 1));
}

#[test]
fn test_sort() {
    let tree = bst();
    let sorted = tree.sort();
    assert!(sorted.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_display() {
    assert_eq!(bst().to_string(), "[8, 3, 1, 6, 4, 7, 10, 14, 12]");
    assert_eq!(splay().to_string(), "[8, 3, 1, 6, 4, 7, 10, 14, 12]");
}

// ── in-order successor ───────────────────────────────────────────────────

#[test]
fn test_in_order_successor() {
    let tree = bst();
    let expected = [Some(10), Some(4), Some(12), Some(3), Some(7), Some(6), Some(8), None, Some(14)];
    for (v, exp) in SAMPLE.iter().zip(expected) {
        assert_eq!(tree.in_order_successor(v).copied(), exp, "successor of {}", v);
    }
    assert_eq!(tree.in_order_successor(&5), None);
}

// ── deletion ─────────────────────────────────────────────────────────────

#[test]
fn test_delete_leaf() {
    let mut tree = bst();
    assert_eq!(tree.delete(&12), Some(12));
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.root(), Some(&8));
    let mut expected = sorted_unique(&SAMPLE);
    expected.retain(|&v| v != 12);
    assert_eq!(tree.values(Traversal::In), expected);
    tree.validate().unwrap();
}

#[test]
fn test_delete_one_child() {
    for v in [10, 14] {
        let mut tree = bst();
        assert_eq!(tree.delete(&v), Some(v));
        assert_eq!(tree.len(), 8);
        assert_eq!(tree.root(), Some(&8));
        let mut expected = sorted_unique(&SAMPLE);
        expected.retain(|&x| x != v);
        assert_eq!(tree.values(Traversal::In), expected, "after deleting {}", v);
        tree.validate().unwrap();
    }
}

#[test]
fn test_delete_two_children() {
    let mut tree = bst();
    let pre = tree.values(Traversal::Pre);
    let idx = pre.iter().position(|&v| v == 3).unwrap();
    assert_eq!(tree.delete(&3), Some(3));
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.root(), Some(&8));
    assert_eq!(tree.values(Traversal::Pre)[idx], 4);
    tree.validate().unwrap();
}

#[test]
fn test_delete_root_two_children() {
    let mut tree = bst();
    assert_eq!(tree.delete(&8), Some(8));
    assert_eq!(tree.root(), Some(&10));
    assert_eq!(tree.values(Traversal::Pre), vec![10, 3, 1, 6, 4, 7, 14, 12]);
    tree.validate().unwrap();
}

#[test]
fn test_delete_in_empty_tree() {
    let mut tree: Bst<i32> = Bst::new();
    assert_eq!(tree.delete(&0), None);
    assert_eq!(tree.len(), 0);
    let mut splay: SplayTree<i32> = SplayTree::new();
    assert_eq!(splay.delete(&0), None);
    assert_eq!(splay.len(), 0);
}

#[test]
fn test_delete_single_node() {
    let mut tree = Bst::new();
    tree.insert(10);
    assert_eq!(tree.delete(&10), Some(10));
    assert_eq!(tree.root(), None);
    assert_eq!(tree.len(), 0);
}

#[test]
fn test_delete_two_node_trees() {
    // (insert order, value to delete, surviving root)
    let cases = [
        ([10, 8], 8, 10),
        ([8, 10], 10, 8),
        ([10, 8], 10, 8),
        ([8, 10], 8, 10),
    ];
    for (values, del, root) in cases {
        let mut tree: Bst<i32> = values.into_iter().collect();
        tree.delete(&del);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), Some(&root), "{:?} minus {}", values, del);

        let mut splay = SplayTree::with_options(SplayOptions {
            splay_on_insert: false,
        });
        splay.extend(values);
        splay.delete(&del);
        assert_eq!(splay.len(), 1);
        assert_eq!(splay.root(), Some(&root));
        splay.validate().unwrap();
    }
}

#[test]
fn test_delete_everything() {
    let mut tree = bst();
    for v in SAMPLE {
        assert_eq!(tree.delete(&v), Some(v));
        tree.validate().unwrap();
    }
    assert_eq!(tree.root(), None);
    assert_eq!(tree.len(), 0);

    let mut splay = splay();
    for v in SAMPLE {
        assert_eq!(splay.delete(&v), Some(v));
        splay.validate().unwrap();
    }
    assert!(splay.is_empty());
}

// ── splay tree ───────────────────────────────────────────────────────────

#[test]
fn test_splay_search_moves_node_to_root() {
    for v in SAMPLE {
        let mut tree = splay();
        assert!(tree.search(&v));
        assert_eq!(tree.root(), Some(&v));
        assert_eq!(tree.values(Traversal::In), sorted_unique(&SAMPLE));
        tree.validate().unwrap();
    }
}

#[test]
fn test_splay_search_4() {
    let mut tree = splay();
    assert!(tree.search(&4));
    assert_eq!(tree.root(), Some(&4));
}

#[test]
fn test_splay_search_3_shape() {
    let mut tree = splay();
    assert!(tree.search(&3));
    let root = tree.root_node().unwrap();
    assert_eq!(*root.left().unwrap().value(), 1);
    assert_eq!(*root.right().unwrap().value(), 8);
    assert_eq!(*root.right().unwrap().left().unwrap().value(), 6);
    assert_eq!(root.right().unwrap().parent().map(|p| *p.value()), Some(3));
}

#[test]
fn test_splay_min_max_shape() {
    let mut tree = splay();
    assert_eq!(tree.min(), Some(&1));
    assert_eq!(tree.root(), Some(&1));
    let r = tree.right_subtree().unwrap();
    assert_eq!(*r.value(), 3);
    assert!(r.left().is_none());
    assert_eq!(*r.right().unwrap().value(), 8);
    assert_eq!(*r.right().unwrap().left().unwrap().value(), 6);

    let mut tree = splay();
    assert_eq!(tree.max(), Some(&14));
    assert!(tree.right_subtree().is_none());
    let l = tree.left_subtree().unwrap();
    assert_eq!(*l.value(), 10);
    assert_eq!(*l.right().unwrap().value(), 12);
    assert_eq!(*l.left().unwrap().value(), 8);
}

#[test]
fn test_splay_delete_two_children() {
    let mut tree = splay();
    assert_eq!(tree.delete(&6), Some(6));
    assert_eq!(tree.len(), SAMPLE.len() - 1);
    assert_eq!(tree.root(), Some(&7));
    assert_eq!(tree.left_subtree().map(|n| *n.value()), Some(3));
    assert_eq!(tree.right_subtree().map(|n| *n.value()), Some(8));
}

#[test]
fn test_splay_default_inserts_splay() {
    let tree: SplayTree<i32> = SAMPLE.into_iter().collect();
    assert!(tree.options().splay_on_insert);
    assert_eq!(tree.root(), Some(&12));
    assert_eq!(tree.values(Traversal::In), sorted_unique(&SAMPLE));
    tree.validate().unwrap();
}

#[test]
fn test_splay_sorted_access_stays_valid() {
    let mut tree: SplayTree<u32> = (0..200).collect();
    for v in 0..200 {
        assert!(tree.search(&v));
        assert_eq!(tree.root(), Some(&v));
    }
    tree.validate().unwrap();
    assert_eq!(tree.height(), tree.height_recursive());
}

#[test]
fn test_deep_chain_traversals() {
    // Sorted inserts splayed to the root leave a left chain as tall as the tree.
    const N: u32 = 200_000;
    let tree: SplayTree<u32> = (0..N).collect();
    assert_eq!(tree.height(), N as usize);
    tree.validate().unwrap();

    let ascending: Vec<u32> = (0..N).collect();
    let descending: Vec<u32> = (0..N).rev().collect();
    assert_eq!(tree.sort(), ascending);
    assert_eq!(tree.values(Traversal::Post), ascending);
    assert_eq!(tree.values(Traversal::Pre), descending);
    assert_eq!(tree.values(Traversal::Level), descending);
    assert_eq!(tree.iddfs(), descending);
    assert_eq!(tree.in_order_successor(&0), Some(&1));
}

// ── randomized ───────────────────────────────────────────────────────────

#[test]
fn test_random_operations_against_btreeset() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(42);
    let mut model = BTreeSet::new();
    let mut tree = Bst::new();
    let mut splay = SplayTree::new();
    let mut lazy = SplayTree::with_options(SplayOptions {
        splay_on_insert: false,
    });

    for step in 0..3000 {
        let v: i32 = rng.gen_range(0..200);
        match rng.gen_range(0..3) {
            0 => {
                let inserted = model.insert(v);
                assert_eq!(tree.insert(v), inserted);
                assert_eq!(splay.insert(v), inserted);
                assert_eq!(lazy.insert(v), inserted);
            }
            1 => {
                let removed = model.remove(&v).then_some(v);
                assert_eq!(tree.delete(&v), removed, "step {}", step);
                assert_eq!(splay.delete(&v), removed, "step {}", step);
                assert_eq!(lazy.delete(&v), removed, "step {}", step);
            }
            _ => {
                let present = model.contains(&v);
                assert_eq!(tree.search(&v), present);
                assert_eq!(splay.search(&v), present);
                assert_eq!(lazy.search(&v), present);
            }
        }
        assert_eq!(tree.len(), model.len());
        assert_eq!(splay.len(), model.len());
        assert_eq!(lazy.len(), model.len());
        if step % 100 == 0 {
            tree.validate().unwrap();
            splay.validate().unwrap();
            lazy.validate().unwrap();
        }
    }

    let expected: Vec<i32> = model.iter().copied().collect();
    assert_eq!(tree.sort(), expected);
    assert_eq!(splay.sort(), expected);
    assert_eq!(lazy.sort(), expected);
}

#[test]
fn test_random_trees_height_and_successor() {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(7);
    for trial in 0..20 {
        let mut values: Vec<i32> = (0..(trial * 5 + 1)).collect();
        values.shuffle(&mut rng);
        let tree: Bst<i32> = values.iter().copied().collect();
        assert_eq!(tree.height(), tree.height_recursive(), "trial {}", trial);
        assert_eq!(tree.pre_order_recursive(|v| *v), tree.values(Traversal::Pre));

        let mut iddfs = tree.iddfs();
        assert_eq!(iddfs, tree.values(Traversal::Level));
        iddfs.sort();
        assert_eq!(iddfs, tree.sort());

        let sorted = tree.sort();
        for w in sorted.windows(2) {
            assert_eq!(tree.in_order_successor(&w[0]), Some(&w[1]));
        }
        assert_eq!(tree.in_order_successor(sorted.last().unwrap()), None);
    }
}

#[test]
fn test_splay_preserves_content() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(1234);
    let values: Vec<i32> = (0..300).map(|_| rng.gen_range(-500..500)).collect();
    let mut tree: SplayTree<i32> = values.iter().copied().collect();
    let expected = sorted_unique(&values);
    for _ in 0..500 {
        let v = rng.gen_range(-600..600);
        tree.search(&v);
        assert_eq!(tree.len(), expected.len());
    }
    assert_eq!(tree.values(Traversal::In), expected);
    tree.validate().unwrap();
}
