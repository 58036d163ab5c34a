//! Property tests: layout coverage, hit-testing and aggregation under mutation

use proptest::prelude::*;

use rstreemap::domain::{
    DatasetPaths, NodeSpec, Point, RandomColors, Rect, TreeArena, TreeBuilder,
};

fn spec_strategy() -> impl Strategy<Value = NodeSpec> {
    let leaf = (0u64..1_000).prop_map(|size| NodeSpec::leaf("n", size));
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop::collection::vec(inner, 1..5).prop_map(|children| NodeSpec::branch("n", children))
    })
}

/// Non-square viewport.
fn rect_strategy() -> impl Strategy<Value = Rect> {
    (1u32..400, 1u32..400, -50i32..50, -50i32..50)
        .prop_filter("viewport must not be square", |(w, h, _, _)| w != h)
        .prop_map(|(w, h, x, y)| Rect::new(x, y, w, h))
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Grow(usize, u32),
    Shrink(usize, u32),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), 0u32..200).prop_map(|(i, p)| Op::Grow(i, p)),
        (any::<usize>(), 0u32..200).prop_map(|(i, p)| Op::Shrink(i, p)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn build(spec: NodeSpec) -> TreeArena {
    TreeBuilder::build(spec, Box::new(DatasetPaths), Box::new(RandomColors::seeded(0)))
        .expect("build tree")
}

fn apply(tree: &mut TreeArena, op: Op) {
    let leaves = tree.leaves();
    if leaves.is_empty() {
        return;
    }
    let pick = |i: usize| leaves[i % leaves.len()];
    let result = match op {
        Op::Grow(i, p) => tree.grow_node(pick(i), p).map(|_| ()),
        Op::Shrink(i, p) => tree.shrink_node(pick(i), p).map(|_| ()),
        Op::Delete(i) => tree.delete_node(pick(i)),
    };
    result.expect("populated leaf accepts every operation");
}

proptest! {
    #[test]
    fn layout_tiles_cover_the_viewport(spec in spec_strategy(), rect in rect_strategy()) {
        let tree = build(spec);
        let tiles = tree.layout(rect).unwrap();

        let covered: u64 = tiles.iter().map(|t| t.rect.area()).sum();
        if tree.total() > 0 {
            prop_assert_eq!(covered, rect.area());
        } else {
            prop_assert!(tiles.is_empty());
        }
    }

    #[test]
    fn layout_tiles_do_not_overlap(spec in spec_strategy(), rect in rect_strategy()) {
        let tree = build(spec);
        let tiles = tree.layout(rect).unwrap();

        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                prop_assert!(!a.rect.overlaps(&b.rect), "{} overlaps {}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn locate_agrees_with_layout(
        spec in spec_strategy(),
        rect in rect_strategy(),
        fx in 0u32..10_000,
        fy in 0u32..10_000,
    ) {
        let tree = build(spec);
        let point = Point::new(
            rect.x + (u64::from(fx) * u64::from(rect.width) / 10_000) as i32,
            rect.y + (u64::from(fy) * u64::from(rect.height) / 10_000) as i32,
        );

        let owner = tree
            .layout(rect)
            .unwrap()
            .into_iter()
            .find(|t| t.rect.contains(point))
            .map(|t| t.node);
        let hit = tree.locate(point, rect).unwrap().map(|h| h.node);

        prop_assert_eq!(hit, owner);
    }

    #[test]
    fn sizes_stay_aggregated_under_mutation(
        spec in spec_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..30),
    ) {
        let mut tree = build(spec);
        for op in ops {
            apply(&mut tree, op);
            prop_assert!(tree.is_consistent());
        }
        let root = tree.root().unwrap();
        prop_assert_eq!(tree.total(), tree.total_size(root));
    }

    #[test]
    fn shrink_never_drops_below_one(spec in spec_strategy(), percent in 0u32..500) {
        let mut tree = build(spec);
        for leaf in tree.leaves() {
            let size = tree.shrink_node(leaf, percent).unwrap();
            prop_assert!(size >= 1);
        }
    }
}
