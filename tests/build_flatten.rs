use quadflat::{
    build, BoundsPolicy, BuildConfig, BuildError, Flattened, Item, NodeKind, Point, Quadrant, QuadtreeBuilder, Rect,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn square() -> Rect {
    Rect { min_x: 0.0, min_y: 0.0, max_x: 10.0, max_y: 10.0 }
}

#[test]
fn test_zero_points() {
    let flat = build(&[], square()).unwrap().flatten();

    assert_eq!(flat.len(), 1);
    let root = &flat.records[0];
    assert_eq!(root.rect, square());
    assert_eq!(root.depth, 0);
    assert!(root.is_leaf);
    assert!(!root.has_point);
    assert_eq!(root.item, None);
    assert_eq!(flat.max_depth, 0);
}

#[test]
fn test_one_point() {
    let flat = build(&[Point { x: 5.0, y: 5.0 }], square()).unwrap().flatten();

    assert_eq!(flat.len(), 1);
    let root = &flat.records[0];
    assert_eq!(root.depth, 0);
    assert!(root.is_leaf);
    assert!(root.has_point);
    assert_eq!(flat.max_depth, 0);
}

#[test]
fn test_two_points_split_once() {
    let tree = build(&[Point { x: 1.0, y: 1.0 }, Point { x: 9.0, y: 9.0 }], square()).unwrap();

    let sw = tree.root().child(Quadrant::SW).unwrap();
    let ne = tree.root().child(Quadrant::NE).unwrap();
    assert_eq!(sw.rect(), &Rect { min_x: 0.0, min_y: 0.0, max_x: 5.0, max_y: 5.0 });
    assert_eq!(ne.rect(), &Rect { min_x: 5.0, min_y: 5.0, max_x: 10.0, max_y: 10.0 });
    assert_eq!(sw.items()[0].point, Point { x: 1.0, y: 1.0 });
    assert_eq!(ne.items()[0].point, Point { x: 9.0, y: 9.0 });

    let flat = tree.flatten();
    assert_eq!(flat.len(), 5);
    assert_eq!(flat.records[0].depth, 0);
    assert!(!flat.records[0].is_leaf);
    assert!(!flat.records[0].has_point);

    let children: Vec<_> = flat.at_depth(1).collect();
    assert_eq!(children.len(), 4);
    for child in &children {
        assert!(child.is_leaf);
        assert_eq!(child.rect.width(), 5.0);
        assert_eq!(child.rect.height(), 5.0);
    }
    assert_eq!(children.iter().filter(|c| c.has_point).count(), 2);
    assert_eq!(children.iter().filter(|c| !c.has_point).count(), 2);
    assert_eq!(flat.max_depth, 1);
}

#[test]
fn test_coincident_points_bucket_at_depth_cap() {
    init_tracing();
    let p = Point { x: 3.0, y: 3.0 };
    let points = vec![p; 10_000];

    let tree = QuadtreeBuilder::new().max_depth(32).build(&points, square()).unwrap();
    assert_eq!(tree.len(), 10_000);
    assert_eq!(tree.node_count(), 1 + 4 * 32);

    let flat = tree.flatten();
    assert_eq!(flat.max_depth, 32);
    let occupied: Vec<_> = flat.iter().filter(|r| r.has_point).collect();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].depth, 32);
    assert_eq!(occupied[0].item_count, 10_000);
    assert_eq!(occupied[0].item, Some(Item { index: 0, point: p }));
    assert!(occupied[0].rect.covers(&p));
}

#[test]
fn test_midpoint_assignment_is_stable() {
    let points = [Point { x: 5.0, y: 5.0 }, Point { x: 1.0, y: 1.0 }];

    let first = build(&points, square()).unwrap();
    let ne = first.root().child(Quadrant::NE).unwrap();
    assert_eq!(ne.items(), &[Item { index: 0, point: Point { x: 5.0, y: 5.0 } }]);

    for _ in 0..5 {
        let again = build(&points, square()).unwrap();
        assert_eq!(again, first);
        assert_eq!(again.flatten(), first.flatten());
    }
}

#[test]
fn test_point_on_extent_max_corner() {
    let tree = build(&[Point { x: 10.0, y: 10.0 }, Point { x: 0.0, y: 0.0 }], square()).unwrap();
    assert!(tree.rejected().is_empty());
    let ne = tree.root().child(Quadrant::NE).unwrap();
    assert_eq!(ne.items()[0].index, 0);
}

#[test]
fn test_degenerate_extent() {
    let flat_line = Rect { min_x: 0.0, min_y: 2.0, max_x: 10.0, max_y: 2.0 };
    let err = build(&[Point { x: 1.0, y: 2.0 }], flat_line).unwrap_err();
    assert!(matches!(err, BuildError::DegenerateExtent(r) if r == flat_line));
}

#[test]
fn test_single_point_padded_extent() {
    let points = [Point { x: -73.98, y: 40.75 }];
    assert!(matches!(
        build(&points, Rect::bounding_box(&points).unwrap()),
        Err(BuildError::DegenerateExtent(_))
    ));

    let extent = Rect::bounding_box_padded(&points, 0.01).unwrap();
    let tree = build(&points, extent).unwrap();
    assert_eq!(tree.len(), 1);
    assert!(tree.rejected().is_empty());
}

#[test]
fn test_strict_policy_reports_first_offender() {
    let points = [
        Point { x: 1.0, y: 1.0 },
        Point { x: 11.0, y: 1.0 },
        Point { x: -1.0, y: 1.0 },
    ];
    let err = QuadtreeBuilder::new()
        .bounds_policy(BoundsPolicy::Strict)
        .build(&points, square())
        .unwrap_err();
    match err {
        BuildError::OutOfBounds(oob) => {
            assert_eq!(oob.index, 1);
            assert_eq!(oob.point, Point { x: 11.0, y: 1.0 });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_skip_policy_matches_prefiltered_input() {
    init_tracing();
    let points = [
        Point { x: 1.0, y: 1.0 },
        Point { x: 11.0, y: 1.0 },
        Point { x: 7.0, y: 2.0 },
        Point { x: f64::NAN, y: 3.0 },
        Point { x: 6.0, y: 8.0 },
    ];
    let tree = build(&points, square()).unwrap();
    let rejected: Vec<usize> = tree.rejected().iter().map(|r| r.index).collect();
    assert_eq!(rejected, vec![1, 3]);
    assert_eq!(tree.len(), 3);

    let kept = [points[0], points[2], points[4]];
    let filtered = build(&kept, square()).unwrap();

    let shape = |f: &Flattened| -> Vec<(Rect, u32, bool, bool)> {
        f.iter().map(|r| (r.rect, r.depth, r.is_leaf, r.has_point)).collect()
    };
    assert_eq!(shape(&tree.flatten()), shape(&filtered.flatten()));
}

#[test]
fn test_clamp_policy_keeps_finite_points() {
    let points = [
        Point { x: -5.0, y: 5.0 },
        Point { x: 15.0, y: 15.0 },
        Point { x: 2.0, y: f64::INFINITY },
        Point { x: 4.0, y: 4.0 },
    ];
    let tree = QuadtreeBuilder::new()
        .bounds_policy(BoundsPolicy::Clamp)
        .build(&points, square())
        .unwrap();

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.clamped(), 2);
    assert_eq!(tree.rejected().len(), 1);
    assert_eq!(tree.rejected()[0].index, 2);

    let mut stored = tree.query(square());
    stored.sort_by_key(|it| it.index);
    assert_eq!(stored[0].point, Point { x: 0.0, y: 5.0 });
    assert_eq!(stored[1].point, Point { x: 10.0, y: 10.0 });
    assert_eq!(stored[2].point, Point { x: 4.0, y: 4.0 });
}

#[test]
fn test_dedup_collapses_coincident_input() {
    let p = Point { x: 2.5, y: 7.5 };
    let points = [p, Point { x: 9.0, y: 1.0 }, p, p];
    let tree = QuadtreeBuilder::new().dedup(true).build(&points, square()).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.duplicates(), 2);
    assert_eq!(tree.flatten().max_depth, 1);
}

#[test]
fn test_builder_from_toml_config() {
    let config = BuildConfig::from_toml_str("max_depth = 1\n").unwrap();
    let points = [Point { x: 1.0, y: 1.0 }, Point { x: 2.0, y: 2.0 }, Point { x: 3.0, y: 3.0 }];
    let tree = QuadtreeBuilder::with_config(config).build(&points, square()).unwrap();

    let sw = tree.root().child(Quadrant::SW).unwrap();
    assert!(matches!(sw.kind(), NodeKind::Bucket(items) if items.len() == 3));
    assert_eq!(tree.flatten().max_depth, 1);
}

#[test]
fn test_query_matches_scan() {
    let points: Vec<Point> = (0..50)
        .map(|i| Point { x: (i * 7 % 10) as f64 + 0.25, y: (i * 3 % 10) as f64 + 0.5 })
        .collect();
    let tree = build(&points, square()).unwrap();
    let range = Rect { min_x: 2.0, min_y: 2.5, max_x: 6.25, max_y: 7.5 };

    let mut found: Vec<usize> = tree.query(range).into_iter().map(|it| it.index).collect();
    found.sort_unstable();
    let expected: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| range.covers(p))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_encoded_flattening_round_trips() {
    let points = [
        Point { x: -74.0, y: 40.7 },
        Point { x: -73.95, y: 40.75 },
        Point { x: -73.8, y: 40.6 },
        Point { x: -73.99, y: 40.72 },
    ];
    let extent = Rect { min_x: -74.25, min_y: 40.5, max_x: -73.7, max_y: 40.9 };
    let flat = build(&points, extent).unwrap().flatten();

    let bytes = flat.encode().unwrap();
    assert_eq!(Flattened::decode(&bytes).unwrap(), flat);
}

#[test]
fn test_tree_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<quadflat::Quadtree>();
    assert_send_sync::<Flattened>();
}
