use ordered_float::NotNan;
use polylines::{polylinize, Options, Point, Polyline, Segment};

type Float = NotNan<f64>;

fn seg(a: (f64, f64), b: (f64, f64), width: f64) -> Segment<Float> {
    Segment::try_new(a.0, a.1, b.0, b.1, width).unwrap()
}

fn points(poly: &Polyline<Float>) -> Vec<(f64, f64)> {
    poly.points()
        .map(|p: &Point<Float>| (p.x.into_inner(), p.y.into_inner()))
        .collect()
}

#[test]
fn two_widths() {
    let out = polylinize(
        vec![
            seg((0.0, 0.0), (1.0, 0.0), 2.0),
            seg((1.0, 0.0), (2.0, 0.0), 2.0),
            seg((5.0, 5.0), (6.0, 6.0), 3.0),
        ],
        &Options::default(),
    )
    .unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out.polylines[0].width().into_inner(), 2.0);
    assert_eq!(
        points(&out.polylines[0]),
        vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]
    );
    assert_eq!(out.polylines[1].width().into_inner(), 3.0);
    assert_eq!(points(&out.polylines[1]), vec![(5.0, 5.0), (6.0, 6.0)]);

    let rendered: Vec<_> = out
        .iter()
        .map(|poly| {
            let pts: Vec<_> = points(poly)
                .into_iter()
                .map(|(x, y)| format!("{x},{y}"))
                .collect();
            format!("{}: {}", poly.width(), pts.join(" "))
        })
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r###"
    2: 0,0 1,0 2,0
    3: 5,5 6,6
    "###);
}

#[test]
fn open_path_any_order() {
    let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0)];
    let forward = pts.to_vec();
    let backward: Vec<_> = pts.iter().rev().copied().collect();

    let perms = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for perm in perms {
        for flips in 0..8u32 {
            let segs: Vec<_> = perm
                .iter()
                .map(|&i| {
                    if flips & (1 << i) != 0 {
                        seg(pts[i + 1], pts[i], 1.0)
                    } else {
                        seg(pts[i], pts[i + 1], 1.0)
                    }
                })
                .collect();
            let out = polylinize(segs, &Options::default()).unwrap();
            assert_eq!(out.len(), 1, "perm {perm:?}, flips {flips:b}");
            let got = points(&out.polylines[0]);
            assert!(
                got == forward || got == backward,
                "perm {perm:?}, flips {flips:b}: {got:?}"
            );
        }
    }
}

#[test]
fn closed_loop() {
    let out = polylinize(
        vec![
            seg((0.0, 0.0), (4.0, 0.0), 1.0),
            seg((4.0, 0.0), (0.0, 3.0), 1.0),
            seg((0.0, 3.0), (0.0, 0.0), 1.0),
        ],
        &Options::default(),
    )
    .unwrap();
    assert_eq!(out.len(), 1);
    let poly = &out.polylines[0];
    assert_eq!(poly.len(), 3);
    assert!(poly.is_closed());
    assert_eq!(
        points(poly),
        vec![(0.0, 0.0), (4.0, 0.0), (0.0, 3.0), (0.0, 0.0)]
    );
}

#[test]
fn zero_length_segments_are_kept() {
    let a = seg((0.0, 0.0), (1.0, 0.0), 1.0);
    let b = seg((1.0, 0.0), (2.0, 0.0), 1.0);
    let z = seg((1.0, 0.0), (1.0, 0.0), 1.0);

    // Chaining starts from the last segment, so the zero-length one ends up
    // in the middle.
    let out = polylinize(vec![a.clone(), b.clone(), z.clone()], &Options::default()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(
        points(&out.polylines[0]),
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 0.0)]
    );

    // Here `b` picks up `a` first, and the zero-length segment is left on its own.
    let out = polylinize(vec![a, z, b], &Options::default()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(
        points(&out.polylines[0]),
        vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]
    );
    assert_eq!(points(&out.polylines[1]), vec![(1.0, 0.0), (1.0, 0.0)]);
    assert_eq!(out.segment_count(), 3);
}

#[test]
fn exact_matching_by_default() {
    let segs = vec![
        seg((0.0, 0.0), (0.1 + 0.2, 0.0), 1.0),
        seg((0.3, 0.0), (1.0, 0.0), 1.0),
    ];
    assert_eq!(polylinize(segs.clone(), &Options::default()).unwrap().len(), 2);

    let opts = Options::with_tolerance(NotNan::new(1e-9).unwrap());
    assert_eq!(polylinize(segs, &opts).unwrap().len(), 1);
}

#[test]
fn report() {
    let out = polylinize(
        vec![
            seg((0.0, 0.0), (1.0, 0.0), 1.0),
            seg((1.0, 0.0), (2.0, 0.0), 1.0),
            seg((3.0, 0.0), (4.0, 0.0), 1.0),
            seg((0.0, 0.0), (0.0, 1.0), 0.5),
        ],
        &Options::default(),
    )
    .unwrap();

    let widths: Vec<_> = out.buckets.iter().map(|b| b.width.into_inner()).collect();
    assert_eq!(widths, vec![0.5, 1.0]);
    assert_eq!(out.buckets[1].segments, 3);
    assert_eq!(out.buckets[1].shared_endpoints, 1);
    assert_eq!(out.buckets[1].polylines, 2);
    assert_eq!(out.buckets[0].polylines, 1);
}
