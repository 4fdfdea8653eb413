use briggs_math::FixedFormat;

// Exact-word checks for the Q*.40 codec. Values chosen to be exactly
// representable in binary so there is no cross-platform rounding ambiguity.

#[test]
fn test_q40_encoding_exact_rationals() {
    let f = FixedFormat::default();
    let q: u64 = 1 << 40;

    let cases: [(f64, u64); 11] = [
        (0.0, 0),
        (1.0, q),
        (0.5, q / 2),
        (0.25, q / 4),
        (0.75, 3 * (q / 4)),
        (1.25, q + q / 4),
        (3.375, 3 * q + 3 * (q / 8)),
        (-1.0, q.wrapping_neg()),
        (-0.5, (q / 2).wrapping_neg()),
        (-1.25, (q + q / 4).wrapping_neg()),
        (-7.75, (7 * q + 3 * (q / 4)).wrapping_neg()),
    ];

    for (x, expected) in cases {
        assert_eq!(f.encode(x), expected, "encoding mismatch for {}", x);
    }
}

#[test]
fn test_q40_roundtrip_exact_rationals() {
    let f = FixedFormat::default();
    for &x in &[0.0, 1.0, -1.0, 0.5, -0.5, 2.625, -2.625, 7.5, -7.5] {
        assert_eq!(f.decode(f.encode(x)), x, "dyadic roundtrip not exact: {}", x);
    }
}
