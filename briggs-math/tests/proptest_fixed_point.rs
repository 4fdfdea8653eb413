use briggs_math::FixedFormat;
use proptest::prelude::*;

// Property 1: Roundtrip within the supported magnitude range loses at most
// one unit in the last place (the codec truncates, it does not round).
proptest! {
    #[test]
    fn prop_roundtrip_within_epsilon(x in -8.0f64..8.0) {
        let f = FixedFormat::default();
        let rt = f.decode(f.encode(x));
        let diff = (x - rt).abs();
        prop_assert!(
            diff <= f.epsilon(),
            "roundtrip failed: {} vs {} (diff {})",
            x, rt, diff
        );
    }
}

// Property 2: The bound holds for every fraction width, not just the
// reference Q*.40 configuration.
proptest! {
    #[test]
    fn prop_roundtrip_any_width(x in -8.0f64..8.0, bits in 1u32..=60) {
        let f = FixedFormat::new(bits).unwrap();
        let diff = (x - f.decode(f.encode(x))).abs();
        prop_assert!(
            diff <= f.epsilon(),
            "roundtrip failed at width {}: {} (diff {})",
            bits, x, diff
        );
    }
}

// Property 3: Encoding is deterministic and sign-symmetric.
proptest! {
    #[test]
    fn prop_encode_deterministic_and_odd(x in 0.0f64..8.0) {
        let f = FixedFormat::default();
        prop_assert_eq!(f.encode(x), f.encode(x));
        prop_assert_eq!(f.encode(-x), f.encode(x).wrapping_neg());
    }
}
