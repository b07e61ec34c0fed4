use compat_version::{CompatibilityVersion, VersionRange};
use proptest::prelude::*;

fn concrete() -> impl Strategy<Value = CompatibilityVersion> {
    (0u32..20, 0u32..40).prop_map(|(major, minor)| CompatibilityVersion::new(major, minor))
}

#[test]
fn test_latest_outside_every_bounded_range() {
    let range = VersionRange::through(CompatibilityVersion::new(99, 99));
    assert!(!range.contains(CompatibilityVersion::LATEST));
}

proptest! {
    #[test]
    fn test_order_is_lexicographic(a in concrete(), b in concrete()) {
        let expected = (a.major(), a.minor()).cmp(&(b.major(), b.minor()));
        prop_assert_eq!(a.cmp(&b), expected);
    }

    #[test]
    fn test_display_parse_roundtrip(v in concrete()) {
        let parsed: CompatibilityVersion = v.to_string().parse().unwrap();
        prop_assert_eq!(parsed, v);
    }

    #[test]
    fn test_next_minor_is_successor(v in concrete(), w in concrete()) {
        let next = v.next_minor();
        prop_assert!(next > v);
        // nothing fits strictly between v and next_minor(v)
        prop_assert!(!(w > v && w < next));
    }

    #[test]
    fn test_through_matches_le(last in concrete(), v in concrete()) {
        let range = VersionRange::through(last);
        prop_assert_eq!(range.contains(v), v <= last);
    }

    #[test]
    fn test_overlap_is_symmetric(
        a in concrete(), b in concrete(), c in concrete(), d in concrete()
    ) {
        if let (Ok(x), Ok(y)) = (VersionRange::new(a, b), VersionRange::new(c, d)) {
            prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
            // overlap means some endpoint of one lies in the other
            let witness = x.contains(y.introduced_in()) || y.contains(x.introduced_in());
            prop_assert_eq!(x.overlaps(&y), witness);
        }
    }
}
