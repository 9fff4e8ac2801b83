use approx::{abs_diff_eq, relative_eq};
use attitude::{Dcm, Euler, Quaternion, RotationSequence, Vec3};
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn sequence() -> impl Strategy<Value = RotationSequence> {
    (0u8..12).prop_map(|tag| RotationSequence::try_from(tag).unwrap())
}

fn angle() -> impl Strategy<Value = f64> {
    -PI..PI
}

fn unit_quaternion() -> impl Strategy<Value = Quaternion> {
    (-1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64)
        .prop_filter("not too short", |(w, x, y, z)| w * w + x * x + y * y + z * z > 1e-3)
        .prop_map(|(w, x, y, z)| Quaternion::new(w, x, y, z).normalized().unwrap())
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (-10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn euler_paths_agree(seq in sequence(), a1 in angle(), a2 in angle(), a3 in angle()) {
        let euler = Euler::new(a1, a2, a3, seq);
        let via_quaternion = Quaternion::from_euler(&euler).to_dcm().unwrap();
        prop_assert!(abs_diff_eq!(via_quaternion, Dcm::from_euler(&euler), epsilon = 1e-9));
    }

    #[test]
    fn dcm_quaternion_round_trip(q in unit_quaternion()) {
        let dcm = q.to_dcm().unwrap();
        let back = Quaternion::from_dcm(&dcm);
        prop_assert!(relative_eq!(back.magnitude(), 1.0, epsilon = 1e-12));
        prop_assert!(abs_diff_eq!(back.to_dcm().unwrap(), dcm, epsilon = 1e-9));
        // Shepperd returns q or -q.
        prop_assert!(relative_eq!(back.dot(&q).abs(), 1.0, epsilon = 1e-9));
    }

    #[test]
    fn negated_quaternion_is_same_rotation(q in unit_quaternion()) {
        prop_assert!(abs_diff_eq!(
            q.to_dcm().unwrap(),
            (-q).to_dcm().unwrap(),
            epsilon = 1e-15
        ));
    }

    #[test]
    fn euler_extraction_round_trip(seq in sequence(), a1 in angle(), a2 in angle(), a3 in angle()) {
        let dcm = Euler::new(a1, a2, a3, seq).to_dcm();
        let back = dcm.to_euler(seq);
        prop_assert!(abs_diff_eq!(back.to_dcm(), dcm, epsilon = 1e-9));

        let middle = back.angle2();
        if seq.is_proper() {
            prop_assert!((0.0..=PI).contains(&middle));
        } else {
            prop_assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&middle));
        }
    }

    #[test]
    fn euler_extraction_round_trip_near_lock(
        seq in sequence(),
        a1 in angle(),
        a3 in angle(),
        offset in -1e-6..1e-6f64,
        upper in any::<bool>(),
    ) {
        let lock = match (seq.is_proper(), upper) {
            (true, false) => 0.0,
            (true, true) => PI,
            (false, false) => -FRAC_PI_2,
            (false, true) => FRAC_PI_2,
        };
        let dcm = Quaternion::from_euler(&Euler::new(a1, lock + offset, a3, seq))
            .to_dcm()
            .unwrap();
        let back = dcm.to_euler(seq);
        prop_assert!(abs_diff_eq!(back.to_dcm(), dcm, epsilon = 1e-9));
    }

    #[test]
    fn quaternion_and_dcm_rotate_alike(q in unit_quaternion(), v in vec3()) {
        let by_quaternion = q.rotate_vector(&v).unwrap();
        let by_dcm = q.to_dcm().unwrap() * v;
        prop_assert!(abs_diff_eq!(by_quaternion, by_dcm, epsilon = 1e-9));
        prop_assert!(relative_eq!(by_dcm.magnitude(), v.magnitude(), epsilon = 1e-9));
    }

    #[test]
    fn product_composes_rotations(p in unit_quaternion(), q in unit_quaternion()) {
        let composed = (p * q).to_dcm().unwrap();
        let product = p.to_dcm().unwrap() * q.to_dcm().unwrap();
        prop_assert!(abs_diff_eq!(composed, product, epsilon = 1e-9));
    }

    #[test]
    fn shortest_arc_maps_a_onto_b(a in vec3(), b in vec3()) {
        prop_assume!(a.magnitude() > 1e-3 && b.magnitude() > 1e-3);
        let q = Quaternion::shortest_arc(&a, &b).unwrap();
        let rotated = q.rotate_vector(&a.normalized().unwrap()).unwrap();
        prop_assert!(abs_diff_eq!(rotated, b.normalized().unwrap(), epsilon = 1e-6));
    }
}
