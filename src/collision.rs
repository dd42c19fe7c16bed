use glam::DVec2;

/// Contact between two overlapping circles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit vector pointing from the first body towards the second
    pub normal: DVec2,
    /// Sum of radii minus center distance, always positive
    pub overlap: f64,
}

/// Returns a contact when the circles strictly overlap.
///
/// Touching circles (`distance == r1 + r2`) do not collide. Coincident
/// centers have no direction to separate along, so they fall back to +x.
pub fn detect(s1: DVec2, r1: f64, s2: DVec2, r2: f64, bias: f64) -> Option<Contact> {
    let delta = s2 - s1;
    let distance = delta.length();
    let combined_radius = r1 + r2;

    if distance >= combined_radius {
        return None;
    }

    let normal = if distance > bias {
        delta / distance
    } else {
        DVec2::X
    };

    Some(Contact {
        normal,
        overlap: combined_radius - distance,
    })
}

/// Returns the position corrections for both bodies.
///
/// `factor` is the share of the overlap removed, split equally; 1.0 separates
/// the pair fully in one call.
pub fn separate(contact: Contact, factor: f64) -> (DVec2, DVec2) {
    let correction = contact.normal * contact.overlap * factor / 2.0;
    (-correction, correction)
}

/// Returns vf1 and vf2 respectively
///
/// Two-body elastic response along the line of centers. `bias` floors the
/// squared distance so coincident centers cannot divide by zero.
pub fn process_collision(
    v1: DVec2,
    v2: DVec2,
    s1: DVec2,
    s2: DVec2,
    m1: f64,
    m2: f64,
    bias: f64,
) -> (DVec2, DVec2) {
    let len2 = (s1 - s2).length_squared().max(bias);

    (
        v1 - (2.0 * m2) / (m1 + m2) * ((v1 - v2).dot(s1 - s2) / len2) * (s1 - s2),
        v2 - (2.0 * m1) / (m1 + m2) * ((v2 - v1).dot(s2 - s1) / len2) * (s2 - s1),
    )
}

/// True while the two bodies are still moving towards each other
pub fn approaching(v1: DVec2, v2: DVec2, s1: DVec2, s2: DVec2) -> bool {
    (v1 - v2).dot(s1 - s2) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn head_on_equal_masses_exchange_velocities() {
        let (v1, v2) = process_collision(
            DVec2::new(5.0, 0.0),
            DVec2::new(-5.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(49.0, 0.0),
            1.0,
            1.0,
            0.1,
        );

        assert!((v1 - DVec2::new(-5.0, 0.0)).length() < EPS, "{v1:?}");
        assert!((v2 - DVec2::new(5.0, 0.0)).length() < EPS, "{v2:?}");
    }

    #[test]
    fn unequal_masses_conserve_momentum_and_energy() {
        let (s1, s2) = (DVec2::new(0.0, 0.0), DVec2::new(30.0, 40.0));
        let (u1, u2) = (DVec2::new(3.0, 1.0), DVec2::new(-2.0, -4.0));
        let (m1, m2) = (2.0, 5.0);

        let (v1, v2) = process_collision(u1, u2, s1, s2, m1, m2, 0.1);

        let p_before = u1 * m1 + u2 * m2;
        let p_after = v1 * m1 + v2 * m2;
        assert!((p_before - p_after).length() < 1e-9);

        let e_before = m1 * u1.length_squared() + m2 * u2.length_squared();
        let e_after = m1 * v1.length_squared() + m2 * v2.length_squared();
        assert!((e_before - e_after).abs() < 1e-9);
    }

    #[test]
    fn tangential_motion_is_untouched() {
        // relative velocity perpendicular to the line of centers
        let (v1, v2) = process_collision(
            DVec2::new(0.0, 3.0),
            DVec2::new(0.0, -3.0),
            DVec2::ZERO,
            DVec2::new(40.0, 0.0),
            1.0,
            1.0,
            0.1,
        );

        assert_eq!(v1, DVec2::new(0.0, 3.0));
        assert_eq!(v2, DVec2::new(0.0, -3.0));
    }

    #[test]
    fn coincident_centers_do_not_produce_nan() {
        let (v1, v2) = process_collision(
            DVec2::new(1.0, 0.0),
            DVec2::ZERO,
            DVec2::new(10.0, 10.0),
            DVec2::new(10.0, 10.0),
            1.0,
            1.0,
            0.1,
        );
        assert!(v1.is_finite() && v2.is_finite());

        let contact = detect(DVec2::ZERO, 5.0, DVec2::ZERO, 5.0, 0.1).unwrap();
        assert_eq!(contact.normal, DVec2::X);
        assert_eq!(contact.overlap, 10.0);
    }

    #[test]
    fn touching_is_not_a_collision() {
        assert!(detect(DVec2::ZERO, 25.0, DVec2::new(50.0, 0.0), 25.0, 0.1).is_none());
        assert!(detect(DVec2::ZERO, 25.0, DVec2::new(49.9, 0.0), 25.0, 0.1).is_some());
    }

    #[test]
    fn full_correction_separates_in_one_call() {
        let s1 = DVec2::ZERO;
        let s2 = DVec2::new(10.0, 0.0);
        let contact = detect(s1, 25.0, s2, 25.0, 0.1).unwrap();

        let (c1, c2) = separate(contact, 1.0);
        let distance = ((s2 + c2) - (s1 + c1)).length();

        assert!((distance - 50.0).abs() < EPS);
        assert_eq!(c1, -c2);
    }

    #[test]
    fn approaching_detects_direction() {
        let s1 = DVec2::ZERO;
        let s2 = DVec2::new(10.0, 0.0);
        assert!(approaching(DVec2::X, DVec2::ZERO, s1, s2));
        assert!(!approaching(-DVec2::X, DVec2::ZERO, s1, s2));
        assert!(!approaching(DVec2::ZERO, DVec2::ZERO, s1, s2));
    }
}
