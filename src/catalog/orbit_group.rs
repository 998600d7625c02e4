use std::collections::HashMap;

use crate::catalog::Satellite;

/// Coarse orbital signature shared by satellites drawn on the same track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrbitKey {
    pub class: Option<String>,
    pub orbit_type: Option<String>,
    pub inclination_deg: i64,
}

impl OrbitKey {
    pub fn of(sat: &Satellite) -> Self {
        Self {
            class: sat.orbit_class_label.clone(),
            orbit_type: sat.orbit_type.clone(),
            inclination_deg: round_half_up(sat.inclination_deg),
        }
    }
}

/// Spread the members of each orbit group evenly along their shared track.
///
/// Member `j` of a group of `n` (in catalog order) gets phase `j / n`.
pub fn assign_phases(satellites: &mut [Satellite]) {
    let mut groups: HashMap<OrbitKey, Vec<usize>> = HashMap::new();
    for (i, sat) in satellites.iter().enumerate() {
        groups.entry(OrbitKey::of(sat)).or_default().push(i);
    }

    for members in groups.values() {
        let n = members.len() as f64;
        for (j, &index) in members.iter().enumerate() {
            satellites[index].phase = j as f64 / n;
        }
    }

    log::debug!(
        "Assigned phases across {} orbit groups ({} satellites)",
        groups.len(),
        satellites.len()
    );
}

// Halves round towards positive infinity, so -2.5 groups with -2.
// Inclinations are already finite once parsed.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackParams;

    fn sat(name: &str, class: Option<&str>, orbit_type: &str, inclination: f64) -> Satellite {
        crate::catalog::test_support::bare_satellite(
            name,
            class,
            Some(orbit_type),
            inclination,
            &TrackParams::default(),
        )
    }

    #[test]
    fn test_even_phases_in_group() {
        let mut sats: Vec<Satellite> = (0..4)
            .map(|i| {
                sat(
                    &format!("STARLINK-{i}"),
                    Some("LEO"),
                    "Non-Polar Inclined",
                    53.05 + i as f64 * 0.1,
                )
            })
            .collect();
        assign_phases(&mut sats);

        let phases: Vec<f64> = sats.iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_groups_are_independent() {
        let mut sats = vec![
            sat("A", Some("LEO"), "Sun-Synchronous", 97.6),
            sat("B", Some("GEO"), "", 0.1),
            sat("C", Some("LEO"), "Sun-Synchronous", 97.9),
            sat("D", Some("LEO"), "Polar", 97.6),
            sat("E", Some("LEO"), "Sun-Synchronous", 98.4),
        ];
        assign_phases(&mut sats);

        // A, C and E share the key (LEO, Sun-Synchronous, 98)
        assert_eq!(sats[0].phase, 0.0);
        assert_eq!(sats[2].phase, 1.0 / 3.0);
        assert_eq!(sats[4].phase, 2.0 / 3.0);
        // Singletons sit at the start of their track
        assert_eq!(sats[1].phase, 0.0);
        assert_eq!(sats[3].phase, 0.0);
    }

    #[test]
    fn test_unrecognised_classes_stay_apart() {
        let mut sats = vec![
            sat("Molniya 1-93", Some("Molniya"), "", 62.8),
            sat("Tundra 1", Some("HEO"), "", 62.8),
            sat("Unclassed", None, "", 62.8),
            sat("Molniya 2-10", Some("Molniya"), "", 63.1),
        ];
        assign_phases(&mut sats);

        assert_eq!(sats[0].orbit_class, None);
        assert_eq!(sats[1].orbit_class, None);
        assert_eq!(sats[0].phase, 0.0);
        assert_eq!(sats[1].phase, 0.0);
        assert_eq!(sats[2].phase, 0.0);
        assert_eq!(sats[3].phase, 0.5);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(51.5), 52);
        assert_eq!(round_half_up(51.49), 51);
        assert_eq!(round_half_up(-2.5), -2);
    }
}
