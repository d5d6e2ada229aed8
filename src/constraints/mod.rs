use crate::objects::body::Body;

pub mod spring;

// Re-export the constraint types for easier access
pub use spring::Spring;

/// A force-producing link between two bodies, evaluated by the engine
/// before integration on every update.
pub trait Constraint {
    /// Accumulates this constraint's forces onto the bodies it links.
    /// Takes a mutable slice of all bodies in the engine; missing ids are
    /// ignored.
    fn apply(&self, bodies: &mut [Body]);

    /// Ids of the two linked bodies.
    fn bodies(&self) -> (&str, &str);
}

/// Looks up two distinct bodies by id and returns mutable references to both.
/// Returns `None` if the ids are equal or either body is missing.
pub(crate) fn body_pair_mut<'a>(
    bodies: &'a mut [Body],
    id_a: &str,
    id_b: &str,
) -> Option<(&'a mut Body, &'a mut Body)> {
    if id_a == id_b {
        return None;
    }
    let idx_a = bodies.iter().position(|b| b.id == id_a)?;
    let idx_b = bodies.iter().position(|b| b.id == id_b)?;

    // split_at_mut needs the lower index first
    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        Some((&mut slice_a[idx_a], &mut slice_b[0]))
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        Some((&mut slice_a[0], &mut slice_b[idx_b]))
    }
}
