use rand::Rng;
use rand_distr::{Distribution, Triangular};

/// Draws one value from the triangular distribution spanned by a
/// three-point impact estimate.
///
/// - Degenerate bounds (`optimistic == pessimistic`) return the bound.
/// - Inverted or out-of-order triplets are rejected.
pub fn sample_triangular<R: Rng + ?Sized>(
    optimistic: f32,
    most_likely: f32,
    pessimistic: f32,
    rng: &mut R,
) -> Result<f32, ()> {
    if pessimistic < optimistic {
        return Err(());
    }
    if (pessimistic - optimistic).abs() < f32::EPSILON {
        return Ok(optimistic);
    }
    if most_likely < optimistic || most_likely > pessimistic {
        return Err(());
    }

    let triangular = Triangular::new(
        optimistic as f64,
        pessimistic as f64,
        most_likely as f64,
    )
    .map_err(|_| ())?;
    Ok(triangular.sample(rng) as f32)
}
