use num::cast::AsPrimitive;

/// Elementwise `acc += delta`
#[inline]
pub fn add_assign<T>(acc: &mut [i64], delta: &[T])
where
    T: Into<i64> + Copy,
{
    debug_assert_eq!(acc.len(), delta.len(), "Vectors must be of the same length to accumulate.");
    for (a, &d) in acc.iter_mut().zip(delta) {
        *a += d.into();
    }
}

/// Dot product, components widened to f64
#[inline]
pub fn dot<N>(a: &[N], b: &[N]) -> f64
where
    N: AsPrimitive<f64>,
{
    debug_assert_eq!(a.len(), b.len(), "Vectors must be of the same length to compute dot product.");
    a.iter().zip(b).map(|(x, y)| x.as_() * y.as_()).sum()
}

#[inline]
pub fn norm_sq<N>(a: &[N]) -> f64
where
    N: AsPrimitive<f64>,
{
    a.iter()
        .map(|x| {
            let x: f64 = x.as_();
            x * x
        })
        .sum()
}

/// Cosine similarity
/// cosθ = A・B / sqrt(|A|² |B|²)
///
/// NaN when either vector is all zero.
pub fn cosine_similarity<N>(a: &[N], b: &[N]) -> f64
where
    N: AsPrimitive<f64>,
{
    debug_assert_eq!(a.len(), b.len(), "Vectors must be of the same length to compute similarity.");
    let (mut dot, mut xx, mut yy) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y): (f64, f64) = (x.as_(), y.as_());
        dot += x * y;
        xx += x * x;
        yy += y * y;
    }
    dot / (xx * yy).sqrt()
}
