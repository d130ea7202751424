use crate::float::Float;

struct Point<T: Float> {
    x: T,
    y: T,
}

/// Starting from `start`, which must already lie inside a dip, walk right while the
/// curve keeps decreasing and return the index of the dip's bottom.
pub fn descend_to_minimum<T: Float>(data: &[T], start: usize) -> usize {
    let mut idx = start;
    while idx + 1 < data.len() && data[idx + 1] < data[idx] {
        idx += 1;
    }
    idx
}

/// Refine the extremum at `idx` to sub-sample precision by fitting a parabola through
/// `data[idx - 1..=idx + 1]`. Returns the integer position unchanged when `idx` sits on
/// either edge of `data` or the three points are collinear.
pub fn refine_extremum<T: Float>(data: &[T], idx: usize) -> T {
    let position = T::from_count(idx);
    if idx == 0 || idx + 1 >= data.len() {
        return position;
    }

    let left = data[idx - 1];
    let center = data[idx];
    let right = data[idx + 1];
    let denominator = T::from_lit(2.0) * center - left - right;
    if denominator == T::zero() || denominator.is_nan() {
        return position;
    }

    quadratic_interpolation(
        Point {
            x: position - T::one(),
            y: left,
        },
        Point {
            x: position,
            y: center,
        },
        Point {
            x: position + T::one(),
            y: right,
        },
    )
    .x
}

fn quadratic_interpolation<T: Float>(
    left: Point<T>,
    center: Point<T>,
    right: Point<T>,
) -> Point<T> {
    let shift = T::from_lit(0.5) * (right.y - left.y)
        / (T::from_lit(2.0) * center.y - left.y - right.y);
    let x = center.x + shift;
    let y = center.y + T::from_lit(0.25) * (right.y - left.y) * shift;
    Point { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_correction() {
        let point = quadratic_interpolation(
            Point {
                x: -1.5,
                y: -(1.5 * 1.5) + 4.0,
            },
            Point {
                x: -0.5,
                y: -(0.5 * 0.5) + 4.0,
            },
            Point {
                x: 0.5,
                y: -(0.5 * 0.5) + 4.0,
            },
        );
        assert_eq!(point.x, 0.0);
        assert_eq!(point.y, 4.0);
    }

    #[test]
    fn minimum_of_sampled_parabola() {
        // (x - 3.25)^2 sampled at integers; bottom is at x = 3.
        let data: Vec<f64> = (0..8).map(|x| (x as f64 - 3.25).powi(2)).collect();
        let idx = descend_to_minimum(&data, 1);
        assert_eq!(idx, 3);
        assert!((refine_extremum(&data, idx) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn edges_and_flat_runs_are_not_refined() {
        let data = [1.0f64, 0.5, 0.5, 0.5];
        assert_eq!(refine_extremum(&data, 0), 0.0);
        assert_eq!(refine_extremum(&data, 3), 3.0);
        // Collinear neighbours give a zero denominator.
        assert_eq!(refine_extremum(&data, 2), 2.0);
    }
}
