/// Piecewise-linear function through `N` points, flat beyond both ends
#[derive(Clone, Copy, Debug)]
pub struct LinearPieceCurve<const N: usize> {
    points: [(f32, f32); N],
}

impl<const N: usize> LinearPieceCurve<N> {
    /// `(x, y)` pairs sorted by ascending `x`
    #[must_use]
    pub const fn new(points: [(f32, f32); N]) -> Self {
        assert!(N != 0, "a curve needs at least one point");
        Self { points }
    }

    #[must_use]
    pub fn get_output(&self, input: f32) -> f32 {
        let (first_x, first_y) = self.points[0];
        if input <= first_x {
            return first_y;
        }

        self.points
            .windows(2)
            .find(|seg| seg[1].0 > input)
            .map_or(self.points[N - 1].1, |seg| {
                let ((x0, y0), (x1, y1)) = (seg[0], seg[1]);
                y0 + (y1 - y0) * (input - x0) / (x1 - x0)
            })
    }

    /// Smallest and largest output the curve can produce
    #[must_use]
    pub fn output_range(&self) -> (f32, f32) {
        self.points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: LinearPieceCurve<2> = LinearPieceCurve::new([(0.0, 1.0), (10.0, 0.4)]);

    #[test]
    fn clamps_and_interpolates() {
        assert_eq!(FADE.get_output(-5.0), 1.0);
        assert_eq!(FADE.get_output(0.0), 1.0);
        assert!((FADE.get_output(5.0) - 0.7).abs() < 1e-6);
        assert_eq!(FADE.get_output(10.0), 0.4);
        assert_eq!(FADE.get_output(1e6), 0.4);
        assert_eq!(FADE.output_range(), (0.4, 1.0));
    }
}
