pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;
const MIN_SPAN_M: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotWindow {
    /// Smallest padded window holding the origin and every point, widened on
    /// one axis so the x:y span ratio is [`DISTANCE_TO_HEIGHT_RATIO`].
    /// Non-finite points are ignored.
    pub fn fit<'a>(points: impl IntoIterator<Item = &'a (f64, f64)>) -> Self {
        let (mut x_lo, mut x_hi, mut y_lo, mut y_hi) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
        for &(x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            x_lo = x_lo.min(x);
            x_hi = x_hi.max(x);
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }

        let raw_x_span = (x_hi - x_lo).max(MIN_SPAN_M);
        let raw_y_span = (y_hi - y_lo).max(MIN_SPAN_M);
        let mut x_span = raw_x_span * (1.0 + 2.0 * X_PADDING_RATIO);
        let mut y_span = raw_y_span * (1.0 + 2.0 * Y_PADDING_RATIO);

        if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
            x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
        }

        let x_mid = 0.5 * (x_lo + x_hi);
        let y_mid = 0.5 * (y_lo + y_hi);
        Self {
            x_min: x_mid - 0.5 * x_span,
            x_max: x_mid + 0.5 * x_span,
            y_min: y_mid - 0.5 * y_span,
            y_max: y_mid + 0.5 * y_span,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(w: &PlotWindow) -> f64 {
        (w.x_max - w.x_min) / (w.y_max - w.y_min)
    }

    #[test]
    fn keeps_fixed_ratio_for_flat_and_tall_arcs() {
        let flat = PlotWindow::fit(&[(800.0, 3.0), (400.0, 120.0)]);
        let tall = PlotWindow::fit(&[(5.0, 400.0), (10.0, 2.0)]);

        assert!((ratio(&flat) - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-12);
        assert!((ratio(&tall) - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-12);
    }

    #[test]
    fn holds_origin_and_negative_points() {
        let points = [(-120.0, -4.0), (-60.0, 30.0)];
        let w = PlotWindow::fit(&points);

        assert!(w.contains(0.0, 0.0));
        for &(x, y) in &points {
            assert!(w.contains(x, y), "({x}, {y}) outside {w:?}");
        }
        assert!(w.x_min < -120.0 && w.y_min < -4.0);
    }

    #[test]
    fn empty_input_gives_minimum_window() {
        let w = PlotWindow::fit(&[]);
        assert!(w.contains(0.0, 0.0));
        assert!(w.x_max - w.x_min >= MIN_SPAN_M);
    }

    #[test]
    fn skips_non_finite_points() {
        let w = PlotWindow::fit(&[(f64::NAN, 1.0), (10.0, f64::INFINITY), (10.0, 5.0)]);
        assert!(w.x_max.is_finite() && w.y_max.is_finite());
        assert!(w.contains(10.0, 5.0));
    }
}
