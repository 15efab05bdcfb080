//! Mirror-reflection index mapping at signal boundaries.

/// Folds every value into `[minx, maxx]` by repeated mirror reflection at
/// the bounds, then subtracts 1 to convert the 1-based reflected
/// coordinate into a 0-based index.
///
/// Values already inside the range pass through (minus the 1 shift).
/// Each reflection strictly reduces the out-of-bound margin, so the loop
/// terminates whenever `maxx > minx`; the caller must guarantee that
/// precondition.
pub fn reflect(xs: &[f64], minx: f64, maxx: f64) -> Vec<f64> {
    debug_assert!(maxx > minx, "reflection bounds must satisfy maxx > minx");

    let mut ys = xs.to_vec();
    loop {
        let mut changed = false;
        for y in ys.iter_mut() {
            if *y > maxx {
                *y = 2.0 * maxx - *y;
                changed = true;
            }
        }
        for y in ys.iter_mut() {
            if *y < minx {
                *y = 2.0 * minx - *y;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for y in ys.iter_mut() {
        *y -= 1.0;
    }
    ys
}
