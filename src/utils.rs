#![allow(dead_code)]

/// Return the maximum value of `vals` along with every index attaining it.
pub fn argmaxima(vals: &[f64]) -> (Vec<usize>, f64) {
    let mut max = ::std::f64::MIN;
    let mut ixs = vec![];

    for (i, &v) in vals.iter().enumerate() {
        if (v - max).abs() < 1e-7 {
            ixs.push(i);
        } else if v > max {
            max = v;
            ixs.clear();
            ixs.push(i);
        }
    }

    (ixs, max)
}

/// Return the first index attaining the maximum of `vals`.
pub fn argmax_first(vals: &[f64]) -> (usize, f64) {
    vals.iter().enumerate().fold(
        (0, ::std::f64::MIN),
        |(i, x), (j, &y)| {
            if y - x > 1e-7 {
                (j, y)
            } else {
                (i, x)
            }
        },
    )
}
