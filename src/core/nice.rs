//! Round-number tick math for continuous numeric axes.
//!
//! Increments are picked from `{1, 2, 5} × 10^k` using the usual
//! `√50 / √10 / √2` error thresholds, so a requested tick count is treated as a
//! hint rather than an exact target.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// `(first_index, last_index, increment)`; a negative increment means the
/// ticks are `index / -increment`, which keeps small steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        i1 = (start * inc).round();
        i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        increment = inc;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, increment)
}

/// Signed tick increment, see [`tick_spec`] for the negative convention.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Distance between adjacent ticks for `count` ticks across `[start, stop]`.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let increment = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let magnitude = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reverse { -magnitude } else { magnitude }
}

/// Round-number tick values inside `[start, stop]`, roughly `count` of them.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, increment) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if i1.is_nan() || i2.is_nan() || i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let index = if reverse { i2 - i as f64 } else { i1 + i as f64 };
            if increment < 0.0 {
                index / -increment
            } else {
                index * increment
            }
        })
        .collect()
}

/// Extends `[start, stop]` outward to multiples of the tick increment.
///
/// Repeats until the increment stops changing, at most ten passes.
#[must_use]
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if start == stop || !start.is_finite() || !stop.is_finite() {
        return (start, stop);
    }

    let reverse = stop < start;
    let (mut low, mut high) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous_step: Option<f64> = None;

    for _ in 0..10 {
        let step = tick_increment(low, high, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            low = (low / step).floor() * step;
            high = (high / step).ceil() * step;
        } else if step < 0.0 {
            low = (low * step).ceil() / step;
            high = (high * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if reverse { (high, low) } else { (low, high) }
}

/// Decimal exponent of `value` as written in scientific notation.
fn decimal_exponent(value: f64) -> i32 {
    if value == 0.0 || !value.is_finite() {
        return 0;
    }
    let formatted = format!("{:e}", value.abs());
    formatted
        .rsplit_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .unwrap_or(0)
}

/// Fraction digits needed to print multiples of `step` without loss.
#[must_use]
pub fn precision_fixed(step: f64) -> usize {
    (-decimal_exponent(step)).max(0) as usize
}

/// Rounds `value` to `digits` fraction digits.
#[must_use]
pub fn round_to(value: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

/// Fraction digits for labels on an axis ticked every `step`.
///
/// Rounding the step first keeps float noise such as `0.000799999` from
/// asking for an extra digit.
#[must_use]
pub fn label_precision(step: f64) -> usize {
    precision_fixed(round_to(step, precision_fixed(step)))
}

/// Fixed-point text without a negative sign on zero.
#[must_use]
pub fn format_fixed(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        return text[1..].to_owned();
    }
    text
}
