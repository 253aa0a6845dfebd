use super::Year;

/// Linear year -> pixel mapping over `[min_year, max_year + step / 2]`,
/// inverted so later years sit higher on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(min_year: f64, max_year: f64, year_step: f64, height: f64) -> Self {
        Self {
            domain: (min_year, max_year + year_step / 2.0),
            range: (height, 0.0),
        }
    }

    pub fn apply(&self, year: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (year - d0) / span };
        r0 + t * (r1 - r0)
    }
}

/// Vertical extent of one entity under a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VerticalSpan {
    pub y0: f64,
    pub y1: f64,
    pub y_mid: f64,
    pub height: f64,
}

impl VerticalSpan {
    pub fn new(scale: &TimeScale, year_start: f64, year_finish: f64) -> Self {
        let y0 = scale.apply(year_finish);
        let y1 = scale.apply(year_start);
        Self {
            y0,
            y1,
            y_mid: (y0 + y1) / 2.0,
            height: (y1 - y0).abs(),
        }
    }
}

/// Upper bound on generated axis ticks.
pub const MAX_YEAR_TICKS: usize = 10_000;

/// Axis ticks every `year_step` from `min_year` up to and including `max_year`.
///
/// Yields nothing when the range would need more than [`MAX_YEAR_TICKS`] ticks.
pub fn compute_years(min_year: f64, max_year: f64, year_step: f64) -> Vec<Year> {
    if year_step <= 0.0 || !min_year.is_finite() || !max_year.is_finite() {
        return Vec::new();
    }
    let ticks = ((max_year - min_year) / year_step).floor() + 1.0;
    if ticks > MAX_YEAR_TICKS as f64 {
        tracing::warn!(min_year, max_year, year_step, "year axis too long, skipping ticks");
        return Vec::new();
    }
    let mut years = Vec::new();
    let mut idx = 0usize;
    loop {
        let value = min_year + idx as f64 * year_step;
        if value > max_year {
            break;
        }
        years.push(Year { value, idx });
        idx += 1;
    }
    years
}
