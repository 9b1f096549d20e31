use super::types::PlotArea;

/// Linear value axis mapped onto the vertical extent of the plot.
///
/// The domain always contains zero so bars and areas have a baseline to
/// hang from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    domain_min: f64,
    domain_max: f64,
    top: f32,
    bottom: f32,
}

impl ValueScale {
    pub fn from_values(values: impl IntoIterator<Item = f64>, plot: &PlotArea) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self {
            domain_min: min,
            domain_max: max,
            top: plot.y,
            bottom: plot.bottom(),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    pub fn range(&self) -> f64 {
        self.domain_max - self.domain_min
    }

    /// Every value is zero, so there is nothing to stretch.
    pub fn is_flat(&self) -> bool {
        self.range() <= 0.0
    }

    pub fn value_to_y(&self, value: f64) -> f32 {
        if self.is_flat() {
            // all values map to the baseline
            return self.bottom;
        }
        let plot_height = f64::from(self.bottom - self.top);
        (f64::from(self.bottom) - (value - self.domain_min) * (plot_height / self.range())) as f32
    }

    pub fn baseline(&self) -> f32 {
        self.value_to_y(0.0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if self.is_flat() || count == 0 {
            return vec![self.domain_min];
        }
        let step = self.range() / count as f64;
        (0..=count)
            .map(|i| self.domain_min + step * i as f64)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMode {
    /// Line, area and scatter: first and last category sit on the plot edges.
    Points,
    /// Bars: each category owns an equal-width slot.
    Groups,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryAxis {
    x: f32,
    width: f32,
    count: usize,
    mode: CategoryMode,
}

impl CategoryAxis {
    pub fn new(plot: &PlotArea, count: usize, mode: CategoryMode) -> Self {
        Self {
            x: plot.x,
            width: plot.width,
            count,
            mode,
        }
    }

    pub fn group_width(&self) -> f32 {
        self.width / self.count.max(1) as f32
    }

    pub fn spacing(&self) -> f32 {
        match self.mode {
            CategoryMode::Groups => self.group_width(),
            CategoryMode::Points if self.count > 1 => self.width / (self.count - 1) as f32,
            CategoryMode::Points => 0.0,
        }
    }

    pub fn position(&self, index: usize) -> f32 {
        match self.mode {
            CategoryMode::Groups => self.x + self.group_width() * (index as f32 + 0.5),
            // a single point is centered instead of dividing by zero
            CategoryMode::Points if self.count <= 1 => self.x + self.width / 2.0,
            CategoryMode::Points => self.x + self.spacing() * index as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plot() -> PlotArea {
        PlotArea {
            x: 80.0,
            y: 60.0,
            width: 400.0,
            height: 200.0,
        }
    }

    #[test]
    fn domain_includes_zero() {
        let scale = ValueScale::from_values([10.0, 30.0], &plot());
        assert_eq!(scale.domain(), (0.0, 30.0));
        assert_relative_eq!(scale.baseline(), 260.0);
        assert_relative_eq!(scale.value_to_y(30.0), 60.0);
        assert_relative_eq!(scale.value_to_y(15.0), 160.0);
    }

    #[test]
    fn mixed_sign_baseline_sits_inside_plot() {
        let scale = ValueScale::from_values([-50.0, 150.0], &plot());
        assert_relative_eq!(scale.baseline(), 210.0);
        assert_relative_eq!(scale.value_to_y(-50.0), 260.0);
    }

    #[test]
    fn flat_domain_maps_to_baseline() {
        let scale = ValueScale::from_values([0.0, 0.0], &plot());
        assert!(scale.is_flat());
        assert_relative_eq!(scale.value_to_y(0.0), 260.0);
        assert_eq!(scale.ticks(5), vec![0.0]);
    }

    #[test]
    fn ticks_span_domain() {
        let scale = ValueScale::from_values([100.0], &plot());
        assert_eq!(scale.ticks(4), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn category_positions() {
        let points = CategoryAxis::new(&plot(), 5, CategoryMode::Points);
        assert_relative_eq!(points.position(0), 80.0);
        assert_relative_eq!(points.position(4), 480.0);

        let single = CategoryAxis::new(&plot(), 1, CategoryMode::Points);
        assert_relative_eq!(single.position(0), 280.0);

        let groups = CategoryAxis::new(&plot(), 4, CategoryMode::Groups);
        assert_relative_eq!(groups.group_width(), 100.0);
        assert_relative_eq!(groups.position(0), 130.0);
    }
}
