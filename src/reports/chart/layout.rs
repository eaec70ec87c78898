const MARGIN_LEFT: f32 = 80.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_TOP: f32 = 80.0;
const MARGIN_BOTTOM: f32 = 70.0;

/// Share of a group's width taken by a single bar.
const BAR_FRACTION: f32 = 0.25;

const TICK_COUNT: usize = 5;

/// A bar in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Geometry of a grouped bar chart: one group per backend, one bar per series.
#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    width: u32,
    height: u32,
    groups: usize,
    series: usize,
    y_max: f64,
}

impl ChartLayout {
    #[must_use]
    pub fn new(width: u32, height: u32, groups: usize, series: usize, y_max: f64) -> Self {
        Self {
            width,
            height,
            groups: groups.max(1),
            series: series.max(1),
            y_max: if y_max > 0.0 { y_max } else { 1.0 },
        }
    }

    #[must_use]
    pub const fn plot_left(&self) -> f32 {
        MARGIN_LEFT
    }

    #[must_use]
    pub fn plot_right(&self) -> f32 {
        self.width as f32 - MARGIN_RIGHT
    }

    #[must_use]
    pub const fn plot_top(&self) -> f32 {
        MARGIN_TOP
    }

    #[must_use]
    pub fn plot_bottom(&self) -> f32 {
        self.height as f32 - MARGIN_BOTTOM
    }

    fn group_width(&self) -> f32 {
        (self.plot_right() - self.plot_left()) / self.groups as f32
    }

    #[must_use]
    pub fn bar_width(&self) -> f32 {
        (self.group_width() * BAR_FRACTION).max(1.0)
    }

    /// Horizontal center of a group.
    #[must_use]
    pub fn group_center(&self, group: usize) -> f32 {
        self.plot_left() + self.group_width() * (group as f32 + 0.5)
    }

    /// Vertical pixel position of `value`, clamped to the axis range.
    #[must_use]
    pub fn y_for(&self, value: f64) -> f32 {
        let fraction = (value.clamp(0.0, self.y_max) / self.y_max) as f32;
        self.plot_bottom() - fraction * (self.plot_bottom() - self.plot_top())
    }

    /// Horizontal center of one bar slot, whether or not the bar has any height.
    #[must_use]
    pub fn bar_center(&self, group: usize, series: usize) -> f32 {
        let offset = (series as f32 - (self.series as f32 - 1.0) / 2.0) * self.bar_width();
        self.group_center(group) + offset
    }

    /// Rectangle of one bar, or `None` when it would be less than a pixel tall.
    #[must_use]
    pub fn bar_rect(&self, group: usize, series: usize, value: f64) -> Option<BarRect> {
        let bar_width = self.bar_width();
        let left = self.bar_center(group, series) - bar_width / 2.0;

        let top = self.y_for(value);
        let height = (self.plot_bottom() - top).round();
        if height < 1.0 {
            return None;
        }

        Some(BarRect {
            x: left.round() as i32,
            y: top.round() as i32,
            width: bar_width.round().max(1.0) as u32,
            height: height as u32,
        })
    }

    /// Values at which to draw horizontal grid lines, from zero to the axis maximum.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        (0..=TICK_COUNT).map(|i| self.y_max * i as f64 / TICK_COUNT as f64).collect()
    }
}

/// Top of the value axis: a round number comfortably above every value.
#[must_use]
pub fn axis_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().filter(|v| v.is_finite()).fold(0.0, f64::max);
    if max <= 0.0 {
        return 1.0;
    }

    let target = max * 1.1;
    let magnitude = 10f64.powf(target.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|&candidate| candidate >= target)
        .unwrap_or(10.0 * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_axis_max_unit_scores() {
        assert!(close(axis_max([0.85, 0.12]), 1.0));
    }

    #[test]
    fn test_axis_max_percentages() {
        assert!(close(axis_max([85.0, 12.0]), 100.0));
    }

    #[test]
    fn test_axis_max_small_values() {
        assert!(close(axis_max([0.12]), 0.2));
    }

    #[test]
    fn test_axis_max_empty_or_zero() {
        assert!(close(axis_max([]), 1.0));
        assert!(close(axis_max([0.0, 0.0]), 1.0));
    }

    #[test]
    fn test_y_for_bounds() {
        let layout = ChartLayout::new(1000, 600, 3, 2, 1.0);
        assert!((layout.y_for(0.0) - layout.plot_bottom()).abs() < 0.01);
        assert!((layout.y_for(1.0) - layout.plot_top()).abs() < 0.01);
        assert!((layout.y_for(5.0) - layout.plot_top()).abs() < 0.01);
        assert!((layout.y_for(-1.0) - layout.plot_bottom()).abs() < 0.01);
    }

    #[test]
    fn test_zero_value_has_no_bar() {
        let layout = ChartLayout::new(1000, 600, 2, 2, 1.0);
        assert_eq!(layout.bar_rect(0, 0, 0.0), None);
    }

    #[test]
    fn test_bars_in_group_sit_side_by_side() {
        let layout = ChartLayout::new(1000, 600, 2, 2, 1.0);
        let first = layout.bar_rect(0, 0, 0.5).unwrap();
        let second = layout.bar_rect(0, 1, 0.5).unwrap();

        assert!(first.x < second.x);
        assert!((first.x + first.width as i32 - second.x).abs() <= 1);
        assert_eq!(first.y, second.y);

        let center = layout.group_center(0).round() as i32;
        assert!(first.x < center && center <= second.x + 1);
    }

    #[test]
    fn test_bar_center_separates_empty_bars() {
        let layout = ChartLayout::new(1000, 600, 1, 2, 1.0);
        let first = layout.bar_center(0, 0);
        let second = layout.bar_center(0, 1);

        assert!((second - first - layout.bar_width()).abs() < 0.01);
        assert!(first < layout.group_center(0) && layout.group_center(0) < second);
    }

    #[test]
    fn test_bar_center_matches_bar_rect() {
        let layout = ChartLayout::new(1000, 600, 3, 2, 1.0);
        let bar = layout.bar_rect(2, 1, 0.5).unwrap();
        let rect_center = bar.x as f32 + bar.width as f32 / 2.0;
        assert!((rect_center - layout.bar_center(2, 1)).abs() <= 1.0);
    }

    #[test]
    fn test_taller_value_gives_taller_bar() {
        let layout = ChartLayout::new(1000, 600, 1, 2, 1.0);
        let short = layout.bar_rect(0, 0, 0.2).unwrap();
        let tall = layout.bar_rect(0, 0, 0.8).unwrap();
        assert!(tall.height > short.height);
        assert!(tall.y < short.y);
    }

    #[test]
    fn test_ticks_span_axis() {
        let layout = ChartLayout::new(1000, 600, 1, 2, 0.5);
        let ticks = layout.ticks();
        assert_eq!(ticks.len(), 6);
        assert!(close(ticks[0], 0.0));
        assert!(close(ticks[5], 0.5));
    }
}
