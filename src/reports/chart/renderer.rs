use super::{ChartLayout, ChartSettings, LOG_TARGET, axis_max};
use crate::Result;
use crate::metrics::{MetricDef, charted_metrics};
use crate::reports::ReportTable;
use ab_glyph::{FontVec, PxScale};
use camino::{Utf8Path, Utf8PathBuf};
use core::fmt;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use ohno::IntoAppError;
use std::fs;

/// Fonts tried, in order, when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([90, 90, 90]);
const GRID: Rgb<u8> = Rgb([229, 229, 229]);
const TEXT: Rgb<u8> = Rgb([40, 40, 40]);

/// Bar colors per series: mediumseagreen, salmon, then extras.
const SERIES_COLORS: &[Rgb<u8>] = &[Rgb([60, 179, 113]), Rgb([250, 128, 114]), Rgb([70, 130, 180]), Rgb([218, 165, 32])];

const TITLE_SCALE: f32 = 22.0;
const LABEL_SCALE: f32 = 15.0;
const VALUE_SCALE: f32 = 13.0;

/// Gap between the top of a bar and the top of its value label.
const VALUE_LABEL_OFFSET: f32 = 18.0;

/// Draws comparison charts with a loaded font.
pub struct ChartRenderer {
    font: FontVec,
    font_path: Utf8PathBuf,
    width: u32,
    height: u32,
}

impl fmt::Debug for ChartRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartRenderer")
            .field("font_path", &self.font_path)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl ChartRenderer {
    /// Load the configured font, or the first usable system font.
    ///
    /// The error is a human-readable reason why charts cannot be drawn.
    pub fn load(settings: &ChartSettings) -> Result<Self, String> {
        let (font_path, font) = match &settings.font {
            Some(path) => (path.clone(), load_font(path)?),
            None => SYSTEM_FONTS
                .iter()
                .map(Utf8Path::new)
                .filter(|path| path.is_file())
                .find_map(|path| match load_font(path) {
                    Ok(font) => Some((path.to_path_buf(), font)),
                    Err(reason) => {
                        log::debug!(target: LOG_TARGET, "{reason}");
                        None
                    }
                })
                .ok_or_else(|| "no usable font found, set `chart.font` in the configuration".to_string())?,
        };

        log::debug!(target: LOG_TARGET, "Drawing charts with font '{font_path}'");
        Ok(Self {
            font,
            font_path,
            width: settings.width,
            height: settings.height,
        })
    }

    /// Render the chart for `table` and write it as PNG to `path`.
    pub fn save(&self, table: &ReportTable, path: &Utf8Path) -> Result<()> {
        let image = self.render(table);
        image
            .save_with_format(path, ImageFormat::Png)
            .into_app_err_with(|| format!("writing chart to '{path}'"))
    }

    /// Draw one group of bars per backend, one bar per charted metric.
    #[must_use]
    pub fn render(&self, table: &ReportTable) -> RgbImage {
        let metrics = charted_metrics();
        let series: Vec<Vec<f64>> = metrics
            .iter()
            .map(|def| {
                table
                    .rows()
                    .iter()
                    .map(|row| row.record.get(def.label).map_or(0.0, |value| value.plot_value()))
                    .collect()
            })
            .collect();

        let y_max = axis_max(series.iter().flatten().copied());
        let layout = ChartLayout::new(self.width, self.height, table.len(), metrics.len(), y_max);
        let mut image = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

        self.draw_title(&mut image, &metrics);
        self.draw_axes(&mut image, &layout);

        for (series_index, values) in series.iter().enumerate() {
            let color = series_color(series_index);
            for (group, &value) in values.iter().enumerate() {
                let bar_top = match layout.bar_rect(group, series_index, value) {
                    Some(bar) => {
                        draw_filled_rect_mut(&mut image, Rect::at(bar.x, bar.y).of_size(bar.width, bar.height), color);
                        bar.y as f32
                    }
                    None => layout.plot_bottom(),
                };

                let center = layout.bar_center(group, series_index);
                self.draw_centered(&mut image, &format_value(value), center, bar_top - VALUE_LABEL_OFFSET, VALUE_SCALE);
            }
        }

        for (group, row) in table.rows().iter().enumerate() {
            self.draw_centered(&mut image, row.backend.as_str(), layout.group_center(group), layout.plot_bottom() + 12.0, LABEL_SCALE);
        }

        self.draw_legend(&mut image, &layout, &metrics);
        image
    }

    fn draw_title(&self, image: &mut RgbImage, metrics: &[&MetricDef]) {
        let names: Vec<_> = metrics.iter().map(|def| def.label).collect();
        let title = format!("Benchmark Results: {}", names.join(" vs "));
        self.draw_centered(image, &title, self.width as f32 / 2.0, 20.0, TITLE_SCALE);
    }

    fn draw_axes(&self, image: &mut RgbImage, layout: &ChartLayout) {
        let scale = PxScale::from(VALUE_SCALE);
        for tick in layout.ticks() {
            let y = layout.y_for(tick);
            draw_line_segment_mut(image, (layout.plot_left(), y), (layout.plot_right(), y), GRID);

            let label = format_tick(tick);
            let (text_width, text_height) = text_size(scale, &self.font, &label);
            let x = layout.plot_left() as i32 - text_width as i32 - 8;
            draw_text_mut(image, TEXT, x, y as i32 - text_height as i32 / 2, scale, &self.font, &label);
        }

        draw_line_segment_mut(image, (layout.plot_left(), layout.plot_top()), (layout.plot_left(), layout.plot_bottom()), AXIS);
        draw_line_segment_mut(image, (layout.plot_left(), layout.plot_bottom()), (layout.plot_right(), layout.plot_bottom()), AXIS);

        draw_text_mut(image, TEXT, 12, layout.plot_top() as i32 - 30, PxScale::from(LABEL_SCALE), &self.font, "Score");
    }

    fn draw_legend(&self, image: &mut RgbImage, layout: &ChartLayout, metrics: &[&MetricDef]) {
        let scale = PxScale::from(LABEL_SCALE);
        let entries: Vec<String> = metrics.iter().map(|def| format!("{} ({})", def.label, def.polarity)).collect();

        let swatch = 14;
        let line_height = 22;
        let text_width = entries.iter().map(|entry| text_size(scale, &self.font, entry).0).max().unwrap_or(0);
        let box_width = text_width + swatch + 24;
        let box_height = line_height * entries.len() as u32 + 10;

        let box_x = layout.plot_right() as i32 - box_width as i32 - 8;
        let box_y = layout.plot_top() as i32 + 8;
        draw_filled_rect_mut(image, Rect::at(box_x, box_y).of_size(box_width, box_height), BACKGROUND);
        draw_hollow_rect_mut(image, Rect::at(box_x, box_y).of_size(box_width, box_height), GRID);

        for (index, entry) in entries.iter().enumerate() {
            let y = box_y + 8 + (index as u32 * line_height) as i32;
            draw_filled_rect_mut(image, Rect::at(box_x + 8, y).of_size(swatch, swatch), series_color(index));
            draw_text_mut(image, TEXT, box_x + 8 + swatch as i32 + 8, y - 1, scale, &self.font, entry);
        }
    }

    /// Draw `text` horizontally centered on `center_x` with its top at `top`.
    fn draw_centered(&self, image: &mut RgbImage, text: &str, center_x: f32, top: f32, scale: f32) {
        let scale = PxScale::from(scale);
        let (text_width, _) = text_size(scale, &self.font, text);
        let x = center_x as i32 - text_width as i32 / 2;
        draw_text_mut(image, TEXT, x, top as i32, scale, &self.font, text);
    }
}

fn load_font(path: &Utf8Path) -> Result<FontVec, String> {
    let data = fs::read(path).map_err(|e| format!("unable to read font '{path}': {e}"))?;
    FontVec::try_from_vec(data).map_err(|e| format!("'{path}' is not a usable font: {e}"))
}

fn series_color(index: usize) -> Rgb<u8> {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Bar annotation, rounded to three decimals.
fn format_value(value: f64) -> String {
    format!("{}", (value * 1000.0).round() / 1000.0)
}

fn format_tick(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
