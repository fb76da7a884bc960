use super::class_axis::ClassAxis;
use super::{Plot, PlotData, PlotMetaData};
use crate::error;
use crate::operations::image::{
    ColorMapper, Colorizer, FONT_FAMILY, RgbaColor, crop_to_content, ensure_font_registered,
};
use crate::primitives::{ClassLabels, ConfusionGrid};
use crate::util::Result;
use image::{DynamicImage, RgbImage, RgbaImage};
use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, ChartBuilder, Color, DrawingArea, IntoDrawingArea, IntoFont, Rectangle, Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{RGBColor, TextStyle};
use serde::Serialize;
use snafu::ensure;

const TITLE_FONT_SIZE: u32 = 22;
const DESCRIPTION_FONT_SIZE: u32 = 18;
const LABEL_FONT_SIZE: u32 = 16;
const ANNOTATION_FONT_SIZE: u32 = 24;
const TEXT_COLOR: RgbaColor = RgbaColor::new(38, 38, 38, 255);
const BACKGROUND_COLOR: RgbaColor = RgbaColor::white();

const MARGIN: u32 = 10;
/// Space the chart reserves below its caption
const CAPTION_GAP: u32 = 10;
const LABEL_GAP: u32 = 8;
const CELL_PADDING: u32 = 12;
const COLOR_BAR_GAP: u32 = 24;
const COLOR_BAR_WIDTH: u32 = 20;
const MAX_COLOR_BAR_TICKS: usize = 6;
const MAX_TICK_DECIMALS: f64 = 6.;

const MIN_FIGURE_SIZE: u32 = 100;
/// Whitespace around the cropped content
const FIGURE_PADDING: u32 = 10;
/// The color scale spans at least this fraction of its magnitude
const MIN_RELATIVE_SPAN: f64 = 1e-9;

/// A 2x2 confusion matrix drawn as an annotated heatmap
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfusionMatrixHeatmap {
    grid: ConfusionGrid,
    labels: ClassLabels,
    title: String,
}

impl ConfusionMatrixHeatmap {
    pub const X_AXIS_TITLE: &'static str = "Prediction";
    pub const Y_AXIS_TITLE: &'static str = "Actual";

    pub fn new(grid: ConfusionGrid, labels: ClassLabels, title: impl Into<String>) -> Self {
        Self {
            grid,
            labels,
            title: title.into(),
        }
    }

    /// The value range of the color scale.
    ///
    /// If the cells are equal, or too close to be told apart as floats, the range is widened
    /// to `[min, min + span]` where `span` is the larger of `1` and a tiny fraction of `min`.
    pub fn value_range(&self) -> (f64, f64) {
        let min = self.grid.min_value() as f64;
        let max = self.grid.max_value() as f64;

        let min_span = (min.abs() * MIN_RELATIVE_SPAN).max(1.);

        if max - min >= min_span {
            (min, max)
        } else {
            (min, min + min_span)
        }
    }

    pub fn colorizer(&self) -> Result<Colorizer> {
        let (min, max) = self.value_range();
        Colorizer::blues(min, max)
    }

    fn cells(&self, color_mapper: &ColorMapper) -> Vec<HeatmapCell> {
        self.grid
            .cells()
            .map(|(row, column, value)| HeatmapCell {
                row,
                column,
                value,
                fill: color_mapper.call(value as f64),
            })
            .collect()
    }

    /// Computes the canvas size for a nominal figure size of `width_px` x `height_px`.
    ///
    /// The canvas grows beyond the nominal size if the title, the tick labels or the
    /// annotations would not fit.
    fn frame(&self, width_px: u32, height_px: u32) -> Result<Frame> {
        let (title_width, title_height) = max_text_size([self.title.as_str()], TITLE_FONT_SIZE)?;
        let (_, description_height) = max_text_size(
            [Self::X_AXIS_TITLE, Self::Y_AXIS_TITLE],
            DESCRIPTION_FONT_SIZE,
        )?;
        let (x_tick_width, x_tick_height) = max_text_size(self.labels.x_ticks(), LABEL_FONT_SIZE)?;
        let (y_tick_width, y_tick_height) = max_text_size(self.labels.y_ticks(), LABEL_FONT_SIZE)?;

        let annotations: Vec<String> = self
            .grid
            .cells()
            .map(|(_, _, value)| value.to_string())
            .collect();
        let (annotation_width, annotation_height) = max_text_size(
            annotations.iter().map(String::as_str),
            ANNOTATION_FONT_SIZE,
        )?;

        let (min_value, max_value) = self.value_range();
        let span = max_value - min_value;
        let tick_samples = [min_value, min_value + span / 3., max_value].map(|v| format_tick(v, span));
        let (tick_width, _) = max_text_size(
            tick_samples.iter().map(String::as_str),
            LABEL_FONT_SIZE,
        )?;

        let x_label_area = x_tick_height + description_height + 4 * LABEL_GAP;
        let y_label_area = y_tick_width + description_height + 4 * LABEL_GAP;
        let color_bar_labels = tick_width + 3 * LABEL_GAP;
        let color_bar_area = COLOR_BAR_GAP + COLOR_BAR_WIDTH + color_bar_labels;

        let min_cell_width = x_tick_width.max(annotation_width) + 2 * CELL_PADDING;
        let min_cell_height = y_tick_height.max(annotation_height) + 2 * CELL_PADDING;

        let width = width_px
            .max(2 * MARGIN + y_label_area + 2 * min_cell_width + color_bar_area)
            .max(2 * MARGIN + title_width + color_bar_area);
        let height = height_px
            .max(2 * MARGIN + title_height + CAPTION_GAP + x_label_area + 2 * min_cell_height);

        Ok(Frame {
            width,
            height,
            x_label_area,
            y_label_area,
            color_bar_area,
            color_bar_labels,
        })
    }

    /// Draws the heatmap onto an uncropped canvas
    fn draw(&self, width_px: u32, height_px: u32) -> Result<RenderedHeatmap> {
        ensure!(
            width_px >= MIN_FIGURE_SIZE && height_px >= MIN_FIGURE_SIZE,
            error::Plot {
                details: format!(
                    "A figure must be at least {MIN_FIGURE_SIZE}x{MIN_FIGURE_SIZE} pixels, got {width_px}x{height_px}"
                )
            }
        );

        ensure_font_registered()?;

        let color_mapper = self.colorizer()?.create_color_mapper();
        let frame = self.frame(width_px, height_px)?;

        let mut buffer = vec![0; frame.width as usize * frame.height as usize * 3];

        let (cells, color_bar) = {
            let root = BitMapBackend::with_buffer(&mut buffer, (frame.width, frame.height))
                .into_drawing_area();

            let drawn = self.draw_on(&root, &frame, &color_mapper)?;
            root.present()?;
            drawn
        };

        let image = RgbImage::from_raw(frame.width, frame.height, buffer).ok_or_else(|| {
            error::RenderError::Plot {
                details: "The drawing buffer does not match the canvas size".to_string(),
            }
        })?;

        Ok(RenderedHeatmap {
            image: DynamicImage::ImageRgb8(image).into_rgba8(),
            cells,
            color_bar,
        })
    }

    fn draw_on(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        frame: &Frame,
        color_mapper: &ColorMapper,
    ) -> Result<(Vec<DrawnCell>, PixelBounds)> {
        root.fill(&RGBColor::from(BACKGROUND_COLOR))?;

        let (heatmap_area, color_bar_area) =
            root.split_horizontally((frame.width - frame.color_bar_area) as i32);

        let mut chart = ChartBuilder::on(&heatmap_area)
            .margin(MARGIN)
            .caption(&self.title, text_style(TITLE_FONT_SIZE))
            .x_label_area_size(frame.x_label_area)
            .y_label_area_size(frame.y_label_area)
            .build_cartesian_2d(ClassAxis, ClassAxis)?;

        let cells = self.cells(color_mapper);

        chart.draw_series(cells.iter().map(|cell| {
            let (left, right) = ClassAxis::column_band(cell.column);
            let (top, bottom) = ClassAxis::row_band(cell.row);
            Rectangle::new(
                [(left, top), (right, bottom)],
                RGBColor::from(cell.fill).filled(),
            )
        }))?;

        let annotation_font = (FONT_FAMILY, ANNOTATION_FONT_SIZE).into_font();
        chart.draw_series(cells.iter().map(|cell| {
            let (left, right) = ClassAxis::column_band(cell.column);
            let (top, bottom) = ClassAxis::row_band(cell.row);
            Text::new(
                cell.value.to_string(),
                ((left + right) / 2., (top + bottom) / 2.),
                annotation_font
                    .color(&RGBColor::from(cell.fill.contrasting_text_color()))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )
        }))?;

        let x_ticks = self.labels.x_ticks();
        let y_ticks = self.labels.y_ticks();
        let x_label_formatter = |position: &f64| ClassAxis::column_label(*position, x_ticks);
        let y_label_formatter = |position: &f64| ClassAxis::row_label(*position, y_ticks);

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(Self::X_AXIS_TITLE)
            .y_desc(Self::Y_AXIS_TITLE)
            .x_label_formatter(&x_label_formatter)
            .y_label_formatter(&y_label_formatter)
            .label_style(text_style(LABEL_FONT_SIZE))
            .axis_desc_style(text_style(DESCRIPTION_FONT_SIZE))
            .axis_style(RGBColor::from(TEXT_COLOR).stroke_width(1))
            .draw()?;

        let drawn_cells = cells
            .iter()
            .map(|cell| {
                let (left, right) = ClassAxis::column_band(cell.column);
                let (top, bottom) = ClassAxis::row_band(cell.row);
                let (x0, y0) = chart.backend_coord(&(left, top));
                let (x1, y1) = chart.backend_coord(&(right, bottom));
                DrawnCell {
                    cell: cell.clone(),
                    bounds: (x0, y0, x1, y1),
                }
            })
            .collect();

        // the color bar is as high as the cells
        let (_, plot_rows) = chart.plotting_area().get_pixel_range();
        let color_bar_area = color_bar_area.margin(
            plot_rows.start,
            frame.height as i32 - plot_rows.end,
            COLOR_BAR_GAP as i32,
            0,
        );

        let color_bar = draw_color_bar(&color_bar_area, frame, color_mapper, self.value_range())?;

        Ok((drawn_cells, color_bar))
    }
}

/// Draws a vertical legend of the color scale with the maximum at the top
fn draw_color_bar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    frame: &Frame,
    color_mapper: &ColorMapper,
    (min_value, max_value): (f64, f64),
) -> Result<PixelBounds> {
    let span = max_value - min_value;

    let mut chart = ChartBuilder::on(area)
        .right_y_label_area_size(frame.color_bar_labels)
        .build_cartesian_2d(0f64..1f64, min_value..max_value)?;

    let (columns, rows) = chart.plotting_area().get_pixel_range();
    let steps = rows.len().max(1);

    chart.draw_series((0..steps).map(|step| {
        let lower = min_value + span * step as f64 / steps as f64;
        let upper = min_value + span * (step + 1) as f64 / steps as f64;
        let color = color_mapper.call(((lower + upper) / 2.).clamp(min_value, max_value));
        Rectangle::new([(0., lower), (1., upper)], RGBColor::from(color).filled())
    }))?;

    let tick_formatter = |value: &f64| format_tick(*value, span);

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(MAX_COLOR_BAR_TICKS)
        .y_label_formatter(&tick_formatter)
        .label_style(text_style(LABEL_FONT_SIZE))
        .axis_style(RGBColor::from(TEXT_COLOR).stroke_width(1))
        .draw()?;

    Ok((columns.start, rows.start, columns.end, rows.end))
}

fn text_style(font_size: u32) -> TextStyle<'static> {
    (FONT_FAMILY, font_size)
        .into_font()
        .color(&RGBColor::from(TEXT_COLOR))
}

/// The largest width and the largest height of `texts`
fn max_text_size<'t>(
    texts: impl IntoIterator<Item = &'t str>,
    font_size: u32,
) -> Result<(u32, u32)> {
    let font = (FONT_FAMILY, font_size).into_font();

    texts.into_iter().try_fold((0, 0), |(width, height), text| {
        let (text_width, text_height) =
            font.box_size(text)
                .map_err(|error| error::RenderError::Font {
                    details: error.to_string(),
                })?;
        Ok((width.max(text_width), height.max(text_height)))
    })
}

/// Formats a color bar tick with as many decimals as a scale over `span` needs
fn format_tick(value: f64, span: f64) -> String {
    let decimals = if span >= 10. {
        0
    } else {
        (1. - span.log10().floor()).clamp(1., MAX_TICK_DECIMALS) as usize
    };

    let formatted = format!("{value:.decimals$}");

    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

impl Plot for ConfusionMatrixHeatmap {
    fn to_vega_embeddable(&self) -> Result<PlotData> {
        let x_ticks = self.labels.x_ticks();
        let y_ticks = self.labels.y_ticks();
        let (min_value, max_value) = self.value_range();

        let values: Vec<serde_json::Value> = self
            .grid
            .cells()
            .map(|(row, column, count)| {
                serde_json::json!({
                    "actual": y_ticks[row],
                    "predicted": x_ticks[column],
                    "count": count,
                })
            })
            .collect();

        let vega_spec = serde_json::json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "title": self.title,
            "data": {
                "values": values,
            },
            "encoding": {
                "x": {
                    "field": "predicted",
                    "type": "nominal",
                    "sort": x_ticks,
                    "axis": {
                        "title": Self::X_AXIS_TITLE,
                        "labelAngle": 0,
                    },
                },
                "y": {
                    "field": "actual",
                    "type": "nominal",
                    "sort": y_ticks,
                    "axis": {
                        "title": Self::Y_AXIS_TITLE,
                    },
                },
            },
            "layer": [
                {
                    "mark": "rect",
                    "encoding": {
                        "color": {
                            "field": "count",
                            "type": "quantitative",
                            "scale": {
                                "scheme": "blues",
                                "domain": [min_value, max_value],
                            },
                        },
                    },
                },
                {
                    "mark": "text",
                    "encoding": {
                        "text": {
                            "field": "count",
                            "type": "quantitative",
                            "format": "d",
                        },
                    },
                },
            ],
        });

        Ok(PlotData {
            vega_string: vega_spec.to_string(),
            metadata: PlotMetaData {
                color_scale_min: min_value,
                color_scale_max: max_value,
            },
        })
    }

    fn to_image(&self, width_px: u32, height_px: u32) -> Result<RgbaImage> {
        let rendered = self.draw(width_px, height_px)?;

        for drawn in &rendered.cells {
            tracing::trace!(
                row = drawn.cell.row,
                column = drawn.cell.column,
                value = drawn.cell.value,
                bounds = ?drawn.bounds,
                "drew heatmap cell"
            );
        }
        tracing::trace!(bounds = ?rendered.color_bar, "drew color bar");

        Ok(crop_to_content(
            &rendered.image,
            BACKGROUND_COLOR.into(),
            FIGURE_PADDING,
        ))
    }
}

/// Pixel sizes of the canvas and the areas around the cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frame {
    width: u32,
    height: u32,
    x_label_area: u32,
    y_label_area: u32,
    /// The color bar including its gap and labels
    color_bar_area: u32,
    color_bar_labels: u32,
}

/// `(left, top, right, bottom)` in canvas pixels
type PixelBounds = (i32, i32, i32, i32);

#[derive(Clone, Debug, PartialEq)]
struct HeatmapCell {
    row: usize,
    column: usize,
    value: u64,
    fill: RgbaColor,
}

#[derive(Clone, Debug, PartialEq)]
struct DrawnCell {
    cell: HeatmapCell,
    bounds: PixelBounds,
}

/// The heatmap before it is cropped to its content
#[derive(Clone, Debug)]
struct RenderedHeatmap {
    image: RgbaImage,
    /// Cells in row-major order
    cells: Vec<DrawnCell>,
    color_bar: PixelBounds,
}
