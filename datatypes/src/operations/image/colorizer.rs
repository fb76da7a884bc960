use crate::error;
use crate::util::Result;
use ordered_float::NotNan;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::convert::TryFrom;

/// The ColorBrewer "Blues" ramp, from light to dark
const BLUES: [[u8; 3]; 9] = [
    [247, 251, 255],
    [222, 235, 247],
    [198, 219, 239],
    [158, 202, 225],
    [107, 174, 214],
    [66, 146, 198],
    [33, 113, 181],
    [8, 81, 156],
    [8, 48, 107],
];

/// A colorizer specifies a mapping between cell values and colors by
/// linearly interpolating values within breakpoints of a color table
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Colorizer {
    breakpoints: Breakpoints,
    no_data_color: RgbaColor,
    default_color: RgbaColor,
}

impl Colorizer {
    pub fn linear_gradient(
        breakpoints: Breakpoints,
        no_data_color: RgbaColor,
        default_color: RgbaColor,
    ) -> Result<Self> {
        ensure!(
            breakpoints.len() >= 2,
            error::Colorizer {
                details: "Linear Gradient Colorizer must have a least two breakpoints"
            }
        );

        let colorizer = Self {
            breakpoints,
            no_data_color,
            default_color,
        };

        ensure!(
            colorizer.min_value() < colorizer.max_value(),
            error::Colorizer {
                details: "A colorizer's min value must be smaller than its max value"
            }
        );

        Ok(colorizer)
    }

    /// A sequential blue gradient spread evenly over `[min, max]`
    ///
    /// # Examples
    ///
    /// ```
    /// use cmviz_datatypes::operations::image::{Colorizer, RgbaColor};
    ///
    /// let colorizer = Colorizer::blues(0., 80.).unwrap();
    /// let mapper = colorizer.create_color_mapper();
    ///
    /// assert_eq!(mapper.call(0.), RgbaColor::new(247, 251, 255, 255));
    /// assert_eq!(mapper.call(80.), RgbaColor::new(8, 48, 107, 255));
    /// ```
    pub fn blues(min: f64, max: f64) -> Result<Self> {
        ensure!(
            min.is_finite() && max.is_finite(),
            error::Colorizer {
                details: "A colorizer's range must be finite"
            }
        );

        let step = (max - min) / (BLUES.len() - 1) as f64;

        let breakpoints = BLUES
            .iter()
            .enumerate()
            .map(|(i, [r, g, b])| {
                let value = if i == BLUES.len() - 1 {
                    max
                } else {
                    min + step * i as f64
                };
                Breakpoint::try_from((value, RgbaColor::new(*r, *g, *b, 255)))
            })
            .collect::<Result<Breakpoints>>()?;

        Self::linear_gradient(breakpoints, RgbaColor::transparent(), RgbaColor::pink())
    }

    /// Returns the minimum value that is covered by this colorizer
    ///
    /// # Examples
    ///
    /// ```
    /// use cmviz_datatypes::operations::image::{Colorizer, RgbaColor};
    ///
    /// let colorizer = Colorizer::linear_gradient(
    ///     vec![(0.0, RgbaColor::black()).try_into().unwrap(), (1.0, RgbaColor::white()).try_into().unwrap()],
    ///     RgbaColor::transparent(),
    ///     RgbaColor::transparent(),
    /// ).unwrap();
    ///
    /// assert_eq!(colorizer.min_value(), 0.);
    /// assert_eq!(colorizer.max_value(), 1.);
    /// ```
    pub fn min_value(&self) -> f64 {
        *self.breakpoints[0].value
    }

    /// Returns the maxium value that is covered by this colorizer
    pub fn max_value(&self) -> f64 {
        *self.breakpoints[self.breakpoints.len() - 1].value
    }

    /// Creates a function for mapping cell values to colors
    ///
    /// # Examples
    ///
    /// ```
    /// use cmviz_datatypes::operations::image::{Colorizer, RgbaColor};
    ///
    /// let colorizer = Colorizer::linear_gradient(
    ///     vec![(0.0, RgbaColor::black()).try_into().unwrap(), (1.0, RgbaColor::white()).try_into().unwrap()],
    ///     RgbaColor::transparent(),
    ///     RgbaColor::transparent(),
    /// ).unwrap();
    /// let color_mapper = colorizer.create_color_mapper();
    ///
    /// assert_eq!(color_mapper.call(0.5), RgbaColor::new(128, 128, 128, 255));
    /// ```
    pub fn create_color_mapper(&self) -> ColorMapper {
        const COLOR_TABLE_SIZE: usize = 254; // use 256 colors with no data and default colors

        let (min_value, max_value) = (self.min_value(), self.max_value());

        ColorMapper {
            color_table: self.color_table(COLOR_TABLE_SIZE, min_value, max_value),
            min_value,
            max_value,
            no_data_color: self.no_data_color,
            default_color: self.default_color,
        }
    }

    /// Creates a color table of `number_of_colors` colors
    fn color_table(&self, number_of_colors: usize, min: f64, max: f64) -> Vec<RgbaColor> {
        let breakpoints = &self.breakpoints;

        let smallest_breakpoint_value = *breakpoints[0].value;
        let largest_breakpoint_value = *breakpoints[breakpoints.len() - 1].value;

        let first_color = breakpoints[0].color;
        let last_color = breakpoints[breakpoints.len() - 1].color;

        let step = (max - min) / ((number_of_colors - 1) as f64);

        let mut breakpoint_index = 1;

        let color_table: Vec<RgbaColor> = (0..number_of_colors)
            .map(|i| min + step * i as f64)
            .map(|value| {
                if value <= smallest_breakpoint_value {
                    first_color // use these because of potential rounding errors instead of default color
                } else if value >= largest_breakpoint_value {
                    last_color // use these because of potential rounding errors instead of default color
                } else {
                    while value > *breakpoints[breakpoint_index].value {
                        breakpoint_index += 1;
                    }

                    let prev = &breakpoints[breakpoint_index - 1];
                    let next = &breakpoints[breakpoint_index];

                    let fraction = (value - *prev.value) / (*next.value - *prev.value);

                    prev.color.factor_add(next.color, fraction)
                }
            })
            .collect();

        debug_assert_eq!(color_table.len(), number_of_colors);

        color_table
    }
}

/// A function for mapping cell values to colors
#[derive(Clone, Debug)]
pub struct ColorMapper {
    color_table: Vec<RgbaColor>,
    min_value: f64,
    max_value: f64,
    no_data_color: RgbaColor,
    default_color: RgbaColor,
}

impl ColorMapper {
    /// Map a value to a color from the colorizer
    pub fn call(&self, value: f64) -> RgbaColor {
        if value.is_nan() {
            self.no_data_color
        } else if value < self.min_value || value > self.max_value {
            self.default_color
        } else {
            let color_table_factor = (self.color_table.len() - 1) as f64;
            let table_entry = f64::round(
                color_table_factor * ((value - self.min_value) / (self.max_value - self.min_value)),
            ) as usize;
            *self
                .color_table
                .get(table_entry)
                .unwrap_or(&self.default_color)
        }
    }
}

/// A container type for breakpoints that specify a value to color mapping
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Breakpoint {
    pub value: NotNan<f64>,
    pub color: RgbaColor,
}

impl TryFrom<(f64, RgbaColor)> for Breakpoint {
    type Error = error::RenderError;

    fn try_from(tuple: (f64, RgbaColor)) -> Result<Self, Self::Error> {
        let value = NotNan::new(tuple.0).map_err(|_| error::RenderError::Colorizer {
            details: "A breakpoint value must not be NaN".to_string(),
        })?;

        Ok(Self {
            value,
            color: tuple.1,
        })
    }
}

/// A breakpoint is a list of (value, color) tuples.
///
/// It is assumed to be ordered ascending and has at least two entries,
/// although we only check the first and last value for performance reasons.
pub type Breakpoints = Vec<Breakpoint>;

/// RgbaColor defines a 32 bit RGB color with alpha value
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RgbaColor([u8; 4]);

impl RgbaColor {
    /// Creates a new color from red, green, blue and alpha values
    ///
    /// # Examples
    ///
    /// ```
    /// use cmviz_datatypes::operations::image::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::new(0, 0, 0, 255), RgbaColor::black());
    /// assert_eq!(RgbaColor::new(255, 255, 255, 255), RgbaColor::white());
    /// assert_eq!(RgbaColor::new(0, 0, 0, 0), RgbaColor::transparent());
    /// ```
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        RgbaColor([red, green, blue, alpha])
    }

    pub const fn transparent() -> Self {
        RgbaColor::new(0, 0, 0, 0)
    }

    pub const fn black() -> Self {
        RgbaColor::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        RgbaColor::new(255, 255, 255, 255)
    }

    pub const fn pink() -> Self {
        RgbaColor::new(255, 0, 255, 255)
    }

    /// Adds another color with a factor in [0, 1] to this color.
    /// The current color remains in (1 - factor)
    ///
    /// # Example
    ///
    /// ```
    /// use cmviz_datatypes::operations::image::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::black().factor_add(RgbaColor::white(), 0.5), RgbaColor::new(128, 128, 128, 255));
    /// ```
    #[must_use]
    pub fn factor_add(self, other: Self, factor: f64) -> Self {
        debug_assert!((0. ..=1.0).contains(&factor));

        let [r, g, b, a] = self.0;
        let [r2, g2, b2, a2] = other.0;

        let mix = |c1: u8, c2: u8| {
            f64::round((1. - factor) * f64::from(c1) + factor * f64::from(c2)).clamp(0., 255.)
                as u8
        };

        RgbaColor([mix(r, r2), mix(g, g2), mix(b, b2), mix(a, a2)])
    }

    /// The WCAG relative luminance in `[0, 1]`, ignoring alpha
    pub fn relative_luminance(self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        let [r, g, b, _] = self.0;
        0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
    }

    /// A text color that is readable on top of this color
    pub fn contrasting_text_color(self) -> Self {
        const LUMINANCE_THRESHOLD: f64 = 0.408;

        if self.relative_luminance() > LUMINANCE_THRESHOLD {
            TEXT_DARK
        } else {
            TEXT_LIGHT
        }
    }
}

const TEXT_DARK: RgbaColor = RgbaColor::new(38, 38, 38, 255);
const TEXT_LIGHT: RgbaColor = RgbaColor::white();

impl From<RgbaColor> for RGBColor {
    /// Drops the alpha channel, plot colors are opaque
    fn from(color: RgbaColor) -> RGBColor {
        let [red, green, blue, _] = color.0;
        RGBColor(red, green, blue)
    }
}

impl From<RgbaColor> for image::Rgba<u8> {
    /// Transform an RgbaColor to its counterpart from the image crate
    fn from(color: RgbaColor) -> image::Rgba<u8> {
        // [r, g, b, a]
        image::Rgba(color.0)
    }
}
