//! Style value parsing.
//!
//! Pure, total functions from computed-style strings to normalized records.
//! Nothing here fails: a value that no rule recognizes parses to `None` (or a default).
//!
//! - [`parse_color`] - `rgb[a]()`, `hsl[a]()`, `#rgb`/`#rrggbb`
//! - [`parse_linear_gradient`] - `linear-gradient(...)` into a gradient paint
//! - [`parse_box_shadow`] / [`parse_backdrop_blur`] - effects
//! - [`parse_corner_radius`] - uniform corner radius

pub mod color;
pub mod effects;
pub mod gradient;
pub mod length;

pub use color::{hsl_to_rgb, parse_color};
pub use effects::{parse_backdrop_blur, parse_box_shadow, DEFAULT_SHADOW_COLOR};
pub use gradient::{angle_to_transform, parse_linear_gradient, DEFAULT_GRADIENT_ANGLE};
pub use length::{parse_corner_radius, parse_integer, parse_number, parse_px};
