#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod align;
mod classify;
mod color;
mod display;
mod error;
mod printer;
mod sink;

pub use classify::{Category, TypeRef};
pub use color::{ColorMode, Palette};
pub use display::{Pretty, PrettyDisplay};
pub use error::RenderError;
pub use printer::Printer;
pub use sink::{Sink, StdoutSink};

use facet_core::Facet;

/// Pretty-print a value to standard output with default settings.
///
/// Shortcut for [`Printer::print`]; color is auto-detected from the
/// terminal.
pub fn pprint<'a, T: Facet<'a> + ?Sized>(value: &T) -> Result<(), RenderError> {
    Printer::new().print(value)
}

/// Format a value into its pretty representation with default settings.
///
/// Shortcut for [`Printer::format`]; the result is uncolored.
pub fn pformat<'a, T: Facet<'a> + ?Sized>(value: &T) -> Result<String, RenderError> {
    Printer::new().format(value)
}
