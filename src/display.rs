//! `Display` adapters for pretty-printing values in format strings.

use core::fmt::{self, Display, Formatter};

use facet_core::Facet;

use crate::printer::Printer;

/// Display wrapper for any type that implements `Facet`.
///
/// The lifetime `'b` is the borrow lifetime (how long we hold the
/// reference), while `'a` is the Facet lifetime (for the type's shape).
///
/// Render failures (a misconfigured printer, a depth-exceeded traversal)
/// surface as `fmt::Error`; use [`Printer::format`] directly to get the
/// specific [`RenderError`](crate::RenderError).
pub struct PrettyDisplay<'a, 'b, T: Facet<'a> + ?Sized> {
    value: &'b T,
    printer: Printer,
    _marker: core::marker::PhantomData<&'a ()>,
}

impl<'a, T: Facet<'a>> Display for PrettyDisplay<'a, '_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = self.printer.format(self.value).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Extension trait for pretty-printing any `Facet` value inline.
pub trait Pretty<'a>: Facet<'a> {
    /// A displayable wrapper rendering this value with default settings.
    fn pretty(&self) -> PrettyDisplay<'a, '_, Self>;

    /// A displayable wrapper rendering this value with custom settings.
    fn pretty_with(&self, printer: Printer) -> PrettyDisplay<'a, '_, Self>;
}

impl<'a, T: Facet<'a>> Pretty<'a> for T {
    fn pretty(&self) -> PrettyDisplay<'a, '_, Self> {
        PrettyDisplay {
            value: self,
            printer: Printer::new(),
            _marker: core::marker::PhantomData,
        }
    }

    fn pretty_with(&self, printer: Printer) -> PrettyDisplay<'a, '_, Self> {
        PrettyDisplay {
            value: self,
            printer,
            _marker: core::marker::PhantomData,
        }
    }
}
