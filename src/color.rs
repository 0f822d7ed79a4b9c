//! Color assignment for rendered categories.
//!
//! Color is a pure decoration layer: the renderer asks the palette for a
//! style through a single flag check, and the structural layout is
//! identical whether or not the style is applied.

use owo_colors::Style;

use crate::classify::Category;

/// Whether renders are colorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Defer to the output sink's capability; plain-text renders
    /// ([`Printer::format`](crate::Printer::format)) stay uncolored.
    #[default]
    Auto,
    /// Always emit ANSI styles.
    Always,
    /// Never emit ANSI styles.
    Never,
}

impl From<bool> for ColorMode {
    fn from(enabled: bool) -> Self {
        if enabled { ColorMode::Always } else { ColorMode::Never }
    }
}

/// Per-category styles for colorized output.
///
/// One style per [`Category`], independent of value content. The default
/// palette keeps the classic awesome-print scheme: red mappings, green
/// sequences, cyan sets, yellow scalars, magenta callables.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Scalars: strings, numbers, booleans, fallback renders.
    pub scalar: Style,
    /// Mapping braces and the empty-mapping form.
    pub mapping: Style,
    /// Sequence brackets and the empty-sequence form.
    pub sequence: Style,
    /// Set braces and the empty-set marker.
    pub set: Style,
    /// Tuple parentheses.
    pub tuple: Style,
    /// Callable placeholders.
    pub callable: Style,
    /// Type display names.
    pub type_ref: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            scalar: Style::new().yellow().bold(),
            mapping: Style::new().red().bold(),
            sequence: Style::new().green().bold(),
            set: Style::new().cyan().bold(),
            tuple: Style::new().green().bold(),
            callable: Style::new().magenta().bold(),
            type_ref: Style::new().white().bold(),
        }
    }
}

impl Palette {
    /// The style for a category.
    pub fn style_for(&self, category: Category) -> Style {
        match category {
            Category::Scalar => self.scalar,
            Category::Mapping => self.mapping,
            Category::Sequence => self.sequence,
            Category::Set => self.set,
            Category::Tuple => self.tuple,
            Category::Callable => self.callable,
            Category::TypeRef => self.type_ref,
        }
    }
}
