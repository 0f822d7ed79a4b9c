//! The recursive layout engine.

use facet_core::{Facet, ScalarType};
use facet_reflect::{Peek, ValueId};

use crate::align::{delimiter_column, last_line, visible_width};
use crate::classify::{Category, MapKey, Node, classify};
use crate::color::{ColorMode, Palette};
use crate::error::RenderError;
use crate::sink::{Sink, StdoutSink};

/// Renders values as indented, optionally colorized text.
///
/// A `Printer` is a reusable bundle of layout options; each render call
/// owns its own private traversal state, so one printer can serve
/// concurrent renders of unrelated values.
///
/// ```
/// use aprint::Printer;
///
/// let printer = Printer::new().with_indent_width(2);
/// assert_eq!(printer.format(&vec![true])?, "[\n  [0] true\n]");
/// # Ok::<(), aprint::RenderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Printer {
    indent_width: usize,
    max_line_width: usize,
    max_depth: usize,
    max_str_width: Option<usize>,
    max_items: Option<usize>,
    colors: ColorMode,
    palette: Palette,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            indent_width: 4,
            max_line_width: 80,
            max_depth: 128,
            max_str_width: None,
            max_items: None,
            colors: ColorMode::Auto,
            palette: Palette::default(),
        }
    }
}

impl Printer {
    /// Create a printer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per nesting level (default 4).
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Width threshold for inline-vs-block tuple layout (default 80).
    pub fn with_max_line_width(mut self, width: usize) -> Self {
        self.max_line_width = width;
        self
    }

    /// Hard ceiling on recursion depth before failing (default 128).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Clip strings longer than `width` characters, collapsing their
    /// middle to `...` (default: off).
    pub fn with_max_str_width(mut self, width: usize) -> Self {
        self.max_str_width = Some(width);
        self
    }

    /// Elide the middle of sequences longer than `count` items
    /// (default: off).
    pub fn with_max_items(mut self, count: usize) -> Self {
        self.max_items = Some(count);
        self
    }

    /// Color decoration mode; accepts a [`ColorMode`] or a plain `bool`.
    pub fn with_colors(mut self, mode: impl Into<ColorMode>) -> Self {
        self.colors = mode.into();
        self
    }

    /// Replace the per-category color palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Render a value to a string.
    ///
    /// Under [`ColorMode::Auto`] the result is uncolored; only
    /// [`ColorMode::Always`] colorizes text renders.
    pub fn format<'a, T: Facet<'a> + ?Sized>(&self, value: &T) -> Result<String, RenderError> {
        self.format_peek(Peek::new(value))
    }

    /// Render an already-reflected value to a string.
    pub fn format_peek(&self, value: Peek<'_, '_>) -> Result<String, RenderError> {
        self.render(value, self.colors == ColorMode::Always)
    }

    /// Render a value and write it, with a trailing newline, to standard
    /// output.
    pub fn print<'a, T: Facet<'a> + ?Sized>(&self, value: &T) -> Result<(), RenderError> {
        self.print_to(value, &mut StdoutSink::new())
    }

    /// Render a value and write it, with a trailing newline, to `sink`.
    ///
    /// Under [`ColorMode::Auto`] the sink's color capability decides
    /// whether the render is colorized. The sink receives either one
    /// complete render or nothing.
    pub fn print_to<'a, T, S>(&self, value: &T, sink: &mut S) -> Result<(), RenderError>
    where
        T: Facet<'a> + ?Sized,
        S: Sink,
    {
        let colors = match self.colors {
            ColorMode::Auto => sink.supports_color(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        let mut text = self.render(Peek::new(value), colors)?;
        text.push('\n');
        sink.write_text(&text).map_err(RenderError::Io)
    }

    fn render(&self, value: Peek<'_, '_>, colors: bool) -> Result<String, RenderError> {
        self.validate()?;
        let mut ctx = RenderContext {
            printer: self,
            colors,
            ancestors: Vec::new(),
        };
        ctx.value(value, 0, 0)
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.max_line_width == 0 {
            return Err(RenderError::InvalidOption {
                option: "max_line_width",
                value: 0,
            });
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidOption {
                option: "max_depth",
                value: 0,
            });
        }
        // The clipped form keeps `...` plus at least one character on
        // each side.
        if let Some(width) = self.max_str_width
            && width < 5
        {
            return Err(RenderError::InvalidOption {
                option: "max_str_width",
                value: width,
            });
        }
        if let Some(count) = self.max_items
            && count == 0
        {
            return Err(RenderError::InvalidOption {
                option: "max_items",
                value: 0,
            });
        }
        Ok(())
    }
}

/// One render call's private traversal state: the configuration, the
/// resolved color flag, and the ancestor stack used for cycle detection.
struct RenderContext<'p> {
    printer: &'p Printer,
    colors: bool,
    ancestors: Vec<ValueId>,
}

impl RenderContext<'_> {
    /// Render one value. `depth` is the nesting level (drives block
    /// indentation); `col` is the absolute column the first character
    /// lands in (drives hanging tuple alignment).
    fn value(&mut self, value: Peek<'_, '_>, depth: usize, col: usize) -> Result<String, RenderError> {
        let mut value = value;
        while let Ok(ptr) = value.into_pointer()
            && let Some(pointee) = ptr.borrow_inner()
        {
            value = pointee;
        }

        let id = value.id();
        if self.ancestors.contains(&id) {
            let category = classify(value).category();
            return Ok(self.paint(&format!("<cycle {}>", value.shape()), category));
        }
        if depth > self.printer.max_depth {
            return Err(RenderError::DepthExceeded {
                max_depth: self.printer.max_depth,
            });
        }

        self.ancestors.push(id);
        let rendered = self.node(value, depth, col);
        self.ancestors.pop();
        rendered
    }

    fn node(&mut self, value: Peek<'_, '_>, depth: usize, col: usize) -> Result<String, RenderError> {
        match classify(value) {
            Node::Scalar(scalar) => Ok(self.scalar(scalar)),
            Node::Optional(None) => Ok(self.paint("None", Category::Scalar)),
            Node::Optional(Some(inner)) => {
                let inner = self.value(inner, depth, col + 5)?;
                Ok(format!("Some({inner})"))
            }
            Node::Mapping(entries) => self.mapping(&entries, depth),
            Node::Sequence(items) => self.sequence(&items, depth),
            Node::Set(items) => self.set(&items, depth),
            Node::Tuple(items) => self.tuple(&items, depth, col),
            Node::Callable => Ok(self.paint("<fn>()", Category::Callable)),
            Node::TypeRef(type_ref) => Ok(self.paint(type_ref.name(), Category::TypeRef)),
        }
    }

    fn mapping(
        &mut self,
        entries: &[(MapKey<'_, '_>, Peek<'_, '_>)],
        depth: usize,
    ) -> Result<String, RenderError> {
        if entries.is_empty() {
            return Ok(self.paint("{}", Category::Mapping));
        }
        let ind = self.indent(depth);
        let ind1 = self.indent(depth + 1);

        // Keys first: the delimiter column is the widest final key line
        // among the siblings at this level.
        let mut keys = Vec::with_capacity(entries.len());
        for (key, _) in entries {
            keys.push(match key {
                MapKey::Field(name) => self.paint(name, Category::Scalar),
                MapKey::Value(peek) => self.value(*peek, depth + 1, ind1.len())?,
            });
        }
        let widths: Vec<usize> = keys
            .iter()
            .map(|key| {
                if key.contains('\n') {
                    visible_width(last_line(key))
                } else {
                    ind1.len() + visible_width(key)
                }
            })
            .collect();
        let delimiter = delimiter_column(&widths);

        let mut out = self.paint("{", Category::Mapping);
        for (i, (_, value)) in entries.iter().enumerate() {
            out.push('\n');
            out.push_str(&ind1);
            out.push_str(&keys[i]);
            out.push_str(&" ".repeat(delimiter - widths[i]));
            out.push_str(": ");
            out.push_str(&self.value(*value, depth + 1, delimiter + 2)?);
        }
        out.push('\n');
        out.push_str(&ind);
        out.push_str(&self.paint("}", Category::Mapping));
        Ok(out)
    }

    fn sequence(&mut self, items: &[Peek<'_, '_>], depth: usize) -> Result<String, RenderError> {
        if items.is_empty() {
            return Ok(self.paint("[]", Category::Sequence));
        }
        let ind = self.indent(depth);
        let ind1 = self.indent(depth + 1);
        let idx_width = (items.len() - 1).to_string().len();

        // Elision window: keep the head and tail, collapse the middle.
        let elided = match self.printer.max_items {
            Some(limit) if items.len() > limit => Some((limit.div_ceil(2), items.len() - limit / 2)),
            _ => None,
        };

        let mut out = self.paint("[", Category::Sequence);
        for (index, item) in items.iter().enumerate() {
            if let Some((start, end)) = elided {
                if index == start {
                    out.push('\n');
                    out.push_str(&ind1);
                    out.push_str(&format!("[{start}] ... [{}]", end - 1));
                }
                if index >= start && index < end {
                    continue;
                }
            }
            out.push('\n');
            out.push_str(&ind1);
            let label = format!("[{index:<idx_width$}] ");
            out.push_str(&label);
            out.push_str(&self.value(*item, depth + 1, ind1.len() + label.len())?);
        }
        out.push('\n');
        out.push_str(&ind);
        out.push_str(&self.paint("]", Category::Sequence));
        Ok(out)
    }

    fn set(&mut self, items: &[Peek<'_, '_>], depth: usize) -> Result<String, RenderError> {
        if items.is_empty() {
            // Disambiguated from an empty mapping's `{}`.
            return Ok(self.paint("set{}", Category::Set));
        }
        let ind = self.indent(depth);
        let ind1 = self.indent(depth + 1);

        // Always block form, even for a single element.
        let mut out = self.paint("{", Category::Set);
        for item in items {
            out.push('\n');
            out.push_str(&ind1);
            out.push_str(&self.value(*item, depth + 1, ind1.len())?);
        }
        out.push('\n');
        out.push_str(&ind);
        out.push_str(&self.paint("}", Category::Set));
        Ok(out)
    }

    fn tuple(
        &mut self,
        items: &[Peek<'_, '_>],
        depth: usize,
        col: usize,
    ) -> Result<String, RenderError> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(self.value(*item, depth + 1, col + 1)?);
        }

        let block = parts.iter().any(|part| part.contains('\n'));
        if !block {
            let mut inline = parts.join(", ");
            if parts.len() == 1 {
                inline.push(',');
            }
            if col + visible_width(&inline) + 2 <= self.printer.max_line_width {
                return Ok(format!(
                    "{}{inline}{}",
                    self.paint("(", Category::Tuple),
                    self.paint(")", Category::Tuple),
                ));
            }
        }

        // First element stays on the opening line; the rest hang one
        // column past the parenthesis.
        let hang = " ".repeat(col + 1);
        let mut out = self.paint("(", Category::Tuple);
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                out.push_str(",\n");
                out.push_str(&hang);
            }
            out.push_str(part);
        }
        out.push_str(&self.paint(")", Category::Tuple));
        Ok(out)
    }

    fn scalar(&self, value: Peek<'_, '_>) -> String {
        if let Some(s) = value.as_str() {
            let clipped = self.clip(s);
            return self.paint(&format!("'{}'", clipped.escape_debug()), Category::Scalar);
        }
        let text = match value.scalar_type() {
            Some(ScalarType::Unit) => "()".to_string(),
            Some(ScalarType::Bool) => value.get::<bool>().unwrap().to_string(),
            Some(ScalarType::Char) => {
                format!("'{}'", value.get::<char>().unwrap().escape_debug())
            }
            // Debug keeps the decimal point on round floats.
            Some(ScalarType::F32) => format!("{:?}", value.get::<f32>().unwrap()),
            Some(ScalarType::F64) => format!("{:?}", value.get::<f64>().unwrap()),
            _ => {
                if value.shape().is_display() {
                    format!("{value}")
                } else if value.shape().is_debug() {
                    format!("{value:?}")
                } else {
                    format!("{}(…)", value.shape())
                }
            }
        };
        self.paint(&text, Category::Scalar)
    }

    fn clip(&self, s: &str) -> String {
        const MID: &str = "...";
        match self.printer.max_str_width {
            Some(limit) if s.chars().count() > limit => {
                let head = (limit - MID.len()) / 2;
                let tail = limit - MID.len() - head;
                let skip = s.chars().count() - tail;
                let mut clipped: String = s.chars().take(head).collect();
                clipped.push_str(MID);
                clipped.extend(s.chars().skip(skip));
                clipped
            }
            _ => s.to_owned(),
        }
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(self.printer.indent_width * depth)
    }

    fn paint(&self, text: &str, category: Category) -> String {
        if self.colors {
            use owo_colors::OwoColorize as _;
            text.style(self.printer.palette.style_for(category)).to_string()
        } else {
            text.to_owned()
        }
    }
}
