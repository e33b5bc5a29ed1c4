use std::{fmt::Write, ops::Deref};

use crate::{dialect::Dialect, MARKER};

/// Renders a value as SQL text carrying raw markers.
pub trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

/// Output sink for [`FormatWriter`] values.
///
/// `FormatWriter` impls write fragment text verbatim, markers included. The
/// dialect only matters to [`FormatContext::write_query`], which turns
/// markers into the dialect's placeholder tokens.
pub struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) dialect: Dialect,
    pub(crate) placeholder: usize,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, dialect: Dialect) -> Self {
        Self {
            writer,
            dialect,
            placeholder: 0,
        }
    }

    /// A context that keeps markers as they are in `write_query`.
    pub fn raw(writer: &'a mut W) -> Self {
        Self::new(writer, Dialect::MySql)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Number of placeholders written so far.
    pub fn placeholders(&self) -> usize {
        self.placeholder
    }

    pub fn write_str(&mut self, value: &str) -> std::fmt::Result {
        self.writer.write_str(value)
    }

    pub(crate) fn write_placeholder(&mut self) -> std::fmt::Result {
        self.placeholder += 1;
        if self.dialect.is_positional() {
            write!(self.writer, "${}", self.placeholder)
        } else {
            self.writer.write_char(MARKER)
        }
    }

    /// Copies `query` through, replacing each marker with the next placeholder.
    pub fn write_query(&mut self, query: &str) -> std::fmt::Result {
        let mut span_start = 0;
        for (index, _) in query.match_indices(MARKER) {
            if span_start < index {
                self.writer.write_str(&query[span_start..index])?;
            }
            self.write_placeholder()?;
            span_start = index + MARKER.len_utf8();
        }

        // write trailing slice
        if span_start < query.len() {
            self.writer.write_str(&query[span_start..])?;
        }
        Ok(())
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: std::fmt::Write>(
        &self,
        ctx: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        self.deref().format_writer(ctx)
    }
}
