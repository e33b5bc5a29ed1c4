use std::fmt;

use smol_str::SmolStr;

use crate::{
    bind::Bind,
    expression::Expression,
    writer::{FormatContext, FormatWriter},
};

/// A parenthesized, comma separated expression with a keyword next to it,
/// such as `(id, name) INCLUDE` or `USING (id)`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DetailedExpression {
    expression: Expression,
    detail: SmolStr,
    right_align: bool,
}

impl DetailedExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn expression_mut(&mut self) -> &mut Expression {
        &mut self.expression
    }

    /// Puts the detail before the parenthesized list.
    pub fn set_right_align(&mut self, right_align: bool) -> &mut Self {
        self.right_align = right_align;
        self
    }

    pub fn set_detail<T: Into<SmolStr>>(&mut self, detail: T) -> &mut Self {
        self.detail = detail.into();
        self
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn reset_detail(&mut self) -> &mut Self {
        self.detail = SmolStr::default();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.detail.is_empty() && self.expression.is_empty()
    }

    pub fn binds(&self) -> &[Bind] {
        self.expression.binds()
    }

    pub fn reset(&mut self) -> &mut Self {
        self.expression.reset();
        self.reset_detail()
    }
}

impl FormatWriter for DetailedExpression {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        // a detail alone renders nothing
        if self.expression.fragment_len() == 0 {
            return Ok(());
        }
        if self.right_align && !self.detail.is_empty() {
            context.writer.write_str(&self.detail)?;
            context.writer.write_char(' ')?;
        }
        context.writer.write_char('(')?;
        self.expression.format_joined(context, ", ")?;
        context.writer.write_char(')')?;
        if !self.right_align && !self.detail.is_empty() {
            context.writer.write_char(' ')?;
            context.writer.write_str(&self.detail)?;
        }
        Ok(())
    }
}

impl fmt::Display for DetailedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut context = FormatContext::raw(f);
        self.format_writer(&mut context)
    }
}
