use crate::{
    bind::Bind,
    writer::{FormatContext, FormatWriter},
};

/// Rendered statement text with its bound values.
///
/// `params` pairs with the markers in `text` by position. `returning` is
/// only filled by statements carrying a `RETURNING` clause.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub params: Vec<Bind>,
    pub returning: Vec<Bind>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub fn push_str(&mut self, value: &str) -> &mut Self {
        self.text.push_str(value);
        self
    }

    /// Appends the raw text of `part`, markers untouched.
    pub fn push<F: FormatWriter>(&mut self, part: &F) -> &mut Self {
        let mut context = FormatContext::raw(&mut self.text);
        part.format_writer(&mut context)
            .expect("should not fail on a string writer");
        self
    }

    pub fn extend_params<I: IntoIterator<Item = Bind>>(&mut self, params: I) -> &mut Self {
        self.params.extend(params);
        self
    }

    /// Terminates the statement with `;`.
    pub fn finish(&mut self) -> &mut Self {
        self.text.push(';');
        self
    }

    pub fn into_parts(self) -> (String, Vec<Bind>, Vec<Bind>) {
        (self.text, self.params, self.returning)
    }
}

/// Implemented by every statement builder.
///
/// The text uses the raw marker for each parameter, and `params` must be
/// collected from the owned parts in the order those parts are rendered.
pub trait Statement {
    fn sql(&self) -> Query;
}

impl<S: Statement + ?Sized> Statement for &S {
    fn sql(&self) -> Query {
        (**self).sql()
    }
}
