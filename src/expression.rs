use std::fmt::Write;

use crate::{
    bind::{Bind, IntoBinds},
    writer::FormatContext,
};

/// Separates fragments inside the accumulated text. Callers never supply it
/// as SQL, so joining with any delimiter is a single replace.
pub const SENTINEL: char = '\u{1F}';

/// Ordered fragments with the parameters they bind.
///
/// The parameter order always follows the order in which the markers show
/// up once the fragments are joined.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Expression {
    list: String,
    fragments: usize,
    params: Vec<Bind>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<B: IntoBinds>(&mut self, fragment: &str, binds: B) -> &mut Self {
        self.push_fragment(fragment);
        self.add_binds(binds)
    }

    pub fn add_fragments<I, S>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for fragment in fragments {
            self.push_fragment(fragment.as_ref());
        }
        self
    }

    pub fn add_binds<B: IntoBinds>(&mut self, binds: B) -> &mut Self {
        self.params.extend(binds.into_binds().into_vec());
        self
    }

    fn push_fragment(&mut self, fragment: &str) {
        debug_assert!(!fragment.contains(SENTINEL), "fragment contains the separator");
        if self.fragments > 0 {
            self.list.push(SENTINEL);
        }
        self.list.push_str(fragment);
        self.fragments += 1;
    }

    /// Byte length of the accumulated text.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn arg_len(&self) -> usize {
        self.params.len()
    }

    pub fn fragment_len(&self) -> usize {
        self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments == 0 && self.params.is_empty()
    }

    pub fn join(&self, delimiter: &str) -> String {
        if self.fragments == 0 {
            return String::new();
        }
        self.list.replace(SENTINEL, delimiter)
    }

    pub fn split(&self) -> Vec<&str> {
        if self.fragments == 0 {
            return Vec::new();
        }
        self.list.split(SENTINEL).collect()
    }

    pub fn binds(&self) -> &[Bind] {
        &self.params
    }

    pub fn get(&self, delimiter: &str) -> (String, &[Bind]) {
        (self.join(delimiter), self.binds())
    }

    pub fn reset(&mut self) -> &mut Self {
        if self.is_empty() {
            return self;
        }
        self.list.clear();
        self.params.clear();
        self.fragments = 0;
        self
    }

    pub(crate) fn format_joined<W: Write>(
        &self,
        context: &mut FormatContext<'_, W>,
        delimiter: &str,
    ) -> std::fmt::Result {
        for (index, fragment) in self.list.split(SENTINEL).enumerate() {
            if index > 0 {
                context.writer.write_str(delimiter)?;
            }
            context.writer.write_str(fragment)?;
        }
        Ok(())
    }
}
