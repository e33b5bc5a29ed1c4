use std::fmt;

use smol_str::SmolStr;

use crate::{
    bind::{Bind, Binds, IntoBinds},
    writer::{FormatContext, FormatWriter},
};

const MIN_SLOTS: usize = 4;
const DEFAULT_DELIMITER: &str = " ";

/// Joins `items` into one owned fragment.
///
/// Short results stay inline in the `SmolStr`, so building small keyword
/// runs such as `DETACH PARTITION name CONCURRENTLY` does not allocate.
pub fn concat<'a, I>(items: I) -> SmolStr
where
    I: IntoIterator<Item = &'a str>,
{
    items.into_iter().collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Slot {
    fragment: SmolStr,
    binds: Binds,
}

impl Slot {
    fn is_empty(&self) -> bool {
        self.fragment.is_empty() && self.binds.is_empty()
    }
}

/// Fragments addressed by grammar position.
///
/// Slots can be written in any order and always render in ascending slot
/// order. Slots never written are skipped along with their delimiter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrderedExpression {
    delimiter: Option<SmolStr>,
    slots: Vec<Slot>,
    cursor: usize,
}

impl OrderedExpression {
    pub fn new() -> Self {
        Self::default()
    }

    fn grow(&mut self, slot: usize) {
        if slot < self.slots.len() {
            return;
        }
        let len = (slot * 2).max(MIN_SLOTS);
        self.slots.resize_with(len, Slot::default);
    }

    /// Writes `slot`, replacing both its fragment and its parameters.
    pub fn add<T, B>(&mut self, slot: usize, fragment: T, binds: B) -> &mut Self
    where
        T: Into<SmolStr>,
        B: IntoBinds,
    {
        self.grow(slot);
        self.slots[slot] = Slot {
            fragment: fragment.into(),
            binds: binds.into_binds(),
        };
        self
    }

    /// Writes the slot under the cursor and moves the cursor forward.
    pub fn append<T, B>(&mut self, fragment: T, binds: B) -> &mut Self
    where
        T: Into<SmolStr>,
        B: IntoBinds,
    {
        self.add(self.cursor, fragment, binds);
        self.cursor += 1;
        self
    }

    /// Stores parameters under the cursor without a fragment. Nothing moves
    /// when `binds` is empty.
    pub fn append_binds<B: IntoBinds>(&mut self, binds: B) -> &mut Self {
        let binds = binds.into_binds();
        if binds.is_empty() {
            return self;
        }
        self.grow(self.cursor);
        self.slots[self.cursor].binds = binds;
        self.cursor += 1;
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Sets the join delimiter. An empty delimiter falls back to a single space.
    pub fn delimiter<T: Into<SmolStr>>(&mut self, delimiter: T) -> &mut Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots
            .get(slot)
            .map(|slot| slot.fragment.as_str())
            .filter(|fragment| !fragment.is_empty())
    }

    /// Number of slots holding a fragment.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.fragment.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Parameters in ascending slot order, matching the rendered text.
    pub fn arguments(&self) -> Vec<Bind> {
        self.slots
            .iter()
            .flat_map(|slot| slot.binds.iter().cloned())
            .collect()
    }

    /// Clears every slot and the cursor, keeping the allocation.
    pub fn reset(&mut self) -> &mut Self {
        self.slots.clear();
        self.cursor = 0;
        self
    }
}

impl FormatWriter for OrderedExpression {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        let delimiter = self
            .delimiter
            .as_deref()
            .filter(|delimiter| !delimiter.is_empty())
            .unwrap_or(DEFAULT_DELIMITER);
        let mut written = false;
        for slot in &self.slots {
            if slot.fragment.is_empty() {
                continue;
            }
            if written {
                context.writer.write_str(delimiter)?;
            }
            context.writer.write_str(&slot.fragment)?;
            written = true;
        }
        Ok(())
    }
}

impl fmt::Display for OrderedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut context = FormatContext::raw(f);
        self.format_writer(&mut context)
    }
}
