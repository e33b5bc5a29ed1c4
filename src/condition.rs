use std::fmt;

use smol_str::SmolStr;

use crate::{
    bind::{Bind, IntoBinds},
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    #[default]
    And,
    Or,
    Xor,
}

impl Conjunction {
    pub fn as_str(self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
            Conjunction::Xor => "XOR",
        }
    }
}

impl FormatWriter for Conjunction {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_char(' ')?;
        context.writer.write_str(self.as_str())?;
        context.writer.write_char(' ')
    }
}

/// Predicates of a single node, joined by one conjunction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Leaf {
    conjunction: Conjunction,
    predicates: Vec<SmolStr>,
    binds: Vec<Bind>,
}

impl Leaf {
    pub fn new(conjunction: Conjunction) -> Self {
        Self {
            conjunction,
            predicates: Vec::new(),
            binds: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[SmolStr] {
        &self.predicates
    }
}

impl FormatWriter for Leaf {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        if self.predicates.is_empty() {
            return Ok(());
        }
        context.writer.write_char('(')?;
        for (index, predicate) in self.predicates.iter().enumerate() {
            if index > 0 {
                self.conjunction.format_writer(context)?;
            }
            context.writer.write_str(predicate)?;
        }
        context.writer.write_char(')')
    }
}

/// Merged children followed by the node's own predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    conjunction: Conjunction,
    children: Vec<Condition>,
    own: Leaf,
}

impl Group {
    pub fn children(&self) -> &[Condition] {
        &self.children
    }

    pub fn own(&self) -> &Leaf {
        &self.own
    }
}

impl FormatWriter for Group {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_char('(')?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                self.conjunction.format_writer(context)?;
            }
            child.format_writer(context)?;
        }
        if !self.own.is_empty() {
            if !self.children.is_empty() {
                self.conjunction.format_writer(context)?;
            }
            self.own.format_writer(context)?;
        }
        context.writer.write_char(')')
    }
}

/// A boolean predicate tree.
///
/// Nodes are built bottom-up: predicates first, then children are merged
/// into their parent which owns them from then on. The default value is an
/// empty `AND` leaf and renders to an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Leaf),
    Group(Group),
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Leaf(Leaf::default())
    }
}

impl Condition {
    pub fn new(conjunction: Conjunction) -> Self {
        Condition::Leaf(Leaf::new(conjunction))
    }

    pub fn and() -> Self {
        Self::new(Conjunction::And)
    }

    pub fn or() -> Self {
        Self::new(Conjunction::Or)
    }

    pub fn xor() -> Self {
        Self::new(Conjunction::Xor)
    }

    /// Conjunction joining this node's own predicates.
    pub fn conjunction(&self) -> Conjunction {
        self.leaf().conjunction
    }

    fn leaf(&self) -> &Leaf {
        match self {
            Condition::Leaf(leaf) => leaf,
            Condition::Group(group) => &group.own,
        }
    }

    fn leaf_mut(&mut self) -> &mut Leaf {
        match self {
            Condition::Leaf(leaf) => leaf,
            Condition::Group(group) => &mut group.own,
        }
    }

    pub fn add_expression<B: IntoBinds>(&mut self, predicate: &str, binds: B) -> &mut Self {
        self.leaf_mut().predicates.push(SmolStr::new(predicate));
        self.add_argument(binds)
    }

    pub fn add_argument<B: IntoBinds>(&mut self, binds: B) -> &mut Self {
        self.leaf_mut().binds.extend(binds.into_binds().into_vec());
        self
    }

    /// Attaches non-empty children under `conjunction`.
    ///
    /// The first call that attaches a child fixes the group conjunction,
    /// later calls append to the same group whatever conjunction they pass.
    pub fn merge<I>(&mut self, conjunction: Conjunction, children: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Condition>>,
    {
        for child in children {
            let child: Option<Condition> = child.into();
            let Some(child) = child.filter(|child| !child.is_empty()) else {
                continue;
            };
            if matches!(self, Condition::Leaf(_)) {
                let own = std::mem::take(self.leaf_mut());
                *self = Condition::Group(Group {
                    conjunction,
                    children: Vec::new(),
                    own,
                });
            }
            if let Condition::Group(group) = self {
                if group.conjunction != conjunction {
                    tracing::trace!(
                        kept = group.conjunction.as_str(),
                        ignored = conjunction.as_str(),
                        "merge group conjunction already set"
                    );
                }
                group.children.push(child);
            }
        }
        self
    }

    /// Overwrites this node with a copy of `other`, children included.
    pub fn replace(&mut self, other: &Condition) -> &mut Self {
        self.clone_from(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Condition::Leaf(leaf) => leaf.is_empty(),
            Condition::Group(group) => group.children.is_empty() && group.own.is_empty(),
        }
    }

    /// Drops predicates, parameters and children, keeping the own
    /// predicate storage for reuse.
    pub fn reset(&mut self) -> &mut Self {
        if let Condition::Group(group) = self {
            let own = std::mem::take(&mut group.own);
            *self = Condition::Leaf(own);
        }
        let leaf = self.leaf_mut();
        leaf.predicates.clear();
        leaf.binds.clear();
        self
    }

    /// Parameters in the order their markers appear in the rendered text:
    /// children first, own predicates last.
    pub fn arguments(&self) -> Vec<Bind> {
        let mut out = Vec::new();
        self.collect_arguments(&mut out);
        out
    }

    fn collect_arguments(&self, out: &mut Vec<Bind>) {
        match self {
            Condition::Leaf(leaf) => out.extend_from_slice(&leaf.binds),
            Condition::Group(group) => {
                for child in &group.children {
                    child.collect_arguments(out);
                }
                out.extend_from_slice(&group.own.binds);
            }
        }
    }
}

impl FormatWriter for Condition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            Condition::Leaf(leaf) => leaf.format_writer(context),
            Condition::Group(group) => group.format_writer(context),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut context = FormatContext::raw(f);
        self.format_writer(&mut context)
    }
}
