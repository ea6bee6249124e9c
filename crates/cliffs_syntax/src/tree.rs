//! Syntax trees.
//!
//! A compiled grammar definition is a tree of [`Node`]s. The set of node kinds
//! is closed: literals, parameters and tails are leaves; optional groups,
//! variant groups and sequences hold children. Trees are immutable once
//! compiled and can be shared by any number of matching attempts.
//!
//! Trees compare structurally and render back to definition text:
//!
//! ```text
//! set [loud] alarm at <time: int> (am|pm)
//! Sequence
//! ├── Literal "set"
//! ├── Optional
//! │   └── Sequence [Literal "loud"]
//! ├── Literal "alarm"
//! ├── Literal "at"
//! ├── Parameter time: int
//! └── Variant (parenthesized)
//!     ├── Sequence [Literal "am"]
//!     └── Sequence [Literal "pm"]
//! ```

use std::fmt;

/// A node in a syntax tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A word that must appear as-is.
    Literal(Literal),
    /// A single token bound under a name, optionally typed.
    Parameter(Parameter),
    /// The rest of the call, as raw text.
    Tail(Tail),
    /// A group that may be absent.
    Optional(Optional),
    /// A choice of exactly one alternative.
    Variant(Variant),
    /// Children matched in order.
    Sequence(Sequence),
}

/// A literal word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    /// The word.
    pub value: String,
    /// Whether case must match exactly.
    pub case_sensitive: bool,
}

/// A parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// Name the value is bound under.
    pub name: String,
    /// Registered type to coerce the token with; raw string if absent.
    pub typename: Option<String>,
}

/// A tail parameter capturing the rest of the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tail {
    /// Name the raw text is bound under.
    pub name: String,
}

/// An optional group.
#[derive(Clone, Debug, PartialEq)]
pub struct Optional {
    /// The group contents.
    pub inner: Box<Node>,
    /// Name to bind presence under instead of recording it positionally.
    pub identifier: Option<String>,
}

/// A variant group.
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    /// The alternatives, in declaration order.
    pub alternatives: Vec<Node>,
    /// Name to bind the chosen index under instead of recording it positionally.
    pub identifier: Option<String>,
    /// Whether the group was written inside its own parentheses.
    pub parenthesized: bool,
}

/// A sequence of nodes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Sequence {
    /// The children, in order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a case-sensitive literal.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal {
            value: value.into(),
            case_sensitive: true,
        })
    }

    /// Creates a parameter.
    #[must_use]
    pub fn parameter(name: impl Into<String>, typename: Option<&str>) -> Self {
        Self::Parameter(Parameter {
            name: name.into(),
            typename: typename.map(str::to_string),
        })
    }

    /// Creates a tail.
    #[must_use]
    pub fn tail(name: impl Into<String>) -> Self {
        Self::Tail(Tail { name: name.into() })
    }

    /// Creates an anonymous optional group.
    #[must_use]
    pub fn optional(inner: Node) -> Self {
        Self::Optional(Optional {
            inner: Box::new(inner),
            identifier: None,
        })
    }

    /// Creates an anonymous, parenthesized variant group.
    #[must_use]
    pub fn variant(alternatives: Vec<Node>) -> Self {
        Self::Variant(Variant {
            alternatives,
            identifier: None,
            parenthesized: true,
        })
    }

    /// Creates a sequence.
    #[must_use]
    pub fn sequence(children: Vec<Node>) -> Self {
        Self::Sequence(Sequence { children })
    }

    /// Returns the name of this node's kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Parameter(_) => "parameter",
            Self::Tail(_) => "tail",
            Self::Optional(_) => "optional",
            Self::Variant(_) => "variant",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns the direct children of this node.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Literal(_) | Self::Parameter(_) | Self::Tail(_) => &[],
            Self::Optional(opt) => std::slice::from_ref(opt.inner.as_ref()),
            Self::Variant(var) => &var.alternatives,
            Self::Sequence(seq) => &seq.children,
        }
    }

    /// Iterates over this node and all its descendants, depth first.
    pub fn traverse(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }

    /// Returns how many levels deep the tree goes (a leaf is 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Returns the names this tree can bind values under, in traversal order.
    #[must_use]
    pub fn binding_names(&self) -> Vec<&str> {
        self.traverse()
            .filter_map(|node| match node {
                Self::Parameter(p) => Some(p.name.as_str()),
                Self::Tail(t) => Some(t.name.as_str()),
                Self::Optional(o) => o.identifier.as_deref(),
                Self::Variant(v) => v.identifier.as_deref(),
                Self::Literal(_) | Self::Sequence(_) => None,
            })
            .collect()
    }

    /// Creates a copy of this tree with redundant nesting removed.
    ///
    /// Single-child sequences are replaced by their child, nested sequences
    /// are spliced into their parent, and anonymous single-alternative
    /// variant groups are replaced by the alternative.
    #[must_use]
    pub fn flattened(&self) -> Node {
        match self {
            Self::Literal(_) | Self::Parameter(_) | Self::Tail(_) => self.clone(),
            Self::Optional(opt) => Self::Optional(Optional {
                inner: Box::new(opt.inner.flattened()),
                identifier: opt.identifier.clone(),
            }),
            Self::Variant(var) if var.alternatives.len() == 1 && var.identifier.is_none() => {
                var.alternatives[0].flattened()
            }
            Self::Variant(var) => Self::Variant(Variant {
                alternatives: var.alternatives.iter().map(Node::flattened).collect(),
                identifier: var.identifier.clone(),
                parenthesized: var.parenthesized,
            }),
            Self::Sequence(seq) => {
                let mut children = Vec::with_capacity(seq.children.len());
                for child in &seq.children {
                    match child.flattened() {
                        Self::Sequence(inner) => children.extend(inner.children),
                        other => children.push(other),
                    }
                }
                if children.len() == 1 {
                    children.remove(0)
                } else {
                    Self::sequence(children)
                }
            }
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, place: Place) -> fmt::Result {
        match self {
            Self::Literal(lit) => {
                write!(f, "{}", lit.value)?;
                if !lit.case_sensitive {
                    write!(f, "^")?;
                }
                Ok(())
            }
            Self::Parameter(param) => match &param.typename {
                Some(typename) => write!(f, "<{}: {typename}>", param.name),
                None => write!(f, "<{}>", param.name),
            },
            Self::Tail(tail) => write!(f, "<{}...>", tail.name),
            Self::Optional(opt) => {
                write!(f, "[")?;
                opt.inner.render(f, Place::Bracket)?;
                write!(f, "]")?;
                let identifier = match opt.inner.as_ref() {
                    Self::Variant(var) if !var.parenthesized => var.identifier.as_ref(),
                    _ => opt.identifier.as_ref(),
                };
                if let Some(id) = identifier {
                    write!(f, ":{id}")?;
                }
                Ok(())
            }
            Self::Variant(var) => {
                let bare = !var.parenthesized && matches!(place, Place::Root | Place::Bracket);
                if !bare {
                    write!(f, "(")?;
                }
                for (i, alternative) in var.alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    alternative.render(f, Place::Alternative)?;
                }
                if !bare {
                    write!(f, ")")?;
                    if let Some(id) = &var.identifier {
                        write!(f, ":{id}")?;
                    }
                }
                Ok(())
            }
            Self::Sequence(seq) => {
                // A lone child stands in for the sequence at the top of a group.
                // A nested sequence keeps its parentheses or it would merge
                // into this one on recompile.
                if let [child] = seq.children.as_slice() {
                    if matches!(place, Place::Root | Place::Bracket) {
                        let child_place = match child {
                            Self::Sequence(_) => Place::Inner,
                            _ => place,
                        };
                        return child.render(f, child_place);
                    }
                }
                let parens = matches!(place, Place::Inner);
                if parens {
                    write!(f, "(")?;
                }
                for (i, child) in seq.children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    child.render(f, Place::Inner)?;
                }
                if parens {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

/// Where a node is rendered, which decides whether groups need parentheses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Place {
    Root,
    Bracket,
    Alternative,
    Inner,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, Place::Root)
    }
}
