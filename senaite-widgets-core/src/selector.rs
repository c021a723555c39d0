//! # Selector Engine
//!
//! Parses and matches the CSS selector subset used by widget markup:
//!
//! - type selectors and `*`
//! - `.class`, `#id`
//! - `[attr]`, `[attr=value]`, `[attr~=value]`, `[attr^=value]`,
//!   `[attr$=value]`, `[attr*=value]` with bare or quoted values
//! - descendant (whitespace) and child (`>`) combinators
//! - comma separated selector lists
//!
//! Matching follows `Element.matches` semantics: combinators may reach
//! ancestors outside of the subtree a query is scoped to.

use crate::{
    dom::{Document, ElementData, NodeId},
    error::SelectorError,
};
use std::{fmt, str::FromStr};

/// A parsed, comma separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<ComplexSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    // `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeSelector {
    name: String,
    matcher: Option<(AttributeOp, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeOp {
    Equals,
    Includes,
    Prefix,
    Suffix,
    Substring,
}

impl SelectorList {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        if source.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let selectors = Parser::new(source).parse_list()?;
        Ok(Self {
            source: source.to_string(),
            selectors,
        })
    }

    /// The selector text this list was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of comma separated alternatives.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Always false for a successfully parsed list.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Whether the node is an element matching any alternative.
    pub fn matches(&self, document: &Document, node: NodeId) -> bool {
        document.is_element(node)
            && self
                .selectors
                .iter()
                .any(|selector| selector.matches_at(document, node, selector.compounds.len() - 1))
    }

    /// All elements below `root` (excluding `root`) matching this list,
    /// in document order.
    pub fn query_all(&self, document: &Document, root: NodeId) -> Vec<NodeId> {
        document
            .descendants(root)
            .filter(|&node| self.matches(document, node))
            .collect()
    }

    /// The first element below `root` matching this list.
    pub fn query(&self, document: &Document, root: NodeId) -> Option<NodeId> {
        document
            .descendants(root)
            .find(|&node| self.matches(document, node))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl ComplexSelector {
    fn matches_at(&self, document: &Document, node: NodeId, index: usize) -> bool {
        let Some(element) = document.element(node) else {
            return false;
        };
        if !self.compounds[index].matches(element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => document
                .parent(node)
                .is_some_and(|parent| self.matches_at(document, parent, index - 1)),
            Combinator::Descendant => document
                .ancestors(node)
                .any(|ancestor| self.matches_at(document, ancestor, index - 1)),
        }
    }
}

impl Compound {
    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.ids.iter().all(|id| element.id() == Some(id.as_str()))
            && self.classes.iter().all(|class| element.has_class(class))
            && self.attributes.iter().all(|attr| attr.matches(element))
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.ids.is_empty() && self.classes.is_empty() && self.attributes.is_empty()
    }
}

impl AttributeSelector {
    fn matches(&self, element: &ElementData) -> bool {
        let Some(actual) = element.attribute(&self.name) else {
            return false;
        };
        let Some((op, expected)) = &self.matcher else {
            return true;
        };
        let expected = expected.as_str();
        match op {
            AttributeOp::Equals => actual == expected,
            AttributeOp::Includes => actual.split_ascii_whitespace().any(|word| word == expected),
            AttributeOp::Prefix => !expected.is_empty() && actual.starts_with(expected),
            AttributeOp::Suffix => !expected.is_empty() && actual.ends_with(expected),
            AttributeOp::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::UnexpectedChar {
                found,
                position: self.pos,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn parse_list(&mut self) -> Result<Vec<ComplexSelector>, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            match self.peek() {
                None => return Ok(selectors),
                Some(',') => {
                    self.bump();
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            if matches!(self.peek(), None | Some(',')) {
                return Err(SelectorError::DanglingCombinator { position: self.pos });
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some('*') => {
                self.bump();
                universal = true;
            }
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.parse_ident()?);
                }
                Some('#') => {
                    self.bump();
                    compound.ids.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() && !universal {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        let open = self.pos - 1;
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.bump() {
            Some(']') => {
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                });
            }
            Some('=') => AttributeOp::Equals,
            Some(c @ ('~' | '^' | '$' | '*')) => {
                if self.peek() != Some('=') {
                    return Err(self.unexpected());
                }
                self.bump();
                match c {
                    '~' => AttributeOp::Includes,
                    '^' => AttributeOp::Prefix,
                    '$' => AttributeOp::Suffix,
                    _ => AttributeOp::Substring,
                }
            }
            Some(found) => {
                return Err(SelectorError::UnexpectedChar {
                    found,
                    position: self.pos - found.len_utf8(),
                });
            }
            None => return Err(SelectorError::UnterminatedAttribute { position: open }),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_quoted(quote)?,
            None => return Err(SelectorError::UnterminatedAttribute { position: open }),
            Some(_) => self.parse_ident()?,
        };
        self.skip_whitespace();

        match self.peek() {
            Some(']') => {
                self.bump();
                Ok(AttributeSelector {
                    name,
                    matcher: Some((op, value)),
                })
            }
            None => Err(SelectorError::UnterminatedAttribute { position: open }),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        let open = self.pos;
        self.bump();
        let start = self.pos;
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(self.input[start..self.pos - 1].to_string()),
                Some(_) => {}
                None => return Err(SelectorError::UnterminatedString { position: open }),
            }
        }
    }
}
