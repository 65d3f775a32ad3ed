//! Declarative shape matchers over syntax-tree nodes.
//!
//! A [`Selector`] is compiled once from its pattern source into a typed
//! predicate tree and evaluated per node with no re-parsing. The grammar
//! covers what restriction patterns need:
//!
//! ```text
//! CallExpression[callee.object.name='assert'][arguments.length<2]
//! CallExpression[arguments.1.type='Literal']:not([arguments.1.regex])
//! ThrowStatement > CallExpression[callee.name=/error$/]
//! ```
//!
//! Tests inside `[...]` are field-path predicates: bare path = presence,
//! `=`/`!=` against string, number, bool, or `/regex/` literals, and
//! `<`, `<=`, `>`, `>=` against numbers. `:not(...)` negates a group of
//! bracket tests; a single `>` combinator constrains the parent node.

use crate::syntax::{Resolved, SyntaxNode};

// ────────────────────────────────────────────
// Compiled form
// ────────────────────────────────────────────

/// A compiled selector pattern.
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    parent: Option<Compound>,
    target: Compound,
}

#[derive(Debug, Clone)]
struct Compound {
    tests: Vec<Test>,
}

#[derive(Debug, Clone)]
enum Test {
    Kind(String),
    Exists(Vec<String>),
    Eq(Vec<String>, Literal),
    Ne(Vec<String>, Literal),
    Matches(Vec<String>, regex::Regex),
    Cmp(Vec<String>, CmpOp, i64),
    Not(Vec<Test>),
}

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    Num(i64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Selector {
    /// Compiles a selector from its pattern source.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first syntax problem found.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse()
    }

    /// Returns the original pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tests a node without parent context.
    ///
    /// A selector with a parent combinator never matches here.
    #[must_use]
    pub fn matches(&self, node: &SyntaxNode) -> bool {
        self.matches_with_parent(node, None)
    }

    /// Tests a node, with its parent when the caller knows it.
    #[must_use]
    pub fn matches_with_parent(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        if let Some(parent_compound) = &self.parent {
            match parent {
                Some(p) if parent_compound.matches(p) => {}
                _ => return false,
            }
        }
        self.target.matches(node)
    }
}

impl Compound {
    fn matches(&self, node: &SyntaxNode) -> bool {
        self.tests.iter().all(|t| t.matches(node))
    }
}

impl Test {
    fn matches(&self, node: &SyntaxNode) -> bool {
        match self {
            Self::Kind(kind) => node.kind() == kind,
            Self::Exists(path) => node.resolve(path).is_some(),
            Self::Eq(path, literal) => {
                node.resolve(path).is_some_and(|v| literal.equals(&v))
            }
            Self::Ne(path, literal) => {
                node.resolve(path).is_some_and(|v| !literal.equals(&v))
            }
            Self::Matches(path, regex) => match node.resolve(path) {
                Some(Resolved::Str(s)) => regex.is_match(s),
                _ => false,
            },
            Self::Cmp(path, op, rhs) => match node.resolve(path) {
                Some(Resolved::Num(lhs)) => match op {
                    CmpOp::Lt => lhs < *rhs,
                    CmpOp::Le => lhs <= *rhs,
                    CmpOp::Gt => lhs > *rhs,
                    CmpOp::Ge => lhs >= *rhs,
                },
                _ => false,
            },
            Self::Not(tests) => !tests.iter().all(|t| t.matches(node)),
        }
    }
}

impl Literal {
    fn equals(&self, resolved: &Resolved<'_>) -> bool {
        match (self, resolved) {
            (Self::Str(want), Resolved::Str(have)) => want == have,
            (Self::Num(want), Resolved::Num(have)) => want == have,
            (Self::Bool(want), Resolved::Bool(have)) => want == have,
            _ => false,
        }
    }
}

// ────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────

/// Errors raised while compiling a selector pattern.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    /// The pattern is empty or contains no tests.
    #[error("selector must not be empty")]
    Empty,

    /// Unexpected character at an offset into the pattern.
    #[error("unexpected `{found}` at offset {pos}")]
    UnexpectedChar {
        /// Offset of the character.
        pos: usize,
        /// The offending character.
        found: char,
    },

    /// Pattern ended inside a bracket, string, or regex.
    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    /// A field-path was expected and missing.
    #[error("empty field path at offset {pos}")]
    EmptyPath {
        /// Offset where the path was expected.
        pos: usize,
    },

    /// A numeric literal failed to parse.
    #[error("invalid number at offset {pos}")]
    InvalidNumber {
        /// Offset of the number.
        pos: usize,
    },

    /// A `/.../` field pattern failed to compile.
    #[error("invalid regex `{pattern}`: {reason}")]
    InvalidRegex {
        /// The regex source.
        pattern: String,
        /// Compile error message.
        reason: String,
    },
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let first = self.compound()?;
        self.skip_ws();

        let (parent, target) = if self.peek() == Some('>') {
            self.pos += 1;
            let second = self.compound()?;
            (Some(first), second)
        } else {
            (None, first)
        };

        self.skip_ws();
        if let Some(found) = self.peek() {
            return Err(SelectorError::UnexpectedChar {
                pos: self.pos,
                found,
            });
        }

        Ok(Selector {
            source: self.source.to_string(),
            parent,
            target,
        })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        self.skip_ws();
        let mut tests = Vec::new();

        if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            tests.push(Test::Kind(self.ident()));
        }

        loop {
            match self.peek() {
                Some('[') => {
                    self.pos += 1;
                    tests.push(self.bracket_test()?);
                }
                Some(':') => {
                    self.pos += 1;
                    self.expect_word("not")?;
                    self.expect('(')?;
                    let mut inner = Vec::new();
                    loop {
                        self.skip_ws();
                        match self.peek() {
                            Some('[') => {
                                self.pos += 1;
                                inner.push(self.bracket_test()?);
                            }
                            Some(')') => {
                                self.pos += 1;
                                break;
                            }
                            Some(found) => {
                                return Err(SelectorError::UnexpectedChar {
                                    pos: self.pos,
                                    found,
                                })
                            }
                            None => return Err(SelectorError::UnexpectedEnd),
                        }
                    }
                    if inner.is_empty() {
                        return Err(SelectorError::Empty);
                    }
                    tests.push(Test::Not(inner));
                }
                _ => break,
            }
        }

        if tests.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Compound { tests })
    }

    fn bracket_test(&mut self) -> Result<Test, SelectorError> {
        self.skip_ws();
        let path = self.path()?;
        self.skip_ws();

        let test = match self.peek() {
            Some(']') => Test::Exists(path),
            Some('=') => {
                self.pos += 1;
                self.equality_test(path, false)?
            }
            Some('!') => {
                self.pos += 1;
                self.expect('=')?;
                self.equality_test(path, true)?
            }
            Some(c @ ('<' | '>')) => {
                self.pos += 1;
                let op = if self.peek() == Some('=') {
                    self.pos += 1;
                    if c == '<' {
                        CmpOp::Le
                    } else {
                        CmpOp::Ge
                    }
                } else if c == '<' {
                    CmpOp::Lt
                } else {
                    CmpOp::Gt
                };
                self.skip_ws();
                let number = self.number()?;
                Test::Cmp(path, op, number)
            }
            Some(found) => {
                return Err(SelectorError::UnexpectedChar {
                    pos: self.pos,
                    found,
                })
            }
            None => return Err(SelectorError::UnexpectedEnd),
        };

        self.skip_ws();
        self.expect(']')?;
        Ok(test)
    }

    fn equality_test(&mut self, path: Vec<String>, negated: bool) -> Result<Test, SelectorError> {
        self.skip_ws();
        match self.peek() {
            Some('\'' | '"') => {
                let literal = Literal::Str(self.quoted()?);
                Ok(if negated {
                    Test::Ne(path, literal)
                } else {
                    Test::Eq(path, literal)
                })
            }
            Some('/') => {
                let pattern = self.regex_source()?;
                let regex =
                    regex::Regex::new(&pattern).map_err(|e| SelectorError::InvalidRegex {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })?;
                if negated {
                    // `!=/re/` is not part of the grammar; treat as :not instead.
                    Ok(Test::Not(vec![Test::Matches(path, regex)]))
                } else {
                    Ok(Test::Matches(path, regex))
                }
            }
            Some(c) if c.is_ascii_digit() || c == '-' => {
                let literal = Literal::Num(self.number()?);
                Ok(if negated {
                    Test::Ne(path, literal)
                } else {
                    Test::Eq(path, literal)
                })
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let word = self.ident();
                let literal = match word.as_str() {
                    "true" => Literal::Bool(true),
                    "false" => Literal::Bool(false),
                    _ => Literal::Str(word),
                };
                Ok(if negated {
                    Test::Ne(path, literal)
                } else {
                    Test::Eq(path, literal)
                })
            }
            Some(found) => Err(SelectorError::UnexpectedChar {
                pos: self.pos,
                found,
            }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn path(&mut self) -> Result<Vec<String>, SelectorError> {
        let start = self.pos;
        let mut segments = Vec::new();
        loop {
            let seg_start = self.pos;
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.pos += 1;
            }
            if self.pos == seg_start {
                return Err(SelectorError::EmptyPath { pos: start });
            }
            segments.push(self.chars[seg_start..self.pos].iter().collect());
            if self.peek() == Some('.') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(segments)
    }

    fn quoted(&mut self) -> Result<String, SelectorError> {
        let quote = self.chars[self.pos];
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(SelectorError::UnexpectedEnd)
    }

    fn regex_source(&mut self) -> Result<String, SelectorError> {
        self.pos += 1; // opening '/'
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '/' {
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(SelectorError::UnexpectedEnd)
    }

    fn number(&mut self) -> Result<i64, SelectorError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map_err(|_| SelectorError::InvalidNumber { pos: start })
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn expect(&mut self, want: char) -> Result<(), SelectorError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(SelectorError::UnexpectedChar {
                pos: self.pos,
                found,
            }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<(), SelectorError> {
        for want in word.chars() {
            self.expect(want)?;
        }
        Ok(())
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }
}

// ────────────────────────────────────────────
// Restriction sets
// ────────────────────────────────────────────

/// One restricted syntax shape: a compiled selector and its diagnostic.
#[derive(Debug, Clone)]
pub struct Restriction {
    selector: Selector,
    message: String,
}

impl Restriction {
    /// Returns the compiled selector.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Returns the fixed diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A set of restriction patterns, built once from rule options.
///
/// This is the interpreter behind `no-restricted-syntax`-style rules: the
/// options carry `{ selector, message }` tables, opaque to the
/// configuration model, interpreted here when the rule actually runs.
#[derive(Debug, Clone, Default)]
pub struct SyntaxRestriction {
    restrictions: Vec<Restriction>,
}

impl SyntaxRestriction {
    /// Builds a restriction set from rule option values.
    ///
    /// Each option must be a table with `selector` and `message` string
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-table option, a missing entry, or a
    /// selector that fails to compile.
    pub fn from_options(options: &[toml::Value]) -> Result<Self, RestrictionError> {
        let mut restrictions = Vec::with_capacity(options.len());
        for (index, option) in options.iter().enumerate() {
            let table = option
                .as_table()
                .ok_or(RestrictionError::NotATable { index })?;
            let source = table
                .get("selector")
                .and_then(toml::Value::as_str)
                .ok_or(RestrictionError::MissingSelector { index })?;
            let message = table
                .get("message")
                .and_then(toml::Value::as_str)
                .ok_or(RestrictionError::MissingMessage { index })?;
            let selector =
                Selector::parse(source).map_err(|source| RestrictionError::Selector {
                    index,
                    source,
                })?;
            restrictions.push(Restriction {
                selector,
                message: message.to_string(),
            });
        }
        Ok(Self { restrictions })
    }

    /// Returns the compiled restrictions.
    #[must_use]
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// Returns the first restriction matching a node, if any.
    #[must_use]
    pub fn first_match(
        &self,
        node: &SyntaxNode,
        parent: Option<&SyntaxNode>,
    ) -> Option<&Restriction> {
        self.restrictions
            .iter()
            .find(|r| r.selector.matches_with_parent(node, parent))
    }
}

/// Errors building a [`SyntaxRestriction`] from rule options.
#[derive(Debug, thiserror::Error)]
pub enum RestrictionError {
    /// An option value is not a table.
    #[error("restriction option [{index}] must be a table")]
    NotATable {
        /// Index of the bad option.
        index: usize,
    },

    /// An option has no `selector` entry.
    #[error("restriction option [{index}] has no `selector`")]
    MissingSelector {
        /// Index of the bad option.
        index: usize,
    },

    /// An option has no `message` entry.
    #[error("restriction option [{index}] has no `message`")]
    MissingMessage {
        /// Index of the bad option.
        index: usize,
    },

    /// The selector source failed to compile.
    #[error("restriction option [{index}]: {source}")]
    Selector {
        /// Index of the bad option.
        index: usize,
        /// The selector compile error.
        source: SelectorError,
    },
}

// ────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────
