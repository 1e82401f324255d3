//! Extended production notation.
//!
//! A richer front-end over the plain production set: productions are
//! terminated by `.` and right-hand sides may use alternation `|`, grouping
//! `( .. )` and the postfix operators `?`, `*` and `+`. Bare identifiers are
//! non-terminals; terminals are written as quoted strings with `\\` and `\"`
//! escapes:
//!
//! ```text
//! S  -> NP VP | V.
//! NP -> Det N.
//! Det -> "the" | "a".
//! ```
//!
//! The notation is lowered to plain productions before the grammar is
//! built: alternation and `?` distribute into separate productions, and
//! `*`/`+` synthesize a right-recursive repetition non-terminal. The chart
//! engine consumes terminals through singleton productions only, so a
//! terminal that ends up inside a longer lowered right-hand side is hoisted
//! into a quoted preterminal (`"x" "y"` becomes `'x' 'y'` with `'x' -> x`
//! and `'y' -> y`). Synthesized names carry a character the identifier
//! syntax does not allow, so they cannot collide with user symbols.

use crate::error::GrammarError;
use crate::grammar::{Grammar, GrammarBuilder};
use hashbrown::HashSet;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[token("->")]
    Arrow,
    #[token("|")]
    Or,
    #[token(".")]
    Dot,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[regex(r#""(\\.|[^"\\])*""#)]
    Literal,
    #[regex(r"[A-Za-z_][A-Za-z0-9_']*")]
    Ident,
}

/// A lexed token together with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    /// Unescaped literal content.
    Literal(String),
    Arrow,
    Or,
    Dot,
    ParenOpen,
    ParenClose,
    Question,
    Star,
    Plus,
}

impl Tok {
    fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::Literal(text) => format!("literal \"{text}\""),
            Self::Arrow => "'->'".to_owned(),
            Self::Or => "'|'".to_owned(),
            Self::Dot => "'.'".to_owned(),
            Self::ParenOpen => "'('".to_owned(),
            Self::ParenClose => "')'".to_owned(),
            Self::Question => "'?'".to_owned(),
            Self::Star => "'*'".to_owned(),
            Self::Plus => "'+'".to_owned(),
        }
    }
}

/// Right-hand side expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RhsExpr {
    NonTerminal(String),
    Terminal(String),
    Sequence(Vec<RhsExpr>),
    Choice(Vec<RhsExpr>),
    Optional(Box<RhsExpr>),
    Star(Box<RhsExpr>),
    Plus(Box<RhsExpr>),
}

/// A symbol of a lowered right-hand side, still tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Sym {
    Nt(String),
    Term(String),
}

/// One `LHS -> rhs | rhs | .. .` statement.
#[derive(Debug)]
struct Statement {
    lhs: String,
    alternatives: Vec<RhsExpr>,
}

pub(super) fn parse(text: &str) -> Result<Grammar, GrammarError> {
    let statements = Parser::new(text)?.grammar()?;

    let mut lowering = Lowering {
        builder: GrammarBuilder::new(),
        preterminals: HashSet::default(),
        fresh: 0,
    };
    for statement in &statements {
        for alt in &statement.alternatives {
            for seq in lowering.lower(alt, &statement.lhs) {
                // The empty word cannot take part in a bottom-up chart, so
                // nullable top-level alternatives are dropped.
                if seq.is_empty() {
                    continue;
                }
                let names = lowering.hoist(&seq);
                let rhs: Vec<&str> = names.iter().map(String::as_str).collect();
                if !lowering.builder.add(&statement.lhs, &rhs) {
                    return Err(GrammarError::DuplicateProduction {
                        production: format!("{} -> {}", statement.lhs, names.join(" ")),
                    });
                }
            }
        }
    }
    lowering.builder.finish()
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

fn lex(text: &str) -> Result<Vec<(Tok, usize)>, GrammarError> {
    let mut out = Vec::new();
    let mut lexer = RawToken::lexer(text);
    while let Some(raw) = lexer.next() {
        let line = line_of(text, lexer.span().start);
        let tok = match raw {
            Ok(RawToken::Ident) => Tok::Ident(lexer.slice().to_owned()),
            Ok(RawToken::Literal) => Tok::Literal(unescape(lexer.slice(), line)?),
            Ok(RawToken::Arrow) => Tok::Arrow,
            Ok(RawToken::Or) => Tok::Or,
            Ok(RawToken::Dot) => Tok::Dot,
            Ok(RawToken::ParenOpen) => Tok::ParenOpen,
            Ok(RawToken::ParenClose) => Tok::ParenClose,
            Ok(RawToken::Question) => Tok::Question,
            Ok(RawToken::Star) => Tok::Star,
            Ok(RawToken::Plus) => Tok::Plus,
            Err(()) => {
                let slice = lexer.slice();
                if slice.starts_with('"') {
                    return Err(GrammarError::UnterminatedLiteral { line });
                }
                return Err(GrammarError::UnexpectedToken {
                    found: format!("'{slice}'"),
                    line,
                });
            }
        };
        out.push((tok, line));
    }
    Ok(out)
}

/// Strip the quotes and process `\\` and `\"`.
fn unescape(slice: &str, line: usize) -> Result<String, GrammarError> {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(c @ ('\\' | '"')) => out.push(c),
                Some(other) => return Err(GrammarError::InvalidEscape { escape: other, line }),
                // A trailing backslash cannot be produced by the literal
                // regex, but don't panic on it either.
                None => return Err(GrammarError::UnterminatedLiteral { line }),
            }
        } else {
            out.push(c);
        }
    }
    if out.is_empty() {
        return Err(GrammarError::EmptyLiteral { line });
    }
    Ok(out)
}

struct Parser<'t> {
    text: &'t str,
    tokens: Vec<(Tok, usize)>,
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(text: &'t str) -> Result<Self, GrammarError> {
        Ok(Self {
            text,
            tokens: lex(text)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    fn bump(&mut self) -> Option<(Tok, usize)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn unexpected(&self, item: Option<(Tok, usize)>) -> GrammarError {
        match item {
            Some((tok, line)) => GrammarError::UnexpectedToken {
                found: tok.describe(),
                line,
            },
            None => GrammarError::UnexpectedToken {
                found: "end of input".to_owned(),
                line: line_of(self.text, self.text.len()),
            },
        }
    }

    fn grammar(mut self) -> Result<Vec<Statement>, GrammarError> {
        let mut statements = Vec::new();
        while self.peek().is_some() {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    /// `statement := Ident '->' rhs ('|' rhs)* '.'`
    fn statement(&mut self) -> Result<Statement, GrammarError> {
        let lhs = match self.bump() {
            Some((Tok::Ident(name), _)) => name,
            other => return Err(self.unexpected(other)),
        };
        match self.bump() {
            Some((Tok::Arrow, _)) => {}
            other => return Err(self.unexpected(other)),
        }

        let mut alternatives = vec![self.rhs()?];
        loop {
            match self.bump() {
                Some((Tok::Or, _)) => alternatives.push(self.rhs()?),
                Some((Tok::Dot, _)) => break,
                other => return Err(self.unexpected(other)),
            }
        }
        Ok(Statement { lhs, alternatives })
    }

    /// `rhs := symbol+`
    fn rhs(&mut self) -> Result<RhsExpr, GrammarError> {
        let mut symbols = vec![self.symbol()?];
        while matches!(
            self.peek(),
            Some(Tok::Ident(_) | Tok::Literal(_) | Tok::ParenOpen)
        ) {
            symbols.push(self.symbol()?);
        }
        Ok(if symbols.len() == 1 {
            symbols.swap_remove(0)
        } else {
            RhsExpr::Sequence(symbols)
        })
    }

    /// `symbol := primary ('?' | '*' | '+')*`
    fn symbol(&mut self) -> Result<RhsExpr, GrammarError> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                Some(Tok::Question) => expr = RhsExpr::Optional(Box::new(expr)),
                Some(Tok::Star) => expr = RhsExpr::Star(Box::new(expr)),
                Some(Tok::Plus) => expr = RhsExpr::Plus(Box::new(expr)),
                _ => break,
            }
            self.pos += 1;
        }
        Ok(expr)
    }

    /// `primary := Ident | Literal | '(' rhs ('|' rhs)* ')'`
    fn primary(&mut self) -> Result<RhsExpr, GrammarError> {
        match self.bump() {
            Some((Tok::Ident(name), _)) => Ok(RhsExpr::NonTerminal(name)),
            Some((Tok::Literal(text), _)) => Ok(RhsExpr::Terminal(text)),
            Some((Tok::ParenOpen, _)) => {
                let mut alternatives = vec![self.rhs()?];
                loop {
                    match self.bump() {
                        Some((Tok::Or, _)) => alternatives.push(self.rhs()?),
                        Some((Tok::ParenClose, _)) => break,
                        other => return Err(self.unexpected(other)),
                    }
                }
                Ok(if alternatives.len() == 1 {
                    alternatives.swap_remove(0)
                } else {
                    RhsExpr::Choice(alternatives)
                })
            }
            other => Err(self.unexpected(other)),
        }
    }
}

/// Lowering state shared across one definition.
struct Lowering {
    builder: GrammarBuilder,
    /// Preterminal helpers created so far, by name.
    preterminals: HashSet<String>,
    /// Counter for repetition non-terminal names.
    fresh: u32,
}

impl Lowering {
    /// Expand an expression into its alternative symbol sequences.
    ///
    /// `?`, `|` and grouping distribute; `*` and `+` synthesize a fresh
    /// right-recursive repetition non-terminal. The returned set is
    /// duplicate-free; an empty sequence stands for the empty word and is
    /// dealt with by the caller.
    fn lower(&mut self, expr: &RhsExpr, lhs: &str) -> Vec<Vec<Sym>> {
        match expr {
            RhsExpr::NonTerminal(name) => vec![vec![Sym::Nt(name.clone())]],
            RhsExpr::Terminal(text) => vec![vec![Sym::Term(text.clone())]],
            RhsExpr::Sequence(parts) => {
                let mut alts: Vec<Vec<Sym>> = vec![Vec::new()];
                for part in parts {
                    let part_alts = self.lower(part, lhs);
                    let mut next = Vec::new();
                    for prefix in &alts {
                        for suffix in &part_alts {
                            let mut seq = prefix.clone();
                            seq.extend(suffix.iter().cloned());
                            push_unique(&mut next, seq);
                        }
                    }
                    alts = next;
                }
                alts
            }
            RhsExpr::Choice(items) => {
                let mut alts = Vec::new();
                for item in items {
                    for seq in self.lower(item, lhs) {
                        push_unique(&mut alts, seq);
                    }
                }
                alts
            }
            RhsExpr::Optional(inner) => {
                let mut alts = self.lower(inner, lhs);
                push_unique(&mut alts, Vec::new());
                alts
            }
            RhsExpr::Star(inner) | RhsExpr::Plus(inner) => {
                let is_star = matches!(expr, RhsExpr::Star(_));
                let inner_alts = self.lower(inner, lhs);
                let nullable = inner_alts.iter().any(Vec::is_empty);
                let body: Vec<Vec<Sym>> = inner_alts
                    .into_iter()
                    .filter(|seq| !seq.is_empty())
                    .collect();
                if body.is_empty() {
                    return vec![Vec::new()];
                }

                self.fresh += 1;
                let rep = format!("{lhs}{}{}", if is_star { '*' } else { '+' }, self.fresh);
                for seq in &body {
                    // rep -> seq rep | seq
                    let mut recursive = seq.clone();
                    recursive.push(Sym::Nt(rep.clone()));
                    let names = self.hoist(&recursive);
                    let rhs: Vec<&str> = names.iter().map(String::as_str).collect();
                    self.builder.add(&rep, &rhs);

                    let names = self.hoist(seq);
                    let rhs: Vec<&str> = names.iter().map(String::as_str).collect();
                    self.builder.add(&rep, &rhs);
                }

                let mut alts = vec![vec![Sym::Nt(rep)]];
                if is_star || nullable {
                    alts.push(Vec::new());
                }
                alts
            }
        }
    }

    /// Resolve a lowered sequence to plain symbol names.
    ///
    /// The engine consumes a terminal only through a singleton production,
    /// so in a sequence of two or more symbols every terminal is replaced
    /// by a quoted preterminal with exactly that singleton. A one-symbol
    /// sequence keeps its terminal directly and is itself the singleton.
    fn hoist(&mut self, seq: &[Sym]) -> Vec<String> {
        if let [only] = seq {
            let name = match only {
                Sym::Nt(name) | Sym::Term(name) => name.clone(),
            };
            return vec![name];
        }
        seq.iter()
            .map(|sym| match sym {
                Sym::Nt(name) => name.clone(),
                Sym::Term(text) => {
                    let name = format!("'{text}'");
                    if self.preterminals.insert(name.clone()) {
                        self.builder.add(&name, &[text.as_str()]);
                    }
                    name
                }
            })
            .collect()
    }
}

fn push_unique(alts: &mut Vec<Vec<Sym>>, seq: Vec<Sym>) {
    if !alts.contains(&seq) {
        alts.push(seq);
    }
}
