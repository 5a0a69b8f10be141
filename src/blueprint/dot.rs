// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graphviz DOT export of a blueprint, and the reader for that export.
//!
//! Every node and edge carries two attributes: `label`, a readable summary of
//! its parameters for rendering, and `params`, the parameter map encoded as
//! JSON. Only `params` is read back, so an export re-parses into an equal
//! blueprint.
//!
//! The reader accepts the subset the exporter writes plus what hand-edited
//! files commonly add: bare identifiers, `//`, `#` and `/* */` comments, edge
//! chains `a -> b -> c`, `graph`/`node`/`edge` default statements and
//! `key = value` graph attributes (both skipped).

use std::fmt::{self, Display, Formatter, Write};
use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

use crate::blueprint::{Blueprint, ParameterMap};
use crate::errors::BlueprintError;

const LABEL: &str = "label";
const PARAMS: &str = "params";

impl Blueprint {
    /// Render as a DOT `digraph`.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph blueprint {\n");
        for (name, parameters) in self.components() {
            let _ = writeln!(
                out,
                "  {} [{}=\"{}\", {}=\"{}\"];",
                quote(name),
                LABEL,
                escape(&node_label(name, parameters)),
                PARAMS,
                escape(&params_json(parameters)),
            );
        }
        for (from, to, parameters) in self.connections() {
            let _ = writeln!(
                out,
                "  {} -> {} [{}=\"{}\", {}=\"{}\"];",
                quote(from),
                quote(to),
                LABEL,
                escape(&parameter_lines(parameters).join("\n")),
                PARAMS,
                escape(&params_json(parameters)),
            );
        }
        out.push_str("}\n");
        out
    }

    /// Read a DOT description back into a blueprint.
    ///
    /// Edge endpoints that no node statement declares become components with
    /// an empty parameter map.
    pub fn from_dot(source: &str) -> Result<Blueprint, BlueprintError> {
        Parser::new(tokenize(source)?).graph()
    }
}

fn node_label(name: &str, parameters: &ParameterMap) -> String {
    let mut lines = vec![name.to_string()];
    lines.extend(parameter_lines(parameters));
    lines.join("\n")
}

fn parameter_lines(parameters: &ParameterMap) -> Vec<String> {
    parameters
        .iter()
        .map(|(key, values)| format!("{}: {}", key, values.join(", ")))
        .collect()
}

fn params_json(parameters: &ParameterMap) -> String {
    let object = parameters
        .iter()
        .map(|(key, values)| {
            let values = values.iter().cloned().map(Value::String).collect();
            (key.clone(), Value::Array(values))
        })
        .collect::<serde_json::Map<_, _>>();
    Value::Object(object).to_string()
}

fn quote(id: &str) -> String {
    format!("\"{}\"", escape(id))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

fn syntax(message: impl Into<String>) -> BlueprintError {
    BlueprintError::DotSyntax {
        message: message.into(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Id { text: String, quoted: bool },
    Arrow,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Equals,
    Comma,
    Semicolon,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Id { text, .. } => write!(f, "'{}'", text),
            Token::Arrow => write!(f, "'->'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Equals => write!(f, "'='"),
            Token::Comma => write!(f, "','"),
            Token::Semicolon => write!(f, "';'"),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, BlueprintError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => skip_line(&mut chars),
            '/' => {
                chars.next();
                match chars.next() {
                    Some('/') => skip_line(&mut chars),
                    Some('*') => skip_block_comment(&mut chars)?,
                    _ => return Err(syntax("unexpected '/'")),
                }
            }
            '"' => {
                chars.next();
                tokens.push(Token::Id {
                    text: read_quoted(&mut chars)?,
                    quoted: true,
                });
            }
            '-' => {
                chars.next();
                if chars.next_if_eq(&'>').is_some() {
                    tokens.push(Token::Arrow);
                } else {
                    let rest = read_bare(&mut chars);
                    tokens.push(Token::Id {
                        text: format!("-{}", rest),
                        quoted: false,
                    });
                }
            }
            '[' | ']' | '{' | '}' | '=' | ',' | ';' => {
                chars.next();
                tokens.push(match c {
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '=' => Token::Equals,
                    ',' => Token::Comma,
                    _ => Token::Semicolon,
                });
            }
            c if is_bare(c) => tokens.push(Token::Id {
                text: read_bare(&mut chars),
                quoted: false,
            }),
            other => return Err(syntax(format!("unexpected character '{}'", other))),
        }
    }

    Ok(tokens)
}

fn is_bare(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn read_bare(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut text = String::new();
    while let Some(c) = chars.next_if(|c| is_bare(*c)) {
        text.push(c);
    }
    text
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>) -> Result<String, BlueprintError> {
    let mut text = String::new();
    loop {
        match chars.next() {
            None => return Err(syntax("unterminated quoted string")),
            Some('"') => return Ok(text),
            Some('\\') => match chars.next() {
                Some('n') => text.push('\n'),
                Some('"') => text.push('"'),
                Some('\\') => text.push('\\'),
                Some(other) => {
                    text.push('\\');
                    text.push(other);
                }
                None => return Err(syntax("unterminated quoted string")),
            },
            Some(c) => text.push(c),
        }
    }
}

fn skip_line(chars: &mut Peekable<Chars<'_>>) {
    for c in chars.by_ref() {
        if c == '\n' {
            break;
        }
    }
}

fn skip_block_comment(chars: &mut Peekable<Chars<'_>>) -> Result<(), BlueprintError> {
    let mut previous = '\0';
    for c in chars.by_ref() {
        if previous == '*' && c == '/' {
            return Ok(());
        }
        previous = c;
    }
    Err(syntax("unterminated block comment"))
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        match self.peek() {
            Some(Token::Id { text, quoted: false }) if text.eq_ignore_ascii_case(keyword) => {
                self.position += 1;
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, expected: Token, context: &str) -> Result<(), BlueprintError> {
        if self.eat(&expected) {
            return Ok(());
        }
        Err(syntax(format!(
            "expected {} {}, found {}",
            expected,
            context,
            self.describe_next()
        )))
    }

    fn id(&mut self, what: &str) -> Result<String, BlueprintError> {
        match self.peek() {
            Some(Token::Id { text, .. }) => {
                let text = text.clone();
                self.position += 1;
                Ok(text)
            }
            _ => Err(syntax(format!(
                "expected {}, found {}",
                what,
                self.describe_next()
            ))),
        }
    }

    fn describe_next(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    fn graph(mut self) -> Result<Blueprint, BlueprintError> {
        self.eat_keyword("strict");
        if !self.eat_keyword("digraph") {
            if self.eat_keyword("graph") {
                return Err(syntax("undirected graphs cannot describe a blueprint"));
            }
            return Err(syntax(format!(
                "expected 'digraph', found {}",
                self.describe_next()
            )));
        }
        if matches!(self.peek(), Some(Token::Id { .. })) {
            self.position += 1;
        }
        self.expect(Token::LBrace, "after graph name")?;

        let mut blueprint = Blueprint::new();
        loop {
            match self.peek() {
                None => return Err(syntax("expected '}' before end of input")),
                Some(Token::RBrace) => {
                    self.position += 1;
                    break;
                }
                Some(Token::Semicolon) => self.position += 1,
                Some(_) => self.statement(&mut blueprint)?,
            }
        }

        if self.peek().is_some() {
            return Err(syntax(format!(
                "unexpected {} after closing brace",
                self.describe_next()
            )));
        }
        Ok(blueprint)
    }

    fn statement(&mut self, blueprint: &mut Blueprint) -> Result<(), BlueprintError> {
        if self.eat_keyword("graph") || self.eat_keyword("node") || self.eat_keyword("edge") {
            self.attributes()?;
            return Ok(());
        }
        if self.eat_keyword("subgraph") {
            return Err(syntax("subgraphs are not supported"));
        }

        let first = self.id("a node name")?;
        if self.eat(&Token::Equals) {
            self.id("an attribute value")?;
            return Ok(());
        }

        let mut chain = vec![first];
        while self.eat(&Token::Arrow) {
            chain.push(self.id("an edge target")?);
        }
        let parameters = params_attribute(self.attributes()?)?;

        if chain.len() == 1 {
            let name = chain.swap_remove(0);
            let mut merged = blueprint.parameter_map(&name).cloned().unwrap_or_default();
            merged.merge(&parameters);
            blueprint.set_component(name, merged);
            return Ok(());
        }

        for name in &chain {
            if !blueprint.contains_component(name) {
                blueprint.set_component(name.clone(), ParameterMap::new());
            }
        }
        for pair in chain.windows(2) {
            blueprint.add_connection(pair[0].clone(), pair[1].clone(), parameters.clone())?;
        }
        Ok(())
    }

    /// An optional `[k=v, ...]` list; `,` and `;` both separate entries.
    fn attributes(&mut self) -> Result<Vec<(String, String)>, BlueprintError> {
        let mut attributes = Vec::new();
        if !self.eat(&Token::LBracket) {
            return Ok(attributes);
        }
        while !self.eat(&Token::RBracket) {
            let key = self.id("an attribute name")?;
            self.expect(Token::Equals, "after attribute name")?;
            let value = self.id("an attribute value")?;
            attributes.push((key, value));
            if !self.eat(&Token::Comma) {
                self.eat(&Token::Semicolon);
            }
        }
        Ok(attributes)
    }
}

fn params_attribute(attributes: Vec<(String, String)>) -> Result<ParameterMap, BlueprintError> {
    match attributes.into_iter().find(|(key, _)| key == PARAMS) {
        Some((_, json)) => serde_json::from_str(&json)
            .map_err(|e| syntax(format!("invalid params attribute {}: {}", json, e))),
        None => Ok(ParameterMap::new()),
    }
}
