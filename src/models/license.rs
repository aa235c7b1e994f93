//! License model: single licenses, license-expression trees, the closed
//! `LicenseField` union, and extracted (non-registry) license records.
//!
//! The `NOASSERTION` and `NONE` sentinels are deliberately not licenses.
//! Every field with license semantics is a [`LicenseField`], so codecs and
//! the validator switch over a closed set of arms instead of probing the
//! kind of a value at runtime.

use std::fmt;

use crate::errors::SpdxError;
use crate::registry;

/// A single license, identified by its SPDX identifier.
///
/// Identity is the identifier plus the "or later" flag. Construction never
/// fails: identifiers missing from the registry still build a `License`
/// whose full name falls back to the identifier (open lookup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub full_name: String,
    pub identifier: String,
    /// Set when the identifier carried a trailing `+`. Does not affect
    /// validity; purely a serialization concern.
    pub or_later: bool,
}

impl License {
    pub fn new(full_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            identifier: identifier.into(),
            or_later: false,
        }
    }

    /// Build from an SPDX identifier, resolving the full name through the
    /// registry. A trailing `+` strips to the base identifier and sets the
    /// `or_later` flag.
    pub fn from_identifier(identifier: &str) -> Self {
        let (base, or_later) = match identifier.strip_suffix('+') {
            Some(base) => (base, true),
            None => (identifier, false),
        };
        let full_name = registry::license_name(base).unwrap_or(base).to_string();
        Self {
            full_name,
            identifier: base.to_string(),
            or_later,
        }
    }

    /// Build from a full license name, resolving the identifier through the
    /// registry. Unknown names keep the name as the identifier.
    pub fn from_full_name(full_name: &str) -> Self {
        let identifier = registry::license_id(full_name).unwrap_or(full_name).to_string();
        Self {
            full_name: full_name.to_string(),
            identifier,
            or_later: false,
        }
    }

    /// Canonical URL of the license text on spdx.org.
    pub fn url(&self) -> String {
        format!("http://spdx.org/licenses/{}", self.identifier)
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.or_later {
            write!(f, "{}+", self.identifier)
        } else {
            f.write_str(&self.identifier)
        }
    }
}

/// A license expression tree combining licenses with AND/OR/WITH.
///
/// Composites always serialize with explicit parentheses so the textual
/// form is unambiguous without relying on operator precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseExpr {
    Single(License),
    /// Conjunction; operands in source order.
    And(Vec<LicenseExpr>),
    /// Disjunction; operands in source order.
    Or(Vec<LicenseExpr>),
    /// A license plus an exception identifier, e.g.
    /// `GPL-2.0-only WITH Classpath-exception-2.0`.
    With(Box<LicenseExpr>, String),
}

impl LicenseExpr {
    pub fn single(identifier: &str) -> Self {
        LicenseExpr::Single(License::from_identifier(identifier))
    }

    /// Parse a license expression. Precedence: WITH binds tighter than AND,
    /// AND tighter than OR; parentheses group explicitly.
    pub fn parse(input: &str) -> Result<Self, SpdxError> {
        let tokens = tokenize(input)?;
        let mut pos = 0;
        let expr = parse_or(&tokens, &mut pos)?;
        if pos != tokens.len() {
            return Err(SpdxError::InvalidInput(format!(
                "Trailing input in license expression: '{}'",
                input
            )));
        }
        Ok(expr)
    }
}

impl fmt::Display for LicenseExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseExpr::Single(lic) => write!(f, "{}", lic),
            LicenseExpr::And(ops) => {
                f.write_str("(")?;
                for (i, op) in ops.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "{}", op)?;
                }
                f.write_str(")")
            }
            LicenseExpr::Or(ops) => {
                f.write_str("(")?;
                for (i, op) in ops.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" OR ")?;
                    }
                    write!(f, "{}", op)?;
                }
                f.write_str(")")
            }
            LicenseExpr::With(lic, exception) => write!(f, "{} WITH {}", lic, exception),
        }
    }
}

#[derive(Debug, PartialEq)]
enum ExprToken {
    Open,
    Close,
    And,
    Or,
    With,
    Ident(String),
}

fn tokenize(input: &str) -> Result<Vec<ExprToken>, SpdxError> {
    let padded = input.replace('(', " ( ").replace(')', " ) ");
    let mut tokens = Vec::new();
    for word in padded.split_whitespace() {
        tokens.push(match word {
            "(" => ExprToken::Open,
            ")" => ExprToken::Close,
            "AND" => ExprToken::And,
            "OR" => ExprToken::Or,
            "WITH" => ExprToken::With,
            ident => ExprToken::Ident(ident.to_string()),
        });
    }
    if tokens.is_empty() {
        return Err(SpdxError::InvalidInput(
            "Empty license expression".to_string(),
        ));
    }
    Ok(tokens)
}

fn parse_or(tokens: &[ExprToken], pos: &mut usize) -> Result<LicenseExpr, SpdxError> {
    let mut operands = vec![parse_and(tokens, pos)?];
    while tokens.get(*pos) == Some(&ExprToken::Or) {
        *pos += 1;
        operands.push(parse_and(tokens, pos)?);
    }
    if operands.len() == 1 {
        Ok(operands.pop().unwrap())
    } else {
        Ok(LicenseExpr::Or(operands))
    }
}

fn parse_and(tokens: &[ExprToken], pos: &mut usize) -> Result<LicenseExpr, SpdxError> {
    let mut operands = vec![parse_with(tokens, pos)?];
    while tokens.get(*pos) == Some(&ExprToken::And) {
        *pos += 1;
        operands.push(parse_with(tokens, pos)?);
    }
    if operands.len() == 1 {
        Ok(operands.pop().unwrap())
    } else {
        Ok(LicenseExpr::And(operands))
    }
}

fn parse_with(tokens: &[ExprToken], pos: &mut usize) -> Result<LicenseExpr, SpdxError> {
    let primary = parse_primary(tokens, pos)?;
    if tokens.get(*pos) == Some(&ExprToken::With) {
        *pos += 1;
        match tokens.get(*pos) {
            Some(ExprToken::Ident(exception)) => {
                *pos += 1;
                Ok(LicenseExpr::With(Box::new(primary), exception.clone()))
            }
            _ => Err(SpdxError::InvalidInput(
                "Expected exception identifier after WITH".to_string(),
            )),
        }
    } else {
        Ok(primary)
    }
}

fn parse_primary(tokens: &[ExprToken], pos: &mut usize) -> Result<LicenseExpr, SpdxError> {
    match tokens.get(*pos) {
        Some(ExprToken::Open) => {
            *pos += 1;
            let inner = parse_or(tokens, pos)?;
            if tokens.get(*pos) != Some(&ExprToken::Close) {
                return Err(SpdxError::InvalidInput(
                    "Unbalanced parenthesis in license expression".to_string(),
                ));
            }
            *pos += 1;
            Ok(inner)
        }
        Some(ExprToken::Ident(id)) => {
            *pos += 1;
            Ok(LicenseExpr::Single(License::from_identifier(id)))
        }
        _ => Err(SpdxError::InvalidInput(
            "Expected license identifier or '(' in license expression".to_string(),
        )),
    }
}

/// The three states a license-typed field can be in.
///
/// `NoAssertion` makes no claim about the field; `ExplicitNone` asserts the
/// absence of a license. Neither is a [`License`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseField {
    Asserted(LicenseExpr),
    NoAssertion,
    ExplicitNone,
}

impl LicenseField {
    pub const NO_ASSERTION_TOKEN: &'static str = "NOASSERTION";
    pub const NONE_TOKEN: &'static str = "NONE";

    /// Parse a license field value from its wire form: the sentinel tokens
    /// or a license expression.
    pub fn parse(value: &str) -> Result<Self, SpdxError> {
        match value.trim() {
            Self::NO_ASSERTION_TOKEN => Ok(LicenseField::NoAssertion),
            Self::NONE_TOKEN => Ok(LicenseField::ExplicitNone),
            expr => Ok(LicenseField::Asserted(LicenseExpr::parse(expr)?)),
        }
    }

    pub fn asserted(identifier: &str) -> Self {
        LicenseField::Asserted(LicenseExpr::single(identifier))
    }
}

impl fmt::Display for LicenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseField::Asserted(expr) => write!(f, "{}", expr),
            LicenseField::NoAssertion => f.write_str(Self::NO_ASSERTION_TOKEN),
            LicenseField::ExplicitNone => f.write_str(Self::NONE_TOKEN),
        }
    }
}

/// A license not on the SPDX list, carried in-document as a
/// `LicenseRef-…` record with its verbatim text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedLicense {
    /// The `LicenseRef-…` identifier.
    pub license_ref: String,
    pub extracted_text: Option<String>,
    pub name: Option<String>,
    pub cross_refs: Vec<String>,
    pub comment: Option<String>,
}

impl ExtractedLicense {
    pub fn new(license_ref: impl Into<String>) -> Self {
        Self {
            license_ref: license_ref.into(),
            ..Default::default()
        }
    }
}
