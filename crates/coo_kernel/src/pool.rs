//! NAIF text-kernel variable pool.
//!
//! Reads the `\begindata` sections of text kernels (PCK, LSK, frame and
//! naming kernels) into a single pool of named numeric or string arrays.
//! Everything outside `\begindata` … `\begintext` is commentary.
//!
//! Supported assignment syntax:
//!
//! ```text
//! NAME  = 1.0                       scalar
//! NAME  = ( 1.0, 2.0D-3  3 )        array, Fortran D exponents
//! NAME  = ( 'EAST' 'It''s' )        strings, '' escapes a quote
//! NAME  = ( 10, @1972-JAN-1 )       @ date literals, seconds past J2000
//! NAME += ( 4 5 )                   append to an existing variable
//! ```
//!
//! Loading is all-or-nothing: a kernel with any malformed assignment
//! leaves the pool untouched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{KernelError, io_err};

/// Value of a pool variable.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolValue {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl PoolValue {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Text(_) => "string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Assign,
    Append,
}

#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    name: String,
    op: Op,
    value: PoolValue,
}

/// Merged contents of every loaded text kernel.
#[derive(Debug, Clone, Default)]
pub struct KernelPool {
    vars: HashMap<String, PoolValue>,
    loaded: Vec<PathBuf>,
}

impl KernelPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a text kernel file. Returns the number of assignments read.
    pub fn load(&mut self, path: &Path) -> Result<usize, KernelError> {
        let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let count = self.load_str(&text)?;
        self.loaded.push(path.to_path_buf());
        info!(path = %path.display(), assignments = count, "loaded text kernel");
        Ok(count)
    }

    /// Load text-kernel content. Returns the number of assignments read.
    pub fn load_str(&mut self, content: &str) -> Result<usize, KernelError> {
        let data = extract_data_sections(content);
        let assignments = parse_assignments(&data)?;

        let mut staged = self.vars.clone();
        for a in &assignments {
            apply(&mut staged, a)?;
        }
        self.vars = staged;
        debug!(assignments = assignments.len(), variables = self.vars.len(), "pool updated");
        Ok(assignments.len())
    }

    /// Set a variable directly, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: PoolValue) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&PoolValue> {
        self.vars.get(name)
    }

    /// Numeric values of `name`, or `None` if absent or a string variable.
    pub fn numbers(&self, name: &str) -> Option<&[f64]> {
        match self.vars.get(name)? {
            PoolValue::Numeric(v) => Some(v),
            PoolValue::Text(_) => None,
        }
    }

    /// String values of `name`, or `None` if absent or a numeric variable.
    pub fn strings(&self, name: &str) -> Option<&[String]> {
        match self.vars.get(name)? {
            PoolValue::Text(v) => Some(v),
            PoolValue::Numeric(_) => None,
        }
    }

    /// First numeric value of a required variable.
    pub fn scalar(&self, name: &str) -> Result<f64, KernelError> {
        let vals = self.require_numbers(name)?;
        vals.first().copied().ok_or_else(|| KernelError::BadVariable {
            name: name.to_string(),
            reason: "has no values".into(),
        })
    }

    /// Numeric values of a required variable.
    pub fn require_numbers(&self, name: &str) -> Result<&[f64], KernelError> {
        match self.vars.get(name) {
            Some(PoolValue::Numeric(v)) => Ok(v),
            Some(PoolValue::Text(_)) => Err(KernelError::BadVariable {
                name: name.to_string(),
                reason: "expected numeric values".into(),
            }),
            None => Err(KernelError::MissingVariable(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Files loaded so far, in load order.
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.loaded.clear();
    }
}

fn apply(vars: &mut HashMap<String, PoolValue>, a: &Assignment) -> Result<(), KernelError> {
    if a.op == Op::Append
        && let Some(existing) = vars.get_mut(&a.name)
    {
        match (existing, &a.value) {
            (PoolValue::Numeric(dst), PoolValue::Numeric(src)) => dst.extend_from_slice(src),
            (PoolValue::Text(dst), PoolValue::Text(src)) => dst.extend(src.iter().cloned()),
            (existing, value) => {
                return Err(KernelError::BadVariable {
                    name: a.name.clone(),
                    reason: format!(
                        "cannot append {} values to a {} variable",
                        value.kind(),
                        existing.kind()
                    ),
                });
            }
        }
        return Ok(());
    }
    vars.insert(a.name.clone(), a.value.clone());
    Ok(())
}

/// Concatenate the text of every `\begindata` section.
fn extract_data_sections(content: &str) -> String {
    let mut in_data = false;
    let mut data_lines = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("\\begindata") {
            in_data = true;
            continue;
        }
        if trimmed.eq_ignore_ascii_case("\\begintext") {
            in_data = false;
            continue;
        }
        if in_data {
            data_lines.push(line);
        }
    }
    data_lines.join("\n")
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.text[self.pos..].starts_with(s)
    }

    fn skip_while(&mut self, f: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&f) {
            self.pos += 1;
        }
    }

    fn skip_blank(&mut self) {
        self.skip_while(|c| c.is_ascii_whitespace());
    }

    fn skip_separators(&mut self) {
        self.skip_while(|c| c.is_ascii_whitespace() || c == b',');
    }

    /// Read until whitespace or one of `stops`.
    fn word(&mut self, stops: &[u8]) -> &'a str {
        let start = self.pos;
        self.skip_while(|c| !c.is_ascii_whitespace() && !stops.contains(&c));
        &self.text[start..self.pos]
    }
}

fn parse_error(msg: String) -> KernelError {
    KernelError::Parse(msg)
}

fn parse_assignments(text: &str) -> Result<Vec<Assignment>, KernelError> {
    let mut cur = Cursor { text, pos: 0 };
    let mut out = Vec::new();

    loop {
        cur.skip_blank();
        if cur.peek().is_none() {
            break;
        }

        let raw = cur.word(b"=");
        cur.skip_blank();
        let (name, op) = if cur.starts_with("+=") {
            cur.pos += 2;
            (raw, Op::Append)
        } else if cur.peek() == Some(b'=') {
            cur.pos += 1;
            match raw.strip_suffix('+') {
                Some(stripped) => (stripped, Op::Append),
                None => (raw, Op::Assign),
            }
        } else {
            return Err(parse_error(format!("expected '=' after '{raw}'")));
        };
        if name.is_empty() || name.starts_with(['(', ')', '\'', '@']) {
            return Err(parse_error(format!("invalid variable name '{name}'")));
        }

        cur.skip_blank();
        let mut values = Vec::new();
        if cur.peek() == Some(b'(') {
            cur.pos += 1;
            loop {
                cur.skip_separators();
                match cur.peek() {
                    Some(b')') => {
                        cur.pos += 1;
                        break;
                    }
                    None => return Err(parse_error(format!("unterminated array for {name}"))),
                    Some(_) => values.push(parse_value(&mut cur, name)?),
                }
            }
        } else if cur.peek().is_some() {
            values.push(parse_value(&mut cur, name)?);
        }

        let value = collect_values(name, values)?;
        out.push(Assignment {
            name: name.to_string(),
            op,
            value,
        });
    }
    Ok(out)
}

enum Scalar {
    Number(f64),
    Text(String),
}

fn parse_value(cur: &mut Cursor<'_>, name: &str) -> Result<Scalar, KernelError> {
    match cur.peek() {
        Some(b'\'') => {
            cur.pos += 1;
            let mut s = String::new();
            loop {
                let rest = &cur.text[cur.pos..];
                let Some(q) = rest.find(['\'', '\n']) else {
                    return Err(parse_error(format!("unterminated string in {name}")));
                };
                if rest.as_bytes()[q] == b'\n' {
                    return Err(parse_error(format!("string spans lines in {name}")));
                }
                s.push_str(&rest[..q]);
                cur.pos += q + 1;
                if cur.peek() == Some(b'\'') {
                    s.push('\'');
                    cur.pos += 1;
                } else {
                    break;
                }
            }
            Ok(Scalar::Text(s))
        }
        Some(b'@') => {
            cur.pos += 1;
            let token = cur.word(b",)");
            let parsed = coo_time::parse_time_string(token)?;
            Ok(Scalar::Number(parsed.seconds_past_j2000()))
        }
        _ => {
            let token = cur.word(b",)");
            let normalized = token.replace(['D', 'd'], "E");
            match normalized.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Scalar::Number(value)),
                Ok(_) => Err(parse_error(format!("'{token}' is not a finite number in {name}"))),
                Err(_) => Err(parse_error(format!(
                    "cannot parse '{token}' as a number in {name}"
                ))),
            }
        }
    }
}

fn collect_values(name: &str, values: Vec<Scalar>) -> Result<PoolValue, KernelError> {
    let mixed = || parse_error(format!("{name} mixes numeric and string values"));
    match values.first() {
        None => Err(parse_error(format!("{name} has no values"))),
        Some(Scalar::Number(_)) => values
            .into_iter()
            .map(|v| match v {
                Scalar::Number(x) => Ok(x),
                Scalar::Text(_) => Err(mixed()),
            })
            .collect::<Result<_, _>>()
            .map(PoolValue::Numeric),
        Some(Scalar::Text(_)) => values
            .into_iter()
            .map(|v| match v {
                Scalar::Text(s) => Ok(s),
                Scalar::Number(_) => Err(mixed()),
            })
            .collect::<Result<_, _>>()
            .map(PoolValue::Text),
    }
}
