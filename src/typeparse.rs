//! Parsing of emitted `.d.ts` declaration text into a [`ReferenceTable`].
//!
//! The application instance's declared type carries the whole route tree as
//! its fourth object-shaped generic argument, an intersection of one object
//! literal per registered route. This module locates that argument with text
//! slicing, splits the intersection into per-route fragments, and runs a small
//! recursive-descent parser over each fragment's type-literal syntax to
//! recover path, method and schema bundle.
//!
//! Everything here is lenient: a fragment that does not parse is skipped with
//! a debug log, and an instance that cannot be located at all yields `None`.
//! Type-checker output drifts across compiler versions, so partial recovery
//! beats hard failure.

use crate::route::{ReferenceTable, RouteSchemas};
use crate::schema::{Schema, SchemaType};
use log::debug;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn status_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{3}):").expect("status key pattern is valid"))
}

/// Parse declaration text into a reference table.
///
/// `instance_type` is the generic type name the application instance is
/// declared with; `instance_name` optionally narrows the search to a specific
/// exported binding. Returns `None` when no matching instance declaration can
/// be found or its route argument cannot be isolated.
pub fn parse_declaration(
    declaration: &str,
    instance_type: &str,
    instance_name: Option<&str>,
) -> Option<ReferenceTable> {
    let route_map = extract_route_map(declaration, instance_type, instance_name)?;

    let mut table = ReferenceTable::new();
    for fragment in route_map.split("} & {") {
        // The slicing above and the split both eat braces; the parser
        // tolerates the missing closers at end of input.
        let wrapped = format!("{{{}", fragment);
        let quoted = status_key_regex().replace_all(&wrapped, "\"$1\":");

        let Some(schema) = parse_type_literal(&quoted) else {
            debug!("Skipping unparseable route fragment: {}", fragment.trim());
            continue;
        };
        if schema.schema_type != Some(SchemaType::Object) {
            continue;
        }

        let Some((path, method, schemas)) = collapse_route(schema) else {
            debug!("Skipping route fragment without a method chain");
            continue;
        };

        table.entry(path).or_default().insert(method, schemas);
    }

    Some(table)
}

/// Isolate the fourth object-shaped generic argument of the instance type.
///
/// The argument list is not brace-balanced here; instead the text is advanced
/// past three `}, {` argument boundaries and cut at the fourth, mirroring how
/// the emitted declarations actually separate object arguments. The returned
/// text has lost its outermost braces.
fn extract_route_map(
    declaration: &str,
    instance_type: &str,
    instance_name: Option<&str>,
) -> Option<String> {
    let pattern = match instance_name {
        Some(name) => format!(
            r"(?s){}: {}<.*",
            regex::escape(name),
            regex::escape(instance_type)
        ),
        None => format!(r"(?s): {}<.*", regex::escape(instance_type)),
    };
    let matcher = Regex::new(&pattern).ok()?;
    let mut rest = matcher.find(declaration)?.as_str();

    for _ in 0..3 {
        let boundary = rest.get(3..)?.find("}, {")? + 3;
        rest = &rest[boundary..];
    }
    let end = rest.get(3..)?.find("}, {")? + 3;
    rest.get(4..end).map(str::to_string)
}

/// Descend single-child object levels to recover the route's path segments
/// and method, then read the schema bundle off the innermost object.
fn collapse_route(schema: Schema) -> Option<(String, String, RouteSchemas)> {
    let mut segments: Vec<String> = Vec::new();
    let mut current = schema;

    loop {
        let Some(properties) = &current.properties else {
            break;
        };
        if properties.len() != 1 {
            break;
        }
        let (key, child) = properties
            .iter()
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))?;
        segments.push(key);
        current = child;
        if current.properties.is_none() {
            break;
        }
    }

    let method = segments.pop()?.to_lowercase();
    let path = format!("/{}", segments.join("/"));

    let mut bundle = current.properties.unwrap_or_default();
    let schemas = RouteSchemas {
        params: bundle.remove("params"),
        query: bundle.remove("query"),
        headers: bundle.remove("headers"),
        body: bundle.remove("body"),
        response: bundle.remove("response").and_then(flatten_response),
    };
    Some((path, method, schemas))
}

/// Flatten an object-shaped response declaration into a status-to-schema map.
fn flatten_response(response: Schema) -> Option<BTreeMap<String, Schema>> {
    if response.schema_type != Some(SchemaType::Object) {
        return None;
    }
    response.properties
}

/// Parse a single TypeScript type-literal expression into a [`Schema`].
///
/// Input truncated mid-object is closed implicitly; trailing text after a
/// complete type is ignored.
pub fn parse_type_literal(text: &str) -> Option<Schema> {
    let mut parser = TypeParser::new(text);
    parser.parse_type()
}

struct TypeParser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            src: text.as_bytes(),
            pos: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos >= self.src.len()
    }

    /// Consume `expected` if it is the next non-whitespace byte.
    fn eat(&mut self, expected: u8) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// union := intersection ('|' intersection)*
    fn parse_type(&mut self) -> Option<Schema> {
        // Emitted unions sometimes lead with a pipe.
        let _ = self.eat(b'|');
        let first = self.parse_intersection()?;
        let mut members = vec![first];
        while self.eat(b'|') {
            members.push(self.parse_intersection()?);
        }
        if members.len() == 1 {
            members.pop()
        } else {
            Some(Schema {
                any_of: Some(members),
                ..Schema::default()
            })
        }
    }

    /// intersection := postfix ('&' postfix)*
    ///
    /// Object members are merged; anything else keeps the first operand.
    fn parse_intersection(&mut self) -> Option<Schema> {
        let mut schema = self.parse_postfix()?;
        while self.eat(b'&') {
            let other = self.parse_postfix()?;
            schema = merge_objects(schema, other);
        }
        Some(schema)
    }

    /// postfix := primary ('[' ']')*
    fn parse_postfix(&mut self) -> Option<Schema> {
        let mut schema = self.parse_primary()?;
        loop {
            self.skip_ws();
            if self.src[self.pos..].starts_with(b"[]") {
                self.pos += 2;
                schema = Schema {
                    schema_type: Some(SchemaType::Array),
                    items: Some(Box::new(schema)),
                    ..Schema::default()
                };
            } else {
                break;
            }
        }
        Some(schema)
    }

    fn parse_primary(&mut self) -> Option<Schema> {
        self.skip_ws();
        match self.peek()? {
            b'{' => self.parse_object(),
            b'(' => {
                self.pos += 1;
                let inner = self.parse_type()?;
                // A truncated fragment may lose the closer.
                let _ = self.eat(b')');
                Some(inner)
            }
            b'"' | b'\'' | b'`' => {
                let literal = self.parse_string_literal()?;
                Some(Schema {
                    schema_type: Some(SchemaType::String),
                    const_value: Some(Value::String(literal)),
                    ..Schema::default()
                })
            }
            b'-' => self.parse_number_literal(),
            b'0'..=b'9' => self.parse_number_literal(),
            _ => self.parse_named(),
        }
    }

    /// object := '{' (member (';' | ',')?)* '}'?
    fn parse_object(&mut self) -> Option<Schema> {
        if !self.eat(b'{') {
            return None;
        }
        let mut properties = BTreeMap::new();
        let mut required = Vec::new();

        loop {
            if self.eat(b'}') || self.at_end() {
                break;
            }
            let key = self.parse_key()?;
            let optional = self.eat(b'?');
            if !self.eat(b':') {
                return None;
            }
            let value = self.parse_type()?;
            if !optional {
                required.push(key.clone());
            }
            properties.insert(key, value);
            let _ = self.eat(b';') || self.eat(b',');
        }

        Some(Schema::object(properties, required))
    }

    fn parse_key(&mut self) -> Option<String> {
        self.skip_ws();
        match self.peek()? {
            b'"' | b'\'' => self.parse_string_literal(),
            b'0'..=b'9' => {
                let start = self.pos;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
                Some(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
            }
            _ => {
                let ident = self.parse_ident()?;
                // Modifier, not a key.
                if ident == "readonly" && !matches!(self.peek(), Some(b':') | Some(b'?')) {
                    return self.parse_key();
                }
                Some(ident)
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<String> {
        let quote = self.peek()?;
        self.pos += 1;
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == quote {
                let literal = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
                self.pos += 1;
                return Some(literal);
            }
            if byte == b'\\' {
                self.pos += 1;
            }
            self.pos += 1;
        }
        None
    }

    fn parse_number_literal(&mut self) -> Option<Schema> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(b'0'..=b'9') | Some(b'.')) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        let number: f64 = text.parse().ok()?;
        Some(Schema {
            schema_type: Some(SchemaType::Number),
            const_value: serde_json::Number::from_f64(number).map(Value::Number),
            ..Schema::default()
        })
    }

    fn parse_ident(&mut self) -> Option<String> {
        self.skip_ws();
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'a'..=b'z') | Some(b'A'..=b'Z') | Some(b'0'..=b'9') | Some(b'_') | Some(b'$')
        ) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
    }

    /// Keywords, well-known generics, and everything else as opaque names.
    fn parse_named(&mut self) -> Option<Schema> {
        let ident = self.parse_ident()?;
        let schema = match ident.as_str() {
            "string" => Schema::of(SchemaType::String),
            "number" => Schema::of(SchemaType::Number),
            "bigint" => Schema::of(SchemaType::Integer),
            "boolean" => Schema::of(SchemaType::Boolean),
            "null" => Schema::of(SchemaType::Null),
            "undefined" => Schema::of(SchemaType::Undefined),
            "void" => Schema::of(SchemaType::Void),
            "any" | "unknown" | "never" => Schema::of(SchemaType::Unknown),
            "true" => Schema {
                schema_type: Some(SchemaType::Boolean),
                const_value: Some(Value::Bool(true)),
                ..Schema::default()
            },
            "false" => Schema {
                schema_type: Some(SchemaType::Boolean),
                const_value: Some(Value::Bool(false)),
                ..Schema::default()
            },
            "Array" | "ReadonlyArray" => {
                if !self.eat(b'<') {
                    return Some(Schema::of(SchemaType::Unknown));
                }
                let items = self.parse_type()?;
                let _ = self.eat(b'>');
                Schema {
                    schema_type: Some(SchemaType::Array),
                    items: Some(Box::new(items)),
                    ..Schema::default()
                }
            }
            "Record" => {
                self.skip_generic_args();
                Schema::of(SchemaType::Object)
            }
            "Date" => Schema {
                schema_type: Some(SchemaType::String),
                format: Some("date-time".to_string()),
                ..Schema::default()
            },
            "File" | "Blob" => Schema {
                schema_type: Some(SchemaType::String),
                format: Some("binary".to_string()),
                ..Schema::default()
            },
            _ => {
                // Qualified names and foreign generics carry no structural
                // information; consume them and move on.
                while self.eat(b'.') {
                    self.parse_ident()?;
                }
                self.skip_generic_args();
                Schema::of(SchemaType::Unknown)
            }
        };
        Some(schema)
    }

    /// Consume a balanced `<...>` argument list if one follows.
    fn skip_generic_args(&mut self) {
        self.skip_ws();
        if self.peek() != Some(b'<') {
            return;
        }
        let mut depth = 0usize;
        while let Some(byte) = self.peek() {
            match byte {
                b'<' => depth += 1,
                b'>' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
    }
}

fn merge_objects(mut base: Schema, other: Schema) -> Schema {
    if base.schema_type != Some(SchemaType::Object) || other.schema_type != Some(SchemaType::Object)
    {
        return base;
    }
    if let Some(other_props) = other.properties {
        base.properties.get_or_insert_with(BTreeMap::new).extend(other_props);
    }
    if let Some(other_required) = other.required {
        let required = base.required.get_or_insert_with(Vec::new);
        for name in other_required {
            if !required.contains(&name) {
                required.push(name);
            }
        }
    }
    base
}
