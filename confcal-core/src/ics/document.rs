//! Component/property records and their serializer.

/// A property value and how it is written out.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Free text: commas, semicolons and newlines are escaped on output
    Text(String),
    /// Written verbatim
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: &'static str,
    pub value: Value,
}

impl Property {
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        Property {
            name,
            value: Value::Text(value.into()),
        }
    }

    pub fn raw(name: &'static str, value: impl Into<String>) -> Self {
        Property {
            name,
            value: Value::Raw(value.into()),
        }
    }
}

/// A `BEGIN:<kind>` / `END:<kind>` block. Properties are rendered before
/// nested components, each in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: &'static str,
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

impl Component {
    pub fn new(kind: &'static str) -> Self {
        Component {
            kind,
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }
}

/// Escape a TEXT value: `,` → `\,`, `;` → `\;`, line breaks → `\n`.
///
/// Backslashes are left alone.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            _ => out.push(c),
        }
    }

    out
}

/// Render a component tree as content lines joined with CRLF.
///
/// Lines are not folded and the last line has no terminator.
pub fn serialize(root: &Component) -> String {
    let mut lines = Vec::new();
    push_lines(root, &mut lines);
    lines.join("\r\n")
}

fn push_lines(component: &Component, lines: &mut Vec<String>) {
    lines.push(format!("BEGIN:{}", component.kind));

    for property in &component.properties {
        let value = match &property.value {
            Value::Text(text) => escape_text(text),
            Value::Raw(raw) => raw.clone(),
        };
        lines.push(format!("{}:{}", property.name, value));
    }

    for child in &component.components {
        push_lines(child, lines);
    }

    lines.push(format!("END:{}", component.kind));
}
