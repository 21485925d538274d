use serde::{Deserialize, Serialize};

/// Span information for source location tracking.
///
/// `id` is the node's stable key; it travels with the node when the node is
/// moved to another place in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub id: String,
}

impl Span {
    pub fn new(start: usize, end: usize, id: String) -> Self {
        Self { start, end, id }
    }

    /// Span for a node that was created by an edit and has no source range
    pub fn synthetic(id: String) -> Self {
        Self { start: 0, end: 0, id }
    }
}

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub statements: Vec<Statement>,
    /// Comments after the last statement
    pub trailing_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub leading_comments: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatementKind {
    /// `export default ...`
    ExportDefault { declaration: ExportDefaultDeclaration },

    /// `return ...` (only recognized directly inside function bodies)
    Return { argument: Option<Expression> },

    /// Any statement the editor does not look into, kept verbatim
    Opaque { code: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExportDefaultDeclaration {
    Function(FunctionDeclaration),
    /// Exported expression or class, kept verbatim
    Other { code: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub is_async: bool,
    pub name: Option<String>,
    /// Parameter list including its parentheses
    pub params: String,
    /// TypeScript return annotation without the leading colon
    pub return_type: Option<String>,
    pub body: Vec<Statement>,
    pub body_trailing_comments: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Jsx {
        element: JsxElement,
        parenthesized: bool,
    },
    Other {
        code: String,
        span: Span,
    },
}

/// JSX element (`<tag ...>children</tag>` or `<tag ... />`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsxElement {
    pub name: String,
    pub attributes: Vec<JsxAttribute>,
    pub children: Vec<JsxChild>,
    pub self_closing: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxAttribute {
    Named {
        name: String,
        value: Option<AttributeValue>,
        span: Span,
    },
    /// `{...props}`; `code` is everything between the braces
    Spread { code: String, span: Span },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttributeValue {
    String { value: String, quote: char },
    Expression { code: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxChild {
    Element(JsxElement),
    Text { value: String, span: Span },
    /// `{...}`; `code` is everything between the braces
    Expression { code: String, span: Span },
    Fragment { children: Vec<JsxChild>, span: Span },
}

impl Module {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }

    /// Find a JSX element anywhere under a component root by key
    pub fn find_element(&self, id: &str) -> Option<&JsxElement> {
        self.jsx_roots().find_map(|root| root.find_element(id))
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut JsxElement> {
        self.jsx_roots_mut().find_map(|root| root.find_element_mut(id))
    }

    fn jsx_roots(&self) -> impl Iterator<Item = &JsxElement> {
        self.statements.iter().flat_map(|statement| match &statement.kind {
            StatementKind::ExportDefault {
                declaration: ExportDefaultDeclaration::Function(function),
            } => function
                .body
                .iter()
                .filter_map(|s| s.returned_element())
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }

    fn jsx_roots_mut(&mut self) -> impl Iterator<Item = &mut JsxElement> {
        self.statements
            .iter_mut()
            .flat_map(|statement| match &mut statement.kind {
                StatementKind::ExportDefault {
                    declaration: ExportDefaultDeclaration::Function(function),
                } => function
                    .body
                    .iter_mut()
                    .filter_map(|s| s.returned_element_mut())
                    .collect::<Vec<_>>(),
                _ => Vec::new(),
            })
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement {
    /// The JSX element this statement returns, if it is `return <jsx>`
    pub fn returned_element(&self) -> Option<&JsxElement> {
        match &self.kind {
            StatementKind::Return {
                argument: Some(Expression::Jsx { element, .. }),
            } => Some(element),
            _ => None,
        }
    }

    pub fn returned_element_mut(&mut self) -> Option<&mut JsxElement> {
        match &mut self.kind {
            StatementKind::Return {
                argument: Some(Expression::Jsx { element, .. }),
            } => Some(element),
            _ => None,
        }
    }
}

impl JsxElement {
    pub fn id(&self) -> &str {
        &self.span.id
    }

    /// Depth-first search through element children (fragments and
    /// expression containers are opaque and not searched)
    pub fn find_element(&self, id: &str) -> Option<&JsxElement> {
        if self.span.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            JsxChild::Element(element) => element.find_element(id),
            _ => None,
        })
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut JsxElement> {
        if self.span.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            JsxChild::Element(element) => element.find_element_mut(id),
            _ => None,
        })
    }

    pub fn child_position(&self, id: &str) -> Option<usize> {
        self.children.iter().position(|child| child.id() == id)
    }

    /// Detach a direct child by key
    pub fn remove_child(&mut self, id: &str) -> Option<JsxChild> {
        let index = self.child_position(id)?;
        Some(self.children.remove(index))
    }

    pub fn attribute(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes.iter().find(|attr| attr.name() == Some(name))
    }

    /// Value of a string-literal attribute
    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        match self.attribute(name) {
            Some(JsxAttribute::Named {
                value: Some(AttributeValue::String { value, .. }),
                ..
            }) => Some(value),
            _ => None,
        }
    }

    /// Set a string-literal attribute, replacing any existing value in place
    /// or appending a new attribute with the given key
    pub fn set_string_attribute(&mut self, name: &str, value: &str, new_id: impl FnOnce() -> String) {
        let existing = self
            .attributes
            .iter_mut()
            .find(|attr| attr.name() == Some(name));

        match existing {
            Some(JsxAttribute::Named { value: slot, .. }) => {
                let quote = match slot {
                    Some(AttributeValue::String { quote, .. }) => *quote,
                    _ => '"',
                };
                *slot = Some(AttributeValue::String {
                    value: value.to_string(),
                    quote: pick_quote(value, quote),
                });
            }
            _ => self.attributes.push(JsxAttribute::Named {
                name: name.to_string(),
                value: Some(AttributeValue::String {
                    value: value.to_string(),
                    quote: pick_quote(value, '"'),
                }),
                span: Span::synthetic(new_id()),
            }),
        }
    }

    /// Remove a named attribute; returns whether one was present
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|attr| attr.name() != Some(name));
        before != self.attributes.len()
    }
}

/// Whether a string attribute can hold `value`. JSX strings have no
/// escapes, so a value with both quote characters has no spelling.
pub fn is_printable_attribute_value(value: &str) -> bool {
    !(value.contains('"') && value.contains('\''))
}

/// JSX strings have no escapes, so switch quotes when the value needs it
fn pick_quote(value: &str, preferred: char) -> char {
    if value.contains(preferred) {
        if preferred == '"' {
            '\''
        } else {
            '"'
        }
    } else {
        preferred
    }
}

impl JsxAttribute {
    /// Attribute name (`None` for spreads)
    pub fn name(&self) -> Option<&str> {
        match self {
            JsxAttribute::Named { name, .. } => Some(name),
            JsxAttribute::Spread { .. } => None,
        }
    }
}

impl JsxChild {
    pub fn span(&self) -> &Span {
        match self {
            JsxChild::Element(element) => &element.span,
            JsxChild::Text { span, .. }
            | JsxChild::Expression { span, .. }
            | JsxChild::Fragment { span, .. } => span,
        }
    }

    pub fn span_mut(&mut self) -> &mut Span {
        match self {
            JsxChild::Element(element) => &mut element.span,
            JsxChild::Text { span, .. }
            | JsxChild::Expression { span, .. }
            | JsxChild::Fragment { span, .. } => span,
        }
    }

    pub fn id(&self) -> &str {
        &self.span().id
    }

    /// Give this child and everything under it fresh keys
    pub fn rekey(&mut self, new_id: &mut impl FnMut() -> String) {
        self.span_mut().id = new_id();
        match self {
            JsxChild::Element(element) => {
                for attr in &mut element.attributes {
                    match attr {
                        JsxAttribute::Named { span, .. } | JsxAttribute::Spread { span, .. } => {
                            span.id = new_id();
                        }
                    }
                }
                for child in &mut element.children {
                    child.rekey(new_id);
                }
            }
            JsxChild::Fragment { children, .. } => {
                for child in children {
                    child.rekey(new_id);
                }
            }
            JsxChild::Text { .. } | JsxChild::Expression { .. } => {}
        }
    }
}
