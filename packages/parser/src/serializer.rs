use crate::ast::*;
use crate::error::GenerateError;

/// Turns a module back into source text.
///
/// Implementations must produce text that parses back to a module with the
/// same structure.
pub trait CodeGenerator {
    fn generate(&mut self, module: &Module) -> Result<String, GenerateError>;
}

/// Serializer converts a module back to source code
///
/// Statements the parser does not model are printed exactly as they were
/// read. JSX text children are printed verbatim, so the whitespace inside a
/// JSX tree comes from the source rather than from `indent_string`.
pub struct Serializer {
    indent_level: usize,
    indent_string: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            indent_string: "  ".to_string(), // 2 spaces
        }
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent_level: 0,
            indent_string: indent.to_string(),
        }
    }

    /// Serialize a module to source code
    pub fn serialize(&mut self, module: &Module) -> Result<String, GenerateError> {
        let mut output = String::new();
        self.indent_level = 0;

        let mut previous: Option<&Statement> = None;
        for statement in &module.statements {
            if let Some(previous) = previous {
                output.push('\n');
                if !is_grouped(previous, statement) {
                    output.push('\n');
                }
            }
            self.serialize_statement(statement, &mut output)?;
            previous = Some(statement);
        }

        if !module.trailing_comments.is_empty() {
            if !module.statements.is_empty() {
                output.push('\n');
            }
            self.serialize_comments(&module.trailing_comments, &mut output);
        } else if !output.is_empty() {
            output.push('\n');
        }

        Ok(output)
    }

    /// Source text for a single JSX child
    pub fn serialize_child(&self, child: &JsxChild) -> Result<String, GenerateError> {
        let mut output = String::new();
        self.serialize_jsx_child(child, &mut output)?;
        Ok(output)
    }

    fn serialize_comments(&self, comments: &[String], output: &mut String) {
        for comment in comments {
            self.write_indent(output);
            output.push_str(comment);
            output.push('\n');
        }
    }

    fn serialize_statement(&mut self, statement: &Statement, output: &mut String) -> Result<(), GenerateError> {
        self.serialize_comments(&statement.leading_comments, output);
        self.write_indent(output);

        match &statement.kind {
            StatementKind::Opaque { code } => output.push_str(code),
            StatementKind::ExportDefault { declaration } => {
                output.push_str("export default ");
                match declaration {
                    ExportDefaultDeclaration::Function(function) => self.serialize_function(function, output)?,
                    ExportDefaultDeclaration::Other { code } => output.push_str(code),
                }
            }
            StatementKind::Return { argument } => self.serialize_return(argument.as_ref(), output)?,
        }

        Ok(())
    }

    fn serialize_function(&mut self, function: &FunctionDeclaration, output: &mut String) -> Result<(), GenerateError> {
        if function.is_async {
            output.push_str("async ");
        }
        output.push_str("function");
        if let Some(name) = &function.name {
            output.push(' ');
            output.push_str(name);
        }
        output.push_str(&function.params);
        if let Some(return_type) = &function.return_type {
            output.push_str(": ");
            output.push_str(return_type);
        }

        if function.body.is_empty() && function.body_trailing_comments.is_empty() {
            output.push_str(" {}");
            return Ok(());
        }

        output.push_str(" {\n");
        self.indent_level += 1;

        for statement in &function.body {
            self.serialize_statement(statement, output)?;
            output.push('\n');
        }
        self.serialize_comments(&function.body_trailing_comments, output);

        self.indent_level -= 1;
        self.write_indent(output);
        output.push('}');

        Ok(())
    }

    fn serialize_return(&mut self, argument: Option<&Expression>, output: &mut String) -> Result<(), GenerateError> {
        match argument {
            None => output.push_str("return;"),
            Some(Expression::Other { code, .. }) => {
                output.push_str("return ");
                output.push_str(code);
                output.push(';');
            }
            Some(Expression::Jsx { element, parenthesized }) => {
                let mut jsx = String::new();
                self.serialize_element(element, &mut jsx)?;

                if *parenthesized || jsx.contains('\n') {
                    output.push_str("return (\n");
                    self.indent_level += 1;
                    self.write_indent(output);
                    output.push_str(&jsx);
                    output.push('\n');
                    self.indent_level -= 1;
                    self.write_indent(output);
                    output.push_str(");");
                } else {
                    output.push_str("return ");
                    output.push_str(&jsx);
                    output.push(';');
                }
            }
        }
        Ok(())
    }

    fn serialize_element(&self, element: &JsxElement, output: &mut String) -> Result<(), GenerateError> {
        if element.name.is_empty() {
            return Err(GenerateError::Unsupported {
                node: element.span.id.clone(),
                message: "element has no tag name".to_string(),
            });
        }

        output.push('<');
        output.push_str(&element.name);

        for attribute in &element.attributes {
            output.push(' ');
            self.serialize_attribute(attribute, output)?;
        }

        if element.children.is_empty() {
            if element.self_closing {
                output.push_str(" />");
            } else {
                output.push_str("></");
                output.push_str(&element.name);
                output.push('>');
            }
            return Ok(());
        }

        output.push('>');
        for child in &element.children {
            self.serialize_jsx_child(child, output)?;
        }
        output.push_str("</");
        output.push_str(&element.name);
        output.push('>');

        Ok(())
    }

    fn serialize_attribute(&self, attribute: &JsxAttribute, output: &mut String) -> Result<(), GenerateError> {
        match attribute {
            JsxAttribute::Named { name, value, span } => {
                if name.is_empty() {
                    return Err(GenerateError::Unsupported {
                        node: span.id.clone(),
                        message: "attribute has no name".to_string(),
                    });
                }
                output.push_str(name);
                match value {
                    None => {}
                    Some(AttributeValue::String { value, quote }) => {
                        if value.contains(*quote) {
                            return Err(GenerateError::Unsupported {
                                node: span.id.clone(),
                                message: format!("value of '{}' contains its own quote", name),
                            });
                        }
                        output.push('=');
                        output.push(*quote);
                        output.push_str(value);
                        output.push(*quote);
                    }
                    Some(AttributeValue::Expression { code }) => {
                        output.push_str("={");
                        output.push_str(code);
                        output.push('}');
                    }
                }
            }
            JsxAttribute::Spread { code, .. } => {
                output.push('{');
                output.push_str(code);
                output.push('}');
            }
        }
        Ok(())
    }

    fn serialize_jsx_child(&self, child: &JsxChild, output: &mut String) -> Result<(), GenerateError> {
        match child {
            JsxChild::Element(element) => self.serialize_element(element, output)?,
            JsxChild::Text { value, .. } => output.push_str(value),
            JsxChild::Expression { code, .. } => {
                output.push('{');
                output.push_str(code);
                output.push('}');
            }
            JsxChild::Fragment { children, .. } => {
                output.push_str("<>");
                for child in children {
                    self.serialize_jsx_child(child, output)?;
                }
                output.push_str("</>");
            }
        }
        Ok(())
    }

    fn write_indent(&self, output: &mut String) {
        for _ in 0..self.indent_level {
            output.push_str(&self.indent_string);
        }
    }
}

impl CodeGenerator for Serializer {
    fn generate(&mut self, module: &Module) -> Result<String, GenerateError> {
        self.serialize(module)
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Consecutive single-line statements opening with the same keyword (import
/// blocks and the like) are printed without a blank line between them
fn is_grouped(previous: &Statement, current: &Statement) -> bool {
    match (single_line_code(previous), single_line_code(current)) {
        (Some(a), Some(b)) => a.split_whitespace().next() == b.split_whitespace().next(),
        _ => false,
    }
}

fn single_line_code(statement: &Statement) -> Option<&str> {
    match &statement.kind {
        StatementKind::Opaque { code } if statement.leading_comments.is_empty() && !code.contains('\n') => {
            Some(code)
        }
        _ => None,
    }
}

/// Convenience function to serialize a module with default indentation
pub fn serialize(module: &Module) -> Result<String, GenerateError> {
    Serializer::new().serialize(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_serialize_simple_component() {
        let source = "export default function App() {\n  return <div className=\"p-[4px]\" />;\n}\n";
        let module = parse(source).unwrap();

        assert_eq!(serialize(&module).unwrap(), source);
    }

    #[test]
    fn test_imports_stay_together() {
        let source = "import a from \"a\";\nimport b from \"b\";\n\nexport default function App() {}\n";
        let module = parse(source).unwrap();

        assert_eq!(serialize(&module).unwrap(), source);
    }

    #[test]
    fn test_multiline_jsx_is_parenthesized() {
        let source = "export default function App() {\n  return (\n    <div>\n      <span>hi</span>\n    </div>\n  );\n}\n";
        let module = parse(source).unwrap();

        assert_eq!(serialize(&module).unwrap(), source);
    }

    #[test]
    fn test_roundtrip_preserves_structure() {
        let source = r#"// header
import React from "react"
const list = [1, 2].map((n) => <li key={n}>{n}</li>)
export default async function Page({ id }: { id: string }): Promise<JSX.Element> {
  // before return
  const data = await load(id)
  return <section {...data} hidden><h1 title='x "y"'>Title</h1>{list}<>frag</></section>
}
"#;
        let module = parse(source).unwrap();
        let generated = serialize(&module).unwrap();
        let reparsed = parse(&generated).unwrap();

        assert_eq!(serialize(&reparsed).unwrap(), generated);
        assert_eq!(reparsed.statements.len(), module.statements.len());
    }

    #[test]
    fn test_custom_indent() {
        let module = parse("export default function A() {\n  return null\n}\n").unwrap();
        let output = Serializer::with_indent("\t").serialize(&module).unwrap();

        assert_eq!(output, "export default function A() {\n\treturn null;\n}\n");
    }

    #[test]
    fn test_unnamed_element_is_rejected() {
        let child = JsxChild::Element(JsxElement {
            name: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: true,
            span: Span::synthetic("x".to_string()),
        });

        assert!(matches!(
            Serializer::new().serialize_child(&child),
            Err(GenerateError::Unsupported { .. })
        ));
    }
}
