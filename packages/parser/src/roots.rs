//! Discovery of the JSX trees a module renders

use crate::ast::*;

/// A JSX tree returned directly from a default-exported function
#[derive(Debug, Clone, Copy)]
pub struct ComponentRoot<'a> {
    /// Function name, `None` for anonymous default exports
    pub name: Option<&'a str>,
    /// Index of the `export default` statement in the module
    pub statement_index: usize,
    /// Index of the `return` statement inside the function body
    pub body_index: usize,
    /// Key of the `return` statement
    pub return_id: &'a str,
    pub element: &'a JsxElement,
}

impl<'a> ComponentRoot<'a> {
    /// Display name; anonymous components are called "default"
    pub fn display_name(&self) -> &'a str {
        self.name.unwrap_or("default")
    }
}

/// Every `export default function` in the module, in source order, paired
/// with each `return <jsx>` directly in its body.
///
/// Returns nested deeper (inside `if` blocks or callbacks) are not roots.
pub fn component_roots(module: &Module) -> Vec<ComponentRoot<'_>> {
    let mut roots = Vec::new();

    for (statement_index, statement) in module.statements.iter().enumerate() {
        let StatementKind::ExportDefault {
            declaration: ExportDefaultDeclaration::Function(function),
        } = &statement.kind
        else {
            continue;
        };

        for (body_index, body_statement) in function.body.iter().enumerate() {
            if let Some(element) = body_statement.returned_element() {
                roots.push(ComponentRoot {
                    name: function.name.as_deref(),
                    statement_index,
                    body_index,
                    return_id: &body_statement.span.id,
                    element,
                });
            }
        }
    }

    roots
}
