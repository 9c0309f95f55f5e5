//! Placeholder template engine.
//!
//! Template files substitute `{{ … }}` placeholders against a
//! [`RenderContext`]:
//!
//! - `{{ServiceName}}` — variable lookup
//! - `{{snake ServiceName}}` — helper applied to a variable
//! - `{{joinPath ProjectName ServiceName}}` — multi-argument helper
//!
//! Available helpers: `snake`, `kebab`, `camel`, `title`, `upper`, `lower`
//! (one argument each) and `joinPath` (one or more arguments, joined with
//! `/`).
//!
//! A syntax error, an undefined variable, or an unknown helper is a hard
//! error — it indicates a broken pack, not a transient condition, so the
//! enclosing materialization must fail rather than present partial output as
//! success.
//!
//! Rendering is deterministic: the same source against the same context
//! always yields byte-identical output. No timestamps, no randomness.

use super::{context::RenderContext, error::DomainError, naming};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Render template text against a context.
pub fn render(source: &str, ctx: &RenderContext) -> Result<String, DomainError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            return Err(DomainError::TemplateSyntax {
                reason: format!("unterminated '{OPEN}' placeholder"),
            });
        };
        out.push_str(&eval(after[..end].trim(), ctx)?);
        rest = &after[end + CLOSE.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Evaluate one placeholder expression: a bare variable or `helper args…`.
fn eval(expr: &str, ctx: &RenderContext) -> Result<String, DomainError> {
    let mut parts = expr.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(DomainError::TemplateSyntax {
            reason: "empty placeholder".to_string(),
        });
    };

    let args: Vec<&str> = parts.collect();
    if args.is_empty() {
        return lookup(head, ctx);
    }

    // Helper arguments are variable names, resolved before application.
    let values = args
        .iter()
        .map(|name| lookup(name, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    apply_helper(head, &values)
}

fn lookup(name: &str, ctx: &RenderContext) -> Result<String, DomainError> {
    ctx.get(name)
        .map(str::to_owned)
        .ok_or_else(|| DomainError::UndefinedVariable { name: name.to_string() })
}

fn apply_helper(name: &str, values: &[String]) -> Result<String, DomainError> {
    match name {
        "snake" => unary(name, values).map(|v| naming::to_snake(v)),
        "kebab" => unary(name, values).map(|v| naming::to_kebab(v)),
        "camel" => unary(name, values).map(|v| naming::to_camel(v)),
        "title" => unary(name, values).map(|v| naming::to_title(v)),
        "upper" => unary(name, values).map(str::to_uppercase),
        "lower" => unary(name, values).map(str::to_lowercase),
        "joinPath" => Ok(values.join("/")),
        _ => Err(DomainError::UnknownHelper { name: name.to_string() }),
    }
}

fn unary<'v>(name: &str, values: &'v [String]) -> Result<&'v str, DomainError> {
    match values {
        [single] => Ok(single),
        _ => Err(DomainError::TemplateSyntax {
            reason: format!("helper '{name}' takes exactly one argument, got {}", values.len()),
        }),
    }
}
