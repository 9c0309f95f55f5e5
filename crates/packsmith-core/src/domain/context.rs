//! Context for template rendering.
//!
//! A [`RenderContext`] carries all data available for substitution inside a
//! template file during one materialization: the project identity, the
//! service name, and naming variants derived from them. It is built once per
//! scaffolding operation and shared read-only across every file rendered in
//! that operation — even if the project marker file changes mid-operation,
//! the context stays constant.

use std::collections::HashMap;

use super::naming;

/// Immutable variable map for one scaffolding operation.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `ProjectName` | `"example.com/shop"` | project identity marker |
/// | `ServiceName` | `"orders"` | user input |
/// | `ServiceSlug` | `"orders-api"` | kebab-cased service name |
/// | `ServiceSnake` | `"orders_api"` | snake-cased service name |
/// | `ServiceImportPath` | `"example.com/shop/services/orders"` | computed |
/// | `CommonImportPath` | `"example.com/shop/services/common"` | computed |
///
/// All transformations happen once at construction; rendering only looks
/// variables up.
#[derive(Debug, Clone)]
pub struct RenderContext {
    project_name: String,
    service_name: String,
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// Build the context for scaffolding one service.
    pub fn for_service(project_name: impl Into<String>, service_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        let service_name = service_name.into();

        let mut variables = HashMap::new();
        // Standard variables - the contract between Packsmith and templates.
        variables.insert("ProjectName".to_string(), project_name.clone());
        variables.insert("ServiceName".to_string(), service_name.clone());
        variables.insert("ServiceSlug".to_string(), naming::to_kebab(&service_name));
        variables.insert("ServiceSnake".to_string(), naming::to_snake(&service_name));
        variables.insert(
            "ServiceImportPath".to_string(),
            format!("{project_name}/services/{service_name}"),
        );
        variables.insert(
            "CommonImportPath".to_string(),
            format!("{project_name}/services/common"),
        );

        Self {
            project_name,
            service_name,
            variables,
        }
    }

    /// Add a custom variable, consuming self and returning a new context.
    ///
    /// Custom variables can shadow built-ins; the last insert wins.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Look up a variable value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
