//! HTTP routing layer declarations.
//!
//! A front door maps exact path and method pairs to compute units. Routes
//! are realized strictly after units: a route must not exist if its target
//! failed to provision.

use serde::{Deserialize, Serialize};

/// HTTP method for an exact-match route. No parameterized segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A declared route from an exact path and method to a target unit id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecl {
    pub path: String,
    pub method: HttpMethod,
    pub target: String,
}

impl RouteDecl {
    pub fn post(path: &str, target: &str) -> Self {
        Self {
            path: path.to_string(),
            method: HttpMethod::Post,
            target: target.to_string(),
        }
    }
}

/// A declared HTTP front door over externally invocable units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpApiDecl {
    pub id: String,
    pub routes: Vec<RouteDecl>,
}

impl HttpApiDecl {
    pub fn qualified_name(&self, namespace: &str) -> String {
        format!("{namespace}-{}", self.id)
    }
}

/// A realized front door with its endpoint token fixed.
///
/// The concrete base URL is only assigned once the front door is deployed,
/// so the manifest carries a substitution token the provisioning engine
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedApi {
    pub id: String,
    pub name: String,
    pub endpoint: String,
    pub routes: Vec<ResolvedRoute>,
}

/// A realized route; the target is a realized unit's logical id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    pub path: String,
    pub method: HttpMethod,
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_strings_are_uppercase() {
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Get.as_str(), "GET");
    }

    #[test]
    fn post_constructor_sets_method() {
        let route = RouteDecl::post("/agentcore/base", "agentcore-hello");
        assert_eq!(route.method, HttpMethod::Post);
        assert_eq!(route.target, "agentcore-hello");
    }

    #[test]
    fn api_name_is_namespace_qualified() {
        let api = HttpApiDecl {
            id: "agentcore".to_string(),
            routes: Vec::new(),
        };
        assert_eq!(api.qualified_name("agentform"), "agentform-agentcore");
    }
}
