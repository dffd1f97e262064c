//! Graph API request values
//!
//! A `GraphRequest` is the transport-neutral description of one call:
//! which resource, which verb, which parameters and whose token. Adapters
//! decide how it goes on the wire.

use std::fmt;

/// HTTP verb of a Graph API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Value of a single request parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Wire form of the value
    pub fn render(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Text(s) => s.clone(),
            ParamValue::List(items) => items.join(","),
        }
    }
}

/// A named request parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
}

impl Param {
    pub fn bool(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::Bool(value),
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::Text(value.into()),
        }
    }

    pub fn list<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value: ParamValue::List(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// One Graph API call
#[derive(Clone, PartialEq, Eq)]
pub struct GraphRequest {
    pub method: Method,
    /// Resource path relative to the API root, e.g. `/1234/accounts/test-users`
    pub path: String,
    pub params: Vec<Param>,
    /// Token the call is authenticated with, if any
    pub access_token: Option<String>,
}

impl GraphRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            access_token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set a parameter, replacing any existing one with the same name
    pub fn set_param(&mut self, param: Param) {
        self.params.retain(|p| p.name != param.name);
        self.params.push(param);
    }

    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Parameters rendered as name/value pairs, without the access token
    pub fn rendered_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|p| (p.name.clone(), p.value.render()))
            .collect()
    }
}

// Tokens stay out of debug output so requests can be logged safely
impl fmt::Debug for GraphRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
