use crate::dispatcher::{invoke, Handler, HandlerRequest, HandlerResponse};
use crate::error::RegistrationError;
use http::Method;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path/query parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter storage; names come from the compiled layer and are shared.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Methods a layer registered with [`Router::all`] answers to.
const ALL_METHODS: [Method; 7] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// What happens when a method is registered twice on the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Add another layer; the earlier one keeps answering first
    #[default]
    Append,
    /// Replace the handler of the existing layer in place
    Override,
    /// Fail with [`RegistrationError::DuplicateRoute`]
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(DuplicatePolicy::Append),
            "override" => Ok(DuplicatePolicy::Override),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!(
                "unknown duplicate policy '{other}' (expected append, override or reject)"
            )),
        }
    }
}

/// Router construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Base path prepended to every registered route (e.g. `/api/v1`)
    pub prefix: String,
    pub duplicates: DuplicatePolicy,
}

impl RouterOptions {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

/// One registered route: a compiled path, its methods and its handler.
#[derive(Clone)]
pub struct Layer {
    path: String,
    /// Path with parameters reduced to `{}` and no trailing slash
    key: String,
    methods: Vec<Method>,
    /// HEAD was added because of GET, not asked for
    implicit_head: bool,
    name: Option<String>,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    handler: Handler,
}

impl Layer {
    fn new(
        path: String,
        methods: Vec<Method>,
        implicit_head: bool,
        name: Option<String>,
        handler: Handler,
    ) -> Result<Self, RegistrationError> {
        let (regex, param_names) = path_to_regex(&path)?;
        Ok(Self {
            key: route_key(&path),
            path,
            methods,
            implicit_head,
            name,
            regex,
            param_names,
            handler,
        })
    }

    /// Full path pattern, prefix included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Methods this layer answers to; GET layers also list HEAD.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Layer name (`controller.function` for specification routes).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Parameter names in path order.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    fn matches_path(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// Whether `method` was registered explicitly on this layer.
    fn claims(&self, method: &Method) -> bool {
        self.allows(method) && !(self.implicit_head && *method == Method::HEAD)
    }

    fn claimed_methods(&self) -> Vec<Method> {
        self.methods.iter().filter(|m| self.claims(m)).cloned().collect()
    }

    /// Give up `methods` to another layer. HEAD goes too when it was only
    /// there because of a released GET.
    fn release(&mut self, methods: &[Method]) {
        let drop_head = methods.contains(&Method::HEAD)
            || (self.implicit_head && methods.contains(&Method::GET));
        self.methods.retain(|m| {
            if *m == Method::HEAD {
                !drop_head
            } else {
                !methods.contains(m)
            }
        });
        self.implicit_head = self.implicit_head && self.methods.contains(&Method::HEAD);
    }

    fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        let mut params = ParamVec::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(val) = caps.get(i + 1) {
                params.push((Arc::clone(name), val.as_str().to_string()));
            }
        }
        Some(params)
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("path", &self.path)
            .field("methods", &self.methods)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Layers matching a path, as returned by [`Router::matches`].
#[derive(Debug, Default)]
pub struct Match<'a> {
    /// Every layer whose pattern matches the path, whatever its methods
    pub path: Vec<&'a Layer>,
    /// Layers matching both the path and the method
    pub path_and_method: Vec<&'a Layer>,
    /// True when at least one layer matches both
    pub route: bool,
}

/// Result of successfully matching a request to a layer.
#[derive(Clone)]
pub struct RouteMatch {
    /// Matched layer pattern
    pub path_pattern: String,
    /// Matched layer name
    pub name: Option<String>,
    /// Path parameters extracted from the URL (e.g., `{id}` → `("id", "123")`)
    pub path_params: ParamVec,
    pub handler: Handler,
}

impl RouteMatch {
    /// Get a path parameter by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("path_pattern", &self.path_pattern)
            .field("name", &self.name)
            .field("path_params", &self.path_params)
            .finish_non_exhaustive()
    }
}

/// Method-based HTTP router with an ordered route table.
///
/// Layers are tried in registration order, so an earlier overlapping
/// pattern wins. Mutation takes `&mut self`; share a router across threads
/// behind a lock if it must change after startup.
#[derive(Clone, Default)]
pub struct Router {
    layers: Vec<Layer>,
    options: RouterOptions,
}

impl Router {
    /// Router with no prefix that appends duplicate registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: RouterOptions) -> Self {
        let prefix = normalize_prefix(&options.prefix);
        Self {
            layers: Vec::new(),
            options: RouterOptions { prefix, ..options },
        }
    }

    /// Normalized prefix (no trailing slash, empty when unset).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.options.prefix
    }

    #[must_use]
    pub fn router_options(&self) -> &RouterOptions {
        &self.options
    }

    /// Registered layers in match order.
    #[must_use]
    pub fn routes(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Register `handler` for `methods` on `path` (prefix is prepended).
    ///
    /// Registering GET also answers HEAD. A method already registered on the
    /// same route is handled per [`DuplicatePolicy`]. Paths that differ only
    /// in parameter names or syntax, or in a trailing slash, are the same
    /// route.
    pub fn register(
        &mut self,
        methods: &[Method],
        path: &str,
        name: Option<&str>,
        handler: Handler,
    ) -> Result<&Layer, RegistrationError> {
        let full_path = join_paths(&self.options.prefix, path);

        let mut layer_methods: Vec<Method> = Vec::with_capacity(methods.len() + 1);
        for m in methods {
            if !layer_methods.contains(m) {
                layer_methods.push(m.clone());
            }
        }
        let implicit_head =
            layer_methods.contains(&Method::GET) && !layer_methods.contains(&Method::HEAD);
        if implicit_head {
            layer_methods.push(Method::HEAD);
        }

        let key = route_key(&full_path);
        let existing = self.layers.iter().find_map(|l| {
            if l.key != key {
                return None;
            }
            methods.iter().find(|m| l.claims(m)).cloned()
        });

        let name = name.map(str::to_string);
        let index = match (existing, self.options.duplicates) {
            (Some(method), DuplicatePolicy::Reject) => {
                warn!(method = %method, path = %full_path, "Duplicate route rejected");
                return Err(RegistrationError::DuplicateRoute {
                    method,
                    path: full_path,
                });
            }
            (Some(_), DuplicatePolicy::Override) => {
                let explicit: Vec<Method> = layer_methods
                    .iter()
                    .filter(|m| !(implicit_head && **m == Method::HEAD))
                    .cloned()
                    .collect();
                let layer = Layer::new(full_path, layer_methods, implicit_head, name, handler)?;
                self.override_route(&key, &explicit, layer)
            }
            (Some(_), DuplicatePolicy::Append) | (None, _) => {
                let layer = Layer::new(full_path, layer_methods, implicit_head, name, handler)?;
                debug!(
                    path = %layer.path,
                    methods = ?layer.methods,
                    name = ?layer.name,
                    total_routes = self.layers.len() + 1,
                    "Route registered"
                );
                self.layers.push(layer);
                self.layers.len() - 1
            }
        };

        Ok(&self.layers[index])
    }

    /// Put `layer` in place of the routes it supersedes.
    ///
    /// A layer on the same route claiming exactly `explicit` is replaced in
    /// place. Other layers on that route only lose the overlapping methods
    /// and disappear once they claim nothing; the new layer is then
    /// appended.
    fn override_route(&mut self, key: &str, explicit: &[Method], layer: Layer) -> usize {
        let target = self.layers.iter().position(|l| {
            let claimed = l.claimed_methods();
            l.key == key
                && claimed.len() == explicit.len()
                && claimed.iter().all(|m| explicit.contains(m))
        });

        for (idx, existing) in self.layers.iter_mut().enumerate() {
            if existing.key == key && Some(idx) != target {
                existing.release(explicit);
            }
        }

        let index = match target {
            Some(idx) => {
                warn!(
                    path = %layer.path,
                    methods = ?layer.methods,
                    previous_name = ?self.layers[idx].name,
                    name = ?layer.name,
                    "Replaced existing route handler"
                );
                self.layers[idx] = layer;
                idx - self.layers[..idx].iter().filter(|l| l.methods.is_empty()).count()
            }
            None => {
                warn!(
                    path = %layer.path,
                    methods = ?layer.methods,
                    name = ?layer.name,
                    "Took over methods from existing routes"
                );
                self.layers.push(layer);
                self.layers.len() - 1 - self.layers.iter().filter(|l| l.methods.is_empty()).count()
            }
        };
        self.layers.retain(|l| !l.methods.is_empty());
        index
    }

    pub fn get(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RegistrationError> {
        self.register(&[Method::GET], path, None, handler)?;
        Ok(self)
    }

    pub fn post(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RegistrationError> {
        self.register(&[Method::POST], path, None, handler)?;
        Ok(self)
    }

    pub fn put(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RegistrationError> {
        self.register(&[Method::PUT], path, None, handler)?;
        Ok(self)
    }

    pub fn delete(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RegistrationError> {
        self.register(&[Method::DELETE], path, None, handler)?;
        Ok(self)
    }

    pub fn patch(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RegistrationError> {
        self.register(&[Method::PATCH], path, None, handler)?;
        Ok(self)
    }

    pub fn options(
        &mut self,
        path: &str,
        handler: Handler,
    ) -> Result<&mut Self, RegistrationError> {
        self.register(&[Method::OPTIONS], path, None, handler)?;
        Ok(self)
    }

    pub fn head(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RegistrationError> {
        self.register(&[Method::HEAD], path, None, handler)?;
        Ok(self)
    }

    /// Register `handler` for every supported method.
    pub fn all(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RegistrationError> {
        self.register(&ALL_METHODS, path, None, handler)?;
        Ok(self)
    }

    /// Layers matching `path`, split by whether they also accept `method`.
    ///
    /// A query string on `path` is ignored.
    #[must_use]
    pub fn matches(&self, path: &str, method: &Method) -> Match<'_> {
        let path = strip_query(path);
        let mut matched = Match::default();
        for layer in self.layers.iter().filter(|l| l.matches_path(path)) {
            matched.path.push(layer);
            if layer.allows(method) {
                matched.path_and_method.push(layer);
                matched.route = true;
            }
        }
        matched
    }

    /// First layer matching both `method` and `path`, with its parameters.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let path = strip_query(path);
        let found = self
            .layers
            .iter()
            .filter(|l| l.allows(method))
            .find_map(|l| l.captures(path).map(|params| (l, params)));

        match found {
            Some((layer, params)) => {
                debug!(
                    method = %method,
                    path = %path,
                    route_pattern = %layer.path,
                    name = ?layer.name,
                    path_params = ?params,
                    "Route matched"
                );
                Some(RouteMatch {
                    path_pattern: layer.path.clone(),
                    name: layer.name.clone(),
                    path_params: params,
                    handler: Arc::clone(&layer.handler),
                })
            }
            None => {
                debug!(method = %method, path = %path, "No route matched");
                None
            }
        }
    }

    /// Match `uri` (path plus optional query string) and run its handler.
    ///
    /// Returns `None` when no layer matches.
    #[must_use]
    pub fn dispatch(&self, method: &Method, uri: &str, body: Option<Value>) -> Option<HandlerResponse> {
        let route = self.route(method, uri)?;
        let (path, query) = match uri.split_once('?') {
            Some((p, q)) => (p, q),
            None => (uri, ""),
        };
        let query_params: ParamVec = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
            .collect();

        let req = HandlerRequest {
            method: method.clone(),
            path: path.to_string(),
            route_name: route.name,
            path_params: route.path_params,
            query_params,
            body,
        };
        Some(invoke(&route.handler, &req))
    }

    /// Log the route table at info level.
    pub fn dump_routes(&self) {
        info!(
            prefix = %self.options.prefix,
            routes_count = self.layers.len(),
            "Route table"
        );
        for layer in &self.layers {
            info!(
                methods = ?layer.methods,
                path = %layer.path,
                name = ?layer.name,
                "Route"
            );
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("options", &self.options)
            .field("layers", &self.layers)
            .finish()
    }
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}

/// `/api/` → `/api`, `api` → `/api`, `/` → ``.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Join a normalized prefix and a route path.
///
/// A root route under a prefix becomes the prefix itself.
pub(crate) fn join_paths(prefix: &str, path: &str) -> String {
    let path = if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if prefix.is_empty() {
        if path.is_empty() {
            "/".to_string()
        } else {
            path
        }
    } else if path.is_empty() || path == "/" {
        prefix.to_string()
    } else {
        format!("{prefix}{path}")
    }
}

/// Identity of a route for duplicate detection.
///
/// `/u/{id}`, `/u/:id` and `/u/{id}/` match the same URLs and share the key
/// `/u/{}`.
pub(crate) fn route_key(path: &str) -> String {
    let mut key = String::with_capacity(path.len());
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        key.push('/');
        if segment.starts_with(':') {
            key.push_str("{}");
            continue;
        }
        let mut rest = segment;
        while let Some((open, close)) = rest
            .find('{')
            .and_then(|open| rest[open..].find('}').map(|c| (open, open + c)))
        {
            key.push_str(&rest[..open]);
            key.push_str("{}");
            rest = &rest[close + 1..];
        }
        key.push_str(rest);
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}

/// Compile a path pattern into an anchored regex and its parameter names.
///
/// `{name}` and `:name` segments capture one segment each; `{name}` may
/// also sit inside a segment (`/files/{name}.json`). Literal text is
/// escaped. A single trailing slash is tolerated.
pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<Arc<str>>), RegistrationError> {
    let invalid = |reason: &str| RegistrationError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path == "/" || path.is_empty() {
        let regex = Regex::new(r"^/$").map_err(|e| invalid(&e.to_string()))?;
        return Ok((regex, Vec::new()));
    }

    let mut pattern = String::with_capacity(path.len() + 8);
    pattern.push('^');
    let mut param_names: Vec<Arc<str>> = Vec::with_capacity(path.matches('{').count());

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        pattern.push('/');
        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                return Err(invalid("empty parameter name"));
            }
            pattern.push_str("([^/]+)");
            param_names.push(Arc::from(name));
            continue;
        }

        let mut rest = segment;
        while let Some(open) = rest.find('{') {
            let close = rest[open..]
                .find('}')
                .map(|c| open + c)
                .ok_or_else(|| invalid("unclosed '{'"))?;
            let name = &rest[open + 1..close];
            if name.is_empty() {
                return Err(invalid("empty parameter name"));
            }
            pattern.push_str(&regex::escape(&rest[..open]));
            pattern.push_str("([^/]+?)");
            param_names.push(Arc::from(name));
            rest = &rest[close + 1..];
        }
        pattern.push_str(&regex::escape(rest));
    }

    pattern.push_str("/?$");
    let regex = Regex::new(&pattern).map_err(|e| invalid(&e.to_string()))?;
    Ok((regex, param_names))
}
