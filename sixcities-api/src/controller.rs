use axum::{
    handler::Handler,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use std::fmt;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
struct Route<S> {
    path: &'static str,
    handler: MethodRouter<S>,
}

/// Ordered `(method, path, handler)` list a controller fills in when it is
/// constructed. Paths are relative to wherever the controller gets mounted.
#[derive(Clone)]
pub struct RouteTable<S> {
    routes: Vec<Route<S>>,
}

impl<S> RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn add_route<H, T>(&mut self, method: HttpMethod, path: &'static str, handler: H)
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.routes.push(Route {
            path,
            handler: on(method.filter(), handler),
        });
        info!("Route registered: {} {}", method, path);
    }

    /// Fold the table into an axum router, merging methods that share a path.
    /// Registering the same method twice on one path panics, as in axum.
    pub fn into_router(self) -> Router<S> {
        let mut by_path: Vec<(&'static str, MethodRouter<S>)> = Vec::new();

        for route in self.routes {
            match by_path.iter().position(|(path, _)| *path == route.path) {
                Some(index) => {
                    let (path, existing) = by_path.remove(index);
                    by_path.insert(index, (path, existing.merge(route.handler)));
                }
                None => by_path.push((route.path, route.handler)),
            }
        }

        by_path
            .into_iter()
            .fold(Router::new(), |router, (path, handler)| router.route(path, handler))
    }
}

impl<S> Default for RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An HTTP-facing component whose handlers take `State<Arc<Self>>`
pub trait Controller: Send + Sync + Sized + 'static {
    fn routes(&self) -> &RouteTable<Arc<Self>>;

    fn router(self: Arc<Self>) -> Router {
        let router = self.routes().clone().into_router();
        router.with_state(self)
    }
}
