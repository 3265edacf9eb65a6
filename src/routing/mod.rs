pub mod distance;
mod resolver;

pub use resolver::{
    fallback_route, RouteResolver, Unresolvable, FALLBACK_SUMMARY, NO_COORDINATES_SUMMARY,
};
