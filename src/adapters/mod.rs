// Adapters layer: concrete implementations of the domain ports (http, phabricator, output).

pub mod http;
pub mod output;
pub mod phabricator;
