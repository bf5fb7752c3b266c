pub mod config;
pub mod credentials;
pub mod diagnostics;
pub mod fetch;
pub mod github;
pub mod output;
pub mod snapshot;
pub mod tally;
