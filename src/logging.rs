// src/logging.rs
// =============================================================================
// Log setup.
//
// Everything goes to stderr; stdout is reserved for the JSON report so it
// can be piped straight into jq or a file.
//
// Level selection:
// 1. RUST_LOG, if set, wins
// 2. --verbose: debug for this crate, info for everything else
// 3. --quiet: errors only
// 4. otherwise: info for this crate, warn for dependencies
// =============================================================================

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    // try_init() fails only if a subscriber is already installed, which is
    // harmless (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

pub(crate) fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "info,webscraper=debug"
    } else {
        "warn,webscraper=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false, false), "warn,webscraper=info");
        assert_eq!(default_directives(true, false), "info,webscraper=debug");
        assert_eq!(default_directives(false, true), "error");
    }

    #[test]
    fn test_directives_parse() {
        for (verbose, quiet) in [(false, false), (true, false), (false, true)] {
            assert!(EnvFilter::try_new(default_directives(verbose, quiet)).is_ok());
        }
    }
}
