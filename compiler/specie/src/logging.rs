//! Tracing setup for the binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when logging was asked for.
///
/// `RUST_LOG` selects what is shown (`RUST_LOG=specie_eval=debug`). With
/// `SPECIE_LOG_TREE` set, spans print as an indented tree instead of flat
/// lines; if `RUST_LOG` is unset the tree shows `debug` and above. Safe to
/// call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let tree = std::env::var_os("SPECIE_LOG_TREE").is_some();
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) if tree => EnvFilter::new("debug"),
            Err(_) => return,
        };

        if tree {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
