//! CLI-boundary errors (§7 `InputError`): malformed user input, surfaced as a message rather than
//! a process abort, with no core state mutated.

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CliError {
    #[error("unknown small group {name:?}; known names: {known}")]
    UnknownFixture { name: String, known: &'static str },

    #[error("no block loaded; pass --small <name> or --from-dump <path>")]
    NoBlockLoaded,

    #[error("the KL row at y={y} has not been filled; run klbasis first or raise --fill-limit")]
    RowNotFilled { y: u32 },

    #[error("{command} requires computing the unitary dual, which is outside this system's scope (see DESIGN.md)")]
    OutOfScope { command: &'static str },
}
