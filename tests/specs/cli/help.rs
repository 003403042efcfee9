//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    mg().args(&["--help"])
        .passes()
        .stdout_has("generate")
        .stdout_has("regenerate")
        .stdout_has("interactive");
}

#[test]
fn help_mentions_global_options() {
    mg().args(&["--help"])
        .passes()
        .stdout_has("--base-url")
        .stdout_has("--format");
}

#[test]
fn generate_help_names_the_argument() {
    mg().args(&["generate", "--help"])
        .passes()
        .stdout_has("ANALYSIS_ID");
}

#[test]
fn version_prints_binary_name() {
    mg().args(&["--version"]).passes().stdout_has("mg ");
}
