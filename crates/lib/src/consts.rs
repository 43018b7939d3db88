/// File whose presence marks a directory as a project root.
pub const PROJECT_MARKER: &str = "quire.yaml";

/// Environment variable naming the VCS backend used when neither the command
/// line nor the project configuration picks one.
pub const VCS_ENV_VAR: &str = "QUIRE_VCS";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_LAYOUTS_DIR: &str = "layouts";
pub const DEFAULT_STATIC_DIR: &str = "static";
