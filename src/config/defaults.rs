//! Default configuration values

/// Manifest file looked up in the current directory
pub const MANIFEST_FILE: &str = "buildstack.toml";

/// Overlay file name inside the config directory
pub const OVERLAY_FILE: &str = "overrides.json";

/// Aggregate meta-task dispatched when no task is named
pub const DEFAULT_TASK: &str = "all";

/// Out-of-tree build directory inside each task's source directory
pub const BUILD_SUBDIR: &str = "build";

/// Source root used when neither the manifest nor the CLI sets one
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// Install prefix used when neither the manifest nor the CLI sets one
pub const DEFAULT_INSTALL_PREFIX: &str = "install";

/// Environment variable overriding the manifest path
pub const ENV_MANIFEST: &str = "BUILDSTACK_MANIFEST";

/// Environment variable overriding the source root
pub const ENV_SOURCE_ROOT: &str = "BUILDSTACK_SOURCE_ROOT";

/// Environment variable overriding the install prefix
pub const ENV_PREFIX: &str = "BUILDSTACK_PREFIX";

/// Environment variable overriding the overlay path
pub const ENV_OVERLAY: &str = "BUILDSTACK_OVERLAY";

/// Default configure command
pub const CONFIGURE_COMMAND: &[&str] = &["cmake", "-DCMAKE_INSTALL_PREFIX={prefix}", "{source}"];

/// Default compile command
pub const COMPILE_COMMAND: &[&str] = &["make", "-j{jobs}"];

/// Default install command
pub const INSTALL_COMMAND: &[&str] = &["make", "install"];
