//! Distribution layout rules and well-known names
//!
//! Maps module coordinates to destination paths inside the distribution.
//! Artifacts land in a Maven-repository-style hierarchy so the bootstrap
//! loader can locate them by coordinate at runtime; the bootstrap loader
//! artifact itself sits at a predictable flat path.

/// Group of the designated bootstrap loader artifact
pub const BOOTSTRAP_GROUP: &str = "net.kyori";

/// Name of the designated bootstrap loader artifact
pub const BOOTSTRAP_NAME: &str = "bootstrap";

/// File name of the generated bootstrap descriptor
pub const DESCRIPTOR_FILE_NAME: &str = "bootstrap.xml";

/// Directory inside the distribution that holds staged library artifacts
pub const LIBRARIES_DIR: &str = "lib";

const JAR_EXTENSION: &str = "jar";

/// Compute the destination path for a module's artifact
///
/// The bootstrap sentinel maps to a flat `{name}-{version}.jar`; every other
/// module maps to `{group with dots as slashes}/{name}/{version}/{name}-{version}.jar`.
/// Pure and total.
pub fn artifact_path(group: &str, name: &str, version: &str) -> String {
    if group == BOOTSTRAP_GROUP && name == BOOTSTRAP_NAME {
        format!("{name}-{version}.{JAR_EXTENSION}")
    } else {
        format!(
            "{}/{name}/{version}/{name}-{version}.{JAR_EXTENSION}",
            group.replace('.', "/")
        )
    }
}
