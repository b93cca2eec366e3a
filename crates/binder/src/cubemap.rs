use std::path::PathBuf;

use shadertoy::CUBEMAP_WILDCARD;
use tracing::debug;

use crate::host::ResourceHost;

/// Face naming conventions, tried in order. Each lists east, west, up, down,
/// north, south.
pub const FACE_NAME_SETS: [[&str; 6]; 4] = [
    ["e", "w", "u", "d", "n", "s"],
    ["east", "west", "up", "down", "north", "south"],
    ["px", "nx", "py", "ny", "pz", "nz"],
    ["posx", "negx", "posy", "negy", "posz", "negz"],
];

pub fn has_single_wildcard(pattern: &str) -> bool {
    pattern.matches(CUBEMAP_WILDCARD).count() == 1
}

/// Returns the six face files of the first naming convention whose files all
/// exist.
pub fn discover_faces(pattern: &str, host: &dyn ResourceHost) -> Option<[PathBuf; 6]> {
    FACE_NAME_SETS.iter().find_map(|names| {
        let faces: [PathBuf; 6] = std::array::from_fn(|face| {
            PathBuf::from(pattern.replacen(CUBEMAP_WILDCARD, names[face], 1))
        });
        if faces.iter().all(|face| host.file_exists(face)) {
            debug!(pattern, convention = names[0], "discovered cube map faces");
            Some(faces)
        } else {
            None
        }
    })
}
