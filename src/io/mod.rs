pub mod gltf;
pub mod svg;

/// Failure to load mesh geometry from a glTF/GLB source.
///
/// Upstream errors are carried unchanged.
#[derive(Debug)]
pub enum LoadError {
    StdIo(std::io::Error),
    Gltf(::gltf::Error),

    MalformedInput(String),
    NoGeometry(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LoadError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            Gltf(error) => write!(f, "glTF error: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
            NoGeometry(msg) => write!(f, "No triangle geometry: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::StdIo(error) => Some(error),
            LoadError::Gltf(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<::gltf::Error> for LoadError {
    fn from(value: ::gltf::Error) -> Self {
        Self::Gltf(value)
    }
}

/// Failure to read scene metadata from a glTF/GLB source.
#[derive(Debug)]
pub enum MetadataError {
    StdIo(std::io::Error),
    Gltf(::gltf::Error),
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::StdIo(error) => write!(f, "std::io::Error: {error}"),
            MetadataError::Gltf(error) => write!(f, "glTF error: {error}"),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetadataError::StdIo(error) => Some(error),
            MetadataError::Gltf(error) => Some(error),
        }
    }
}

impl From<std::io::Error> for MetadataError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<::gltf::Error> for MetadataError {
    fn from(value: ::gltf::Error) -> Self {
        Self::Gltf(value)
    }
}
