use std::fmt;
use std::path::Path;

use super::ShaderError;

/// Pipeline stage a shader file is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Source language, inferred from the file extension.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderLanguage {
    /// GLSL 4.50 (`.vert`, `.frag`, `.glsl`). One stage per file, entry point `main`.
    Glsl,
    Wgsl,
}

impl ShaderLanguage {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "vert" | "frag" | "glsl" => Some(ShaderLanguage::Glsl),
            "wgsl" => Some(ShaderLanguage::Wgsl),
            _ => None,
        }
    }
}

/// Shader text for one stage, exactly as read from disk.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    /// File name used in diagnostics (`main.vert`).
    pub name: String,
    pub stage: ShaderStage,
    pub language: ShaderLanguage,
    pub text: String,
}

impl ShaderSource {
    pub fn new(
        name: impl Into<String>,
        stage: ShaderStage,
        language: ShaderLanguage,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            stage,
            language,
            text: text.into(),
        }
    }

    /// Reads a shader file. The language is checked before touching the disk.
    pub fn load(path: &Path, stage: ShaderStage) -> Result<Self, ShaderError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let language =
            ShaderLanguage::from_path(path).ok_or_else(|| ShaderError::UnknownLanguage {
                name: name.clone(),
            })?;

        let text = std::fs::read_to_string(path).map_err(|source| ShaderError::Load {
            name: name.clone(),
            source,
        })?;

        log::debug!("loaded {stage} shader {name} ({} bytes)", text.len());

        Ok(Self {
            name,
            stage,
            language,
            text,
        })
    }
}
