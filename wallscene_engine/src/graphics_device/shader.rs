/// Shader descriptor, uniform reflection and uniform values

/// Descriptor for compiling a shader program
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderDesc {
    /// Vertex stage source
    pub vertex_code: String,
    /// Fragment stage source
    pub fragment_code: String,
    /// Vertex attribute name to location
    pub attributes: Vec<(String, u32)>,
    /// Sampler names in binding slot order
    pub texture_names: Vec<String>,
}

/// One entry of a shader's uniform table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformInfo {
    pub name: String,
    /// Location reported by the backend
    pub location: i32,
    /// Number of float components
    pub components: u32,
}

/// Value for a named uniform
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderValue {
    pub name: String,
    pub value: Vec<f32>,
}

impl ShaderValue {
    pub fn new(name: impl Into<String>, value: Vec<f32>) -> Self {
        Self { name: name.into(), value }
    }

    /// Raw bytes of the value, as uploaded to the backend
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.value)
    }
}
