//! Shader loading.
//!
//! Sources are WGSL. Each source is parsed and validated on the CPU before it
//! reaches the device, so a broken shader is reported through `log` with the
//! offending line instead of tripping the device's error handler. A shader
//! that fails validation yields `None`; callers skip the pipeline that needed it.

/// Pipeline stage a shader source is written for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        }
    }

    /// Entry point name every source of this kind must define.
    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vs_main",
            ShaderKind::Fragment => "fs_main",
        }
    }
}

/// Compiles `source` into a shader module.
///
/// Returns `None` (after logging) when the source does not parse or validate.
pub fn load_shader(
    device: &wgpu::Device,
    kind: ShaderKind,
    label: &str,
    source: &str,
) -> Option<wgpu::ShaderModule> {
    if let Err(message) = validate_wgsl(kind, source) {
        log::error!("{} shader `{label}` failed to compile:\n{message}", kind.as_str());
        return None;
    }

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    log::debug!("compiled {} shader `{label}`", kind.as_str());
    Some(module)
}

/// Parses and validates a WGSL source and checks its entry point.
///
/// The error string is a rendered diagnostic pointing at the source span.
pub fn validate_wgsl(kind: ShaderKind, source: &str) -> Result<(), String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| e.emit_to_string(source))?;

    let stage = match kind {
        ShaderKind::Vertex => naga::ShaderStage::Vertex,
        ShaderKind::Fragment => naga::ShaderStage::Fragment,
    };
    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage && ep.name == kind.entry_point());
    if !has_entry {
        return Err(format!(
            "missing {} entry point `{}`",
            kind.as_str(),
            kind.entry_point()
        ));
    }

    Ok(())
}
