//! WGSL compilation with diagnostics.
//!
//! Programs are compiled one stage at a time so that a failure can name the
//! scene object and the stage it came from. Creation runs inside a
//! validation error scope; an invalid program is an error, never a panic.

use crate::error::{Result, SceneError, ShaderStage};

/// Compile one stage of `object`'s shader program.
pub async fn compile(
    device: &wgpu::Device,
    object: &'static str,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let label = format!("{} {} shader", object, stage);
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let validation = scope.pop().await;

    let info = module.get_compilation_info().await;
    let mut errors: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();
    for warning in info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Warning))
    {
        log::warn!("{}: {}", label, warning.message);
    }

    if let Some(e) = validation.filter(|_| errors.is_empty()) {
        errors.push(e.to_string());
    }

    if errors.is_empty() {
        Ok(module)
    } else {
        let err = SceneError::Shader {
            object,
            stage,
            message: errors.join("\n"),
        };
        log::error!("{}", err);
        Err(err)
    }
}

/// Compile both stages of a program.
pub async fn compile_program(
    device: &wgpu::Device,
    object: &'static str,
    vertex: &str,
    fragment: &str,
) -> Result<(wgpu::ShaderModule, wgpu::ShaderModule)> {
    let vs = compile(device, object, ShaderStage::Vertex, vertex).await?;
    let fs = compile(device, object, ShaderStage::Fragment, fragment).await?;
    Ok((vs, fs))
}

/// Run `create` inside a validation error scope, so a rejected descriptor
/// comes back as [`SceneError::Pipeline`] rather than reaching the device's
/// uncaptured error handler.
pub async fn validated<T>(
    device: &wgpu::Device,
    label: &str,
    create: impl FnOnce() -> T,
) -> Result<T> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    match scope.pop().await {
        None => Ok(value),
        Some(e) => {
            let err = SceneError::Pipeline {
                label: label.to_string(),
                message: e.to_string(),
            };
            log::error!("{}", err);
            Err(err)
        }
    }
}
