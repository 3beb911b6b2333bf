#![cfg(feature = "integration-tests")]

mod common;

use eclipse_ngin::{
    error::{SceneError, ShaderStage},
    pipelines::shader,
    postprocessing::fullscreen,
};

const BROKEN_FRAGMENT: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(undefined_value, 0.0, 0.0, 1.0);
}
"#;

const PLAIN_FRAGMENT: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

#[test]
fn broken_wgsl_is_an_error_naming_object_and_stage() {
    common::block_on(async {
        let (_, device, _) = common::headless_gpu().await;
        match shader::compile(&device, "film", ShaderStage::Fragment, BROKEN_FRAGMENT).await {
            Err(SceneError::Shader {
                object,
                stage,
                message,
            }) => {
                assert_eq!(object, "film");
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!message.is_empty());
            }
            other => panic!("expected a fragment shader error, got {:?}", other.map(|_| ())),
        }
    });
}

#[test]
fn valid_wgsl_compiles() {
    common::block_on(async {
        let (_, device, _) = common::headless_gpu().await;
        assert!(
            shader::compile(&device, "film", ShaderStage::Fragment, PLAIN_FRAGMENT)
                .await
                .is_ok()
        );
    });
}

#[test]
fn rejected_pipeline_is_an_error() {
    common::block_on(async {
        let (_, device, _) = common::headless_gpu().await;
        let vertex = fullscreen::compile_vertex(&device).await.unwrap();
        let fragment = shader::compile(&device, "film", ShaderStage::Fragment, PLAIN_FRAGMENT)
            .await
            .unwrap();
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("empty_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let missing_entry = shader::validated(&device, "missing entry", || {
            fullscreen::mk_fullscreen_pipeline(
                &device,
                "missing entry",
                &layout,
                &vertex,
                &fragment,
                "fs_does_not_exist",
                wgpu::TextureFormat::Rgba8Unorm,
                None,
            )
        })
        .await;
        assert!(matches!(
            missing_entry,
            Err(SceneError::Pipeline { ref label, .. }) if label == "missing entry"
        ));

        let built = shader::validated(&device, "plain", || {
            fullscreen::mk_fullscreen_pipeline(
                &device,
                "plain",
                &layout,
                &vertex,
                &fragment,
                "fs_main",
                wgpu::TextureFormat::Rgba8Unorm,
                None,
            )
        })
        .await;
        assert!(built.is_ok());
    });
}
