use crate::data_structures::texture::Texture;

/// How a scene pipeline treats the shared depth buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthMode {
    /// Test and write.
    Opaque,
    /// Test only, for blended geometry drawn after the opaque objects.
    ReadOnly,
}

/// Everything a scene pipeline needs besides its shaders.
pub struct PipelineDesc<'a> {
    pub label: &'a str,
    pub layout: &'a wgpu::PipelineLayout,
    pub blend: Option<wgpu::BlendState>,
    pub depth: DepthMode,
    pub cull_mode: Option<wgpu::Face>,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    desc: &PipelineDesc,
    color_format: wgpu::TextureFormat,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: vertex,
            entry_point: Some("vs_main"),
            buffers: desc.vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: fragment,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: desc.depth == DepthMode::Opaque,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}

/// Camera in group 0, object uniform in group 1, then any extra groups.
pub fn mk_scene_layout(
    device: &wgpu::Device,
    label: &str,
    camera_layout: &wgpu::BindGroupLayout,
    object_layout: &wgpu::BindGroupLayout,
    extra: &[&wgpu::BindGroupLayout],
) -> wgpu::PipelineLayout {
    let mut layouts = vec![camera_layout, object_layout];
    layouts.extend_from_slice(extra);
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &layouts,
        immediate_size: 0,
    })
}
