#![cfg(feature = "integration-tests")]

mod common;

use eclipse_ngin::{
    camera::CameraResources,
    config::{BloomParams, SceneConfig},
    data_structures::texture::Texture,
    postprocessing::{Composer, PassKind, PassState},
    render::SceneObjects,
    scene::SceneState,
    viewport::Viewport,
};
use instant::Duration;

const SIZE: u32 = 64;
const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

async fn render_frame(
    config: SceneConfig,
    prepare: impl FnOnce(&mut Composer),
) -> image::ImageBuffer<image::Rgba<u8>, Vec<u8>> {
    let (adapter, device, queue) = common::headless_gpu().await;

    let viewport = Viewport::new(SIZE as f64, SIZE as f64, 1.0).unwrap();
    let scene = SceneState::new(&config, &viewport);
    let camera = CameraResources::new(&device, &scene.camera, &scene.projection);
    let mut composer = Composer::new(&device, &adapter, FORMAT, (SIZE, SIZE), &config)
        .await
        .unwrap();
    prepare(&mut composer);
    let mut objects = SceneObjects::new(
        &device,
        &queue,
        &camera.bind_group_layout,
        composer.formats(),
        &config,
    )
    .await
    .unwrap();
    let field = objects.stars().field();
    assert_eq!(field.len(), config.stars.count);
    assert_eq!(field.positions().len(), 3 * config.stars.count);
    assert_eq!(field.is_empty(), config.stars.count == 0);
    objects.update(&queue, &scene);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("headless_target"),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("headless_encoder"),
    });
    composer
        .render(
            &queue,
            &mut encoder,
            &view,
            &objects,
            &camera.bind_group,
            Duration::from_millis(16),
        )
        .unwrap();

    let bytes_per_row = 4 * SIZE;
    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: None,
        size: (bytes_per_row * SIZE) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(SIZE),
            },
        },
        wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).unwrap();
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(std::time::Duration::from_secs(3)),
        })
        .unwrap();
    rx.receive().await.unwrap().unwrap();
    let data = buffer_slice.get_mapped_range().to_vec();
    image::ImageBuffer::from_raw(SIZE, SIZE, data).unwrap()
}

fn disable_optional(composer: &mut Composer) {
    for kind in [PassKind::Bloom, PassKind::Antialias, PassKind::Film] {
        composer.set_enabled(kind, false).unwrap();
    }
}

#[test]
fn base_render_clears_around_the_eclipse() {
    let config = SceneConfig {
        clear_colour: [1.0, 1.0, 1.0, 1.0],
        stars: eclipse_ngin::config::StarfieldConfig {
            count: 0,
            ..Default::default()
        },
        ..SceneConfig::default()
    };
    let img = common::block_on(render_frame(config, disable_optional));

    let white = image::Rgba([255, 255, 255, 255]);
    assert_eq!(*img.get_pixel(0, 0), white);
    assert_eq!(*img.get_pixel(SIZE - 1, SIZE - 1), white);
    assert_ne!(*img.get_pixel(SIZE / 2, SIZE / 2), white);
}

#[test]
fn full_chain_renders_a_frame() {
    let img = common::block_on(render_frame(SceneConfig::default(), |composer| {
        assert_eq!(composer.chain().terminal(), PassKind::Film);
    }));
    assert_eq!(img.dimensions(), (SIZE, SIZE));
}

#[test]
fn frame_renders_without_an_unavailable_pass() {
    let config = SceneConfig {
        clear_colour: [1.0, 1.0, 1.0, 1.0],
        stars: eclipse_ngin::config::StarfieldConfig {
            count: 0,
            ..Default::default()
        },
        ..SceneConfig::default()
    };
    let img = common::block_on(render_frame(config, |composer| {
        composer.set_enabled(PassKind::Bloom, false).unwrap();
        assert_eq!(
            composer.mark_unavailable(PassKind::Film).unwrap(),
            PassKind::Antialias
        );
        assert_eq!(composer.chain().state(PassKind::Film), PassState::Unavailable);
        assert!(composer.set_enabled(PassKind::Film, true).is_err());
        assert_eq!(composer.chain().terminal(), PassKind::Antialias);
        assert!(composer.mark_unavailable(PassKind::Render).is_err());
    }));

    // antialiasing leaves a flat background untouched
    assert_eq!(*img.get_pixel(0, 0), image::Rgba([255, 255, 255, 255]));
}

#[test]
fn composer_reports_configured_parameters() {
    common::block_on(async {
        let (adapter, device, queue) = common::headless_gpu().await;
        let config = SceneConfig::default();
        let mut composer = Composer::new(&device, &adapter, FORMAT, (SIZE, SIZE), &config)
            .await
            .unwrap();

        let bloom = composer.bloom();
        assert_eq!((bloom.strength, bloom.threshold, bloom.radius), (0.8, 0.1, 1.0));
        assert_eq!(composer.film(), config.film);

        let brighter = BloomParams {
            strength: 2.0,
            ..bloom
        };
        composer.set_bloom(&queue, brighter);
        assert_eq!(composer.bloom(), brighter);
        assert_eq!(composer.chain().bloom(), brighter);
    });
}

#[test]
fn composer_resizes_to_physical_pixels() {
    common::block_on(async {
        let (adapter, device, queue) = common::headless_gpu().await;
        let mut composer =
            Composer::new(&device, &adapter, FORMAT, (SIZE, SIZE), &SceneConfig::default())
                .await
                .unwrap();
        assert_eq!(composer.size(), (SIZE, SIZE));

        let viewport = Viewport::new(50.0, 40.0, 2.0).unwrap();
        let (width, height) = viewport.pixel_size();
        composer.resize(&device, &queue, width, height);
        assert_eq!(composer.size(), (100, 80));

        composer.resize(&device, &queue, 0, 0);
        assert_eq!(composer.size(), (1, 1));
    });
}

#[test]
fn render_targets_report_their_size() {
    common::block_on(async {
        let (_, device, _) = common::headless_gpu().await;
        let target = Texture::create_render_target(&device, [20, 10], FORMAT, "sized_target");
        assert_eq!((target.width(), target.height()), (20, 10));
        let depth = Texture::create_depth_texture(&device, [7, 3], "sized_depth");
        assert_eq!((depth.width(), depth.height()), (7, 3));
    });
}
